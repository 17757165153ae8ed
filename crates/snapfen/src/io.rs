//! JSON payload, configuration and report helpers.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use snapfen_assign::{AssignParams, Overwrite, Placement, RawDetection};
use snapfen_core::{BoardGrid, GridError, SquareCenters};
use snapfen_fen::SideToMove;

use crate::convert::{viewer_url, Conversion, DEFAULT_VIEWER_URL};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Detector output for one photo.
///
/// `squares` is `[xs, ys]`: two parallel grids holding the pixel x and y of
/// every square center. `pieces` keeps the detector's order; later pieces win
/// when two land on the same square.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionPayload {
    pub squares: Vec<Vec<Vec<f32>>>,
    #[serde(default)]
    pub pieces: Vec<RawDetection>,
}

impl DetectionPayload {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Load a payload from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(Self::from_json_str(&raw)?)
    }

    /// Validate `squares` into square centers.
    pub fn square_centers(&self) -> Result<SquareCenters, GridError> {
        match self.squares.as_slice() {
            [xs, ys] => SquareCenters::from_grids(xs, ys),
            other => Err(GridError::AxisCount { found: other.len() }),
        }
    }
}

/// Conversion settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    #[serde(default)]
    pub side_to_move: SideToMove,
    #[serde(default)]
    pub assign: AssignParams,
    /// Base URL of the board viewer page; see [`viewer_url`].
    #[serde(default)]
    pub viewer_base_url: Option<String>,
}

impl ConvertConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the viewer base URL.
    pub fn viewer_base_url(&self) -> &str {
        self.viewer_base_url.as_deref().unwrap_or(DEFAULT_VIEWER_URL)
    }
}

/// Machine-readable summary of one conversion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub fen: String,
    pub viewer_url: String,
    pub side_to_move: SideToMove,
    pub board: BoardGrid,
    pub placements: Vec<Placement>,
    #[serde(default)]
    pub overwrites: Vec<Overwrite>,
}

impl ConversionReport {
    pub fn new(conversion: &Conversion, config: &ConvertConfig) -> Self {
        Self {
            fen: conversion.fen.clone(),
            viewer_url: viewer_url(config.viewer_base_url(), &conversion.fen),
            side_to_move: conversion.side_to_move,
            board: conversion.assignment.board.clone(),
            placements: conversion.assignment.placements.clone(),
            overwrites: conversion.assignment.overwrites.clone(),
        }
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
