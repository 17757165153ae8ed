//! Piece detections as delivered by the detector service.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use snapfen_core::BoundingBox;

use crate::AssignError;

/// A required field of a detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionField {
    Left,
    Right,
    Top,
    Bottom,
    Label,
}

impl DetectionField {
    pub const fn name(self) -> &'static str {
        match self {
            DetectionField::Left => "left",
            DetectionField::Right => "right",
            DetectionField::Top => "top",
            DetectionField::Bottom => "bottom",
            DetectionField::Label => "label",
        }
    }
}

impl fmt::Display for DetectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated detection: bounding box plus detector label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceDetection {
    pub bbox: BoundingBox,
    pub label: String,
}

impl PieceDetection {
    pub fn new(bbox: BoundingBox, label: impl Into<String>) -> Self {
        Self {
            bbox,
            label: label.into(),
        }
    }
}

/// A detection exactly as it arrives in the payload.
///
/// The service returns either a JSON object with `left`/`right`/`top`/`bottom`
/// and `label`, or the detection's `repr` string, e.g.
/// `"Detection(left=10, top=20, right=30, bottom=40, label='WhiteKing')"`.
///
/// Field values are kept as raw JSON so that a wrongly typed field is reported
/// by [`RawDetection::validate`] with its index instead of failing the whole
/// payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawDetection {
    Repr(String),
    Fields {
        left: Option<Value>,
        right: Option<Value>,
        top: Option<Value>,
        bottom: Option<Value>,
        label: Option<Value>,
    },
    /// Anything else (number, array, null, ...).
    Other(Value),
}

impl From<Value> for RawDetection {
    fn from(value: Value) -> Self {
        match value {
            Value::String(repr) => RawDetection::Repr(repr),
            Value::Object(mut map) => RawDetection::Fields {
                left: map.remove("left"),
                right: map.remove("right"),
                top: map.remove("top"),
                bottom: map.remove("bottom"),
                label: map.remove("label"),
            },
            other => RawDetection::Other(other),
        }
    }
}

impl<'de> Deserialize<'de> for RawDetection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawDetection::from)
    }
}

impl From<PieceDetection> for RawDetection {
    fn from(d: PieceDetection) -> Self {
        RawDetection::Fields {
            left: Some(Value::from(d.bbox.left)),
            right: Some(Value::from(d.bbox.right)),
            top: Some(Value::from(d.bbox.top)),
            bottom: Some(Value::from(d.bbox.bottom)),
            label: Some(Value::from(d.label)),
        }
    }
}

/// Pixel coordinate that is representable as a finite `f32`.
fn finite_coord(value: f64) -> Option<f32> {
    let v = value as f32;
    v.is_finite().then_some(v)
}

impl RawDetection {
    /// Validate into a [`PieceDetection`]. `index` is the position in the input
    /// sequence and is carried into the error.
    pub fn validate(&self, index: usize) -> Result<PieceDetection, AssignError> {
        let missing = |field| AssignError::MalformedDetection { index, field };
        let coord = |v: &Option<Value>, field| {
            v.as_ref()
                .and_then(Value::as_f64)
                .and_then(finite_coord)
                .ok_or(missing(field))
        };

        match self {
            RawDetection::Fields {
                left,
                right,
                top,
                bottom,
                label,
            } => {
                let bbox = BoundingBox::new(
                    coord(left, DetectionField::Left)?,
                    coord(right, DetectionField::Right)?,
                    coord(top, DetectionField::Top)?,
                    coord(bottom, DetectionField::Bottom)?,
                );
                let label = label
                    .as_ref()
                    .and_then(Value::as_str)
                    .filter(|l| !l.is_empty())
                    .ok_or(missing(DetectionField::Label))?;
                Ok(PieceDetection::new(bbox, label))
            }
            RawDetection::Repr(repr) => {
                let number = |field: DetectionField| {
                    repr_value(repr, field.name())
                        .and_then(parse_repr_number)
                        .ok_or(missing(field))
                };
                let bbox = BoundingBox::new(
                    number(DetectionField::Left)?,
                    number(DetectionField::Right)?,
                    number(DetectionField::Top)?,
                    number(DetectionField::Bottom)?,
                );
                let label = repr_value(repr, DetectionField::Label.name())
                    .and_then(parse_quoted)
                    .ok_or(missing(DetectionField::Label))?;
                Ok(PieceDetection::new(bbox, label))
            }
            RawDetection::Other(_) => Err(missing(DetectionField::Left)),
        }
    }
}

/// Text following `key=` where `key` starts at a word boundary.
fn repr_value<'a>(repr: &'a str, key: &str) -> Option<&'a str> {
    let mut search = 0;
    while let Some(pos) = repr[search..].find(key).map(|p| p + search) {
        let after = pos + key.len();
        let at_boundary = repr[..pos]
            .chars()
            .next_back()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_'));
        if at_boundary {
            if let Some(rest) = repr[after..].strip_prefix('=') {
                return Some(rest);
            }
        }
        search = after;
    }
    None
}

/// The whole value up to the next `,` or `)` must be a finite number.
fn parse_repr_number(s: &str) -> Option<f32> {
    let end = s.find([',', ')']).unwrap_or(s.len());
    s[..end].trim().parse::<f64>().ok().and_then(finite_coord)
}

fn parse_quoted(s: &str) -> Option<&str> {
    let quote = s.chars().next().filter(|&c| c == '\'' || c == '"')?;
    let body = &s[1..];
    let end = body.find(quote)?;
    Some(&body[..end]).filter(|l| !l.is_empty())
}
