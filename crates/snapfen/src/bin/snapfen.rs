use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use snapfen::{
    convert, viewer_url, ClampPolicy, ConversionReport, ConvertConfig, ConvertError,
    DetectionPayload, IoError, SideToMove,
};

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

/// Convert chess piece detections (square centers + labelled boxes) into FEN.
#[derive(Parser, Debug)]
#[command(name = "snapfen", version, about)]
struct Cli {
    /// Detection payload JSON with `squares` ([xs, ys]) and `pieces`.
    payload: PathBuf,

    /// JSON config file; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side to move: white or black (w/b also accepted).
    #[arg(long)]
    side: Option<SideToMove>,

    /// What to do with pieces whose nearest square index lies off the board.
    #[arg(long, value_enum)]
    clamp: Option<ClampArg>,

    /// Reject pieces farther than this many pixels from any square center.
    #[arg(long)]
    max_distance: Option<f32>,

    /// Print the board viewer URL instead of the bare FEN.
    #[arg(long)]
    viewer_url: bool,

    /// Write a JSON report with placements and overwrites to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Emit JSON log lines.
    #[cfg(feature = "tracing")]
    #[arg(long)]
    json_logs: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ClampArg {
    Clamp,
    Warn,
    Reject,
}

impl From<ClampArg> for ClampPolicy {
    fn from(arg: ClampArg) -> Self {
        match arg {
            ClampArg::Clamp => ClampPolicy::Clamp,
            ClampArg::Warn => ClampPolicy::Warn,
            ClampArg::Reject => ClampPolicy::Reject,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{}: {source}", .path.display())]
    File { path: PathBuf, source: IoError },
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

fn init_logging(cli: &Cli) {
    let level = snapfen::core::verbosity_level(cli.verbose);

    #[cfg(feature = "tracing")]
    {
        let _ = LogTracer::init_with_filter(level);
        snapfen::core::init_tracing(cli.json_logs);
    }

    #[cfg(not(feature = "tracing"))]
    {
        let _ = snapfen::core::init_with_level(level);
    }
}

fn build_config(cli: &Cli) -> Result<ConvertConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => ConvertConfig::load_json(path).map_err(|source| CliError::File {
            path: path.clone(),
            source,
        })?,
        None => ConvertConfig::default(),
    };
    if let Some(side) = cli.side {
        config.side_to_move = side;
    }
    if let Some(clamp) = cli.clamp {
        config.assign.clamp = clamp.into();
    }
    if let Some(max_distance) = cli.max_distance {
        config.assign.max_distance = Some(max_distance);
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = build_config(cli)?;
    let payload = DetectionPayload::load_json(&cli.payload).map_err(|source| CliError::File {
        path: cli.payload.clone(),
        source,
    })?;

    let conversion = convert(&payload, &config)?;

    if let Some(path) = &cli.report {
        ConversionReport::new(&conversion, &config)
            .write_json(path)
            .map_err(|source| CliError::File {
                path: path.clone(),
                source,
            })?;
        log::info!("wrote report JSON to {}", path.display());
    }

    if cli.viewer_url {
        println!("{}", viewer_url(config.viewer_base_url(), &conversion.fen));
    } else {
        println!("{}", conversion.fen);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
