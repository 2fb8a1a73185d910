//! posewire - tracking-camera pose to serial frame bridge
//!
//! Reads pose samples as JSON lines and writes one fixed-point hex token
//! frame per sample to a serial controller.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod output;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use posewire::{
    Bridge, BridgeConfig, BridgeError, ConfigOverrides, ConsoleReporter, PoseSource, ReplaySource,
    Transport, WriterTransport, open_serial, open_source,
};
use posewire_protocol::{FrameLayout, POSE_FIELD_COUNT, PoseSample, ReportMode};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "posewire")]
#[command(about = "Stream tracking-camera pose samples to a serial controller")]
#[command(version)]
#[command(long_about = "
posewire reads pose samples (position, velocity, acceleration, angular velocity)
as JSON lines from stdin or a file, converts every field to centimetre fixed point,
and writes one framed line of hex tokens per sample to a serial device.

Use --stdout to write the frames to standard output instead of a serial port.
")]
struct Cli {
    /// Configuration file (YAML, or JSON by extension)
    #[arg(short, long, global = true, env = "POSEWIRE_CONFIG")]
    config: Option<PathBuf>,

    /// Serial device path
    #[arg(long, global = true, env = "POSEWIRE_DEVICE")]
    device: Option<PathBuf>,

    /// Serial baud rate
    #[arg(long, global = true, env = "POSEWIRE_BAUD")]
    baud: Option<u32>,

    /// Frame layout: legacy or append
    #[arg(long, global = true)]
    layout: Option<FrameLayout>,

    /// Reject non-finite and out-of-range fields
    #[arg(long, global = true)]
    strict: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Pose input file, `-` for stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print a debug report per sample: raw, scaled-int or scaled-hex
    #[arg(long)]
    report: Option<ReportMode>,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Write frames to stdout instead of the serial device
    #[arg(long)]
    stdout: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode one sample given on the command line and print its tokens
    Encode {
        /// px py pz vx vy vz ax ay az gx gy gz
        #[arg(num_args = POSE_FIELD_COUNT, required = true, allow_negative_numbers = true)]
        values: Vec<f32>,
    },

    /// Load, validate and print the effective configuration
    CheckConfig,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            device: self.device.clone(),
            baud: self.baud,
            input: self.input.clone(),
            layout: self.layout,
            strict: self.strict,
            report: self.report,
            max_frames: self.max_frames,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("posewire={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error_human(&e);
            let code = e
                .downcast_ref::<BridgeError>()
                .map_or(1, BridgeError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    match &cli.command {
        None => run_bridge(&config, cli.stdout),
        Some(Commands::Encode { values }) => encode_once(&config, values),
        Some(Commands::CheckConfig) => {
            print!("{}", config.to_yaml()?);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<BridgeConfig> {
    let mut config = match &cli.config {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    };
    config.apply(&cli.overrides());
    config.validate()?;
    Ok(config)
}

fn run_bridge(config: &BridgeConfig, to_stdout: bool) -> Result<()> {
    // Open the input before touching the serial port.
    let source: Box<dyn PoseSource> = open_source(config.input_path())?;

    let (transport, report_out): (Box<dyn Transport>, Box<dyn Write>) = if to_stdout {
        (
            Box::new(WriterTransport::new(std::io::stdout().lock(), "stdout")),
            Box::new(std::io::stderr()),
        )
    } else {
        let serial = open_serial(&config.serial.device, config.serial.baud)
            .with_context(|| format!("Cannot open {}", config.serial.device.display()))?;
        (Box::new(serial), Box::new(std::io::stdout()))
    };

    let mut bridge = Bridge::new(source, transport, config.encoder())
        .with_max_frames(config.max_frames);
    if let Some(mode) = config.report.mode {
        bridge = bridge.with_reporter(ConsoleReporter::new(report_out, mode));
    }

    let stats = bridge.run()?;
    info!(frames = stats.frames_sent, "Done");
    if !to_stdout {
        output::print_summary(stats.frames_sent, stats.bytes_sent);
    }
    Ok(())
}

fn encode_once(config: &BridgeConfig, values: &[f32]) -> Result<()> {
    let Ok(fields) = <[f32; POSE_FIELD_COUNT]>::try_from(values) else {
        return Err(BridgeError::InvalidSample(format!(
            "expected {POSE_FIELD_COUNT} values, got {}",
            values.len()
        ))
        .into());
    };

    // Same loop as streaming, one sample, frame captured in memory.
    let source = ReplaySource::new([PoseSample::from_array(fields)]);
    let transport = WriterTransport::new(Vec::new(), "encode");
    let mut bridge = Bridge::new(source, transport, config.encoder());
    if let Some(mode) = config.report.mode {
        let report_out: Box<dyn Write> = Box::new(std::io::stderr());
        bridge = bridge.with_reporter(ConsoleReporter::new(report_out, mode));
    }
    bridge.run()?;

    let (_, transport) = bridge.into_parts();
    let tokens = String::from_utf8_lossy(transport.get_ref());
    println!("{}", tokens.trim_end());
    Ok(())
}
