use clap::{Parser, Subcommand};
use sensor_replay::core::InterpolantKind;
use sensor_replay::source::{Magnitude, DEFAULT_SEED};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sensor-replay", version, about = "Replay motion sensor data into a virtual device")]
pub struct Cli {
    /// TOML file with [playback] and [console] tables
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Console host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Console port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Token sent as `auth <token>` after connecting
    #[arg(long, global = true)]
    pub auth_token: Option<String>,

    /// Read console acknowledgements and log at debug level
    #[arg(short, long, global = true, action)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Replay(ReplayArgs),
    Play(PlayArgs),
    Mock(MockArgs),
    Resample(ResampleArgs),
}

#[derive(clap::Args, Debug)]
#[command(about = "Replay a CSV recording at its timestamps or at a fixed period")]
pub struct ReplayArgs {
    pub csv: PathBuf,

    /// Play the accelerometer
    #[arg(short, long, action)]
    pub accelerometer: bool,

    /// Play the gyroscope
    #[arg(short, long, action)]
    pub gyroscope: bool,

    /// Play the magnetometer
    #[arg(short, long, action)]
    pub magnetometer: bool,

    /// Number of passes over the file
    #[arg(short, long)]
    pub repetitions: Option<u32>,

    /// Interpolate and emit every MS milliseconds
    #[arg(long, value_name = "MS")]
    pub period: Option<f64>,

    #[arg(long)]
    pub kind: Option<InterpolantKind>,

    /// Log emitted values to this CSV file
    #[arg(long)]
    pub log: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
#[command(about = "Play a whole recording as one interpolated signal")]
pub struct PlayArgs {
    pub csv: PathBuf,

    /// Emission rate, 0 for as fast as possible
    pub frequency_hz: f64,

    #[arg(long)]
    pub kind: Option<InterpolantKind>,

    #[arg(long)]
    pub log: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
#[command(about = "Play a generated accelerometer signal")]
pub struct MockArgs {
    #[arg(long, default_value = "normal")]
    pub magnitude: Magnitude,

    /// Emission rate, as fast as possible when omitted
    #[arg(long, value_name = "HZ")]
    pub frequency: Option<f64>,

    /// Signal length in seconds
    #[arg(long, default_value_t = 10.0)]
    pub duration: f64,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    #[arg(long)]
    pub log: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
#[command(about = "Resample a recording offline into an output log")]
pub struct ResampleArgs {
    pub csv: PathBuf,

    pub frequency_hz: f64,

    pub out: PathBuf,

    #[arg(long)]
    pub kind: Option<InterpolantKind>,
}
