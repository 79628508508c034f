//! Command-line front end for sensor replay.

mod args;

use args::{Cli, Command, MockArgs, PlayArgs, ReplayArgs, ResampleArgs};
use clap::Parser;
use sensor_replay::prelude::*;
use sensor_replay::{resample, Result};
use tracing::{info, Level};

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let mut config = match &cli.config {
        Some(path) => ReplayConfig::load(path)?,
        None => ReplayConfig::default(),
    };
    if let Some(host) = &cli.host {
        config.console.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.console.port = port;
    }
    if let Some(token) = &cli.auth_token {
        config.console.auth_token = Some(token.clone());
    }
    config.playback.verbose |= cli.verbose;

    match cli.command {
        Command::Replay(args) => replay(config, args),
        Command::Play(args) => play(config, args),
        Command::Mock(args) => mock(config, args),
        Command::Resample(args) => resample_file(args),
    }
}

fn replay(mut config: ReplayConfig, args: ReplayArgs) -> Result<()> {
    let selected = [
        (args.accelerometer, ChannelGroup::Accelerometer),
        (args.gyroscope, ChannelGroup::Gyroscope),
        (args.magnetometer, ChannelGroup::Magnetometer),
    ];
    if selected.iter().any(|(on, _)| *on) {
        config.playback.channels = selected
            .iter()
            .filter(|(on, _)| *on)
            .fold(ChannelSet::empty(), |set, (_, group)| set.with(*group));
    }
    if let Some(repetitions) = args.repetitions {
        config.playback.repetitions = repetitions;
    }
    if args.period.is_some() {
        config.playback.period_ms = args.period;
    }
    if let Some(kind) = args.kind {
        config.playback.kind = kind;
    }

    let engine = ReplayEngine::builder().config(config).build()?;
    let summary = engine.replay_file(&args.csv, args.log.as_deref())?;
    report(&summary);
    Ok(())
}

fn play(mut config: ReplayConfig, args: PlayArgs) -> Result<()> {
    config.playback.period_ms = period_ms(args.frequency_hz);
    if let Some(kind) = args.kind {
        config.playback.kind = kind;
    }

    let engine = ReplayEngine::builder().config(config).build()?;
    let summary = engine.play_file(&args.csv, args.log.as_deref())?;
    report(&summary);
    Ok(())
}

fn mock(mut config: ReplayConfig, args: MockArgs) -> Result<()> {
    config.playback.period_ms = args.frequency.and_then(period_ms);
    let duration_ns = (args.duration.max(0.0) * 1e9).round() as i64;
    let model = WaveModel::with_magnitude(args.magnitude, args.seed)?.with_duration_ns(duration_ns);
    info!(magnitude = %args.magnitude, seed = args.seed, waves = model.waves().len(), "generated signal");

    let engine = ReplayEngine::builder().config(config).build()?;
    let summary = engine.with_console(args.log.as_deref(), model.group(), |sink| {
        engine.run_function(&model, sink)
    })?;
    report(&summary);
    Ok(())
}

fn resample_file(args: ResampleArgs) -> Result<()> {
    let model = FileModel::load(&args.csv, args.kind.unwrap_or_default())?;
    let mut log = LogWriter::create(&args.out)?;
    let rows = resample(&model, args.frequency_hz, &mut log)?;
    info!(rows, out = %args.out.display(), "resampled");
    Ok(())
}

/// 0 Hz and below mean as fast as possible.
fn period_ms(frequency_hz: f64) -> Option<f64> {
    (frequency_hz > 0.0).then(|| 1000.0 / frequency_hz)
}

fn report(summary: &ReplaySummary) {
    let metrics = &summary.metrics;
    info!(
        passes = summary.passes.len(),
        emissions = summary.emissions(),
        failures = metrics.failures,
        skipped = metrics.skipped,
        rate_hz = format_args!("{:.1}", summary.achieved_rate_hz()),
        stopped = summary.stopped(),
        "done"
    );
}
