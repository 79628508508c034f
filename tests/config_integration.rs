//! Configuration files feeding the engine builder.

mod helpers;

use helpers::*;
use sensor_replay::core::{MemorySink, PlaybackMode};
use sensor_replay::prelude::*;
use sensor_replay::Error;

#[test]
fn test_load_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("replay.toml");
    std::fs::write(
        &path,
        r#"
[playback]
channels = ["gyroscope"]
interpolate = "gyroscope"
period_ms = 2.5
kind = "pchip"

[console]
host = "10.0.2.2"
port = 5556
"#,
    )
    .unwrap();

    let config = ReplayConfig::load(&path).unwrap();
    let (engine, _clock) = test_engine(config);

    assert_eq!(
        engine.config().playback.mode(),
        PlaybackMode::Interpolated {
            group: ChannelGroup::Gyroscope,
            period_ns: 2_500_000,
            kind: InterpolantKind::Pchip,
        }
    );
    assert_eq!(engine.config().console.address(), "10.0.2.2:5556");
}

#[test]
fn test_saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("replay.toml");
    let mut config = ReplayConfig::default();
    config.playback.repetitions = 4;
    config.playback.channels = ChannelSet::only(ChannelGroup::Magnetometer);
    config.console.auth_token = Some("secret".into());
    std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

    assert_eq!(ReplayConfig::load(&path).unwrap(), config);
}

#[test]
fn test_interpolated_group_must_be_requested() {
    let config = ReplayConfig::from_toml_str(
        r#"
[playback]
channels = ["gyroscope"]
period_ms = 5.0
"#,
    )
    .unwrap();

    let result = ReplayEngine::builder().config(config).build();
    assert!(matches!(result, Err(Error::Core(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ReplayConfig::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_config_repetitions_reach_the_scheduler() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(
        dir.path(),
        "walk.csv",
        "timestamp,ax,ay,az",
        &accel_ramp_rows(&[0, 10]),
    );
    let config = ReplayConfig::from_toml_str("[playback]\nrepetitions = 3\n").unwrap();
    let (engine, _clock) = test_engine(config);
    let mut sink = MemorySink::new();

    let summary = engine
        .run(&mut CsvSource::open(&csv).unwrap(), &mut sink)
        .unwrap();

    assert_eq!(summary.passes.len(), 3);
    assert_eq!(sink.emissions().len(), 6);
}
