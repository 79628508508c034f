//! Engine against a local stand-in for the emulator console.

mod helpers;

use helpers::*;
use sensor_replay::prelude::*;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

/// Accept one client, greet it, and collect every line it sends until it
/// disconnects.
fn fake_console(listener: TcpListener) -> thread::JoinHandle<Vec<String>> {
    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut writer = stream.try_clone().unwrap();
        writer
            .write_all(b"Android Console: type 'help' for a list of commands\r\nOK\r\n")
            .unwrap();
        BufReader::new(stream)
            .lines()
            .map_while(|line| line.ok())
            .collect()
    })
}

fn config_for(listener: &TcpListener) -> ReplayConfig {
    let mut config = ReplayConfig::default();
    config.console.host = "127.0.0.1".into();
    config.console.port = listener.local_addr().unwrap().port();
    config.console.banner_timeout_ms = 250;
    config
}

#[test]
fn test_replay_file_into_console() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(
        dir.path(),
        "walk.csv",
        "timestamp,ax,ay,az",
        &accel_ramp_rows(&[0, 10, 20]),
    );
    let log = dir.path().join("out.csv");
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let engine = ReplayEngine::builder()
        .config(config_for(&listener))
        .build()
        .unwrap();
    let server = fake_console(listener);

    let summary = engine.replay_file(&csv, Some(log.as_path())).unwrap();

    assert_eq!(summary.emissions(), 3);
    assert_eq!(
        server.join().unwrap(),
        [
            "sensor set acceleration 0:0:9.8",
            "sensor set acceleration 10:0:9.8",
            "sensor set acceleration 20:0:9.8",
        ]
    );
    let rows = read_log(&log);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].1, [20.0, 0.0, 9.8]);
}

#[test]
fn test_mock_signal_into_console() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let mut config = config_for(&listener);
    config.playback.period_ms = Some(10.0);
    let engine = ReplayEngine::builder().config(config).build().unwrap();
    let server = fake_console(listener);
    let model = WaveModel::with_magnitude(Magnitude::Mock, 7)
        .unwrap()
        .with_duration_ns(50 * MS);

    let summary = engine
        .with_console(None, model.group(), |sink| engine.run_function(&model, sink))
        .unwrap();

    let received = server.join().unwrap();
    assert_eq!(received.len() as u64, summary.emissions());
    assert!(!received.is_empty());
    assert!(received
        .iter()
        .all(|line| line.starts_with("sensor set acceleration ")));
}

#[test]
fn test_unreachable_console_is_reported() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let config = config_for(&listener);
    drop(listener);
    let engine = ReplayEngine::builder().config(config).build().unwrap();

    let result = engine.with_console(None, ChannelGroup::Accelerometer, |_| Ok(()));
    assert!(matches!(
        result,
        Err(sensor_replay::Error::Sink(sensor_replay::sink::error::Error::Connect { .. }))
    ));
}
