//! Continuous signals: generated models, whole-file models and offline resampling.

mod helpers;

use approx::assert_abs_diff_eq;
use helpers::tolerances::{SPLINE_EPSILON, TEXT_EPSILON};
use helpers::*;
use sensor_replay::core::MemorySink;
use sensor_replay::prelude::*;
use sensor_replay::source::{Wave, DEFAULT_SEED};
use sensor_replay::{resample, SampledSource};

#[test]
fn test_wave_model_playback_at_fixed_period() {
    let mut config = interpolated_config(10.0);
    config.playback.repetitions = 2;
    let (engine, _clock) = test_engine(config);
    let model = WaveModel::with_magnitude(Magnitude::Normal, DEFAULT_SEED)
        .unwrap()
        .with_duration_ns(100 * MS);
    let mut sink = MemorySink::new();

    let summary = engine.run_function(&model, &mut sink).unwrap();

    assert_eq!(summary.passes.len(), 2);
    assert_eq!(summary.emissions(), 22);
    for (k, emission) in sink.emissions()[..11].iter().enumerate() {
        let offset_ns = k as i64 * 10 * MS;
        assert_eq!(emission.offset_ns, offset_ns);
        assert_eq!(emission.value, model.value_at(offset_ns).unwrap());
    }
    assert_eq!(sink.emissions()[11].offset_ns, 0);
}

#[test]
fn test_sampled_model_drives_interpolated_mode() {
    let model = WaveModel::from_waves(vec![Wave {
        amplitude: [1.0, 0.5, 0.25],
        frequency_hz: 0.5,
        phase: [0.0, 1.0, 2.0],
    }])
    .with_duration_ns(200 * MS);
    let mut source = SampledSource::at_rate(model.clone(), 100.0).unwrap();
    let (engine, _clock) = test_engine(interpolated_config(5.0));
    let mut sink = MemorySink::new();

    let summary = engine.run(&mut source, &mut sink).unwrap();

    // Anchored on the sample at 10 ms, served up to the one at 200 ms.
    assert_eq!(summary.emissions(), 39);
    for emission in sink.emissions() {
        let expected = model.value_at(emission.offset_ns + 10 * MS).unwrap();
        for axis in 0..3 {
            assert_abs_diff_eq!(emission.value[axis], expected[axis], epsilon = SPLINE_EPSILON);
        }
    }
}

#[test]
fn test_resample_recording_offline() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "walk.csv",
        "timestamp,ax,ay,az",
        &accel_ramp_rows(&times(100, 1000)),
    );
    let out = dir.path().join("resampled.csv");

    let model = FileModel::load(&path, InterpolantKind::NaturalCubic).unwrap();
    assert_eq!(model.duration_ns(), 1000 * MS);
    let mut log = LogWriter::create(&out).unwrap();
    let rows = resample(&model, 20.0, &mut log).unwrap();
    drop(log);

    assert_eq!(rows, 20);
    let written = read_log(&out);
    assert_eq!(written.len(), 20);
    for (k, (timestamp, value, nano)) in written.into_iter().enumerate() {
        let offset_ms = k as i64 * 50;
        assert_eq!(timestamp, offset_ms);
        assert_eq!(nano, offset_ms * MS);
        assert_abs_diff_eq!(value[0], offset_ms as f64, epsilon = TEXT_EPSILON);
        assert_abs_diff_eq!(value[2], 9.8, epsilon = TEXT_EPSILON);
    }
}

#[test]
fn test_file_model_playback_rebases_time() {
    let dir = tempfile::tempdir().unwrap();
    let rows = accel_ramp_rows(&[5000, 5100, 5200, 5300]);
    let path = write_csv(dir.path(), "late.csv", "timestamp,ax,ay,az", &rows);
    let mut config = interpolated_config(50.0);
    config.playback.kind = InterpolantKind::Pchip;
    let (engine, _clock) = test_engine(config);
    let model = FileModel::load(&path, InterpolantKind::Pchip).unwrap();
    let mut sink = MemorySink::new();

    engine.run_function(&model, &mut sink).unwrap();

    let values: Vec<f64> = sink.emissions().iter().map(|e| e.value[0]).collect();
    assert_eq!(values.len(), 7);
    for (k, value) in values.into_iter().enumerate() {
        assert_abs_diff_eq!(value, 5000.0 + 50.0 * k as f64, epsilon = TEXT_EPSILON);
    }
}
