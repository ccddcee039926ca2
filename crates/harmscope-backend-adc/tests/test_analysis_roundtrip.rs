//! Single-component synthesis and recovery.

use std::collections::BTreeMap;

use harmscope_backend_adc::composite::combine;
use harmscope_backend_adc::noise::SilentNoise;
use harmscope_backend_adc::spectral::transform;
use harmscope_backend_adc::{HarmonicGenerator, PeakExtractor};
use harmscope_spec::SamplingConfig;

#[test]
fn test_pure_harmonic_recovers_one_peak() {
    let config = SamplingConfig::default();
    let generator = HarmonicGenerator::new(&config);
    let extractor = PeakExtractor::from_config(&config);
    let window = config.window_length;

    for (order, amplitude) in [(1, 315.0), (2, 100.0), (3, 42.0), (5, 12.5), (13, 3.0), (39, 1.0)] {
        let sequence = generator.generate(amplitude, order, window, &mut SilentNoise);
        let waveform = combine(&[sequence], window);
        let coefficients = transform(&waveform).unwrap();
        let peaks = extractor.extract(&coefficients, window);

        let expected_hz = f64::from(order * config.fundamental_hz);
        assert_eq!(peaks.frequencies(), vec![expected_hz], "order {}", order);

        let magnitude = peaks.magnitude_at(expected_hz).unwrap();
        assert!(
            (magnitude - amplitude).abs() < 1e-3,
            "order {}: expected {} V, got {} V",
            order,
            amplitude,
            magnitude
        );
    }
}

#[test]
fn test_components_superpose_independently() {
    let config = SamplingConfig {
        harmonics: BTreeMap::from([(3, 20)]),
        ..SamplingConfig::default()
    };
    let generator = HarmonicGenerator::new(&config);
    let extractor = PeakExtractor::from_config(&config);
    let window = config.window_length;

    let sequences: Vec<_> = config
        .components()
        .iter()
        .map(|c| generator.generate(c.amplitude_v, c.order, window, &mut SilentNoise))
        .collect();
    let reversed: Vec<_> = sequences.iter().rev().cloned().collect();

    let forward = extractor.extract(&transform(&combine(&sequences, window)).unwrap(), window);
    let backward = extractor.extract(&transform(&combine(&reversed, window)).unwrap(), window);

    assert_eq!(forward.frequencies(), vec![50.0, 150.0]);
    assert_eq!(forward.frequencies(), backward.frequencies());
    for (a, b) in forward.iter().zip(backward.iter()) {
        assert!((a.magnitude_v - b.magnitude_v).abs() < 1e-6);
    }
    assert!((forward.magnitude_at(150.0).unwrap() - 63.0).abs() < 1e-3);
}

#[test]
fn test_non_default_grid() {
    // 60 Hz mains at 7680 samples/s: 128 samples per cycle, 4 cycles per window.
    let config = SamplingConfig {
        sampling_rate_hz: 7680,
        fundamental_hz: 60,
        window_length: 512,
        fundamental_amplitude_v: 170.0,
        harmonics: BTreeMap::from([(3, 30), (7, 10)]),
        ..SamplingConfig::default()
    };
    let window = config.window_length;
    let generator = HarmonicGenerator::new(&config);
    let extractor = PeakExtractor::from_config(&config);

    let sequences: Vec<_> = config
        .components()
        .iter()
        .map(|c| generator.generate(c.amplitude_v, c.order, window, &mut SilentNoise))
        .collect();
    let coefficients = transform(&combine(&sequences, window)).unwrap();
    let peaks = extractor.extract(&coefficients, window);

    assert_eq!(peaks.frequencies(), vec![60.0, 180.0, 420.0]);
    assert!((peaks.magnitude_at(180.0).unwrap() - 51.0).abs() < 1e-3);
    assert!((peaks.magnitude_at(420.0).unwrap() - 17.0).abs() < 1e-3);
}
