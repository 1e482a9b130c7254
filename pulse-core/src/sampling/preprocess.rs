//! Signal conditioning before spectral analysis
//!
//! DC removal and Hamming-window shaping, applied in place to a snapshot of
//! the live window. The slice length is always the live sample count, never
//! the transform capacity.

use std::f32::consts::PI;

/// Subtract the arithmetic mean from every element
pub fn remove_dc(samples: &mut [f32]) {
    if samples.is_empty() {
        return;
    }
    let mean = samples.iter().sum::<f32>() / samples.len() as f32;
    for sample in samples.iter_mut() {
        *sample -= mean;
    }
}

/// Scale element i by the Hamming coefficient 0.54 - 0.46*cos(2*pi*i/(M-1))
///
/// Slices shorter than two samples are left untouched; the M-1 denominator
/// is undefined there.
pub fn apply_hamming(samples: &mut [f32]) {
    let m = samples.len();
    if m < 2 {
        return;
    }
    for (i, sample) in samples.iter_mut().enumerate() {
        let multiplier = 0.54 - 0.46 * (2.0 * PI * i as f32 / (m - 1) as f32).cos();
        *sample *= multiplier;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_dc_zeroes_mean() {
        let mut samples = vec![128.5, 130.0, 127.0, 129.5, 131.0];
        remove_dc(&mut samples);

        let mean: f32 = samples.iter().sum::<f32>() / samples.len() as f32;
        assert!(mean.abs() < 1e-5);

        // Shape preserved: differences between elements unchanged
        assert!((samples[1] - samples[0] - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_remove_dc_empty_is_noop() {
        let mut samples: Vec<f32> = vec![];
        remove_dc(&mut samples);
        assert!(samples.is_empty());
    }

    #[test]
    fn test_hamming_endpoints_and_center() {
        let mut samples = vec![1.0f32; 101];
        apply_hamming(&mut samples);

        // Hamming endpoints sit at 0.08, center of an odd-length window at 1.0
        assert!((samples[0] - 0.08).abs() < 1e-4);
        assert!((samples[100] - 0.08).abs() < 1e-4);
        assert!((samples[50] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_hamming_uses_live_length() {
        // Same coefficient profile regardless of any larger transform capacity:
        // the denominator is the slice length, nothing else
        let mut short = vec![1.0f32; 11];
        apply_hamming(&mut short);
        assert!((short[5] - 1.0).abs() < 1e-5);

        let mut single = vec![3.0f32];
        apply_hamming(&mut single);
        assert_eq!(single[0], 3.0);
    }
}
