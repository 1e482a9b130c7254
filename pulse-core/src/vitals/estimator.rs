//! Spectral peak rate estimation
//!
//! Orchestrates the full pipeline: window snapshot -> DC removal -> Hamming
//! shaping -> zero-padded transform -> adaptive band search -> noise-floor
//! gate -> temporal smoothing. One monitor instance owns its transform plan,
//! its sample window, and the per-band hysteresis state; nothing is shared
//! across instances. Single-threaded by design: concurrent calls on one
//! instance are not supported, and every buffer is allocated at construction.

use num_complex::Complex32;
use thiserror::Error;

use super::band::EstimatorConfig;
use crate::sampling::{apply_hamming, remove_dc, SampleWindow};
use crate::transform::{PlanError, TransformPlan};

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("window capacity must be non-zero")]
    ZeroCapacity,

    #[error("sampling rate must be positive and finite, got {0}")]
    InvalidSamplingRate(f32),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Hysteresis state for one rate channel
///
/// Unlocked until the first accepted estimate; once locked, the previous
/// value narrows the next search band and damps the reported rate.
#[derive(Debug, Clone, Default)]
struct RateTracker {
    previous_bpm: Option<f32>,
}

impl RateTracker {
    /// Last reported value, or the no-estimate sentinel
    fn last(&self) -> f32 {
        self.previous_bpm.unwrap_or(0.0)
    }

    fn accept(&mut self, raw_bpm: f32, smoothing: f32) -> f32 {
        let updated = match self.previous_bpm {
            Some(previous) => previous * smoothing + raw_bpm * (1.0 - smoothing),
            None => raw_bpm,
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(raw_bpm, updated, "rate accepted");

        self.previous_bpm = Some(updated);
        updated
    }

    fn clear(&mut self) {
        self.previous_bpm = None;
    }
}

enum Scan {
    /// Fewer than three seconds of samples buffered
    TooFewSamples,
    /// Peak failed the noise-floor gate
    Gated,
    /// No bin fell inside the search band
    NoPeak,
    /// Accepted raw rate in BPM, before smoothing
    Peak(f32),
}

/// Real-time vital-sign monitor over a stream of scalar intensity samples
///
/// Feed one intensity per video frame with [`add_sample`](Self::add_sample),
/// then poll [`heart_rate`](Self::heart_rate) or
/// [`respiration_rate`](Self::respiration_rate); both return 0.0 until enough
/// signal has accumulated. Estimation is stateful: each successful call folds
/// its result into the per-channel previous estimate, so repeated calls on
/// identical input are not idempotent.
///
/// Dropping the monitor releases the plan and every buffer; single ownership
/// makes use-after-teardown unrepresentable.
pub struct VitalsMonitor {
    sampling_rate: f32,
    config_heart: EstimatorConfig,
    config_respiration: EstimatorConfig,

    window: SampleWindow,
    plan: TransformPlan,

    heart: RateTracker,
    respiration: RateTracker,

    // Reused every call; estimation never allocates
    stage: Vec<f32>,
    transform_in: Vec<Complex32>,
    transform_out: Vec<Complex32>,
}

impl VitalsMonitor {
    /// Create a monitor with the default heart-rate and respiration bands
    ///
    /// # Arguments
    /// * `capacity` - Window and transform length; any positive value works,
    ///   but lengths with small prime factors transform fastest
    /// * `sampling_rate_hz` - Sample (frame) rate of the intensity stream
    pub fn new(capacity: usize, sampling_rate_hz: f32) -> Result<Self, MonitorError> {
        Self::with_configs(
            capacity,
            sampling_rate_hz,
            EstimatorConfig::heart_rate(),
            EstimatorConfig::respiration(),
        )
    }

    /// Create a monitor with explicit per-channel tuning
    pub fn with_configs(
        capacity: usize,
        sampling_rate_hz: f32,
        heart: EstimatorConfig,
        respiration: EstimatorConfig,
    ) -> Result<Self, MonitorError> {
        if capacity == 0 {
            return Err(MonitorError::ZeroCapacity);
        }
        if !(sampling_rate_hz.is_finite() && sampling_rate_hz > 0.0) {
            return Err(MonitorError::InvalidSamplingRate(sampling_rate_hz));
        }

        Ok(Self {
            sampling_rate: sampling_rate_hz,
            config_heart: heart,
            config_respiration: respiration,
            window: SampleWindow::new(capacity),
            plan: TransformPlan::new(capacity, false)?,
            heart: RateTracker::default(),
            respiration: RateTracker::default(),
            stage: vec![0.0; capacity],
            transform_in: vec![Complex32::new(0.0, 0.0); capacity],
            transform_out: vec![Complex32::new(0.0, 0.0); capacity],
        })
    }

    /// Append one intensity sample with its capture timestamp
    pub fn add_sample(&mut self, intensity: f32, timestamp: i64) {
        self.window.push(intensity, timestamp);
    }

    /// Current smoothed heart rate in BPM; 0.0 means no estimate yet
    pub fn heart_rate(&mut self) -> f32 {
        let config = self.config_heart;
        let previous = self.heart.previous_bpm;
        match self.scan(&config, previous) {
            Scan::TooFewSamples => 0.0,
            Scan::Gated | Scan::NoPeak => self.heart.last(),
            Scan::Peak(raw_bpm) => self.heart.accept(raw_bpm, config.smoothing),
        }
    }

    /// Current smoothed respiration rate in breaths/min; 0.0 means no estimate
    ///
    /// Same pipeline as [`heart_rate`](Self::heart_rate) under the
    /// respiration band, with its own independent hysteresis state.
    pub fn respiration_rate(&mut self) -> f32 {
        let config = self.config_respiration;
        let previous = self.respiration.previous_bpm;
        match self.scan(&config, previous) {
            Scan::TooFewSamples => 0.0,
            Scan::Gated | Scan::NoPeak => self.respiration.last(),
            Scan::Peak(raw_bpm) => self.respiration.accept(raw_bpm, config.smoothing),
        }
    }

    /// Ordered snapshot of the buffered intensities, oldest first
    pub fn buffer(&self) -> Vec<f32> {
        self.window.snapshot()
    }

    pub fn sample_count(&self) -> usize {
        self.window.len()
    }

    /// Drop all buffered samples and both previous estimates
    pub fn reset(&mut self) {
        self.window.clear();
        self.heart.clear();
        self.respiration.clear();
    }

    pub fn sampling_rate(&self) -> f32 {
        self.sampling_rate
    }

    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    fn scan(&mut self, config: &EstimatorConfig, previous: Option<f32>) -> Scan {
        let live = self.window.len();
        if (live as f32) < self.sampling_rate * 3.0 {
            return Scan::TooFewSamples;
        }

        // Condition a snapshot; the live window itself is never mutated
        let copied = self.window.copy_intensities_into(&mut self.stage);
        let snapshot = &mut self.stage[..copied];
        remove_dc(snapshot);
        apply_hamming(snapshot);

        // Zero-pad up to the transform capacity
        for (i, slot) in self.transform_in.iter_mut().enumerate() {
            *slot = if i < copied {
                Complex32::new(snapshot[i], 0.0)
            } else {
                Complex32::new(0.0, 0.0)
            };
        }

        self.plan.process(&self.transform_in, &mut self.transform_out);

        // A previous estimate narrows the search around itself, clamped to
        // the configured band
        let search = match previous {
            Some(bpm) => config
                .band
                .narrowed(bpm / 60.0, config.narrow_bpm / 60.0),
            None => config.band,
        };

        let n = self.plan.len();
        let mut peak_magnitude = 0.0f32;
        let mut peak_bin = None;
        let mut floor_sum = 0.0f32;
        let mut floor_bins = 0u32;

        // DC and the mirror half are excluded from the scan
        for bin in 1..n / 2 {
            let freq = bin as f32 * self.sampling_rate / n as f32;
            let magnitude = self.transform_out[bin].norm();

            // Noise floor is averaged over the full default band even while
            // the peak search runs over a narrowed one
            if config.band.contains(freq) {
                floor_sum += magnitude;
                floor_bins += 1;
            }

            if search.contains(freq) && magnitude > peak_magnitude {
                peak_magnitude = magnitude;
                peak_bin = Some(bin);
            }
        }

        if config.gate_ratio > 0.0 && floor_bins > 0 {
            let floor_avg = floor_sum / floor_bins as f32;
            if peak_magnitude < floor_avg * config.gate_ratio {
                #[cfg(feature = "tracing")]
                tracing::trace!(peak_magnitude, floor_avg, "peak below noise floor, rejected");
                return Scan::Gated;
            }
        }

        match peak_bin {
            Some(bin) => Scan::Peak(bin as f32 * self.sampling_rate / n as f32 * 60.0),
            None => Scan::NoPeak,
        }
    }
}
