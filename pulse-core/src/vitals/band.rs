//! Physiological frequency bands and estimator tuning

/// Inclusive frequency band in Hz
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    pub min_hz: f32,
    pub max_hz: f32,
}

impl FrequencyBand {
    pub const fn new(min_hz: f32, max_hz: f32) -> Self {
        Self { min_hz, max_hz }
    }

    /// Adult heart rate: 0.75-3.33 Hz (45-200 BPM)
    ///
    /// Some deployments raise the upper bound to 4.0 Hz (240 BPM); capping at
    /// 200 keeps high-frequency sensor noise out of the search by default.
    pub const fn heart_rate() -> Self {
        Self::new(0.75, 3.33)
    }

    /// Resting respiration: 0.10-0.50 Hz (6-30 breaths/min)
    pub const fn respiration() -> Self {
        Self::new(0.10, 0.50)
    }

    pub fn contains(&self, hz: f32) -> bool {
        hz >= self.min_hz && hz <= self.max_hz
    }

    /// Band of `center_hz +/- half_width_hz`, clamped to stay inside `self`
    pub fn narrowed(&self, center_hz: f32, half_width_hz: f32) -> Self {
        Self {
            min_hz: (center_hz - half_width_hz).max(self.min_hz),
            max_hz: (center_hz + half_width_hz).min(self.max_hz),
        }
    }
}

/// Tuning for one spectral rate estimate
///
/// Historical variants of this pipeline disagree on the band upper bound and
/// on whether the noise-floor gate exists at all, so both are explicit here
/// rather than baked in.
#[derive(Debug, Clone, Copy)]
pub struct EstimatorConfig {
    /// Default search band; also the range the noise floor is averaged over
    pub band: FrequencyBand,

    /// Peak must reach `gate_ratio` times the band-average magnitude to be
    /// accepted; zero or negative disables the gate
    pub gate_ratio: f32,

    /// Half-width, in BPM, of the narrowed search window around a previous
    /// estimate
    pub narrow_bpm: f32,

    /// Weight of the previous estimate in the temporal smoothing update
    pub smoothing: f32,
}

impl EstimatorConfig {
    pub fn heart_rate() -> Self {
        Self {
            band: FrequencyBand::heart_rate(),
            gate_ratio: 2.0,
            narrow_bpm: 15.0,
            smoothing: 0.7,
        }
    }

    pub fn respiration() -> Self {
        Self {
            band: FrequencyBand::respiration(),
            ..Self::heart_rate()
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::heart_rate()
    }
}
