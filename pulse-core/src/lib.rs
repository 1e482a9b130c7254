//! Pulse Monitor Core - real-time vital-sign estimation
//!
//! Estimates heart rate (and respiration rate) from a stream of scalar
//! intensity samples, e.g. the mean green-channel brightness of successive
//! camera frames. A mixed-radix Fourier transform engine feeds a stateful
//! spectral peak estimator with adaptive band narrowing, a noise-floor
//! validity gate, and temporal smoothing.

pub mod sampling;
pub mod transform;
pub mod vitals;

pub use sampling::SampleWindow;
pub use transform::{PlanError, TransformPlan};
pub use vitals::{EstimatorConfig, FrequencyBand, MonitorError, VitalsMonitor};
