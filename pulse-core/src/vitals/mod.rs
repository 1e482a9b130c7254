//! Vital-sign estimation from the intensity stream

pub mod band;
pub mod estimator;

pub use band::{EstimatorConfig, FrequencyBand};
pub use estimator::{MonitorError, VitalsMonitor};
