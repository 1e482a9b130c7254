//! Mixed-radix complex Fourier transform
//!
//! Arbitrary-length transforms via recursive factorization: closed-form
//! radix-2/4 butterflies with a generic fallback for any other prime.

pub mod engine;
pub mod plan;

pub use plan::{PlanError, TransformPlan};
