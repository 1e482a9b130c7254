//! Transform plans: factorization, twiddle tables, and sizing
//!
//! A plan is built once for a fixed length and reused for every execution.

use num_complex::Complex32;
use std::f64::consts::PI;
use std::mem;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("transform length must be non-zero")]
    ZeroLength,

    #[error("plan storage budget too small: need {required} bytes, have {available}")]
    StorageExceeded { required: usize, available: usize },
}

/// Reusable mixed-radix transform plan
///
/// Holds the factorization of the transform length, the precomputed twiddle
/// table, and the scratch area used by the generic butterfly. Immutable after
/// construction apart from the scratch buffer; all execution-time state lives
/// in the caller's input/output slices.
#[derive(Debug)]
pub struct TransformPlan {
    pub(crate) len: usize,
    pub(crate) inverse: bool,

    /// Ordered (radix, remaining-length) pairs, consumed front-to-back
    pub(crate) factors: Vec<(usize, usize)>,

    /// N roots of unity, phase -2*pi*i/N (sign-flipped for inverse)
    pub(crate) twiddles: Vec<Complex32>,

    /// Sized to the largest radix so the generic butterfly never allocates
    pub(crate) scratch: Vec<Complex32>,
}

impl TransformPlan {
    /// Build a plan for a forward or inverse transform of length `len`
    ///
    /// # Arguments
    /// * `len` - Transform length; lengths with small prime factors execute
    ///   fastest (O(N log N)), a large prime factor degrades toward O(N^2)
    /// * `inverse` - Negates the twiddle phase; output stays unnormalized, so
    ///   true inversion requires the caller to scale by 1/N
    pub fn new(len: usize, inverse: bool) -> Result<Self, PlanError> {
        if len == 0 {
            return Err(PlanError::ZeroLength);
        }

        let mut factors = Vec::new();
        let mut largest = 1;
        for_each_factor(len, |radix, remaining| {
            factors.push((radix, remaining));
            largest = largest.max(radix);
        });

        let mut twiddles = Vec::with_capacity(len);
        for i in 0..len {
            let mut phase = -2.0 * PI * i as f64 / len as f64;
            if inverse {
                phase = -phase;
            }
            twiddles.push(Complex32::new(phase.cos() as f32, phase.sin() as f32));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("transform plan built: len={len}, stages={}", factors.len());

        Ok(Self {
            len,
            inverse,
            factors,
            twiddles,
            scratch: vec![Complex32::new(0.0, 0.0); largest],
        })
    }

    /// Build a plan against a caller-managed byte budget
    ///
    /// Callers that carve plans out of a preallocated arena query
    /// [`memory_requirement`](Self::memory_requirement) first and pass the
    /// space they can spare; construction fails without building anything if
    /// the budget cannot hold a plan of this length.
    pub fn new_in_budget(len: usize, inverse: bool, budget: usize) -> Result<Self, PlanError> {
        if len == 0 {
            return Err(PlanError::ZeroLength);
        }
        let required = Self::memory_requirement(len);
        if budget < required {
            return Err(PlanError::StorageExceeded {
                required,
                available: budget,
            });
        }
        Self::new(len, inverse)
    }

    /// Exact byte footprint of a plan of length `len`, without building it
    ///
    /// Deterministic for a given length; independent of direction.
    pub fn memory_requirement(len: usize) -> usize {
        let mut stages = 0;
        let mut largest = 1;
        for_each_factor(len, |radix, _| {
            stages += 1;
            largest = largest.max(radix);
        });

        mem::size_of::<Self>()
            + len * mem::size_of::<Complex32>()
            + stages * mem::size_of::<(usize, usize)>()
            + largest * mem::size_of::<Complex32>()
    }

    /// Transform length this plan was built for
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the twiddle phase was built sign-flipped
    pub fn is_inverse(&self) -> bool {
        self.inverse
    }
}

/// Greedy factorization: radix 4 first, then 2, then 3, then odd candidates,
/// with trial division stopping at floor(sqrt(remaining)); past that bound the
/// remainder itself is the final radix.
fn for_each_factor(len: usize, mut emit: impl FnMut(usize, usize)) {
    debug_assert!(len > 0);
    let mut n = len;
    let mut p = 4;
    loop {
        while n % p != 0 {
            p = match p {
                4 => 2,
                2 => 3,
                _ => p + 2,
            };
            if p > floor_sqrt(n) {
                p = n;
            }
        }
        n /= p;
        emit(p, n);
        if n <= 1 {
            break;
        }
    }
}

fn floor_sqrt(n: usize) -> usize {
    (n as f64).sqrt().floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors_of(len: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for_each_factor(len, |p, m| out.push((p, m)));
        out
    }

    #[test]
    fn test_factor_power_of_two_prefers_radix_4() {
        assert_eq!(factors_of(256), vec![(4, 64), (4, 16), (4, 4), (4, 1)]);
        assert_eq!(factors_of(8), vec![(4, 2), (2, 1)]);
    }

    #[test]
    fn test_factor_mixed_composite() {
        // 30 = 2 * 3 * 5, smallest radix first
        assert_eq!(factors_of(30), vec![(2, 15), (3, 5), (5, 1)]);
        // 12 = 4 * 3
        assert_eq!(factors_of(12), vec![(4, 3), (3, 1)]);
    }

    #[test]
    fn test_factor_prime_is_single_stage() {
        assert_eq!(factors_of(97), vec![(97, 1)]);
        assert_eq!(factors_of(2), vec![(2, 1)]);
    }

    #[test]
    fn test_factor_degenerate_length_one() {
        assert_eq!(factors_of(1), vec![(1, 1)]);
    }

    #[test]
    fn test_plan_rejects_zero_length() {
        assert_eq!(TransformPlan::new(0, false).unwrap_err(), PlanError::ZeroLength);
    }

    #[test]
    fn test_twiddle_phase_direction() {
        let fwd = TransformPlan::new(8, false).unwrap();
        let inv = TransformPlan::new(8, true).unwrap();

        // Conjugate pairs: same real part, opposite imaginary part
        for (f, i) in fwd.twiddles.iter().zip(inv.twiddles.iter()) {
            assert!((f.re - i.re).abs() < 1e-7);
            assert!((f.im + i.im).abs() < 1e-7);
        }

        // First twiddle is always 1 + 0i
        assert!((fwd.twiddles[0].re - 1.0).abs() < 1e-7);
        assert!(fwd.twiddles[0].im.abs() < 1e-7);
    }

    #[test]
    fn test_scratch_sized_to_largest_radix() {
        assert_eq!(TransformPlan::new(30, false).unwrap().scratch.len(), 5);
        assert_eq!(TransformPlan::new(97, false).unwrap().scratch.len(), 97);
        assert_eq!(TransformPlan::new(256, false).unwrap().scratch.len(), 4);
    }

    #[test]
    fn test_memory_requirement_is_exact_and_direction_free() {
        for len in [1, 2, 8, 30, 97, 256] {
            let required = TransformPlan::memory_requirement(len);
            assert!(required > len * mem::size_of::<Complex32>());
            assert_eq!(required, TransformPlan::memory_requirement(len));
        }
    }

    #[test]
    fn test_budgeted_build_checks_requirement() {
        let required = TransformPlan::memory_requirement(64);

        let plan = TransformPlan::new_in_budget(64, false, required).unwrap();
        assert_eq!(plan.len(), 64);

        let err = TransformPlan::new_in_budget(64, false, required - 1).unwrap_err();
        assert_eq!(
            err,
            PlanError::StorageExceeded {
                required,
                available: required - 1,
            }
        );
    }
}
