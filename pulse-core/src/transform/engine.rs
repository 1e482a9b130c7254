//! Mixed-radix transform execution
//!
//! Recursive decimation-in-time over the plan's ordered factor list. Each
//! stage splits the output range into `radix` interleaved sub-transforms,
//! recurses, then recombines with a butterfly picked by radix. Nothing here
//! allocates; the generic butterfly borrows the plan's scratch buffer.

use num_complex::Complex32;

use super::plan::TransformPlan;

impl TransformPlan {
    /// Execute the transform
    ///
    /// Both slices must match the plan length exactly; a mismatch is a
    /// programmer error, not a runtime condition. Output is unnormalized in
    /// both directions.
    pub fn process(&mut self, input: &[Complex32], output: &mut [Complex32]) {
        assert_eq!(input.len(), self.len, "input length must match plan length");
        assert_eq!(output.len(), self.len, "output length must match plan length");

        let TransformPlan {
            len,
            inverse,
            ref factors,
            ref twiddles,
            ref mut scratch,
            ..
        } = *self;

        recurse(output, input, 0, 1, factors, twiddles, scratch, len, inverse);
    }
}

#[allow(clippy::too_many_arguments)]
fn recurse(
    out: &mut [Complex32],
    input: &[Complex32],
    in_off: usize,
    fstride: usize,
    factors: &[(usize, usize)],
    twiddles: &[Complex32],
    scratch: &mut [Complex32],
    n: usize,
    inverse: bool,
) {
    let (p, m) = factors[0];

    if m == 1 {
        // Base case: stride-copy p input samples into place
        for (q, slot) in out.iter_mut().enumerate() {
            *slot = input[in_off + q * fstride];
        }
    } else {
        // p interleaved sub-transforms of length m
        for q in 0..p {
            recurse(
                &mut out[q * m..(q + 1) * m],
                input,
                in_off + q * fstride,
                fstride * p,
                &factors[1..],
                twiddles,
                scratch,
                n,
                inverse,
            );
        }
    }

    match p {
        2 => butterfly2(out, fstride, twiddles, m),
        4 => butterfly4(out, fstride, twiddles, m, inverse),
        _ => butterfly_generic(out, fstride, twiddles, m, p, n, scratch),
    }
}

/// 2-point butterfly: one twiddle multiply per pair
fn butterfly2(out: &mut [Complex32], fstride: usize, twiddles: &[Complex32], m: usize) {
    let (lo, hi) = out.split_at_mut(m);
    for k in 0..m {
        let t = hi[k] * twiddles[k * fstride];
        hi[k] = lo[k] - t;
        lo[k] += t;
    }
}

/// 4-point butterfly: three twiddle multiplies per group
///
/// The cross-term signs follow the transform direction; the conjugated
/// twiddle table alone cannot express the +/-i rotation internal to the
/// 4-point kernel.
fn butterfly4(out: &mut [Complex32], fstride: usize, twiddles: &[Complex32], m: usize, inverse: bool) {
    let m2 = 2 * m;
    let m3 = 3 * m;
    for k in 0..m {
        let s0 = out[k + m] * twiddles[k * fstride];
        let s1 = out[k + m2] * twiddles[2 * k * fstride];
        let s2 = out[k + m3] * twiddles[3 * k * fstride];

        let sum02 = s0 + s2;
        let diff02 = s0 - s2;
        let low = out[k] - s1;
        let high = out[k] + s1;

        out[k] = high + sum02;
        out[k + m2] = high - sum02;

        if inverse {
            out[k + m] = Complex32::new(low.re - diff02.im, low.im + diff02.re);
            out[k + m3] = Complex32::new(low.re + diff02.im, low.im - diff02.re);
        } else {
            out[k + m] = Complex32::new(low.re + diff02.im, low.im - diff02.re);
            out[k + m3] = Complex32::new(low.re - diff02.im, low.im + diff02.re);
        }
    }
}

/// Generic butterfly for any radix: O(p^2) per group
///
/// Twiddle lookups walk the table by `fstride * k` per term; the accumulated
/// index stays below 2N (fstride * p * m == N at every stage), so a single
/// conditional subtraction performs the modulo-N wrap.
fn butterfly_generic(
    out: &mut [Complex32],
    fstride: usize,
    twiddles: &[Complex32],
    m: usize,
    p: usize,
    n: usize,
    scratch: &mut [Complex32],
) {
    let scratch = &mut scratch[..p];
    for u in 0..m {
        for (q, slot) in scratch.iter_mut().enumerate() {
            *slot = out[u + q * m];
        }

        for q1 in 0..p {
            let k = u + q1 * m;
            let mut acc = scratch[0];
            let mut twidx = 0;
            for &s in &scratch[1..] {
                twidx += fstride * k;
                if twidx >= n {
                    twidx -= n;
                }
                acc += s * twiddles[twidx];
            }
            out[k] = acc;
        }
    }
}
