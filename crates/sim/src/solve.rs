//! Shared root-finding kernel: exact quadratic roots and bounded
//! bracket-and-bisect search.
//!
//! Every solver here is explicit about failure: `None` means "no root in the
//! admissible range", never a swallowed exception. Callers decide whether a
//! missing root is a degenerate configuration or a geometry error.

/// Coefficient magnitude below which a quadratic degenerates to linear.
const DEGENERATE_COEFF: f64 = 1e-14;

/// Bisection iterations; enough to reach machine precision on any bracket
/// produced by the scan.
const BISECT_ITERS: usize = 80;

/// Smallest root of `a·t² + b·t + c = 0` strictly greater than `min_t`.
///
/// A vanishing leading coefficient falls back to the linear root `-c/b`;
/// if both `a` and `b` vanish the equation has no isolated root and the
/// result is `None` (degenerate motion, handled locally by the caller).
/// A negative discriminant also yields `None`.
pub fn smallest_root_after(a: f64, b: f64, c: f64, min_t: f64) -> Option<f64> {
    if a.abs() < DEGENERATE_COEFF {
        if b.abs() < DEGENERATE_COEFF {
            return None;
        }
        let t = -c / b;
        return (t.is_finite() && t > min_t).then_some(t);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sq = discriminant.sqrt();
    let t1 = (-b - sq) / (2.0 * a);
    let t2 = (-b + sq) / (2.0 * a);
    let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

    if lo > min_t && lo.is_finite() {
        Some(lo)
    } else if hi > min_t && hi.is_finite() {
        Some(hi)
    } else {
        None
    }
}

/// Scans `[lo, hi]` in `samples` equal steps and returns the first
/// subinterval over which `f` changes sign (or touches zero at the right
/// endpoint).
///
/// Returns `None` when `f` keeps one sign over the whole range within the
/// sampling resolution.
pub fn first_sign_change<F>(f: F, lo: f64, hi: f64, samples: usize) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if !(hi > lo) || samples == 0 {
        return None;
    }
    let step = (hi - lo) / samples as f64;
    let mut t_prev = lo;
    let mut f_prev = f(lo);
    for i in 1..=samples {
        let t = lo + step * i as f64;
        let ft = f(t);
        if f_prev * ft <= 0.0 && f_prev != ft {
            return Some((t_prev, t));
        }
        t_prev = t;
        f_prev = ft;
    }
    None
}

/// Bisects a sign-change bracket down to a root.
///
/// Assumes `f(lo)` and `f(hi)` have opposite signs (the contract
/// [`first_sign_change`] establishes); converges unconditionally.
pub fn bisect<F>(f: F, mut lo: f64, mut hi: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let f_lo = f(lo);
    for _ in 0..BISECT_ITERS {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if f_mid == 0.0 {
            return mid;
        }
        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    0.5 * (lo + hi)
}
