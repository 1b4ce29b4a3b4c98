use crate::RoiError;

/// Floating point type used for every monetary and volume figure.
pub type Real = f64;

#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RoiError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RoiError::NonFinite { what, value: v })
    }
}

/// Percentage return of `net` over `cost`.
///
/// Returns `None` when the ratio is undefined (zero cost) or not finite,
/// so callers never see `NaN` or infinities.
pub fn percent_of(net: Real, cost: Real) -> Option<Real> {
    if cost == 0.0 {
        return None;
    }
    let pct = net / cost * 100.0;
    pct.is_finite().then_some(pct)
}
