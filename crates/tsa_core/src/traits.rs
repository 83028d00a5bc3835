use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in the actuator model.
/// Must support basic arithmetic, comparisons, debug printing, and conversion from f64.
///
/// Implemented for `f64` and for [`crate::autodiff::Dual`], so every kinematic and
/// dynamic quantity can be evaluated either numerically or with a tangent attached.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {
    /// Builds a scalar from an `f64` literal.
    fn constant(value: f64) -> Self {
        Self::from_f64(value).unwrap_or_else(Self::nan)
    }

    /// True when the magnitude does not exceed `tolerance`.
    fn is_negligible(self, tolerance: f64) -> bool {
        self.abs() <= Self::constant(tolerance)
    }

    /// Lossy view of the value part, used for error reporting and logging.
    fn value(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}
