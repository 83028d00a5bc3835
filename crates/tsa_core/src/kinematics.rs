//! Kinematic transformations between motor space and load space.
//!
//! The string obeys the holonomic constraint `θ²r² + (L − x)² = L²`. Everything in
//! this module follows from it:
//!
//! - [`closed_form`]: pure functions over plain scalars, no side effects.
//! - [`KinematicState`]: a partially filled state that resolves the jacobian and its
//!   rate along whichever derivation path the known values allow.
//! - [`position`], [`velocity`], [`jacobian_rate`], [`acceleration`],
//!   [`constraints`]: the same transforms threaded through a [`crate::data::Data`]
//!   scratchpad, each documenting the fields it writes.

pub mod acceleration;
pub mod closed_form;
pub mod constraints;
pub mod jacobian_rate;
pub mod position;
pub mod state;
pub mod velocity;

pub use acceleration::{contraction_acceleration, motor_acceleration};
pub use constraints::{acceleration_constraint, position_constraint, velocity_constraint};
pub use jacobian_rate::djacobian;
pub use position::{contraction, motor_angle};
pub use state::KinematicState;
pub use velocity::{contraction_speed, jacobian, motor_speed};

use crate::error::{Result, TsaError};
use crate::traits::Scalar;
use tracing::debug;

/// Returns `value` unless it is within `tolerance` of zero.
pub(crate) fn non_singular<T: Scalar>(
    quantity: &'static str,
    value: T,
    tolerance: f64,
) -> Result<T> {
    if value.is_negligible(tolerance) || value.is_nan() {
        debug!(quantity, value = value.value(), "singular configuration");
        return Err(TsaError::SingularConfiguration {
            quantity,
            value: value.value(),
        });
    }
    Ok(value)
}

/// Square root of `radicand`, rejecting negative arguments as a domain violation of
/// `quantity` (reported with the caller's `input`).
pub(crate) fn domain_sqrt<T: Scalar>(quantity: &'static str, radicand: T, input: T) -> Result<T> {
    if radicand < T::zero() || radicand.is_nan() {
        debug!(quantity, value = input.value(), "argument outside domain");
        return Err(TsaError::Domain {
            quantity,
            value: input.value(),
        });
    }
    Ok(radicand.sqrt())
}
