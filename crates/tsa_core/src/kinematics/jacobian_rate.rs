use super::KinematicState;
use crate::data::Data;
use crate::error::Result;
use crate::model::Model;
use crate::traits::Scalar;
use tracing::trace;

/// Time derivative of the jacobian,
/// `J̇ = r²θ̇ / (L − x) + θr²ẋ / (L − x)²`.
///
/// With all four arguments the closed form is used directly; a full motor pair
/// `(θ, θ̇)` or load pair `(x, ẋ)` derives the other side first. With no arguments
/// the full state is read from `data`. Any other combination is insufficient.
///
/// Writes nothing.
pub fn djacobian<T: Scalar>(
    model: &Model<T>,
    data: &Data<T>,
    theta: Option<T>,
    dtheta: Option<T>,
    x: Option<T>,
    dx: Option<T>,
) -> Result<T> {
    let state = KinematicState {
        theta,
        dtheta,
        x,
        dx,
    };
    if state.is_empty() {
        trace!("jacobian rate from stored state");
        return KinematicState::from_data(data).resolve_djacobian(model);
    }
    state.resolve_djacobian(model)
}
