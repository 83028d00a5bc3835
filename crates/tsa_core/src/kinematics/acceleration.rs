use super::closed_form;
use crate::data::Data;
use crate::error::Result;
use crate::model::Model;
use crate::traits::Scalar;

/// Motor acceleration `θ̈ = (ẍ − J̇·θ̇) / J` for a load-side motion `(x, ẋ, ẍ)`.
///
/// Fails with `SingularConfiguration` when the jacobian vanishes (untwisted string).
/// Writes the full motor and load position, velocity and acceleration, plus
/// `motor.jacobian`.
pub fn motor_acceleration<T: Scalar>(
    model: &Model<T>,
    data: &mut Data<T>,
    xs: (T, T, T),
) -> Result<T> {
    let (x, dx, ddx) = xs;
    let (theta, dtheta, ddtheta) = closed_form::motor_motion(model, x, dx, ddx)?;
    let j = closed_form::jacobian_mixed(model, theta, x)?;

    data.load.position = x;
    data.load.velocity = dx;
    data.load.acceleration = ddx;
    data.motor.position = theta;
    data.motor.velocity = dtheta;
    data.motor.acceleration = ddtheta;
    data.motor.jacobian = j;
    Ok(ddtheta)
}

/// Load acceleration `ẍ = J·θ̈ + J̇·θ̇` for a motor-side motion `(θ, θ̇, θ̈)`.
///
/// Writes the full motor and load position, velocity and acceleration, plus
/// `motor.jacobian`.
pub fn contraction_acceleration<T: Scalar>(
    model: &Model<T>,
    data: &mut Data<T>,
    thetas: (T, T, T),
) -> Result<T> {
    let (theta, dtheta, ddtheta) = thetas;
    let (x, dx, ddx) = closed_form::load_motion(model, theta, dtheta, ddtheta)?;
    let j = closed_form::jacobian_motor(model, theta)?;

    data.motor.position = theta;
    data.motor.velocity = dtheta;
    data.motor.acceleration = ddtheta;
    data.load.position = x;
    data.load.velocity = dx;
    data.load.acceleration = ddx;
    data.motor.jacobian = j;
    Ok(ddx)
}
