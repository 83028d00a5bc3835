use super::closed_form;
use crate::data::Data;
use crate::error::Result;
use crate::model::Model;
use crate::traits::Scalar;

/// Contraction `x` for motor angle `theta` (or `data.motor.position` when `None`).
///
/// Writes `motor.position` and `load.position`.
pub fn contraction<T: Scalar>(model: &Model<T>, data: &mut Data<T>, theta: Option<T>) -> Result<T> {
    let theta = theta.unwrap_or(data.motor.position);
    let x = closed_form::contraction(model, theta)?;
    data.motor.position = theta;
    data.load.position = x;
    Ok(x)
}

/// Motor angle `θ` for contraction `x` (or `data.load.position` when `None`).
///
/// Writes `load.position` and `motor.position`.
pub fn motor_angle<T: Scalar>(model: &Model<T>, data: &mut Data<T>, x: Option<T>) -> Result<T> {
    let x = x.unwrap_or(data.load.position);
    let theta = closed_form::motor_angle(model, x)?;
    data.load.position = x;
    data.motor.position = theta;
    Ok(theta)
}
