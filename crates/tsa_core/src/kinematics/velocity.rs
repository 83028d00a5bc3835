use super::{closed_form, non_singular, KinematicState};
use crate::data::Data;
use crate::error::Result;
use crate::model::Model;
use crate::traits::Scalar;

/// Jacobian `J = dx/dθ`.
///
/// Resolution: both `theta` and `x` use the mixed form, `theta` alone the motor
/// form, `x` alone goes through the motor angle; with neither, both positions are
/// read from `data`. Writes `motor.jacobian`.
pub fn jacobian<T: Scalar>(
    model: &Model<T>,
    data: &mut Data<T>,
    theta: Option<T>,
    x: Option<T>,
) -> Result<T> {
    let state = KinematicState {
        theta,
        x,
        ..KinematicState::default()
    };
    let state = if state.is_empty() {
        state
            .with_theta(data.motor.position)
            .with_x(data.load.position)
    } else {
        state
    };
    let j = state.resolve_jacobian(model)?;
    data.motor.jacobian = j;
    Ok(j)
}

/// Contraction speed `ẋ = J(x)·θ̇`; missing arguments come from `load.position`
/// and `motor.velocity`.
///
/// Writes `load.position`, `motor.position`, `motor.velocity`, `load.velocity`.
pub fn contraction_speed<T: Scalar>(
    model: &Model<T>,
    data: &mut Data<T>,
    x: Option<T>,
    dtheta: Option<T>,
) -> Result<T> {
    let x = x.unwrap_or(data.load.position);
    let dtheta = dtheta.unwrap_or(data.motor.velocity);
    let theta = closed_form::motor_angle(model, x)?;
    let dx = closed_form::jacobian_motor(model, theta)? * dtheta;

    data.load.position = x;
    data.motor.position = theta;
    data.motor.velocity = dtheta;
    data.load.velocity = dx;
    Ok(dx)
}

/// Motor speed `θ̇ = ẋ / J(θ)`; missing arguments come from `motor.position`
/// and `load.velocity`.
///
/// Writes `motor.position`, `load.position`, `load.velocity`, `motor.velocity`.
pub fn motor_speed<T: Scalar>(
    model: &Model<T>,
    data: &mut Data<T>,
    theta: Option<T>,
    dx: Option<T>,
) -> Result<T> {
    let theta = theta.unwrap_or(data.motor.position);
    let dx = dx.unwrap_or(data.load.velocity);
    let x = closed_form::contraction(model, theta)?;
    let j = non_singular(
        "jacobian",
        closed_form::jacobian_motor(model, theta)?,
        model.tolerances.singularity,
    )?;
    let dtheta = dx / j;

    data.motor.position = theta;
    data.load.position = x;
    data.load.velocity = dx;
    data.motor.velocity = dtheta;
    Ok(dtheta)
}

#[cfg(test)]
mod tests {
    use super::{contraction_speed, jacobian, motor_speed};
    use crate::data::Data;
    use crate::error::TsaError;
    use crate::kinematics::position::contraction;
    use crate::model::Model;
    use approx::assert_relative_eq;

    const J_REF: f64 = 5.773_502_691_896_258e-4;

    #[test]
    fn jacobian_resolves_every_argument_combination() {
        let model = Model::default();
        let mut data = Data::new();
        let x = contraction(&model, &mut data, Some(100.0)).expect("contraction");

        let both = jacobian(&model, &mut data, Some(100.0), Some(x)).expect("mixed");
        let motor = jacobian(&model, &mut data, Some(100.0), None).expect("motor");
        let load = jacobian(&model, &mut data, None, Some(x)).expect("load");
        let stored = jacobian(&model, &mut data, None, None).expect("from data");

        for j in [both, motor, load, stored] {
            assert_relative_eq!(j, J_REF, max_relative = 1e-9);
        }
        assert_eq!(data.motor.jacobian, stored);
    }

    #[test]
    fn jacobian_from_data_at_rest_is_zero() {
        let model = Model::default();
        let mut data = Data::new();
        assert_eq!(jacobian(&model, &mut data, None, None), Ok(0.0));
    }

    #[test]
    fn speed_maps_write_both_sides() {
        let model = Model::default();
        let mut data = Data::new();
        let x = contraction(&model, &mut data, Some(100.0)).expect("contraction");

        let dx = contraction_speed(&model, &mut data, Some(x), Some(10.0)).expect("speed");
        assert_relative_eq!(dx, 10.0 * J_REF, max_relative = 1e-9);
        assert_eq!(data.load.velocity, dx);
        assert_eq!(data.motor.velocity, 10.0);
        assert_relative_eq!(data.motor.position, 100.0, max_relative = 1e-9);

        data.motor.velocity = 0.0;
        let dtheta = motor_speed(&model, &mut data, None, None).expect("motor speed");
        assert_relative_eq!(dtheta, 10.0, max_relative = 1e-9);
        assert_eq!(data.motor.velocity, dtheta);
        assert_relative_eq!(data.load.position, x, max_relative = 1e-9);
    }

    #[test]
    fn motor_speed_rejects_untwisted_string() {
        let model = Model::default();
        let mut data = Data::new();
        data.load.velocity = 1e-3;
        let err = motor_speed(&model, &mut data, Some(0.0), None).expect_err("singular");
        assert!(matches!(err, TsaError::SingularConfiguration { .. }));
        assert_eq!(data.motor.velocity, 0.0);
    }
}
