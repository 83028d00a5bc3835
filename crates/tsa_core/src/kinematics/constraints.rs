//! Holonomic constraint residuals. Each one is zero exactly when the state is
//! kinematically consistent; they validate states rather than produce them.

use super::closed_form;
use crate::data::Data;
use crate::model::Model;
use crate::traits::Scalar;

/// `c = θ²r² + (L − x)² − L²`, missing values read from the position fields.
///
/// Writes nothing.
pub fn position_constraint<T: Scalar>(
    model: &Model<T>,
    data: &Data<T>,
    theta: Option<T>,
    x: Option<T>,
) -> T {
    closed_form::position_residual(
        model,
        theta.unwrap_or(data.motor.position),
        x.unwrap_or(data.load.position),
    )
}

/// `ċ = θr²θ̇ − (L − x)ẋ`, missing values read from the position and velocity fields.
///
/// Writes nothing.
pub fn velocity_constraint<T: Scalar>(
    model: &Model<T>,
    data: &Data<T>,
    theta: Option<T>,
    dtheta: Option<T>,
    x: Option<T>,
    dx: Option<T>,
) -> T {
    closed_form::velocity_residual(
        model,
        theta.unwrap_or(data.motor.position),
        dtheta.unwrap_or(data.motor.velocity),
        x.unwrap_or(data.load.position),
        dx.unwrap_or(data.load.velocity),
    )
}

/// `c̈ = θr²θ̈ + r²θ̇² − (L − x)ẍ + ẋ²` for `thetas = (θ, θ̇, θ̈)`, `xs = (x, ẋ, ẍ)`.
///
/// Writes `motor.position`, `motor.velocity`, `load.position`, `load.velocity`.
pub fn acceleration_constraint<T: Scalar>(
    model: &Model<T>,
    data: &mut Data<T>,
    thetas: (T, T, T),
    xs: (T, T, T),
) -> T {
    data.motor.position = thetas.0;
    data.motor.velocity = thetas.1;
    data.load.position = xs.0;
    data.load.velocity = xs.1;
    closed_form::acceleration_residual(model, thetas, xs)
}

#[cfg(test)]
mod tests {
    use super::{acceleration_constraint, position_constraint, velocity_constraint};
    use crate::data::Data;
    use crate::kinematics::{contraction, contraction_speed, motor_angle};
    use crate::model::Model;
    use approx::assert_abs_diff_eq;

    #[test]
    fn transformed_states_satisfy_constraints() {
        let model = Model::default();
        let mut data = Data::new();
        for theta in [5.0, 75.0, 160.0] {
            contraction(&model, &mut data, Some(theta)).expect("contraction");
            assert_abs_diff_eq!(
                position_constraint(&model, &data, None, None),
                0.0,
                epsilon = 1e-15
            );
        }

        motor_angle(&model, &mut data, Some(0.04)).expect("motor angle");
        contraction_speed(&model, &mut data, None, Some(2.5)).expect("speed");
        assert_abs_diff_eq!(
            velocity_constraint(&model, &data, None, None, None, None),
            0.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn explicit_arguments_override_data() {
        let model = Model::default();
        let data = Data::new();
        // θ = 0 with x = 0 is consistent, x = 0.1 is not
        assert_eq!(position_constraint(&model, &data, None, None), 0.0);
        let c = position_constraint(&model, &data, None, Some(0.1));
        assert_abs_diff_eq!(c, 0.01 - 0.04, epsilon = 1e-15);

        let dc = velocity_constraint(&model, &data, Some(2.0), Some(3.0), Some(0.1), Some(0.5));
        assert_abs_diff_eq!(dc, 2.0 * 1e-6 * 3.0 - 0.1 * 0.5, epsilon = 1e-15);
    }

    #[test]
    fn acceleration_constraint_stores_base_state() {
        let model = Model::default();
        let mut data = Data::new();
        acceleration_constraint(&model, &mut data, (1.0, 2.0, 3.0), (4e-3, 5e-3, 6e-3));
        assert_eq!(data.motor.position, 1.0);
        assert_eq!(data.motor.velocity, 2.0);
        assert_eq!(data.load.position, 4e-3);
        assert_eq!(data.load.velocity, 5e-3);
        assert_eq!(data.motor.acceleration, 0.0);
    }
}
