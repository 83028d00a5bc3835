//! Pure closed-form kinematics.
//!
//! Each function takes plain scalars, reads only the string geometry and tolerances
//! of the model, and never touches a data record.

use super::{domain_sqrt, non_singular};
use crate::error::{Result, TsaError};
use crate::model::Model;
use crate::traits::Scalar;
use tracing::debug;

/// Contraction `x = L − sqrt(L² − (θr)²)`. Requires `|θr| ≤ L`.
pub fn contraction<T: Scalar>(model: &Model<T>, theta: T) -> Result<T> {
    let (l, r) = (model.kinematic.length, model.kinematic.radius);
    let root = domain_sqrt("motor angle", l * l - (theta * r).powi(2), theta)?;
    Ok(l - root)
}

/// Motor angle `θ = sqrt(L² − (L − x)²) / r` on the physical branch `0 ≤ x ≤ L`.
pub fn motor_angle<T: Scalar>(model: &Model<T>, x: T) -> Result<T> {
    let (l, r) = (model.kinematic.length, model.kinematic.radius);
    if x < T::zero() || x > l {
        debug!(value = x.value(), "contraction outside physical branch");
        return Err(TsaError::Domain {
            quantity: "contraction",
            value: x.value(),
        });
    }
    let root = domain_sqrt("contraction", l * l - (l - x).powi(2), x)?;
    Ok(root / r)
}

/// Jacobian from both coordinates: `J = θr² / (L − x)`.
pub fn jacobian_mixed<T: Scalar>(model: &Model<T>, theta: T, x: T) -> Result<T> {
    let (l, r) = (model.kinematic.length, model.kinematic.radius);
    let free = non_singular("remaining string length", l - x, model.tolerances.singularity)?;
    Ok(theta * r * r / free)
}

/// Jacobian from the motor angle: `J = θr² / sqrt(L² − (θr)²)`.
pub fn jacobian_motor<T: Scalar>(model: &Model<T>, theta: T) -> Result<T> {
    let (l, r) = (model.kinematic.length, model.kinematic.radius);
    let root = domain_sqrt("motor angle", l * l - (theta * r).powi(2), theta)?;
    let root = non_singular("remaining string length", root, model.tolerances.singularity)?;
    Ok(theta * r * r / root)
}

/// Jacobian from the contraction, through the motor angle.
pub fn jacobian_load<T: Scalar>(model: &Model<T>, x: T) -> Result<T> {
    let theta = motor_angle(model, x)?;
    jacobian_motor(model, theta)
}

/// Time derivative of the mixed jacobian:
/// `J̇ = r²θ̇ / (L − x) + θr²ẋ / (L − x)²`.
pub fn djacobian_mixed<T: Scalar>(model: &Model<T>, theta: T, dtheta: T, x: T, dx: T) -> Result<T> {
    let (l, r) = (model.kinematic.length, model.kinematic.radius);
    let free = non_singular("remaining string length", l - x, model.tolerances.singularity)?;
    let r2 = r * r;
    Ok(r2 * dtheta / free + theta * r2 * dx / (free * free))
}

/// Contraction speed `ẋ = J(x)·θ̇`.
pub fn contraction_speed<T: Scalar>(model: &Model<T>, x: T, dtheta: T) -> Result<T> {
    Ok(jacobian_load(model, x)? * dtheta)
}

/// Motor speed `θ̇ = ẋ / J(θ)`.
pub fn motor_speed<T: Scalar>(model: &Model<T>, theta: T, dx: T) -> Result<T> {
    let j = non_singular(
        "jacobian",
        jacobian_motor(model, theta)?,
        model.tolerances.singularity,
    )?;
    Ok(dx / j)
}

/// Motor-side state `(θ, θ̇, θ̈)` reached from a load-side state `(x, ẋ, ẍ)`.
///
/// Differentiating `ẋ = J·θ̇` gives `θ̈ = (ẍ − J̇·θ̇) / J`.
pub fn motor_motion<T: Scalar>(model: &Model<T>, x: T, dx: T, ddx: T) -> Result<(T, T, T)> {
    let j = non_singular(
        "jacobian",
        jacobian_load(model, x)?,
        model.tolerances.singularity,
    )?;
    let theta = motor_angle(model, x)?;
    let dtheta = dx / j;
    let dj = djacobian_mixed(model, theta, dtheta, x, dx)?;
    Ok((theta, dtheta, (ddx - dj * dtheta) / j))
}

/// Load-side state `(x, ẋ, ẍ)` reached from a motor-side state `(θ, θ̇, θ̈)`:
/// `ẍ = J·θ̈ + J̇·θ̇`.
pub fn load_motion<T: Scalar>(
    model: &Model<T>,
    theta: T,
    dtheta: T,
    ddtheta: T,
) -> Result<(T, T, T)> {
    let x = contraction(model, theta)?;
    let j = jacobian_motor(model, theta)?;
    let dx = j * dtheta;
    let dj = djacobian_mixed(model, theta, dtheta, x, dx)?;
    Ok((x, dx, j * ddtheta + dj * dtheta))
}

/// Position residual `θ²r² + (L − x)² − L²`.
pub fn position_residual<T: Scalar>(model: &Model<T>, theta: T, x: T) -> T {
    let (l, r) = (model.kinematic.length, model.kinematic.radius);
    theta * theta * r * r + (l - x).powi(2) - l * l
}

/// Velocity residual `θr²θ̇ − (L − x)ẋ`.
pub fn velocity_residual<T: Scalar>(model: &Model<T>, theta: T, dtheta: T, x: T, dx: T) -> T {
    let (l, r) = (model.kinematic.length, model.kinematic.radius);
    theta * r * r * dtheta - (l - x) * dx
}

/// Acceleration residual `θr²θ̈ + r²θ̇² − (L − x)ẍ + ẋ²`.
pub fn acceleration_residual<T: Scalar>(model: &Model<T>, thetas: (T, T, T), xs: (T, T, T)) -> T {
    let (l, r) = (model.kinematic.length, model.kinematic.radius);
    let (theta, dtheta, ddtheta) = thetas;
    let (x, dx, ddx) = xs;
    let r2 = r * r;
    theta * r2 * ddtheta + r2 * dtheta * dtheta - (l - x) * ddx + dx * dx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autodiff::Dual;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn model() -> Model<f64> {
        Model::default()
    }

    #[test]
    fn reference_configuration() {
        let model = model();
        let x = contraction(&model, 100.0).expect("contraction");
        assert_relative_eq!(x, 0.2 - 0.03_f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(x, 0.026_794_919, max_relative = 1e-7);

        let j = jacobian_motor(&model, 100.0).expect("jacobian");
        assert_relative_eq!(j, 1e-4 / 0.03_f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(j, 5.7735e-4, max_relative = 1e-4);
    }

    #[test]
    fn contraction_rejects_overwound_angle() {
        let err = contraction(&model(), 201.0).expect_err("domain");
        assert_eq!(
            err,
            TsaError::Domain {
                quantity: "motor angle",
                value: 201.0
            }
        );
    }

    #[test]
    fn contraction_accepts_full_winding() {
        let x = contraction(&model(), 200.0).expect("boundary");
        assert_relative_eq!(x, 0.2);
    }

    #[test]
    fn motor_angle_rejects_points_off_the_physical_branch() {
        assert!(matches!(
            motor_angle(&model(), -1e-3),
            Err(TsaError::Domain { quantity: "contraction", .. })
        ));
        assert!(matches!(
            motor_angle(&model(), 0.25),
            Err(TsaError::Domain { quantity: "contraction", .. })
        ));
    }

    #[test]
    fn position_map_round_trips() {
        let model = model();
        for theta in [0.5, 10.0, 57.3, 100.0, 150.0, 199.0] {
            let x = contraction(&model, theta).expect("contraction");
            let back = motor_angle(&model, x).expect("motor angle");
            assert_relative_eq!(back, theta, max_relative = 1e-9);
            assert_abs_diff_eq!(position_residual(&model, theta, x), 0.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn jacobian_paths_agree() {
        let model = model();
        for theta in [1.0, 25.0, 100.0, 180.0] {
            let x = contraction(&model, theta).expect("contraction");
            let mixed = jacobian_mixed(&model, theta, x).expect("mixed");
            let motor = jacobian_motor(&model, theta).expect("motor");
            let load = jacobian_load(&model, x).expect("load");
            assert_relative_eq!(mixed, motor, max_relative = 1e-9);
            assert_relative_eq!(load, motor, max_relative = 1e-9);
        }
    }

    #[test]
    fn jacobian_matches_derivative_of_contraction() {
        let model: Model<Dual> = model().map(Dual::constant);
        let x = contraction(&model, Dual::variable(120.0)).expect("contraction");
        let j = jacobian_motor(&model, Dual::constant(120.0)).expect("jacobian");
        assert_relative_eq!(x.eps, j.val, max_relative = 1e-10);
    }

    #[test]
    fn djacobian_matches_chain_rule() {
        // dJ/dt = dJ/dθ · θ̇ along a motor trajectory
        let model_f = model();
        let model: Model<Dual> = model_f.map(Dual::constant);
        let (theta, dtheta) = (80.0, 3.0);
        let slope = jacobian_motor(&model, Dual::variable(theta)).expect("jacobian").eps;

        let x = contraction(&model_f, theta).expect("contraction");
        let dx = jacobian_motor(&model_f, theta).expect("jacobian") * dtheta;
        let dj = djacobian_mixed(&model_f, theta, dtheta, x, dx).expect("djacobian");
        assert_relative_eq!(dj, slope * dtheta, max_relative = 1e-9);
    }

    #[test]
    fn speeds_are_inverse_maps() {
        let model = model();
        let theta = 60.0;
        let x = contraction(&model, theta).expect("contraction");
        let dx = contraction_speed(&model, x, 4.0).expect("contraction speed");
        let dtheta = motor_speed(&model, theta, dx).expect("motor speed");
        assert_relative_eq!(dtheta, 4.0, max_relative = 1e-9);
        assert_abs_diff_eq!(
            velocity_residual(&model, theta, dtheta, x, dx),
            0.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn motor_speed_is_singular_at_zero_twist() {
        assert!(matches!(
            motor_speed(&model(), 0.0, 1e-3),
            Err(TsaError::SingularConfiguration { quantity: "jacobian", .. })
        ));
    }

    #[test]
    fn motions_satisfy_acceleration_constraint() {
        let model = model();
        let (x, dx, ddx) = load_motion(&model, 90.0, 5.0, -2.0).expect("load motion");
        let residual = acceleration_residual(&model, (90.0, 5.0, -2.0), (x, dx, ddx));
        assert_abs_diff_eq!(residual, 0.0, epsilon = 1e-14);

        let (theta, dtheta, ddtheta) = motor_motion(&model, x, dx, ddx).expect("motor motion");
        assert_relative_eq!(theta, 90.0, max_relative = 1e-9);
        assert_relative_eq!(dtheta, 5.0, max_relative = 1e-9);
        assert_relative_eq!(ddtheta, -2.0, max_relative = 1e-7);
    }

    #[test]
    fn fully_wound_string_is_singular_for_mixed_jacobian() {
        assert!(matches!(
            jacobian_mixed(&model(), 200.0, 0.2),
            Err(TsaError::SingularConfiguration { .. })
        ));
    }
}
