//! Pure per-space dynamic terms, given the jacobian and its rate explicitly.
//!
//! Notation: `m` load mass, `I` motor inertia, `b_x` load damping, `b_θ` motor damping.

use crate::data::Space;
use crate::error::Result;
use crate::kinematics::non_singular;
use crate::model::Model;
use crate::traits::Scalar;

/// Inertia `D`: `m·J² + I` in motor space, `m + I·J⁻²` in load space.
pub fn inertia_term<T: Scalar>(model: &Model<T>, space: Space, j: T) -> Result<T> {
    let m = model.dynamic.load.inertia;
    let inertia = model.dynamic.motor.inertia;
    match space {
        Space::Motor => Ok(m * j * j + inertia),
        Space::Load => {
            let j = non_singular("jacobian", j, model.tolerances.singularity)?;
            Ok(m + inertia / (j * j))
        }
    }
}

/// Coriolis and damping coefficient `C`:
/// `m·J·J̇ + J·b_x + b_θ` in motor space, `I·J⁻²·J̇ + b_x + b_θ·J⁻¹` in load space.
pub fn coriolis_term<T: Scalar>(model: &Model<T>, space: Space, j: T, dj: T) -> Result<T> {
    let m = model.dynamic.load.inertia;
    let inertia = model.dynamic.motor.inertia;
    let b_theta = model.dynamic.motor.damping;
    let b_x = model.dynamic.load.damping;
    match space {
        Space::Motor => Ok(m * j * dj + j * b_x + b_theta),
        Space::Load => {
            let j = non_singular("jacobian", j, model.tolerances.singularity)?;
            Ok(inertia * dj / (j * j) + b_x + b_theta / j)
        }
    }
}

/// Load force reflected to the motor, `G = J·F`.
pub fn static_term<T: Scalar>(j: T, force: T) -> T {
    j * force
}

/// Jamming sensitivity `dS/dθ` at motor angle `theta` and contraction `x`:
/// `(r / (L − x)²)² · [(2L² − (rθ)²)·rθ³·C_r − L³·θ·C_L]`.
pub fn jamming_coefficient<T: Scalar>(model: &Model<T>, theta: T, x: T) -> Result<T> {
    let (l, r) = (model.kinematic.length, model.kinematic.radius);
    let c_r = model.stiffness.transverse;
    let c_l = model.stiffness.longitudinal;

    let free = non_singular("remaining string length", l - x, model.tolerances.singularity)?;
    let scale = (r / (free * free)).powi(2);
    let two = T::constant(2.0);
    let transverse = (two * l * l - (r * theta).powi(2)) * r * theta.powi(3) * c_r;
    let longitudinal = l.powi(3) * theta * c_l;
    Ok(scale * (transverse - longitudinal))
}

/// Jamming effect `dS/dθ · F²`.
pub fn jamming_term<T: Scalar>(model: &Model<T>, theta: T, x: T, force: T) -> Result<T> {
    Ok(jamming_coefficient(model, theta, x)? * force * force)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TsaError;
    use crate::kinematics::closed_form;
    use approx::assert_relative_eq;

    #[test]
    fn motor_inertia_reflects_load_mass() {
        let model = Model::<f64>::default();
        let j = 5e-4;
        assert_relative_eq!(
            inertia_term(&model, Space::Motor, j).expect("motor"),
            1.0 * j * j + 1e-6
        );
    }

    #[test]
    fn inertias_are_related_by_jacobian_squared() {
        let model = Model::<f64>::default();
        for j in [1e-5, 5.77e-4, 2e-3] {
            let motor = inertia_term(&model, Space::Motor, j).expect("motor");
            let load = inertia_term(&model, Space::Load, j).expect("load");
            assert_relative_eq!(motor, load * j * j, max_relative = 1e-12);
        }
    }

    #[test]
    fn massless_load_reduces_to_reflected_rotor_inertia() {
        let mut model = Model::<f64>::default();
        model.dynamic.load.inertia = 0.0;
        let j = 4e-4;
        assert_relative_eq!(
            inertia_term(&model, Space::Load, j).expect("load"),
            1e-6 / (j * j)
        );
    }

    #[test]
    fn load_terms_are_singular_at_zero_jacobian() {
        let model = Model::<f64>::default();
        assert!(matches!(
            inertia_term(&model, Space::Load, 0.0),
            Err(TsaError::SingularConfiguration { .. })
        ));
        assert!(matches!(
            coriolis_term(&model, Space::Load, 0.0, 1.0),
            Err(TsaError::SingularConfiguration { .. })
        ));
        assert_eq!(coriolis_term(&model, Space::Motor, 0.0, 1.0), Ok(0.1));
    }

    #[test]
    fn coriolis_terms_follow_their_formulas() {
        let model = Model::<f64>::default();
        let (j, dj) = (5e-4, 2e-5);
        assert_relative_eq!(
            coriolis_term(&model, Space::Motor, j, dj).expect("motor"),
            1.0 * j * dj + j * 0.01 + 0.1
        );
        assert_relative_eq!(
            coriolis_term(&model, Space::Load, j, dj).expect("load"),
            1e-6 * dj / (j * j) + 0.01 + 0.1 / j
        );
    }

    #[test]
    fn jamming_vanishes_without_twist_or_stiffness() {
        let model = Model::<f64>::default();
        assert_eq!(jamming_coefficient(&model, 0.0, 0.0), Ok(0.0));

        let mut soft = Model::<f64>::default();
        soft.stiffness.transverse = 0.0;
        soft.stiffness.longitudinal = 0.0;
        let x = closed_form::contraction(&soft, 100.0).expect("contraction");
        assert_eq!(jamming_term(&soft, 100.0, x, 12.0), Ok(0.0));
    }

    #[test]
    fn jamming_reference_value() {
        let model = Model::<f64>::default();
        let x = closed_form::contraction(&model, 100.0).expect("contraction");
        // (L - x)^2 = 0.03, bracket = 0.07 * 1e-3 * 1e6 * 1e3 - 0.008 * 100 * 5e3
        let expected = (1e-3 / 0.03_f64).powi(2) * (7.0e4 - 4.0e3);
        let k = jamming_coefficient(&model, 100.0, x).expect("coefficient");
        assert_relative_eq!(k, expected, max_relative = 1e-9);
        assert_relative_eq!(
            jamming_term(&model, 100.0, x, 0.5).expect("term"),
            expected * 0.25,
            max_relative = 1e-9
        );
    }
}
