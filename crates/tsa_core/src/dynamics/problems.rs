use super::components::{inertia, jamming, nonlinear};
use super::terms::jamming_coefficient;
use crate::data::{Data, Space};
use crate::error::{Result, TsaError};
use crate::kinematics::non_singular;
use crate::model::Model;
use crate::traits::Scalar;
use tracing::debug;

/// Acceleration produced by `input` (torque in motor space, force in load space):
/// `a = (τ − h − jam) / D`.
///
/// With `include_jamming`, motor space evaluates the jamming effect for the load
/// force `J·τ`. In load space `τ = c + k·c²` where `c` is the force reaching the
/// string, so `c` is recovered first and `jam = τ − c`; this is the exact inverse
/// of [`inverse_dynamics`].
/// Writes everything [`inertia`] and [`nonlinear`] write, the jamming fields when
/// included, then `acceleration` of `space`.
pub fn forward_dynamics<T: Scalar>(
    model: &Model<T>,
    data: &mut Data<T>,
    space: Space,
    input: T,
    include_jamming: bool,
) -> Result<T> {
    let d = inertia(model, data, space)?;
    let h = nonlinear(model, data, space)?;

    // force left to accelerate the actuator once jamming is accounted for
    let drive = match (include_jamming, space) {
        (false, _) => input,
        (true, Space::Motor) => {
            let force = data.motor.jacobian * input;
            input - jamming(model, data, force)?
        }
        (true, Space::Load) => {
            let k = jamming_coefficient(model, data.motor.position, data.load.position)?;
            let force = string_force(k, input)?;
            data.motor.jamming = input - force;
            data.load.jamming = input - force;
            force
        }
    };

    let d = non_singular("inertia", d, model.tolerances.singularity)?;
    let acceleration = (drive - h) / d;
    debug!(
        space = space.name(),
        input = input.value(),
        acceleration = acceleration.value(),
        "forward dynamics"
    );
    data.space_mut(space).acceleration = acceleration;
    Ok(acceleration)
}

/// Root of `k·c² + c = τ` that reduces to `c = τ` as `k → 0`.
///
/// The discriminant of a force produced by [`inverse_dynamics`] is `(1 + 2kc)²`,
/// so the root recovers `c` on the branch `1 + 2kc ≥ 0`; past that fold the
/// squared jamming force no longer tells the two branches apart.
fn string_force<T: Scalar>(k: T, input: T) -> Result<T> {
    let four = T::constant(4.0);
    let discriminant = T::one() + four * k * input;
    if discriminant < T::zero() || discriminant.is_nan() {
        debug!(
            coefficient = k.value(),
            input = input.value(),
            "no string force reproduces the jammed input"
        );
        return Err(TsaError::Domain {
            quantity: "string force",
            value: input.value(),
        });
    }
    let two = T::constant(2.0);
    Ok(two * input / (T::one() + discriminant.sqrt()))
}

/// Input required for `acceleration`: `τ = D·a + h`.
///
/// In load space `include_jamming` adds the jamming effect of that force. Motor-space
/// inverse dynamics never includes jamming, since the string force is not yet known
/// at that point.
/// Writes everything [`inertia`] and [`nonlinear`] write, the jamming fields when
/// included, then `force` of `space`.
pub fn inverse_dynamics<T: Scalar>(
    model: &Model<T>,
    data: &mut Data<T>,
    space: Space,
    acceleration: T,
    include_jamming: bool,
) -> Result<T> {
    let d = inertia(model, data, space)?;
    let h = nonlinear(model, data, space)?;
    let mut input = d * acceleration + h;

    if space == Space::Load && include_jamming {
        input = input + jamming(model, data, input)?;
    }

    debug!(
        space = space.name(),
        acceleration = acceleration.value(),
        input = input.value(),
        "inverse dynamics"
    );
    data.space_mut(space).force = input;
    Ok(input)
}
