use super::terms;
use crate::data::{Data, Space};
use crate::error::Result;
use crate::kinematics::{djacobian, jacobian};
use crate::model::Model;
use crate::traits::Scalar;
use tracing::trace;

/// Inertia `D(q)` in `space` at the stored positions.
///
/// Writes `motor.jacobian`, then `jacobian` and `inertia` of `space`.
pub fn inertia<T: Scalar>(model: &Model<T>, data: &mut Data<T>, space: Space) -> Result<T> {
    trace!(space = space.name(), "inertia");
    let j = jacobian(model, data, None, None)?;
    let d = terms::inertia_term(model, space, j)?;

    let record = data.space_mut(space);
    record.jacobian = j;
    record.inertia = d;
    Ok(d)
}

/// Coriolis and damping coefficient `C(q, q̇)` in `space` at the stored state.
///
/// Writes `motor.jacobian`, then `jacobian`, `djacobian` and `coriolis` of `space`.
pub fn coriolis<T: Scalar>(model: &Model<T>, data: &mut Data<T>, space: Space) -> Result<T> {
    trace!(space = space.name(), "coriolis");
    let j = jacobian(model, data, None, None)?;
    let dj = djacobian(model, data, None, None, None, None)?;
    let c = terms::coriolis_term(model, space, j, dj)?;

    let record = data.space_mut(space);
    record.jacobian = j;
    record.djacobian = dj;
    record.coriolis = c;
    Ok(c)
}

/// Static term `G = J·F` for an external load force `F`.
///
/// Writes `motor.jacobian`, `motor.static_term = J·F` and `load.static_term = F`.
pub fn static_term<T: Scalar>(model: &Model<T>, data: &mut Data<T>, force: T) -> Result<T> {
    let j = jacobian(model, data, None, None)?;
    let g = terms::static_term(j, force);
    data.motor.static_term = g;
    data.load.static_term = force;
    Ok(g)
}

/// Nonlinear term `h = C·q̇ + G` in `space`.
///
/// The external force is the one held in `load.static_term` (zero for fresh data);
/// `G` is its motor-space reflection `J·F` or the force itself in load space.
/// Writes everything [`coriolis`] and [`static_term`] write, then `nonlinear` of `space`.
pub fn nonlinear<T: Scalar>(model: &Model<T>, data: &mut Data<T>, space: Space) -> Result<T> {
    let c = coriolis(model, data, space)?;
    let external = data.load.static_term;
    static_term(model, data, external)?;

    let record = data.space_mut(space);
    let h = c * record.velocity + record.static_term;
    record.nonlinear = h;
    Ok(h)
}

/// String jamming effect `dS/dθ · F²` at the stored positions.
///
/// Writes `motor.jamming` and `load.jamming`.
pub fn jamming<T: Scalar>(model: &Model<T>, data: &mut Data<T>, force: T) -> Result<T> {
    let effect = terms::jamming_term(model, data.motor.position, data.load.position, force)?;
    data.motor.jamming = effect;
    data.load.jamming = effect;
    Ok(effect)
}

/// Load-side string tension `m·ẍ + b_x·ẋ + F` from the stored load motion.
///
/// Writes `load.force`.
pub fn string_tension<T: Scalar>(model: &Model<T>, data: &mut Data<T>, external_force: T) -> T {
    let load = &model.dynamic.load;
    let tension =
        load.inertia * data.load.acceleration + load.damping * data.load.velocity + external_force;
    data.load.force = tension;
    tension
}
