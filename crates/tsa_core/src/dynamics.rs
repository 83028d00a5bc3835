//! Equation-of-motion terms and solvers, per space.
//!
//! The actuator obeys `τ = D(q)·q̈ + h(q, q̇) (+ jamming)` in either space, with
//! `h = C(q, q̇)·q̇ + G(q)`. [`terms`] holds the pure formulas, [`components`] the
//! data-threaded evaluation of each term and [`problems`] the forward and inverse
//! solvers built from them.

pub mod components;
pub mod problems;
pub mod terms;

pub use components::{coriolis, inertia, jamming, nonlinear, static_term, string_tension};
pub use problems::{forward_dynamics, inverse_dynamics};

use crate::data::{Data, Space};
use crate::error::Result;
use crate::model::Model;
use crate::traits::Scalar;
use serde::Serialize;

/// Snapshot of every state-dependent term of one space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DynamicTerms<T> {
    pub space: Space,
    pub jacobian: T,
    pub djacobian: T,
    pub inertia: T,
    pub coriolis: T,
    pub static_term: T,
    pub nonlinear: T,
}

/// Evaluates inertia, coriolis, static and nonlinear terms of `space` at the stored
/// state, with the external force held in `load.static_term`.
///
/// Writes everything [`inertia`] and [`nonlinear`] write.
pub fn compute_all<T: Scalar>(
    model: &Model<T>,
    data: &mut Data<T>,
    space: Space,
) -> Result<DynamicTerms<T>> {
    inertia(model, data, space)?;
    nonlinear(model, data, space)?;

    let record = data.space(space);
    Ok(DynamicTerms {
        space,
        jacobian: record.jacobian,
        djacobian: record.djacobian,
        inertia: record.inertia,
        coriolis: record.coriolis,
        static_term: record.static_term,
        nonlinear: record.nonlinear,
    })
}
