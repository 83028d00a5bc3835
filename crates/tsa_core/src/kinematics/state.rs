use super::closed_form;
use crate::data::Data;
use crate::error::{Result, TsaError};
use crate::model::Model;
use crate::traits::Scalar;
use tracing::{debug, trace};

/// A partially known kinematic state.
///
/// Any subset of `θ, θ̇, x, ẋ` may be filled in. The jacobian and its time
/// derivative are resolved along the first derivation path the known values allow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState<T> {
    pub theta: Option<T>,
    pub dtheta: Option<T>,
    pub x: Option<T>,
    pub dx: Option<T>,
}

impl<T> Default for KinematicState<T> {
    fn default() -> Self {
        Self {
            theta: None,
            dtheta: None,
            x: None,
            dx: None,
        }
    }
}

/// How the jacobian is obtained from the known positions.
#[derive(Debug, Clone, Copy, PartialEq)]
enum JacobianPath<T> {
    Mixed { theta: T, x: T },
    Motor { theta: T },
    Load { x: T },
}

impl<T: Scalar> KinematicState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full state taken from both position and velocity fields of `data`.
    pub fn from_data(data: &Data<T>) -> Self {
        Self {
            theta: Some(data.motor.position),
            dtheta: Some(data.motor.velocity),
            x: Some(data.load.position),
            dx: Some(data.load.velocity),
        }
    }

    pub fn with_theta(mut self, theta: T) -> Self {
        self.theta = Some(theta);
        self
    }

    pub fn with_dtheta(mut self, dtheta: T) -> Self {
        self.dtheta = Some(dtheta);
        self
    }

    pub fn with_x(mut self, x: T) -> Self {
        self.x = Some(x);
        self
    }

    pub fn with_dx(mut self, dx: T) -> Self {
        self.dx = Some(dx);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.theta.is_none() && self.dtheta.is_none() && self.x.is_none() && self.dx.is_none()
    }

    fn jacobian_path(&self) -> Result<JacobianPath<T>> {
        match (self.theta, self.x) {
            (Some(theta), Some(x)) => Ok(JacobianPath::Mixed { theta, x }),
            (Some(theta), None) => Ok(JacobianPath::Motor { theta }),
            (None, Some(x)) => Ok(JacobianPath::Load { x }),
            (None, None) => {
                debug!(quantity = "jacobian", "no position known");
                Err(TsaError::InsufficientData {
                    quantity: "jacobian",
                })
            }
        }
    }

    /// Resolves `J` from whichever positions are known.
    pub fn resolve_jacobian(&self, model: &Model<T>) -> Result<T> {
        match self.jacobian_path()? {
            JacobianPath::Mixed { theta, x } => {
                trace!("jacobian from mixed form");
                closed_form::jacobian_mixed(model, theta, x)
            }
            JacobianPath::Motor { theta } => {
                trace!("jacobian from motor angle");
                closed_form::jacobian_motor(model, theta)
            }
            JacobianPath::Load { x } => {
                trace!("jacobian from contraction");
                closed_form::jacobian_load(model, x)
            }
        }
    }

    /// Completes the state from one full side (position and velocity).
    ///
    /// A complete state is returned unchanged; a motor-side pair derives the load
    /// side and vice versa.
    pub fn complete(&self, model: &Model<T>) -> Result<(T, T, T, T)> {
        match (self.theta, self.dtheta, self.x, self.dx) {
            (Some(theta), Some(dtheta), Some(x), Some(dx)) => Ok((theta, dtheta, x, dx)),
            (Some(theta), Some(dtheta), _, _) => {
                let x = closed_form::contraction(model, theta)?;
                let dx = closed_form::jacobian_motor(model, theta)? * dtheta;
                Ok((theta, dtheta, x, dx))
            }
            (_, _, Some(x), Some(dx)) => {
                let theta = closed_form::motor_angle(model, x)?;
                let dtheta = closed_form::motor_speed(model, theta, dx)?;
                Ok((theta, dtheta, x, dx))
            }
            _ => {
                debug!(quantity = "jacobian rate", "no full motor or load side known");
                Err(TsaError::InsufficientData {
                    quantity: "jacobian rate",
                })
            }
        }
    }

    /// Resolves `J̇` once the state can be completed.
    pub fn resolve_djacobian(&self, model: &Model<T>) -> Result<T> {
        let (theta, dtheta, x, dx) = self.complete(model)?;
        closed_form::djacobian_mixed(model, theta, dtheta, x, dx)
    }
}
