//! Per-evaluation scratch state.
//!
//! A [`Data`] record is owned by the caller of one evaluation chain. Operations read
//! missing inputs from it and write their results back; each operation documents
//! exactly which fields it writes. `motor.position` and `load.position` are kept
//! mutually consistent by the position transform; every other field simply holds
//! whatever the last operation to touch it wrote.

use crate::error::{Result, TsaError};
use crate::kinematics::closed_form;
use crate::model::Model;
use crate::traits::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reference frame of a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    /// Rotational motor coordinates (θ, θ̇, θ̈, torque).
    Motor,
    /// Linear contraction coordinates (x, ẋ, ẍ, force).
    Load,
}

impl Space {
    pub fn name(self) -> &'static str {
        match self {
            Space::Motor => "motor",
            Space::Load => "load",
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric codes: 1 = motor, 2 = load.
impl TryFrom<u8> for Space {
    type Error = TsaError;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        match code {
            1 => Ok(Space::Motor),
            2 => Ok(Space::Load),
            other => Err(TsaError::InvalidSpace(other.to_string())),
        }
    }
}

impl FromStr for Space {
    type Err = TsaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "motor" => Ok(Space::Motor),
            "load" => Ok(Space::Load),
            _ => Err(TsaError::InvalidSpace(s.to_string())),
        }
    }
}

/// State and derived terms of one space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpaceData<T> {
    pub position: T,
    pub velocity: T,
    pub acceleration: T,
    pub jacobian: T,
    /// Time derivative of the jacobian.
    pub djacobian: T,
    /// Torque in motor space, force in load space.
    pub force: T,
    pub coriolis: T,
    pub inertia: T,
    pub nonlinear: T,
    pub static_term: T,
    pub jamming: T,
}

impl<T: Scalar> Default for SpaceData<T> {
    fn default() -> Self {
        let zero = T::zero();
        Self {
            position: zero,
            velocity: zero,
            acceleration: zero,
            jacobian: zero,
            djacobian: zero,
            force: zero,
            coriolis: zero,
            inertia: zero,
            nonlinear: zero,
            static_term: zero,
            jamming: zero,
        }
    }
}

/// Scratch state for both spaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Data<T> {
    pub motor: SpaceData<T>,
    pub load: SpaceData<T>,
}

impl<T: Scalar> Default for Data<T> {
    fn default() -> Self {
        Self {
            motor: SpaceData::default(),
            load: SpaceData::default(),
        }
    }
}

impl<T: Scalar> Data<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data at a motor-side state `(θ, θ̇)`, with the load side derived from it.
    ///
    /// Fails like [`closed_form::contraction`] for an overwound angle.
    pub fn from_motor_state(model: &Model<T>, theta: T, dtheta: T) -> Result<Self> {
        let x = closed_form::contraction(model, theta)?;
        let dx = closed_form::jacobian_motor(model, theta)? * dtheta;
        Ok(Self::at_state(theta, dtheta, x, dx))
    }

    /// Data at a load-side state `(x, ẋ)`, with the motor side derived from it.
    ///
    /// An untwisted string (`x = 0`) has no finite motor speed unless `ẋ = 0`.
    pub fn from_load_state(model: &Model<T>, x: T, dx: T) -> Result<Self> {
        let theta = closed_form::motor_angle(model, x)?;
        let dtheta = if dx == T::zero() {
            T::zero()
        } else {
            closed_form::motor_speed(model, theta, dx)?
        };
        Ok(Self::at_state(theta, dtheta, x, dx))
    }

    fn at_state(theta: T, dtheta: T, x: T, dx: T) -> Self {
        let mut data = Self::default();
        data.motor.position = theta;
        data.motor.velocity = dtheta;
        data.load.position = x;
        data.load.velocity = dx;
        data
    }

    pub fn space(&self, space: Space) -> &SpaceData<T> {
        match space {
            Space::Motor => &self.motor,
            Space::Load => &self.load,
        }
    }

    pub fn space_mut(&mut self, space: Space) -> &mut SpaceData<T> {
        match space {
            Space::Motor => &mut self.motor,
            Space::Load => &mut self.load,
        }
    }
}
