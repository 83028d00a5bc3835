//! Static actuator parameters.
//!
//! A [`Model`] is read by every kinematic and dynamic operation and never mutated
//! by them. All records are generic over the scalar so that parameters can carry
//! tangents (see [`Model::map`]).

use crate::error::{Result, TsaError};
use crate::traits::Scalar;
use serde::{Deserialize, Serialize};

/// String geometry, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Scalar + Deserialize<'de>"))]
pub struct KinematicParameters<T> {
    /// Untwisted string length `L`.
    pub length: T,
    /// String radius `r`.
    pub radius: T,
}

impl<T: Scalar> Default for KinematicParameters<T> {
    fn default() -> Self {
        Self {
            length: T::constant(0.2),
            radius: T::constant(1e-3),
        }
    }
}

/// Inertia, viscous damping and Coulomb friction of one side of the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpaceParameters<T> {
    pub inertia: T,
    pub damping: T,
    pub friction: T,
}

impl<T: Scalar> SpaceParameters<T> {
    pub fn new(inertia: f64, damping: f64, friction: f64) -> Self {
        Self {
            inertia: T::constant(inertia),
            damping: T::constant(damping),
            friction: T::constant(friction),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Scalar + Deserialize<'de>"))]
pub struct DynamicParameters<T> {
    /// Rotor side: inertia in kg·m², damping in N·m·s/rad.
    pub motor: SpaceParameters<T>,
    /// Load side: mass in kg, damping in N·s/m.
    pub load: SpaceParameters<T>,
}

impl<T: Scalar> Default for DynamicParameters<T> {
    fn default() -> Self {
        Self {
            motor: SpaceParameters::new(1e-6, 0.1, 0.05),
            load: SpaceParameters::new(1.0, 0.01, 0.1),
        }
    }
}

/// String compliance coefficients used by the jamming term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Scalar + Deserialize<'de>"))]
pub struct StiffnessParameters<T> {
    /// Transverse stiffness `C_r`.
    pub transverse: T,
    /// Longitudinal stiffness `C_L`.
    pub longitudinal: T,
}

impl<T: Scalar> Default for StiffnessParameters<T> {
    fn default() -> Self {
        Self {
            transverse: T::constant(1000.0),
            longitudinal: T::constant(5000.0),
        }
    }
}

/// Numerical thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Divisors with magnitude at or below this value are treated as zero.
    pub singularity: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { singularity: 1e-12 }
    }
}

/// Complete parameter set of a twisted string actuator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Scalar + Deserialize<'de>"))]
pub struct Model<T> {
    pub kinematic: KinematicParameters<T>,
    pub dynamic: DynamicParameters<T>,
    pub stiffness: StiffnessParameters<T>,
    pub tolerances: Tolerances,
}

impl<T: Scalar> Default for Model<T> {
    fn default() -> Self {
        Self {
            kinematic: KinematicParameters::default(),
            dynamic: DynamicParameters::default(),
            stiffness: StiffnessParameters::default(),
            tolerances: Tolerances::default(),
        }
    }
}

impl<T: Scalar> Model<T> {
    /// Checks the physical constraints on every parameter.
    pub fn validate(&self) -> Result<()> {
        positive("kinematic.length", self.kinematic.length)?;
        positive("kinematic.radius", self.kinematic.radius)?;

        let motor = &self.dynamic.motor;
        non_negative("dynamic.motor.inertia", motor.inertia)?;
        non_negative("dynamic.motor.damping", motor.damping)?;
        non_negative("dynamic.motor.friction", motor.friction)?;

        let load = &self.dynamic.load;
        non_negative("dynamic.load.inertia", load.inertia)?;
        non_negative("dynamic.load.damping", load.damping)?;
        non_negative("dynamic.load.friction", load.friction)?;

        non_negative("stiffness.transverse", self.stiffness.transverse)?;
        non_negative("stiffness.longitudinal", self.stiffness.longitudinal)?;

        let tol = self.tolerances.singularity;
        if !tol.is_finite() || tol < 0.0 {
            return Err(TsaError::InvalidParameter {
                name: "tolerances.singularity",
                reason: format!("must be finite and non-negative, got {tol}"),
            });
        }
        Ok(())
    }

    /// Converts every parameter with `f`, e.g. lifting an `f64` model to [`crate::autodiff::Dual`].
    pub fn map<U, F>(&self, f: F) -> Model<U>
    where
        F: Fn(T) -> U,
    {
        Model {
            kinematic: KinematicParameters {
                length: f(self.kinematic.length),
                radius: f(self.kinematic.radius),
            },
            dynamic: DynamicParameters {
                motor: map_space(&self.dynamic.motor, &f),
                load: map_space(&self.dynamic.load, &f),
            },
            stiffness: StiffnessParameters {
                transverse: f(self.stiffness.transverse),
                longitudinal: f(self.stiffness.longitudinal),
            },
            tolerances: self.tolerances,
        }
    }
}

fn map_space<T: Copy, U, F: Fn(T) -> U>(space: &SpaceParameters<T>, f: &F) -> SpaceParameters<U> {
    SpaceParameters {
        inertia: f(space.inertia),
        damping: f(space.damping),
        friction: f(space.friction),
    }
}

fn positive<T: Scalar>(name: &'static str, value: T) -> Result<()> {
    if value.is_finite() && value > T::zero() {
        Ok(())
    } else {
        Err(TsaError::InvalidParameter {
            name,
            reason: format!("must be positive and finite, got {}", value.value()),
        })
    }
}

fn non_negative<T: Scalar>(name: &'static str, value: T) -> Result<()> {
    if value.is_finite() && value >= T::zero() {
        Ok(())
    } else {
        Err(TsaError::InvalidParameter {
            name,
            reason: format!("must be non-negative and finite, got {}", value.value()),
        })
    }
}
