pub mod autodiff;
pub mod config;
pub mod data;
pub mod dynamics;
pub mod error;
pub mod kinematics;
pub mod model;
/// The `tsa_core` crate models the kinematics and dynamics of twisted string actuators.
/// It is designed to be generic, supporting both standard floating-point arithmetic (`f64`)
/// and automatic differentiation via Dual numbers.
///
/// Key components:
/// - **Traits**: `Scalar` (numeric type abstraction).
/// - **Model / Data**: immutable actuator parameters and the per-evaluation scratchpad.
/// - **Kinematics**: position, jacobian, jacobian rate and acceleration transforms between
///   motor space and load space, plus holonomic constraint residuals.
/// - **Dynamics**: inertia, coriolis, static, nonlinear and jamming terms, and forward /
///   inverse dynamics in either space.
/// - **Autodiff**: Dual number implementation for sensitivities with respect to state or
///   parameters.
pub mod traits;

pub use data::{Data, Space, SpaceData};
pub use error::{Result, TsaError};
pub use model::Model;
pub use traits::Scalar;
