//! Loading actuator parameters from JSON.
//!
//! Every section and every field of a section except the per-space records is
//! optional and falls back to the defaults of [`Model`]:
//!
//! ```json
//! {
//!   "kinematic": { "length": 0.25, "radius": 0.0008 },
//!   "dynamic": {
//!     "motor": { "inertia": 2e-6, "damping": 0.05, "friction": 0.02 },
//!     "load": { "inertia": 0.5, "damping": 0.02, "friction": 0.1 }
//!   },
//!   "stiffness": { "transverse": 800.0 },
//!   "tolerances": { "singularity": 1e-12 }
//! }
//! ```

use crate::model::Model;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parses and validates a model description.
pub fn model_from_json_str(json: &str) -> Result<Model<f64>> {
    let model: Model<f64> =
        serde_json::from_str(json).context("Failed to parse actuator model JSON.")?;
    model
        .validate()
        .context("Actuator model failed validation.")?;
    Ok(model)
}

/// Reads, parses and validates a model description file.
pub fn model_from_path(path: impl AsRef<Path>) -> Result<Model<f64>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading actuator model");
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read actuator model from {}.", path.display()))?;
    model_from_json_str(&json)
        .with_context(|| format!("Invalid actuator model in {}.", path.display()))
}

/// Serializes a model, e.g. to persist a calibrated parameter set.
pub fn model_to_json_string(model: &Model<f64>) -> Result<String> {
    serde_json::to_string_pretty(model).context("Failed to serialize actuator model.")
}
