use thiserror::Error;

/// Common result type for the actuator engine.
pub type Result<T> = std::result::Result<T, TsaError>;

/// Failures raised by kinematic and dynamic evaluation.
///
/// All of them are deterministic algebraic failures; nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TsaError {
    /// A closed-form inverse was evaluated outside its physically valid range.
    #[error("{quantity} is outside its domain (value {value})")]
    Domain { quantity: &'static str, value: f64 },

    /// Neither the arguments nor the data record determine the requested quantity.
    #[error("insufficient data to compute {quantity}")]
    InsufficientData { quantity: &'static str },

    /// A divisor (jacobian or reflected inertia) is numerically zero.
    #[error("singular configuration: {quantity} is {value}")]
    SingularConfiguration { quantity: &'static str, value: f64 },

    /// A space selector could not be decoded.
    #[error("invalid space: {0}")]
    InvalidSpace(String),

    /// A model parameter violates its physical constraint.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::TsaError;

    #[test]
    fn messages_name_the_offending_quantity() {
        let err = TsaError::Domain {
            quantity: "contraction",
            value: -0.0004,
        };
        assert_eq!(
            err.to_string(),
            "contraction is outside its domain (value -0.0004)"
        );

        let err = TsaError::SingularConfiguration {
            quantity: "jacobian",
            value: 0.0,
        };
        assert!(err.to_string().contains("jacobian"));

        let err = TsaError::InvalidSpace("3".to_string());
        assert_eq!(err.to_string(), "invalid space: 3");
    }
}
