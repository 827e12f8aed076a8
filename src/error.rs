use thiserror::Error;

pub type Result<T> = std::result::Result<T, VrpError>;

#[derive(Error, Debug)]
pub enum VrpError {
    /// Malformed or missing input field, or a value outside its domain.
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Search parameter outside its allowed range.
    #[error("invalid parameter `{field}`: {reason}")]
    Parameter { field: String, reason: String },

    /// Demand cannot fit into the fleet no matter how orders are dealt.
    #[error("infeasible instance: {resource} demand {demand} exceeds capacity {capacity}")]
    InfeasibleInstance {
        resource: String,
        demand: f64,
        capacity: f64,
    },

    #[error("failed to access {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed problem document")]
    Json(#[from] serde_json::Error),

    #[error("failed to write CSV output")]
    Csv(#[from] csv::Error),
}

impl VrpError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        VrpError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        VrpError::Parameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
