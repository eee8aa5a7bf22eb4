use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatinError {
    /// A model or configuration value is outside its physical domain
    #[error("Invalid parameter: {param} = {value}")]
    InvalidParameter { param: String, value: String },

    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl StatinError {
    pub(crate) fn invalid(param: &str, value: impl ToString) -> Self {
        StatinError::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
        }
    }
}
