pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid notes JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pipeline reported an error ({status_code}): {message}")]
    PipelineFailed { status_code: u16, message: String },
}

impl From<json5::Error> for Error {
    fn from(value: json5::Error) -> Self {
        Self::InvalidConfig {
            message: value.to_string(),
        }
    }
}
