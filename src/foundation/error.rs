/// Result alias used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the engine and its hosts.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Invalid configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A surface could not be measured or allocated.
    #[error("surface error: {0}")]
    Surface(String),

    /// Rasterization or export failed.
    #[error("render error: {0}")]
    Render(String),

    /// Config file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Any other failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// Build [`EngineError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build [`EngineError::Surface`].
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build [`EngineError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build [`EngineError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
