pub type ScrollyteResult<T> = Result<T, ScrollyteError>;

#[derive(thiserror::Error, Debug)]
pub enum ScrollyteError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("track error: {0}")]
    Track(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollyteError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn track(msg: impl Into<String>) -> Self {
        Self::Track(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ScrollyteError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(ScrollyteError::track("x").to_string().contains("track error:"));
        assert!(
            ScrollyteError::evaluation("x")
                .to_string()
                .contains("evaluation error:")
        );
        assert!(
            ScrollyteError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ScrollyteError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
