use std::fmt::{Display, Formatter};

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// Fixed text shown for any non-success HTTP status.
pub const STATUS_FAILURE_MESSAGE: &str = "Failed to fetch users";
/// Fallback text for failures that carry no message of their own.
pub const UNKNOWN_FAILURE_MESSAGE: &str = "An unknown error occurred";

/// Why a fetch cycle failed.
///
/// The `Display` output is exactly what the view shows in its error banner.
/// The status code is kept for logging and never displayed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("{}", STATUS_FAILURE_MESSAGE)]
    Status(u16),
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Decode(String),
    #[error("{}", UNKNOWN_FAILURE_MESSAGE)]
    Unknown,
}

impl FetchError {
    /// Transport failure; an empty message degrades to [`FetchError::Unknown`].
    pub fn transport(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        if msg.trim().is_empty() { Self::Unknown } else { Self::Transport(msg) }
    }

    /// Body decoding failure; an empty message degrades to [`FetchError::Unknown`].
    pub fn decode(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        if msg.trim().is_empty() { Self::Unknown } else { Self::Decode(msg) }
    }
}

pub trait Context<T> {
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

#[derive(Debug)]
pub struct WithContextError {
    pub context: String,
    pub source: DynError,
}

impl Display for WithContextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl std::error::Error for WithContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            Box::new(WithContextError {
                context: f(),
                source: e.into(),
            }) as DynError
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_failure_hides_the_code() {
        assert_eq!(FetchError::Status(404).to_string(), STATUS_FAILURE_MESSAGE);
        assert_eq!(FetchError::Status(503).to_string(), STATUS_FAILURE_MESSAGE);
    }

    #[test]
    fn empty_messages_fall_back_to_unknown() {
        assert_eq!(FetchError::transport(""), FetchError::Unknown);
        assert_eq!(FetchError::decode("   "), FetchError::Unknown);
        assert_eq!(FetchError::Unknown.to_string(), UNKNOWN_FAILURE_MESSAGE);
        assert_eq!(FetchError::transport("timeout").to_string(), "timeout");
    }

    #[test]
    fn context_wraps_source_error() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("boom"));
        let err = res.with_ctx(|| "init terminal".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "init terminal: boom");
    }
}
