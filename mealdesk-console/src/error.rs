//! Console error types

use mealdesk_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Request failed or the server rejected it
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Input refused before any request was sent
    #[error("{0}")]
    Validation(String),

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Nothing to retry")]
    NothingToRetry,
}

impl ConsoleError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Message shown to the operator
    pub fn user_message(&self) -> String {
        match self {
            Self::Client(err) => err.user_message(),
            other => other.to_string(),
        }
    }

    /// `true` when no request reached the server
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Client(_))
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ConsoleError::from(ClientError::Rejected("중복된 코드입니다".to_string()));
        assert_eq!(err.user_message(), "중복된 코드입니다");
        assert!(!err.is_local());

        let err = ConsoleError::validation("협력업체 코드를 입력하세요");
        assert_eq!(err.user_message(), "협력업체 코드를 입력하세요");
        assert!(err.is_local());
    }
}
