use thiserror::Error;

use crate::auth::ErrorBody;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Errore {0}")]
    Status(u16),
    #[error("Hai già aggiunto questo fumetto alla tua raccolta")]
    AlreadyExists,
    #[error("risposta non valida: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classifies a non-success response by its body.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message)
        {
            Some(message) => ApiError::Server { status, message },
            None => ApiError::Status(status),
        }
    }

    /// Message sent by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_body_message() {
        let err = ApiError::from_response(400, r#"{"error": "Username già in uso"}"#);

        assert_eq!(
            err,
            ApiError::Server {
                status: 400,
                message: "Username già in uso".to_string()
            }
        );
        assert_eq!(err.to_string(), "Username già in uso");
    }

    #[test]
    fn test_auth_guard_message() {
        let err = ApiError::from_response(401, r#"{"message": "Token scaduto"}"#);

        assert_eq!(
            err,
            ApiError::Server {
                status: 401,
                message: "Token scaduto".to_string()
            }
        );
    }

    #[test]
    fn test_unparseable_body() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");

        assert_eq!(err, ApiError::Status(502));
        assert_eq!(err.to_string(), "Errore 502");
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_empty_error_field_falls_through() {
        let err = ApiError::from_response(500, r#"{"error": "", "message": "Database error"}"#);

        assert_eq!(err.server_message(), Some("Database error"));
    }
}
