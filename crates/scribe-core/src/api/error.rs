use thiserror::Error;

use crate::models::MessageResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - please log in again")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data.
    /// Cuts at a char boundary so multibyte content cannot panic the slice.
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let cut = (0..=MAX_ERROR_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..cut],
            body.len()
        )
    }

    /// Extract the service's own `message` field when the body carries one,
    /// falling back to the (truncated) raw body.
    fn body_message(body: &str) -> String {
        match serde_json::from_str::<MessageResponse>(body) {
            Ok(resp) => resp.message,
            Err(_) => Self::truncate_body(body),
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::body_message(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound(message),
            400 | 422 => ApiError::Validation(message),
            500..=599 => ApiError::ServerError(message),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, message)),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Check whether an error from an API call is an authorization failure.
/// Callers use this to trigger the logged-out transition.
pub fn unauthorized(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ApiError>()
        .is_some_and(ApiError::is_unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "missing"),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, ""),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, ""),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::IM_A_TEAPOT, ""),
            ApiError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_error_surfaces_service_message() {
        let err = ApiError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message": "title is required"}"#,
        );
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn test_error_falls_back_to_raw_body() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "not json");
        assert_eq!(err.to_string(), "Server error: not json");
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(2000);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        let text = err.to_string();
        assert!(text.contains("truncated, 2000 total bytes"));
        assert!(text.len() < body.len());
    }

    #[test]
    fn test_truncation_cuts_at_char_boundary() {
        // A two-byte char straddling the truncation point must not panic
        let body = format!("{}éé", "x".repeat(MAX_ERROR_BODY_LENGTH - 1));
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        let text = err.to_string();
        assert!(text.contains(&format!("truncated, {} total bytes", body.len())));

        // Boundary exactly at the limit keeps the full prefix
        let body = format!("{}é", "x".repeat(MAX_ERROR_BODY_LENGTH));
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        assert!(err.to_string().contains(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
    }

    #[test]
    fn test_unauthorized_detection_through_anyhow() {
        let err: anyhow::Error = ApiError::Unauthorized.into();
        assert!(unauthorized(&err));

        let err: anyhow::Error = ApiError::NotFound("gone".to_string()).into();
        assert!(!unauthorized(&err));

        let err = anyhow::anyhow!("plain error");
        assert!(!unauthorized(&err));
    }
}
