use crate::AppState;
use crate::api::error::AppError;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

/// Guards `/admin` routes with the configured bearer token.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config.admin_token.as_deref() else {
        return Err(AppError::Forbidden(
            "Admin interface is disabled".to_string(),
        ));
    };

    let provided = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match provided {
        Some(token) if tokens_match(token, expected) => Ok(next.run(req).await),
        _ => {
            tracing::warn!("Rejected admin request to {}", req.uri().path());
            Err(AppError::Unauthorized(
                "Missing or invalid admin token".to_string(),
            ))
        }
    }
}

fn tokens_match(provided: &str, expected: &str) -> bool {
    Sha256::digest(provided.as_bytes()) == Sha256::digest(expected.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_match() {
        assert!(tokens_match("secret", "secret"));
        assert!(!tokens_match("secret", "Secret"));
        assert!(!tokens_match("", "secret"));
    }
}
