use crate::auth::responses::{AuthorizationExtractionError, AuthorizationExtractionReason};
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::Json;

/// Whoever sent the current request, as far as the backend is concerned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Caller {
    pub access_token: Option<String>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<AuthorizationExtractionError>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Caller::anonymous());
        };
        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty());
        match token {
            Some(token) => Ok(Caller::with_token(token)),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(AuthorizationExtractionError {
                    error: true,
                    reason: AuthorizationExtractionReason::MalformedAuthorizationHeader,
                }),
            )),
        }
    }
}
