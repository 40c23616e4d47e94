//! Admin session authentication.
//!
//! The admin UI of the catalog is driven by a single configured account. On
//! login the server issues an HttpOnly cookie holding a signed, expiring
//! token; [`admin_auth_middleware`] validates it on guarded routes.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Name of the session cookie set on login.
pub const SESSION_COOKIE: &str = "catalog_session";

/// Claims carried by the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (the admin login name)
    pub sub: String,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
}

/// Signs and verifies admin session cookies.
#[derive(Clone)]
pub struct SessionAuth {
    secret: String,
    ttl_minutes: i64,
}

impl SessionAuth {
    pub fn new(secret: impl Into<String>, ttl_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_minutes,
        }
    }

    /// Create a signed session token for the given admin login.
    pub fn issue_token(&self, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: username.to_string(),
            exp: (now + Duration::minutes(self.ttl_minutes)).timestamp(),
            iat: now.timestamp(),
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Verify a session token signature and decode its claims.
    pub fn verify_token(
        &self,
        token: &str,
    ) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let token_data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Build the `Set-Cookie` value issued on login.
    pub fn session_cookie(
        &self,
        username: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let token = self.issue_token(username)?;
        Ok(format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            SESSION_COOKIE,
            token,
            self.ttl_minutes * 60
        ))
    }

    /// Build the `Set-Cookie` value that clears the session on logout.
    pub fn clear_cookie() -> String {
        format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE)
    }
}

/// Extract the session token from the request's `Cookie` header.
fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|cookie| {
                let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
                if parts.len() == 2 && parts[0] == SESSION_COOKIE {
                    Some(parts[1].to_string())
                } else {
                    None
                }
            })
        })
}

/// Admin session middleware.
///
/// Validates the session cookie and inserts [`SessionClaims`] into request
/// extensions on success. Rejects with a structured 401 otherwise.
///
/// # Example
///
/// ```ignore
/// let guarded = Router::new()
///     .route("/products/{id}/status", put(set_status))
///     .route_layer(axum::middleware::from_fn_with_state(
///         session_auth.clone(),
///         admin_auth_middleware,
///     ));
/// ```
pub async fn admin_auth_middleware(
    State(auth): State<SessionAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_session_token(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No session cookie on guarded route");
            return Err(
                AppError::Unauthorized("Authentication required".to_string()).into_response()
            );
        }
    };

    let claims = match auth.verify_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("Session verification failed: {}", e);
            return Err(
                AppError::Unauthorized("Invalid or expired session".to_string()).into_response()
            );
        }
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let auth = SessionAuth::new("test-secret", 30);
        let token = auth.issue_token("admin").unwrap();
        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let auth = SessionAuth::new("test-secret", 30);
        let other = SessionAuth::new("other-secret", 30);
        let token = auth.issue_token("admin").unwrap();
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let auth = SessionAuth::new("test-secret", 30);
        let cookie = auth.session_cookie("admin").unwrap();
        assert!(cookie.starts_with("catalog_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=1800"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        assert!(SessionAuth::clear_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_session_token_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_static("other=1; catalog_session=abc.def.ghi"),
        );
        assert_eq!(
            extract_session_token(&headers),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_extract_session_token_missing() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);
    }
}
