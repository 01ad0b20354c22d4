use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::{application::error::ApplicationError, config::AdminCredentials};

/// Splits an `Authorization: Basic ...` header into username and password.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Both fields are always compared so a wrong username costs the same.
fn credentials_match(expected: &AdminCredentials, username: &str, password: &str) -> bool {
    let username_ok = secure_compare(username, &expected.username);
    let password_ok = secure_compare(password, &expected.password);
    username_ok & password_ok
}

/// Middleware guarding the admin pages with HTTP Basic auth
pub async fn require_admin(
    State(credentials): State<Option<Arc<AdminCredentials>>>,
    headers: HeaderMap,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = credentials else {
        warn!("Admin access attempted but no admin password is configured");
        return ApplicationError::Unauthorized.into_response();
    };

    match basic_credentials(&headers) {
        Some((username, password))
            if credentials_match(&expected, &username, &password) =>
        {
            next.run(request).await
        }
        Some((username, _)) => {
            warn!("Invalid admin credentials for user '{}'", username);
            ApplicationError::Unauthorized.into_response()
        }
        None => {
            warn!("Missing or malformed Authorization header on admin route");
            ApplicationError::Unauthorized.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn decodes_basic_credentials() {
        let mut headers = HeaderMap::new();
        let encoded = STANDARD.encode("admin:pa:ss");
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {}", encoded)).unwrap(),
        );
        assert_eq!(
            basic_credentials(&headers),
            Some(("admin".to_string(), "pa:ss".to_string()))
        );
    }

    fn admin() -> AdminCredentials {
        AdminCredentials {
            username: "admin".to_string(),
            password: "correct horse".to_string(),
        }
    }

    #[test]
    fn matching_credentials_are_accepted() {
        assert!(credentials_match(&admin(), "admin", "correct horse"));
    }

    #[test]
    fn wrong_password_of_same_length_is_rejected() {
        assert_eq!("correct horse".len(), "correct horsf".len());
        assert!(!credentials_match(&admin(), "admin", "correct horsf"));
        assert!(!credentials_match(&admin(), "admin", "correct"));
        assert!(!credentials_match(&admin(), "admim", "correct horse"));
    }

    #[test]
    fn rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(basic_credentials(&headers), None);
        assert_eq!(basic_credentials(&HeaderMap::new()), None);
    }
}
