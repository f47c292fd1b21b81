use crate::session::SessionToken;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderValue},
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::convert::Infallible;
use tracing::debug;

pub const COOKIE_SESSION_TOKEN_KEY: &str = "dashboard_session";
pub const HEADER_SESSION_TOKEN_KEY: &str = "X-Dashboard-Session";

/// The dashboard session a request belongs to.
///
/// Requests without a token get a freshly generated one; handlers that store
/// state hand it back to the client through [`DashboardSession::response_headers`].
#[derive(Debug, Clone)]
pub struct DashboardSession {
    pub token: SessionToken,
    pub is_new: bool,
}

impl DashboardSession {
    pub fn response_headers(&self) -> SessionHeaders {
        SessionHeaders(self.token.clone())
    }
}

fn extract_session_token_from_cookies(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(COOKIE_SESSION_TOKEN_KEY)
        .map(Cookie::value)
        .map(|s| s.to_string())
}

fn extract_session_token_from_headers(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(HEADER_SESSION_TOKEN_KEY)
        .map(|v| v.as_bytes().to_owned())
        .map(|b| String::from_utf8_lossy(&b).into_owned())
}

impl<S> FromRequestParts<S> for DashboardSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_session_token_from_cookies(parts)
            .or_else(|| extract_session_token_from_headers(parts))
            .filter(|token| !token.trim().is_empty());

        Ok(match token {
            Some(token) => DashboardSession {
                token: SessionToken(token),
                is_new: false,
            },
            None => {
                debug!("No session token in cookies nor headers, generating one.");
                DashboardSession {
                    token: SessionToken::generate(),
                    is_new: true,
                }
            }
        })
    }
}

/// Sets the session cookie and echoes the token in the session header.
pub struct SessionHeaders(SessionToken);

impl IntoResponseParts for SessionHeaders {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        let cookie = Cookie::build(Cookie::new(
            COOKIE_SESSION_TOKEN_KEY,
            self.0.as_str().to_owned(),
        ))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

        if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
            res.headers_mut()
                .append(axum::http::header::SET_COOKIE, value);
        }
        if let Ok(value) = HeaderValue::from_str(self.0.as_str()) {
            res.headers_mut().insert(HEADER_SESSION_TOKEN_KEY, value);
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> DashboardSession {
        let (mut parts, _) = request.into_parts();
        DashboardSession::from_request_parts(&mut parts, &())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn reads_token_from_cookie() {
        let request = Request::builder()
            .header("cookie", format!("{}=abc123", COOKIE_SESSION_TOKEN_KEY))
            .body(())
            .unwrap();
        let session = extract(request).await;
        assert_eq!(session.token.as_str(), "abc123");
        assert!(!session.is_new);
    }

    #[tokio::test]
    async fn cookie_takes_precedence_over_header() {
        let request = Request::builder()
            .header("cookie", format!("{}=from-cookie", COOKIE_SESSION_TOKEN_KEY))
            .header(HEADER_SESSION_TOKEN_KEY, "from-header")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.token.as_str(), "from-cookie");
    }

    #[tokio::test]
    async fn reads_token_from_header() {
        let request = Request::builder()
            .header(HEADER_SESSION_TOKEN_KEY, "xyz")
            .body(())
            .unwrap();
        let session = extract(request).await;
        assert_eq!(session.token.as_str(), "xyz");
        assert!(!session.is_new);
    }

    #[tokio::test]
    async fn generates_token_when_missing() {
        let session = extract(Request::builder().body(()).unwrap()).await;
        assert!(session.is_new);
        assert_eq!(session.token.as_str().len(), 32);
    }
}
