use worker::*;

use crate::models::User;
use crate::platform::PlatformClient;

use super::SESSION_COOKIE;

/// A resolved session: the account record plus the secret that proved it,
/// which session-scoped platform calls need again.
pub struct AuthedUser {
    pub user: User,
    pub session: String,
}

/// Authentication middleware for protected routes
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Resolve the current user by looking the session secret up against the
    /// platform's account endpoint. No cookie or a rejected secret is
    /// absence, not an error.
    pub async fn get_user(req: &Request, env: &Env) -> Result<Option<AuthedUser>> {
        let secret = match get_cookie(req, SESSION_COOKIE) {
            Some(secret) => secret,
            None => return Ok(None),
        };

        let platform = PlatformClient::from_env(env)?;
        Ok(platform
            .get_account(&secret)
            .await?
            .map(|user| AuthedUser {
                user,
                session: secret,
            }))
    }

    /// Require authentication, returning the sign-in redirect if absent
    pub async fn require_auth(
        req: &Request,
        env: &Env,
    ) -> Result<std::result::Result<AuthedUser, Response>> {
        match Self::get_user(req, env).await? {
            Some(authed) => Ok(Ok(authed)),
            None => {
                let headers = Headers::new();
                headers.set("Location", "/sign-in")?;
                let response = Response::empty()?.with_status(302).with_headers(headers);
                Ok(Err(response))
            }
        }
    }
}

pub(crate) fn get_cookie(req: &Request, name: &str) -> Option<String> {
    let header = req.headers().get("Cookie").ok()??;
    cookie_from_header(&header, name)
}

fn cookie_from_header(header: &str, name: &str) -> Option<String> {
    for part in header.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(name) {
            if let Some(value) = value.strip_prefix('=') {
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_is_found_among_others() {
        let header = "theme=dark; session=abc123; lang=en";
        assert_eq!(
            cookie_from_header(header, "session"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn empty_cookie_counts_as_absent() {
        assert_eq!(cookie_from_header("session=", "session"), None);
        assert_eq!(cookie_from_header("", "session"), None);
    }

    #[test]
    fn cookie_name_must_match_exactly() {
        // "session" must not match the "old_session" cookie value.
        let header = "old_session=stale";
        assert_eq!(cookie_from_header(header, "session"), None);
    }
}
