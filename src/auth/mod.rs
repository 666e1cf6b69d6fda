mod middleware;

pub use middleware::{AuthMiddleware, AuthedUser};

use worker::*;

use crate::platform::PlatformClient;
use crate::templates;

pub const SESSION_COOKIE: &str = "session";
const STATE_COOKIE: &str = "signin_state";
const SESSION_MAX_AGE: u64 = 7 * 24 * 60 * 60;

/// Render the sign-in form. The state token is set as a short-lived cookie
/// and embedded in the form so the POST can prove it came from this page.
pub fn sign_in_page(_req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    let state = generate_state();

    let headers = Headers::new();
    headers.set(
        "Set-Cookie",
        &format!(
            "{}={}; HttpOnly; Secure; SameSite=Lax; Max-Age=600",
            STATE_COOKIE, state
        ),
    )?;

    Response::from_html(templates::render_sign_in(&state, None)).map(|r| r.with_headers(headers))
}

/// Exchange submitted credentials for a platform session.
pub async fn sign_in_submit(mut req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let form = req.form_data().await?;

    let state = match field(&form, "state") {
        Some(state) => state,
        None => return Response::error("Missing state parameter", 400),
    };
    let cookie_state = middleware::get_cookie(&req, STATE_COOKIE);
    if cookie_state.as_deref() != Some(state.as_str()) {
        return Response::error("Invalid state parameter", 400);
    }

    let (email, password) = match (field(&form, "email"), field(&form, "password")) {
        (Some(email), Some(password)) => (email, password),
        _ => return Response::error("Missing credentials", 400),
    };

    let platform = PlatformClient::from_env(&ctx.env)?;
    let session = match platform.create_session(&email, &password).await? {
        Some(session) => session,
        None => {
            // Rejected credentials: fresh form, fresh state pairing.
            let state = generate_state();
            let headers = Headers::new();
            headers.set(
                "Set-Cookie",
                &format!(
                    "{}={}; HttpOnly; Secure; SameSite=Lax; Max-Age=600",
                    STATE_COOKIE, state
                ),
            )?;
            return Response::from_html(templates::render_sign_in(
                &state,
                Some("Invalid email or password"),
            ))
            .map(|r| r.with_status(401).with_headers(headers));
        }
    };

    console_log!("session created for user {}", session.user_id);

    // Redirect to the dashboard with the session cookie
    let headers = Headers::new();
    headers.set("Location", "/dashboard")?;
    headers.set(
        "Set-Cookie",
        &format!(
            "{}={}; HttpOnly; Secure; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE, session.secret, SESSION_MAX_AGE
        ),
    )?;

    Response::empty()
        .map(|r| r.with_status(302))
        .map(|r| r.with_headers(headers))
}

/// Tear down the platform session and clear the cookie.
pub async fn logout(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    if let Some(secret) = middleware::get_cookie(&req, SESSION_COOKIE) {
        let platform = PlatformClient::from_env(&ctx.env)?;
        if let Err(e) = platform.delete_session(&secret).await {
            // The cookie is cleared either way; the platform expires the rest.
            console_log!("session teardown failed: {:?}", e);
        }
    }

    let headers = Headers::new();
    headers.set("Location", "/")?;
    headers.set(
        "Set-Cookie",
        &format!("{}=; HttpOnly; Secure; SameSite=Lax; Max-Age=0", SESSION_COOKIE),
    )?;

    Response::empty()
        .map(|r| r.with_status(302))
        .map(|r| r.with_headers(headers))
}

fn field(form: &FormData, name: &str) -> Option<String> {
    match form.get(name) {
        Some(FormEntry::Field(value)) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn generate_state() -> String {
    use getrandom::getrandom;
    let mut bytes = [0u8; 16];
    getrandom(&mut bytes).expect("Failed to generate random bytes");
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
