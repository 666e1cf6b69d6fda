use futures::future;
use worker::*;

use crate::auth::AuthMiddleware;
use crate::models::usage_summary;
use crate::platform::PlatformClient;
use crate::templates;

const RECENT_LIMIT: u32 = 10;

/// Dashboard page - requires authentication.
///
/// The recent-files listing and the usage aggregate are independent platform
/// reads; they are issued together and joined, and either failing fails the
/// whole render.
pub async fn dashboard(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    // Check authentication
    let authed = match AuthMiddleware::require_auth(&req, &ctx.env).await? {
        Ok(authed) => authed,
        Err(redirect) => return Ok(redirect),
    };

    let platform = PlatformClient::from_env(&ctx.env)?;
    let (recent, total) = future::try_join(
        platform.list_files(&authed.session, &[], RECENT_LIMIT),
        platform.total_space_used(&authed.session),
    )
    .await?;

    let summary = usage_summary(&total);
    let content = templates::render_dashboard(&total, &summary, &recent.documents);

    Response::from_html(templates::render_app_shell(
        &authed.user,
        "Dashboard - Cubby",
        &content,
    ))
}
