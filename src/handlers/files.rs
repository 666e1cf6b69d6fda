use worker::*;

use crate::auth::AuthMiddleware;
use crate::models::FileCategory;
use crate::platform::PlatformClient;
use crate::templates;

const LISTING_LIMIT: u32 = 50;

/// Filtered listing page - target of the summary card and sidebar links.
/// An absent or unknown `type` parameter lists every category.
pub async fn files_page(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    // Check authentication
    let authed = match AuthMiddleware::require_auth(&req, &ctx.env).await? {
        Ok(authed) => authed,
        Err(redirect) => return Ok(redirect),
    };

    let url = req.url()?;
    let category = url
        .query_pairs()
        .find(|(key, _)| key == "type")
        .and_then(|(_, value)| FileCategory::parse(&value));

    let types: Vec<FileCategory> = category.into_iter().collect();

    let platform = PlatformClient::from_env(&ctx.env)?;
    let list = platform
        .list_files(&authed.session, &types, LISTING_LIMIT)
        .await?;

    let title = category.map(|c| c.title()).unwrap_or("All Files");
    let content = templates::render_files_page(category, &list);

    Response::from_html(templates::render_app_shell(
        &authed.user,
        &format!("{} - Cubby", title),
        &content,
    ))
}

/// Dropdown partial for a file row (rename / share / delete)
pub async fn file_menu(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let authed = match AuthMiddleware::require_auth(&req, &ctx.env).await? {
        Ok(authed) => authed,
        Err(redirect) => return Ok(redirect),
    };

    let file_id = ctx.param("id").ok_or("Missing file ID")?;

    let platform = PlatformClient::from_env(&ctx.env)?;
    match platform.get_file(&authed.session, file_id).await? {
        Some(file) => Response::from_html(templates::render_file_menu(&file)),
        None => Response::error("File not found", 404),
    }
}

/// Close the dropdown (empties the menu slot)
pub fn close_file_menu(_req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    Response::from_html("")
}

/// Rename a file, returning the re-rendered row
pub async fn rename_file(mut req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let authed = match AuthMiddleware::require_auth(&req, &ctx.env).await? {
        Ok(authed) => authed,
        Err(redirect) => return Ok(redirect),
    };

    let file_id = ctx.param("id").ok_or("Missing file ID")?.clone();

    let name = match form_field(&mut req, "name").await? {
        Some(name) => name,
        None => return Response::error("Missing name", 400),
    };

    let platform = PlatformClient::from_env(&ctx.env)?;
    let file = platform.rename_file(&authed.session, &file_id, &name).await?;

    Response::from_html(templates::render_file_row(&file))
}

/// Share a file with another account, returning the re-rendered row
pub async fn share_file(mut req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let authed = match AuthMiddleware::require_auth(&req, &ctx.env).await? {
        Ok(authed) => authed,
        Err(redirect) => return Ok(redirect),
    };

    let file_id = ctx.param("id").ok_or("Missing file ID")?.clone();

    let email = match form_field(&mut req, "email").await? {
        Some(email) => email,
        None => return Response::error("Missing email", 400),
    };

    let platform = PlatformClient::from_env(&ctx.env)?;
    let file = platform.share_file(&authed.session, &file_id, &email).await?;

    Response::from_html(templates::render_file_row(&file))
}

/// Delete a file. The empty response swaps the row out of the list.
pub async fn delete_file(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let authed = match AuthMiddleware::require_auth(&req, &ctx.env).await? {
        Ok(authed) => authed,
        Err(redirect) => return Ok(redirect),
    };

    let file_id = ctx.param("id").ok_or("Missing file ID")?;

    let platform = PlatformClient::from_env(&ctx.env)?;
    platform.delete_file(&authed.session, file_id).await?;

    Response::from_html("")
}

async fn form_field(req: &mut Request, name: &str) -> Result<Option<String>> {
    let form = req.form_data().await?;
    Ok(match form.get(name) {
        Some(FormEntry::Field(value)) if !value.trim().is_empty() => Some(value),
        _ => None,
    })
}
