mod dashboard;
mod files;

pub use dashboard::dashboard;
pub use files::{close_file_menu, delete_file, file_menu, files_page, rename_file, share_file};

use worker::*;

/// Root route - hand off to the dashboard; the guard bounces signed-out
/// visitors to the sign-in page.
pub fn home(_req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    let headers = Headers::new();
    headers.set("Location", "/dashboard")?;
    Response::empty()
        .map(|r| r.with_status(302))
        .map(|r| r.with_headers(headers))
}

/// Health check endpoint
pub fn health(_req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    Response::ok("OK")
}

/// Serve icons and chrome imagery from R2
pub async fn serve_static(_req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let path = ctx.param("path").unwrap_or(&"".to_string()).clone();

    let bucket = ctx.env.bucket("ASSETS")?;
    let object = bucket.get(&path).execute().await?;

    match object {
        Some(obj) => {
            let body = obj.body().ok_or("No body")?;
            let bytes = body.bytes().await?;

            let headers = Headers::new();
            headers.set("Content-Type", content_type_for(&path))?;
            headers.set("Cache-Control", "public, max-age=31536000")?;

            Ok(Response::from_bytes(bytes)?.with_headers(headers))
        }
        None => Response::error("Not found", 404),
    }
}

fn content_type_for(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("css") => "text/css",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_the_extension() {
        assert_eq!(content_type_for("icons/file-image.svg"), "image/svg+xml");
        assert_eq!(content_type_for("logo.png"), "image/png");
        assert_eq!(content_type_for("README"), "application/octet-stream");
    }
}
