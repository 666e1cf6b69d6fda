use worker::*;

mod auth;
mod handlers;
mod models;
mod platform;
mod templates;

#[event(fetch)]
async fn main(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    console_error_panic_hook::set_once();

    Router::new()
        // Public routes
        .get("/", handlers::home)
        .get("/health", handlers::health)
        // Auth routes
        .get("/sign-in", auth::sign_in_page)
        .post_async("/sign-in", auth::sign_in_submit)
        .get_async("/auth/logout", auth::logout)
        // Protected routes (dashboard and listings)
        .get_async("/dashboard", handlers::dashboard)
        .get_async("/files", handlers::files_page)
        // Per-file action menu (HTMX partials)
        .get("/files/menu/close", handlers::close_file_menu)
        .get_async("/files/:id/menu", handlers::file_menu)
        .post_async("/files/:id/rename", handlers::rename_file)
        .post_async("/files/:id/share", handlers::share_file)
        .post_async("/files/:id/delete", handlers::delete_file)
        // Static assets
        .get_async("/static/*path", handlers::serve_static)
        .run(req, env)
        .await
}
