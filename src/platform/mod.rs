use serde::de::DeserializeOwned;
use serde_json::json;
use worker::*;

use crate::models::{FileCategory, FileDoc, FileList, SessionCreated, TotalSpace, User};

const ACCOUNT_PATH: &str = "/v1/account";
const SESSIONS_PATH: &str = "/v1/account/sessions";
const FILES_PATH: &str = "/v1/files";
const USAGE_PATH: &str = "/v1/files/usage";

/// Client for the hosted storage platform. Holds no credentials of its own;
/// session-scoped calls take the secret from the caller's cookie.
pub struct PlatformClient {
    endpoint: String,
    project: String,
}

impl PlatformClient {
    pub fn from_env(env: &Env) -> Result<Self> {
        let endpoint = env.var("PLATFORM_ENDPOINT")?.to_string();
        let project = env.var("PLATFORM_PROJECT")?.to_string();
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project,
        })
    }

    /// Resolve the account behind a session secret. A rejected secret is
    /// absence, not an error; the guard turns it into a redirect.
    pub async fn get_account(&self, session: &str) -> Result<Option<User>> {
        let mut response = self
            .send(Method::Get, ACCOUNT_PATH, Some(session), None)
            .await?;

        match response.status_code() {
            200 => Ok(Some(response.json().await?)),
            401 | 403 => Ok(None),
            status => Err(self.unexpected(status, ACCOUNT_PATH)),
        }
    }

    /// Exchange credentials for a session. Rejected credentials are absence.
    pub async fn create_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<SessionCreated>> {
        let body = json!({ "email": email, "password": password });
        let mut response = self
            .send(Method::Post, SESSIONS_PATH, None, Some(&body))
            .await?;

        match response.status_code() {
            200 | 201 => Ok(Some(response.json().await?)),
            401 => Ok(None),
            status => Err(self.unexpected(status, SESSIONS_PATH)),
        }
    }

    /// Best-effort session teardown; a failure here only means the platform
    /// will expire the session on its own.
    pub async fn delete_session(&self, session: &str) -> Result<()> {
        let path = format!("{}/current", SESSIONS_PATH);
        let response = self.send(Method::Delete, &path, Some(session), None).await?;
        if response.status_code() >= 400 {
            console_log!(
                "session teardown returned {} (ignored)",
                response.status_code()
            );
        }
        Ok(())
    }

    pub async fn list_files(
        &self,
        session: &str,
        types: &[FileCategory],
        limit: u32,
    ) -> Result<FileList> {
        let path = format!("{}?{}", FILES_PATH, list_query(types, limit));
        self.expect_json(Method::Get, &path, session, None).await
    }

    pub async fn total_space_used(&self, session: &str) -> Result<TotalSpace> {
        self.expect_json(Method::Get, USAGE_PATH, session, None).await
    }

    pub async fn get_file(&self, session: &str, id: &str) -> Result<Option<FileDoc>> {
        let path = file_path(id);
        let mut response = self.send(Method::Get, &path, Some(session), None).await?;

        match response.status_code() {
            200 => Ok(Some(response.json().await?)),
            404 => Ok(None),
            status => Err(self.unexpected(status, &path)),
        }
    }

    pub async fn rename_file(&self, session: &str, id: &str, name: &str) -> Result<FileDoc> {
        let body = json!({ "name": name });
        self.expect_json(Method::Patch, &file_path(id), session, Some(&body))
            .await
    }

    pub async fn share_file(&self, session: &str, id: &str, email: &str) -> Result<FileDoc> {
        let body = json!({ "share_with": email });
        self.expect_json(Method::Patch, &file_path(id), session, Some(&body))
            .await
    }

    pub async fn delete_file(&self, session: &str, id: &str) -> Result<()> {
        let path = file_path(id);
        let response = self.send(Method::Delete, &path, Some(session), None).await?;

        match response.status_code() {
            // 404 means someone else already deleted it; same outcome.
            200 | 204 | 404 => Ok(()),
            status => Err(self.unexpected(status, &path)),
        }
    }

    async fn expect_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        session: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let mut response = self.send(method, path, Some(session), body).await?;
        match response.status_code() {
            200 | 201 => response.json().await,
            status => Err(self.unexpected(status, path)),
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        session: Option<&str>,
        body: Option<&serde_json::Value>,
    ) -> Result<Response> {
        let headers = Headers::new();
        headers.set("Accept", "application/json")?;
        headers.set("X-Storage-Project", &self.project)?;
        if let Some(secret) = session {
            headers.set("X-Storage-Session", secret)?;
        }

        let mut init = RequestInit::new();
        init.with_method(method);

        if let Some(body) = body {
            headers.set("Content-Type", "application/json")?;
            init.with_body(Some(wasm_bindgen::JsValue::from_str(&body.to_string())));
        }
        init.with_headers(headers);

        let url = format!("{}{}", self.endpoint, path);
        let request = Request::new_with_init(&url, &init)?;
        Fetch::Request(request).send().await
    }

    fn unexpected(&self, status: u16, path: &str) -> Error {
        console_error!("platform returned {} for {}{}", status, self.endpoint, path);
        Error::RustError(format!("platform returned {} for {}", status, path))
    }
}

fn file_path(id: &str) -> String {
    format!("{}/{}", FILES_PATH, urlencoding::encode(id))
}

fn list_query(types: &[FileCategory], limit: u32) -> String {
    let mut query = format!("limit={}", limit);
    if !types.is_empty() {
        let joined = types
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        query.push_str("&types=");
        query.push_str(&urlencoding::encode(&joined));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_without_types_has_only_limit() {
        assert_eq!(list_query(&[], 10), "limit=10");
    }

    #[test]
    fn list_query_encodes_joined_types() {
        let query = list_query(&[FileCategory::Document, FileCategory::Image], 50);
        assert_eq!(query, "limit=50&types=document%2Cimage");
    }

    #[test]
    fn file_path_encodes_the_id() {
        assert_eq!(file_path("abc123"), "/v1/files/abc123");
        assert_eq!(file_path("a b"), "/v1/files/a%20b");
    }
}
