use serde::{Deserialize, Serialize};

/// Account record as returned by the platform's account endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub account_id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl User {
    /// Name shown in the header chrome; falls back to the email local part.
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

/// Response from the platform's session-create endpoint. The secret is the
/// only credential this layer ever holds, and only inside the cookie.
#[derive(Debug, Deserialize)]
pub struct SessionCreated {
    pub secret: String,
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_name() {
        let user = User {
            id: "u1".to_string(),
            account_id: "a1".to_string(),
            email: "kay@example.com".to_string(),
            name: Some("Kay".to_string()),
        };
        assert_eq!(user.display_name(), "Kay");
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        let user = User {
            id: "u1".to_string(),
            account_id: "a1".to_string(),
            email: "kay@example.com".to_string(),
            name: None,
        };
        assert_eq!(user.display_name(), "kay");
    }

    #[test]
    fn account_payload_without_name_deserializes() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","account_id":"a1","email":"kay@example.com"}"#,
        )
        .unwrap();
        assert!(user.name.is_none());
    }
}
