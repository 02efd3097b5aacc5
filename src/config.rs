use std::env;

/// Handle used when GH_USER is unset or blank.
pub const DEFAULT_HANDLE: &str = "octocat";

#[derive(Debug, Clone)]
pub struct Config {
    /// Account handle that scopes every API request.
    pub handle: String,
    /// Bearer token; `None` means the Authorization header is omitted.
    pub token: Option<String>,
}

impl Config {
    /// Read configuration from GH_USER and GITHUB_TOKEN.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            handle: non_blank(env::var("GH_USER").ok())
                .unwrap_or_else(|| DEFAULT_HANDLE.to_string()),
            token: non_blank(env::var("GITHUB_TOKEN").ok()),
        }
    }
}

/// Trims the value and rejects empty results, so a variable set to
/// whitespace behaves the same as an unset one.
fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let v = v.trim();
        if v.is_empty() {
            None
        } else {
            Some(v.to_string())
        }
    })
}
