/// Backend location used by every resource client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080/api";

    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Configured url, or the default when unset or blank.
    pub fn from_setting(setting: Option<&str>) -> Self {
        match setting.map(str::trim) {
            Some(url) if !url.is_empty() => ApiConfig::new(url),
            _ => ApiConfig::default(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig::new(Self::DEFAULT_BASE_URL)
    }
}
