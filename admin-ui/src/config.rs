const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Build-time settings. Set `ADMIN_API_BASE_URL` / `ADMIN_ACCOUNTS_PAGE_SIZE`
/// when invoking `trunk build` to point the dashboard elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    pub api_base_url: String,
    pub page_size: u32,
}

impl UiConfig {
    pub fn from_build_env() -> Self {
        Self::from_parts(
            option_env!("ADMIN_API_BASE_URL"),
            option_env!("ADMIN_ACCOUNTS_PAGE_SIZE"),
        )
    }

    pub fn from_parts(base_url: Option<&str>, page_size: Option<&str>) -> Self {
        let api_base_url = base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let page_size = page_size
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            api_base_url,
            page_size,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}
