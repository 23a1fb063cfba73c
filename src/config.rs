use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Runtime settings for the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the generation service (default: "http://localhost:8000")
    pub api_url: String,

    /// Directory downloads are written to (default: the user's download
    /// directory, else the current directory)
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            output_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

impl Config {
    /// Load configuration from `CODEGEN_API_URL` and `CODEGEN_OUTPUT_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();

        Self {
            api_url: lookup("CODEGEN_API_URL")
                .filter(|v| !v.trim().is_empty())
                .map(|v| normalize_base_url(&v))
                .unwrap_or(default.api_url),

            output_dir: lookup("CODEGEN_OUTPUT_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default.output_dir),
        }
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, api_url: Option<String>, output_dir: Option<PathBuf>) -> Self {
        if let Some(url) = api_url {
            self.api_url = normalize_base_url(&url);
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
