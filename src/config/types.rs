use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration structure for Skraper
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// same defaults the command line uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl traversal limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum link hops from the seed (0 = seed only)
    pub max_depth: u32,

    /// Maximum number of pages visited in one crawl
    pub page_limit: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 0,
            page_limit: 100,
        }
    }
}

/// HTTP client behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// Custom User-Agent string; the crate name and version when unset
    pub user_agent: Option<String>,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,

    /// Accepted for compatibility; robots.txt is not consulted either way
    pub ignore_robots: bool,

    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            ignore_robots: false,
            headers: BTreeMap::new(),
        }
    }
}

impl HttpConfig {
    /// The User-Agent header value actually sent
    pub fn effective_user_agent(&self) -> String {
        match &self.user_agent {
            Some(agent) => agent.clone(),
            None => format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Root directory for extracted data
    pub output_dir: PathBuf,

    /// Logical file name; hashed into the on-disk name
    pub file_name: String,

    /// Directory for downloaded images and videos
    pub media_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./"),
            file_name: "output".to_string(),
            media_dir: PathBuf::from("./media"),
        }
    }
}
