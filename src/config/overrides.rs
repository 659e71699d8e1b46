//! Setting overrides layered on top of a loaded configuration

use crate::config::types::Config;
use std::path::PathBuf;

/// Settings given as flags, either on the command line or on a script line
///
/// Unset fields leave the configuration untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub max_depth: Option<u32>,
    pub page_limit: Option<usize>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
    pub ignore_robots: bool,
    pub output_dir: Option<PathBuf>,
    pub file_name: Option<String>,
    pub media_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    /// True when no setting is overridden
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes every set field into `config`
    ///
    /// The result is not validated here; callers run [`crate::config::validate`]
    /// on the merged configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(depth) = self.max_depth {
            config.crawler.max_depth = depth;
        }
        if let Some(limit) = self.page_limit {
            config.crawler.page_limit = limit;
        }
        if let Some(agent) = &self.user_agent {
            config.http.user_agent = Some(agent.clone());
        }
        if let Some(timeout) = self.timeout_secs {
            config.http.timeout_secs = timeout;
        }
        if self.ignore_robots {
            config.http.ignore_robots = true;
        }
        if let Some(dir) = &self.output_dir {
            config.output.output_dir = dir.clone();
        }
        if let Some(name) = &self.file_name {
            config.output.file_name = name.clone();
        }
        if let Some(dir) = &self.media_dir {
            config.output.media_dir = dir.clone();
        }
    }
}
