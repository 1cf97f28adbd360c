//! Layered settings.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. Optional TOML file passed with `--config`
//! 3. `POSTVIEW_*` environment variables
//! 4. Command-line flags
//!
//! ```toml
//! base_url = "https://jsonplaceholder.typicode.com"
//! posts_per_page = 10
//! request_timeout_secs = 15
//! log_file = "/tmp/postview.log"
//! log_level = "debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::source::DEFAULT_BASE_URL;

/// Page size used when nothing else is configured.
pub const DEFAULT_POSTS_PER_PAGE: usize = 10;

/// Resolved application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root of the posts API, without trailing slash.
    pub base_url: String,
    /// Posts shown per page. Fixed for the lifetime of the process.
    pub posts_per_page: usize,
    /// Per-request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Where TUI mode writes its log.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub log_level: String,
}

/// Values taken from the command line, applied on top of every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub posts_per_page: Option<usize>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from defaults, an optional file, the environment and
    /// command-line overrides.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("posts_per_page", DEFAULT_POSTS_PER_PAGE as i64)?
            .set_default("log_level", "info")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder
            .add_source(Environment::with_prefix("POSTVIEW").try_parsing(true))
            .set_override_option("base_url", overrides.base_url.clone())?
            .set_override_option(
                "posts_per_page",
                overrides.posts_per_page.map(|n| n as i64),
            )?
            .set_override_option(
                "log_file",
                overrides
                    .log_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?;

        let settings: Settings = builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        settings.validated()
    }

    fn validated(mut self) -> Result<Self> {
        if self.posts_per_page == 0 {
            bail!("posts_per_page must be at least 1");
        }
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if self.base_url.is_empty() {
            bail!("base_url must not be empty");
        }
        Ok(self)
    }

    /// Request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Log file path, falling back to `postview.log` in the temp directory.
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("postview.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::Builder;

    /// Held by every test that loads settings, since the environment is
    /// shared by the whole test process.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sets an environment variable until dropped.
    struct ScopedEnv(&'static str);

    impl ScopedEnv {
        fn set(key: &'static str, value: &str) -> Self {
            std::env::set_var(key, value);
            Self(key)
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            std::env::remove_var(self.0);
        }
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let _lock = env_lock();
        let settings = Settings::load(None, &Overrides::default()).unwrap();
        assert_eq!(settings.posts_per_page, DEFAULT_POSTS_PER_PAGE);
        assert!(settings.request_timeout().is_none());
        assert!(settings.log_path().ends_with("postview.log"));
    }

    #[test]
    fn test_file_values() {
        let _lock = env_lock();
        let file = toml_file(
            r#"
            base_url = "http://localhost:3000/"
            posts_per_page = 5
            request_timeout_secs = 7
            log_level = "debug"
            "#,
        );

        let settings = Settings::load(Some(file.path()), &Overrides::default()).unwrap();
        assert_eq!(settings.base_url, "http://localhost:3000");
        assert_eq!(settings.posts_per_page, 5);
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(7)));
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_overrides_beat_file() {
        let _lock = env_lock();
        let file = toml_file("posts_per_page = 5\n");
        let overrides = Overrides {
            base_url: Some("http://override.test".to_string()),
            posts_per_page: Some(3),
            log_file: Some(PathBuf::from("/tmp/custom.log")),
        };

        let settings = Settings::load(Some(file.path()), &overrides).unwrap();
        assert_eq!(settings.base_url, "http://override.test");
        assert_eq!(settings.posts_per_page, 3);
        assert_eq!(settings.log_path(), PathBuf::from("/tmp/custom.log"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let _lock = env_lock();
        let overrides = Overrides {
            posts_per_page: Some(0),
            ..Default::default()
        };
        let err = Settings::load(None, &overrides).unwrap_err();
        assert!(err.to_string().contains("posts_per_page"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let _lock = env_lock();
        let result = Settings::load(
            Some(Path::new("/nonexistent/postview.toml")),
            &Overrides::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_env_sits_between_file_and_overrides() {
        let _lock = env_lock();
        let file = toml_file("posts_per_page = 5\nlog_level = \"debug\"\n");
        let _env = ScopedEnv::set("POSTVIEW_POSTS_PER_PAGE", "7");

        let settings = Settings::load(Some(file.path()), &Overrides::default()).unwrap();
        assert_eq!(settings.posts_per_page, 7);
        assert_eq!(settings.log_level, "debug");

        let overrides = Overrides {
            posts_per_page: Some(3),
            ..Default::default()
        };
        let settings = Settings::load(Some(file.path()), &overrides).unwrap();
        assert_eq!(settings.posts_per_page, 3);
    }
}
