//! Feed configuration.
//!
//! Loaded once at startup from (in increasing precedence) built-in defaults,
//! `~/.config/assignfeed/config.toml` and `ASSIGNFEED_*` environment
//! variables, then passed by reference to everything that needs it.

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{FeedError, FeedResult};
use crate::models::CourseId;

const ENV_PREFIX: &str = "ASSIGNFEED";

static DEFAULT_ENROLLMENT_STATE: &str = "active";
static DEFAULT_LISTEN: &str = "127.0.0.1:8080";

fn default_per_page() -> u32 {
    100
}

fn default_enrollment_state() -> String {
    DEFAULT_ENROLLMENT_STATE.to_string()
}

fn default_max_pages() -> usize {
    100
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

#[derive(Serialize, Deserialize, Clone)]
pub struct FeedConfig {
    /// Root of the Canvas instance, e.g. `https://school.instructure.com`.
    #[serde(default)]
    pub base_url: String,

    /// Personal access token sent as a bearer token.
    #[serde(default)]
    pub access_token: String,

    #[serde(default = "default_per_page")]
    pub per_page: u32,

    #[serde(default = "default_enrollment_state")]
    pub enrollment_state: String,

    /// Upper bound on pages followed for a single collection.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Address the feed server binds to.
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl fmt::Debug for FeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("per_page", &self.per_page)
            .field("enrollment_state", &self.enrollment_state)
            .field("max_pages", &self.max_pages)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("listen", &self.listen)
            .finish()
    }
}

impl FeedConfig {
    pub fn config_path() -> FeedResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FeedError::Config("Could not determine config directory".into()))?
            .join("assignfeed");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from an explicit file (which must exist) or the default path
    /// (which may not), with environment overrides on top.
    pub fn load(path: Option<&Path>) -> FeedResult<Self> {
        let file = match path {
            Some(path) => File::from(path.to_path_buf())
                .format(FileFormat::Toml)
                .required(true),
            None => File::from(Self::config_path()?)
                .format(FileFormat::Toml)
                .required(false),
        };

        let builder = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        Self::build(builder)
    }

    /// Parse a TOML document without consulting the filesystem or environment.
    pub fn from_toml_str(contents: &str) -> FeedResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(contents, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> FeedResult<Self> {
        let config: FeedConfig = builder
            .build()
            .map_err(|e| FeedError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| FeedError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FeedResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(FeedError::Config(format!(
                "base_url is not set (config file or {ENV_PREFIX}_BASE_URL)"
            )));
        }

        let base = Url::parse(&self.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(FeedError::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        if self.access_token.trim().is_empty() {
            return Err(FeedError::Config(format!(
                "access_token is not set (config file or {ENV_PREFIX}_ACCESS_TOKEN)"
            )));
        }

        if self.per_page == 0 {
            return Err(FeedError::Config("per_page must be at least 1".into()));
        }

        if self.max_pages == 0 {
            return Err(FeedError::Config("max_pages must be at least 1".into()));
        }

        Ok(())
    }

    /// `GET /api/v1/courses?enrollment_state=..&per_page=..`
    pub fn courses_url(&self) -> FeedResult<Url> {
        let mut url = self.api_url(&["courses"])?;
        url.query_pairs_mut()
            .append_pair("enrollment_state", &self.enrollment_state)
            .append_pair("per_page", &self.per_page.to_string());
        Ok(url)
    }

    /// `GET /api/v1/courses/:id/assignments?per_page=..`
    pub fn assignments_url(&self, course_id: &CourseId) -> FeedResult<Url> {
        let id = course_id.to_string();
        let mut url = self.api_url(&["courses", &id, "assignments"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string());
        Ok(url)
    }

    fn api_url(&self, segments: &[&str]) -> FeedResult<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| FeedError::Config(format!("base_url '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(segments);
        Ok(url)
    }

    /// Copy safe to print: the access token is masked.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if !config.access_token.is_empty() {
            config.access_token = "<redacted>".to_string();
        }
        config
    }

    /// Create a config file with every option commented out.
    pub fn create_default_config(path: &Path) -> FeedResult<()> {
        let contents = format!(
            "\
# assignfeed configuration
# Every key can also be set through the environment, e.g. {ENV_PREFIX}_ACCESS_TOKEN.

# Your Canvas instance:
# base_url = \"https://school.instructure.com\"

# Canvas -> Account -> Settings -> New Access Token (tokens expire, ~120 days):
# access_token = \"\"

# per_page = {}
# enrollment_state = \"{}\"
# max_pages = {}
# request_timeout_secs = {}

# Address for assignfeed-server:
# listen = \"{}\"
",
            default_per_page(),
            DEFAULT_ENROLLMENT_STATE,
            default_max_pages(),
            default_request_timeout_secs(),
            DEFAULT_LISTEN,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that call `load` read the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const MINIMAL: &str = r#"
        base_url = "https://school.instructure.com"
        access_token = "secret-token"
    "#;

    #[test]
    fn test_defaults_fill_optional_keys() {
        let config = FeedConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.per_page, 100);
        assert_eq!(config.enrollment_state, "active");
        assert_eq!(config.max_pages, 100);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.listen, "127.0.0.1:8080");
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let err = FeedConfig::from_toml_str(r#"base_url = "https://school.instructure.com""#)
            .unwrap_err();

        assert!(
            matches!(err, FeedError::Config(ref msg) if msg.contains("access_token")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let err = FeedConfig::from_toml_str(
            r#"
            base_url = "ftp://school.example"
            access_token = "t"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, FeedError::Config(_)), "unexpected error: {err}");
    }

    #[test]
    fn test_courses_url_carries_query() {
        let config = FeedConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(
            config.courses_url().unwrap().as_str(),
            "https://school.instructure.com/api/v1/courses?enrollment_state=active&per_page=100"
        );
    }

    #[test]
    fn test_assignments_url_keeps_base_path() {
        let mut config = FeedConfig::from_toml_str(MINIMAL).unwrap();
        config.base_url = "https://lms.example.edu/canvas/".to_string();
        config.per_page = 50;

        let url = config.assignments_url(&CourseId::Number(42)).unwrap();

        assert_eq!(
            url.as_str(),
            "https://lms.example.edu/canvas/api/v1/courses/42/assignments?per_page=50"
        );
    }

    #[test]
    fn test_debug_never_prints_token() {
        let config = FeedConfig::from_toml_str(MINIMAL).unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
        assert!(!config.redacted().access_token.contains("secret-token"));
    }

    #[test]
    fn test_default_config_file_loads_as_unconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        FeedConfig::create_default_config(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();

        // Everything is commented out, so validation reports the missing URL.
        let err = FeedConfig::from_toml_str(&contents).unwrap_err();
        assert!(matches!(err, FeedError::Config(ref msg) if msg.contains("base_url")));
    }

    #[test]
    fn test_default_config_unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let err = FeedConfig::create_default_config(&blocker.join("config.toml")).unwrap_err();
        assert!(matches!(err, FeedError::Io(_)), "unexpected error: {err}");
    }

    #[test]
    fn test_load_reads_explicit_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            base_url = "https://school.instructure.com"
            access_token = "file-token"
            per_page = 25
            "#,
        )
        .unwrap();

        let config = FeedConfig::load(Some(&path)).unwrap();

        assert_eq!(config.base_url, "https://school.instructure.com");
        assert_eq!(config.access_token, "file-token");
        assert_eq!(config.per_page, 25);
        assert_eq!(config.max_pages, 100);
    }

    #[test]
    fn test_env_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            base_url = "https://school.instructure.com"
            access_token = "file-token"
            max_pages = 3
            "#,
        )
        .unwrap();

        // SAFETY: ENV_LOCK serializes every test touching these variables.
        unsafe {
            std::env::set_var("ASSIGNFEED_MAX_PAGES", "7");
            std::env::set_var("ASSIGNFEED_ENROLLMENT_STATE", "completed");
        }
        let loaded = FeedConfig::load(Some(&path));
        unsafe {
            std::env::remove_var("ASSIGNFEED_MAX_PAGES");
            std::env::remove_var("ASSIGNFEED_ENROLLMENT_STATE");
        }

        let config = loaded.unwrap();
        assert_eq!(config.max_pages, 7);
        assert_eq!(config.enrollment_state, "completed");
        assert_eq!(config.access_token, "file-token");
    }

    #[test]
    fn test_load_missing_explicit_file_is_config_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();

        let err = FeedConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, FeedError::Config(_)), "unexpected error: {err}");
    }
}
