//! Configuration loading and discovery.
//!
//! Sources are layered with figment, lowest precedence first:
//! 1. Built-in defaults
//! 2. User config: `~/.config/readshift/config.<ext>`
//! 3. Project config: `.readshift.<ext>` then `readshift.<ext>`, from the
//!    closest directory (walking up from the search root) that has any
//! 4. Explicit files, in the order given
//! 5. `READSHIFT_*` environment variables
//!
//! Where `<ext>` is one of: `toml`, `yaml`, `yml`, `json`. Within one
//! directory all matches are merged; later extensions override earlier.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use readshift_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("max plausible score: {}", config.max_plausible_score);
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::candidates::Relation;
use crate::error::{ConfigError, ConfigResult};
use crate::readability::DEFAULT_MAX_PLAUSIBLE_SCORE;

/// The configuration for readshift.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files; no file logging when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Maximum input size in bytes (default: 5 MiB).
    ///
    /// Omit to use the default. Use `disable_input_limit` to remove the limit
    /// entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    pub disable_input_limit: bool,
    /// CMU-format pronunciation lexicon. Defaults to `cmudict.dict` in the
    /// user data directory.
    pub pronouncing_dictionary: Option<Utf8PathBuf>,
    /// WordNet database directory. Defaults to `wordnet/` in the user data
    /// directory.
    pub wordnet_dir: Option<Utf8PathBuf>,
    /// Scores above this are treated as tokenization artifacts.
    pub max_plausible_score: f64,
    /// Relation of the semantic network that supplies candidates.
    pub relation: Relation,
    /// Only consider senses in the word class implied by the token's tag.
    pub match_word_class: bool,
    /// Capitalize replacements of capitalized words.
    pub preserve_case: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_dir: None,
            max_input_bytes: None,
            disable_input_limit: false,
            pronouncing_dictionary: None,
            wordnet_dir: None,
            max_plausible_score: DEFAULT_MAX_PLAUSIBLE_SCORE,
            relation: Relation::default(),
            match_word_class: false,
            preserve_case: true,
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Which configuration files were loaded.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load()`] so commands
/// can report them without re-discovering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files (e.g., from `--config`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for directory lookup and config file names.
const APP_NAME: &str = "readshift";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "READSHIFT_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    /// Stop searching upward at a directory containing this entry.
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader that reads user config and stops at `.git`.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Walk up from `path` looking for project config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/readshift/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Stop the upward search at a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Search all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file. Later files take precedence.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = self.find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // READSHIFT_RELATION=synonyms, READSHIFT_MAX_PLAUSIBLE_SCORE=110, ...
        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            relation = ?config.relation,
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Load configuration, returning an error if no config file is found.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let has_user = self.include_user_config && self.find_user_config().is_some();
        let has_project = self
            .project_search_root
            .as_ref()
            .is_some_and(|root| !self.find_project_configs(root).is_empty());
        let has_explicit = !self.explicit_files.is_empty();

        if !has_user && !has_project && !has_explicit {
            return Err(ConfigError::NotFound);
        }

        self.load()
    }

    /// All config files in the closest directory that has any, ordered
    /// dotfiles before regular files.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let base = dir.as_path();
            let found: Vec<Utf8PathBuf> = [format!(".{APP_NAME}"), APP_NAME.to_string()]
                .iter()
                .flat_map(|stem| {
                    CONFIG_EXTENSIONS
                        .iter()
                        .map(move |ext| base.join(format!("{stem}.{ext}")))
                })
                .filter(|path| path.is_file())
                .collect();

            if !found.is_empty() {
                return found;
            }

            // Checked after the config files so a config next to the marker
            // is still found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|path| path.is_file())
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// The user config directory (`~/.config/readshift/` on Linux).
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

/// The user data directory (`~/.local/share/readshift/` on Linux), where the
/// default pronunciation lexicon and WordNet database live.
pub fn user_data_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.data_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Every test that reads the environment through `load()` holds this.
    fn env_lock() -> MutexGuard<'static, ()> {
        TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn load_file(name: &str, contents: &str) -> Config {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(tmp.path().join(name)).unwrap();
        fs::write(&config_path, contents).unwrap();
        ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap()
            .0
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_dir.is_none());
        assert_eq!(config.max_plausible_score, DEFAULT_MAX_PLAUSIBLE_SCORE);
        assert_eq!(config.relation, Relation::Hypernyms);
        assert!(config.preserve_case);
        assert!(!config.match_word_class);
    }

    #[test]
    fn test_loader_builds_with_defaults() {
        let _lock = env_lock();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load()
            .unwrap();
        assert_eq!(config, Config::default());
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn toml_fields() {
        let config = load_file(
            "config.toml",
            r#"log_level = "debug"
log_dir = "/tmp/readshift"
wordnet_dir = "/opt/wordnet/dict"
max_plausible_score = 110.5
relation = "both"
match_word_class = true
preserve_case = false
"#,
        );
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.log_dir.as_ref().map(|dir| dir.as_str()),
            Some("/tmp/readshift")
        );
        assert_eq!(
            config.wordnet_dir.as_deref().map(Utf8Path::as_str),
            Some("/opt/wordnet/dict")
        );
        assert_eq!(config.max_plausible_score, 110.5);
        assert_eq!(config.relation, Relation::Both);
        assert!(config.match_word_class);
        assert!(!config.preserve_case);
    }

    #[test]
    fn yaml_and_json_formats() {
        let yaml = load_file("config.yaml", "relation: synonyms\n");
        assert_eq!(yaml.relation, Relation::Synonyms);

        let json = load_file("config.json", r#"{"pronouncing_dictionary": "/d/cmudict.dict"}"#);
        assert_eq!(
            json.pronouncing_dictionary.as_deref().map(Utf8Path::as_str),
            Some("/d/cmudict.dict")
        );
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let config: Config = serde_yaml::from_str("max_plausible_score: 99.0\n").unwrap();
        assert_eq!(config.max_plausible_score, 99.0);
        assert_eq!(config.relation, Relation::Hypernyms);
        assert!(config.preserve_case);
        assert!(config.wordnet_dir.is_none());
    }

    #[test]
    fn unknown_relation_is_rejected() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(tmp.path().join("config.toml")).unwrap();
        fs::write(&config_path, "relation = \"antonyms\"\n").unwrap();
        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().join("base.toml")).unwrap();
        let over = Utf8PathBuf::try_from(tmp.path().join("override.toml")).unwrap();
        fs::write(&base, "log_level = \"warn\"\nmax_plausible_score = 100.0\n").unwrap();
        fs::write(&over, r#"log_level = "error""#).unwrap();

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&base)
            .with_file(&over)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.max_plausible_score, 100.0);
    }

    #[test]
    fn test_project_config_discovery() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join("project");
        let sub_dir = project_dir.join("src").join("deep");
        fs::create_dir_all(&sub_dir).unwrap();
        fs::write(project_dir.join(".readshift.toml"), r#"log_level = "debug""#).unwrap();

        let sub_dir = Utf8PathBuf::try_from(sub_dir).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&sub_dir)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn test_boundary_marker_stops_search() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();
        fs::write(parent.join(".readshift.toml"), r#"log_level = "warn""#).unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let work = Utf8PathBuf::try_from(work).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(&work)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn dotfile_before_regular_file() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".readshift.toml"), "relation = \"synonyms\"\n").unwrap();
        fs::write(tmp.path().join("readshift.toml"), "relation = \"both\"\n").unwrap();

        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&root)
            .load()
            .unwrap();

        assert_eq!(config.relation, Relation::Both);
        assert_eq!(sources.project_files.len(), 2);
        assert!(sources.project_files[0].as_str().ends_with(".readshift.toml"));
    }

    #[test]
    fn only_closest_directory_contributes() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let inner = tmp.path().join("inner");
        fs::create_dir(&inner).unwrap();
        fs::write(tmp.path().join("readshift.toml"), "match_word_class = true\n").unwrap();
        fs::write(inner.join("readshift.yaml"), "preserve_case: false\n").unwrap();

        let inner = Utf8PathBuf::try_from(inner).unwrap();
        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&inner)
            .load()
            .unwrap();

        assert!(!config.preserve_case);
        assert!(!config.match_word_class);
    }

    #[test]
    fn test_explicit_file_overrides_project_config() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".readshift.toml"), r#"log_level = "warn""#).unwrap();
        let override_config = tmp.path().join("override.toml");
        fs::write(&override_config, r#"log_level = "error""#).unwrap();

        let tmp_path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let override_config = Utf8PathBuf::try_from(override_config).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&tmp_path)
            .with_file(&override_config)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.primary_file(), Some(override_config.as_path()));
    }

    #[test]
    fn test_load_or_error_fails_when_no_config() {
        let _lock = env_lock();
        let result = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load_or_error();

        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn disable_input_limit_overrides_max_bytes() {
        let config = load_file(
            "config.toml",
            "max_input_bytes = 1024\ndisable_input_limit = true\n",
        );
        assert!(config.disable_input_limit);
        assert_eq!(config.max_input_bytes, Some(1024));
    }

    #[test]
    fn test_user_dirs_are_named_after_app() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("readshift"));
        }
        if let Some(path) = user_data_dir() {
            assert!(path.as_str().contains("readshift"));
        }
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_env_var_overrides_file_config() {
        let _lock = env_lock();

        let tmp = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(tmp.path().join("config.toml")).unwrap();
        fs::write(&config_path, "relation = \"synonyms\"\n").unwrap();

        // SAFETY: Test environment; the mutex serializes env access across tests.
        unsafe {
            std::env::set_var("READSHIFT_RELATION", "both");
            std::env::set_var("READSHIFT_MAX_PLAUSIBLE_SCORE", "99.5");
        }

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap();

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("READSHIFT_RELATION");
            std::env::remove_var("READSHIFT_MAX_PLAUSIBLE_SCORE");
        }

        assert_eq!(config.relation, Relation::Both);
        assert_eq!(config.max_plausible_score, 99.5);
    }
}
