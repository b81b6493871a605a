//! Info command implementation

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use readshift_core::config::{Config, ConfigSources, user_data_dir};
use readshift_core::resources::{DEFAULT_DICTIONARY_FILE, DEFAULT_WORDNET_DIR};
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

/// A resource path and whether it exists right now.
#[derive(Serialize)]
struct ResourceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    configured: bool,
    present: bool,
}

impl ResourceInfo {
    fn resolve(configured: Option<&Utf8Path>, default: Option<Utf8PathBuf>) -> Self {
        match configured {
            Some(path) => Self {
                path: Some(path.to_string()),
                configured: true,
                present: path.exists(),
            },
            None => Self {
                present: default.as_ref().is_some_and(|p| p.exists()),
                path: default.map(|p| p.to_string()),
                configured: false,
            },
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    max_plausible_score: f64,
    relation: readshift_core::Relation,
    match_word_class: bool,
    preserve_case: bool,
    pronouncing_dictionary: ResourceInfo,
    wordnet: ResourceInfo,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self::with_data_dir(config, sources, user_data_dir().as_deref())
    }

    fn with_data_dir(config: &Config, sources: &ConfigSources, data: Option<&Utf8Path>) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            max_plausible_score: config.max_plausible_score,
            relation: config.relation,
            match_word_class: config.match_word_class,
            preserve_case: config.preserve_case,
            pronouncing_dictionary: ResourceInfo::resolve(
                config.pronouncing_dictionary.as_deref(),
                data.map(|d| d.join(DEFAULT_DICTIONARY_FILE)),
            ),
            wordnet: ResourceInfo::resolve(
                config.wordnet_dir.as_deref(),
                data.map(|d| d.join(DEFAULT_WORDNET_DIR)),
            ),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration.
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let package = &full_info.package;
    println!("{} {}", package.name.bold(), package.version.green());
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), package.license);
    }
    if !package.repository.is_empty() {
        println!("{}: {}", "Repository".dimmed(), package.repository.cyan());
    }

    let info = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    match info.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    println!("{}: {}", "Log level".dimmed(), info.log_level);
    if let Some(ref dir) = info.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }
    println!(
        "{}: {:.2}",
        "Max plausible score".dimmed(),
        info.max_plausible_score
    );
    println!("{}: {:?}", "Relation".dimmed(), info.relation);
    println!("{}: {}", "Match word class".dimmed(), info.match_word_class);
    println!("{}: {}", "Preserve case".dimmed(), info.preserve_case);

    println!();
    println!("{}", "Resources".bold().underline());
    print_resource("Pronunciation lexicon", &info.pronouncing_dictionary);
    print_resource("WordNet", &info.wordnet);

    Ok(())
}

fn print_resource(label: &str, resource: &ResourceInfo) {
    let Some(ref path) = resource.path else {
        println!("{}: {}", label.dimmed(), "(no data directory)".dimmed());
        return;
    };
    if resource.present {
        println!("{}: {}", label.dimmed(), path.cyan());
    } else if resource.configured {
        println!("{}: {} {}", label.dimmed(), path, "(missing)".red());
    } else {
        println!("{}: {} {}", label.dimmed(), path, "(not installed)".yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_info_text_succeeds() {
        let config = Config::default();
        assert!(cmd_info(InfoArgs::default(), false, &config, &ConfigSources::default()).is_ok());
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        let config = Config::default();
        assert!(cmd_info(InfoArgs::default(), true, &config, &ConfigSources::default()).is_ok());
    }

    #[test]
    fn test_config_info_defaults() {
        let info = ConfigInfo::with_data_dir(
            &Config::default(),
            &ConfigSources::default(),
            Some(Utf8Path::new("/nonexistent/data")),
        );
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "info");
        assert!(!info.wordnet.configured);
        assert!(!info.wordnet.present);
        assert_eq!(
            info.pronouncing_dictionary.path.as_deref(),
            Some("/nonexistent/data/cmudict.dict")
        );
    }

    #[test]
    fn test_configured_resource_reports_presence() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config {
            wordnet_dir: Some(dir.clone()),
            ..Config::default()
        };
        let info = ConfigInfo::with_data_dir(&config, &ConfigSources::default(), None);
        assert!(info.wordnet.configured);
        assert!(info.wordnet.present);
        assert!(info.pronouncing_dictionary.path.is_none());
    }
}
