//! readshift CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use readshift::{Cli, Commands, commands};
use readshift_core::config::ConfigLoader;
use readshift_core::{Lexicons, Pipeline};
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        let config_path = camino::Utf8PathBuf::try_from(config_path.clone()).map_err(|e| {
            anyhow::anyhow!(
                "config path is not valid UTF-8: {}",
                e.into_path_buf().display()
            )
        })?;
        loader = loader.with_file(&config_path);
    }
    let (config, config_sources) = loader.load().context("failed to load configuration")?;

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        "CLI initialized"
    );

    let max_input = if config.disable_input_limit {
        None
    } else {
        config
            .max_input_bytes
            .or(Some(readshift_core::DEFAULT_MAX_INPUT_BYTES))
    };

    let load_pipeline = || -> anyhow::Result<Pipeline> {
        let lexicons = Lexicons::load(&config).context("failed to load lexical resources")?;
        debug!(?lexicons, "lexical resources ready");
        Ok(Pipeline::from_config(&lexicons, &config))
    };

    let result = match command {
        Commands::Score(args) => load_pipeline()
            .and_then(|pipeline| commands::score::cmd_score(args, cli.json, &pipeline, max_input)),
        Commands::Augment(args) => load_pipeline().and_then(|pipeline| {
            commands::augment::cmd_augment(args, cli.json, &pipeline, max_input)
        }),
        Commands::Batch(args) => load_pipeline().and_then(|pipeline| {
            commands::batch::cmd_batch(args, cli.json, cli.quiet, &pipeline, max_input)
        }),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &config_sources),
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
