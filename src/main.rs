use anyhow::{ anyhow, Result };
use clap::Parser;
use log::{ error, info };
use std::sync::Arc;

use didact::config::DidactOptions;
use didact::errors::RecoverableError;
use didact::implementations::config::GeneratorConfig;
use didact::implementations::invoker::LlmInvoker;
use didact::implementations::studio::Studio;
use didact::traits::progress_sink::NoProgress;

mod cli;
use cli::{ Commands, DidactCli };

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials may live in a local .env file
    dotenv::dotenv().ok();

    let cli = DidactCli::parse();
    setup_logging(&cli.log_level);

    // Listings need neither configuration nor credentials
    match &cli.command {
        Commands::Levels { detailed } => {
            return cli::commands::catalog::list_levels(*detailed);
        }
        Commands::Categories => {
            return cli::commands::catalog::list_categories();
        }
        _ => {}
    }

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GeneratorConfig::from_file(path).map_err(|e| anyhow!("{}", e))?
        }
        None => GeneratorConfig::default(),
    };

    let max_attempts = match &cli.command {
        Commands::Activity { max_attempts, .. } | Commands::Sequence { max_attempts, .. } =>
            *max_attempts,
        _ => None,
    };
    let mut options = DidactOptions::from_config(&config);
    if let Some(max_attempts) = max_attempts {
        options = options.with_max_attempts(max_attempts);
    }

    let invoker = LlmInvoker::new(config.clone())?;
    let mut studio = Studio::new(Arc::new(invoker), options);
    if !cli.wants_json() {
        let show_audits = log::log_enabled!(log::Level::Debug);
        studio = studio.with_progress(Arc::new(cli::ui::ConsoleProgress::new(show_audits)));
        println!("Didact - Lesson Activity Designer");
    } else {
        studio = studio.with_progress(Arc::new(NoProgress));
    }

    let result = match &cli.command {
        Commands::Activity {
            inspiration,
            group,
            entry_level,
            exit_level,
            context,
            suggest_context,
            template,
            models,
            output,
            ..
        } => {
            cli::commands::activity::execute(
                &studio,
                &config,
                inspiration,
                group.as_deref(),
                entry_level.as_deref(),
                exit_level.as_deref(),
                context.as_deref(),
                *suggest_context,
                template.as_deref(),
                models,
                output.as_deref(),
                &cli.output_format
            ).await
        }
        Commands::Sequence {
            inspiration,
            group,
            entry_level,
            sessions,
            final_level,
            template,
            models,
            output,
            ..
        } => {
            cli::commands::sequence::execute(
                &studio,
                &config,
                inspiration,
                group.as_deref(),
                entry_level.as_deref(),
                *sessions,
                final_level.as_deref(),
                template.as_deref(),
                models,
                output.as_deref(),
                &cli.output_format
            ).await
        }
        Commands::SuggestContext { inspiration, model } => {
            cli::commands::context::execute(
                &studio,
                &config,
                inspiration,
                model.as_deref(),
                &cli.output_format
            ).await
        }
        Commands::Refine { activity, feedback, model, output } => {
            cli::commands::refine::execute(
                &studio,
                &config,
                activity,
                feedback.as_deref(),
                model.as_deref(),
                output.as_deref(),
                &cli.output_format
            ).await
        }
        Commands::Levels { .. } | Commands::Categories => Ok(()),
    };

    if let Err(e) = &result {
        match e.downcast_ref::<didact::errors::DidactError>() {
            Some(didact_error) if !didact_error.is_recoverable() => {
                error!("Fatal error: {}", didact_error);
            }
            _ => error!("Command failed: {}", e),
        }
        cli::ui::print_error(&e.to_string());
    }
    result
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
