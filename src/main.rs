use anyhow::Result;
use clap::{CommandFactory, Parser};
use interview_tts::app::{GenerateOptions, run_generate_command};
use interview_tts::cli::{Cli, Commands};
use interview_tts::config::Config;
use owo_colors::OwoColorize;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "interview-tts",
                &mut std::io::stdout(),
            );
        }
        None => {
            let Some(notes) = cli.notes else {
                Cli::command()
                    .error(
                        clap::error::ErrorKind::MissingRequiredArgument,
                        "the NOTES argument is required",
                    )
                    .exit();
            };

            let config = load_config(cli.config.as_deref())?;
            if cli.verbose >= 2 && !cli.quiet {
                eprintln!("interview-tts {}", interview_tts::version_string());
            }

            let options = GenerateOptions {
                notes,
                output: cli.output,
                pause_ms: cli.pause,
                throttle: cli.throttle,
                model: cli.model,
                backend: cli.backend,
                dry_run: cli.dry_run,
                quiet: cli.quiet,
                verbosity: cli.verbose,
            };

            if let Err(e) = run_generate_command(config, options).await {
                eprintln!("{} {}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Load configuration from a custom path or the default location, then apply
/// environment variable overrides.
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)?
    } else {
        // Missing default file means defaults
        Config::load_or_default(&Config::default_path())?
    };

    Ok(config.with_env_overrides()?)
}
