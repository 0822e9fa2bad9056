use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use versweep::{
    config::Config,
    driver::SweepSettings,
    engine::CommandEngine,
    model::ArtifactCoordinate,
    pipeline::run_sweep,
    registry::{MavenRegistry, VersionSource},
    report::{print_summary, OutputFormat},
};

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
}

#[derive(Parser)]
#[command(name = "versweep")]
#[command(
    author,
    version,
    about = "Scan every published version of a Maven artifact for vulnerabilities"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct TargetArgs {
    /// Artifact as group:artifact
    coordinate: Option<String>,

    /// Group id of the artifact to sweep
    #[arg(long, env = "groupId")]
    group_id: Option<String>,

    /// Artifact id of the artifact to sweep
    #[arg(long, env = "artifactId")]
    artifact_id: Option<String>,

    /// Maven repository base URL
    #[arg(long)]
    registry: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan every published version and write a severity summary CSV
    Analyze {
        #[command(flatten)]
        target: TargetArgs,

        /// Directory for per-version reports and the CSV summary
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// File name prefix for reports and the CSV
        #[arg(long)]
        prefix: Option<String>,

        /// Console output format (table, json, csv)
        #[arg(short, long)]
        format: Option<String>,

        /// Engine command, whitespace separated, with placeholders
        #[arg(long)]
        engine_command: Option<String>,
    },

    /// List the published versions without scanning
    Versions {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<u8> {
    let config = Config::load().context("failed to load config")?;

    match cli.command {
        Commands::Analyze {
            target,
            output_dir,
            prefix,
            format,
            engine_command,
        } => {
            let format = format.unwrap_or_else(|| config.default_format.clone());
            let format = OutputFormat::from_str(&format).map_err(|e| anyhow::anyhow!(e))?;
            let (group_id, artifact_id) = resolve_target(&target)?;
            let registry = registry_for(&config, &target)?;

            let mut engine_config = config.engine.clone();
            if let Some(command) = engine_command {
                engine_config.command = command.split_whitespace().map(str::to_string).collect();
            }
            let engine: CommandEngine = engine_config.build()?;

            let settings = SweepSettings::new(
                output_dir.unwrap_or_else(|| config.output_dir.clone()),
                prefix.unwrap_or_else(|| config.report_prefix.clone()),
            )
            .with_progress(format == OutputFormat::Table && std::io::stderr().is_terminal());

            let summary = run_sweep(&registry, &engine, &group_id, &artifact_id, &settings).await?;
            print_summary(&summary, format)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Versions { target } => {
            let (group_id, artifact_id) = resolve_target(&target)?;
            let registry = registry_for(&config, &target)?;
            for version in registry.available_versions(&group_id, &artifact_id).await? {
                println!("{}", version);
            }
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { init, path } => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn registry_for(config: &Config, target: &TargetArgs) -> Result<MavenRegistry> {
    let registry = match &target.registry {
        Some(url) => {
            let mut config = config.clone();
            config.registry_url = url.clone();
            config.registry()?
        }
        None => config.registry()?,
    };
    Ok(registry)
}

/// Positional `group:artifact` wins over the flags and environment.
fn resolve_target(target: &TargetArgs) -> Result<(String, String)> {
    if let Some(coordinate) = &target.coordinate {
        let coord = ArtifactCoordinate::from_str(coordinate)?;
        return Ok((coord.group_id, coord.artifact_id));
    }

    match (&target.group_id, &target.artifact_id) {
        (Some(g), Some(a)) if !g.is_empty() && !a.is_empty() => Ok((g.clone(), a.clone())),
        _ => Err(anyhow::anyhow!(
            "No artifact given. Pass group:artifact, or --group-id and --artifact-id (or set groupId and artifactId)"
        )),
    }
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'versweep config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(coordinate: Option<&str>, g: Option<&str>, a: Option<&str>) -> TargetArgs {
        TargetArgs {
            coordinate: coordinate.map(str::to_string),
            group_id: g.map(str::to_string),
            artifact_id: a.map(str::to_string),
            registry: None,
        }
    }

    #[test]
    fn test_resolve_target_positional() {
        let t = target(Some("org.example:demo"), Some("ignored"), None);
        assert_eq!(
            resolve_target(&t).unwrap(),
            ("org.example".to_string(), "demo".to_string())
        );
    }

    #[test]
    fn test_resolve_target_flags() {
        let t = target(None, Some("g"), Some("a"));
        assert_eq!(resolve_target(&t).unwrap(), ("g".to_string(), "a".to_string()));
    }

    #[test]
    fn test_resolve_target_missing() {
        assert!(resolve_target(&target(None, Some("g"), None)).is_err());
        assert!(resolve_target(&target(None, Some(""), Some("a"))).is_err());
    }

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "versweep",
            "-vv",
            "analyze",
            "org.example:demo",
            "--output-dir",
            "/tmp/out",
            "--format",
            "csv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Analyze { .. }));
    }
}
