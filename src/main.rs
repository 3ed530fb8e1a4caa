use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dockerizer::analysis::ProjectAnalyzer;
use dockerizer::config::{self, ArchiveFormat, Config, GenerationConfig};
use dockerizer::generator::{ArtifactGenerator, Framework};
use dockerizer::{package, workspace, ProjectProfile};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "dockerizer")]
#[command(about = "Generate Docker artifacts for a source project", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a project and print its profile
    Analyze {
        path: PathBuf,

        /// Print the profile as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Analyze a project and write Dockerfile, docker-compose.yml and .dockerignore
    Generate {
        path: PathBuf,

        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<String>,

        #[arg(long, value_enum)]
        format: Option<ArchiveFormat>,

        /// Directory the artifacts are written to
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Package project and artifacts into this archive instead
        #[arg(long)]
        archive: Option<PathBuf>,
    },
    /// Write a default config file
    InitConfig,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new(format!("warn,{}=debug", env!("CARGO_CRATE_NAME")))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::InitConfig => {
            let path = match cli.config {
                Some(path) => path,
                None => config::get_config_path()?,
            };
            Config::create_default(&path)?;
            println!("Created default config file at {:?}", path);
            Ok(())
        }
        Commands::Analyze { path, json } => {
            let config = load_config(cli.config.as_deref())?;
            analyze(&path, &config, json)
        }
        Commands::Generate {
            path,
            host,
            port,
            format,
            output,
            archive,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let mut generation = config.generation.clone();
            if let Some(host) = host {
                generation.host = host;
            }
            if let Some(port) = port {
                generation.port = port;
            }
            if let Some(format) = format {
                generation.format = format;
            }
            generate(&path, &config, generation, &output, archive.as_deref())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = Config::load_or_default(path)?;
    colored::control::set_override(config.display.color_output);
    Ok(config)
}

fn load_profile(path: &Path, config: &Config) -> Result<(PathBuf, ProjectProfile)> {
    let root = workspace::discover_project_root(path);
    let profile = ProjectAnalyzer::with_options(&root, config.analysis.clone())
        .analyze()
        .with_context(|| format!("Failed to analyze {}", path.display()))?;
    Ok((root, profile))
}

fn analyze(path: &Path, config: &Config, json: bool) -> Result<()> {
    let (root, profile) = load_profile(path, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("{} {}", "Project:".green().bold(), root.display());
    println!("Type: {}", profile.project_type.to_string().blue());
    println!("Language: {}", profile.primary_language.to_string().blue());
    println!("Framework: {}", Framework::detect(&profile).to_string().blue());
    println!("Files: {}", profile.files.len());
    println!("Entry points: {}", profile.entry_points.len());

    if !profile.dependencies.is_empty() {
        println!("{}", "Dependencies:".yellow());
        for dep in &profile.dependencies {
            println!("  - {}", dep);
        }
    }
    if !profile.ports.is_empty() {
        let ports: Vec<String> = profile.ports.iter().map(|p| p.to_string()).collect();
        println!("Ports: {}", ports.join(", "));
    }
    if !profile.environment.is_empty() {
        let keys: Vec<&str> = profile.environment.keys().map(String::as_str).collect();
        println!("Environment: {}", keys.join(", "));
    }
    if !profile.build_requirements.commands.is_empty() {
        println!("Build: {}", profile.build_requirements.commands.join(" && "));
    }

    Ok(())
}

fn generate(
    path: &Path,
    config: &Config,
    generation: GenerationConfig,
    output: &Path,
    archive: Option<&Path>,
) -> Result<()> {
    use validator::Validate;
    generation.validate()?;

    let (root, profile) = load_profile(path, config)?;
    let artifacts = ArtifactGenerator::new().generate(&profile, &generation);

    match archive {
        Some(dest) => {
            package::write_archive(&root, &artifacts, dest, generation.format)?;
            println!("{} {}", "Wrote".green().bold(), dest.display());
        }
        None => {
            for written in package::write_artifacts(output, &artifacts)? {
                println!("{} {}", "Wrote".green().bold(), written.display());
            }
        }
    }

    Ok(())
}
