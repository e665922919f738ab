//! modelsmith CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

mod prompts;

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::{bail, Context};
use chrono::{Datelike, SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use modelsmith_core::{
    generate_model, generate_schema, snippets, Config, FallbackPolicy, GeneratedFile,
    RenderOptions, SchemaDescriptor, SchemaField, TemplateRegistry,
};
use tokio::fs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "modelsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a model class from a descriptor file or interactive prompts
    Model {
        /// Descriptor file (YAML, JSON or TOML)
        #[arg(long, conflicts_with = "interactive", required_unless_present = "interactive")]
        descriptor: Option<PathBuf>,
        /// Collect the descriptor with prompts
        #[arg(long)]
        interactive: bool,
        #[command(flatten)]
        output: OutputArgs,
        /// Omit the license block
        #[arg(long)]
        no_license: bool,
        /// Initializer behavior when no resource can be resolved (log-only, propagate)
        #[arg(long, default_value = "log-only")]
        fallback: FallbackPolicy,
    },
    /// Generate a GraphQL schema fragment
    Schema {
        /// Type name, e.g. GetProduct
        #[arg(long)]
        name: String,
        /// Field as name:type[:required][:description]; repeatable
        #[arg(long = "field")]
        fields: Vec<SchemaField>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Inspect the markup snippet catalog
    Snippets {
        #[command(subcommand)]
        action: SnippetAction,
    },
    /// List the registered model templates
    Templates,
}

#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Root directory for generated files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Print to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
    /// Overwrite existing files
    #[arg(long)]
    force: bool,
}

#[derive(Subcommand, Debug)]
pub enum SnippetAction {
    /// List snippet prefixes
    List,
    /// Print one snippet body
    Show { prefix: String },
    /// Write the catalog as an editor snippet file
    Export {
        /// Destination file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Model {
            descriptor,
            interactive,
            output,
            no_license,
            fallback,
        } => {
            let mut config = if interactive {
                let mut prompter = prompts::TerminalPrompter::default();
                match prompts::collect_model(&mut prompter)? {
                    Some(config) => config,
                    None => {
                        println!("Cancelled, nothing generated.");
                        return Ok(());
                    }
                }
            } else {
                let path = descriptor.context("--descriptor is required")?;
                Config::from_file(&path)
                    .await
                    .with_context(|| format!("Failed to load descriptor {}", path.display()))?
            };

            let mut options = render_options();
            options.fallback_policy = fallback;
            if let Some(holder) = &config.license_holder {
                options.license_holder = holder.clone();
            }

            if no_license {
                config.license_header = false;
            }
            let descriptor = config.into_descriptor().context("Invalid model descriptor")?;
            tracing::info!(
                template = %descriptor.template_kind(),
                type_name = descriptor.type_name(),
                "Generating model"
            );

            let file = generate_model(&descriptor, &options)?;
            emit(&file, &output).await?;
        }
        Commands::Schema {
            name,
            fields,
            output,
        } => {
            let descriptor =
                SchemaDescriptor::new(name, fields).context("Invalid schema descriptor")?;
            let file = generate_schema(&descriptor, &render_options())?;
            emit(&file, &output).await?;
        }
        Commands::Snippets { action } => match action {
            SnippetAction::List => {
                for snippet in snippets::all() {
                    println!("{:<28} {}", snippet.prefix, snippet.description);
                }
            }
            SnippetAction::Show { prefix } => match snippets::lookup(&prefix) {
                Some(snippet) => println!("{}", snippet.text()),
                None => bail!("Unknown snippet prefix: {}", prefix),
            },
            SnippetAction::Export { output } => {
                let json = snippets::to_snippet_json()?;
                match output {
                    Some(path) => {
                        ensure_parent(&path).await?;
                        fs::write(&path, json)
                            .await
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        println!("Wrote {}", path.display());
                    }
                    None => println!("{}", json),
                }
            }
        },
        Commands::Templates => {
            let registry = TemplateRegistry::global()?;
            for entry in registry.entries() {
                println!(
                    "{:<24} {:<26} {}",
                    entry.key(),
                    entry.kind.label(),
                    entry.kind.description()
                );
            }
        }
    }
    Ok(())
}

/// Options stamped with the current year and time
fn render_options() -> RenderOptions {
    let now = Utc::now();
    RenderOptions {
        license_year: now.year(),
        generated_at: Some(now.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ..Default::default()
    }
}

async fn emit(file: &GeneratedFile, output: &OutputArgs) -> anyhow::Result<()> {
    if output.stdout {
        print!("{}", file.contents);
        return Ok(());
    }

    let path = output.output_dir.join(&file.relative_path);
    let exists = fs::try_exists(&path)
        .await
        .with_context(|| format!("Failed to check {}", path.display()))?;
    if exists && !output.force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }

    ensure_parent(&path).await?;
    fs::write(&path, &file.contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = file.contents.len(), "Wrote file");
    println!("Created {}", path.display());
    Ok(())
}

async fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}
