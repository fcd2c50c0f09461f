use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio_util::sync::CancellationToken;

use radarr_client::{AuthContext, RadarrClient};
use radarr_core::provider::{Context, Diagnostics, Provider, ResourceType, Severity};
use radarr_core::resource::{
    Attributes, Resource, ResourceId, State, Value, attributes_from_json, attributes_to_json,
};
use radarr_core::schema::ResourceSchema;
use radarr_provider::RadarrProvider;
use radarr_provider::config::{API_KEY_ENV, URL_ENV};

#[derive(Parser)]
#[command(name = "radarr")]
#[command(about = "Manage a Radarr instance one resource at a time", long_about = None)]
struct Cli {
    /// Base URL of the Radarr instance
    #[arg(long, env = URL_ENV, global = true)]
    url: Option<String>,

    /// API key of the Radarr instance
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Log provider activity (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List resource and data source types, or show one schema
    Schema {
        /// Resource or data source type (e.g., radarr_indexer_newznab)
        type_name: Option<String>,
    },
    /// Import an existing object by id and print its state
    Import {
        type_name: String,
        key: String,
    },
    /// Refresh an object by id and print its state
    Read {
        type_name: String,
        id: i64,
    },
    /// Create an object from a JSON attribute file, or update it with --id
    Apply {
        type_name: String,
        file: PathBuf,

        /// Update this existing object instead of creating a new one
        #[arg(long)]
        id: Option<i64>,
    },
    /// Delete an object by id
    Destroy {
        type_name: String,
        id: i64,
    },
    /// Read a data source from a JSON attribute file
    Lookup {
        data_source: String,
        /// Attribute file; omit for data sources without arguments
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RADARR_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cancellation = CancellationToken::new();
    let on_interrupt = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });
    let ctx = Context::with_cancellation(cancellation);

    if let Err(e) = run(cli, &ctx).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, ctx: &Context) -> Result<()> {
    let mut diags = Diagnostics::new();

    if let Commands::Schema { type_name } = &cli.command {
        let provider = offline_provider()?;
        return run_schema(&provider, type_name.as_deref());
    }

    let mut block = Attributes::new();
    if let Some(url) = &cli.url {
        block.insert("url".to_string(), Value::String(url.clone()));
    }
    if let Some(api_key) = &cli.api_key {
        block.insert("api_key".to_string(), Value::String(api_key.clone()));
    }
    let provider = RadarrProvider::configure(&block, ctx, &mut diags).await;
    let Some(provider) = provider else {
        return finish(&diags, None);
    };

    match cli.command {
        Commands::Schema { .. } => Ok(()),
        Commands::Import { type_name, key } => {
            let id = ResourceId::new(&type_name, "imported");
            let state = match provider.import(&id, &key, &mut diags) {
                Some(partial) => provider.read(ctx, &partial, &mut diags).await,
                None => None,
            };
            finish(&diags, state.map(|s| (s, resource_schema(&provider, &type_name))))
        }
        Commands::Read { type_name, id } => {
            let prior = state_for(&type_name, id);
            let state = provider.read(ctx, &prior, &mut diags).await;
            finish(&diags, state.map(|s| (s, resource_schema(&provider, &type_name))))
        }
        Commands::Apply { type_name, file, id } => {
            let resource = Resource::new(&type_name, "applied").with_attributes(load(&file)?);
            let state = match id {
                Some(id) => {
                    let prior = state_for(&type_name, id);
                    match provider.read(ctx, &prior, &mut diags).await {
                        Some(current) if current.exists => {
                            provider.update(ctx, &current, &resource, &mut diags).await
                        }
                        Some(_) => bail!("{} {} does not exist", type_name, id),
                        None => None,
                    }
                }
                None => provider.create(ctx, &resource, &mut diags).await,
            };
            finish(&diags, state.map(|s| (s, resource_schema(&provider, &type_name))))
        }
        Commands::Destroy { type_name, id } => {
            let prior = state_for(&type_name, id);
            if provider.delete(ctx, &prior, &mut diags).await.is_some() {
                println!("  {} {}.{} destroyed", "✓".green(), type_name, id);
            }
            finish(&diags, None)
        }
        Commands::Lookup { data_source, file } => {
            let attributes = match file {
                Some(file) => load(&file)?,
                None => Attributes::new(),
            };
            let config = Resource::new(&data_source, "lookup")
                .with_attributes(attributes)
                .with_read_only(true);
            let state = provider.read_data_source(ctx, &config, &mut diags).await;
            let schema = provider
                .data_source_types()
                .into_iter()
                .find(|t| t.name() == data_source)
                .map(|t| t.schema());
            finish(&diags, state.map(|s| (s, schema)))
        }
    }
}

/// Provider for commands that never reach the service
fn offline_provider() -> Result<RadarrProvider> {
    let client = RadarrClient::new(AuthContext::new("http://localhost:7878", "offline"))
        .context("building client")?;
    Ok(RadarrProvider::new(client))
}

fn run_schema(provider: &RadarrProvider, type_name: Option<&str>) -> Result<()> {
    let resources = provider.resource_types();
    let data_sources = provider.data_source_types();

    let Some(type_name) = type_name else {
        println!("{}", "Resources:".cyan().bold());
        for t in &resources {
            println!("  • {}", t.name());
        }
        println!();
        println!("{}", "Data sources:".cyan().bold());
        for t in &data_sources {
            println!("  • {}", t.name());
        }
        return Ok(());
    };

    let found = resources
        .iter()
        .map(|t| ("resource", t))
        .chain(data_sources.iter().map(|t| ("data source", t)))
        .filter(|(_, t)| t.name() == type_name)
        .collect::<Vec<_>>();
    if found.is_empty() {
        bail!("unknown type: {}", type_name);
    }
    for (kind, t) in found {
        print_schema(kind, &t.schema());
    }
    Ok(())
}

fn print_schema(kind: &str, schema: &ResourceSchema) {
    println!(
        "{} {} {}",
        schema.resource_type.bold(),
        format!("({})", kind).dimmed(),
        schema.description.as_deref().unwrap_or_default()
    );
    let mut attributes: Vec<_> = schema.attributes.values().collect();
    attributes.sort_by(|a, b| a.name.cmp(&b.name));
    for attr in attributes {
        let mode = if attr.required {
            "required".red().to_string()
        } else if attr.is_read_only() {
            "computed".dimmed().to_string()
        } else {
            "optional".green().to_string()
        };
        let sensitive = if attr.sensitive { " sensitive".yellow().to_string() } else { String::new() };
        println!("  {:<40} {:<24} {}{}", attr.name, attr.attr_type.to_string(), mode, sensitive);
    }
}

fn resource_schema(provider: &RadarrProvider, type_name: &str) -> Option<ResourceSchema> {
    provider
        .resource_types()
        .into_iter()
        .find(|t| t.name() == type_name)
        .map(|t| t.schema())
}

fn state_for(type_name: &str, id: i64) -> State {
    let mut attributes = Attributes::new();
    attributes.insert("id".to_string(), Value::Int(id));
    State::existing(ResourceId::new(type_name, id.to_string()), attributes).with_identifier(id.to_string())
}

fn load(file: &Path) -> Result<Attributes> {
    let content =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let json: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", file.display()))?;
    if !json.is_object() {
        bail!("{} must contain a JSON object of attributes", file.display());
    }
    Ok(attributes_from_json(&json))
}

/// Print diagnostics and the resulting state; fail if any error was reported
fn finish(diags: &Diagnostics, state: Option<(State, Option<ResourceSchema>)>) -> Result<()> {
    for diagnostic in diags.iter() {
        let label = match diagnostic.severity {
            Severity::Error => "Error:".red().bold(),
            Severity::Warning => "Warning:".yellow().bold(),
        };
        eprintln!("{} {}: {}", label, diagnostic.summary, diagnostic.detail);
    }

    if let Some((state, schema)) = state {
        if state.exists {
            let mut attributes = state.attributes.clone();
            if let Some(schema) = schema {
                for name in schema.sensitive_attributes() {
                    if attributes.contains_key(name) {
                        attributes.insert(name.to_string(), Value::String("(sensitive)".to_string()));
                    }
                }
            }
            println!("{}", serde_json::to_string_pretty(&attributes_to_json(&attributes))?);
        } else {
            println!("{}", format!("{} does not exist", state.id).yellow());
        }
    }

    if diags.has_errors() {
        bail!("{} error(s) reported", diags.errors().count());
    }
    Ok(())
}
