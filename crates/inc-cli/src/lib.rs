//! Neural Compressor UX command-line front-end

pub mod explore;
pub mod model;
pub mod project;
pub mod resource;
pub mod workspace;

use anyhow::{Context, Result};
use inc_rest_api_contract::ResourceId;
use inc_rest_client::{ClientConfig, PendingRequest, RestClient};
use serde_json::Value;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// Re-export CLI types for testing
pub use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "inc")]
#[command(about = "Neural Compressor UX command-line client")]
#[command(version, author, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Backend base URL (defaults to INC_UX_BASE_URL, then http://localhost:5000/)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Session token to store on the client
    #[arg(long, global = true, env = "INC_UX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Send the session token as a bearer Authorization header
    #[arg(long, global = true)]
    pub attach_token: bool,

    /// Workspace path to use for workload requests, recorded locally without notifying the server
    #[arg(long, global = true)]
    pub workspace: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Log filter: `--verbose` forces debug, otherwise RUST_LOG or info
    pub fn env_filter(&self) -> EnvFilter {
        if self.verbose {
            return EnvFilter::new("debug");
        }
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }

    /// Resolve the client configuration from flags and environment
    pub fn client_config(&self) -> Result<ClientConfig> {
        let config = match &self.base_url {
            Some(url) => ClientConfig::from_url(url)?,
            None => ClientConfig::from_env()?,
        };
        Ok(if self.attach_token {
            config.with_attach_token(true)
        } else {
            config
        })
    }

    /// Build a client with the session state requested on the command line
    pub fn client(&self) -> Result<RestClient> {
        let config = self.client_config()?;
        debug!(base_url = %config.base_url, "creating client");
        let client = RestClient::new(config)?;

        if let Some(token) = &self.token {
            client.set_token(token.clone());
        }
        if let Some(workspace) = &self.workspace {
            client.session().set_workspace_path(workspace.clone());
        }
        Ok(client)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project management commands
    Project {
        #[command(subcommand)]
        subcommand: project::ProjectCommands,
    },
    /// Workspace and workload commands
    Workspace {
        #[command(subcommand)]
        subcommand: workspace::WorkspaceCommands,
    },
    /// Dataset, model, optimization, benchmark and profiling commands
    Resource(resource::ResourceArgs),
    /// Model onboarding commands
    Model {
        #[command(subcommand)]
        subcommand: model::ModelCommands,
    },
    /// Explore the backend: system info, filesystem, graphs, dictionaries
    Explore {
        #[command(subcommand)]
        subcommand: explore::ExploreCommands,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let client = self.global.client()?;

        match self.command {
            Commands::Project { subcommand } => subcommand.run(&client).await,
            Commands::Workspace { subcommand } => subcommand.run(&client).await,
            Commands::Resource(args) => args.run(&client).await,
            Commands::Model { subcommand } => subcommand.run(&client).await,
            Commands::Explore { subcommand } => subcommand.run(&client).await,
        }
    }
}

/// Send a request and print its JSON response
pub async fn send_and_print(request: PendingRequest) -> Result<()> {
    let response = request.send().await?;
    print_json(&response)
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse an id argument, keeping numeric ids numeric on the wire
pub fn parse_resource_id(raw: &str) -> Result<ResourceId, std::convert::Infallible> {
    raw.parse()
}

/// Read a JSON document from a file
pub fn load_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Read a JSON object from a file
pub fn load_json_object(path: &Path) -> Result<serde_json::Map<String, Value>> {
    match load_json(path)? {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!(
            "Expected a JSON object in {}, found {}",
            path.display(),
            json_kind(&other)
        ),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
