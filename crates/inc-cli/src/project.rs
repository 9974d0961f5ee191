//! Project commands

use anyhow::Result;
use clap::{Args, Subcommand};
use inc_rest_api_contract::ResourceId;
use inc_rest_client::RestClient;
use serde_json::json;
use std::path::PathBuf;

use crate::{load_json, parse_resource_id, send_and_print};

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List all projects
    List,
    /// Show project details
    Show {
        /// Project id
        #[arg(value_parser = parse_resource_id)]
        id: ResourceId,
    },
    /// Create a project
    Create(CreateProjectArgs),
    /// Attach notes to a project
    Note {
        /// Project id
        #[arg(value_parser = parse_resource_id)]
        id: ResourceId,
        /// Notes text
        notes: String,
    },
}

#[derive(Args)]
pub struct CreateProjectArgs {
    /// JSON file with the full project payload
    #[arg(long, conflicts_with_all = ["name", "model_path"])]
    pub file: Option<PathBuf>,

    /// Project name
    #[arg(long, requires = "model_path")]
    pub name: Option<String>,

    /// Path to the input model
    #[arg(long)]
    pub model_path: Option<String>,
}

impl ProjectCommands {
    pub async fn run(self, client: &RestClient) -> Result<()> {
        match self {
            ProjectCommands::List => send_and_print(client.get_project_list()).await,
            ProjectCommands::Show { id } => send_and_print(client.get_project_details(id)).await,
            ProjectCommands::Create(args) => {
                let project = args.payload()?;
                send_and_print(client.create_project(&project)).await
            }
            ProjectCommands::Note { id, notes } => {
                send_and_print(client.add_notes(id, notes)).await
            }
        }
    }
}

impl CreateProjectArgs {
    pub fn payload(&self) -> Result<serde_json::Value> {
        if let Some(file) = &self.file {
            return load_json(file);
        }
        match (&self.name, &self.model_path) {
            (Some(name), Some(model_path)) => Ok(json!({
                "name": name,
                "model": { "path": model_path },
            })),
            _ => anyhow::bail!("Either --file or both --name and --model-path are required"),
        }
    }
}
