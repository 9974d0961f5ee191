//! Workspace and workload commands

use anyhow::Result;
use clap::Subcommand;
use inc_rest_client::RestClient;
use std::path::PathBuf;
use tracing::info;

use crate::{load_json_object, send_and_print};

#[derive(Subcommand)]
pub enum WorkspaceCommands {
    /// Switch the server to a workspace
    Set {
        /// Workspace directory on the server
        path: String,
    },
    /// Show the server's default path for a named location
    DefaultPath {
        /// Location name, e.g. "workspace"
        name: String,
    },
    /// List workloads of the workspace
    Workloads,
    /// Save a workload from a JSON file
    Save {
        /// JSON file describing the workload
        file: PathBuf,
        /// Save as an example workload
        #[arg(long)]
        example: bool,
    },
}

impl WorkspaceCommands {
    pub async fn run(self, client: &RestClient) -> Result<()> {
        match self {
            WorkspaceCommands::Set { path } => {
                info!(%path, "switching workspace");
                send_and_print(client.set_workspace_path(path)).await
            }
            WorkspaceCommands::DefaultPath { name } => {
                send_and_print(client.get_default_path(name)).await
            }
            WorkspaceCommands::Workloads => {
                warn_without_workspace(client);
                send_and_print(client.get_all_models()).await
            }
            WorkspaceCommands::Save { file, example } => {
                warn_without_workspace(client);
                let mut workload = load_json_object(&file)?;
                let request = if example {
                    client.save_example_workload(&mut workload)
                } else {
                    client.save_workload(&mut workload)
                };
                send_and_print(request).await
            }
        }
    }
}

fn warn_without_workspace(client: &RestClient) {
    if client.workspace_path().is_none() {
        tracing::warn!("no workspace set; pass --workspace to scope the request");
    }
}
