//! Read-only exploration of the backend

use anyhow::Result;
use clap::Subcommand;
use inc_rest_api_contract::FileBrowserFilter;
use inc_rest_client::RestClient;
use serde_json::Value;

use crate::{print_json, send_and_print};

#[derive(Subcommand)]
pub enum ExploreCommands {
    /// Fetch and show the server's system info
    SystemInfo,
    /// Browse the server filesystem
    Fs {
        /// Directory to list
        path: String,
        /// Entry kinds to show
        #[arg(long, default_value = "all")]
        filter: FileBrowserFilter,
    },
    /// Show the graph of a model
    Graph {
        /// Path to the model file
        path: String,
        /// Node groups to expand, in order
        #[arg(long = "group")]
        groups: Vec<String>,
    },
    /// Show a dictionary, optionally filtered by a parameter
    Dict {
        /// Dictionary name, e.g. frameworks
        name: String,
        /// Filter parameter name (requires --value)
        #[arg(long, requires = "value")]
        param: Option<String>,
        /// Filter parameter value, as JSON
        #[arg(long)]
        value: Option<String>,
    },
    /// Show possible values of a parameter
    PossibleValues {
        /// Parameter name
        param: String,
        /// Configuration context, as JSON
        #[arg(long)]
        config: Option<String>,
    },
    /// List models available in the model zoo
    Zoo,
}

impl ExploreCommands {
    pub async fn run(self, client: &RestClient) -> Result<()> {
        match self {
            ExploreCommands::SystemInfo => {
                if let Some(fetch) = client.get_system_info() {
                    fetch.await?;
                }
                print_json(&client.system_info())
            }
            ExploreCommands::Fs { path, filter } => {
                send_and_print(client.get_file_system(&path, filter)).await
            }
            ExploreCommands::Graph { path, groups } => {
                let groups: Vec<&str> = groups.iter().map(String::as_str).collect();
                let groups = (!groups.is_empty()).then_some(groups.as_slice());
                send_and_print(client.get_model_graph(&path, groups)).await
            }
            ExploreCommands::Dict { name, param, value } => match (param, value) {
                (Some(param), Some(value)) => {
                    let value = parse_json_arg(&value);
                    send_and_print(client.get_dictionary_with_param(&name, &param, &value)).await
                }
                _ => send_and_print(client.get_dictionary(&name)).await,
            },
            ExploreCommands::PossibleValues { param, config } => {
                let config = config.as_deref().map(parse_json_arg);
                send_and_print(client.get_possible_values(param, config)).await
            }
            ExploreCommands::Zoo => send_and_print(client.list_model_zoo()).await,
        }
    }
}

/// Parse a JSON argument, treating anything that is not valid JSON as a string
pub fn parse_json_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
