//! Model onboarding commands

use anyhow::Result;
use clap::{Args, Subcommand};
use inc_rest_api_contract::{validation::validate_new_model, ModelType, NewModel};
use inc_rest_client::RestClient;

use crate::send_and_print;

#[derive(Subcommand)]
pub enum ModelCommands {
    /// Ask the server for a default configuration of a model
    Configuration(ModelArgs),
    /// Profile a model
    Profile {
        #[command(flatten)]
        model: ModelArgs,
        /// Which model of the workload to profile
        #[arg(long, default_value = "input_model")]
        model_type: ModelType,
    },
    /// Optimize a model in the current workspace
    Optimize(ModelArgs),
}

/// Description of the model to onboard
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Workload id
    #[arg(long)]
    pub id: String,
    /// Path to the model file
    #[arg(long)]
    pub model_path: String,
    /// Framework identifier, e.g. tensorflow or onnxrt
    #[arg(long, default_value = "tensorflow")]
    pub framework: String,
    /// Model domain, e.g. image_recognition
    #[arg(long, default_value = "")]
    pub domain: String,
    /// Domain flavour
    #[arg(long, default_value = "")]
    pub domain_flavour: String,
    /// Input node name
    #[arg(long)]
    pub input: Option<String>,
    /// Output node name
    #[arg(long)]
    pub output: Option<String>,
}

impl ModelArgs {
    /// Build and validate the model description
    pub fn to_model(&self) -> Result<NewModel> {
        let model = NewModel {
            domain: self.domain.clone(),
            domain_flavour: self.domain_flavour.clone(),
            framework: self.framework.clone(),
            id: self.id.clone(),
            input: self.input.clone(),
            model_path: self.model_path.clone(),
            output: self.output.clone(),
        };
        validate_new_model(&model)?;
        Ok(model)
    }
}

impl ModelCommands {
    pub async fn run(self, client: &RestClient) -> Result<()> {
        match self {
            ModelCommands::Configuration(args) => {
                send_and_print(client.get_configuration(&args.to_model()?)).await
            }
            ModelCommands::Profile { model, model_type } => {
                send_and_print(client.get_profile(&model.to_model()?, model_type)).await
            }
            ModelCommands::Optimize(args) => {
                let model = args.to_model()?;
                if client.workspace_path().is_none() {
                    tracing::warn!("no workspace set; pass --workspace to scope the optimization");
                }
                send_and_print(client.optimize(&model)).await
            }
        }
    }
}
