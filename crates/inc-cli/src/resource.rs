//! Dataset, model, optimization, benchmark and profiling commands

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use inc_rest_api_contract::ResourceId;
use inc_rest_client::{PendingRequest, RestClient};
use std::path::PathBuf;

use crate::{load_json, parse_resource_id, send_and_print};

/// Resource families that follow the list/details/add/execute pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Dataset,
    Model,
    Optimization,
    Benchmark,
    Profiling,
}

#[derive(Args)]
pub struct ResourceArgs {
    /// Resource family
    #[arg(value_enum)]
    pub kind: ResourceKind,

    #[command(subcommand)]
    pub action: ResourceAction,
}

#[derive(Subcommand)]
pub enum ResourceAction {
    /// List resources of a project
    List {
        /// Project id
        #[arg(value_parser = parse_resource_id)]
        project_id: ResourceId,
    },
    /// Show resource details
    Show {
        /// Resource id
        #[arg(value_parser = parse_resource_id)]
        id: ResourceId,
    },
    /// Add a resource described by a JSON file
    Add {
        /// JSON file with the resource payload
        file: PathBuf,
    },
    /// Execute a resource
    Execute {
        /// Resource id
        #[arg(value_parser = parse_resource_id)]
        id: ResourceId,
        /// Client-chosen request id used to correlate progress updates
        #[arg(value_parser = parse_resource_id)]
        request_id: ResourceId,
    },
}

impl ResourceArgs {
    pub async fn run(self, client: &RestClient) -> Result<()> {
        let request = self.kind.request(client, self.action)?;
        send_and_print(request).await
    }
}

impl ResourceKind {
    /// Build the request for `action`, rejecting actions the family lacks
    pub fn request(self, client: &RestClient, action: ResourceAction) -> Result<PendingRequest> {
        use ResourceAction::*;
        use ResourceKind::*;

        Ok(match (self, action) {
            (Dataset, List { project_id }) => client.get_dataset_list(project_id),
            (Dataset, Show { id }) => client.get_dataset_details(id),
            (Dataset, Add { file }) => client.add_dataset(&load_json(&file)?),
            (Model, List { project_id }) => client.get_model_list(project_id),
            (Optimization, List { project_id }) => client.get_optimization_list(project_id),
            (Optimization, Show { id }) => client.get_optimization_details(id),
            (Optimization, Add { file }) => client.add_optimization(&load_json(&file)?),
            (Optimization, Execute { id, request_id }) => {
                client.execute_optimization(id, request_id)
            }
            (Benchmark, List { project_id }) => client.get_benchmarks_list(project_id),
            (Benchmark, Show { id }) => client.get_benchmark_details(id),
            (Benchmark, Add { file }) => client.add_benchmark(&load_json(&file)?),
            (Benchmark, Execute { id, request_id }) => client.execute_benchmark(id, request_id),
            (Profiling, List { project_id }) => client.get_profiling_list(project_id),
            (Profiling, Show { id }) => client.get_profiling_details(id),
            (Profiling, Add { file }) => client.add_profiling(&load_json(&file)?),
            (Profiling, Execute { id, request_id }) => client.execute_profiling(id, request_id),
            (kind, action) => anyhow::bail!(
                "{} does not support '{}'",
                kind.name(),
                action.name()
            ),
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Dataset => "dataset",
            ResourceKind::Model => "model",
            ResourceKind::Optimization => "optimization",
            ResourceKind::Benchmark => "benchmark",
            ResourceKind::Profiling => "profiling",
        }
    }
}

impl ResourceAction {
    fn name(&self) -> &'static str {
        match self {
            ResourceAction::List { .. } => "list",
            ResourceAction::Show { .. } => "show",
            ResourceAction::Add { .. } => "add",
            ResourceAction::Execute { .. } => "execute",
        }
    }
}
