//! API contract types for the Neural Compressor UX REST service

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::ApiContractError;

/// Identifier of a project, dataset, optimization, benchmark or profiling.
///
/// The backend hands out numeric ids for database entities while models and
/// requests are addressed by string ids, so both forms pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        Self::Number(id.into())
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        Self::Number(id.into())
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl FromStr for ResourceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(s.to_string()),
        })
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

/// Model to be onboarded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewModel {
    pub domain: String,
    pub domain_flavour: String,
    pub framework: String,
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[validate(length(min = 1))]
    pub model_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Which model of a workload to profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    OptimizedModel,
    InputModel,
}

impl ModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::OptimizedModel => "optimized_model",
            ModelType::InputModel => "input_model",
        }
    }
}

impl FromStr for ModelType {
    type Err = ApiContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "optimized_model" => Ok(ModelType::OptimizedModel),
            "input_model" => Ok(ModelType::InputModel),
            other => Err(ApiContractError::InvalidModelType(other.to_string())),
        }
    }
}

/// Entry kinds shown by the server-side file browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileBrowserFilter {
    Models,
    Datasets,
    Directories,
    /// No filtering; the `filter` query parameter is left out entirely
    All,
}

impl FileBrowserFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileBrowserFilter::Models => "models",
            FileBrowserFilter::Datasets => "datasets",
            FileBrowserFilter::Directories => "directories",
            FileBrowserFilter::All => "all",
        }
    }

    /// Value of the `filter` query parameter, if one should be sent
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            FileBrowserFilter::All => None,
            other => Some(other.as_str()),
        }
    }
}

impl FromStr for FileBrowserFilter {
    type Err = ApiContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "models" => Ok(FileBrowserFilter::Models),
            "datasets" => Ok(FileBrowserFilter::Datasets),
            "directories" => Ok(FileBrowserFilter::Directories),
            "all" => Ok(FileBrowserFilter::All),
            other => Err(ApiContractError::InvalidFileBrowserFilter(other.to_string())),
        }
    }
}

impl fmt::Display for FileBrowserFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `api/set_workspace`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetWorkspaceRequest {
    pub path: String,
}

/// Body of `api/get_default_path`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultPathRequest {
    pub name: String,
}

/// Body of `api/get_possible_values`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossibleValuesRequest {
    pub param: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

/// Body addressing a single entity by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRequest {
    pub id: ResourceId,
}

/// Body of every `.../list` call scoped to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectScopedRequest {
    pub project_id: ResourceId,
}

/// Body of `api/project/note`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesRequest {
    pub id: ResourceId,
    pub notes: String,
}

/// Body of `api/profile`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub id: String,
    pub model_path: String,
    pub model_type: ModelType,
}

/// Body of `api/configuration`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRequest {
    pub id: String,
    pub model_path: String,
    pub domain: String,
    pub domain_flavour: String,
}

impl From<&NewModel> for ConfigurationRequest {
    fn from(model: &NewModel) -> Self {
        Self {
            id: model.id.clone(),
            model_path: model.model_path.clone(),
            domain: model.domain.clone(),
            domain_flavour: model.domain_flavour.clone(),
        }
    }
}

/// Body of `api/optimize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_path: Option<String>,
    pub id: String,
}

/// Body of `api/get_workloads_list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadsListRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_path: Option<String>,
}

/// Body of `api/optimization/execute`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteOptimizationRequest {
    pub request_id: ResourceId,
    pub optimization_id: ResourceId,
}

/// Body of `api/benchmark/execute`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteBenchmarkRequest {
    pub request_id: ResourceId,
    pub benchmark_id: ResourceId,
}

/// Body of `api/profiling/execute`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteProfilingRequest {
    pub profiling_id: ResourceId,
    pub request_id: ResourceId,
}
