//! Main REST API client implementation

use inc_rest_api_contract::*;
use reqwest::{Client as HttpClient, Method};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{RestClientError, RestClientResult};
use crate::events::EventChannels;
use crate::presenter::{ErrorPresenter, LogErrorPresenter};
use crate::request::PendingRequest;
use crate::session::SessionContext;

/// REST API client for the Neural Compressor UX backend.
///
/// Cloning is cheap; clones share the session state, the event channels and
/// the error presenter.
#[derive(Clone)]
pub struct RestClient {
    http_client: HttpClient,
    base_url: Url,
    attach_token: bool,
    session: Arc<SessionContext>,
    events: Arc<EventChannels>,
    error_presenter: Arc<dyn ErrorPresenter>,
}

impl RestClient {
    /// Create a new REST client
    pub fn new(config: ClientConfig) -> RestClientResult<Self> {
        let mut builder = HttpClient::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: config.base_url,
            attach_token: config.attach_token,
            session: Arc::new(SessionContext::new()),
            events: Arc::new(EventChannels::default()),
            error_presenter: Arc::new(LogErrorPresenter),
        })
    }

    /// Create a client from a base URL string
    pub fn from_url(base_url: &str) -> RestClientResult<Self> {
        Self::new(ClientConfig::from_url(base_url)?)
    }

    /// Create a client configured from the process environment
    pub fn from_env() -> RestClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Replace the presenter used for errors of eager requests
    pub fn with_error_presenter(mut self, presenter: Arc<dyn ErrorPresenter>) -> Self {
        self.error_presenter = presenter;
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Notification channels shared with the rest of the application
    pub fn events(&self) -> &EventChannels {
        &self.events
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    // Session

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.session.set_token(token);
    }

    pub fn workspace_path(&self) -> Option<String> {
        self.session.workspace_path()
    }

    /// Switch the workspace.
    ///
    /// The path is recorded locally right away, before and regardless of the
    /// outcome of the returned request.
    pub fn set_workspace_path(&self, path: impl Into<String>) -> PendingRequest {
        let path = path.into();
        self.session.set_workspace_path(path.clone());
        self.post("api/set_workspace", &SetWorkspaceRequest { path })
    }

    /// Fetch system info in the background.
    ///
    /// On success the cached value is replaced; on failure the error goes to
    /// the error presenter and the cache is left alone. The handle only
    /// signals completion. Outside a tokio runtime nothing is spawned: the
    /// error is presented and `None` is returned.
    pub fn get_system_info(&self) -> Option<JoinHandle<()>> {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                self.open_error_dialog(&RestClientError::Runtime(err.to_string()));
                return None;
            }
        };

        let request = self.get("api/system_info");
        let client = self.clone();
        Some(runtime.spawn(async move {
            match request.send().await {
                Ok(info) => client.session.set_system_info(info),
                Err(err) => client.open_error_dialog(&err),
            }
        }))
    }

    /// Cached system info, `{}` until the first successful fetch
    pub fn system_info(&self) -> Value {
        self.session.system_info()
    }

    pub fn get_default_path(&self, name: impl Into<String>) -> PendingRequest {
        self.post("api/get_default_path", &DefaultPathRequest { name: name.into() })
    }

    // Discovery and metadata

    /// Model graph, optionally expanding node groups.
    ///
    /// `path` and `group` values are concatenated into the query as given.
    pub fn get_model_graph(&self, path: &str, groups: Option<&[&str]>) -> PendingRequest {
        let mut endpoint = format!("api/model/graph?path={}", path);
        for group in groups.unwrap_or_default() {
            endpoint.push_str("&group=");
            endpoint.push_str(group);
        }
        self.get(&endpoint)
    }

    pub fn get_dictionary(&self, param: &str) -> PendingRequest {
        self.get(&format!("api/dict/{}", param))
    }

    pub fn get_dictionary_with_param<B: Serialize + ?Sized>(
        &self,
        path: &str,
        param_name: &str,
        param: &B,
    ) -> PendingRequest {
        self.post(&format!("api/dict/{}/{}", path, param_name), param)
    }

    pub fn get_possible_values(
        &self,
        param: impl Into<String>,
        config: Option<Value>,
    ) -> PendingRequest {
        self.post(
            "api/get_possible_values",
            &PossibleValuesRequest {
                param: param.into(),
                config,
            },
        )
    }

    /// Browse the server filesystem below `path`
    pub fn get_file_system(&self, path: &str, filter: FileBrowserFilter) -> PendingRequest {
        let url = self.endpoint("api/filesystem").map(|mut url| {
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("path", &format!("{}/", path));
                if let Some(filter) = filter.query_value() {
                    query.append_pair("filter", filter);
                }
            }
            url
        });
        self.request(Method::GET, url, None::<&()>)
    }

    pub fn list_model_zoo(&self) -> PendingRequest {
        self.get("api/list_model_zoo")
    }

    // Projects

    pub fn get_project_list(&self) -> PendingRequest {
        self.get("api/project/list")
    }

    pub fn get_project_details(&self, id: impl Into<ResourceId>) -> PendingRequest {
        self.post("api/project", &IdRequest { id: id.into() })
    }

    pub fn create_project<B: Serialize + ?Sized>(&self, project: &B) -> PendingRequest {
        self.post("api/project/create", project)
    }

    pub fn add_notes(&self, id: impl Into<ResourceId>, notes: impl Into<String>) -> PendingRequest {
        self.post(
            "api/project/note",
            &NotesRequest {
                id: id.into(),
                notes: notes.into(),
            },
        )
    }

    // Datasets

    pub fn get_dataset_list(&self, project_id: impl Into<ResourceId>) -> PendingRequest {
        self.list("api/dataset/list", project_id.into())
    }

    pub fn get_dataset_details(&self, id: impl Into<ResourceId>) -> PendingRequest {
        self.post("api/dataset", &IdRequest { id: id.into() })
    }

    pub fn add_dataset<B: Serialize + ?Sized>(&self, dataset: &B) -> PendingRequest {
        self.post("api/dataset/add", dataset)
    }

    // Models

    pub fn get_model_list(&self, project_id: impl Into<ResourceId>) -> PendingRequest {
        self.list("api/model/list", project_id.into())
    }

    pub fn get_profile(&self, model: &NewModel, model_type: ModelType) -> PendingRequest {
        self.post(
            "api/profile",
            &ProfileRequest {
                id: model.id.clone(),
                model_path: model.model_path.clone(),
                model_type,
            },
        )
    }

    pub fn get_configuration(&self, model: &NewModel) -> PendingRequest {
        self.post("api/configuration", &ConfigurationRequest::from(model))
    }

    /// Optimize a model inside the current workspace
    pub fn optimize(&self, model: &NewModel) -> PendingRequest {
        self.post(
            "api/optimize",
            &OptimizeRequest {
                workspace_path: self.session.workspace_path(),
                id: model.id.clone(),
            },
        )
    }

    /// Workloads of the current workspace
    pub fn get_all_models(&self) -> PendingRequest {
        self.post(
            "api/get_workloads_list",
            &WorkloadsListRequest {
                workspace_path: self.session.workspace_path(),
            },
        )
    }

    /// Save a workload.
    ///
    /// `workload` is modified in place: its `workspace_path` is set to the
    /// current workspace, or removed when no workspace has been set.
    pub fn save_workload(&self, workload: &mut Map<String, Value>) -> PendingRequest {
        self.stamp_workspace_path(workload);
        self.post("api/save_workload", &*workload)
    }

    /// Save an example workload; modifies `workload` like [`Self::save_workload`]
    pub fn save_example_workload(&self, workload: &mut Map<String, Value>) -> PendingRequest {
        self.stamp_workspace_path(workload);
        self.post("api/save_example_workload", &*workload)
    }

    // Optimizations

    pub fn get_optimization_list(&self, project_id: impl Into<ResourceId>) -> PendingRequest {
        self.list("api/optimization/list", project_id.into())
    }

    pub fn get_optimization_details(&self, id: impl Into<ResourceId>) -> PendingRequest {
        self.post("api/optimization", &IdRequest { id: id.into() })
    }

    pub fn add_optimization<B: Serialize + ?Sized>(&self, optimization: &B) -> PendingRequest {
        self.post("api/optimization/add", optimization)
    }

    pub fn execute_optimization(
        &self,
        optimization_id: impl Into<ResourceId>,
        request_id: impl Into<ResourceId>,
    ) -> PendingRequest {
        self.post(
            "api/optimization/execute",
            &ExecuteOptimizationRequest {
                request_id: request_id.into(),
                optimization_id: optimization_id.into(),
            },
        )
    }

    // Benchmarks

    pub fn get_benchmarks_list(&self, project_id: impl Into<ResourceId>) -> PendingRequest {
        self.list("api/benchmark/list", project_id.into())
    }

    pub fn get_benchmark_details(&self, id: impl Into<ResourceId>) -> PendingRequest {
        self.post("api/benchmark", &IdRequest { id: id.into() })
    }

    pub fn add_benchmark<B: Serialize + ?Sized>(&self, benchmark: &B) -> PendingRequest {
        self.post("api/benchmark/add", benchmark)
    }

    pub fn execute_benchmark(
        &self,
        benchmark_id: impl Into<ResourceId>,
        request_id: impl Into<ResourceId>,
    ) -> PendingRequest {
        self.post(
            "api/benchmark/execute",
            &ExecuteBenchmarkRequest {
                request_id: request_id.into(),
                benchmark_id: benchmark_id.into(),
            },
        )
    }

    // Profiling

    pub fn get_profiling_list(&self, project_id: impl Into<ResourceId>) -> PendingRequest {
        self.list("api/profiling/list", project_id.into())
    }

    pub fn get_profiling_details(&self, id: impl Into<ResourceId>) -> PendingRequest {
        self.post("api/profiling", &IdRequest { id: id.into() })
    }

    pub fn add_profiling<B: Serialize + ?Sized>(&self, profiling: &B) -> PendingRequest {
        self.post("api/profiling/add", profiling)
    }

    pub fn execute_profiling(
        &self,
        profiling_id: impl Into<ResourceId>,
        request_id: impl Into<ResourceId>,
    ) -> PendingRequest {
        self.post(
            "api/profiling/execute",
            &ExecuteProfilingRequest {
                profiling_id: profiling_id.into(),
                request_id: request_id.into(),
            },
        )
    }

    /// Hand an error to the error presenter
    pub fn open_error_dialog(&self, error: &RestClientError) {
        self.error_presenter.present(error);
    }

    // Private helper methods

    fn stamp_workspace_path(&self, workload: &mut Map<String, Value>) {
        match self.session.workspace_path() {
            Some(path) => {
                workload.insert("workspace_path".to_string(), Value::String(path));
            }
            None => {
                workload.remove("workspace_path");
            }
        }
    }

    fn endpoint(&self, path: &str) -> RestClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn list(&self, path: &str, project_id: ResourceId) -> PendingRequest {
        self.post(path, &ProjectScopedRequest { project_id })
    }

    fn get(&self, path: &str) -> PendingRequest {
        self.request(Method::GET, self.endpoint(path), None::<&()>)
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> PendingRequest {
        self.request(Method::POST, self.endpoint(path), Some(body))
    }

    fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: RestClientResult<Url>,
        body: Option<&B>,
    ) -> PendingRequest {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(RestClientError::from);
        PendingRequest::new(
            self.http_client.clone(),
            method,
            url,
            body,
            self.session.clone(),
            self.attach_token,
        )
    }
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url.as_str())
            .field("attach_token", &self.attach_token)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
