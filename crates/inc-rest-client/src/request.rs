//! Deferred requests.
//!
//! Every facade method builds a [`PendingRequest`] and hands it back without
//! touching the network. The caller decides when (and whether) it runs.

use futures::future::BoxFuture;
use reqwest::{Client as HttpClient, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::IntoFuture;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::auth::AuthMethod;
use crate::error::{RestClientError, RestClientResult};
use crate::session::SessionContext;

#[derive(Debug)]
struct Prepared {
    url: Url,
    body: Option<Value>,
}

/// A fully described HTTP call that has not been sent yet.
///
/// Sending consumes the handle, so each handle issues at most one request.
/// Dropping it (or the future returned by [`PendingRequest::send`]) before
/// completion cancels the call. Authentication is read from the session when
/// the request is sent, not when the handle is built.
#[derive(Debug)]
#[must_use = "requests do nothing until they are sent or awaited"]
pub struct PendingRequest {
    http_client: HttpClient,
    method: Method,
    prepared: RestClientResult<Prepared>,
    session: Arc<SessionContext>,
    attach_token: bool,
}

impl PendingRequest {
    pub(crate) fn new(
        http_client: HttpClient,
        method: Method,
        url: RestClientResult<Url>,
        body: RestClientResult<Option<Value>>,
        session: Arc<SessionContext>,
        attach_token: bool,
    ) -> Self {
        let prepared = url.and_then(|url| Ok(Prepared { url, body: body? }));
        Self {
            http_client,
            method,
            prepared,
            session,
            attach_token,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Authentication the request would carry if sent now
    pub(crate) fn auth(&self) -> AuthMethod {
        AuthMethod::from_session(self.session.token(), self.attach_token)
    }

    /// Target URL, or `None` if it could not be built
    pub fn url(&self) -> Option<&Url> {
        self.prepared.as_ref().ok().map(|p| &p.url)
    }

    /// JSON body, if the request carries one
    pub fn body(&self) -> Option<&Value> {
        self.prepared.as_ref().ok().and_then(|p| p.body.as_ref())
    }

    /// Issue the request and return the decoded JSON response.
    ///
    /// An empty success body decodes to `Value::Null`.
    pub async fn send(self) -> RestClientResult<Value> {
        let headers = self.auth().headers()?;
        let Prepared { url, body } = self.prepared?;
        debug!(method = %self.method, %url, "sending request");

        let mut request = self.http_client.request(self.method, url).headers(headers);

        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        handle_response(response).await
    }

    /// Issue the request and deserialize the response into `T`
    pub async fn send_json<T: DeserializeOwned>(self) -> RestClientResult<T> {
        let value = self.send().await?;
        Ok(serde_json::from_value(value)?)
    }
}

impl IntoFuture for PendingRequest {
    type Output = RestClientResult<Value>;
    type IntoFuture = BoxFuture<'static, RestClientResult<Value>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

async fn handle_response(response: Response) -> RestClientResult<Value> {
    let status = response.status();
    let url = response.url().clone();
    let text = response.text().await?;

    if status.is_success() {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_str(&text).map_err(RestClientError::from);
    }

    warn!(%status, %url, "backend returned error status");
    match serde_json::from_str::<Value>(&text) {
        Ok(body) => Err(RestClientError::ServerError { status, body }),
        Err(_) => Err(RestClientError::UnexpectedResponse { status, body: text }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pending(url: RestClientResult<Url>, body: Option<Value>) -> PendingRequest {
        PendingRequest::new(
            HttpClient::new(),
            Method::POST,
            url,
            Ok(body),
            Arc::new(SessionContext::new()),
            false,
        )
    }

    #[test]
    fn test_accessors_describe_request() {
        let url = Url::parse("http://localhost:5000/api/project").unwrap();
        let request = pending(Ok(url), Some(json!({"id": 1})));

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.url().unwrap().path(), "/api/project");
        assert_eq!(request.body(), Some(&json!({"id": 1})));
    }

    #[tokio::test]
    async fn test_url_error_surfaces_on_send() {
        let request = pending(Err(url::ParseError::EmptyHost.into()), None);
        assert!(request.url().is_none());

        let err = request.send().await.unwrap_err();
        assert!(matches!(err, RestClientError::Url(_)));
    }

    #[test]
    fn test_auth_follows_session_until_sent() {
        let session = Arc::new(SessionContext::new());
        let url = Url::parse("http://localhost:5000/api/project/list").unwrap();
        let request = PendingRequest::new(HttpClient::new(), Method::GET, Ok(url), Ok(None), session.clone(), true);
        assert_eq!(request.auth(), AuthMethod::None);

        session.set_token("late");
        assert_eq!(request.auth(), AuthMethod::bearer("late"));
    }
}
