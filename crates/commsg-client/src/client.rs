//! Async message-center client.

use crate::config::ClientConfig;
use crate::context::ContextProvider;
use crate::servers::ServerPool;
use crate::transport::{HttpTransport, PostRequest, Transport, TransportError};
use commsg_core::{
    ApiResult, ConfigError, Detail, Endpoint, PageQuery, Params, ProjectKey, PushRequest,
    SendError, SetRead, form,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Client for one project on the message center.
///
/// Configuration is fixed at construction; the client can be cloned and
/// shared across tasks. Every call returns an [`ApiResult`], never an error.
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    project_key: ProjectKey,
    servers: ServerPool,
    token: String,
    request_code: String,
    transport: T,
}

impl Client<HttpTransport> {
    /// Build a client with the default request timeout.
    pub fn new<S: Into<String>>(
        project_key: impl Into<String>,
        servers: impl IntoIterator<Item = S>,
        token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let timeout = Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS);
        let transport = HttpTransport::new(Some(timeout))?;
        Self::with_transport(project_key, servers, token, transport)
    }

    /// Build a client from a loaded [`ClientConfig`], including its
    /// timeout and fixed `request-code`.
    pub fn from_config(config: ClientConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(config.timeout())?;
        Ok(
            Self::with_transport(config.project_key, config.servers, config.token, transport)?
                .with_correlation_code(config.request_code),
        )
    }
}

impl<T: Transport> Client<T> {
    /// Build a client over any [`Transport`].
    ///
    /// Fails when the project key is not [`PROJECT_KEY_LEN`](commsg_core::PROJECT_KEY_LEN)
    /// bytes or `servers` is empty.
    pub fn with_transport<S: Into<String>>(
        project_key: impl Into<String>,
        servers: impl IntoIterator<Item = S>,
        token: impl Into<String>,
        transport: T,
    ) -> Result<Self, ConfigError> {
        let project_key = ProjectKey::new(project_key)?;
        let servers = ServerPool::new(servers.into_iter().map(Into::into).collect())
            .ok_or(ConfigError::NoServers)?;
        Ok(Self {
            project_key,
            servers,
            token: token.into(),
            request_code: String::new(),
            transport,
        })
    }

    /// Forward `code` as the `request-code` header on every call.
    pub fn with_correlation_code(mut self, code: impl Into<String>) -> Self {
        self.request_code = code.into();
        self
    }

    /// Take the correlation code from the caller's request context.
    pub fn with_context(self, ctx: &impl ContextProvider) -> Self {
        let code = ctx.request_code();
        self.with_correlation_code(code)
    }

    /// The validated project key.
    pub fn project_key(&self) -> &ProjectKey {
        &self.project_key
    }

    /// Configured servers, as given.
    pub fn servers(&self) -> &[String] {
        self.servers.addresses()
    }

    /// Auth token sent in the `token` header.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value sent as `request-code`; empty when none was set.
    pub fn correlation_code(&self) -> &str {
        &self.request_code
    }

    /// POST `params` to `path` on a randomly chosen server.
    pub async fn send(&self, path: &str, params: Params) -> ApiResult {
        let result = match self.post(path, params).await {
            Ok(body) => ApiResult::from_body(&body),
            Err(err) => err.into(),
        };
        if !result.is_success() {
            tracing::debug!(
                path,
                code = result.code(),
                msg = result.message(),
                "message center call failed"
            );
        }
        result
    }

    /// Like [`send`](Self::send), giving up once `cancel` fires.
    pub async fn send_with_cancel(
        &self,
        path: &str,
        params: Params,
        cancel: &CancellationToken,
    ) -> ApiResult {
        tokio::select! {
            result = self.send(path, params) => result,
            _ = cancel.cancelled() => {
                tracing::debug!(path, "message center call cancelled");
                SendError::Transport(TransportError::Cancelled.to_string()).into()
            }
        }
    }

    /// [`send`](Self::send) to a known endpoint.
    pub async fn call(&self, endpoint: Endpoint, params: Params) -> ApiResult {
        self.send(endpoint.path(), params).await
    }

    /// Push a message to IM accounts.
    pub async fn push(&self, request: PushRequest) -> ApiResult {
        let params = request.into_params(&self.project_key);
        self.call(Endpoint::Push, params).await
    }

    /// List messages after a cursor.
    pub async fn page(&self, query: PageQuery) -> ApiResult {
        self.call(Endpoint::Page, query.into_params()).await
    }

    /// Mark messages read. [`SetRead::all`] marks every message.
    pub async fn set_read(&self, request: SetRead) -> ApiResult {
        self.call(Endpoint::SetRead, request.into_params()).await
    }

    /// Detail of a message sent or received by the caller.
    pub async fn detail(&self, id: u64) -> ApiResult {
        self.call(Endpoint::Detail, Detail::new(id).into_params()).await
    }

    /// The caller's contact list.
    pub async fn contact_all(&self) -> ApiResult {
        self.call(Endpoint::Contacts, Params::new()).await
    }

    /// Contacts with their message counts.
    pub async fn contact_msg_statistics(&self) -> ApiResult {
        self.call(Endpoint::ContactStatistics, Params::new()).await
    }

    async fn post(&self, path: &str, params: Params) -> Result<String, SendError> {
        let url = format!("{}{}", self.servers.pick(), path);
        tracing::debug!(%url, request_code = %self.request_code, "posting to message center");

        let request = PostRequest {
            url,
            token: self.token.clone(),
            request_code: self.request_code.clone(),
            form: form::encode(&params),
        };
        self.transport.post(request).await.map_err(|e| {
            tracing::warn!(path, error = %e, "message center transport error");
            SendError::Transport(e.to_string())
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use commsg_core::{MISSING_FIELDS_MSG, MsgType, ReadFilter, WRONG_TYPE_MSG};
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    pub(crate) const KEY: &str = "abcdefghij0123456789";

    /// Records every request and answers with a canned reply.
    #[derive(Clone, Debug)]
    pub(crate) struct Recorder {
        requests: Arc<Mutex<Vec<PostRequest>>>,
        reply: Result<String, String>,
    }

    impl Recorder {
        pub(crate) fn replying(body: &str) -> Self {
            Self {
                requests: Arc::default(),
                reply: Ok(body.to_string()),
            }
        }

        pub(crate) fn failing(error: &str) -> Self {
            Self {
                requests: Arc::default(),
                reply: Err(error.to_string()),
            }
        }

        pub(crate) fn ok() -> Self {
            Self::replying(r#"{"code":"00000","data":[],"msg":"ok"}"#)
        }

        pub(crate) fn requests(&self) -> Vec<PostRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn last(&self) -> PostRequest {
            self.requests().pop().unwrap()
        }
    }

    impl Transport for Recorder {
        async fn post(&self, request: PostRequest) -> Result<String, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.reply.clone().map_err(TransportError::Other)
        }
    }

    pub(crate) fn test_client(transport: Recorder) -> Client<Recorder> {
        Client::with_transport(KEY, ["10.0.0.1:9501"], "tok", transport).unwrap()
    }

    fn form(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn rejects_bad_project_key() {
        let wide = "项目".repeat(10);
        for key in ["", "too-short", "abcdefghij0123456789X", wide.as_str()] {
            let err = Client::with_transport(key, ["a:1"], "", Recorder::ok()).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidProjectKey { .. }));
        }
    }

    #[test]
    fn rejects_empty_server_list() {
        let servers: Vec<String> = Vec::new();
        let err = Client::with_transport(KEY, servers, "", Recorder::ok()).unwrap_err();
        assert_eq!(err, ConfigError::NoServers);
    }

    #[test]
    fn correlation_code_from_context() {
        let mut ctx = HashMap::new();
        ctx.insert("request-code".to_string(), "trace-1".to_string());
        let traced = test_client(Recorder::ok()).with_context(&ctx);
        assert_eq!(traced.correlation_code(), "trace-1");

        let empty: HashMap<String, String> = HashMap::new();
        let untraced = test_client(Recorder::ok()).with_context(&empty);
        assert_eq!(untraced.correlation_code(), "");
    }

    #[tokio::test]
    async fn context_code_reaches_the_header() {
        let mut ctx = HashMap::new();
        ctx.insert("request-code".to_string(), "trace-ctx".to_string());
        let transport = Recorder::ok();
        let client = test_client(transport.clone()).with_context(&ctx);

        client.detail(3).await;
        assert_eq!(transport.last().request_code, "trace-ctx");
    }

    #[tokio::test]
    async fn send_builds_url_and_headers() {
        let transport = Recorder::ok();
        let client = test_client(transport.clone()).with_correlation_code("trace-9");

        let result = client.contact_all().await;
        assert!(result.is_success());

        let request = transport.last();
        assert_eq!(request.url, "http://10.0.0.1:9501/im-contact/list");
        assert_eq!(request.token, "tok");
        assert_eq!(request.request_code, "trace-9");
        assert!(request.form.is_empty());
    }

    #[tokio::test]
    async fn push_dedups_and_flattens() {
        let transport = Recorder::ok();
        let client = test_client(transport.clone());

        let request = PushRequest::new("admin", ["a", "a", "b"], "hello").msg_type(MsgType::Direct);
        client.push(request).await;

        let sent = transport.last();
        assert_eq!(sent.url, "http://10.0.0.1:9501/wsClient/push");
        assert_eq!(
            sent.form,
            form(&[
                ("to[0]", "a"),
                ("to[1]", "b"),
                ("projectKey", KEY),
                ("sendUsrName", "admin"),
                ("msgType", "M0001"),
                ("customType", ""),
                ("source", "sys"),
                ("msgBody[content]", "hello"),
                ("sendUsrPwd", ""),
            ])
        );
    }

    #[tokio::test]
    async fn page_read_filter() {
        let transport = Recorder::ok();
        let client = test_client(transport.clone());

        client.page(PageQuery::new(0)).await;
        let keys: Vec<String> = transport.last().form.into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["lastId", "pageSize"]);

        client.page(PageQuery::new(0).read(ReadFilter::Unread)).await;
        assert!(transport.last().form.contains(&("isRead".to_string(), "0".to_string())));
    }

    #[tokio::test]
    async fn set_read_all_sends_nothing() {
        let transport = Recorder::ok();
        let client = test_client(transport.clone());

        client.set_read(SetRead::all()).await;
        let sent = transport.last();
        assert_eq!(sent.url, "http://10.0.0.1:9501/im-msg/setRead");
        assert!(sent.form.is_empty());

        client.set_read(SetRead::ids([4, 8])).await;
        assert_eq!(transport.last().form, form(&[("ids[0]", "4"), ("ids[1]", "8")]));
    }

    #[tokio::test]
    async fn detail_and_statistics_paths() {
        let transport = Recorder::ok();
        let client = test_client(transport.clone());

        client.detail(31).await;
        let sent = transport.last();
        assert_eq!(sent.url, "http://10.0.0.1:9501/im-msg/details");
        assert_eq!(sent.form, form(&[("id", "31")]));

        client.contact_msg_statistics().await;
        let sent = transport.last();
        assert_eq!(sent.url, "http://10.0.0.1:9501/im-contact/msgStatistics");
        assert!(sent.form.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_becomes_failed_result() {
        let client = test_client(Recorder::failing("connection refused"));
        let result = client.detail(1).await;
        assert!(!result.is_success());
        assert_eq!(result.message(), "connection refused");
        assert_eq!(result.code(), "");
    }

    #[tokio::test]
    async fn bad_bodies_become_failed_results() {
        let result = test_client(Recorder::replying("not json")).contact_all().await;
        assert_eq!(result.message(), WRONG_TYPE_MSG);

        let result = test_client(Recorder::replying(r#"{"code":"00000","msg":"ok"}"#))
            .contact_all()
            .await;
        assert_eq!(result.message(), MISSING_FIELDS_MSG);
    }

    #[tokio::test]
    async fn application_error_is_not_success() {
        let body = r#"{"code":"B0001","data":{"retry":false},"msg":"account locked"}"#;
        let result = test_client(Recorder::replying(body)).contact_all().await;
        assert!(!result.is_success());
        assert_eq!(result.code(), "B0001");
        assert_eq!(result.message(), "account locked");
        assert_eq!(result.data()["retry"], false);
    }

    #[tokio::test]
    async fn spreads_calls_across_servers() {
        let transport = Recorder::ok();
        let client = Client::with_transport(
            KEY,
            ["a:1", "https://b.example.com", "c:3"],
            "",
            transport.clone(),
        )
        .unwrap();

        for _ in 0..300 {
            client.contact_all().await;
        }
        let hosts: HashSet<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            hosts,
            HashSet::from([
                "http://a:1/im-contact/list".to_string(),
                "https://b.example.com/im-contact/list".to_string(),
                "http://c:3/im-contact/list".to_string(),
            ])
        );
    }

    #[tokio::test]
    async fn cancelled_call_fails() {
        let token = CancellationToken::new();
        token.cancel();

        struct Hang;
        impl Transport for Hang {
            async fn post(&self, _: PostRequest) -> Result<String, TransportError> {
                std::future::pending().await
            }
        }

        let client = Client::with_transport(KEY, ["a:1"], "", Hang).unwrap();
        let result = client
            .send_with_cancel(Endpoint::Contacts.path(), Params::new(), &token)
            .await;
        assert!(!result.is_success());
        assert_eq!(result.message(), "request cancelled");
    }
}
