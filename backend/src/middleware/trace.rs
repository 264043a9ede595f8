//! Request-context middleware.
//!
//! Each incoming request receives a UUID trace identifier and has its path
//! recorded in task-local storage. Error payloads read the path from here so
//! handlers never thread the request through the domain.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`RequestContext::scope`] when moving work onto other tasks.

use std::future::Future;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::{debug, error};
use uuid::Uuid;

/// Response header carrying the per-request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static REQUEST_CONTEXT: RequestContext;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use movies_api::middleware::trace::TraceId;
///
/// let id: TraceId = "00000000-0000-0000-0000-000000000000"
///     .parse()
///     .expect("valid UUID");
/// assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    #[rustfmt::skip]
    fn generate() -> Self { Self(Uuid::new_v4()) }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Request-scoped values visible to handlers and error mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    trace_id: TraceId,
    path: String,
}

impl RequestContext {
    /// Build a context for `path` with a fresh trace identifier.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            trace_id: TraceId::generate(),
            path: path.into(),
        }
    }

    #[must_use]
    pub const fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    /// Request URI path, without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the context in scope, if any.
    #[rustfmt::skip]
    pub fn current() -> Option<Self> { REQUEST_CONTEXT.try_with(Clone::clone).ok() }

    /// Execute `fut` with `context` in scope.
    ///
    /// # Examples
    /// ```
    /// use movies_api::middleware::trace::RequestContext;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let context = RequestContext::new("/api/movies");
    /// let observed = RequestContext::scope(context.clone(), async {
    ///     RequestContext::current()
    /// })
    /// .await;
    /// assert_eq!(observed, Some(context));
    /// # });
    /// ```
    pub async fn scope<Fut>(context: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_CONTEXT.scope(context, fut).await
    }
}

/// Middleware scoping a [`RequestContext`] around every request and adding
/// a `trace-id` header to every response.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use movies_api::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let context = RequestContext::new(req.path());
        let method = req.method().clone();
        let trace_id = context.trace_id();
        let header_value = trace_id.to_string();
        // Routing and extraction may start synchronously inside `call`.
        let fut = REQUEST_CONTEXT.sync_scope(context.clone(), || self.service.call(req));
        Box::pin(RequestContext::scope(context, async move {
            let mut res = fut.await?;
            debug!(
                %trace_id,
                %method,
                path = res.request().path(),
                status = res.status().as_u16(),
                "request completed"
            );
            match HeaderValue::from_str(&header_value) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(
                        %error,
                        trace_id = %trace_id,
                        "failed to encode trace identifier header"
                    );
                }
            }
            Ok(res)
        }))
    }
}
