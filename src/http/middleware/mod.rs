/// Request-scoped middleware: request id propagation and access logging.
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    time::Instant,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct RequestIdValue(pub String);

/// Honors an inbound request id header, generates a UUID otherwise, and
/// echoes the id on the response.
pub struct RequestId {
    header_name: String,
}

impl RequestId {
    pub fn new(header_name: String) -> Self {
        Self { header_name }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestId
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdService {
            service: Rc::new(service),
            header_name: self.header_name.clone(),
        }))
    }
}

pub struct RequestIdService<S> {
    service: Rc<S>,
    header_name: String,
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = req
            .headers()
            .get(&self.header_name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        req.extensions_mut()
            .insert(RequestIdValue(request_id.clone()));

        let service = Rc::clone(&self.service);
        let header_name = self.header_name.clone();

        Box::pin(async move {
            let mut res = service.call(req).await?;
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(header_name.as_bytes()),
                HeaderValue::from_str(&request_id),
            ) {
                res.headers_mut().insert(name, value);
            }
            Ok(res)
        })
    }
}

/// Structured access log; health probes are exempt to keep the log usable.
pub struct AccessLog;

impl<S, B> Transform<S, ServiceRequest> for AccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessLogService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLogService {
            service: Rc::new(service),
        }))
    }
}

pub struct AccessLogService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AccessLogService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let quiet = matches!(req.path(), "/healthz" | "/readyz");

        let request_id = req
            .extensions()
            .get::<RequestIdValue>()
            .map(|value| value.0.clone())
            .unwrap_or_default();

        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let res = service.call(req).await?;
            if !quiet {
                tracing::info!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = %res.status().as_u16(),
                    duration_ms = %started.elapsed().as_millis(),
                    "http request"
                );
            }
            Ok(res)
        })
    }
}
