//! Access log: one `request_completed` event per request.

use std::future::{ready, Ready};
use std::time::{Duration, Instant};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{Method, StatusCode};
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{event, Level};

use crate::auth::claims::VerifiedIdentity;
use crate::trace_ctx::TraceId;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<TraceId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, authenticated) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request().extensions().contains::<VerifiedIdentity>(),
                ),
                Err(err) => (err.as_response_error().status_code(), false),
            };

            RequestSummary {
                method,
                path,
                trace_id,
                status,
                elapsed: start.elapsed(),
                authenticated,
            }
            .emit();

            result
        })
    }
}

/// What the access log records about a finished request.
struct RequestSummary {
    method: Method,
    path: String,
    trace_id: String,
    status: StatusCode,
    elapsed: Duration,
    authenticated: bool,
}

impl RequestSummary {
    fn emit(&self) {
        // `event!` needs a constant level, so each arm expands its own callsite.
        macro_rules! completed {
            ($level:expr, $summary:ident) => {
                event!(
                    $level,
                    http.method = %$summary.method,
                    url.path = %$summary.path,
                    http.status_code = $summary.status.as_u16(),
                    duration_us = u64::try_from($summary.elapsed.as_micros()).unwrap_or(u64::MAX),
                    trace_id = %$summary.trace_id,
                    authenticated = $summary.authenticated,
                    message = "request_completed"
                )
            };
        }

        let level = level_for(self.status);
        if level == Level::ERROR {
            completed!(Level::ERROR, self);
        } else if level == Level::WARN {
            completed!(Level::WARN, self);
        } else {
            completed!(Level::INFO, self);
        }
    }
}

/// 5xx logs at ERROR, 4xx at WARN, anything else at INFO.
fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}
