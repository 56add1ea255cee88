// web-server/src/middleware/wallet_auth.rs
use std::sync::Arc;
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::StatusCode,
    Error, HttpMessage, HttpResponse, ResponseError,
};
use common::auth::{AuthError, AuthPipeline};
use futures_util::future::{LocalBoxFuture, Ready, ready};

/// Authentication failure surfaced as an actix error
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct AuthRejection(#[from] pub AuthError);

impl ResponseError for AuthRejection {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.0.error_body())
    }
}

/// Middleware factory that verifies wallet signatures before the wrapped
/// services run. On success the `CallerIdentity` is placed in the request
/// extensions, where handlers pick it up with `web::ReqData`.
#[derive(Debug, Clone)]
pub struct WalletAuth {
    pipeline: Arc<AuthPipeline>,
}

impl WalletAuth {
    pub fn new(pipeline: AuthPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for WalletAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = WalletAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(WalletAuthMiddleware {
            service,
            pipeline: Arc::clone(&self.pipeline),
        }))
    }
}

pub struct WalletAuthMiddleware<S> {
    service: S,
    pipeline: Arc<AuthPipeline>,
}

impl<S, B> Service<ServiceRequest> for WalletAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_string();
        let result = self.pipeline.authenticate(
            |name| req.headers().get(name).map(|value| value.as_bytes()),
            &path,
        );

        match result {
            Ok(identity) => {
                tracing::debug!("Verified wallet {} for {}", identity, path);
                req.extensions_mut().insert(identity);

                let fut = self.service.call(req);
                Box::pin(async move {
                    fut.await
                })
            },
            Err(error) => {
                if error.is_client_error() {
                    tracing::warn!("Rejected request to {} [{}]: {}", path, error.category(), error);
                } else {
                    tracing::error!("Wallet verification failed for {}: {}", path, error);
                }

                Box::pin(async move {
                    Err(AuthRejection(error).into())
                })
            }
        }
    }
}
