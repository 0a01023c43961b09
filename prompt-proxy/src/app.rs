use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use futures::future::BoxFuture;
use meltdown::Token;
use telemetry::tracing::MakeRequestId;
use tower::ServiceBuilder;
use tower_http::{
    ServiceBuilderExt, catch_panic::CatchPanicLayer,
    sensitive_headers::SetSensitiveHeadersLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};

use crate::{
    app_state::{AppState, InnerAppState},
    cli,
    config::Config,
    dispatcher::Client,
    endpoints::{self, GENERATE_PATH, HEALTH_PATH},
    error::{init::InitError, runtime::RuntimeError},
    utils::catch_panic::PanicResponder,
};

/// The top level app used to start the server.
///
/// The middleware stack, outermost first:
/// 1. `CatchPanic`: a panicking handler still answers with a JSON error
/// 2. `SetSensitiveHeaders`: keeps `authorization` out of traces
/// 3. `SetRequestId`: assigns an `x-request-id` unless the caller sent one
/// 4. `Trace`: one span per request
/// 5. `PropagateRequestId`: copies `x-request-id` to the response
///
/// Routes:
/// - `POST /generate`
/// - `GET /health`
/// - anything else answers 404 with a JSON error body
#[derive(Debug, Clone)]
pub struct App {
    pub state: AppState,
    pub router: Router,
}

impl App {
    pub fn new(config: Config) -> Result<Self, InitError> {
        tracing::debug!("creating app");
        let state = Self::build_app_state(config)?;
        let router = Self::build_router(state.clone());
        Ok(Self { state, router })
    }

    fn build_app_state(config: Config) -> Result<AppState, InitError> {
        let client = Client::new(&config.upstream)?;
        info!(endpoint = %client.endpoint(), "forwarding generate requests");
        Ok(AppState(Arc::new(InnerAppState { config, client })))
    }

    fn build_router(app_state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(PanicResponder))
            .layer(SetSensitiveHeadersLayer::new(std::iter::once(
                http::header::AUTHORIZATION,
            )))
            .set_x_request_id(MakeRequestId)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(
                        DefaultMakeSpan::new()
                            .level(Level::INFO)
                            .include_headers(false),
                    )
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .propagate_x_request_id();

        Router::new()
            .route(GENERATE_PATH, post(endpoints::generate::handler))
            .route(HEALTH_PATH, get(endpoints::health))
            .fallback(endpoints::not_found)
            .with_state(app_state)
            .layer(middleware)
    }
}

impl meltdown::Service for App {
    type Future = BoxFuture<'static, Result<(), RuntimeError>>;

    fn run(self, token: Token) -> Self::Future {
        Box::pin(async move {
            let config = self.state.config();
            let addr =
                SocketAddr::from((config.server.address, config.server.port));
            let shutdown_timeout = config.server.shutdown_timeout;
            info!(address = %addr, "server starting");

            let handle = axum_server::Handle::new();
            let server = axum_server::bind(addr)
                .handle(handle.clone())
                .serve(self.router.into_make_service());
            tokio::pin!(server);
            cli::helpers::show_welcome_banner(&addr);

            tokio::select! {
                biased;
                server_output = &mut server => server_output.map_err(RuntimeError::Serve)?,
                () = token => {
                    info!(timeout = ?shutdown_timeout, "server shutting down");
                    handle.graceful_shutdown(Some(shutdown_timeout));
                    // let in-flight requests finish
                    server.await.map_err(RuntimeError::Serve)?;
                }
            };
            Ok(())
        })
    }
}
