mod health;
mod problem;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use errata_config::Config;
use errata_core::ProblemBuilder;
use tower_http::trace::TraceLayer;

pub use problem::{ApiError, AxumSink, ValidationErrors};

/// HTTP server that renders handler failures as RFC 9457 problems
pub struct Server {
    routes: Router,
    problems: Arc<ProblemBuilder>,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Registers the health route when enabled. Application routes are added
    /// with [`Server::merge`].
    pub fn new(config: &Config) -> Self {
        let mut routes = Router::new();

        if config.server.health.enabled {
            routes = routes.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        Self {
            routes,
            problems: Arc::new(ProblemBuilder::new(config.problem.type_base_uri.clone())),
            listen_address: config.server.listen_address,
        }
    }

    /// Add application routes
    ///
    /// Handlers should return `Result<_, ApiError>` or [`ValidationErrors`]
    /// so failures are rendered as problem documents.
    #[must_use]
    pub fn merge(mut self, routes: Router) -> Self {
        self.routes = self.routes.merge(routes);
        self
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Problem builder in use
    #[must_use]
    pub fn problems(&self) -> &ProblemBuilder {
        &self.problems
    }

    /// Consume the server and return the fully layered router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        let problems = self.problems;

        // Innermost first: fallback, problem type rebasing, tracing
        self.routes
            .fallback(problem::not_found_fallback)
            .layer(axum::middleware::from_fn(move |req, next| {
                let problems = Arc::clone(&problems);
                async move { problem::problem_type_middleware(problems, req, next).await }
            }))
            .layer(TraceLayer::new_for_http())
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, type_base_uri = self.problems.type_base_uri(), "server listening");

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
