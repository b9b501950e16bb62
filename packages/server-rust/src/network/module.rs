//! Network module with deferred startup lifecycle.
//!
//! `new()` assembles shared state, `start()` binds the TCP listener, and
//! `serve()` accepts connections until the shutdown future resolves.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::config::NetworkConfig;
use super::handlers::{
    graphql_handler, health_handler, liveness_handler, playground_handler, readiness_handler,
    AppState,
};
use super::lifecycle::Lifecycle;
use super::middleware::{track_in_flight, with_http_layers};
use crate::context_builder::ContextBuilder;
use crate::graphql::UserGraphSchema;

/// Owns the HTTP server from bind to drain.
pub struct NetworkModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    state: AppState,
}

impl NetworkModule {
    /// Creates the module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, schema: UserGraphSchema, contexts: ContextBuilder) -> Self {
        let state = AppState {
            schema,
            contexts: Arc::new(contexts),
            lifecycle: Arc::new(Lifecycle::new()),
            config: Arc::new(config.clone()),
            start_time: Instant::now(),
        };
        Self {
            config,
            listener: None,
            state,
        }
    }

    /// Shared lifecycle, for health checks or tests.
    #[must_use]
    pub fn lifecycle(&self) -> Arc<Lifecycle> {
        Arc::clone(&self.state.lifecycle)
    }

    /// Assembles the router with all routes and middleware.
    ///
    /// Routes:
    /// - `POST /graphql` -- execute one operation
    /// - `GET /graphql`, `GET /playground` -- sandbox page
    /// - `GET /health`, `GET /health/live`, `GET /health/ready`
    pub fn build_router(&self) -> Router {
        let router = Router::new()
            .route(
                "/graphql",
                post(graphql_handler)
                    .route_layer(from_fn_with_state(
                        Arc::clone(&self.state.lifecycle),
                        track_in_flight,
                    ))
                    .get(playground_handler),
            )
            .route("/playground", get(playground_handler))
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .route("/health/ready", get(readiness_handler));

        with_http_layers(router, &self.config).with_state(self.state.clone())
    }

    /// Binds the TCP listener and returns the actual port (useful with port 0).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves requests until `shutdown` resolves, then drains in-flight
    /// GraphQL operations. The drain is bounded by the configured drain
    /// timeout. When it expires, `serve` returns without waiting for the
    /// connections that are still open.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first or the server hits
    /// a fatal I/O error.
    pub async fn serve(
        mut self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let Some(listener) = self.listener.take() else {
            anyhow::bail!("start() must be called before serve()");
        };
        let router = self.build_router();
        let lifecycle = self.lifecycle();

        let port = listener.local_addr()?.port();
        info!("Server ready at http://localhost:{port}/graphql");
        info!("GraphQL Playground available at http://localhost:{port}/playground");
        info!("Health check available at http://localhost:{port}/health");

        lifecycle.set_ready();

        let mut draining = lifecycle.shutdown_receiver();
        let mut server = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = draining.wait_for(|d| *d).await;
                })
                .await
        });

        tokio::pin!(shutdown);
        tokio::select! {
            result = &mut server => {
                result??;
                return Ok(());
            }
            () = &mut shutdown => {}
        }

        lifecycle.begin_draining();
        info!(
            in_flight = lifecycle.in_flight_count(),
            drain_timeout_ms = self.config.drain_timeout.as_millis(),
            "Shutdown requested, draining"
        );

        match tokio::time::timeout(self.config.drain_timeout, &mut server).await {
            Ok(result) => {
                result??;
                if lifecycle.wait_for_drain(Duration::ZERO).await {
                    info!("All in-flight requests drained");
                } else {
                    warn!(
                        in_flight = lifecycle.in_flight_count(),
                        "Server stopped with in-flight requests remaining"
                    );
                }
            }
            Err(_) => {
                server.abort();
                warn!(
                    in_flight = lifecycle.in_flight_count(),
                    "Drain timeout expired with in-flight requests remaining"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::StaticTokenVerifier;
    use crate::graphql::build_schema;
    use crate::network::HealthState;
    use crate::storage::{MemoryDataSource, UserStore};

    fn module() -> NetworkModule {
        let contexts = ContextBuilder::new(
            Arc::new(StaticTokenVerifier::development()),
            Arc::new(MemoryDataSource::new(Arc::new(UserStore::seeded()))),
        );
        NetworkModule::new(
            NetworkConfig {
                host: "127.0.0.1".to_string(),
                ..NetworkConfig::default()
            },
            build_schema(),
            contexts,
        )
    }

    #[test]
    fn new_does_not_bind() {
        let module = module();
        assert!(module.listener.is_none());
        assert_eq!(module.lifecycle().health_state(), HealthState::Starting);
    }

    #[tokio::test]
    async fn router_serves_health() {
        let router = module().build_router();
        let response = router
            .oneshot(Request::builder().uri("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn start_binds_to_os_assigned_port() {
        let mut module = module();
        let port = module.start().await.expect("start should succeed");
        assert!(port > 0);
        assert!(module.listener.is_some());
    }

    #[tokio::test]
    async fn serve_without_start_is_an_error() {
        let err = module()
            .serve(std::future::ready(()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("start()"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn drain_gives_up_after_timeout_with_request_open() {
        use std::time::Duration;
        use tokio::io::AsyncWriteExt;

        let contexts = ContextBuilder::new(
            Arc::new(StaticTokenVerifier::development()),
            Arc::new(MemoryDataSource::new(Arc::new(UserStore::seeded()))),
        );
        let mut module = NetworkModule::new(
            NetworkConfig {
                host: "127.0.0.1".to_string(),
                request_timeout: Duration::from_secs(10),
                drain_timeout: Duration::from_millis(100),
                ..NetworkConfig::default()
            },
            build_schema(),
            contexts,
        );
        let port = module.start().await.unwrap();
        let lifecycle = module.lifecycle();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(module.serve(async {
            let _ = rx.await;
        }));

        // Announce a 100-byte body and send only part of it.
        let mut stream = tokio::net::TcpStream::connect(("127.0.0.1", port))
            .await
            .unwrap();
        stream
            .write_all(
                b"POST /graphql HTTP/1.1\r\nHost: localhost\r\n\
                  Content-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"query\":",
            )
            .await
            .unwrap();

        tokio::time::timeout(Duration::from_secs(2), async {
            while lifecycle.in_flight_count() == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("request should be counted while its body uploads");

        let started = std::time::Instant::now();
        tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("serve should return once the drain timeout expires")
            .unwrap()
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(lifecycle.health_state(), HealthState::Draining);
        drop(stream);
    }

    #[tokio::test]
    async fn serve_stops_after_shutdown_signal() {
        let mut module = module();
        module.start().await.unwrap();
        let lifecycle = module.lifecycle();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(module.serve(async {
            let _ = rx.await;
        }));

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
        assert_eq!(lifecycle.health_state(), HealthState::Stopped);
    }
}
