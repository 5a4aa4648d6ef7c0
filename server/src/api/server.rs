//! API server initialization

use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::Redirect;
use axum::routing::get;
use tokio::net::TcpListener;

use tower_http::compression::CompressionLayer;

use super::embedded;
use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{health, reply, tickets, webhook};
use crate::core::CoreApp;
use crate::core::constants::{DEFAULT_BODY_LIMIT, WEBHOOK_BODY_LIMIT};

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);

        Self {
            app,
            allowed_origins,
        }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        // Clone shutdown before moving app
        let shutdown = app.shutdown.clone();

        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let addr = SocketAddr::new(host.parse()?, port);

        // Use debug directory if debug mode is enabled (directory is created in app.rs)
        let debug_path = if app.config.debug {
            Some(app.storage.subdir(crate::core::storage::DataSubdir::Debug))
        } else {
            None
        };

        let admin_routes = Router::new().fallback(embedded::serve_assets);

        // Provider posts single SMS messages, so the webhook gets a tight limit
        let webhook_routes = webhook::routes(app.tickets.clone(), debug_path)
            .layer(DefaultBodyLimit::max(WEBHOOK_BODY_LIMIT));

        let reply_routes = reply::routes(app.tickets.clone());

        let tickets_routes = tickets::routes(app.tickets.clone());

        let router = Router::new()
            .route("/", get(|| async { Redirect::temporary("/admin") }))
            .route("/api/v1/health", get(health::health))
            .route("/api/openapi.json", get(openapi_json))
            .route("/api/docs", get(swagger_ui_html))
            .route("/api/docs/", get(swagger_ui_html))
            .nest("/admin", admin_routes)
            .nest("/webhook", webhook_routes)
            .nest("/reply", reply_routes)
            .nest("/api/v1/tickets", tickets_routes)
            .fallback(middleware::handle_404)
            .layer(CompressionLayer::new())
            .layer(middleware::cors(&allowed_origins))
            .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT));

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        Ok(app)
    }
}
