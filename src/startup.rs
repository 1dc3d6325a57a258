use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Response, StatusCode, header},
    routing::get,
};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{
    configuration::Settings,
    routes::{
        health::{health_check, index, route_not_found},
        users::{create_user, delete_user, get_user, list_users, update_user},
    },
    services::UserService,
    store::{UserRepository, UserStore},
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub user_service: UserService,
    pub environment: String,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, environment: impl Into<String>) -> Self {
        Self {
            user_service: UserService::new(store),
            environment: environment.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn handle_panic(_err: Box<dyn std::any::Any + Send + 'static>) -> Response<Body> {
    tracing::error!("Handler panicked");
    let body = json!({"success": false, "error": "internal server error"}).to_string();
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap_or_default()
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(settings: &Settings) -> anyhow::Result<Self> {
        let pg_pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_secs(2))
            .connect_lazy_with(settings.database.with_db());

        let repo = UserRepository::new(pg_pool);
        if let Err(e) = repo.init_schema().await {
            tracing::warn!("Could not ensure users schema, continuing: {:?}", e);
        }

        let state = AppState::new(Arc::new(repo), settings.application.environment.clone());
        let address = format!(
            "{}:{}",
            settings.application.host, settings.application.port
        );
        Self::bind(&address, router(state)).await
    }

    /// Binds `router` on `address`; port 0 picks a free port.
    pub async fn bind(address: &str, router: Router) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(address).await?;
        let port = listener.local_addr()?.port();
        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!(port = self.port, "Server listening");
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {:?}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {:?}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
