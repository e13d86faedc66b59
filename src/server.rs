//! Reusable storefront server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: metrics recorder, database
//! and migrations (or the in-memory store), admin role grants, the REST
//! API and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::domain::identity::Role;
use crate::domain::RepositoryProvider;
use crate::infrastructure::{
    init_database, run_migrations, InMemoryStorage, SeaOrmRepositoryProvider,
};
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::errors::{AppError, InfraError};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the storefront.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Keep everything in process memory instead of the database.
    pub use_memory: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            use_memory: false,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running storefront.
///
/// ```rust,no_run
/// use luxe_rental::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is bound to.
    pub local_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

/// The global recorder can be installed once per process; later starts
/// reuse it.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();
    HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!(error = %e, "Metrics disabled, recorder could not be installed");
                None
            }
        })
        .clone()
}

impl ServerHandle {
    /// Start the storefront with the given options.
    pub async fn start(opts: ServerOptions) -> Result<Self, AppError> {
        let cfg = opts.config;
        info!("Starting Luxe Rental storefront...");

        if cfg.uses_default_secret() {
            warn!("security.jwt_secret is the built-in placeholder; set a real secret");
        }

        // ── Storage ────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            if opts.use_memory {
                info!("Using in-memory storage, data is lost on exit");
                (Arc::new(InMemoryStorage::new()), None)
            } else {
                let db = init_database(&cfg.database_config())
                    .await
                    .map_err(InfraError::from)?;
                if opts.auto_migrate {
                    run_migrations(&db).await.map_err(InfraError::from)?;
                }
                (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
            };

        grant_admins(repos.as_ref(), &cfg).await;

        // ── REST API ───────────────────────────────────────────
        let mut state = AppState::new(
            repos.clone(),
            cfg.jwt_config(),
            cfg.segment_images(),
            cfg.storefront.currency.as_str(),
        );
        if let Some(db) = &db {
            state = state.with_database(db.clone());
        }
        if let Some(handle) = prometheus_handle() {
            state = state.with_metrics(handle);
        }
        let router = create_api_router(state);

        let shutdown = ShutdownCoordinator::new(cfg.server.shutdown_timeout);
        let api_addr = format!("{}:{}", cfg.server.api_host, cfg.server.api_port);
        let listener = tokio::net::TcpListener::bind(&api_addr)
            .await
            .map_err(InfraError::from)?;
        let local_addr = listener.local_addr().map_err(InfraError::from)?;
        info!(addr = %local_addr, "REST API listening");
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.signal();
        let api_task = tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("REST API received shutdown signal");
            });
            if let Err(e) = server.await {
                error!(error = %e, "REST API server error");
            }
        });

        Ok(Self {
            repos,
            config: cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown without waiting.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the signal, drain the API within the configured timeout,
    /// then close the database.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        let drained = shutdown
            .shutdown_with_cleanup(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API stopped"),
                    Err(e) => error!(error = %e, "REST API task panicked"),
                }
            })
            .await;
        if !drained {
            warn!("Shutdown timed out with requests still in flight");
        }

        if let Some(db) = db {
            match db.close().await {
                Ok(()) => info!("Database connection closed"),
                Err(e) => warn!(error = %e, "Error closing database connection"),
            }
        }
        info!("Luxe Rental shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down storefront...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Grant the admin role to every user listed in `[admin] user_ids`
async fn grant_admins(repos: &dyn RepositoryProvider, cfg: &AppConfig) {
    for user_id in &cfg.admin.user_ids {
        match repos.roles().grant(*user_id, Role::Admin).await {
            Ok(()) => info!(%user_id, "Admin role granted"),
            Err(e) => error!(%user_id, error = %e, "Failed to grant admin role"),
        }
    }
}

/// Initialize tracing from the application config.
///
/// Call once at process startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    // A second init (tests, restarts) keeps the first subscriber
    let _ = match config.logging.format.to_lowercase().as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use uuid::Uuid;

    fn memory_options(admin: Uuid) -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.api_host = "127.0.0.1".into();
        config.server.api_port = 0;
        config.server.shutdown_timeout = 5;
        config.admin.user_ids = vec![admin];
        ServerOptions {
            config,
            auto_migrate: false,
            use_memory: true,
        }
    }

    async fn get(addr: SocketAddr, path: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn memory_server_serves_health_and_grants_admins() {
        let admin = Uuid::new_v4();
        let handle = ServerHandle::start(memory_options(admin)).await.unwrap();
        assert!(handle.is_running());

        let response = get(handle.local_addr, "/health").await;
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.contains("\"backend\":\"memory\""));

        assert!(handle.repos.roles().has_role(admin, Role::Admin).await.unwrap());

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn sqlite_server_migrates_on_start() {
        let mut opts = memory_options(Uuid::new_v4());
        opts.use_memory = false;
        opts.auto_migrate = true;
        opts.config.database.url = "sqlite::memory:".into();
        opts.config.database.max_connections = 1;

        let handle = ServerHandle::start(opts).await.unwrap();
        let response = get(handle.local_addr, "/api/v1/vehicles").await;
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        handle.shutdown().await;
    }
}
