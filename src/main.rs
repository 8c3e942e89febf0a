use std::sync::Arc;

use salvo::{listener::TcpListener, Server};
use tracing_subscriber::EnvFilter;

use workitem_tracker::{
    app::AppContext,
    config::env_var::{self, StorageKind},
    domain::repository::Store,
    infra::{
        database::{connection, repository::PgStore},
        memory::MemoryStore,
        router,
        service::security::Argon2HashService,
    },
};

async fn create_store(env: &env_var::EnvVar) -> Arc<dyn Store> {
    match (env.storage, &env.database) {
        (StorageKind::Postgres, Some(database)) => {
            let pool = connection::create_sqlx_pool(&database.url)
                .await
                .expect("Expect to create a database pool with a open connection");
            Arc::new(PgStore::new(pool))
        }
        _ => {
            tracing::warn!("using the in-memory store, data is lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let env = env_var::get();
    let store = create_store(env).await;
    let ctx = AppContext::new(store, Arc::new(Argon2HashService::new()));

    let address = format!("0.0.0.0:{}", env.port);
    tracing::info!(%address, storage = ?env.storage, "listening");
    let listener = TcpListener::bind(&address);
    Server::new(listener)
        .serve(router::app(ctx, Arc::from(env.auth_token.as_str())))
        .await;
}
