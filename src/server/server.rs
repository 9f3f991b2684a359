//! Service startup and shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::data::{load_with_timeout, CachedFileSource, JsonFileSource, QuestionSource};

use super::routes::build_app;
use super::state::AppState;

/// Run the quiz service until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source: Arc<dyn QuestionSource> = if config.cache {
        Arc::new(CachedFileSource::new(&config.questions))
    } else {
        Arc::new(JsonFileSource::new(&config.questions))
    };

    // The store is loaded per request, so a broken file only warns here.
    match load_with_timeout(Arc::clone(&source), config.load_timeout).await {
        Ok(store) => info!(
            path = %config.questions.display(),
            languages = ?store.languages(),
            questions = store.question_count(),
            "loaded questions"
        ),
        Err(e) => warn!(path = %config.questions.display(), error = %e, "questions not loadable yet"),
    }

    let app = build_app(AppState::new(source, config.load_timeout));

    let addr = SocketAddr::new(config.host, config.port);
    let listener = TcpListener::bind(addr).await?;
    info!(cache = config.cache, "listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
