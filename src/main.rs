use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use frontdesk::config::AppConfig;
use frontdesk::handlers;
use frontdesk::models::SourceDocument;
use frontdesk::services::ai::echo::EchoProvider;
use frontdesk::services::ai::gemini::GeminiProvider;
use frontdesk::services::ai::openai::OpenAiProvider;
use frontdesk::services::ai::ChatModel;
use frontdesk::services::index::remote::RemoteIndexProvider;
use frontdesk::services::index::IndexProvider;
use frontdesk::services::relay::HttpChatRelay;
use frontdesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let chat: Box<dyn ChatModel> = match config.chat_provider.as_str() {
        "openai" => {
            anyhow::ensure!(
                !config.openai_api_key.is_empty(),
                "OPENAI_API_KEY must be set when CHAT_PROVIDER=openai"
            );
            tracing::info!("using OpenAI chat provider (model: {})", config.openai_model);
            Box::new(OpenAiProvider::new(
                config.openai_api_key.clone(),
                config.openai_model.clone(),
            ))
        }
        "gemini" => {
            anyhow::ensure!(
                !config.gemini_api_key.is_empty(),
                "GEMINI_API_KEY must be set when CHAT_PROVIDER=gemini"
            );
            tracing::info!("using Gemini chat provider (model: {})", config.gemini_model);
            Box::new(GeminiProvider::new(
                config.gemini_api_key.clone(),
                config.gemini_model.clone(),
            ))
        }
        _ => {
            tracing::info!("no chat provider configured, using echo replies");
            Box::new(EchoProvider)
        }
    };

    let bytes = std::fs::read(&config.document_path)
        .with_context(|| format!("failed to read {}", config.document_path))?;
    let document = SourceDocument {
        name: config.document_path.clone(),
        bytes,
    };

    let provider = RemoteIndexProvider::new(config.index_url.clone(), config.index_api_key.clone());
    tracing::info!(document = %document.name, "building retrieval index");
    let index = provider.build_index(&[document]).await?;

    let relay = HttpChatRelay::new(config.relay_url.clone(), config.relay_api_key.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        index,
        chat,
        relay: Box::new(relay),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ask", post(handlers::ask::ask))
        .route("/chat", post(handlers::chat::relay_message))
        .route(
            "/book_appointment",
            post(handlers::appointment::book_appointment),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
