use rag_chain::api::{create_router, AppState};
use rag_chain::infrastructure::{retriever_from_config, AppConfig, RagChainBuilder};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,rag_chain=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let retriever = retriever_from_config(&config.config).await?;
    let builder = RagChainBuilder::new(retriever.clone(), &config)?;
    let chain = builder.build_chain()?;
    info!(model = builder.model().model_name(), "RAG chain ready");

    let addr = SocketAddr::new(config.config.server.host.parse()?, config.config.server.port);
    let app = create_router(AppState::new(chain, retriever, config));

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
