//! Terminal chat against the RAG chain.
//!
//! Usage: `chat [session-id]`. `/history` prints the session log, `/quit`
//! exits.

use rag_chain::application::{SessionConfig, DEFAULT_SESSION_ID};
use rag_chain::infrastructure::{retriever_from_config, AppConfig, RagChainBuilder};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat=info,rag_chain=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let session_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());
    let session = SessionConfig::new(session_id);

    let config = AppConfig::load()?;
    let retriever = retriever_from_config(&config.config).await?;
    let builder = RagChainBuilder::new(retriever, &config)?;
    let chain = builder.build_chain()?;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        match input {
            "" => continue,
            "/quit" => break,
            "/history" => {
                let history = builder.get_history(&session.session_id);
                for message in history.lock().await.messages() {
                    let text = format!("{}: {}\n", message.role.as_str(), message.content);
                    stdout.write_all(text.as_bytes()).await?;
                }
            }
            _ => match chain.invoke(input, &session).await {
                Ok(output) => {
                    stdout.write_all(format!("{}\n", output.answer).as_bytes()).await?;
                }
                Err(e) => tracing::error!(error = %e, "chat failed"),
            },
        }
    }

    Ok(())
}
