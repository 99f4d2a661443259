use tellerd_server::{build_state, config::Config, init_tracing, listener};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();
    let state = build_state(&config).await?;

    tracing::info!("Listening on {}", config.listen_addr);
    // A bind failure is fatal; the daemon does not retry.
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    listener::serve(listener, state, config.idle_timeout).await;
    Ok(())
}
