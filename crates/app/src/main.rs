mod cli;
mod host;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // WARN by default; RUST_LOG=services=debug shows every request.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::run().await
}
