#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Bind failures surface here and end the process with a non-zero status.
    arena_server::run_with_config().await
}
