#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ranked_polls::start_server().await
}
