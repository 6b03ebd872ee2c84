#[tokio::main]
async fn main() -> anyhow::Result<()> {
    livemix_lib::run().await
}
