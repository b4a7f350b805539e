use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    mintwatch_cli::run().await?;
    Ok(())
}
