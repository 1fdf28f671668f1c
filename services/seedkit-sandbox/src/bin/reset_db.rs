use anyhow::Result;
use seedkit_sandbox::connect_from_env;

#[tokio::main]
async fn main() -> Result<()> {
    seedkit_common::setup_tracing("info")?;

    let seeder = connect_from_env(&[]).await?;

    // every registered collection, listed in SEEDKIT_COLLECTIONS
    let names = seeder.registered_names();
    let result = seeder.clear(names).await;
    seeder.disconnect().await;
    result?;

    println!("Database reset successfully");
    Ok(())
}
