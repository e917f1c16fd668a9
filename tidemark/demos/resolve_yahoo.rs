mod common;

use std::time::Duration;

use tidemark::Tidemark;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "^AXJO".to_string());
    let tm = Tidemark::builder()
        .with_connector(common::get_connector()?)
        .provider_timeout(Duration::from_secs(5))
        .request_timeout(Duration::from_secs(30))
        .build()?;

    println!("Resolving {symbol}...");
    let res = tm.resolve(&symbol, 24).await?;
    println!("{}", serde_json::to_string_pretty(&res)?);

    Ok(())
}
