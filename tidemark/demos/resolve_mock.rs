mod common;

use std::sync::Arc;

use tidemark::Tidemark;
use tidemark_mock::MockConnector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    // Fixtures end "now", so every recency window sees them.
    let tm = Tidemark::builder()
        .with_connector(Arc::new(MockConnector::anchored(chrono::Utc::now())))
        .rng_seed(7)
        .build()?;

    // ^GSPC is served directly, ^AXKO only through its ^AXJO proxy, ZZZZ not at all.
    for symbol in ["^GSPC", "%5EAXKO", "ZZZZ"] {
        let res = tm.resolve(symbol, 24).await?;
        println!(
            "{} ({}): {:?} via {} with {} points",
            res.requested_symbol,
            res.display_name,
            res.source_kind,
            res.source_symbol,
            res.len()
        );
        for w in &res.warnings {
            println!("  warning: {w}");
        }
        for a in res.attempts.iter() {
            println!("  {} {}: {:?}", a.stage, a.symbol, a.outcome);
        }
        if let Some(last) = res.series.last() {
            println!("  last: {} close={:?}", last.display_timestamp(), last.close);
        }
    }

    Ok(())
}
