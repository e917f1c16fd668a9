mod common;

use tidemark::Tidemark;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let tm = Tidemark::builder()
        .with_connector(common::get_connector()?)
        .bulk_concurrency(3)
        .build()?;

    let status = tm.status().await?;
    println!("catalog: {} symbols", status.catalog_size);
    for e in &status.entries {
        println!("  {:<8} {:?} ({} points)", e.symbol, e.status, e.data_points);
    }

    let symbols: Vec<String> = tm
        .catalog()
        .iter()
        .take(6)
        .map(|p| p.canonical_id.clone())
        .collect();
    let report = tm.bulk().symbols(symbols).max_hours(12).run().await?;
    println!(
        "bulk: {}/{} backed by real data",
        report.successful_symbols, report.total_symbols
    );
    let mut keys: Vec<_> = report.results.keys().collect();
    keys.sort();
    for k in keys {
        let r = &report.results[k];
        println!("  {k:<8} {:?} {} points", r.source_kind, r.len());
    }
    for w in &report.warnings {
        eprintln!("  warning: {w}");
    }

    Ok(())
}
