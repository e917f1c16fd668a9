#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tidemark::{FixedClock, RawBar, RawBars, Tidemark, TidemarkBuilder, TidemarkConnector};
use tidemark_mock::{DynamicMockConnector, DynamicMockController, MockConnector};

// ---------- Lightweight fixtures and helpers for tests ----------

/// Common symbol constants used across tests.
pub const GSPC: &str = "^GSPC";
pub const DJI: &str = "^DJI";
pub const IXIC: &str = "^IXIC";
pub const AXJO: &str = "^AXJO";
pub const AXKO: &str = "^AXKO";
pub const UNKNOWN: &str = "ZZZZ";

/// The instant mock fixtures end at; also what test clocks report as "now".
pub fn anchor() -> DateTime<Utc> {
    MockConnector::default_anchor()
}

/// Builder with the clock frozen at the fixture anchor and a fixed seed.
pub fn builder_with(connector: Arc<dyn TidemarkConnector>) -> TidemarkBuilder {
    Tidemark::builder()
        .with_connector(connector)
        .clock(Arc::new(FixedClock(anchor())))
        .rng_seed(42)
}

/// Orchestrator over the deterministic fixture connector.
pub fn fixture_tidemark() -> Tidemark {
    builder_with(Arc::new(MockConnector::new()))
        .build()
        .expect("valid builder")
}

/// A dynamic mock connector named `name` and its controller.
pub fn dynamic(name: &'static str) -> (Arc<dyn TidemarkConnector>, DynamicMockController) {
    DynamicMockConnector::new_with_controller(name)
}

/// One UTC bar `minutes_ago` before the anchor.
pub fn bar(minutes_ago: i64, open: f64, close: f64) -> RawBar {
    RawBar {
        ts: (anchor() - Duration::minutes(minutes_ago)).naive_utc(),
        open: Some(open),
        high: Some(open.max(close)),
        low: Some(open.min(close)),
        close: Some(close),
        volume: Some(1_000),
    }
}

/// `n` flat UTC bars, one minute apart, ending at the anchor.
pub fn flat_bars(n: usize, price: f64) -> RawBars {
    let rows = (0..n)
        .rev()
        .map(|k| bar(i64::try_from(k).expect("small"), price, price))
        .collect();
    RawBars {
        timezone: None,
        rows,
    }
}

/// Wrap rows into UTC raw bars.
pub fn utc_bars(rows: Vec<RawBar>) -> RawBars {
    RawBars {
        timezone: None,
        rows,
    }
}
