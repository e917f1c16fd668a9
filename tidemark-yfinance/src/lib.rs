//! tidemark-yfinance
//!
//! Public connector that implements `TidemarkConnector` on top of the
//! `yfinance-rs` client library. Serves row-level bars through
//! `BarsProvider`; all failures surface as `TidemarkError` and are treated by
//! the fetch ladder as ordinary rung failures.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `yfinance-rs`.
pub mod adapter;

use std::sync::Arc;

use adapter::{RealAdapter, YfHistory};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use paft::market::requests::history::{Interval, Range};
use rust_decimal::prelude::ToPrimitive;
use tidemark_core::{
    Period, RawBar, RawBars, SamplingInterval, TidemarkError,
    connector::{BarsProvider, TidemarkConnector},
};
use yfinance_rs as yf;

#[cfg(feature = "test-adapters")]
type HistoryAdapter = Arc<dyn YfHistory>;
#[cfg(not(feature = "test-adapters"))]
type HistoryAdapter = Arc<RealAdapter>;

/// Public connector implementation backed by `yfinance-rs`.
pub struct YfConnector {
    history: HistoryAdapter,
}

impl YfConnector {
    /// Stable connector name used in attempt records.
    pub const NAME: &'static str = "tidemark-yfinance";

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("delisted")
    }

    fn normalize_error(e: TidemarkError, what: &str) -> TidemarkError {
        match e {
            TidemarkError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    TidemarkError::not_found(what.to_string())
                } else {
                    TidemarkError::connector(Self::NAME, msg)
                }
            }
            TidemarkError::Other(msg) => TidemarkError::connector(Self::NAME, msg),
            other => other,
        }
    }

    /// Build with a fresh `yfinance_rs::YfClient` inside.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn try_new_default() -> Result<Self, TidemarkError> {
        let a = RealAdapter::try_new_default()?;
        Ok(Self::from_real(a))
    }

    /// Build from an existing `yfinance_rs::YfClient`.
    #[must_use]
    pub fn new_with_client(client: yf::YfClient) -> Self {
        Self::from_real(RealAdapter::new(client))
    }

    /// Build from a provided `reqwest::Client` by constructing a `yfinance_rs::YfClient`.
    ///
    /// Note: The provided client should enable a cookie store for yfinance auth/crumb flow.
    ///
    /// # Errors
    /// Returns an error if the internal `YfClient` cannot be constructed from the provided HTTP client.
    pub fn try_new_with_reqwest_client(http: reqwest::Client) -> Result<Self, TidemarkError> {
        let a = RealAdapter::try_with_reqwest_client(http)?;
        Ok(Self::from_real(a))
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn from_adapter(history: Arc<dyn YfHistory>) -> Self {
        Self { history }
    }

    fn from_real(adapter: RealAdapter) -> Self {
        Self {
            history: Arc::new(adapter),
        }
    }
}

/// Translate a ladder rung into a Yahoo history request.
///
/// `D2` has no Yahoo range code, so it becomes an explicit `[now - 2d, now]`
/// period. Pre/post-market bars are included and prices are adjusted.
///
/// # Errors
/// Returns `Unsupported` for periods or intervals Yahoo cannot serve.
pub fn history_request(
    period: Period,
    interval: SamplingInterval,
    now: DateTime<Utc>,
) -> Result<yf::core::services::HistoryRequest, TidemarkError> {
    let (range, span) = match period {
        Period::D2 => (
            None,
            Some(((now - Duration::days(2)).timestamp(), now.timestamp())),
        ),
        Period::D5 => (Some(Range::D5), None),
        Period::M1 => (Some(Range::M1), None),
        other => return Err(TidemarkError::unsupported(format!("bars/period {other}"))),
    };
    let interval = match interval {
        SamplingInterval::I1m => Interval::I1m,
        SamplingInterval::I5m => Interval::I5m,
        SamplingInterval::I1h => Interval::I1h,
        SamplingInterval::D1 => Interval::D1,
        other => return Err(TidemarkError::unsupported(format!("bars/interval {other}"))),
    };
    Ok(yf::core::services::HistoryRequest {
        range,
        period: span,
        interval,
        include_prepost: true,
        include_actions: false,
        auto_adjust: true,
        keepna: false,
    })
}

/// Map Yahoo candles to raw bars expressed in the exchange timezone.
///
/// When the response carries no timezone, wall times are written in UTC and
/// `RawBars::timezone` is left empty.
#[must_use]
pub fn candles_to_bars(resp: &yf::HistoryResponse) -> RawBars {
    let tz = resp.meta.as_ref().and_then(|m| m.timezone);
    let rows = resp
        .candles
        .iter()
        .map(|c| RawBar {
            ts: match tz {
                Some(zone) => c.ts.with_timezone(&zone).naive_local(),
                None => c.ts.naive_utc(),
            },
            open: c.open.amount().to_f64(),
            high: c.high.amount().to_f64(),
            low: c.low.amount().to_f64(),
            close: c.close.amount().to_f64(),
            volume: c.volume.and_then(|v| i64::try_from(v).ok()),
        })
        .collect();
    RawBars { timezone: tz, rows }
}

impl TidemarkConnector for YfConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
    }

    fn as_bars_provider(&self) -> Option<&dyn BarsProvider> {
        Some(self as &dyn BarsProvider)
    }
}

#[async_trait]
impl BarsProvider for YfConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tidemark_yfinance::fetch_bars",
            skip_all,
            fields(symbol = %symbol, period = %period, interval = %interval),
        )
    )]
    async fn fetch_bars(
        &self,
        symbol: &str,
        period: Period,
        interval: SamplingInterval,
    ) -> Result<RawBars, TidemarkError> {
        let req = history_request(period, interval, Utc::now())?;
        let what = format!("bars for {symbol}");
        let resp = self
            .history
            .fetch_full(symbol, req)
            .await
            .map_err(|e| Self::normalize_error(e, &what))?;
        if resp.candles.is_empty() {
            return Err(TidemarkError::not_found(what));
        }
        let bars = candles_to_bars(&resp);
        #[cfg(feature = "tracing")]
        tracing::debug!(rows = bars.len(), tz = ?bars.timezone, "yahoo bars");
        Ok(bars)
    }
}
