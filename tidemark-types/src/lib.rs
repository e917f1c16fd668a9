//! Tidemark data transfer objects, configuration primitives and the shared error type.
#![warn(missing_docs)]

mod attempts;
mod config;
mod error;
mod market;
mod profile;
mod reports;

pub use attempts::{AttemptEntry, AttemptRecord, Outcome, Stage};
pub use config::{
    FetchCandidate, Period, SamplingInterval, SyntheticConfig, TidemarkConfig, WindowPolicy,
    default_ladder,
};
pub use error::TidemarkError;
pub use market::{OhlcvPoint, RawBar, RawBars};
pub use profile::SymbolProfile;
pub use reports::{
    BulkReport, ProbeEntry, ProbeStatus, ResolutionResult, SourceKind, StatusReport,
    SyntheticOrigin,
};
