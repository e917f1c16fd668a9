//! Ordered log of what a resolution tried.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stage of the resolution state machine an attempt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The canonical symbol.
    Primary,
    /// An alias of the canonical symbol.
    Alias,
    /// A correlated proxy instrument.
    Proxy,
    /// A benchmark fetched to drive a correlated synthetic walk.
    Reference,
    /// Synthetic generation.
    Synthetic,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Primary => "primary",
            Self::Alias => "alias",
            Self::Proxy => "proxy",
            Self::Reference => "reference",
            Self::Synthetic => "synthetic",
        })
    }
}

/// Outcome of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The ladder produced an accepted series.
    Succeeded {
        /// Points in the accepted series.
        points: usize,
        /// Description of the rung that was accepted.
        rung: String,
        /// Connector that served the rung.
        connector: String,
    },
    /// Every rung failed for this symbol.
    Failed {
        /// Collapsed failure reason.
        reason: String,
    },
    /// The attempt was not made (e.g. the request deadline elapsed).
    Skipped {
        /// Why it was skipped.
        reason: String,
    },
}

impl Outcome {
    /// True for `Succeeded`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// One row of the attempt log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptEntry {
    /// Stage the attempt belongs to.
    pub stage: Stage,
    /// Symbol that was tried.
    pub symbol: String,
    /// What happened.
    pub outcome: Outcome,
}

/// Append-only attempt log for one resolution.
///
/// Behavior:
/// - Entries are kept in the order the orchestrator made them.
/// - Useful for debugging fallback decisions and upstream coverage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptRecord {
    entries: Vec<AttemptEntry>,
}

impl AttemptRecord {
    /// Create an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Record an attempt.
    pub fn push(&mut self, stage: Stage, symbol: impl Into<String>, outcome: Outcome) {
        self.entries.push(AttemptEntry {
            stage,
            symbol: symbol.into(),
            outcome,
        });
    }

    /// All entries in order.
    #[must_use]
    pub fn entries(&self) -> &[AttemptEntry] {
        &self.entries
    }

    /// Iterate entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &AttemptEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was attempted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbols tried in a given stage, in order.
    pub fn symbols_for(&self, stage: Stage) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |e| e.stage == stage)
            .map(|e| e.symbol.as_str())
    }
}
