//! Error and warning types for song distribution.

use thiserror::Error;

/// A fatal distribution failure.
///
/// Configuration variants surface immediately and abort the run; the
/// feasibility variant (`PoolShortfall`) is raised only after random fill
/// and backfill have exhausted every redistribution option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributeError {
    /// The goal song identifier is not in the catalog.
    #[error("goal song '{song}' is not in the song catalog")]
    UnknownGoalSong { song: String },

    /// The requested goal pool does not exist or is inactive.
    #[error("goal pool '{pool}' does not exist among active song pools")]
    UnknownGoalPool { pool: String },

    /// The goal song does not chart the goal pool's instrument.
    #[error(
        "goal song '{song}' does not chart instrument '{instrument}' \
         required by goal pool '{pool}'"
    )]
    GoalInstrumentMismatch {
        song: String,
        pool: String,
        instrument: String,
    },

    /// No pool could take the goal song.
    #[error("could not place goal song '{song}' in any pool")]
    GoalUnplaced { song: String },

    /// An inclusion list references an identifier missing from the catalog.
    #[error("inclusion list for pool '{pool}' contains unknown song id '{song}'")]
    UnknownInclusion { pool: String, song: String },

    /// An inclusion list entry does not chart the pool's instrument.
    #[error(
        "inclusion list for pool '{pool}' contains song '{song}' \
         which does not chart instrument '{instrument}'"
    )]
    InclusionInstrumentMismatch {
        pool: String,
        song: String,
        instrument: String,
    },

    /// A pool's difficulty window is inverted.
    #[error("pool '{pool}' has min difficulty {min} greater than max difficulty {max}")]
    InvalidDifficultyWindow { pool: String, min: u8, max: u8 },

    /// The catalog cannot cover a pool's target even after backfilling.
    #[error(
        "pool '{pool}' ({instrument}, difficulty {min}-{max}): cannot fulfill \
         request for {requested} songs, only {assigned} available after \
         backfilling; reduce the pool target, widen the difficulty window, \
         or supply more songs"
    )]
    PoolShortfall {
        pool: String,
        instrument: String,
        min: u8,
        max: u8,
        requested: usize,
        assigned: usize,
    },
}

/// A non-fatal observation attached to a successful distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributeWarning {
    /// Random fill came up short and the gap was covered by backfill.
    PoolUnderfilled {
        pool: String,
        needed: usize,
        available: usize,
    },
}

impl std::fmt::Display for DistributeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistributeWarning::PoolUnderfilled {
                pool,
                needed,
                available,
            } => write!(
                f,
                "pool '{pool}': requested {needed} more songs but only \
                 {available} eligible songs were available before backfilling"
            ),
        }
    }
}

/// Aggregated failure from a partitioned run: every group's error, plus a
/// goal-placement error when no group could take the goal song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributeFailure {
    pub errors: Vec<DistributeError>,
}

impl std::fmt::Display for DistributeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to fill song pools:")?;
        for error in &self.errors {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DistributeFailure {}
