//! Wire contract between game clients and the scoring backend.
//!
//! Field names follow the server's JSON schema (`secondsTaken`,
//! `bombsMarked`, ...); the serde renames here are the single place that
//! mapping lives.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MODE_MAX_LEN: usize = 100;
pub const PLATFORM_MAX_LEN: usize = 50;
pub const VERSION_MAX_LEN: usize = 50;
pub const SECONDS_MAX: u32 = 60 * 60 * 24;
pub const COUNT_MAX: u32 = 999_999;

/// One finished, won game as submitted to `POST /runs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSubmission {
    pub mode: String,
    pub seconds_taken: u32,
    pub bombs_marked: u32,
    pub total_cells: u32,
    pub client_platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_version: Option<String>,
}

impl RunSubmission {
    /// Mirrors the server-side schema bounds so a client can reject a
    /// payload before putting it on the wire.
    pub fn validate(&self) -> Result<(), SubmissionError> {
        check_len("mode", &self.mode, MODE_MAX_LEN)?;
        check_len("clientPlatform", &self.client_platform, PLATFORM_MAX_LEN)?;
        if let Some(version) = &self.client_version {
            if version.len() > VERSION_MAX_LEN {
                return Err(SubmissionError::FieldTooLong {
                    field: "clientVersion",
                    max: VERSION_MAX_LEN,
                });
            }
        }
        if self.seconds_taken == 0 || self.seconds_taken > SECONDS_MAX {
            return Err(SubmissionError::OutOfRange {
                field: "secondsTaken",
                min: 1,
                max: SECONDS_MAX,
            });
        }
        if self.bombs_marked > COUNT_MAX {
            return Err(SubmissionError::OutOfRange {
                field: "bombsMarked",
                min: 0,
                max: COUNT_MAX,
            });
        }
        if self.total_cells == 0 || self.total_cells > COUNT_MAX {
            return Err(SubmissionError::OutOfRange {
                field: "totalCells",
                min: 1,
                max: COUNT_MAX,
            });
        }
        Ok(())
    }

    /// The ranked score for this run, per the server formula.
    pub fn score(&self) -> f64 {
        compute_score(self.total_cells, self.seconds_taken)
    }
}

fn check_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), SubmissionError> {
    if value.is_empty() {
        Err(SubmissionError::FieldEmpty { field })
    } else if value.len() > max {
        Err(SubmissionError::FieldTooLong { field, max })
    } else {
        Ok(())
    }
}

/// Ranking source of truth: bigger boards in less time score higher.
pub fn compute_score(total_cells: u32, seconds_taken: u32) -> f64 {
    f64::from(total_cells) / f64::from(seconds_taken.max(1))
}

/// Server response to a run submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReceipt {
    pub score: f64,
    pub is_pb: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaderboard: Option<Vec<LeaderboardEntry>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub display_name: String,
    pub score: f64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("{field} must not be empty")]
    FieldEmpty { field: &'static str },
    #[error("{field} exceeds {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
}
