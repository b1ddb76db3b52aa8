use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };
use std::fmt;

use crate::models::parameters::Classification;
use crate::models::verdict::VerdictStatus;

/// Generated text of the latest refinement attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Full model output of the latest successful generation
    pub content: String,
    /// Last audit verdict
    pub status: VerdictStatus,
    /// Auditor feedback, empty when approved
    pub observations: String,
    /// Generation attempts consumed so far (1-based)
    pub attempt: u32,
}

impl Artifact {
    pub fn empty() -> Self {
        Self {
            content: String::new(),
            status: VerdictStatus::Rejected,
            observations: String::new(),
            attempt: 0,
        }
    }
}

/// Terminal state of one refinement loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefinementOutcome {
    /// The auditor approved the artifact
    Approved,
    /// Every attempt was audited without approval
    Exhausted,
    /// The generator call failed; the attempt never reached audit
    GenerationFailed { attempt: u32, error: String },
    /// The auditor call failed
    AuditFailed { attempt: u32, error: String },
}

impl RefinementOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, RefinementOutcome::Approved)
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RefinementOutcome::GenerationFailed { .. } | RefinementOutcome::AuditFailed { .. }
        )
    }
}

impl fmt::Display for RefinementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefinementOutcome::Approved => write!(f, "Approved"),
            RefinementOutcome::Exhausted => write!(f, "Rejected after exhausting attempts"),
            RefinementOutcome::GenerationFailed { attempt, error } => {
                write!(f, "Generation failed on attempt {}: {}", attempt, error)
            }
            RefinementOutcome::AuditFailed { attempt, error } => {
                write!(f, "Audit failed on attempt {}: {}", attempt, error)
            }
        }
    }
}

/// What a refinement loop hands back to its caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementReport {
    pub artifact: Artifact,
    pub outcome: RefinementOutcome,
    pub max_attempts: u32,
    pub classification: Classification,
    pub finished_at: DateTime<Utc>,
}

impl RefinementReport {
    pub fn is_approved(&self) -> bool {
        self.outcome.is_approved()
    }
}
