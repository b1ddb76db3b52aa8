use crate::models::common::ModelChoice;
use crate::models::taxonomy::CognitiveLevel;
use crate::models::verdict::VerdictStatus;

/// Notifications emitted while the pipeline runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    PlanningSequence { sessions: usize, model: ModelChoice },
    SessionStarted { number: usize, total: usize, target_level: CognitiveLevel },
    AttemptStarted { attempt: u32, max_attempts: u32 },
    Generating { attempt: u32, model: ModelChoice },
    Generated { attempt: u32, content: String },
    Auditing { attempt: u32, model: ModelChoice },
    Audited { attempt: u32, status: VerdictStatus, audit_text: String },
    NeedsRefinement { attempt: u32, observations: String },
    Approved { attempt: u32 },
    Exhausted { max_attempts: u32 },
    GenerationFailed { attempt: u32, error: String },
    AuditFailed { attempt: u32, error: String },
}
