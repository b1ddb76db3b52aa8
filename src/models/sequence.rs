use serde::{ Deserialize, Serialize };

use crate::models::artifact::RefinementReport;
use crate::models::taxonomy::CognitiveLevel;

/// One session entry of a sequence plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescriptor {
    pub session_number: usize,
    pub key_concept: String,
    pub target_level: CognitiveLevel,
}

/// Shared blueprint produced once before any session is generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencePlan {
    /// Raw plan text, injected whole into every session
    pub text: String,
    pub narrative_thread: String,
    pub sessions: Vec<SessionDescriptor>,
}

impl SequencePlan {
    pub fn target_levels(&self) -> Vec<CognitiveLevel> {
        self.sessions.iter().map(|s| s.target_level).collect()
    }
}

/// Result of one session's refinement loop
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub session_number: usize,
    pub target_level: CognitiveLevel,
    #[serde(serialize_with = "serialize_session_result")]
    pub result: Result<RefinementReport, String>,
}

fn serialize_session_result<S>(
    result: &Result<RefinementReport, String>,
    serializer: S
) -> Result<S::Ok, S::Error>
    where S: serde::Serializer
{
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(1))?;
    match result {
        Ok(report) => map.serialize_entry("report", report)?,
        Err(error) => map.serialize_entry("error", error)?,
    }
    map.end()
}

/// Plan plus every session result, in session order
#[derive(Debug, Serialize)]
pub struct SequenceReport {
    pub plan: SequencePlan,
    pub sessions: Vec<SessionReport>,
}

impl SequenceReport {
    pub fn approved_count(&self) -> usize {
        self.sessions
            .iter()
            .filter(|s| matches!(&s.result, Ok(report) if report.is_approved()))
            .count()
    }
}
