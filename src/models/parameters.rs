use serde::{ Deserialize, Serialize };

use crate::models::common::{ ModelChoice, TemplateKind };
use crate::models::taxonomy::CognitiveLevel;

/// Position of a session inside a multi-session sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFocus {
    pub number: usize,
    pub total: usize,
}

/// Immutable inputs for one refinement cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// Topic, brainstorm or extracted document text
    pub inspiration: String,
    /// Audience descriptor (age range or discipline)
    pub group: String,
    /// Where the learners start, in the designer's own words
    pub entry_level: String,
    /// Level the symbolic phase must reach
    pub exit_level: CognitiveLevel,
    /// Narrative context, or the full sequence plan for sessions
    pub narrative_context: String,
    pub generator: ModelChoice,
    pub auditor: ModelChoice,
    #[serde(default)]
    pub template: TemplateKind,
    #[serde(default)]
    pub session: Option<SessionFocus>,
}

impl GenerationParameters {
    /// Classification metadata attached to exported artifacts
    pub fn classification(&self) -> Classification {
        Classification {
            topic: self.inspiration.clone(),
            group: self.group.clone(),
            entry_level: self.entry_level.clone(),
            exit_level: self.exit_level,
        }
    }
}

/// Metadata the exporter prints above each artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub topic: String,
    pub group: String,
    pub entry_level: String,
    pub exit_level: CognitiveLevel,
}
