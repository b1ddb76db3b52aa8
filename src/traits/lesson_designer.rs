use async_trait::async_trait;

use crate::errors::DidactResult;
use crate::models::common::{ ModelChoice, TemplateKind };
use crate::models::parameters::GenerationParameters;
use crate::models::artifact::RefinementReport;
use crate::models::sequence::SequenceReport;
use crate::models::taxonomy::CognitiveLevel;

/// Inputs shared by every session of a sequence
#[derive(Debug, Clone)]
pub struct SequenceRequest {
    pub inspiration: String,
    pub group: String,
    pub entry_level: String,
    pub session_count: usize,
    pub final_level: CognitiveLevel,
    pub generator: ModelChoice,
    pub auditor: ModelChoice,
    pub template: TemplateKind,
}

/// Main facade for the lesson design pipeline
#[async_trait]
pub trait LessonDesigner: Send + Sync {
    /// Generate one activity through the audit/refine loop
    async fn design_activity(&self, params: &GenerationParameters) -> DidactResult<RefinementReport>;

    /// Plan a sequence, then run the audit/refine loop once per session
    async fn design_sequence(&self, request: &SequenceRequest) -> DidactResult<SequenceReport>;

    /// Ask the generator for a short narrative context around the inspiration
    async fn suggest_context(&self, inspiration: &str, model: &ModelChoice) -> DidactResult<String>;

    /// Rewrite an activity to incorporate free-text feedback, without audit
    async fn refine_with_feedback(
        &self,
        activity: &str,
        feedback: &str,
        model: &ModelChoice
    ) -> DidactResult<String>;
}
