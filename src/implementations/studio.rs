use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::config::DidactOptions;
use crate::errors::{ DidactError, DidactResult };
use crate::implementations::prompts::PromptAssembler;
use crate::implementations::refinement::RefinementLoop;
use crate::implementations::sequence::{ run_sessions, SequencePlanner };
use crate::implementations::verdict::MarkerVerdictParser;
use crate::models::artifact::RefinementReport;
use crate::models::common::ModelChoice;
use crate::models::parameters::GenerationParameters;
use crate::models::sequence::SequenceReport;
use crate::traits::lesson_designer::{ LessonDesigner, SequenceRequest };
use crate::traits::model_invoker::ModelInvoker;
use crate::traits::progress_sink::{ NoProgress, ProgressSink };
use crate::traits::verdict_parser::VerdictParser;

/// Lesson designer wired from an invoker, a verdict parser and a progress sink
pub struct Studio {
    invoker: Arc<dyn ModelInvoker>,
    parser: Arc<dyn VerdictParser>,
    progress: Arc<dyn ProgressSink>,
    options: DidactOptions,
}

impl Studio {
    /// Marker-based verdicts, no progress output
    pub fn new(invoker: Arc<dyn ModelInvoker>, options: DidactOptions) -> Self {
        Self {
            invoker,
            parser: Arc::new(MarkerVerdictParser::new()),
            progress: Arc::new(NoProgress),
            options,
        }
    }

    pub fn with_parser(mut self, parser: Arc<dyn VerdictParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn options(&self) -> &DidactOptions {
        &self.options
    }

    fn refinement_loop(&self) -> RefinementLoop<'_> {
        RefinementLoop::new(
            self.invoker.as_ref(),
            self.parser.as_ref(),
            self.progress.as_ref(),
            self.options.max_attempts
        )
    }

    /// Single unaudited call with the given prompt
    async fn single_call(&self, model: &ModelChoice, prompt: &str) -> DidactResult<String> {
        self.invoker.ensure_configured(model.backend)?;
        self.invoker.invoke_choice(model, prompt).await
    }
}

#[async_trait]
impl LessonDesigner for Studio {
    async fn design_activity(&self, params: &GenerationParameters) -> DidactResult<RefinementReport> {
        info!("Designing activity for group '{}' up to {}", params.group, params.exit_level);
        self.refinement_loop().run(params).await
    }

    async fn design_sequence(&self, request: &SequenceRequest) -> DidactResult<SequenceReport> {
        // Both roles are checked up front so a missing key fails once, not per session
        self.invoker.ensure_configured(request.generator.backend)?;
        self.invoker.ensure_configured(request.auditor.backend)?;

        let planner = SequencePlanner::new(self.invoker.as_ref(), self.progress.as_ref());
        let plan = planner.plan(
            &request.inspiration,
            request.session_count,
            request.final_level,
            &request.generator
        ).await?;

        let refinement = self.refinement_loop();
        let sessions = run_sessions(&refinement, self.progress.as_ref(), request, &plan).await;

        Ok(SequenceReport { plan, sessions })
    }

    async fn suggest_context(&self, inspiration: &str, model: &ModelChoice) -> DidactResult<String> {
        if inspiration.trim().is_empty() {
            return Err(DidactError::InvalidInput("Inspiration must not be empty".to_string()));
        }
        let prompt = PromptAssembler::context_suggestion_prompt(inspiration);
        let context = self.single_call(model, &prompt).await?;
        Ok(context.trim().to_string())
    }

    async fn refine_with_feedback(
        &self,
        activity: &str,
        feedback: &str,
        model: &ModelChoice
    ) -> DidactResult<String> {
        if activity.trim().is_empty() {
            return Err(DidactError::InvalidInput("Activity text must not be empty".to_string()));
        }
        if feedback.trim().is_empty() {
            return Err(DidactError::InvalidInput("Feedback must not be empty".to_string()));
        }
        let prompt = PromptAssembler::manual_refinement_prompt(activity, feedback);
        self.single_call(model, &prompt).await
    }
}
