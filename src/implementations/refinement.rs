use chrono::Utc;
use log::{ debug, error, info, warn };

use crate::errors::{ DidactError, DidactResult };
use crate::implementations::prompts::PromptAssembler;
use crate::models::artifact::{ Artifact, RefinementOutcome, RefinementReport };
use crate::models::parameters::GenerationParameters;
use crate::models::progress::ProgressEvent;
use crate::traits::model_invoker::ModelInvoker;
use crate::traits::progress_sink::ProgressSink;
use crate::traits::verdict_parser::VerdictParser;

/// Bounded generate, audit and refine cycle for one artifact
///
/// Each attempt makes exactly one generation call and, if that succeeds,
/// exactly one audit call. Observations from a non-approving audit are fed
/// into the next generation prompt. Invocation failures end the cycle at
/// once; they are reported in the outcome, not as `Err`.
pub struct RefinementLoop<'a> {
    invoker: &'a dyn ModelInvoker,
    parser: &'a dyn VerdictParser,
    progress: &'a dyn ProgressSink,
    max_attempts: u32,
}

impl<'a> RefinementLoop<'a> {
    pub fn new(
        invoker: &'a dyn ModelInvoker,
        parser: &'a dyn VerdictParser,
        progress: &'a dyn ProgressSink,
        max_attempts: u32
    ) -> Self {
        Self {
            invoker,
            parser,
            progress,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run the cycle to a terminal state
    ///
    /// Returns `Err` only for problems found before the first call:
    /// empty inspiration or missing credentials for either role.
    pub async fn run(&self, params: &GenerationParameters) -> DidactResult<RefinementReport> {
        if params.inspiration.trim().is_empty() {
            return Err(DidactError::InvalidInput("Inspiration must not be empty".to_string()));
        }
        self.invoker.ensure_configured(params.generator.backend)?;
        self.invoker.ensure_configured(params.auditor.backend)?;

        let assembler = PromptAssembler::new(params.template);
        let reference = assembler.reference_model(&params.narrative_context);
        let mut artifact = Artifact::empty();
        let mut feedback: Option<String> = None;

        info!(
            "Starting refinement loop: generator {}, auditor {}, up to {} attempts",
            params.generator,
            params.auditor,
            self.max_attempts
        );

        for attempt in 1..=self.max_attempts {
            self.progress.notify(&(ProgressEvent::AttemptStarted {
                attempt,
                max_attempts: self.max_attempts,
            }));

            // Generating(attempt)
            self.progress.notify(&(ProgressEvent::Generating {
                attempt,
                model: params.generator.clone(),
            }));
            let prompt = assembler.generation_prompt(params, &reference, feedback.as_deref());
            debug!("Generation prompt for attempt {}: {} characters", attempt, prompt.len());

            let content = match self.invoker.invoke_choice(&params.generator, &prompt).await {
                Ok(content) => content,
                Err(e) => {
                    error!("Generation failed on attempt {}: {}", attempt, e);
                    artifact.attempt = attempt;
                    let error = e.to_string();
                    self.progress.notify(
                        &(ProgressEvent::GenerationFailed { attempt, error: error.clone() })
                    );
                    return Ok(
                        self.finish(artifact, RefinementOutcome::GenerationFailed { attempt, error }, params)
                    );
                }
            };

            artifact.content = content;
            artifact.attempt = attempt;
            self.progress.notify(
                &(ProgressEvent::Generated { attempt, content: artifact.content.clone() })
            );

            // Auditing(attempt)
            self.progress.notify(&(ProgressEvent::Auditing {
                attempt,
                model: params.auditor.clone(),
            }));
            let audit_prompt = assembler.audit_prompt(
                &artifact.content,
                params.exit_level,
                &reference
            );

            let audit_text = match self.invoker.invoke_choice(&params.auditor, &audit_prompt).await {
                Ok(text) => text,
                Err(e) => {
                    error!("Audit failed on attempt {}: {}", attempt, e);
                    let error = e.to_string();
                    self.progress.notify(&(ProgressEvent::AuditFailed { attempt, error: error.clone() }));
                    return Ok(
                        self.finish(artifact, RefinementOutcome::AuditFailed { attempt, error }, params)
                    );
                }
            };

            let verdict = self.parser.parse(&audit_text);
            if verdict.is_unexpected_shape() {
                warn!("Attempt {}: audit response did not follow the verdict format", attempt);
            }
            artifact.status = verdict.status;
            artifact.observations = verdict.observations;
            self.progress.notify(&(ProgressEvent::Audited {
                attempt,
                status: verdict.status,
                audit_text,
            }));

            if verdict.status.is_approved() {
                info!("Activity approved on attempt {}", attempt);
                self.progress.notify(&(ProgressEvent::Approved { attempt }));
                return Ok(self.finish(artifact, RefinementOutcome::Approved, params));
            }

            if attempt < self.max_attempts {
                info!("Attempt {} not approved ({}), refining", attempt, verdict.status);
                self.progress.notify(&(ProgressEvent::NeedsRefinement {
                    attempt,
                    observations: artifact.observations.clone(),
                }));
                feedback = Some(artifact.observations.clone());
            }
        }

        warn!("No approval after {} attempts", self.max_attempts);
        self.progress.notify(&(ProgressEvent::Exhausted { max_attempts: self.max_attempts }));
        Ok(self.finish(artifact, RefinementOutcome::Exhausted, params))
    }

    fn finish(
        &self,
        artifact: Artifact,
        outcome: RefinementOutcome,
        params: &GenerationParameters
    ) -> RefinementReport {
        RefinementReport {
            artifact,
            outcome,
            max_attempts: self.max_attempts,
            classification: params.classification(),
            finished_at: Utc::now(),
        }
    }
}
