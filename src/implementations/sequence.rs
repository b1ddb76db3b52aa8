use log::{ debug, error, info, warn };
use regex::Regex;

use crate::errors::{ DidactError, DidactResult };
use crate::implementations::prompts::{
    PromptAssembler,
    KEY_CONCEPT_LABEL,
    LEVEL_LABEL,
    NARRATIVE_THREAD_LABEL,
};
use crate::implementations::refinement::RefinementLoop;
use crate::models::common::ModelChoice;
use crate::models::parameters::{ GenerationParameters, SessionFocus };
use crate::models::progress::ProgressEvent;
use crate::models::sequence::{ SequencePlan, SessionDescriptor, SessionReport };
use crate::models::taxonomy::CognitiveLevel;
use crate::traits::lesson_designer::SequenceRequest;
use crate::traits::model_invoker::ModelInvoker;
use crate::traits::progress_sink::ProgressSink;

/// Rest-of-line values following `label`, in document order
fn labelled_values(text: &str, label: &str) -> Vec<String> {
    let pattern = format!(r"{}\**[ \t]*([^\n]*)", regex::escape(label));
    match Regex::new(&pattern) {
        Ok(re) =>
            re
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().trim().trim_matches('*').trim().to_string())
                .collect(),
        Err(e) => {
            error!("Invalid label pattern for '{}': {}", label, e);
            Vec::new()
        }
    }
}

/// First alphabetic word of a label value, parsed as a level
fn level_from_value(value: &str) -> Option<CognitiveLevel> {
    value
        .split(|c: char| !c.is_alphabetic())
        .find(|word| !word.is_empty())
        .and_then(|word| word.parse().ok())
}

/// `Sesión N` blocks in document order, each running up to the next header
fn session_blocks(plan_text: &str) -> Vec<(usize, &str)> {
    let re = match Regex::new(r"(?mi)^[ \t>#*\-]*sesi[oó]n[ \t]+(\d+)") {
        Ok(re) => re,
        Err(e) => {
            error!("Invalid session header pattern: {}", e);
            return Vec::new();
        }
    };

    let headers: Vec<(usize, usize)> = re
        .captures_iter(plan_text)
        .filter_map(|caps| {
            let start = caps.get(0)?.start();
            let number = caps.get(1)?.as_str().parse().ok()?;
            Some((number, start))
        })
        .collect();

    headers
        .iter()
        .enumerate()
        .map(|(index, &(number, start))| {
            let end = headers
                .get(index + 1)
                .map(|&(_, next)| next)
                .unwrap_or(plan_text.len());
            (number, &plan_text[start..end])
        })
        .collect()
}

/// First value of `label` for each session
///
/// With `Sesión N` headers each session only reads its own block. Without
/// them the k-th label belongs to session k.
fn per_session_values(plan_text: &str, label: &str, session_count: usize) -> Vec<Option<String>> {
    let blocks = session_blocks(plan_text);
    if blocks.is_empty() {
        let mut values = labelled_values(plan_text, label).into_iter();
        return (0..session_count).map(|_| values.next()).collect();
    }

    (1..=session_count)
        .map(|number| {
            blocks
                .iter()
                .find(|(block_number, _)| *block_number == number)
                .and_then(|(_, block)| labelled_values(block, label).into_iter().next())
        })
        .collect()
}

/// Target level per session, scanned from the plan text
///
/// Sessions without a label of their own, or whose label names no known
/// level, get the terminal level.
pub fn extract_target_levels(plan_text: &str, session_count: usize) -> Vec<CognitiveLevel> {
    let values = per_session_values(plan_text, LEVEL_LABEL, session_count);
    let unlabelled = values
        .iter()
        .filter(|value| value.is_none())
        .count();
    if unlabelled > 0 {
        warn!(
            "Sequence plan leaves {} of {} sessions without a level; they default to {}",
            unlabelled,
            session_count,
            CognitiveLevel::terminal()
        );
    }

    values
        .into_iter()
        .map(|value| {
            value
                .as_deref()
                .and_then(level_from_value)
                .unwrap_or_else(CognitiveLevel::terminal)
        })
        .collect()
}

/// Key concept per session, empty where the plan has none
pub fn extract_key_concepts(plan_text: &str, session_count: usize) -> Vec<String> {
    per_session_values(plan_text, KEY_CONCEPT_LABEL, session_count)
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect()
}

pub fn extract_narrative_thread(plan_text: &str) -> String {
    labelled_values(plan_text, NARRATIVE_THREAD_LABEL).into_iter().next().unwrap_or_default()
}

/// Build a plan from model output; never fails
pub fn parse_plan(plan_text: &str, session_count: usize) -> SequencePlan {
    let levels = extract_target_levels(plan_text, session_count);
    let concepts = extract_key_concepts(plan_text, session_count);

    let sessions = levels
        .into_iter()
        .zip(concepts)
        .enumerate()
        .map(|(index, (target_level, key_concept))| SessionDescriptor {
            session_number: index + 1,
            key_concept,
            target_level,
        })
        .collect();

    SequencePlan {
        text: plan_text.to_string(),
        narrative_thread: extract_narrative_thread(plan_text),
        sessions,
    }
}

/// Plans a multi-session sequence with one unaudited generation call
pub struct SequencePlanner<'a> {
    invoker: &'a dyn ModelInvoker,
    progress: &'a dyn ProgressSink,
}

impl<'a> SequencePlanner<'a> {
    pub fn new(invoker: &'a dyn ModelInvoker, progress: &'a dyn ProgressSink) -> Self {
        Self { invoker, progress }
    }

    pub async fn plan(
        &self,
        inspiration: &str,
        session_count: usize,
        final_level: CognitiveLevel,
        generator: &ModelChoice
    ) -> DidactResult<SequencePlan> {
        if session_count == 0 {
            return Err(DidactError::InvalidInput("A sequence needs at least one session".to_string()));
        }
        if inspiration.trim().is_empty() {
            return Err(DidactError::InvalidInput("Inspiration must not be empty".to_string()));
        }
        self.invoker.ensure_configured(generator.backend)?;

        info!("Planning a sequence of {} sessions ending at {}", session_count, final_level);
        self.progress.notify(&(ProgressEvent::PlanningSequence {
            sessions: session_count,
            model: generator.clone(),
        }));

        let prompt = PromptAssembler::sequence_plan_prompt(inspiration, session_count, final_level);
        let text = self.invoker.invoke_choice(generator, &prompt).await?;
        let plan = parse_plan(&text, session_count);

        debug!("Planned levels: {:?}", plan.target_levels());
        Ok(plan)
    }
}

/// Run one refinement loop per planned session, in ascending order
///
/// Every session sees the whole plan as its narrative context. A session
/// that fails is recorded and the next one still runs.
pub async fn run_sessions(
    refinement: &RefinementLoop<'_>,
    progress: &dyn ProgressSink,
    request: &SequenceRequest,
    plan: &SequencePlan
) -> Vec<SessionReport> {
    let total = plan.sessions.len();
    let mut reports = Vec::with_capacity(total);

    for session in &plan.sessions {
        progress.notify(&(ProgressEvent::SessionStarted {
            number: session.session_number,
            total,
            target_level: session.target_level,
        }));
        info!("Generating session {} of {} ({})", session.session_number, total, session.target_level);

        let params = GenerationParameters {
            inspiration: request.inspiration.clone(),
            group: request.group.clone(),
            entry_level: request.entry_level.clone(),
            exit_level: session.target_level,
            narrative_context: plan.text.clone(),
            generator: request.generator.clone(),
            auditor: request.auditor.clone(),
            template: request.template,
            session: Some(SessionFocus {
                number: session.session_number,
                total,
            }),
        };

        let result = refinement.run(&params).await.map_err(|e| {
            error!("Session {} failed: {}", session.session_number, e);
            e.to_string()
        });

        reports.push(SessionReport {
            session_number: session.session_number,
            target_level: session.target_level,
            result,
        });
    }

    reports
}
