use anyhow::{ anyhow, Result };
use std::path::Path;

use didact::implementations::config::GeneratorConfig;
use didact::implementations::export::sequence_document;
use didact::traits::lesson_designer::{ LessonDesigner, SequenceRequest };

use crate::cli::commands::{
    resolve_entry_level,
    resolve_group,
    resolve_inspiration,
    resolve_level,
    resolve_models,
    resolve_template,
    write_output,
};
use crate::cli::ui;
use crate::cli::{ InspirationArgs, ModelArgs };

/// Multi-session sequence command
#[allow(clippy::too_many_arguments)]
pub async fn execute<S: LessonDesigner>(
    designer: &S,
    config: &GeneratorConfig,
    inspiration_args: &InspirationArgs,
    group: Option<&str>,
    entry_level: Option<&str>,
    session_count: usize,
    final_level: Option<&str>,
    template: Option<&str>,
    model_args: &ModelArgs,
    output_path: Option<&Path>,
    output_format: &str
) -> Result<()> {
    if output_format != "json" {
        ui::print_header("Designing Sequence");
    }

    if session_count == 0 {
        return Err(anyhow!("A sequence needs at least one session"));
    }
    let template = resolve_template(template)?;
    let inspiration = resolve_inspiration(inspiration_args)?;
    let group = resolve_group(group)?;
    let entry_level = resolve_entry_level(entry_level)?;
    let final_level = resolve_level(final_level, "Exit level of the last session")?;
    let (generator, auditor) = resolve_models(
        model_args,
        &config.default_generator,
        &config.default_auditor
    )?;

    let request = SequenceRequest {
        inspiration,
        group,
        entry_level,
        session_count,
        final_level,
        generator,
        auditor,
        template,
    };

    let report = designer.design_sequence(&request).await?;

    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ui::display_activity("Sequence Plan", &report.plan.text);
        for session in &report.sessions {
            let label = format!("Session {} ({})", session.session_number, session.target_level);
            match &session.result {
                Ok(session_report) => ui::print_result(&label, &session_report.outcome.to_string()),
                Err(error) => ui::print_error(&format!("{}: {}", label, error)),
            }
        }
        ui::print_info(
            &format!("{} of {} sessions approved", report.approved_count(), report.sessions.len())
        );
    }

    if let Some(path) = output_path {
        write_output(path, &sequence_document(&report), &report)?;
    }
    Ok(())
}
