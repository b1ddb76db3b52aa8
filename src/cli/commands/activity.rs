use anyhow::{ anyhow, Result };
use std::path::Path;

use didact::implementations::config::GeneratorConfig;
use didact::implementations::export::activity_document;
use didact::models::parameters::GenerationParameters;
use didact::traits::lesson_designer::LessonDesigner;

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

/// Single activity command
#[allow(clippy::too_many_arguments)]
pub async fn execute<S: LessonDesigner>(
    designer: &S,
    config: &GeneratorConfig,
    inspiration_args: &InspirationArgs,
    group: Option<&str>,
    entry_level: Option<&str>,
    exit_level: Option<&str>,
    context: Option<&str>,
    suggest_context: bool,
    template: Option<&str>,
    model_args: &ModelArgs,
    output_path: Option<&Path>,
    output_format: &str
) -> Result<()> {
    let text_output = output_format != "json";
    if text_output {
        ui::print_header("Designing Activity");
    }

    let template = resolve_template(template)?;
    let inspiration = resolve_inspiration(inspiration_args)?;
    let group = resolve_group(group)?;
    let entry_level = resolve_entry_level(entry_level)?;
    let exit_level = resolve_level(exit_level, "Expected exit level")?;
    let (generator, auditor) = resolve_models(
        model_args,
        &config.default_generator,
        &config.default_auditor
    )?;

    let narrative_context = match context {
        Some(context) => context.trim().to_string(),
        None if suggest_context => {
            let spinner = ui::spinner_with_message("Suggesting a narrative context...");
            let suggestion = designer.suggest_context(&inspiration, &generator).await;
            spinner.finish_and_clear();
            match suggestion {
                Ok(suggestion) if !text_output => suggestion,
                Ok(suggestion) => {
                    ui::display_activity("Suggested Narrative Context", &suggestion);
                    if ui::confirm_action("Use this narrative context?")? { suggestion } else { String::new() }
                }
                Err(e) => {
                    ui::print_warning(&format!("Could not suggest a context: {}", e));
                    String::new()
                }
            }
        }
        None => String::new(),
    };

    if text_output {
        ui::print_result("Group", &group);
        ui::print_result("Exit level", &exit_level.to_string());
        ui::print_result("Generator", &generator.to_string());
        ui::print_result("Auditor", &auditor.to_string());
    }

    let params = GenerationParameters {
        inspiration,
        group,
        entry_level,
        exit_level,
        narrative_context,
        generator,
        auditor,
        template,
        session: None,
    };

    let report = designer.design_activity(&params).await?;

    if !text_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if !report.artifact.content.is_empty() {
            ui::display_activity("Final Activity", &report.artifact.content);
        }
        ui::print_result("Outcome", &report.outcome.to_string());
        ui::print_verdict_status(&report.artifact.status);
        if !report.artifact.observations.is_empty() {
            ui::print_result("Observations", &report.artifact.observations);
        }
    }

    if let Some(path) = output_path {
        write_output(path, &activity_document(&report), &report)?;
    }

    if report.outcome.is_failure() {
        return Err(anyhow!("{}", report.outcome));
    }
    Ok(())
}
