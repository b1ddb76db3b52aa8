use anyhow::{ anyhow, Result };
use std::fs;
use std::path::Path;

use didact::implementations::config::GeneratorConfig;
use didact::traits::lesson_designer::LessonDesigner;

use crate::cli::commands::resolve_model;
use crate::cli::ui;

/// Manual refinement command; the result is not audited
pub async fn execute<S: LessonDesigner>(
    designer: &S,
    config: &GeneratorConfig,
    activity_path: &Path,
    feedback: Option<&str>,
    model: Option<&str>,
    output_path: Option<&Path>,
    output_format: &str
) -> Result<()> {
    if output_format != "json" {
        ui::print_header("Refining Activity");
    }

    let activity = fs
        ::read_to_string(activity_path)
        .map_err(|e| anyhow!("Failed to read activity file: {}", e))?;
    let feedback = match feedback {
        Some(feedback) => feedback.to_string(),
        None => ui::input_text("What should change in this activity?", false)?,
    };
    let model = resolve_model(model, &config.default_generator)?;

    let spinner = ui::spinner_with_message(&format!("Refining with {}...", model));
    let refined = designer.refine_with_feedback(&activity, &feedback, &model).await;
    spinner.finish_and_clear();
    let refined = refined?;

    if output_format == "json" {
        println!("{}", serde_json::json!({ "feedback": feedback, "activity": refined }));
    } else {
        ui::display_activity("Refined Activity", &refined);
    }

    if let Some(path) = output_path {
        fs::write(path, &refined).map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;
        ui::print_success(&format!("Saved to {}", path.display()));
    }
    Ok(())
}
