use anyhow::Result;

use didact::implementations::config::GeneratorConfig;
use didact::traits::lesson_designer::LessonDesigner;

use crate::cli::commands::{ resolve_inspiration, resolve_model };
use crate::cli::ui;
use crate::cli::InspirationArgs;

/// Narrative context suggestion command
pub async fn execute<S: LessonDesigner>(
    designer: &S,
    config: &GeneratorConfig,
    inspiration_args: &InspirationArgs,
    model: Option<&str>,
    output_format: &str
) -> Result<()> {
    let inspiration = resolve_inspiration(inspiration_args)?;
    let model = resolve_model(model, &config.default_generator)?;

    let spinner = ui::spinner_with_message(&format!("Asking {} for a narrative context...", model));
    let context = designer.suggest_context(&inspiration, &model).await;
    spinner.finish_and_clear();
    let context = context?;

    if output_format == "json" {
        println!("{}", serde_json::json!({ "inspiration": inspiration, "context": context }));
    } else {
        ui::display_activity("Suggested Narrative Context", &context);
    }
    Ok(())
}
