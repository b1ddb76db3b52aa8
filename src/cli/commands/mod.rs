use anyhow::{ anyhow, Result };
use std::path::Path;

use didact::implementations::docx::write_docx;
use didact::implementations::export::{ write_json, write_markdown, Document };
use didact::implementations::inspiration::InspirationSource;
use didact::models::catalog::category_for_group;
use didact::models::common::{ ModelChoice, TemplateKind };
use didact::models::taxonomy::CognitiveLevel;
use serde::Serialize;

use crate::cli::ui;
use crate::cli::{ InspirationArgs, ModelArgs };

pub mod activity;
pub mod catalog;
pub mod context;
pub mod refine;
pub mod sequence;

/// Topic, ideas or file, in that order; asks for a topic when none yields text
pub fn resolve_inspiration(args: &InspirationArgs) -> Result<String> {
    let source = if let Some(topic) = &args.topic {
        InspirationSource::from_topic(topic)
    } else if let Some(ideas) = &args.ideas {
        InspirationSource::from_ideas(ideas)
    } else if let Some(path) = &args.file {
        InspirationSource::read_file(path)
    } else {
        InspirationSource::default()
    };

    if let Some(warning) = &source.warning {
        ui::print_warning(warning);
    }
    if !source.is_empty() {
        return Ok(source.text);
    }

    let topic = ui::input_text("Central topic of the activity", false)?;
    let source = InspirationSource::from_topic(&topic);
    if source.is_empty() {
        return Err(anyhow!("An inspiration is required"));
    }
    Ok(source.text)
}

pub fn resolve_model(value: Option<&str>, default: &ModelChoice) -> Result<ModelChoice> {
    match value {
        Some(value) => value.parse::<ModelChoice>().map_err(|e| anyhow!(e)),
        None => Ok(default.clone()),
    }
}

pub fn resolve_models(
    args: &ModelArgs,
    default_generator: &ModelChoice,
    default_auditor: &ModelChoice
) -> Result<(ModelChoice, ModelChoice)> {
    Ok((
        resolve_model(args.generator.as_deref(), default_generator)?,
        resolve_model(args.auditor.as_deref(), default_auditor)?,
    ))
}

pub fn resolve_level(value: Option<&str>, prompt: &str) -> Result<CognitiveLevel> {
    match value {
        Some(value) => value.parse::<CognitiveLevel>().map_err(|e| anyhow!(e)),
        None => Ok(ui::select_level(prompt, CognitiveLevel::Analizar)?),
    }
}

pub fn resolve_template(value: Option<&str>) -> Result<TemplateKind> {
    match value {
        Some(value) => value.parse::<TemplateKind>().map_err(|e| anyhow!(e)),
        None => Ok(ui::select_template()?),
    }
}

/// Groups outside the catalog are accepted with a warning
pub fn resolve_group(value: Option<&str>) -> Result<String> {
    match value {
        Some(group) => {
            if category_for_group(group).is_none() {
                ui::print_warning(&format!("Group '{}' is not in the activity catalog", group));
            }
            Ok(group.trim().to_string())
        }
        None => Ok(ui::select_group()?),
    }
}

pub fn resolve_entry_level(value: Option<&str>) -> Result<String> {
    match value {
        Some(entry) => Ok(entry.trim().to_string()),
        None => Ok(ui::input_text("Expected entry level of the group", false)?),
    }
}

/// JSON for a `.json` path, Word for `.docx`, Markdown otherwise
pub fn write_output<T: Serialize>(path: &Path, document: &Document, report: &T) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => write_json(report, path)?,
        "docx" => write_docx(document, path)?,
        _ => write_markdown(document, path)?,
    }
    ui::print_success(&format!("Saved to {}", path.display()));
    Ok(())
}
