use log::{ info, warn };
use std::fs;
use std::path::Path;

use crate::errors::DidactError;
use crate::implementations::docx;
use crate::implementations::prompts::topic_inspiration;

/// Inspiration text plus any warning raised while obtaining it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspirationSource {
    pub text: String,
    pub warning: Option<String>,
}

impl InspirationSource {
    /// A single central topic
    pub fn from_topic(topic: &str) -> Self {
        Self { text: topic_inspiration(topic), warning: None }
    }

    /// Free-form brainstorm text, used as is
    pub fn from_ideas(ideas: &str) -> Self {
        Self { text: ideas.trim().to_string(), warning: None }
    }

    /// Read a Word, text or Markdown document
    ///
    /// Non-empty paragraphs are joined with newlines. A file that cannot be
    /// read, or whose format is not supported, yields empty text and a warning.
    pub fn read_file(path: &Path) -> Self {
        match read_paragraphs(path) {
            Ok(text) => {
                info!("Read {} characters of inspiration from {}", text.len(), path.display());
                Self { text, warning: None }
            }
            Err(e) => {
                warn!("{}", e);
                Self { text: String::new(), warning: Some(e.to_string()) }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

fn read_paragraphs(path: &Path) -> Result<String, DidactError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    let paragraphs = match extension.as_str() {
        "docx" => docx::read_paragraphs(path)?,
        "txt" | "md" | "markdown" | "" => {
            let raw = fs
                ::read_to_string(path)
                .map_err(|e| DidactError::DocumentError(format!("Failed to read {}: {}", path.display(), e)))?;
            raw.split("\n\n").map(str::to_string).collect()
        }
        _ => {
            return Err(
                DidactError::DocumentError(
                    format!(
                        "Unsupported document format '.{}' for {}; use .docx, .txt or .md",
                        extension,
                        path.display()
                    )
                )
            );
        }
    };

    Ok(
        paragraphs
            .iter()
            .map(|paragraph| paragraph.trim())
            .filter(|paragraph| !paragraph.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    )
}
