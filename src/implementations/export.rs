use log::{ debug, info };
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::errors::{ DidactError, DidactResult };
use crate::models::artifact::RefinementReport;
use crate::models::sequence::SequenceReport;

const SECTION_PREFIXES: [&str; 7] = [
    "**TÍTULO",
    "**OBJETIVOS",
    "**MATERIALES",
    "**EL HILO",
    "**HILO",
    "**DESARROLLO",
    "**CIERRE",
];
const PHASE_PREFIX: &str = "**FASE";
const EMPHASIS_PREFIXES: [&str; 3] = ["- **Facilitador", "- **➡️ Producto Clave", "- **Punto de Partida"];

/// One structural element of an exported document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph(String),
    Bold(String),
    Field {
        label: String,
        value: String,
    },
    Rule,
}

/// Format-neutral document built from one or more reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(title: &str) -> Self {
        Self {
            blocks: vec![Block::Heading { level: 1, text: title.to_string() }],
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    fn heading(&mut self, level: u8, text: impl Into<String>) {
        self.push(Block::Heading { level, text: text.into() });
    }

    fn field(&mut self, label: &str, value: impl Into<String>) {
        self.push(Block::Field { label: label.to_string(), value: value.into() });
    }

    /// Classification, final verdict and the formatted activity text
    fn push_report(&mut self, report: &RefinementReport, level: u8) {
        let classification = &report.classification;
        self.heading(level, "Definición Estratégica");
        self.field("Tema", classification.topic.clone());
        self.field("Grupo", classification.group.clone());
        self.field("Nivel de Entrada", classification.entry_level.clone());
        self.field("Nivel de Salida", classification.exit_level.to_string());

        self.heading(level, "Dictamen Final");
        self.field("Estado", report.artifact.status.marker());
        self.field("Resultado", report.outcome.to_string());
        self.field("Intentos", format!("{} de {}", report.artifact.attempt, report.max_attempts));
        if !report.artifact.observations.is_empty() {
            self.field("Observaciones", report.artifact.observations.clone());
        }

        self.heading(level, "Actividad Generada");
        if report.artifact.content.trim().is_empty() {
            self.push(Block::Paragraph("No se generó contenido.".to_string()));
        } else {
            self.blocks.extend(format_activity(&report.artifact.content, level + 1));
        }
    }

    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Heading { level, text } => {
                    out.push_str(&"#".repeat(*level as usize));
                    out.push(' ');
                    out.push_str(text);
                }
                Block::Paragraph(text) => out.push_str(text),
                Block::Bold(text) => out.push_str(&format!("**{}**", text)),
                Block::Field { label, value } => out.push_str(&format!("**{}:** {}", label, value)),
                Block::Rule => out.push_str("---"),
            }
            out.push_str("\n\n");
        }
        out
    }
}

/// Map activity text to blocks by its fixed line markers
///
/// Section headings land at `level`, phase headings one below. Blank lines
/// are dropped and unmarked lines become plain paragraphs without emphasis.
pub fn format_activity(content: &str, level: u8) -> Vec<Block> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if SECTION_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
                Block::Heading { level, text: line.replace("**", "").trim().to_string() }
            } else if line.starts_with("---") {
                Block::Rule
            } else if line.starts_with(PHASE_PREFIX) {
                Block::Heading { level: level + 1, text: line.replace("**", "").trim().to_string() }
            } else if EMPHASIS_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
                Block::Bold(line.replacen("- **", "", 1).replace("**", "").trim().to_string())
            } else {
                Block::Paragraph(line.replace('*', "").trim().to_string())
            }
        })
        .collect()
}

pub fn activity_document(report: &RefinementReport) -> Document {
    let mut doc = Document::new("Actividad de Aprendizaje Generada con IA");
    doc.push_report(report, 2);
    doc
}

/// Plan section first, then one section per session in order
pub fn sequence_document(report: &SequenceReport) -> Document {
    let mut doc = Document::new("Secuencia de Aprendizaje Generada con IA");

    doc.heading(2, "Plan de la Secuencia");
    if !report.plan.narrative_thread.is_empty() {
        doc.field("Hilo Narrativo", report.plan.narrative_thread.clone());
    }
    for session in &report.plan.sessions {
        let concept = if session.key_concept.is_empty() {
            String::new()
        } else {
            format!(" | {}", session.key_concept)
        };
        doc.field(
            &format!("Sesión {}", session.session_number),
            format!("{}{}", session.target_level, concept)
        );
    }

    if report.sessions.is_empty() {
        doc.push(Block::Paragraph("No se procesó ninguna actividad.".to_string()));
        return doc;
    }

    for session in &report.sessions {
        doc.heading(2, format!("Sesión {}: {}", session.session_number, session.target_level));
        match &session.result {
            Ok(session_report) => doc.push_report(session_report, 3),
            Err(error) => doc.field("Error", error.clone()),
        }
    }
    doc
}

/// Write the rendered Markdown, creating parent directories as needed
pub fn write_markdown(document: &Document, path: &Path) -> DidactResult<()> {
    ensure_parent(path)?;
    fs::write(path, document.render_markdown()).map_err(|e|
        DidactError::ExportError(format!("Failed to write {}: {}", path.display(), e))
    )?;
    info!("Document saved to {}", path.display());
    Ok(())
}

pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> DidactResult<()> {
    ensure_parent(path)?;
    let json = serde_json
        ::to_string_pretty(value)
        .map_err(|e| DidactError::ExportError(format!("Failed to serialize report: {}", e)))?;
    fs::write(path, json).map_err(|e|
        DidactError::ExportError(format!("Failed to write {}: {}", path.display(), e))
    )?;
    info!("Report saved to {}", path.display());
    Ok(())
}

pub(crate) fn ensure_parent(path: &Path) -> DidactResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        debug!("Ensuring output directory {}", parent.display());
        fs::create_dir_all(parent).map_err(|e|
            DidactError::ExportError(format!("Failed to create {}: {}", parent.display(), e))
        )?;
    }
    Ok(())
}
