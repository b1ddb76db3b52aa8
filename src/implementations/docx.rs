use log::{ debug, info };
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt::Display;
use std::fs::File;
use std::io::{ Read, Write };
use std::path::Path;
use zip::write::FileOptions;
use zip::{ ZipArchive, ZipWriter };

use crate::errors::{ DidactError, DidactResult };
use crate::implementations::export::{ ensure_parent, Block, Document };

const DOCUMENT_PART: &str = "word/document.xml";

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" "#,
    r#"ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"</Types>"#
);

const PACKAGE_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" "#,
    r#"Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" "#,
    r#"Target="word/document.xml"/>"#,
    r#"</Relationships>"#
);

const DOCUMENT_OPEN: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#
);
const DOCUMENT_CLOSE: &str = "</w:body></w:document>";

const RULE_PARAGRAPH: &str =
    r#"<w:p><w:pPr><w:pBdr><w:bottom w:val="single" w:sz="6" w:space="1" w:color="auto"/></w:pBdr></w:pPr></w:p>"#;

fn read_error(path: &Path, e: impl Display) -> DidactError {
    DidactError::DocumentError(format!("Failed to read Word document {}: {}", path.display(), e))
}

fn write_error(path: &Path, e: impl Display) -> DidactError {
    DidactError::ExportError(format!("Failed to write {}: {}", path.display(), e))
}

/// Text of every paragraph of a `.docx` file, in document order
///
/// Empty paragraphs are kept as empty strings. Tabs and line breaks inside a
/// paragraph become `\t` and `\n`.
pub fn read_paragraphs(path: &Path) -> DidactResult<Vec<String>> {
    let file = File::open(path).map_err(|e| read_error(path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| read_error(path, e))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| read_error(path, e))?
        .read_to_string(&mut xml)
        .map_err(|e| read_error(path, e))?;

    let paragraphs = paragraphs_from_xml(&xml).map_err(|e| read_error(path, e))?;
    debug!("Read {} paragraphs from {}", paragraphs.len(), path.display());
    Ok(paragraphs)
}

fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => {
                in_text = true;
            }
            Event::End(e) =>
                match e.local_name().as_ref() {
                    b"t" => {
                        in_text = false;
                    }
                    b"p" => paragraphs.push(std::mem::take(&mut current)),
                    _ => {}
                }
            Event::Empty(e) =>
                match e.local_name().as_ref() {
                    b"tab" => current.push('\t'),
                    b"br" | b"cr" => current.push('\n'),
                    b"p" => paragraphs.push(String::new()),
                    _ => {}
                }
            Event::Text(text) if in_text => current.push_str(&text.unescape()?),
            Event::Eof => {
                break;
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// One run; newlines inside `text` become line breaks
fn run(text: &str, bold: bool, size: Option<u32>) -> String {
    let mut props = String::new();
    if bold {
        props.push_str("<w:b/>");
    }
    if let Some(size) = size {
        props.push_str(&format!(r#"<w:sz w:val="{}"/>"#, size));
    }
    let props = if props.is_empty() { props } else { format!("<w:rPr>{}</w:rPr>", props) };

    let body = text
        .split('\n')
        .map(|line| format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape(line)))
        .collect::<Vec<_>>()
        .join("<w:br/>");
    format!("<w:r>{}{}</w:r>", props, body)
}

/// Half-point font size per heading level
fn heading_size(level: u8) -> u32 {
    match level {
        1 => 36,
        2 => 30,
        3 => 26,
        _ => 24,
    }
}

fn paragraph_xml(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => {
            format!("<w:p>{}</w:p>", run(text, true, Some(heading_size(*level))))
        }
        Block::Paragraph(text) => format!("<w:p>{}</w:p>", run(text, false, None)),
        Block::Bold(text) => format!("<w:p>{}</w:p>", run(text, true, None)),
        Block::Field { label, value } => {
            format!("<w:p>{}{}</w:p>", run(&format!("{}: ", label), true, None), run(value, false, None))
        }
        Block::Rule => RULE_PARAGRAPH.to_string(),
    }
}

pub fn document_xml(document: &Document) -> String {
    let mut xml = String::from(DOCUMENT_OPEN);
    for block in document.blocks() {
        xml.push_str(&paragraph_xml(block));
    }
    xml.push_str(DOCUMENT_CLOSE);
    xml
}

/// Write a minimal Word package, creating parent directories as needed
pub fn write_docx(document: &Document, path: &Path) -> DidactResult<()> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| write_error(path, e))?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default();

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", PACKAGE_RELS.to_string()),
        (DOCUMENT_PART, document_xml(document)),
    ];
    for (name, content) in parts {
        zip.start_file(name, options).map_err(|e| write_error(path, e))?;
        zip.write_all(content.as_bytes()).map_err(|e| write_error(path, e))?;
    }
    zip.finish().map_err(|e| write_error(path, e))?;

    info!("Document saved to {}", path.display());
    Ok(())
}
