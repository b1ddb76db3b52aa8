#[cfg(test)]
mod tests {
    use std::fs::{ self, File };
    use std::io::Write;
    use std::path::Path;
    use tempfile::tempdir;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    use crate::implementations::inspiration::InspirationSource;

    fn write_word_file(path: &Path, body: &str) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        zip.start_file("word/document.xml", FileOptions::default()).unwrap();
        write!(
            zip,
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        ).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_topic_and_ideas() {
        let topic = InspirationSource::from_topic("  el ciclo del agua ");
        assert_eq!(topic.text, "El tema central es: el ciclo del agua.");
        assert!(topic.warning.is_none());

        let ideas = InspirationSource::from_ideas("\nlluvia, nubes, evaporación\n");
        assert_eq!(ideas.text, "lluvia, nubes, evaporación");
    }

    #[test]
    fn test_reads_paragraphs_from_text_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ideas.md");
        fs::write(&path, "Primer párrafo.\n\n\n\nSegundo párrafo\ncon dos líneas.\n\n").unwrap();

        let source = InspirationSource::read_file(&path);

        assert!(source.warning.is_none());
        assert_eq!(source.text, "Primer párrafo.\nSegundo párrafo\ncon dos líneas.");
    }

    #[test]
    fn test_missing_file_degrades_to_empty_text() {
        let dir = tempdir().unwrap();

        let source = InspirationSource::read_file(&dir.path().join("no-existe.txt"));

        assert!(source.is_empty());
        assert!(source.warning.unwrap().contains("no-existe.txt"));
    }

    #[test]
    fn test_reads_paragraphs_from_word_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ideas.docx");
        write_word_file(
            &path,
            "<w:p><w:r><w:t>Piratas </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>&amp; mapas</w:t></w:r></w:p>\
             <w:p/>\
             <w:p><w:r><w:t xml:space=\"preserve\">  </w:t></w:r></w:p>\
             <w:p><w:r><w:t>Repartir</w:t><w:tab/><w:t>monedas</w:t></w:r></w:p>"
        );

        let source = InspirationSource::read_file(&path);

        assert!(source.warning.is_none());
        assert_eq!(source.text, "Piratas & mapas\nRepartir\tmonedas");
    }

    #[test]
    fn test_corrupt_word_file_degrades_to_empty_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.docx");
        fs::write(&path, [0x50, 0x4b, 0x03, 0x04]).unwrap();

        let source = InspirationSource::read_file(&path);

        assert!(source.is_empty());
        assert!(source.warning.unwrap().contains("plan.docx"));
    }

    #[test]
    fn test_unsupported_format_degrades_to_empty_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.pdf");
        fs::write(&path, b"%PDF-1.7").unwrap();

        let source = InspirationSource::read_file(&path);

        assert!(source.is_empty());
        assert!(source.warning.unwrap().contains(".pdf"));
    }
}
