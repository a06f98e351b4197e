//! Document ingestion adapters: uploaded bytes to plain text.
//!
//! The scoring core only ever sees strings; everything binary stops here.
//! Failures are explicit so a broken upload can never turn into an
//! empty-but-plausible profile downstream.

use std::io::{Cursor, Read};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Legacy .doc is not supported. Please upload .docx or .pdf.")]
    LegacyDoc,

    #[error("Could not extract any text from the uploaded document")]
    EmptyDocument,

    #[error("Unreadable PDF: {0}")]
    Pdf(String),

    #[error("Unreadable DOCX: {0}")]
    Docx(String),
}

static XML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Extracts plain text from an uploaded document, dispatching on the file
/// extension. Unknown extensions are treated as UTF-8 text (lossy).
pub fn extract_text(filename: &str, data: &[u8]) -> Result<String, IngestError> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let text = match ext.as_str() {
        "pdf" => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| IngestError::Pdf(e.to_string()))?,
        "docx" => extract_docx_text(data)?,
        "doc" => return Err(IngestError::LegacyDoc),
        _ => String::from_utf8_lossy(data).into_owned(),
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(IngestError::EmptyDocument);
    }
    Ok(text)
}

/// Pulls paragraph text out of `word/document.xml`. Paragraph ends map to
/// newlines; remaining markup is stripped and basic entities decoded.
/// A full OOXML parser is not warranted for text recovery.
fn extract_docx_text(data: &[u8]) -> Result<String, IngestError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| IngestError::Docx(e.to_string()))?;
    let mut document = archive
        .by_name("word/document.xml")
        .map_err(|e| IngestError::Docx(e.to_string()))?;
    let mut xml = String::new();
    document
        .read_to_string(&mut xml)
        .map_err(|e| IngestError::Docx(e.to_string()))?;

    let xml = xml.replace("</w:p>", "\n").replace("<w:br/>", "\n");
    let stripped = XML_TAG_RE.replace_all(&xml, "");
    Ok(decode_entities(&stripped))
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn docx_with(document_xml: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("word/document.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_plain_text_passthrough() {
        let text = extract_text("resume.txt", b"Jane Doe\nEngineer").unwrap();
        assert_eq!(text, "Jane Doe\nEngineer");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_lossy_utf8() {
        let text = extract_text("resume.data", b"plain body \xff here").unwrap();
        assert!(text.starts_with("plain body"));
        assert!(text.ends_with("here"));
    }

    #[test]
    fn test_legacy_doc_is_rejected() {
        let err = extract_text("resume.doc", b"anything").unwrap_err();
        assert!(matches!(err, IngestError::LegacyDoc));
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let err = extract_text("resume.txt", b"   \n  ").unwrap_err();
        assert!(matches!(err, IngestError::EmptyDocument));
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let data = docx_with(
            "<w:document><w:body>\
             <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Senior Engineer</w:t></w:r></w:p>\
             </w:body></w:document>",
        );
        let text = extract_text("resume.docx", &data).unwrap();
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, ["Jane Doe", "Senior Engineer"]);
    }

    #[test]
    fn test_docx_entities_are_decoded() {
        let data = docx_with("<w:p><w:t>C&amp;O &lt;Platform&gt;</w:t></w:p>");
        let text = extract_text("resume.docx", &data).unwrap();
        assert_eq!(text, "C&O <Platform>");
    }

    #[test]
    fn test_docx_without_document_xml_is_an_error() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("unrelated.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }
        let err = extract_text("resume.docx", &buf.into_inner()).unwrap_err();
        assert!(matches!(err, IngestError::Docx(_)));
    }
}
