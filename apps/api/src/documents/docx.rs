//! Word (.docx) text extraction.
//!
//! Document → Paragraph → Run → Text is the path through the docx-rs tree.
//! Only body paragraphs are read; tables and images are skipped.

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};

use crate::documents::{ExtractError, RubricFormat};

/// Joins paragraph text with newlines. Empty paragraphs are kept as blank lines.
pub fn extract_text(docx_bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(docx_bytes).map_err(|e| ExtractError::Unreadable {
        format: RubricFormat::Docx,
        reason: format!("{e:?}"),
    })?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

/// Runs in a paragraph are concatenated with no separator.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                if let RunChild::Text(t) = rc {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run};

    fn build_docx(paragraphs: &[&[&str]]) -> Vec<u8> {
        let mut doc = Docx::new();
        for runs in paragraphs {
            let mut para = Paragraph::new();
            for text in *runs {
                para = para.add_run(Run::new().add_text(*text));
            }
            doc = doc.add_paragraph(para);
        }
        let mut buf = std::io::Cursor::new(Vec::new());
        doc.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_extracts_paragraphs_in_order() {
        let bytes = build_docx(&[&["Clarity (10)"], &["Grammar", "(5)"]]);
        assert_eq!(extract_text(&bytes).unwrap(), "Clarity (10)\nGrammar(5)");
    }

    #[test]
    fn test_keeps_blank_paragraphs() {
        let bytes = build_docx(&[&["Clarity"], &[], &["Grammar"]]);
        assert_eq!(extract_text(&bytes).unwrap(), "Clarity\n\nGrammar");
    }

    #[test]
    fn test_garbage_is_unreadable() {
        let err = extract_text(b"PK not really a zip").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::Unreadable {
                format: RubricFormat::Docx,
                ..
            }
        ));
    }
}
