/*!
 * Common test utilities for the exam-composer test suite
 */

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use exam_composer::app_config::DocxConfig;
use exam_composer::document::{ExamDocument, Question, Section};
use exam_composer::language_utils::Language;
use exam_composer::render::render_docx;

static ITALIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:i\s*/>").unwrap());

/// Transcription result as returned by the transcription service
pub const TRANSCRIPTION_JSON: &str = r#"{
    "title": "Final Term Examination",
    "subject": "Applied Mathematics",
    "totalMarks": 50,
    "timeAllowed": "2 Hours",
    "sections": [
        {
            "title": "Section A",
            "instructions": "Attempt all questions.",
            "questions": [
                {"number": "Q.1", "text": "(1) Define x^2 + y^2 = r^2. (10)", "marks": ""},
                {"number": "Q.2", "text": "Choose the correct value of a_{ij}.", "marks": "[5]",
                 "subQuestions": ["(a) 1", "(b) 2", "c. 3"]}
            ]
        },
        {
            "title": "Section B",
            "questions": [
                {"number": 3, "text": "Explain gravity.", "marks": 15}
            ]
        }
    ]
}"#;

/// Routes library log output through the test harness
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Reads one part out of a packed `.docx` file
pub fn read_docx_part(bytes: &[u8], name: &str) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(name)?.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Packs a document and returns its `word/document.xml`
pub fn docx_document_xml(document: &ExamDocument, config: &DocxConfig) -> Result<String> {
    let bytes = render_docx(document, config)?;
    read_docx_part(&bytes, "word/document.xml")
}

/// Whether the run holding `text` is italic
pub fn is_italic_run(xml: &str, text: &str) -> bool {
    let needle = format!(">{}</w:t>", text);
    xml.split("</w:r>")
        .filter(|run| run.contains(&needle))
        .any(|run| ITALIC_REGEX.is_match(run))
}

/// The single-question document used by the end-to-end checks
pub fn circle_document() -> ExamDocument {
    let mut document = ExamDocument::new("Mid Term", Language::English);
    document.subject = "Mathematics".to_string();
    document.sections.push(
        Section::new("Section A").with_question(
            Question::new("Q.1", "(1) Define x^2 + y^2 = r^2. (10)").with_marks(""),
        ),
    );
    document
}

/// A right-to-left document with sub-questions
pub fn urdu_document() -> ExamDocument {
    let mut document = ExamDocument::new("سالانہ امتحان", Language::Urdu);
    document.subject = "ریاضی".to_string();
    document.total_marks = "100".to_string();
    document.sections.push(
        Section::new("حصہ اول")
            .with_instructions("تمام سوالات حل کریں۔")
            .with_question(
                Question::new("سوال 1", "x^2 کی قیمت معلوم کریں")
                    .with_marks("10")
                    .with_sub_questions(["(a) پہلا", "(b) دوسرا"]),
            ),
    );
    document
}
