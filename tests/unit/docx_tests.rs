/*!
 * Tests for the document file renderer
 */

use anyhow::Result;
use exam_composer::app_config::DocxConfig;
use exam_composer::document::{ExamDocument, Section};
use exam_composer::language_utils::Language;
use exam_composer::render::docx::{export_docx, export_file_name, render_docx};
use crate::common;

/// Test the header content
#[test]
fn test_render_docx_shouldRenderTitleAndInfoTable() -> Result<()> {
    let mut document = common::circle_document();
    document.total_marks = "50".to_string();
    document.time_allowed = "2 Hours".to_string();
    let xml = common::docx_document_xml(&document, &DocxConfig::default())?;

    assert!(xml.contains(">MID TERM</w:t>"));
    assert!(xml.contains("<w:sz w:val=\"40\""));
    for label in ["Subject: ", "Total Marks: ", "Time Allowed: ", "Roll No: "] {
        assert!(xml.contains(label), "missing {}", label);
    }
    assert!(xml.contains(">Mathematics</w:t>"));
    assert!(xml.contains("__________"));
    assert!(xml.contains("<w:u w:val=\"single\""));
    Ok(())
}

/// Test the question paragraph
#[test]
fn test_render_docx_shouldRenderQuestionWithTabsAndMarks() -> Result<()> {
    let xml = common::docx_document_xml(&common::circle_document(), &DocxConfig::default())?;

    assert!(xml.contains(">Q.1</w:t>"));
    assert!(xml.contains("w:pos=\"720\""));
    assert!(xml.contains("w:pos=\"9000\""));
    assert!(xml.contains(">(10)</w:t>"));
    assert!(xml.contains("w:val=\"superscript\""));
    assert!(common::is_italic_run(&xml, "x"));
    assert!(!common::is_italic_run(&xml, "Define "));
    assert!(xml.contains(">SECTION A</w:t>"));
    assert!(xml.contains("*** END OF PAPER ***"));
    Ok(())
}

/// Test the section title and instruction sizes
#[test]
fn test_render_docx_withInstructions_shouldUseSectionSizes() -> Result<()> {
    let xml = common::docx_document_xml(&common::urdu_document(), &DocxConfig::default())?;

    assert!(xml.contains("<w:sz w:val=\"26\""));
    assert!(xml.contains("<w:sz w:val=\"20\""));
    assert!(common::is_italic_run(&xml, "(Instructions: "));
    Ok(())
}

/// Test sub-question paragraphs
#[test]
fn test_render_docx_withSubQuestions_shouldIndentWithLetters() -> Result<()> {
    let xml = common::docx_document_xml(&common::urdu_document(), &DocxConfig::default())?;

    assert!(xml.contains("w:left=\"1080\""));
    assert!(xml.contains(">(a)  </w:t>"));
    assert!(xml.contains(">(b)  </w:t>"));
    Ok(())
}

/// Test escaping of text content
#[test]
fn test_render_docx_withMarkupCharacters_shouldEscape() -> Result<()> {
    let mut document = ExamDocument::new("A & B <Test>", Language::English);
    document.sections.push(Section::new("S"));
    let xml = common::docx_document_xml(&document, &DocxConfig::default())?;

    assert!(xml.contains("&amp;"));
    assert!(xml.contains("&lt;"));
    assert!(!xml.contains("<TEST>"));
    Ok(())
}

/// Test that configured margins reach the page settings
#[test]
fn test_render_docx_withCustomMargin_shouldSetPageMargins() -> Result<()> {
    let config = DocxConfig {
        page_margin_twips: 1440,
        ..DocxConfig::default()
    };
    let xml = common::docx_document_xml(&common::circle_document(), &config)?;

    assert!(xml.contains("w:top=\"1440\""));
    assert!(xml.contains("w:w=\"11906\""));
    assert!(xml.contains("w:h=\"16838\""));
    Ok(())
}

/// Test that the package is a readable ZIP with the document part
#[test]
fn test_render_docx_shouldProduceZipWithDocument() -> Result<()> {
    let bytes = render_docx(&common::circle_document(), &DocxConfig::default())?;
    assert_eq!(&bytes[..2], b"PK");

    let xml = common::read_docx_part(&bytes, "word/document.xml")?;
    assert!(xml.contains("Q.1"));
    Ok(())
}

/// Test file names derived from the subject
#[test]
fn test_export_file_name_shouldSanitizeSubject() {
    assert_eq!(export_file_name("Computer Science", "Exam_Paper"), "Computer_Science_Professional.docx");
    assert_eq!(export_file_name("   ", "Exam_Paper"), "Exam_Paper_Professional.docx");
    assert_eq!(export_file_name("ریاضی", "Exam_Paper"), "ریاضی_Professional.docx");
}

/// Test the asynchronous export
#[tokio::test]
async fn test_export_docx_shouldReturnNamedFile() -> Result<()> {
    let export = export_docx(&common::circle_document(), &DocxConfig::default()).await?;
    assert_eq!(export.file_name, "Mathematics_Professional.docx");
    assert!(export.bytes.starts_with(b"PK"));
    Ok(())
}
