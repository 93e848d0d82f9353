/*!
 * Tests for the document model, transcription intake and editing
 */

use anyhow::Result;
use exam_composer::document::{
    from_transcription, parse_document, parse_document_with, ExamDocument, HeaderTemplate,
};
use exam_composer::language_utils::Language;
use crate::common;

/// Test parsing of a transcription result with untyped fields
#[test]
fn test_parse_document_withTranscription_shouldCoerceFields() -> Result<()> {
    let document = parse_document(common::TRANSCRIPTION_JSON, Language::English)?;

    assert_eq!(document.title, "Final Term Examination");
    assert_eq!(document.total_marks, "50");
    assert_eq!(document.sections.len(), 2);
    assert_eq!(document.question_count(), 3);

    let section_b = &document.sections[1];
    assert_eq!(section_b.instructions, None);
    assert_eq!(section_b.questions[0].number, "3");
    assert_eq!(section_b.questions[0].marks.as_deref(), Some("15"));

    let with_subs = &document.sections[0].questions[1];
    assert_eq!(with_subs.sub_questions, vec!["(a) 1", "(b) 2", "c. 3"]);
    Ok(())
}

/// Test that every question gets a distinct id
#[test]
fn test_parse_document_withoutIds_shouldAssignUniqueIds() -> Result<()> {
    let document = parse_document(common::TRANSCRIPTION_JSON, Language::English)?;
    let mut ids: Vec<&str> = document
        .sections
        .iter()
        .flat_map(|s| s.questions.iter())
        .map(|q| q.id.as_str())
        .collect();
    assert!(ids.iter().all(|id| !id.is_empty()));
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    Ok(())
}

/// Test that the fallback language applies only without a tag
#[test]
fn test_parse_document_withLanguageTag_shouldKeepIt() -> Result<()> {
    let tagged = r#"{"title": "T", "language": "UR", "sections": []}"#;
    assert_eq!(parse_document(tagged, Language::Arabic)?.language, Language::Urdu);

    let untagged = r#"{"title": "T", "sections": []}"#;
    assert_eq!(parse_document(untagged, Language::Arabic)?.language, Language::Arabic);
    Ok(())
}

/// Test that a transcription takes the requested language
#[test]
fn test_from_transcription_withLanguage_shouldOverrideTag() -> Result<()> {
    let tagged = r#"{"title": "T", "language": "EN", "sections": []}"#;
    assert_eq!(from_transcription(tagged, Language::Urdu)?.language, Language::Urdu);
    Ok(())
}

/// Test header template fallbacks
#[test]
fn test_parse_document_withUnknownTemplate_shouldUseClassic() -> Result<()> {
    let unknown = r#"{"title": "T", "headerTemplate": "FANCY", "sections": []}"#;
    assert_eq!(parse_document(unknown, Language::English)?.header_template, HeaderTemplate::Classic);

    let lowercase = r#"{"title": "T", "headerTemplate": "boxed", "sections": []}"#;
    assert_eq!(parse_document(lowercase, Language::English)?.header_template, HeaderTemplate::Boxed);

    let missing = r#"{"title": "T", "sections": []}"#;
    let document = parse_document_with(missing, Language::English, HeaderTemplate::Academic)?;
    assert_eq!(document.header_template, HeaderTemplate::Academic);
    Ok(())
}

/// Test that input that is not a document fails to parse
#[test]
fn test_parse_document_withoutSections_shouldFail() {
    assert!(parse_document(r#"{"title": "T"}"#, Language::English).is_err());
    assert!(parse_document("not json", Language::English).is_err());
}

/// Test adding a question to a section
#[test]
fn test_add_question_shouldNumberAfterLastQuestion() {
    let mut document = common::circle_document();
    let question = document.add_question(0).cloned().unwrap();

    assert_eq!(question.number, "2");
    assert_eq!(question.marks.as_deref(), Some("5"));
    assert_eq!(question.text, "Enter question text...");
    assert_eq!(document.question_count(), 2);
}

/// Test that placeholders follow the document language
#[test]
fn test_add_question_withUrdu_shouldUseLocalizedPlaceholder() {
    let mut document = ExamDocument::new("T", Language::Urdu);
    let index = document.add_section("حصہ اول");
    let question = document.add_question(index).cloned().unwrap();
    assert_eq!(question.number, "1");
    assert_eq!(question.text, "نیا سوال درج کریں...");
}

/// Test adding to a missing section
#[test]
fn test_add_question_withMissingSection_shouldReturnNone() {
    let mut document = ExamDocument::new("T", Language::English);
    assert!(document.add_question(3).is_none());
}

/// Test serialization field names
#[test]
fn test_serialize_shouldUseCamelCaseAndTags() -> Result<()> {
    let mut document = common::circle_document();
    document.set_header_template(HeaderTemplate::Modern);
    let json = serde_json::to_value(&document)?;

    assert_eq!(json["headerTemplate"], "MODERN");
    assert_eq!(json["language"], "EN");
    assert!(json.get("totalMarks").is_some());
    assert!(json["sections"][0]["questions"][0].get("subQuestions").is_some());
    Ok(())
}
