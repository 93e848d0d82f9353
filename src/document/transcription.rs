/*!
 * Intake of transcription results.
 *
 * The transcription service returns `{title, subject, totalMarks, timeAllowed,
 * sections: [...]}` without a language; the caller knows which language it
 * asked for. Saved documents carry their own `language` and keep it.
 */

use log::{debug, info};
use serde_json::Value;

use crate::document::model::{ExamDocument, HeaderTemplate};
use crate::errors::DocumentError;
use crate::language_utils::Language;

/// Parse a transcription result or saved document.
///
/// `fallback_language` is used only when the JSON has no `language` field.
pub fn parse_document(json: &str, fallback_language: Language) -> Result<ExamDocument, DocumentError> {
    parse_document_with(json, fallback_language, HeaderTemplate::default())
}

/// Like [`parse_document`], with a fallback for a missing `headerTemplate` too
pub fn parse_document_with(
    json: &str,
    fallback_language: Language,
    fallback_template: HeaderTemplate,
) -> Result<ExamDocument, DocumentError> {
    let value: Value = serde_json::from_str(json)?;
    let is_set = |key: &str| value.get(key).is_some_and(|v| !v.is_null());
    let has_language = is_set("language");
    let has_template = is_set("headerTemplate");

    let mut document: ExamDocument = serde_json::from_value(value)?;
    if !has_language {
        debug!("Document has no language tag, using {}", fallback_language);
        document.language = fallback_language;
    }
    if !has_template {
        document.header_template = fallback_template;
    }

    info!(
        "Loaded '{}' with {} section(s) and {} question(s)",
        document.title,
        document.sections.len(),
        document.question_count()
    );

    Ok(document)
}

/// Build a document from a transcription with a known language, overriding
/// any language tag the payload carries
pub fn from_transcription(json: &str, language: Language) -> Result<ExamDocument, DocumentError> {
    let mut document = parse_document(json, language)?;
    document.language = language;
    Ok(document)
}
