/*!
 * Exam document model, intake and sharing.
 */

pub mod model;
pub mod share;
pub mod transcription;

pub use model::{ExamDocument, HeaderTemplate, Question, Section};
pub use transcription::{from_transcription, parse_document, parse_document_with};
