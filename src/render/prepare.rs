/*!
 * Normalized view of a document, shared by both renderers.
 *
 * Numbering, marks and sub-question text are normalized here once, so the
 * screen layout and the document file cannot disagree on them.
 */

use crate::document::{ExamDocument, Question, Section};
use crate::script_profile::ScriptProfile;
use crate::text::normalizer::{
    clean_question_text, normalize_marks, strip_option_label, strip_question_prefix, trailing_marks,
};

/// A question ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView<'d> {
    pub id: &'d str,
    /// Number without label or separators
    pub number: String,
    /// Body with labels and trailing mark annotations removed (markup kept)
    pub body: String,
    /// Marks from the marks field, or from a trailing annotation in the body
    pub marks: Option<String>,
    /// Sub-questions with option labels removed, empty ones dropped
    pub sub_questions: Vec<String>,
}

/// A section ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView<'d> {
    pub title: &'d str,
    pub instructions: Option<&'d str>,
    pub questions: Vec<QuestionView<'d>>,
}

/// A whole document ready for rendering
#[derive(Debug, Clone)]
pub struct PaperView<'d> {
    pub document: &'d ExamDocument,
    pub profile: ScriptProfile,
    pub sections: Vec<SectionView<'d>>,
}

impl<'d> QuestionView<'d> {
    pub fn from_question(question: &'d Question) -> Self {
        let marks = question
            .marks
            .as_deref()
            .map(normalize_marks)
            .filter(|m| !m.is_empty())
            .or_else(|| trailing_marks(&question.text));

        let sub_questions = question
            .sub_questions
            .iter()
            .map(|sub| strip_option_label(sub))
            .filter(|sub| !sub.is_empty())
            .collect();

        Self {
            id: &question.id,
            number: strip_question_prefix(&question.number),
            body: clean_question_text(&question.text),
            marks,
            sub_questions,
        }
    }
}

impl<'d> SectionView<'d> {
    pub fn from_section(section: &'d Section) -> Self {
        Self {
            title: section.title.trim(),
            instructions: section
                .instructions
                .as_deref()
                .map(str::trim)
                .filter(|i| !i.is_empty()),
            questions: section.questions.iter().map(QuestionView::from_question).collect(),
        }
    }
}

/// Build the normalized view of a document
pub fn prepare(document: &ExamDocument) -> PaperView<'_> {
    PaperView {
        document,
        profile: document.profile(),
        sections: document.sections.iter().map(SectionView::from_section).collect(),
    }
}

impl PaperView<'_> {
    /// `(number, marks)` of every question in render order
    pub fn outline(&self) -> Vec<(String, Option<String>)> {
        self.sections
            .iter()
            .flat_map(|s| s.questions.iter())
            .map(|q| (q.number.clone(), q.marks.clone()))
            .collect()
    }
}
