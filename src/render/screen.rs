/*!
 * Screen/print layout.
 *
 * Produces a layout tree for an A4 page: a header block chosen by the header
 * template, one block per section, one row per question, and a closing
 * marker. Direction, fonts and labels come from the document's script
 * profile. Blocks that must not be split across pages carry `keep_together`
 * so a print surface can paginate without breaking them.
 */

use serde::Serialize;

use crate::document::{ExamDocument, HeaderTemplate};
use crate::language_utils::Language;
use crate::render::prepare::{prepare, PaperView, QuestionView, SectionView};
use crate::script_profile::{Direction, ScriptProfile};
use crate::text::math::{format_text, to_plain_text, RunStyle, StyledRun};

/// Horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Right,
    Center,
    Justify,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Right => "right",
            TextAlign::Center => "center",
            TextAlign::Justify => "justify",
        }
    }
}

/// A styled run of text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub text: String,
    #[serde(flatten)]
    pub style: RunStyle,
}

impl From<StyledRun<'_>> for Span {
    fn from(run: StyledRun<'_>) -> Self {
        Self {
            text: run.text.to_string(),
            style: run.style,
        }
    }
}

fn spans(text: &str) -> Vec<Span> {
    format_text(text).into_iter().map(Span::from).collect()
}

/// A4 page geometry in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub min_height_mm: f32,
    /// Top, right, bottom, left
    pub padding_mm: [f32; 4],
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            min_height_mm: 297.0,
            padding_mm: [20.0, 25.0, 25.0, 25.0],
        }
    }
}

/// One labelled value in the header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderField {
    pub label: &'static str,
    pub value: String,
    /// Value is shown in direction-neutral brackets
    pub bracketed: bool,
}

/// Title and metadata block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBlock {
    pub template: HeaderTemplate,
    pub title: String,
    pub title_align: TextAlign,
    pub title_size_pt: f32,
    pub fields: Vec<HeaderField>,
    pub keep_together: bool,
}

/// Bordered frame around a section title
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Badge {
    pub border_pt: f32,
    pub uppercase: bool,
    pub align: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstructionsBlock {
    pub label: &'static str,
    pub italic: bool,
    pub align: TextAlign,
    pub spans: Vec<Span>,
}

/// Marks shown in parentheses, isolated from the surrounding direction so
/// digits keep their order inside right-to-left text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarksBadge {
    pub value: String,
    pub direction: Direction,
    pub isolate: bool,
}

impl MarksBadge {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            direction: Direction::Ltr,
            isolate: true,
        }
    }

    pub fn display(&self) -> String {
        format!("({})", self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubQuestionItem {
    pub marker: String,
    pub spans: Vec<Span>,
    pub keep_together: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRow {
    pub id: String,
    /// Localized question label ("Q", "سوال", "س")
    pub label: &'static str,
    pub number: String,
    pub body: Vec<Span>,
    /// Body with script markup rendered as Unicode glyphs
    pub plain_text: String,
    pub body_align: TextAlign,
    pub marks: Option<MarksBadge>,
    pub sub_questions: Vec<SubQuestionItem>,
    pub keep_together: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub title: String,
    pub badge: Badge,
    pub instructions: Option<InstructionsBlock>,
    pub questions: Vec<QuestionRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndMarker {
    pub text: &'static str,
    pub align: TextAlign,
    pub keep_together: bool,
}

/// Complete layout tree for the on-screen/print surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenLayout {
    pub language: Language,
    pub direction: Direction,
    pub font_family: &'static str,
    pub line_height: f32,
    pub base_font_pt: f32,
    pub text_align: TextAlign,
    pub page: PageGeometry,
    pub header: HeaderBlock,
    pub sections: Vec<SectionBlock>,
    pub end_marker: EndMarker,
}

impl ScreenLayout {
    /// Question rows of all sections in render order
    pub fn question_rows(&self) -> impl Iterator<Item = &QuestionRow> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }
}

/// Lay out a document for the screen/print surface
pub fn render_screen(document: &ExamDocument) -> ScreenLayout {
    render_view(&prepare(document))
}

/// Lay out an already prepared view
pub fn render_view(view: &PaperView<'_>) -> ScreenLayout {
    let profile = view.profile;
    let leading = leading_align(&profile);

    ScreenLayout {
        language: profile.language,
        direction: profile.direction,
        font_family: profile.font_family,
        line_height: profile.line_height,
        base_font_pt: profile.base_font_pt,
        text_align: if profile.is_rtl() { TextAlign::Right } else { TextAlign::Left },
        page: PageGeometry::default(),
        header: header_block(view, &profile),
        sections: view
            .sections
            .iter()
            .map(|section| section_block(section, &profile))
            .collect(),
        end_marker: EndMarker {
            text: profile.labels.end_of_paper,
            align: leading,
            keep_together: true,
        },
    }
}

// Right-to-left blocks hug the start edge; left-to-right blocks are centered
fn leading_align(profile: &ScriptProfile) -> TextAlign {
    if profile.is_rtl() {
        TextAlign::Right
    } else {
        TextAlign::Center
    }
}

fn header_block(view: &PaperView<'_>, profile: &ScriptProfile) -> HeaderBlock {
    let document = view.document;
    let template = document.header_template;
    let labels = profile.labels;
    let rtl = profile.is_rtl();

    let field = |label: &'static str, value: &str, bracketed: bool| HeaderField {
        label,
        value: value.trim().to_string(),
        bracketed: bracketed && !value.trim().is_empty(),
    };

    let subject = field(labels.subject, &document.subject, false);
    let time = field(labels.time_allowed, &document.time_allowed, false);
    let roll_no = field(labels.roll_no, "", false);

    let (title_align, title_size_pt, fields) = match template {
        HeaderTemplate::Classic => (
            leading_align(profile),
            if rtl { 34.0 } else { 28.0 },
            vec![subject, field(labels.total_marks, &document.total_marks, true), time, roll_no],
        ),
        HeaderTemplate::Modern => (
            leading_align(profile),
            if rtl { 28.0 } else { 24.0 },
            vec![subject, field(labels.total_marks, &document.total_marks, false), time],
        ),
        HeaderTemplate::Boxed => (
            TextAlign::Center,
            if rtl { 26.0 } else { 22.0 },
            vec![subject, field(labels.total_marks, &document.total_marks, false), time, roll_no],
        ),
        HeaderTemplate::Academic => (
            if rtl { TextAlign::Right } else { TextAlign::Left },
            if rtl { 32.0 } else { 26.0 },
            vec![subject, field(labels.total_marks, &document.total_marks, false), time],
        ),
    };

    HeaderBlock {
        template,
        title: document.title.trim().to_string(),
        title_align,
        title_size_pt,
        fields,
        keep_together: true,
    }
}

fn section_block(section: &SectionView<'_>, profile: &ScriptProfile) -> SectionBlock {
    let align = leading_align(profile);

    SectionBlock {
        title: section.title.to_string(),
        badge: Badge {
            border_pt: 2.0,
            uppercase: true,
            align,
        },
        instructions: section.instructions.map(|text| InstructionsBlock {
            label: profile.labels.instructions,
            italic: true,
            align,
            spans: spans(text),
        }),
        questions: section
            .questions
            .iter()
            .map(|question| question_row(question, profile))
            .collect(),
    }
}

fn question_row(question: &QuestionView<'_>, profile: &ScriptProfile) -> QuestionRow {
    QuestionRow {
        id: question.id.to_string(),
        label: profile.labels.question,
        number: question.number.clone(),
        body: spans(&question.body),
        plain_text: to_plain_text(&question.body),
        body_align: if profile.is_rtl() { TextAlign::Right } else { TextAlign::Justify },
        marks: question.marks.as_deref().map(MarksBadge::new),
        sub_questions: question
            .sub_questions
            .iter()
            .enumerate()
            .map(|(index, sub)| SubQuestionItem {
                marker: profile.sub_question_marker(index),
                spans: spans(sub),
                keep_together: true,
            })
            .collect(),
        keep_together: true,
    }
}
