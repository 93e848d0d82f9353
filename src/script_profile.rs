/*!
 * Script profiles.
 *
 * A profile bundles everything that changes with the document language:
 * writing direction, font stack, line height, base size and the label set.
 * It is selected once per document and passed to the renderers, so layout
 * code never branches on the language itself.
 */

use serde::Serialize;

use crate::language_utils::Language;

/// Writing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// How sub-question items are marked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// `a)`, `b)`, ...
    Lettered,
    /// `1-`, `2-`, ...
    Numbered,
}

/// Localized labels used by the renderers
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct LabelSet {
    pub subject: &'static str,
    pub total_marks: &'static str,
    pub time_allowed: &'static str,
    pub roll_no: &'static str,
    pub question: &'static str,
    pub instructions: &'static str,
    pub end_of_paper: &'static str,
    pub question_placeholder: &'static str,
}

static LATIN_LABELS: LabelSet = LabelSet {
    subject: "Subject",
    total_marks: "Total Marks",
    time_allowed: "Time Allowed",
    roll_no: "Roll No",
    question: "Q",
    instructions: "Instructions:",
    end_of_paper: "*** END OF PAPER ***",
    question_placeholder: "Enter question text...",
};

static URDU_LABELS: LabelSet = LabelSet {
    subject: "مضمون",
    total_marks: "کل نمبر",
    time_allowed: "وقت",
    roll_no: "رول نمبر",
    question: "سوال",
    instructions: "ہدایات:",
    end_of_paper: "*** پیپر ختم ہوا ***",
    question_placeholder: "نیا سوال درج کریں...",
};

static ARABIC_LABELS: LabelSet = LabelSet {
    subject: "المادة",
    total_marks: "الدرجة الكلية",
    time_allowed: "الوقت",
    roll_no: "رقم الجلوس",
    question: "س",
    instructions: "تعليمات:",
    end_of_paper: "*** انتهت الأسئلة ***",
    question_placeholder: "أدخل نص السؤال...",
};

/// Direction, typography and labels for one document language
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScriptProfile {
    pub language: Language,
    pub direction: Direction,
    pub font_family: &'static str,
    pub line_height: f32,
    pub base_font_pt: f32,
    pub marker_style: MarkerStyle,
    #[serde(skip)]
    pub labels: &'static LabelSet,
}

impl ScriptProfile {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::English => Self {
                language,
                direction: Direction::Ltr,
                font_family: "'Inter', sans-serif",
                line_height: 1.6,
                base_font_pt: 11.5,
                marker_style: MarkerStyle::Lettered,
                labels: &LATIN_LABELS,
            },
            Language::Urdu => Self {
                language,
                direction: Direction::Rtl,
                font_family: "'Noto Nastaliq Urdu', serif",
                line_height: 2.1,
                base_font_pt: 14.0,
                marker_style: MarkerStyle::Numbered,
                labels: &URDU_LABELS,
            },
            Language::Arabic => Self {
                language,
                direction: Direction::Rtl,
                font_family: "'Noto Naskh Arabic', serif",
                line_height: 1.8,
                base_font_pt: 14.0,
                marker_style: MarkerStyle::Numbered,
                labels: &ARABIC_LABELS,
            },
        }
    }

    pub fn is_rtl(&self) -> bool {
        self.direction == Direction::Rtl
    }

    /// Marker for the sub-question at `index` (zero-based)
    pub fn sub_question_marker(&self, index: usize) -> String {
        match self.marker_style {
            MarkerStyle::Lettered => format!("{})", lettered_marker(index)),
            MarkerStyle::Numbered => format!("{}-", index + 1),
        }
    }
}

impl Default for ScriptProfile {
    fn default() -> Self {
        Self::for_language(Language::default())
    }
}

/// Spreadsheet-style letters: `a` .. `z`, then `aa`, `ab`, ...
pub fn lettered_marker(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'a' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
