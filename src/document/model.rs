/*!
 * Exam document model.
 *
 * One `ExamDocument` is created per transcription (or decoded from a share
 * payload), edited in place, and read by the renderers. Order of sections,
 * questions and sub-questions is render order.
 */

use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::language_utils::Language;
use crate::script_profile::ScriptProfile;

/// Layout variant for the title/metadata block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeaderTemplate {
    #[default]
    Classic,
    Modern,
    Boxed,
    Academic,
}

impl HeaderTemplate {
    pub const ALL: [HeaderTemplate; 4] = [
        HeaderTemplate::Classic,
        HeaderTemplate::Modern,
        HeaderTemplate::Boxed,
        HeaderTemplate::Academic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HeaderTemplate::Classic => "CLASSIC",
            HeaderTemplate::Modern => "MODERN",
            HeaderTemplate::Boxed => "BOXED",
            HeaderTemplate::Academic => "ACADEMIC",
        }
    }

    /// Parse a template name, falling back to `Classic` for anything unknown
    pub fn from_name_or_default(name: &str) -> Self {
        match name.trim().to_uppercase().as_str() {
            "CLASSIC" => HeaderTemplate::Classic,
            "MODERN" => HeaderTemplate::Modern,
            "BOXED" => HeaderTemplate::Boxed,
            "ACADEMIC" => HeaderTemplate::Academic,
            "" => HeaderTemplate::default(),
            other => {
                warn!("Unknown header template '{}', using CLASSIC", other);
                HeaderTemplate::default()
            }
        }
    }
}

impl std::fmt::Display for HeaderTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for HeaderTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HeaderTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name.as_deref().map(HeaderTemplate::from_name_or_default).unwrap_or_default())
    }
}

/// A complete exam paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamDocument {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub subject: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub total_marks: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub time_allowed: String,

    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub header_template: HeaderTemplate,

    pub sections: Vec<Section>,
}

/// A titled group of questions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_optional_string", skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A single question with raw (un-normalized) fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default = "new_question_id", deserialize_with = "question_id")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub number: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,

    #[serde(default, deserialize_with = "lenient_optional_string", skip_serializing_if = "Option::is_none")]
    pub marks: Option<String>,

    #[serde(default, deserialize_with = "lenient_string_list")]
    pub sub_questions: Vec<String>,
}

impl Question {
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: new_question_id(),
            number: number.into(),
            text: text.into(),
            marks: None,
            sub_questions: Vec::new(),
        }
    }

    pub fn with_marks(mut self, marks: impl Into<String>) -> Self {
        self.marks = Some(marks.into());
        self
    }

    pub fn with_sub_questions<I, S>(mut self, sub_questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_questions = sub_questions.into_iter().map(Into::into).collect();
        self
    }
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }
}

impl ExamDocument {
    pub fn new(title: impl Into<String>, language: Language) -> Self {
        Self {
            title: title.into(),
            subject: String::new(),
            total_marks: String::new(),
            time_allowed: String::new(),
            language,
            header_template: HeaderTemplate::default(),
            sections: Vec::new(),
        }
    }

    /// Script profile selected by the document language
    pub fn profile(&self) -> ScriptProfile {
        ScriptProfile::for_language(self.language)
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    pub fn set_header_template(&mut self, template: HeaderTemplate) {
        self.header_template = template;
    }

    /// Append an empty section and return its index
    pub fn add_section(&mut self, title: impl Into<String>) -> usize {
        self.sections.push(Section::new(title));
        self.sections.len() - 1
    }

    /// Append a placeholder question to a section, numbered after the last one.
    /// Returns `None` when the section does not exist.
    pub fn add_question(&mut self, section_index: usize) -> Option<&Question> {
        let placeholder = self.profile().labels.question_placeholder;
        let section = self.sections.get_mut(section_index)?;

        let question = Question::new((section.questions.len() + 1).to_string(), placeholder)
            .with_marks("5");
        debug!("Adding question {} to section '{}'", question.number, section.title);

        section.questions.push(question);
        section.questions.last()
    }
}

pub(crate) fn new_question_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// Transcribed JSON is untrusted: numbers show up where strings are expected
// and nulls where fields are optional.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl From<LenientValue> for String {
    fn from(value: LenientValue) -> Self {
        match value {
            LenientValue::Text(text) => text,
            LenientValue::Integer(n) => n.to_string(),
            LenientValue::Float(n) => n.to_string(),
            LenientValue::Flag(b) => b.to_string(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LenientValue>::deserialize(deserializer)?;
    Ok(value.map(String::from).unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LenientValue>::deserialize(deserializer)?;
    Ok(value.map(String::from))
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Option<LenientValue>>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(|value| value.map(String::from).unwrap_or_default())
        .collect())
}

fn question_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let id = lenient_string(deserializer)?;
    Ok(if id.trim().is_empty() { new_question_id() } else { id })
}
