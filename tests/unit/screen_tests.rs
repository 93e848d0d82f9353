/*!
 * Tests for the screen/print layout
 */

use exam_composer::document::{ExamDocument, HeaderTemplate, Question, Section};
use exam_composer::language_utils::Language;
use exam_composer::render::screen::{render_screen, TextAlign};
use exam_composer::script_profile::Direction;
use crate::common;

/// Test the header of the default template
#[test]
fn test_render_screen_withClassicTemplate_shouldShowFourFields() {
    let mut document = common::circle_document();
    document.total_marks = "50".to_string();
    let layout = render_screen(&document);

    let header = &layout.header;
    assert_eq!(header.template, HeaderTemplate::Classic);
    assert_eq!(header.title_align, TextAlign::Center);
    assert_eq!(header.title_size_pt, 28.0);
    let labels: Vec<&str> = header.fields.iter().map(|f| f.label).collect();
    assert_eq!(labels, vec!["Subject", "Total Marks", "Time Allowed", "Roll No"]);
    assert!(header.fields[1].bracketed);
    assert_eq!(header.fields[3].value, "");
    assert!(header.keep_together);
}

/// Test the field sets of the other templates
#[test]
fn test_render_screen_withOtherTemplates_shouldSelectFieldSets() {
    let mut document = common::circle_document();

    document.set_header_template(HeaderTemplate::Modern);
    assert_eq!(render_screen(&document).header.fields.len(), 3);

    document.set_header_template(HeaderTemplate::Boxed);
    assert_eq!(render_screen(&document).header.fields.len(), 4);

    document.set_header_template(HeaderTemplate::Academic);
    let layout = render_screen(&document);
    assert_eq!(layout.header.fields.len(), 3);
    assert_eq!(layout.header.title_align, TextAlign::Left);
}

/// Test the right-to-left layout
#[test]
fn test_render_screen_withUrdu_shouldUseRtlProfile() {
    let layout = render_screen(&common::urdu_document());

    assert_eq!(layout.direction, Direction::Rtl);
    assert_eq!(layout.line_height, 2.1);
    assert_eq!(layout.header.title_align, TextAlign::Right);
    assert_eq!(layout.header.title_size_pt, 34.0);
    assert_eq!(layout.header.fields[0].label, "مضمون");

    let section = &layout.sections[0];
    assert_eq!(section.badge.align, TextAlign::Right);
    let instructions = section.instructions.as_ref().unwrap();
    assert_eq!(instructions.label, "ہدایات:");
    assert!(instructions.italic);

    let row = &section.questions[0];
    assert_eq!(row.label, "سوال");
    assert_eq!(row.number, "1");
    let markers: Vec<&str> = row.sub_questions.iter().map(|s| s.marker.as_str()).collect();
    assert_eq!(markers, vec!["1-", "2-"]);
    assert_eq!(row.sub_questions[0].spans[0].text, "پہلا");

    assert_eq!(layout.end_marker.text, "*** پیپر ختم ہوا ***");
}

/// Test that marks stay left-to-right inside a right-to-left page
#[test]
fn test_render_screen_withRtlMarks_shouldIsolateThem() {
    let layout = render_screen(&common::urdu_document());
    let marks = layout.sections[0].questions[0].marks.as_ref().unwrap();

    assert_eq!(marks.value, "10");
    assert_eq!(marks.direction, Direction::Ltr);
    assert!(marks.isolate);
    assert_eq!(marks.display(), "(10)");
}

/// Test lettered markers in the Latin profile
#[test]
fn test_render_screen_withSubQuestions_shouldUseLetteredMarkers() {
    let mut document = ExamDocument::new("T", Language::English);
    document.sections.push(Section::new("A").with_question(
        Question::new("1", "Choose one").with_sub_questions(["(a) Iron", "", "(c) Gold"]),
    ));
    let layout = render_screen(&document);
    let row = &layout.sections[0].questions[0];

    let markers: Vec<&str> = row.sub_questions.iter().map(|s| s.marker.as_str()).collect();
    assert_eq!(markers, vec!["a)", "b)"]);
    assert_eq!(row.sub_questions[1].spans[0].text, "Gold");
    assert!(row.marks.is_none());
}

/// Test that empty fields render nothing instead of failing
#[test]
fn test_render_screen_withEmptyFields_shouldRenderEmptySlots() {
    let mut document = ExamDocument::new("", Language::Arabic);
    document.sections.push(Section::new("").with_question(Question::new("", "")));
    let layout = render_screen(&document);

    assert_eq!(layout.header.title, "");
    let row = &layout.sections[0].questions[0];
    assert!(row.body.is_empty());
    assert_eq!(row.number, "");
    assert!(row.marks.is_none());
    assert!(layout.sections[0].instructions.is_none());
}

/// Test the page geometry and the layout's serialized shape
#[test]
fn test_render_screen_shouldSerializeStableStructure() {
    let layout = render_screen(&common::circle_document());
    assert_eq!(layout.page.width_mm, 210.0);
    assert_eq!(layout.page.padding_mm, [20.0, 25.0, 25.0, 25.0]);

    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["direction"], "ltr");
    assert_eq!(json["header"]["template"], "CLASSIC");
    let span = &json["sections"][0]["questions"][0]["body"][1];
    assert_eq!(span["text"], "x");
    assert_eq!(span["italic"], true);
    assert_eq!(span["position"], "baseline");
}
