/*!
 * Printable HTML page built from a [`ScreenLayout`].
 *
 * The page carries the document direction on the root element, so the
 * browser's bidirectional layout places every block; marks are wrapped in a
 * left-to-right isolate.
 */

use std::fmt::Write;

use crate::render::escape_markup;
use crate::render::screen::{
    HeaderBlock, HeaderField, QuestionRow, ScreenLayout, SectionBlock, Span,
};
use crate::text::math::ScriptPosition;

const PAGE_STYLE: &str = "\
body { margin: 0; background: #e5e7eb; }
.page { box-sizing: border-box; background: #fff; margin: 0 auto; }
.header { margin-bottom: 1.5em; }
.header.boxed { border: 2pt solid #000; padding: 1em; }
.header.modern h1 { border-bottom: 1pt solid #000; padding-bottom: 0.3em; }
.fields { display: flex; flex-wrap: wrap; justify-content: space-between; gap: 0.5em 2em; }
.field .value { font-weight: bold; }
.field .blank { display: inline-block; min-width: 8em; border-bottom: 1pt solid #000; }
.badge { margin: 1.2em 0 0.6em; }
.badge span { display: inline-block; font-weight: bold; text-transform: uppercase; padding: 0.2em 1em; }
.instructions { font-style: italic; margin: 0 0 0.8em; }
.question { display: flex; gap: 0.6em; margin: 0.8em 0; break-inside: avoid; }
.question .label { font-weight: bold; white-space: nowrap; }
.question .body { flex: 1; }
.question .marks { font-weight: bold; white-space: nowrap; }
.subs { list-style: none; margin: 0.4em 0 0; padding-inline-start: 1.5em; }
.subs li { break-inside: avoid; }
.mi { font-style: italic; }
.op { padding: 0 0.2em; }
sup, sub { font-size: 75%; }
.end { margin-top: 2em; font-weight: bold; break-inside: avoid; }
@media print { body { background: #fff; } .page { margin: 0; } }
";

/// Render the layout tree as a standalone HTML document
pub fn to_html(layout: &ScreenLayout) -> String {
    let mut out = String::new();
    let page = &layout.page;
    let [top, right, bottom, left] = page.padding_mm;

    out.push_str("<!DOCTYPE html>\n");
    let _ = writeln!(
        out,
        "<html lang=\"{}\" dir=\"{}\">",
        layout.language.tag().to_lowercase(),
        layout.direction.as_str()
    );
    out.push_str("<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_markup(&layout.header.title));
    out.push_str("<style>\n");
    out.push_str(PAGE_STYLE);
    out.push_str("</style>\n</head>\n<body>\n");

    let _ = writeln!(
        out,
        "<div class=\"page\" style=\"width: {}mm; min-height: {}mm; padding: {}mm {}mm {}mm {}mm; \
         font-family: {}; font-size: {}pt; line-height: {}; text-align: {};\">",
        page.width_mm,
        page.min_height_mm,
        top,
        right,
        bottom,
        left,
        escape_markup(layout.font_family),
        layout.base_font_pt,
        layout.line_height,
        layout.text_align.as_str()
    );

    write_header(&mut out, &layout.header);
    for section in &layout.sections {
        write_section(&mut out, section);
    }

    let _ = writeln!(
        out,
        "<p class=\"end\" style=\"text-align: {};\">{}</p>",
        layout.end_marker.align.as_str(),
        escape_markup(layout.end_marker.text)
    );
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn write_header(out: &mut String, header: &HeaderBlock) {
    let _ = writeln!(
        out,
        "<header class=\"header {}\">",
        header.template.as_str().to_lowercase()
    );
    let _ = writeln!(
        out,
        "<h1 style=\"text-align: {}; font-size: {}pt;\">{}</h1>",
        header.title_align.as_str(),
        header.title_size_pt,
        escape_markup(&header.title)
    );
    out.push_str("<div class=\"fields\">\n");
    for field in &header.fields {
        write_field(out, field);
    }
    out.push_str("</div>\n</header>\n");
}

fn write_field(out: &mut String, field: &HeaderField) {
    let value = if field.value.is_empty() {
        "<span class=\"blank\"></span>".to_string()
    } else if field.bracketed {
        format!(
            "<bdi dir=\"ltr\" class=\"value\">[{}]</bdi>",
            escape_markup(&field.value)
        )
    } else {
        format!("<span class=\"value\">{}</span>", escape_markup(&field.value))
    };
    let _ = writeln!(
        out,
        "<div class=\"field\">{}: {}</div>",
        escape_markup(field.label),
        value
    );
}

fn write_section(out: &mut String, section: &SectionBlock) {
    out.push_str("<section>\n");
    let _ = writeln!(
        out,
        "<div class=\"badge\" style=\"text-align: {};\"><span style=\"border: {}pt solid #000;\">{}</span></div>",
        section.badge.align.as_str(),
        section.badge.border_pt,
        escape_markup(&section.title)
    );

    if let Some(instructions) = &section.instructions {
        let _ = writeln!(
            out,
            "<p class=\"instructions\" style=\"text-align: {};\">{} {}</p>",
            instructions.align.as_str(),
            escape_markup(instructions.label),
            spans_html(&instructions.spans)
        );
    }

    for question in &section.questions {
        write_question(out, question);
    }
    out.push_str("</section>\n");
}

fn write_question(out: &mut String, question: &QuestionRow) {
    let _ = writeln!(
        out,
        "<div class=\"question\" data-id=\"{}\">",
        escape_markup(&question.id)
    );
    let _ = writeln!(
        out,
        "<span class=\"label\">{}. {}:</span>",
        escape_markup(question.label),
        escape_markup(&question.number)
    );
    let _ = write!(
        out,
        "<div class=\"body\" style=\"text-align: {};\">{}",
        question.body_align.as_str(),
        spans_html(&question.body)
    );

    if !question.sub_questions.is_empty() {
        out.push_str("\n<ol class=\"subs\">\n");
        for sub in &question.sub_questions {
            let _ = writeln!(
                out,
                "<li><b>{}</b> {}</li>",
                escape_markup(&sub.marker),
                spans_html(&sub.spans)
            );
        }
        out.push_str("</ol>\n");
    }
    out.push_str("</div>\n");

    if let Some(marks) = &question.marks {
        let _ = writeln!(
            out,
            "<bdi dir=\"{}\" class=\"marks\">{}</bdi>",
            marks.direction.as_str(),
            escape_markup(&marks.display())
        );
    }
    out.push_str("</div>\n");
}

fn spans_html(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        let mut inner = escape_markup(&span.text);
        if span.style.italic {
            inner = format!("<span class=\"mi\">{}</span>", inner);
        } else if span.style.operator {
            inner = format!("<span class=\"op\">{}</span>", inner);
        }
        match span.style.position {
            ScriptPosition::Baseline => out.push_str(&inner),
            ScriptPosition::Superscript => {
                let _ = write!(out, "<sup>{}</sup>", inner);
            }
            ScriptPosition::Subscript => {
                let _ = write!(out, "<sub>{}</sub>", inner);
            }
        }
    }
    out
}
