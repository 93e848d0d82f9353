/*!
 * Word-processor document output.
 *
 * The document is assembled from `docx-rs` paragraph, run and table
 * primitives and packed into a `.docx` container. This output is
 * left-to-right only: right-to-left documents keep their text but are laid
 * out with the Latin conventions and labels.
 */

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BorderType, Docx, LineSpacing, PageMargin, Paragraph, Run, RunFonts, Tab,
    TabValueType, Table, TableAlignmentType, TableCell, TableCellBorder, TableCellBorderPosition,
    TableLayoutType, TableRow, VertAlignType, WidthType,
};
use log::{debug, info};

use crate::app_config::DocxConfig;
use crate::document::ExamDocument;
use crate::errors::ExportError;
use crate::language_utils::Language;
use crate::render::prepare::{prepare, PaperView, QuestionView, SectionView};
use crate::script_profile::{lettered_marker, LabelSet, ScriptProfile};
use crate::text::math::{format_text, ScriptPosition, StyledRun};

// A4 in twips
const PAGE_WIDTH_TWIPS: u32 = 11906;
const PAGE_HEIGHT_TWIPS: u32 = 16838;

// Table widths are fiftieths of a percent
const FULL_WIDTH_PCT: usize = 5000;
const INFO_LEFT_PCT: usize = 3500;
const INFO_RIGHT_PCT: usize = 1500;
const SECTION_WIDTH_PCT: usize = 3000;

const QUESTION_NUMBER_TAB: usize = 720;
const QUESTION_MARKS_TAB: usize = 9000;
const SUB_QUESTION_INDENT: i32 = 1080;

// Run sizes in half-points
const SECTION_TITLE_SIZE: usize = 26;
const INSTRUCTIONS_SIZE: usize = 20;
const END_MARKER_SIZE: usize = 22;

// Border widths in eighths of a point
const HEAVY_BORDER: usize = 12;
const LIGHT_BORDER: usize = 6;

const THIN_SPACE: char = '\u{2009}';
const ROLL_NO_BLANK: &str = "__________";

/// A finished document file
#[derive(Debug, Clone)]
pub struct DocxExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

fn labels() -> &'static LabelSet {
    ScriptProfile::for_language(Language::English).labels
}

fn run_text(styled: &StyledRun<'_>) -> String {
    if styled.style.operator {
        format!("{0}{1}{0}", THIN_SPACE, styled.text)
    } else {
        styled.text.to_string()
    }
}

fn scaled_size(base_size: usize, scale: f32) -> usize {
    ((base_size as f32) * scale).round().max(1.0) as usize
}

/// Runs for a field with math markup, sized relative to `base_size`
fn math_runs(text: &str, base_size: usize) -> Vec<Run> {
    format_text(text)
        .iter()
        .map(|styled| {
            let style = styled.style;
            let mut run = Run::new()
                .add_text(run_text(styled))
                .size(scaled_size(base_size, style.scale));
            if style.italic {
                run = run.italic();
            }
            match style.position {
                ScriptPosition::Baseline => run,
                ScriptPosition::Superscript => {
                    run.run_property = run.run_property.vert_align(VertAlignType::SuperScript);
                    run
                },
                ScriptPosition::Subscript => {
                    run.run_property = run.run_property.vert_align(VertAlignType::SubScript);
                    run
                },
            }
        })
        .collect()
}

fn with_runs(paragraph: Paragraph, runs: impl IntoIterator<Item = Run>) -> Paragraph {
    runs.into_iter().fold(paragraph, Paragraph::add_run)
}

fn spacer(before: u32) -> Paragraph {
    Paragraph::new().line_spacing(LineSpacing::new().before(before))
}

fn border(position: TableCellBorderPosition, size: usize) -> TableCellBorder {
    TableCellBorder::new(position)
        .border_type(BorderType::Single)
        .size(size)
        .color("000000")
}

fn info_cell(width_pct: usize, label: &str, value: &str, align: AlignmentType) -> TableCell {
    let value = value.trim();
    let mut paragraph = Paragraph::new()
        .add_run(Run::new().add_text(format!("{}: ", label)).bold())
        .align(align);
    if !value.is_empty() {
        paragraph = paragraph.add_run(Run::new().add_text(value).underline("single"));
    }
    TableCell::new()
        .add_paragraph(paragraph)
        .width(width_pct, WidthType::Pct)
}

struct DocumentBuilder<'c> {
    config: &'c DocxConfig,
}

impl DocumentBuilder<'_> {
    fn text_width(&self) -> usize {
        PAGE_WIDTH_TWIPS.saturating_sub(self.config.page_margin_twips * 2) as usize
    }

    /// Centered single-cell table with borders on the given sides
    fn framed(
        &self,
        paragraph: Paragraph,
        width_pct: usize,
        sides: impl IntoIterator<Item = TableCellBorderPosition>,
        size: usize,
    ) -> Table {
        let cell = sides.into_iter().fold(
            TableCell::new()
                .add_paragraph(paragraph)
                .width(FULL_WIDTH_PCT, WidthType::Pct),
            |cell, side| cell.set_border(border(side, size)),
        );

        Table::new(vec![TableRow::new(vec![cell])])
            .width(width_pct, WidthType::Pct)
            .align(TableAlignmentType::Center)
            .set_grid(vec![self.text_width() * width_pct / FULL_WIDTH_PCT])
            .layout(TableLayoutType::Fixed)
            .clear_all_border()
    }

    fn header(&self, docx: Docx, view: &PaperView<'_>) -> Docx {
        let document = view.document;
        let labels = labels();

        let title = Paragraph::new()
            .add_run(
                Run::new()
                    .add_text(document.title.trim().to_uppercase())
                    .bold()
                    .size(self.config.title_size_half_points as usize),
            )
            .align(AlignmentType::Center);
        let divider = self.framed(
            Paragraph::new(),
            FULL_WIDTH_PCT,
            [TableCellBorderPosition::Bottom],
            HEAVY_BORDER,
        );

        let width = self.text_width();
        let left_width = width * INFO_LEFT_PCT / FULL_WIDTH_PCT;
        let info = Table::new(vec![
            TableRow::new(vec![
                info_cell(INFO_LEFT_PCT, labels.subject, &document.subject, AlignmentType::Left),
                info_cell(INFO_RIGHT_PCT, labels.total_marks, &document.total_marks, AlignmentType::Right),
            ]),
            TableRow::new(vec![
                info_cell(INFO_LEFT_PCT, labels.time_allowed, &document.time_allowed, AlignmentType::Left),
                info_cell(INFO_RIGHT_PCT, labels.roll_no, ROLL_NO_BLANK, AlignmentType::Right),
            ]),
        ])
        .width(FULL_WIDTH_PCT, WidthType::Pct)
        .set_grid(vec![left_width, width - left_width])
        .layout(TableLayoutType::Fixed)
        .clear_all_border();

        docx.add_paragraph(title)
            .add_table(divider)
            .add_paragraph(spacer(200))
            .add_table(info)
    }

    fn section(&self, docx: Docx, section: &SectionView<'_>) -> Docx {
        let title = Paragraph::new()
            .add_run(
                Run::new()
                    .add_text(section.title.to_uppercase())
                    .bold()
                    .size(SECTION_TITLE_SIZE),
            )
            .align(AlignmentType::Center);
        let badge = self.framed(
            title,
            SECTION_WIDTH_PCT,
            [
                TableCellBorderPosition::Top,
                TableCellBorderPosition::Left,
                TableCellBorderPosition::Bottom,
                TableCellBorderPosition::Right,
            ],
            HEAVY_BORDER,
        );
        let docx = docx.add_paragraph(spacer(200)).add_table(badge);

        let docx = match section.instructions {
            Some(instructions) => {
                let runs = std::iter::once(
                    Run::new()
                        .add_text(format!("({} ", labels().instructions))
                        .size(INSTRUCTIONS_SIZE),
                )
                .chain(math_runs(instructions, INSTRUCTIONS_SIZE))
                .chain(std::iter::once(Run::new().add_text(")").size(INSTRUCTIONS_SIZE)))
                .map(Run::italic);
                let paragraph = with_runs(Paragraph::new(), runs)
                    .align(AlignmentType::Center)
                    .line_spacing(LineSpacing::new().before(200).after(200));
                docx.add_paragraph(paragraph)
            }
            None => docx.add_paragraph(spacer(200)),
        };

        section
            .questions
            .iter()
            .fold(docx, |docx, question| self.question(docx, question))
            .add_paragraph(spacer(400))
    }

    fn question(&self, docx: Docx, question: &QuestionView<'_>) -> Docx {
        let base_size = self.config.base_size_half_points as usize;

        let number = Run::new()
            .add_text(format!("{}.{}", labels().question, question.number))
            .add_tab()
            .bold();
        let mut paragraph = Paragraph::new()
            .add_tab(Tab::new().val(TabValueType::Left).pos(QUESTION_NUMBER_TAB))
            .add_tab(Tab::new().val(TabValueType::Right).pos(QUESTION_MARKS_TAB))
            .line_spacing(LineSpacing::new().before(200).after(100))
            .keep_lines(true)
            .keep_next(!question.sub_questions.is_empty())
            .add_run(number);
        paragraph = with_runs(paragraph, math_runs(&question.body, base_size));
        if let Some(marks) = &question.marks {
            paragraph = paragraph.add_run(Run::new().add_tab().add_text(format!("({})", marks)).bold());
        }

        let count = question.sub_questions.len();
        question
            .sub_questions
            .iter()
            .enumerate()
            .fold(docx.add_paragraph(paragraph), |docx, (index, sub)| {
                let item = Paragraph::new()
                    .indent(Some(SUB_QUESTION_INDENT), None, None, None)
                    .line_spacing(LineSpacing::new().before(100))
                    .keep_lines(true)
                    .keep_next(index + 1 < count)
                    .add_run(Run::new().add_text(format!("({})  ", lettered_marker(index))).bold());
                docx.add_paragraph(with_runs(item, math_runs(sub, base_size)))
            })
    }

    fn end_marker(&self, docx: Docx) -> Docx {
        let marker = Paragraph::new()
            .add_run(
                Run::new()
                    .add_text(format!("   {}   ", labels().end_of_paper))
                    .bold()
                    .size(END_MARKER_SIZE),
            )
            .align(AlignmentType::Center)
            .keep_lines(true);

        docx.add_paragraph(spacer(600)).add_table(self.framed(
            marker,
            FULL_WIDTH_PCT,
            [TableCellBorderPosition::Top, TableCellBorderPosition::Bottom],
            LIGHT_BORDER,
        ))
    }
}

/// Build the document for `document`, ready to be packed
pub fn build_docx(document: &ExamDocument, config: &DocxConfig) -> Docx {
    let view = prepare(document);
    let builder = DocumentBuilder { config };

    let margin = config.page_margin_twips as i32;
    let font = config.font_family.as_str();
    let docx = Docx::new()
        .page_size(PAGE_WIDTH_TWIPS, PAGE_HEIGHT_TWIPS)
        .page_margin(
            PageMargin::new()
                .top(margin)
                .right(margin)
                .bottom(margin)
                .left(margin),
        )
        .default_fonts(RunFonts::new().ascii(font).hi_ansi(font).east_asia(font).cs(font))
        .default_size(config.base_size_half_points as usize);

    let docx = builder.header(docx, &view);
    let docx = view
        .sections
        .iter()
        .fold(docx, |docx, section| builder.section(docx, section));
    builder.end_marker(docx)
}

/// Render a document into the bytes of a `.docx` file
pub fn render_docx(document: &ExamDocument, config: &DocxConfig) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Cursor::new(Vec::new());
    build_docx(document, config)
        .build()
        .pack(&mut buffer)
        .map_err(|e| ExportError::Package(e.to_string()))?;

    let bytes = buffer.into_inner();
    debug!("Packed document ({} bytes)", bytes.len());
    Ok(bytes)
}

/// File name for an exported document: the subject with whitespace runs
/// collapsed to `_` and path-unsafe characters removed, or `fallback` when
/// nothing is left
pub fn export_file_name(subject: &str, fallback: &str) -> String {
    let collapsed = subject.split_whitespace().collect::<Vec<_>>().join("_");
    let sanitized: String = collapsed
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();

    let stem = if sanitized.trim_matches(|c| c == '_' || c == '.').is_empty() {
        fallback
    } else {
        sanitized.as_str()
    };
    format!("{}_Professional.docx", stem)
}

/// Assemble the document file off the async runtime.
///
/// Completes once with the whole file or fails with nothing written.
pub async fn export_docx(document: &ExamDocument, config: &DocxConfig) -> Result<DocxExport, ExportError> {
    let file_name = export_file_name(&document.subject, &config.fallback_file_stem);
    let document = document.clone();
    let config = config.clone();

    let bytes = tokio::task::spawn_blocking(move || render_docx(&document, &config))
        .await
        .map_err(|e| ExportError::TaskFailed(e.to_string()))??;

    info!("Assembled {} ({} bytes)", file_name, bytes.len());
    Ok(DocxExport { file_name, bytes })
}
