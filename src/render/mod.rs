/*!
 * Renderers.
 *
 * Both renderers start from the same [`prepare::PaperView`] and the same
 * styled runs from [`crate::text::math`]:
 * - `screen`: a directional layout tree for the on-screen/print surface
 * - `html`: a printable page built from the layout tree
 * - `docx`: a `.docx` document file built with `docx-rs` (left-to-right only)
 */

pub mod docx;
pub mod html;
pub mod prepare;
pub mod screen;

pub use docx::{export_docx, export_file_name, render_docx, DocxExport};
pub use html::to_html;
pub use prepare::{prepare, PaperView, QuestionView, SectionView};
pub use screen::{render_screen, ScreenLayout};

/// Escape text for XML and HTML output
pub(crate) fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
