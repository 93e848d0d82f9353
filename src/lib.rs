/*!
 * # exam-composer
 *
 * A Rust library that turns transcribed exam papers into print-ready output.
 *
 * ## Features
 *
 * - Normalize untrusted transcription text (question labels, option labels,
 *   stray mark annotations)
 * - Lightweight math markup (`x^2`, `a_{ij}`) with italic variables and
 *   spaced operators
 * - Latin, Urdu and Arabic script profiles with right-to-left layout
 * - Two renderers fed from one normalized view:
 *   - a screen/print layout tree (plus a printable HTML page)
 *   - a `.docx` document file
 * - Share payloads (base64 of the document JSON)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `document`: the exam document model, transcription intake and share payloads
 * - `text`: the text normalizer and the math tokenizer/formatter
 * - `script_profile`: direction, fonts and labels per document language
 * - `render`: the shared prepared view and both renderers:
 *   - `render::screen`: layout tree for the on-screen/print surface
 *   - `render::html`: printable HTML built from the layout tree
 *   - `render::docx`: `.docx` document file
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: Language tag resolution
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod render;
pub mod script_profile;
pub mod text;

// Re-export main types for easier usage
pub use app_config::{Config, DocxConfig, OutputFormat};
pub use document::{ExamDocument, HeaderTemplate, Question, Section};
pub use errors::{AppError, ConfigError, DocumentError, ExportError, ShareError};
pub use language_utils::{language_tags_match, resolve_language, Language};
pub use render::{export_docx, render_docx, render_screen, to_html, ScreenLayout};
pub use script_profile::{Direction, ScriptProfile};
