/*!
 * Text processing shared by both renderers.
 *
 * - `normalizer`: strips labels and stray mark annotations from transcribed text
 * - `math`: tokenizes `^`/`_` markup and styles the resulting runs
 */

pub mod math;
pub mod normalizer;

pub use math::{
    format_text, format_token, is_math_context, split_math_run, to_plain_text, tokenize,
    MathToken, MathTokens, RunStyle, ScriptPosition, StyledRun, SCRIPT_SCALE,
};
pub use normalizer::{
    clean_question_text, normalize_marks, strip_option_label, strip_question_prefix, trailing_marks,
};
