/*!
 * Lightweight math markup.
 *
 * Exam text carries inline notation: `x^2`, `x^{n+1}`, `a_i`, `a_{ij}`.
 * [`tokenize`] splits a string into plain runs and script tokens, and the
 * formatting functions turn each token into styled runs (italic variables,
 * padded operators, scaled and raised/lowered scripts). Both renderers consume
 * the same styled runs and map the style flags onto their own primitives.
 *
 * Malformed markup is never an error: a `^` or `_` without a valid operand,
 * an empty `^{}` or an unclosed brace stays in the plain text as written.
 */

use once_cell::sync::Lazy;
use regex::{CaptureMatches, Captures, Regex};
use serde::Serialize;

/// Size factor applied to superscript and subscript runs
pub const SCRIPT_SCALE: f32 = 0.75;

// @const: Braced scripts first, then single-character scripts
static MATH_MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\^\{([^}]+)\}|_\{([^}]+)\}|\^([\p{L}\p{N}])|_([\p{L}\p{N}])").unwrap()
});

/// One segment of a tokenized string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathToken<'t> {
    PlainRun(&'t str),
    Superscript(&'t str),
    Subscript(&'t str),
}

impl<'t> MathToken<'t> {
    /// Text of the token with markup removed
    pub fn content(&self) -> &'t str {
        match self {
            MathToken::PlainRun(text) | MathToken::Superscript(text) | MathToken::Subscript(text) => text,
        }
    }

    pub fn position(&self) -> ScriptPosition {
        match self {
            MathToken::PlainRun(_) => ScriptPosition::Baseline,
            MathToken::Superscript(_) => ScriptPosition::Superscript,
            MathToken::Subscript(_) => ScriptPosition::Subscript,
        }
    }

    pub fn is_script(&self) -> bool {
        !matches!(self, MathToken::PlainRun(_))
    }
}

/// Lazy token stream over a string, see [`tokenize`]
pub struct MathTokens<'t> {
    text: &'t str,
    matches: CaptureMatches<'static, 't>,
    cursor: usize,
    pending: Option<MathToken<'t>>,
}

impl<'t> Iterator for MathTokens<'t> {
    type Item = MathToken<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        match self.matches.next() {
            Some(caps) => {
                let whole = caps.get(0)?;
                let token = script_token(&caps);
                let before = &self.text[self.cursor..whole.start()];
                self.cursor = whole.end();

                if before.is_empty() {
                    Some(token)
                } else {
                    self.pending = Some(token);
                    Some(MathToken::PlainRun(before))
                }
            }
            None if self.cursor < self.text.len() => {
                let rest = &self.text[self.cursor..];
                self.cursor = self.text.len();
                Some(MathToken::PlainRun(rest))
            }
            None => None,
        }
    }
}

fn script_token<'t>(caps: &Captures<'t>) -> MathToken<'t> {
    if let Some(m) = caps.get(1).or_else(|| caps.get(3)) {
        MathToken::Superscript(m.as_str())
    } else if let Some(m) = caps.get(2).or_else(|| caps.get(4)) {
        MathToken::Subscript(m.as_str())
    } else {
        // Unreachable with the pattern above; keep the literal text
        MathToken::PlainRun(caps.get(0).map_or("", |m| m.as_str()))
    }
}

/// Split `text` into plain runs, superscripts and subscripts, in input order.
///
/// The stream is lazy and can be recreated any number of times from the same
/// input with identical output.
pub fn tokenize(text: &str) -> MathTokens<'_> {
    MathTokens {
        text,
        matches: MATH_MARKUP_REGEX.captures_iter(text),
        cursor: 0,
        pending: None,
    }
}

/// Vertical placement of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptPosition {
    Baseline,
    Superscript,
    Subscript,
}

/// Renderer-agnostic style of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunStyle {
    /// Single-letter variable
    pub italic: bool,
    /// Operator that gets spacing on both sides
    pub operator: bool,
    /// Size relative to the surrounding text
    pub scale: f32,
    pub position: ScriptPosition,
}

impl RunStyle {
    pub fn plain(position: ScriptPosition) -> Self {
        Self {
            italic: false,
            operator: false,
            scale: scale_for(position),
            position,
        }
    }

    fn variable(position: ScriptPosition) -> Self {
        Self { italic: true, ..Self::plain(position) }
    }

    fn operator(position: ScriptPosition) -> Self {
        Self { operator: true, ..Self::plain(position) }
    }
}

fn scale_for(position: ScriptPosition) -> f32 {
    match position {
        ScriptPosition::Baseline => 1.0,
        ScriptPosition::Superscript | ScriptPosition::Subscript => SCRIPT_SCALE,
    }
}

/// A piece of text with its style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyledRun<'t> {
    pub text: &'t str,
    pub style: RunStyle,
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '=' | '/' | '*')
}

/// A plain run reads as math when it has a Latin letter and an operator
pub fn is_math_context(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic()) && text.chars().any(is_operator)
}

/// Split a run in math context.
///
/// Every Latin letter and every operator becomes its own run. Everything else
/// (digits, punctuation, whitespace, other scripts) stays grouped.
pub fn split_math_run(content: &str, position: ScriptPosition) -> Vec<StyledRun<'_>> {
    let mut runs = Vec::new();
    let mut group_start: Option<usize> = None;

    for (start, ch) in content.char_indices() {
        let style = if is_operator(ch) {
            RunStyle::operator(position)
        } else if ch.is_ascii_alphabetic() {
            RunStyle::variable(position)
        } else {
            group_start.get_or_insert(start);
            continue;
        };

        flush_group(&mut runs, content, &mut group_start, start, position);
        runs.push(StyledRun {
            text: &content[start..start + ch.len_utf8()],
            style,
        });
    }

    flush_group(&mut runs, content, &mut group_start, content.len(), position);
    runs
}

fn flush_group<'t>(
    runs: &mut Vec<StyledRun<'t>>,
    content: &'t str,
    group_start: &mut Option<usize>,
    end: usize,
    position: ScriptPosition,
) {
    if let Some(start) = group_start.take() {
        if start < end {
            runs.push(StyledRun {
                text: &content[start..end],
                style: RunStyle::plain(position),
            });
        }
    }
}

/// Style one token. Script content is always math; a plain run is math only
/// when `math_context` says so.
pub fn format_token<'t>(token: &MathToken<'t>, math_context: bool) -> Vec<StyledRun<'t>> {
    match *token {
        MathToken::PlainRun(text) if !math_context => {
            if text.is_empty() {
                Vec::new()
            } else {
                vec![StyledRun { text, style: RunStyle::plain(ScriptPosition::Baseline) }]
            }
        }
        _ => split_math_run(token.content(), token.position()),
    }
}

/// Tokenize and style a whole field.
///
/// A plain run is in math context when [`is_math_context`] holds for it.
/// Otherwise, a Latin letter ending the run right before a script token is
/// still the base of that script and is italicized on its own
/// (`Define x^2` keeps `Define ` upright and italicizes the `x`).
pub fn format_text(text: &str) -> Vec<StyledRun<'_>> {
    let tokens: Vec<MathToken<'_>> = tokenize(text).collect();
    let mut runs = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        match *token {
            MathToken::PlainRun(content) if !is_math_context(content) => {
                let is_script_base = content.ends_with(|c: char| c.is_ascii_alphabetic())
                    && tokens.get(index + 1).is_some_and(MathToken::is_script);
                if is_script_base {
                    let (prose, base) = content.split_at(content.len() - 1);
                    runs.extend(format_token(&MathToken::PlainRun(prose), false));
                    runs.push(StyledRun {
                        text: base,
                        style: RunStyle::variable(ScriptPosition::Baseline),
                    });
                } else {
                    runs.extend(format_token(token, false));
                }
            }
            _ => runs.extend(format_token(token, true)),
        }
    }

    runs
}

/// Render a field as plain text, replacing script markup with Unicode
/// superscript/subscript glyphs where every character has one.
pub fn to_plain_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for token in tokenize(text) {
        match token {
            MathToken::PlainRun(content) => out.push_str(content),
            MathToken::Superscript(content) => push_mapped(&mut out, content, superscript_glyph),
            MathToken::Subscript(content) => push_mapped(&mut out, content, subscript_glyph),
        }
    }
    out
}

fn push_mapped(out: &mut String, content: &str, glyph: fn(char) -> Option<char>) {
    match content.chars().map(glyph).collect::<Option<String>>() {
        Some(mapped) => out.push_str(&mapped),
        None => out.push_str(content),
    }
}

fn superscript_glyph(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        'n' => 'ⁿ',
        'i' => 'ⁱ',
        _ => return None,
    })
}

fn subscript_glyph(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'o' => 'ₒ',
        'x' => 'ₓ',
        'h' => 'ₕ',
        'k' => 'ₖ',
        'l' => 'ₗ',
        'm' => 'ₘ',
        'n' => 'ₙ',
        'p' => 'ₚ',
        's' => 'ₛ',
        't' => 'ₜ',
        'i' => 'ᵢ',
        'j' => 'ⱼ',
        'r' => 'ᵣ',
        'u' => 'ᵤ',
        'v' => 'ᵥ',
        _ => return None,
    })
}
