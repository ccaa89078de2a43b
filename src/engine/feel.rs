//! Rewrites FEEL-style rule text into CEL.
//!
//! Only surface tokens are mapped:
//!
//! | FEEL                        | CEL                       |
//! |-----------------------------|---------------------------|
//! | `a = b`                     | `a == b`                  |
//! | `and`, `or`                 | `&&`, `\|\|`              |
//! | `not(x)`                    | `!(x)`                    |
//! | `now()`                     | `now`                     |
//! | `has allowed changes(...)`  | `has_allowed_changes(...)`|
//! | `date and time(...)`        | `timestamp(...)`          |
//! | `list[1]`                   | `list[0]`                 |
//!
//! List indices start at 1. A literal index is shifted to CEL's 0-based
//! indexing; any other index expression `e` becomes `(e) - 1`. Negative and
//! zero literal indices are rejected. String literals are copied untouched.
//! Everything else passes through as is.

use super::EngineFailure;
use crate::functions::FunctionRegistry;

/// FEEL built-in functions with a CEL counterpart.
const FEEL_BUILTINS: [(&str, &str); 1] = [("date and time", "timestamp")];

/// Words after which `[` opens a list literal rather than an index.
const LIST_KEYWORDS: [&str; 4] = ["in", "then", "else", "return"];

/// Translates FEEL-style expressions for a given set of extension functions.
#[derive(Debug, Clone)]
pub struct FeelTranslator {
    // (words of the function name, CEL identifier), longest names first
    functions: Vec<(Vec<String>, String)>,
}

impl FeelTranslator {
    #[must_use]
    pub fn new(functions: &FunctionRegistry) -> Self {
        let mut names: Vec<_> = functions
            .iter()
            .filter(|def| def.name.contains(char::is_whitespace))
            .map(|def| (words(def.name), def.identifier()))
            .chain(FEEL_BUILTINS.iter().map(|(name, cel)| (words(name), (*cel).to_string())))
            .collect();

        names.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { functions: names }
    }

    /// Rewrites one expression.
    ///
    /// # Errors
    ///
    /// Returns a failure if the expression contains an unterminated string literal
    /// or a list index below 1.
    pub fn translate(&self, expression: &str) -> Result<String, EngineFailure> {
        let chars: Vec<char> = expression.chars().collect();
        let mut out = String::with_capacity(expression.len() + 8);
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '"' {
                let end = string_end(&chars, i)
                    .ok_or_else(|| EngineFailure::new(format!("unterminated string literal starting at position {i}")))?;
                out.extend(&chars[i..=end]);
                i = end + 1;
                continue;
            }

            if c == '['
                && opens_index(&out)
                && let Some(close) = bracket_end(&chars, i)
            {
                let inner: String = chars[i + 1..close].iter().collect();
                let index = one_based_index(&self.translate(&inner)?, i)?;
                out.push('[');
                out.push_str(&index);
                out.push(']');
                i = close + 1;
                continue;
            }

            if c == '=' {
                let prev = i.checked_sub(1).map(|p| chars[p]);
                let next = chars.get(i + 1).copied();
                if matches!(prev, Some('!' | '<' | '>' | '=')) || next == Some('=') {
                    out.push('=');
                } else {
                    out.push_str("==");
                }
                i += 1;
                continue;
            }

            if is_word_start(c) && !follows_word_or_member(&chars, i) {
                if let Some((identifier, next)) = self.match_function(&chars, i) {
                    out.push_str(identifier);
                    i = next;
                    continue;
                }

                let end = word_end(&chars, i);
                let word: String = chars[i..end].iter().collect();
                i = end;

                match word.as_str() {
                    "and" => out.push_str("&&"),
                    "or" => out.push_str("||"),
                    "not" if next_significant(&chars, end) == Some('(') => out.push('!'),
                    "now" => {
                        out.push_str("now");
                        if let Some(after) = empty_call(&chars, end) {
                            i = after;
                        }
                    }
                    _ => out.push_str(&word),
                }
                continue;
            }

            out.push(c);
            i += 1;
        }

        Ok(out)
    }

    /// Matches a multi-word function name followed by `(` at `start`.
    fn match_function(&self, chars: &[char], start: usize) -> Option<(&str, usize)> {
        self.functions.iter().find_map(|(words, identifier)| {
            let mut pos = start;
            for (n, word) in words.iter().enumerate() {
                if n > 0 {
                    let after_space = skip_whitespace(chars, pos);
                    if after_space == pos {
                        return None;
                    }
                    pos = after_space;
                }

                let len = word.chars().count();
                if !word.chars().eq(chars.get(pos..pos + len)?.iter().copied()) {
                    return None;
                }
                pos += len;
            }

            if chars.get(pos).copied().is_some_and(is_word_char) {
                return None;
            }

            (next_significant(chars, pos) == Some('(')).then_some((identifier.as_str(), pos))
        })
    }
}

fn words(name: &str) -> Vec<String> {
    name.split_whitespace().map(str::to_string).collect()
}

/// Whether a `[` written after `out` indexes the preceding value.
fn opens_index(out: &str) -> bool {
    let before = out.trim_end();
    match before.chars().last() {
        Some(')' | ']') => true,
        Some(c) if is_word_char(c) => {
            let prefix = before.trim_end_matches(is_word_char);
            let word = before.strip_prefix(prefix).unwrap_or(before);
            !LIST_KEYWORDS.contains(&word)
        }
        _ => false,
    }
}

/// Index of the `]` closing the bracket opening at `open`.
fn bracket_end(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0_usize;
    let mut i = open;
    while i < chars.len() {
        match chars[i] {
            '"' => i = string_end(chars, i)?,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Rewrites a translated 1-based index expression for CEL.
fn one_based_index(index: &str, position: usize) -> Result<String, EngineFailure> {
    let index = index.trim();

    // map lookup by key
    if index.starts_with('"') {
        return Ok(index.to_string());
    }

    match index.parse::<i64>() {
        Ok(n) if n >= 1 => Ok((n - 1).to_string()),
        Ok(n) => Err(EngineFailure::new(format!(
            "list index {n} at position {position} is not supported, indices start at 1"
        ))),
        Err(_) => Ok(format!("({index}) - 1")),
    }
}

const fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn follows_word_or_member(chars: &[char], i: usize) -> bool {
    i.checked_sub(1)
        .map(|p| chars[p])
        .is_some_and(|prev| is_word_char(prev) || prev == '.')
}

fn word_end(chars: &[char], start: usize) -> usize {
    chars[start..]
        .iter()
        .position(|c| !is_word_char(*c))
        .map_or(chars.len(), |offset| start + offset)
}

fn skip_whitespace(chars: &[char], start: usize) -> usize {
    chars[start..]
        .iter()
        .position(|c| !c.is_whitespace())
        .map_or(chars.len(), |offset| start + offset)
}

fn next_significant(chars: &[char], start: usize) -> Option<char> {
    chars.get(skip_whitespace(chars, start)).copied()
}

/// Position just past `( )` if it follows `start`.
fn empty_call(chars: &[char], start: usize) -> Option<usize> {
    let open = skip_whitespace(chars, start);
    if chars.get(open) != Some(&'(') {
        return None;
    }

    let close = skip_whitespace(chars, open + 1);
    (chars.get(close) == Some(&')')).then_some(close + 1)
}

/// Index of the closing quote of the string literal opening at `start`.
fn string_end(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}
