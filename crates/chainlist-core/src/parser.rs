//! Source-format parser.
//!
//! The remote chain list is a TypeScript module that embeds the data as
//!
//! ```text
//! export const chains = [
//!   { id: 1, name: 'Ethereum', nativeCurrency: { symbol: 'ETH', decimals: 18, }, },
//! ];
//! ```
//!
//! i.e. a JSON superset with bareword keys, single-quoted strings, trailing
//! commas and comments. Parsing happens in two steps:
//!
//! 1. [`SourceParser::extract`] isolates the bracketed array with a bounded
//!    pattern: from the `[` after `export const <declaration> =` up to the
//!    first line that starts with `];`.
//! 2. [`parse_value`] tokenizes that substring into a `serde_json::Value`,
//!    reporting the line and column of the first malformed token. Positions
//!    are relative to the start of the extracted array.
//!
//! Values are limited to what a data table needs: objects, arrays, strings,
//! numbers, `true`, `false` and `null`. Bare identifiers in value position
//! (references to other constants, function calls) are rejected.

use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::error::{RegistryError, SourceError};
use crate::record::ChainRecord;

/// Declaration name used by the upstream chain list.
pub const DEFAULT_DECLARATION: &str = "chains";

/// Maximum nesting of arrays/objects before the input is rejected.
const MAX_DEPTH: usize = 128;

// ─── Extraction ───────────────────────────────────────────────────────────────

/// Locates the chain array inside a source document and converts it into
/// [`ChainRecord`]s.
#[derive(Debug, Clone)]
pub struct SourceParser {
    declaration: String,
    pattern: Regex,
}

impl SourceParser {
    /// Create a parser anchored on `export const <declaration> = [`.
    pub fn new(declaration: impl Into<String>) -> Result<Self, RegistryError> {
        let declaration = declaration.into();
        if declaration.is_empty() {
            return Err(RegistryError::Config("declaration name is empty".into()));
        }
        let pattern = Regex::new(&format!(
            r"\bexport\s+const\s+{}\s*=\s*(\[(?s:.*?)\n\]);",
            regex::escape(&declaration)
        ))
        .map_err(|e| RegistryError::Config(e.to_string()))?;
        Ok(Self {
            declaration,
            pattern,
        })
    }

    /// Parser for the upstream `chains` declaration.
    pub fn upstream() -> Result<Self, RegistryError> {
        Self::new(DEFAULT_DECLARATION)
    }

    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    /// Return the bracketed array text of the first matching declaration.
    pub fn extract<'a>(&self, document: &'a str) -> Result<&'a str, SourceError> {
        self.pattern
            .captures(document)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| SourceError::DeclarationNotFound {
                declaration: self.declaration.clone(),
            })
    }

    /// Extract, convert and decode the chain list from a full document.
    pub fn parse_document(&self, document: &str) -> Result<Vec<ChainRecord>, SourceError> {
        let array = self.extract(document)?;
        tracing::debug!(
            declaration = %self.declaration,
            bytes = array.len(),
            "extracted source array"
        );
        parse_records(array)
    }
}

/// Convert source-format array text into chain records.
pub fn parse_records(text: &str) -> Result<Vec<ChainRecord>, SourceError> {
    let value = parse_value(text)?;
    Ok(serde_json::from_value(value)?)
}

// ─── Tokenizer ────────────────────────────────────────────────────────────────

/// Parse a single source-format value. The whole input must be consumed.
pub fn parse_value(text: &str) -> Result<Value, SourceError> {
    let mut cursor = Cursor::new(text);
    cursor.skip_trivia()?;
    let value = cursor.value(0)?;
    cursor.skip_trivia()?;
    if let Some(c) = cursor.peek() {
        return Err(cursor.error(format!("unexpected `{c}` after value")));
    }
    Ok(value)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, reason: impl Into<String>) -> SourceError {
        self.error_at(self.pos, reason)
    }

    fn error_at(&self, pos: usize, reason: impl Into<String>) -> SourceError {
        let before = &self.src[..pos];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        SourceError::Syntax {
            line,
            column,
            reason: reason.into(),
        }
    }

    fn expect(&mut self, want: char) -> Result<(), SourceError> {
        match self.peek() {
            Some(c) if c == want => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected `{want}`, found `{c}`"))),
            None => Err(self.error(format!("expected `{want}`, found end of input"))),
        }
    }

    /// Skip whitespace, `// line` and `/* block */` comments.
    fn skip_trivia(&mut self) -> Result<(), SourceError> {
        loop {
            match (self.peek(), self.peek_second()) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.pos;
                    self.pos += 2;
                    match self.src[self.pos..].find("*/") {
                        Some(end) => self.pos += end + 2,
                        None => return Err(self.error_at(start, "unterminated block comment")),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn value(&mut self, depth: usize) -> Result<Value, SourceError> {
        match self.peek() {
            Some('[') => self.array(depth + 1),
            Some('{') => self.object(depth + 1),
            Some(q @ ('\'' | '"')) => self.string(q).map(Value::String),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number(),
            Some(c) if is_word_char(c) => {
                let start = self.pos;
                match self.word() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" => Ok(Value::Null),
                    other => Err(self.error_at(start, format!("unexpected identifier `{other}`"))),
                }
            }
            Some(c) => Err(self.error(format!("unexpected `{c}`"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn array(&mut self, depth: usize) -> Result<Value, SourceError> {
        if depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(']') {
                self.bump();
                break;
            }
            items.push(self.value(depth)?);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {
                    self.bump();
                    break;
                }
                Some(c) => return Err(self.error(format!("expected `,` or `]`, found `{c}`"))),
                None => return Err(self.error("unterminated array")),
            }
        }
        Ok(Value::Array(items))
    }

    fn object(&mut self, depth: usize) -> Result<Value, SourceError> {
        if depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.bump();
                break;
            }
            let key = self.key()?;
            self.skip_trivia()?;
            self.expect(':')?;
            self.skip_trivia()?;
            let value = self.value(depth)?;
            map.insert(key, value);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(c) => return Err(self.error(format!("expected `,` or `}}`, found `{c}`"))),
                None => return Err(self.error("unterminated object")),
            }
        }
        Ok(Value::Object(map))
    }

    fn key(&mut self) -> Result<String, SourceError> {
        match self.peek() {
            Some(q @ ('\'' | '"')) => self.string(q),
            Some(c) if is_word_char(c) => Ok(self.word().to_string()),
            Some(c) => Err(self.error(format!("expected object key, found `{c}`"))),
            None => Err(self.error("unterminated object")),
        }
    }

    fn word(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_word_char(c)) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn string(&mut self, quote: char) -> Result<String, SourceError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error_at(start, "unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), SourceError> {
        let at = self.pos - 1;
        match self.bump() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some(c @ ('\\' | '/' | '\'' | '"')) => out.push(c),
            // line continuation
            Some('\n') => {}
            Some('\r') => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            Some('u') => {
                let high = self.hex4()?;
                let code = if (0xD800..0xDC00).contains(&high) {
                    if self.peek() != Some('\\') || self.peek_second() != Some('u') {
                        return Err(self.error_at(at, "unpaired surrogate in \\u escape"));
                    }
                    self.pos += 2;
                    let low = self.hex4()?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(self.error_at(at, "invalid low surrogate in \\u escape"));
                    }
                    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    high
                };
                match char::from_u32(code) {
                    Some(c) => out.push(c),
                    None => return Err(self.error_at(at, "invalid \\u escape")),
                }
            }
            Some(c) => return Err(self.error_at(at, format!("unknown escape `\\{c}`"))),
            None => return Err(self.error_at(at, "unterminated string")),
        }
        Ok(())
    }

    fn hex4(&mut self) -> Result<u32, SourceError> {
        let start = self.pos;
        let digits = self.src.get(start..start + 4).unwrap_or("");
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(self.error_at(start, "expected 4 hex digits in \\u escape"));
        }
        let code = u32::from_str_radix(digits, 16).map_err(|e| self.error_at(start, e.to_string()))?;
        self.pos += 4;
        Ok(code)
    }

    fn number(&mut self) -> Result<Value, SourceError> {
        let start = self.pos;
        let negative = self.peek() == Some('-');
        if negative {
            self.bump();
        }

        if self.peek() == Some('0') && matches!(self.peek_second(), Some('x' | 'X')) {
            self.pos += 2;
            let digits_start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit() || c == '_') {
                self.bump();
            }
            let digits = self.src[digits_start..self.pos].replace('_', "");
            let magnitude = u64::from_str_radix(&digits, 16)
                .map_err(|e| self.error_at(start, format!("invalid hex literal: {e}")))?;
            return if negative {
                i64::try_from(magnitude)
                    .map(|n| Value::Number(Number::from(-n)))
                    .map_err(|_| self.error_at(start, "hex literal out of range"))
            } else {
                Ok(Value::Number(Number::from(magnitude)))
            };
        }

        while let Some(c) = self.peek() {
            let sign_after_exponent =
                (c == '+' || c == '-') && matches!(self.src[..self.pos].chars().last(), Some('e' | 'E'));
            if c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '_') || sign_after_exponent {
                self.bump();
            } else {
                break;
            }
        }
        let literal = self.src[start..self.pos].replace('_', "");
        serde_json::from_str::<Number>(&literal)
            .map(Value::Number)
            .map_err(|_| self.error_at(start, format!("invalid number `{literal}`")))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}
