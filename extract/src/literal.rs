//! Recursive-descent parser for argument descriptor literals.
//!
//! Registration files declare arguments as object literals such as
//!
//! ```text
//! { name: 'rule',
//!     description: 'the boolean operation rule',
//!     typeList: [ARGUMENT_TYPE.STRING],
//!     isRequired: true,
//!     enumList: [
//!         new SlashCommandEnumValue('gt', 'a > b'),
//!     ],
//!     enumProvider: () => commonEnumProviders.variables('all'),
//! }
//! ```
//!
//! Only the subset needed for documentation is understood: objects, arrays,
//! quoted strings, template strings, numbers, booleans, `null`/`undefined`,
//! dotted paths, calls and `new` expressions. Callback values are skipped by
//! balanced-bracket scanning and reported as [`Value::Callback`].

use thiserror::Error;

/// A parsed literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `{ key: value, ... }` with keys in source order.
    Object(Vec<(String, Value)>),
    /// `[value, ...]`
    Array(Vec<Value>),
    /// Single- or double-quoted string, escapes resolved.
    String(String),
    /// Backtick string. `raw` is the body between the backticks.
    Template { raw: String, interpolated: bool },
    /// Numeric literal as written.
    Number(String),
    Bool(bool),
    /// `null` or `undefined`.
    Null,
    /// Identifier or dotted member path, e.g. `ARGUMENT_TYPE.NUMBER`.
    Path(String),
    /// `callee(args)` or `new callee(args)`.
    Call { callee: String, args: Vec<Value> },
    /// A function value whose body was skipped.
    Callback,
}

impl Value {
    /// Returns the text of string-like values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Template { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Looks up a key of an object value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Failure to parse a literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct LiteralError {
    /// Byte offset into the literal text.
    pub offset: usize,
    pub message: String,
}

/// Parses a complete literal. Trailing text other than whitespace or
/// comments is an error.
///
/// # Examples
///
/// ```
/// use slashdoc_extract::literal::{Value, parse_literal};
///
/// let value = parse_literal("{ typeList: [ARGUMENT_TYPE.BOOLEAN], isRequired: true }").unwrap();
/// assert_eq!(value.get("isRequired"), Some(&Value::Bool(true)));
/// assert_eq!(
///     value.get("typeList"),
///     Some(&Value::Array(vec![Value::Path("ARGUMENT_TYPE.BOOLEAN".into())])),
/// );
/// ```
pub fn parse_literal(input: &str) -> Result<Value, LiteralError> {
    let mut parser = LiteralParser::new(input);
    let value = parser.parse_value()?;
    parser.skip_trivia()?;
    if parser.pos < input.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

/// Returns the byte length of the leading `{ ... }` block if its braces
/// balance within `text`, ignoring braces inside strings.
pub(crate) fn balanced_object_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (idx, ch) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' | '`' => quote = Some(ch),
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + 1);
                }
            }
            _ => {}
        }
    }
    None
}

struct LiteralParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        self.skip_trivia()?;
        match self.peek() {
            Some(ch) if ch == expected => {
                self.bump();
                Ok(())
            }
            Some(ch) => Err(self.error(format!("expected '{expected}', found '{ch}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    /// Skips whitespace, `// line` and `/* block */` comments.
    fn skip_trivia(&mut self) -> Result<(), LiteralError> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if trimmed.starts_with("//") {
                let len = trimmed.find('\n').unwrap_or(trimmed.len());
                self.pos += len;
            } else if trimmed.starts_with("/*") {
                let Some(end) = trimmed[2..].find("*/") else {
                    return Err(self.error("unterminated block comment"));
                };
                self.pos += end + 4;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        self.skip_trivia()?;
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some(q @ ('\'' | '"')) => self.parse_string(q).map(Value::String),
            Some('`') => self.parse_template(),
            Some('(') => self.skip_callback(self.pos),
            Some(ch) if ch == '-' || ch == '+' || ch.is_ascii_digit() => self.parse_number(),
            Some(ch) if is_ident_start(ch) => self.parse_word(),
            Some(ch) => Err(self.error(format!("unexpected character '{ch}'"))),
            None => Err(self.error("expected a value, found end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Value, LiteralError> {
        self.expect('{')?;
        let mut fields = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(Value::Object(fields));
                }
                Some(q @ ('\'' | '"')) => {
                    let key = self.parse_string(q)?;
                    self.expect(':')?;
                    fields.push((key, self.parse_value()?));
                }
                Some(ch) if is_ident_start(ch) => {
                    let key = self.parse_ident().to_string();
                    self.expect(':')?;
                    fields.push((key, self.parse_value()?));
                }
                Some(ch) => return Err(self.error(format!("expected object key, found '{ch}'"))),
                None => return Err(self.error("unterminated object")),
            }
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {}
                Some(ch) => return Err(self.error(format!("expected ',' or '}}', found '{ch}'"))),
                None => return Err(self.error("unterminated object")),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, LiteralError> {
        self.expect('[')?;
        let items = self.parse_sequence(']')?;
        Ok(Value::Array(items))
    }

    /// Parses comma-separated values up to and including `close`.
    fn parse_sequence(&mut self, close: char) -> Result<Vec<Value>, LiteralError> {
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(close) {
                self.bump();
                return Ok(items);
            }
            items.push(self.parse_value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(ch) if ch == close => {}
                Some(ch) => {
                    return Err(self.error(format!("expected ',' or '{close}', found '{ch}'")));
                }
                None => return Err(self.error(format!("expected '{close}', found end of input"))),
            }
        }
    }

    fn parse_string(&mut self, quote: char) -> Result<String, LiteralError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => {
                    self.pos = start;
                    return Err(self.error("unterminated string"));
                }
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('0') => out.push('\0'),
                    Some('u') => out.push(self.parse_unicode_escape()?),
                    Some('\n') => {}
                    Some(other) => out.push(other),
                    None => return Err(self.error("unterminated escape")),
                },
                Some(ch) if ch == quote => return Ok(out),
                Some(ch) => out.push(ch),
            }
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char, LiteralError> {
        let digits: String = if self.peek() == Some('{') {
            self.bump();
            let Some(len) = self.rest().find('}') else {
                return Err(self.error("unterminated unicode escape"));
            };
            let body = self.rest()[..len].to_string();
            self.pos += len + 1;
            body
        } else {
            let body: String = self.rest().chars().take(4).collect();
            self.pos += body.len();
            body
        };
        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(format!("invalid unicode escape '{digits}'")))
    }

    fn parse_template(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        self.bump();
        let body_start = self.pos;
        let mut interpolated = false;
        loop {
            match self.bump() {
                None => {
                    self.pos = start;
                    return Err(self.error("unterminated template string"));
                }
                Some('\\') => {
                    self.bump();
                }
                Some('`') => {
                    let raw = self.src[body_start..self.pos - 1].to_string();
                    return Ok(Value::Template { raw, interpolated });
                }
                Some('$') if self.peek() == Some('{') => {
                    interpolated = true;
                    self.skip_interpolation()?;
                }
                Some(_) => {}
            }
        }
    }

    /// Skips a `{ ... }` interpolation body, including nested strings.
    fn skip_interpolation(&mut self) -> Result<(), LiteralError> {
        self.bump();
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek() {
                None => return Err(self.error("unterminated template interpolation")),
                Some(q @ ('\'' | '"')) => {
                    self.parse_string(q)?;
                }
                Some('`') => {
                    self.parse_template()?;
                }
                Some('{') => {
                    depth += 1;
                    self.bump();
                }
                Some('}') => {
                    depth -= 1;
                    self.bump();
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        Ok(())
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
        {
            self.bump();
        }
        let text = &self.src[start..self.pos];
        if !text.chars().any(|c| c.is_ascii_digit()) {
            self.pos = start;
            return Err(self.error("invalid number"));
        }
        Ok(Value::Number(text.to_string()))
    }

    fn parse_ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn parse_path(&mut self) -> Result<String, LiteralError> {
        let mut path = self.parse_ident().to_string();
        if path.is_empty() {
            return Err(self.error("expected identifier"));
        }
        while self.peek() == Some('.') {
            self.bump();
            let segment = self.parse_ident();
            if segment.is_empty() {
                return Err(self.error("expected identifier after '.'"));
            }
            path.push('.');
            path.push_str(segment);
        }
        Ok(path)
    }

    fn parse_word(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let path = self.parse_path()?;
        match path.as_str() {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            "null" | "undefined" => return Ok(Value::Null),
            "async" | "function" => return self.skip_callback(start),
            "new" => {
                self.skip_trivia()?;
                let callee = self.parse_path()?;
                self.expect('(')?;
                let args = self.parse_sequence(')')?;
                return Ok(Value::Call { callee, args });
            }
            _ => {}
        }

        let after = self.pos;
        self.skip_trivia()?;
        if self.rest().starts_with("=>") {
            return self.skip_callback(start);
        }
        if self.peek() == Some('(') {
            self.bump();
            let args = self.parse_sequence(')')?;
            return Ok(Value::Call { callee: path, args });
        }
        self.pos = after;
        Ok(Value::Path(path))
    }

    /// Skips a function value starting at `start` up to the next top-level
    /// `,` or closing bracket.
    fn skip_callback(&mut self, start: usize) -> Result<Value, LiteralError> {
        self.pos = start;
        let mut depth = 0usize;
        while let Some(ch) = self.peek() {
            match ch {
                '\'' | '"' => {
                    self.parse_string(ch)?;
                    continue;
                }
                '`' => {
                    self.parse_template()?;
                    continue;
                }
                '/' if self.rest().starts_with("//") || self.rest().starts_with("/*") => {
                    self.skip_trivia()?;
                    continue;
                }
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                ',' if depth == 0 => break,
                _ => {}
            }
            self.bump();
        }
        if depth > 0 {
            return Err(self.error("unterminated callback"));
        }
        Ok(Value::Callback)
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}
