//! CSON (CoffeeScript Object Notation) loader
//!
//! Covers the data subset of CSON that config files use: indentation
//! nested objects with an implicit top-level object, `{}` and `[]` literals
//! spanning lines, quoted and triple-quoted strings, numbers, CoffeeScript
//! boolean aliases and `#` / `###` comments. Executable CoffeeScript
//! (interpolation, expressions) is rejected.

use std::path::Path;

use serde_json::{Map, Number, Value};

use crate::{Error, Result};

pub fn cson_loader(path: &Path, content: &str) -> Result<Value> {
    Parser::new(content)
        .parse_document()
        .map_err(|message| Error::parse(path, "CSON", message))
}

type ParseResult<T> = std::result::Result<T, String>;

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(content: &str) -> Self {
        Self {
            chars: content.chars().collect(),
            pos: 0,
        }
    }

    fn parse_document(&mut self) -> ParseResult<Value> {
        self.skip_trivia()?;
        if self.peek().is_none() {
            return Ok(Value::Null);
        }

        let value = if self.looks_like_key() {
            let indent = self.column();
            self.parse_block_object(indent)?
        } else {
            self.parse_value()?
        };

        self.skip_trivia()?;
        match self.peek() {
            None => Ok(value),
            Some(c) => Err(self.error(&format!("unexpected '{c}'"))),
        }
    }

    /// Objects written as `key: value` lines at a shared indentation level.
    ///
    /// Stops at the first line indented less than `indent`, or at a closing
    /// bracket or comma when nested inside a literal.
    fn parse_block_object(&mut self, indent: usize) -> ParseResult<Value> {
        let mut map = Map::new();
        let mut same_line = false;

        loop {
            if !same_line {
                self.skip_trivia()?;
                match self.peek() {
                    None | Some(']' | '}' | ',') => break,
                    Some(_) => {}
                }
                let column = self.column();
                if column < indent {
                    break;
                }
                if column > indent {
                    return Err(self.error("unexpected indentation"));
                }
            }

            let key = self.parse_key()?;
            self.skip_inline_ws();
            self.expect(':')?;
            self.skip_inline_ws();
            self.skip_comment()?;

            let value = if self.at_line_end() {
                self.skip_trivia()?;
                if self.peek().is_none() || self.column() <= indent {
                    return Err(self.error(&format!("missing value for key '{key}'")));
                }
                if self.looks_like_key() {
                    let child = self.column();
                    self.parse_block_object(child)?
                } else {
                    self.parse_value()?
                }
            } else if self.looks_like_key() {
                // `outer: inner: value` nests on a single line
                let child = self.column();
                self.parse_block_object(child)?
            } else {
                self.parse_value()?
            };
            map.insert(key, value);

            self.skip_inline_ws();
            same_line = false;
            if self.peek() == Some(',') {
                self.bump();
                self.skip_inline_ws();
                self.skip_comment()?;
                same_line = !self.at_line_end();
            }
        }

        Ok(Value::Object(map))
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        match self.peek() {
            Some('{') => self.parse_flow_object(),
            Some('[') => self.parse_array(),
            Some('\'' | '"') => self.parse_string().map(Value::String),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => {
                self.parse_number()
            }
            Some(c) if c.is_alphabetic() => self.parse_keyword(),
            Some(c) => Err(self.error(&format!("unexpected '{c}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_flow_object(&mut self) -> ParseResult<Value> {
        self.expect('{')?;
        let mut map = Map::new();

        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(',') => {
                    self.bump();
                    continue;
                }
                None => return Err(self.error("unterminated object")),
                Some(_) => {}
            }

            let key = self.parse_key()?;
            self.skip_inline_ws();
            self.expect(':')?;
            self.skip_trivia()?;
            let value = self.parse_value()?;
            map.insert(key, value);
        }

        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> ParseResult<Value> {
        self.expect('[')?;
        let mut items = Vec::new();

        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(']') => {
                    self.bump();
                    break;
                }
                Some(',') => {
                    self.bump();
                    continue;
                }
                None => return Err(self.error("unterminated array")),
                Some(_) => {}
            }

            let item = if self.looks_like_key() {
                let indent = self.column();
                self.parse_block_object(indent)?
            } else {
                self.parse_value()?
            };
            items.push(item);
        }

        Ok(Value::Array(items))
    }

    fn parse_key(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some('\'' | '"') => self.parse_string(),
            _ => {
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '$' {
                        self.bump();
                    } else {
                        break;
                    }
                }
                if self.pos == start {
                    return Err(self.error("expected a key"));
                }
                Ok(self.chars[start..self.pos].iter().collect())
            }
        }
    }

    fn looks_like_key(&mut self) -> bool {
        let saved = self.pos;
        let found = self.parse_key().is_ok() && {
            self.skip_inline_ws();
            self.peek() == Some(':')
        };
        self.pos = saved;
        found
    }

    fn parse_string(&mut self) -> ParseResult<String> {
        let Some(quote) = self.bump() else {
            return Err(self.error("expected a string"));
        };

        if self.peek() == Some(quote) && self.peek_at(1) == Some(quote) {
            self.pos += 2;
            return self.parse_block_string(quote);
        }

        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => break,
                Some('\\') => out.push(self.parse_escape()?),
                Some('#') if quote == '"' && self.peek() == Some('{') => {
                    return Err(self.error("string interpolation is not supported"));
                }
                Some('\n') => {
                    // CoffeeScript joins multi-line strings with a single space
                    while out.ends_with([' ', '\t']) {
                        out.pop();
                    }
                    self.skip_inline_ws();
                    out.push(' ');
                }
                Some(c) => out.push(c),
            }
        }
        Ok(out)
    }

    fn parse_block_string(&mut self, quote: char) -> ParseResult<String> {
        let mut raw = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated block string")),
                Some(c) if c == quote && self.peek() == Some(quote) && self.peek_at(1) == Some(quote) => {
                    self.pos += 2;
                    break;
                }
                Some('\\') => raw.push(self.parse_escape()?),
                Some(c) => raw.push(c),
            }
        }
        Ok(dedent(&raw))
    }

    fn parse_escape(&mut self) -> ParseResult<char> {
        let escaped = match self.bump() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('0') => '\0',
            Some('u') => {
                let hex: String = (0..4).filter_map(|_| self.bump()).collect();
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| self.error(&format!("invalid unicode escape '\\u{hex}'")))?
            }
            Some(c) => c,
            None => return Err(self.error("unterminated escape sequence")),
        };
        Ok(escaped)
    }

    fn parse_number(&mut self) -> ParseResult<Value> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        while let Some(c) = self.peek() {
            let exponent_sign = (c == '-' || c == '+')
                && matches!(self.chars.get(self.pos - 1), Some('e' | 'E'))
                && !self.chars[start..self.pos].iter().any(|c| *c == 'x' || *c == 'X');
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || exponent_sign {
                self.bump();
            } else {
                break;
            }
        }

        let literal: String = self.chars[start..self.pos].iter().filter(|c| **c != '_').collect();
        parse_number_literal(&literal)
            .ok_or_else(|| self.error(&format!("invalid number '{literal}'")))
    }

    fn parse_keyword(&mut self) -> ParseResult<Value> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.bump();
            } else {
                break;
            }
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "true" | "yes" | "on" => Ok(Value::Bool(true)),
            "false" | "no" | "off" => Ok(Value::Bool(false)),
            "null" | "undefined" => Ok(Value::Null),
            _ => Err(self.error(&format!("unexpected identifier '{word}'"))),
        }
    }

    /// Skip whitespace, newlines and comments.
    fn skip_trivia(&mut self) -> ParseResult<()> {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    self.bump();
                }
                Some('#') => self.skip_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_inline_ws(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.bump();
        }
    }

    fn skip_comment(&mut self) -> ParseResult<()> {
        if self.peek() != Some('#') {
            return Ok(());
        }
        if self.peek_at(1) == Some('#') && self.peek_at(2) == Some('#') {
            self.pos += 3;
            loop {
                match self.bump() {
                    None => return Err(self.error("unterminated block comment")),
                    Some('#') if self.peek() == Some('#') && self.peek_at(1) == Some('#') => {
                        self.pos += 2;
                        return Ok(());
                    }
                    Some(_) => {}
                }
            }
        }
        while !matches!(self.peek(), None | Some('\n')) {
            self.bump();
        }
        Ok(())
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some('\n' | '\r'))
    }

    fn expect(&mut self, expected: char) -> ParseResult<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(&format!("expected '{expected}' but found '{c}'"))),
            None => Err(self.error(&format!("expected '{expected}' but found end of input"))),
        }
    }

    fn column(&self) -> usize {
        self.chars[..self.pos]
            .iter()
            .rev()
            .take_while(|c| **c != '\n')
            .count()
    }

    fn line(&self) -> usize {
        self.chars[..self.pos].iter().filter(|c| **c == '\n').count() + 1
    }

    fn error(&self, message: &str) -> String {
        format!("{message} (line {}, column {})", self.line(), self.column() + 1)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }
}

fn parse_number_literal(literal: &str) -> Option<Value> {
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal.strip_prefix('+').unwrap_or(literal)),
    };

    let radix = match digits.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let n = i64::from_str_radix(&digits[2..], radix).ok()?;
        return Some(Value::from(if negative { -n } else { n }));
    }

    if let Ok(n) = digits.parse::<i64>() {
        return Some(Value::from(if negative { -n } else { n }));
    }
    let n = digits.parse::<f64>().ok()?;
    Number::from_f64(if negative { -n } else { n }).map(Value::Number)
}

/// Strip the indentation shared by every non-blank line, plus the leading
/// and trailing line breaks around a block string.
fn dedent(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').collect();
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut body: Vec<&str> = lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                ""
            } else {
                l.get(indent..).unwrap_or_else(|| l.trim_start())
            }
        })
        .collect();
    if body.first().is_some_and(|l| l.trim().is_empty()) {
        body.remove(0);
    }
    if body.last().is_some_and(|l| l.trim().is_empty()) {
        body.pop();
    }
    body.join("\n")
}
