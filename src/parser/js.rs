//! Reader for the JavaScript literal subset Doxygen emits.
//!
//! Every generated data file is a sequence of `var NAME = <value>;`
//! declarations where a value is a quoted string, `null`, a number, or a
//! nested array. `navtreedata.js` additionally opens with a block-comment
//! license notice. Nothing else appears in these files, so this is a small
//! cursor-based reader rather than a JS parser.

use anyhow::{bail, Result};

/// A value from a Doxygen data file.
#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
    Str(String),
    Num(f64),
    Null,
    Array(Vec<JsValue>),
}

impl JsValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsValue]> {
        match self {
            JsValue::Array(items) => Some(items),
            _ => None,
        }
    }

    #[allow(dead_code)]
    pub fn is_null(&self) -> bool {
        matches!(self, JsValue::Null)
    }
}

/// Parse a whole data file into its `var` declarations, in order.
pub fn parse_document(input: &str) -> Result<Vec<(String, JsValue)>> {
    let mut cursor = Cursor::new(input);
    let mut vars = Vec::new();

    cursor.skip_trivia();
    while !cursor.at_end() {
        cursor.expect_keyword("var")?;
        let name = cursor.read_identifier()?;
        cursor.skip_trivia();
        cursor.expect_byte(b'=')?;
        let value = cursor.read_value()?;
        cursor.skip_trivia();
        // Trailing semicolon is optional on the last declaration
        if cursor.peek() == Some(b';') {
            cursor.advance();
        }
        vars.push((name, value));
        cursor.skip_trivia();
    }

    if vars.is_empty() {
        bail!("no var declarations found");
    }
    Ok(vars)
}

struct Cursor<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Skip whitespace, `//` line comments and `/* */` block comments.
    fn skip_trivia(&mut self) {
        loop {
            while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
                self.advance();
            }
            if self.bytes[self.pos..].starts_with(b"//") {
                while !self.at_end() && self.peek() != Some(b'\n') {
                    self.advance();
                }
            } else if self.bytes[self.pos..].starts_with(b"/*") {
                self.pos += 2;
                while !self.at_end() && !self.bytes[self.pos..].starts_with(b"*/") {
                    self.advance();
                }
                self.pos = (self.pos + 2).min(self.bytes.len());
            } else {
                return;
            }
        }
    }

    fn expect_keyword(&mut self, kw: &str) -> Result<()> {
        self.skip_trivia();
        if self.input[self.pos..].starts_with(kw) {
            self.pos += kw.len();
            Ok(())
        } else {
            bail!("expected `{}` at byte {}", kw, self.pos);
        }
    }

    fn expect_byte(&mut self, b: u8) -> Result<()> {
        if self.peek() == Some(b) {
            self.advance();
            Ok(())
        } else {
            bail!("expected `{}` at byte {}", b as char, self.pos);
        }
    }

    fn read_identifier(&mut self) -> Result<String> {
        self.skip_trivia();
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_') {
            self.advance();
        }
        if self.pos == start {
            bail!("expected identifier at byte {}", start);
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn read_value(&mut self) -> Result<JsValue> {
        self.skip_trivia();
        match self.peek() {
            Some(b'[') => self.read_array(),
            Some(b'"') | Some(b'\'') => self.read_string().map(JsValue::Str),
            Some(b'n') => {
                self.expect_keyword("null")?;
                Ok(JsValue::Null)
            }
            Some(c) if c.is_ascii_digit() || c == b'-' => self.read_number(),
            Some(c) => bail!("unexpected `{}` at byte {}", c as char, self.pos),
            None => bail!("unexpected end of input"),
        }
    }

    fn read_array(&mut self) -> Result<JsValue> {
        self.expect_byte(b'[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some(b']') {
                self.advance();
                return Ok(JsValue::Array(items));
            }
            items.push(self.read_value()?);
            self.skip_trivia();
            match self.peek() {
                Some(b',') => self.advance(),
                Some(b']') => {}
                _ => bail!("expected `,` or `]` at byte {}", self.pos),
            }
        }
    }

    fn read_string(&mut self) -> Result<String> {
        let quote = self.peek().unwrap_or(b'"');
        self.advance();
        let mut out = String::new();
        let mut chars = self.input[self.pos..].char_indices();
        while let Some((i, c)) = chars.next() {
            if c == quote as char {
                self.pos += i + 1;
                return Ok(out);
            }
            if c == '\\' {
                match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, esc)) => out.push(esc),
                    None => break,
                }
            } else {
                out.push(c);
            }
        }
        bail!("unterminated string at byte {}", self.pos);
    }

    fn read_number(&mut self) -> Result<JsValue> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.advance();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == b'.') {
            self.advance();
        }
        let text = &self.input[start..self.pos];
        let num: f64 = text
            .parse()
            .map_err(|_| anyhow::anyhow!("bad number `{}` at byte {}", text, start))?;
        Ok(JsValue::Num(num))
    }
}
