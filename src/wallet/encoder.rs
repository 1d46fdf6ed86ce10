use thiserror::Error;

pub const KEYPAIR_LEN: usize = 64;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("malformed byte array: {0}")]
    MalformedLiteral(String),

    #[error("byte array must hold integers between 0 and 255: {0}")]
    OutOfRangeByte(String),
}

pub fn encode(literal: &str) -> Result<String, ConversionError> {
    let bytes = parse_byte_literal(literal)?;
    Ok(encode_bytes(&bytes))
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

// ===============================
// BYTE LIST
// ===============================

/// Reads `[1, 2, 3]` with free whitespace and one trailing comma. `[]` is an
/// empty sequence. Nothing in the input is evaluated.
pub fn parse_byte_literal(literal: &str) -> Result<Vec<u8>, ConversionError> {
    match Tokenizer::new(literal).read_all()? {
        Literal::List(items) => items
            .iter()
            .enumerate()
            .map(|(position, item)| to_byte(position, item))
            .collect(),
        other => Err(ConversionError::OutOfRangeByte(format!(
            "expected a list, got {}",
            other.describe()
        ))),
    }
}

fn to_byte(position: usize, item: &Literal) -> Result<u8, ConversionError> {
    match item {
        // fractional or too large for i64 lands here as well
        Literal::Number(token) => token
            .parse::<i64>()
            .ok()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| ConversionError::OutOfRangeByte(format!("element {} is {}", position, token))),
        other => Err(ConversionError::OutOfRangeByte(format!(
            "element {} is {}",
            position,
            other.describe()
        ))),
    }
}

// ===============================
// TOKENIZER
// ===============================

#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Number(String),
    Str,
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
}

impl Literal {
    fn describe(&self) -> String {
        match self {
            Literal::Number(token) => format!("the number {}", token),
            Literal::Str => "a string".to_string(),
            Literal::List(_) => "a nested list".to_string(),
            Literal::Tuple(_) => "a tuple".to_string(),
        }
    }
}

struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn read_all(mut self) -> Result<Literal, ConversionError> {
        let value = self.value()?;
        self.skip_whitespace();
        match self.peek() {
            None => Ok(value),
            Some(c) => Err(self.unexpected(c)),
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, char::is_whitespace) {
            self.bump();
        }
    }

    fn unexpected(&self, c: char) -> ConversionError {
        ConversionError::MalformedLiteral(format!("unexpected {:?} at offset {}", c, self.pos))
    }

    fn value(&mut self) -> Result<Literal, ConversionError> {
        self.skip_whitespace();
        match self.peek() {
            Some('[') => Ok(Literal::List(self.items(']')?.0)),
            Some('(') => {
                let (mut items, saw_comma) = self.items(')')?;
                // `(x)` is just x
                if items.len() == 1 && !saw_comma {
                    Ok(items.remove(0))
                } else {
                    Ok(Literal::Tuple(items))
                }
            }
            Some(q @ ('"' | '\'')) => self.string(q),
            Some(c) if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => self.number(),
            Some(c) => Err(self.unexpected(c)),
            None => Err(ConversionError::MalformedLiteral("unexpected end of input".to_string())),
        }
    }

    fn items(&mut self, close: char) -> Result<(Vec<Literal>, bool), ConversionError> {
        self.bump();
        let mut items = Vec::new();
        let mut saw_comma = false;

        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.bump();
                return Ok((items, saw_comma));
            }

            items.push(self.value()?);
            self.skip_whitespace();

            match self.peek() {
                Some(',') => {
                    self.bump();
                    saw_comma = true;
                }
                Some(c) if c == close => {
                    self.bump();
                    return Ok((items, saw_comma));
                }
                Some(c) => return Err(self.unexpected(c)),
                None => {
                    return Err(ConversionError::MalformedLiteral(format!(
                        "missing closing {:?}",
                        close
                    )))
                }
            }
        }
    }

    fn string(&mut self, quote: char) -> Result<Literal, ConversionError> {
        self.bump();
        loop {
            match self.bump() {
                Some('\\') => {
                    self.bump();
                }
                Some(c) if c == quote => return Ok(Literal::Str),
                Some('\n') | None => {
                    return Err(ConversionError::MalformedLiteral("unterminated string".to_string()))
                }
                Some(_) => {}
            }
        }
    }

    fn number(&mut self) -> Result<Literal, ConversionError> {
        let start = self.pos;
        if matches!(self.peek(), Some('+' | '-')) {
            self.bump();
        }
        while self
            .peek()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
        {
            self.bump();
        }

        let token = &self.text[start..self.pos];
        if is_numeric_token(token) {
            Ok(Literal::Number(token.to_string()))
        } else {
            Err(ConversionError::MalformedLiteral(format!("{:?} is not a number", token)))
        }
    }
}

fn is_numeric_token(token: &str) -> bool {
    let unsigned = token.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(token);
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    match unsigned.split_once('.') {
        None => !unsigned.is_empty() && all_digits(unsigned),
        Some((int, frac)) => {
            (!int.is_empty() || !frac.is_empty()) && all_digits(int) && all_digits(frac)
        }
    }
}
