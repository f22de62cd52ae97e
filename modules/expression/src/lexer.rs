//! Tokenizer

use std::fmt;

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Str(String),
    Ident(String),

    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,

    Amp,
    AmpAmp,
    Pipe,
    PipePipe,
    Caret,
    Tilde,
    Bang,
    Shl,
    Shr,

    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,

    Question,
    Colon,
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub pos: usize,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Number(n) => return write!(f, "{n}"),
            TokenKind::Str(s) => return write!(f, "'{s}'"),
            TokenKind::Ident(name) => name.as_str(),
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::StarStar => "**",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Amp => "&",
            TokenKind::AmpAmp => "&&",
            TokenKind::Pipe => "|",
            TokenKind::PipePipe => "||",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::Bang => "!",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
        };
        f.write_str(s)
    }
}

/// Split `input` into tokens. Whitespace is insignificant.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer {
        src: input,
        bytes: input.as_bytes(),
        pos: 0,
    };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl Lexer<'_> {
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        while self.peek_at(0).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }

        let start = self.pos;
        let Some(b) = self.peek_at(0) else {
            return Ok(None);
        };

        let kind = match b {
            b'0'..=b'9' => self.number(start)?,
            b'.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.number(start)?,
            b'\'' | b'"' => self.string(start, b)?,
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.ident(start),
            b'+' => self.op(1, TokenKind::Plus),
            b'-' => self.op(1, TokenKind::Minus),
            b'*' if self.peek_at(1) == Some(b'*') => self.op(2, TokenKind::StarStar),
            b'*' => self.op(1, TokenKind::Star),
            b'/' => self.op(1, TokenKind::Slash),
            b'%' => self.op(1, TokenKind::Percent),
            b'&' if self.peek_at(1) == Some(b'&') => self.op(2, TokenKind::AmpAmp),
            b'&' => self.op(1, TokenKind::Amp),
            b'|' if self.peek_at(1) == Some(b'|') => self.op(2, TokenKind::PipePipe),
            b'|' => self.op(1, TokenKind::Pipe),
            b'^' => self.op(1, TokenKind::Caret),
            b'~' => self.op(1, TokenKind::Tilde),
            b'!' if self.peek_at(1) == Some(b'=') => self.op(2, TokenKind::NotEq),
            b'!' => self.op(1, TokenKind::Bang),
            b'=' if self.peek_at(1) == Some(b'=') => self.op(2, TokenKind::EqEq),
            b'<' if self.peek_at(1) == Some(b'<') => self.op(2, TokenKind::Shl),
            b'<' if self.peek_at(1) == Some(b'=') => self.op(2, TokenKind::Le),
            b'<' => self.op(1, TokenKind::Lt),
            b'>' if self.peek_at(1) == Some(b'>') => self.op(2, TokenKind::Shr),
            b'>' if self.peek_at(1) == Some(b'=') => self.op(2, TokenKind::Ge),
            b'>' => self.op(1, TokenKind::Gt),
            b'?' => self.op(1, TokenKind::Question),
            b':' => self.op(1, TokenKind::Colon),
            b'(' => self.op(1, TokenKind::LParen),
            b')' => self.op(1, TokenKind::RParen),
            _ => {
                let ch = self.src[start..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(ParseError::UnexpectedChar { ch, pos: start });
            }
        };

        Ok(Some(Token { kind, pos: start }))
    }

    fn op(&mut self, len: usize, kind: TokenKind) -> TokenKind {
        self.pos += len;
        kind
    }

    fn eat_digits(&mut self) -> usize {
        let from = self.pos;
        while self.peek_at(0).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - from
    }

    fn number(&mut self, start: usize) -> Result<TokenKind, ParseError> {
        self.eat_digits();
        if self.peek_at(0) == Some(b'.') {
            self.pos += 1;
            self.eat_digits();
        }

        let mut malformed = false;
        if matches!(self.peek_at(0), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek_at(0), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            malformed = self.eat_digits() == 0;
        }

        // `12abc` is a malformed literal, not a number followed by a name.
        while self
            .peek_at(0)
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            malformed = true;
            self.pos += 1;
        }

        let literal = &self.src[start..self.pos];
        let invalid = || ParseError::InvalidNumber {
            literal: literal.to_owned(),
            pos: start,
        };
        if malformed {
            return Err(invalid());
        }
        // `1e400` parses as infinity.
        literal
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(TokenKind::Number)
            .ok_or_else(invalid)
    }

    fn string(&mut self, start: usize, quote: u8) -> Result<TokenKind, ParseError> {
        let quote = char::from(quote);
        let mut out = String::new();
        let mut chars = self.src[start + 1..].char_indices();

        while let Some((offset, ch)) = chars.next() {
            match ch {
                c if c == quote => {
                    self.pos = start + 1 + offset + c.len_utf8();
                    return Ok(TokenKind::Str(out));
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, escaped)) => out.push(escaped),
                    None => break,
                },
                c => out.push(c),
            }
        }

        Err(ParseError::UnterminatedString { pos: start })
    }

    fn ident(&mut self, start: usize) -> TokenKind {
        while self
            .peek_at(0)
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }
        TokenKind::Ident(self.src[start..self.pos].to_owned())
    }
}
