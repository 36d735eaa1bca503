use std::iter::Peekable;
use std::str::Chars;

use simian_util::source::Location;

use super::keywords::KEYWORDS;
use super::result::{ScanErr, ScanResult};
use super::token::{Token, TokenWithLocation};

/// Turns source text into tokens. Whitespace is skipped and `#` starts
/// a comment that runs to the end of the line.
pub struct Scanner<'a> {
    stream: Peekable<Chars<'a>>,
    /// Location of the next character in the stream.
    location: Location,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { stream: text.chars().peekable(), location: Location::new(1, 1), done: false }
    }

    /// Scan all tokens. The last token is always `EndOfInput`.
    pub fn scan_all(self) -> Result<Vec<TokenWithLocation>, ScanErr> {
        self.collect()
    }

    fn next_token(&mut self) -> ScanResult {
        use Token::*;

        self.skip_whitespace_and_comments();

        let start = self.location;

        let c = match self.next_char() {
            Some(c) => c,
            None => return Ok(TokenWithLocation::new(EndOfInput, start, start)),
        };

        let token = match c {
            '+' => Plus,
            '-' => Minus,
            '*' => Star,
            '/' => Slash,
            '<' => LessThan,
            '>' => GreaterThan,
            '(' => LParen,
            ')' => RParen,
            '{' => LBrace,
            '}' => RBrace,
            ';' => Semicolon,
            '!' => {
                if self.next_char_if('=') {
                    NotEqual
                } else {
                    Bang
                }
            }
            '=' => {
                if self.next_char_if('=') {
                    EqualEqual
                } else {
                    return Err(ScanErr::unexpected_char(c, start));
                }
            }
            '0'..='9' => {
                let mut digits = c.to_string();
                digits.push_str(&self.collect_while(|c| c.is_ascii_digit()));
                Int(digits)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut word = c.to_string();
                word.push_str(&self.collect_while(|c| c.is_ascii_alphanumeric() || c == '_'));
                match KEYWORDS.get(word.as_str()) {
                    Some(keyword) => keyword.clone(),
                    None => Ident(word),
                }
            }
            c => return Err(ScanErr::unexpected_char(c, start)),
        };

        let end = Location::new(self.location.line, self.location.col - 1);
        Ok(TokenWithLocation::new(token, start, end))
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.stream.next()?;
        if c == '\n' {
            self.location = Location::new(self.location.line + 1, 1);
        } else {
            self.location.col += 1;
        }
        Some(c)
    }

    /// Consume the next character if it's `expected`.
    fn next_char_if(&mut self, expected: char) -> bool {
        if self.stream.peek() == Some(&expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    fn collect_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut string = String::new();
        while let Some(&c) = self.stream.peek() {
            if !predicate(c) {
                break;
            }
            string.push(c);
            self.next_char();
        }
        string
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&c) = self.stream.peek() {
            if c == '#' {
                while !matches!(self.stream.peek(), Some('\n') | None) {
                    self.next_char();
                }
            } else if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = ScanResult;

    /// Yields tokens through `EndOfInput` or the first error, then
    /// stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        if matches!(&result, Ok(TokenWithLocation { token: Token::EndOfInput, .. }) | Err(_))
        {
            self.done = true;
        }
        Some(result)
    }
}
