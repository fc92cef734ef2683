use crate::diagnostics::{ErrorCode, ParseError, ParseResult};
use crate::sql::literals::{self, LexFault, ScanResult};
use crate::sql::{token::Position, token::Token, token_kind::TokenKind};
use crate::trace;

/// Symbolic operators, longest first so that matching is greedy.
const OPERATORS: [&str; 21] = [
    "->>", "||", "->", "<<", "<=", "<>", ">>", ">=", "==", "!=", "*", "/", "%", "&", "-", "+",
    "~", "<", ">", "=", "|",
];

/// Operators that may also prefix an operand.
const UNARY_OPERATORS: [&str; 3] = ["-", "+", "~"];

/// Keyword operators, only recognized when followed by whitespace.
const WORD_OPERATORS: [&str; 2] = ["and", "or"];

const PUNCTUATION: [char; 4] = [',', '(', ')', ';'];

/// SQL tokenizer producing a flat, position-tracked stream of `Token`s.
///
/// Behavior:
/// - Skips whitespace and `--` / `/* */` comments, tracking line and column.
/// - Emits `, ( ) ;` and a bare `.` (one not starting a number) as one-character
///   `Other` tokens.
/// - Reads `[...]`, `"..."` and `` `...` `` identifiers verbatim, quotes included.
/// - Reads string, blob and numeric literals through `literals`.
/// - Matches operators greedily; `AND` / `OR` followed by whitespace become
///   binary operators.
/// - Everything else up to the next delimiter becomes one `Other` token with
///   its case preserved.
///
/// Either the whole input is consumed or the first malformed construct is
/// reported with the position of the offending character.
pub fn tokenize(sql: &str) -> ParseResult<Vec<Token>> {
    let tokens = Tokenizer::new(sql).run()?;
    trace!("Tokenized {} characters into {} tokens", sql.chars().count(), tokens.len());
    Ok(tokens)
}

struct Tokenizer {
    chars: Vec<char>,
    line_starts: Vec<usize>,
    pos: usize,
    tokens: Vec<Token>,
}

impl Tokenizer {
    fn new(sql: &str) -> Self {
        let chars: Vec<char> = sql.chars().collect();
        let line_starts = std::iter::once(0)
            .chain(
                chars
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| **c == '\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();
        Self {
            chars,
            line_starts,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn position(&self, absolute: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= absolute) - 1;
        Position::new(absolute, line, absolute - self.line_starts[line])
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn fault(&self, fault: LexFault) -> ParseError {
        ParseError::at_position(fault.code, fault.message, self.position(fault.at))
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        let token = Token::new(self.text(start, end), kind, self.position(start));
        self.tokens.push(token);
        self.pos = end;
    }

    fn scan(&mut self, kind: TokenKind, result: ScanResult) -> ParseResult<()> {
        let start = self.pos;
        let end = result.map_err(|f| self.fault(f))?;
        self.push(kind, start, end);
        Ok(())
    }

    fn run(mut self) -> ParseResult<Vec<Token>> {
        while let Some(c) = self.peek(0) {
            if c.is_whitespace() {
                self.pos += 1;
                continue;
            }
            if self.skip_comment()? {
                continue;
            }

            let start = self.pos;
            let next = self.peek(1);
            match c {
                c if PUNCTUATION.contains(&c) => self.push(TokenKind::Other, start, start + 1),
                '.' if !next.is_some_and(|n| n.is_ascii_digit()) => {
                    self.push(TokenKind::Other, start, start + 1)
                }
                '.' | '0'..='9' => {
                    let result = literals::scan_number(&self.chars, start);
                    self.scan(TokenKind::NumericLiteral, result)?
                }
                '\'' => {
                    let result = literals::scan_string(&self.chars, start);
                    self.scan(TokenKind::StringLiteral, result)?
                }
                'x' | 'X' if next == Some('\'') => {
                    let result = literals::scan_blob(&self.chars, start);
                    self.scan(TokenKind::BlobLiteral, result)?
                }
                '[' | '"' | '`' => {
                    let close = if c == '[' { ']' } else { c };
                    let result = literals::scan_quoted_identifier(&self.chars, start, close);
                    self.scan(TokenKind::Other, result)?
                }
                _ => {
                    if !self.operator() && !self.word_operator() {
                        self.word()?;
                    }
                }
            }
        }
        Ok(self.tokens)
    }

    /// Skip one comment; `Ok(true)` if something was skipped.
    fn skip_comment(&mut self) -> ParseResult<bool> {
        match (self.peek(0), self.peek(1)) {
            (Some('-'), Some('-')) => {
                while self.peek(0).is_some_and(|c| c != '\n') {
                    self.pos += 1;
                }
                Ok(true)
            }
            (Some('/'), Some('*')) => {
                let start = self.pos;
                self.pos += 2;
                loop {
                    match (self.peek(0), self.peek(1)) {
                        (Some('*'), Some('/')) => {
                            self.pos += 2;
                            return Ok(true);
                        }
                        (Some(_), _) => self.pos += 1,
                        (None, _) => {
                            return ParseError::at_position(
                                ErrorCode::UnterminatedComment,
                                "Unterminated block comment",
                                self.position(start),
                            )
                            .err();
                        }
                    }
                }
            }
            _ => Ok(false),
        }
    }

    fn operator(&mut self) -> bool {
        let rest = &self.chars[self.pos..];
        let Some(op) = OPERATORS.iter().find(|op| {
            op.chars().count() <= rest.len() && op.chars().zip(rest).all(|(a, b)| a == *b)
        }) else {
            return false;
        };
        let token = Token::operator(
            *op,
            self.position(self.pos),
            *op != "~",
            UNARY_OPERATORS.contains(op),
        );
        self.tokens.push(token);
        self.pos += op.chars().count();
        true
    }

    fn word_operator(&mut self) -> bool {
        for word in WORD_OPERATORS {
            let len = word.len();
            let Some(candidate) = self.chars.get(self.pos..self.pos + len) else {
                continue;
            };
            let matches = candidate
                .iter()
                .zip(word.chars())
                .all(|(c, w)| c.to_ascii_lowercase() == w);
            if matches && self.peek(len).is_some_and(char::is_whitespace) {
                let value = self.text(self.pos, self.pos + len);
                self.tokens
                    .push(Token::operator(value, self.position(self.pos), true, false));
                self.pos += len;
                return true;
            }
        }
        false
    }

    fn word(&mut self) -> ParseResult<()> {
        let start = self.pos;
        let end = self.chars[start..]
            .iter()
            .position(|&c| is_delimiter(c))
            .map_or(self.chars.len(), |offset| start + offset);
        if end == start {
            return ParseError::at_position(
                ErrorCode::UnexpectedCharacter,
                format!("Unexpected character '{}'", self.chars[start]),
                self.position(start),
            )
            .err();
        }
        self.push(TokenKind::Other, start, end);
        Ok(())
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace()
        || PUNCTUATION.contains(&c)
        || matches!(
            c,
            '.' | '\'' | '"' | '`' | '[' | '|' | '-' | '<' | '>' | '=' | '!' | '*' | '/' | '%'
                | '&' | '+' | '~'
        )
}
