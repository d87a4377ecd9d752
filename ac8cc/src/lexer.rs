use crate::token::{Token, TokenKind};
use std::iter::Peekable;
use std::str::CharIndices;

pub struct Lexer<'a> {
    iter: Peekable<CharIndices<'a>>,
    len: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            iter: code.char_indices().peekable(),
            len: code.len(),
        }
    }

    /// Tokenize the whole input, excluding the trailing End token.
    pub fn tokenize(code: &'a str) -> Vec<Token> {
        let mut lexer = Lexer::new(code);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::End {
                return tokens;
            }
            tokens.push(token);
        }
    }

    /// Consume whitespace and return the next token. Newlines are pure
    /// separators. At end of input this keeps yielding the End token.
    pub fn next_token(&mut self) -> Token {
        while self.iter.next_if(|(_, ch)| ch.is_whitespace()).is_some() {}

        let Some(&(offset, ch0)) = self.iter.peek() else {
            return Token::new(TokenKind::End, "", self.len);
        };

        // 1. Single character token
        if let Some(kind) = single_char_token(ch0) {
            self.iter.next();
            return Token::new(kind, ch0.to_string(), offset);
        }

        // 2. Number literal: maximal run of digits
        if ch0.is_ascii_digit() {
            let lexeme = self.take_while(|ch| ch.is_ascii_digit());
            return Token::new(TokenKind::Number, lexeme, offset);
        }

        // 3. Identifier or keyword
        if ch0.is_ascii_alphabetic() || ch0 == '_' {
            let lexeme = self.take_while(|ch| ch.is_ascii_alphanumeric() || ch == '_');
            let kind = keyword(&lexeme).unwrap_or(TokenKind::Ident);
            return Token::new(kind, lexeme, offset);
        }

        // Unrecognized character: fail-soft, the caller skips it
        self.iter.next();
        Token::new(TokenKind::Unknown, ch0.to_string(), offset)
    }

    fn take_while<F: Fn(char) -> bool>(&mut self, cond: F) -> String {
        let mut lexeme = String::new();
        while let Some((_, ch)) = self.iter.next_if(|&(_, ch)| cond(ch)) {
            lexeme.push(ch);
        }
        lexeme
    }
}

fn single_char_token(ch: char) -> Option<TokenKind> {
    match ch {
        '+' => Some(TokenKind::Plus),
        '-' => Some(TokenKind::Minus),
        '*' => Some(TokenKind::Star),
        '/' => Some(TokenKind::Slash),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '=' => Some(TokenKind::Equal),
        ':' => Some(TokenKind::Colon),
        '"' => Some(TokenKind::Quote),
        _ => None,
    }
}

fn keyword(s: &str) -> Option<TokenKind> {
    match s {
        "PROGRAM" => Some(TokenKind::KwProgram),
        "BEGIN" => Some(TokenKind::KwBegin),
        "END" => Some(TokenKind::KwEnd),
        "RES" => Some(TokenKind::KwRes),
        _ => None,
    }
}
