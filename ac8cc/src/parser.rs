use crate::codegen::Codegen;
use crate::error::Error;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Recursive descent over a single-token lookahead. Each grammar rule emits
/// code as it is recognized and returns the temporary address holding its
/// value. On a grammar mismatch the error is recorded, the cursor advances
/// one token, and parsing continues so one pass surfaces every diagnostic;
/// resource exhaustion aborts instead.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    gen: Codegen,
    name: Option<String>,
    result_addr: Option<u8>,
    errors: Vec<Error>,
}

type Parsed = (Option<String>, Option<u8>, Codegen, Vec<Error>);

impl<'a> Parser<'a> {
    pub fn new(code: &'a str) -> Self {
        let mut lexer = Lexer::new(code);
        let current = next_valid(&mut lexer);
        Parser {
            lexer,
            current,
            gen: Codegen::new(),
            name: None,
            result_addr: None,
            errors: Vec::new(),
        }
    }

    pub fn parse(mut self) -> Result<Parsed, Error> {
        self.parse_module()?;
        Ok((self.name, self.result_addr, self.gen, self.errors))
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    fn advance(&mut self) {
        self.current = next_valid(&mut self.lexer);
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn expect(&mut self, kind: TokenKind, what: &'static str) -> Result<Token, Error> {
        if self.current.kind == kind {
            let token = self.current.clone();
            self.advance();
            Ok(token)
        } else if self.current.kind == TokenKind::End {
            Err(Error::UnexpectedEnd(what))
        } else {
            Err(Error::Unexpected(
                what,
                self.current.text.clone(),
                self.current.offset,
            ))
        }
    }

    /// Record a recoverable error and advance one token; fatal errors
    /// propagate. The End token is never consumed, so recovery terminates.
    fn sync(&mut self, err: Error) -> Result<(), Error> {
        if err.is_fatal() {
            return Err(err);
        }
        self.errors.push(err);
        if self.current.kind != TokenKind::End {
            self.advance();
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Grammar
    // ------------------------------------------------------------------

    /// module = "PROGRAM" '"' ident '"' ":" "BEGIN" { assignment } [ result ] "END"
    fn parse_module(&mut self) -> Result<(), Error> {
        if let Err(e) = self.parse_header() {
            self.sync(e)?;
        }

        loop {
            match self.current.kind {
                TokenKind::KwRes | TokenKind::KwEnd | TokenKind::End => break,
                TokenKind::Ident => {
                    if let Err(e) = self.parse_assignment() {
                        self.sync(e)?;
                    }
                }
                _ => {
                    let e = Error::Unexpected(
                        "variable assignment",
                        self.current.text.clone(),
                        self.current.offset,
                    );
                    self.sync(e)?;
                }
            }
        }

        if self.check(TokenKind::KwRes) {
            if let Err(e) = self.parse_result() {
                self.sync(e)?;
            }
        }

        if let Err(e) = self.expect(TokenKind::KwEnd, "`END`") {
            self.sync(e)?;
        }
        Ok(())
    }

    fn parse_header(&mut self) -> Result<(), Error> {
        self.expect(TokenKind::KwProgram, "`PROGRAM`")?;
        self.expect(TokenKind::Quote, "`\"` before program name")?;
        let name = self.expect(TokenKind::Ident, "program name")?;
        self.name = Some(name.text);
        self.expect(TokenKind::Quote, "`\"` after program name")?;
        self.expect(TokenKind::Colon, "`:` after program name")?;
        self.expect(TokenKind::KwBegin, "`BEGIN`")?;
        Ok(())
    }

    /// assignment = ident "=" expr
    fn parse_assignment(&mut self) -> Result<(), Error> {
        let name = self.expect(TokenKind::Ident, "variable name")?;
        self.expect(TokenKind::Equal, "`=` in assignment")?;
        let expr = self.parse_expr()?;
        let addr = self.gen.symbols.define(&name.text, 0, true)?;
        self.gen.load(expr)?;
        self.gen.store(addr)?;
        Ok(())
    }

    /// result = "RES" "=" expr; the final value is left in the accumulator.
    fn parse_result(&mut self) -> Result<(), Error> {
        self.expect(TokenKind::KwRes, "`RES`")?;
        self.expect(TokenKind::Equal, "`=` after RES")?;
        let addr = self.parse_expr()?;
        self.gen.load(addr)?;
        self.result_addr = Some(addr);
        Ok(())
    }

    /// expr = term { ("+" | "-") term }
    fn parse_expr(&mut self) -> Result<u8, Error> {
        let mut left = self.parse_term()?;
        while self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            let op = self.current.kind;
            self.advance();
            let right = self.parse_term()?;
            let into = self.gen.symbols.alloc_temp()?;
            match op {
                TokenKind::Plus => self.gen.emit_add(left, right, into)?,
                _ => self.gen.emit_sub(left, right, into)?,
            }
            left = into;
        }
        Ok(left)
    }

    /// term = factor { ("*" | "/") factor }
    fn parse_term(&mut self) -> Result<u8, Error> {
        let mut left = self.parse_factor()?;
        while self.check(TokenKind::Star) || self.check(TokenKind::Slash) {
            let op = self.current.kind;
            self.advance();
            let right = self.parse_factor()?;
            let into = self.gen.symbols.alloc_temp()?;
            match op {
                TokenKind::Star => self.gen.emit_mul(left, right, into)?,
                _ => self.gen.emit_div(left, right, into)?,
            }
            left = into;
        }
        Ok(left)
    }

    /// factor = number | ident | "(" expr ")" | "-" factor
    ///
    /// Literals and variables are copied into a fresh temporary so the
    /// symbol's own cell is never clobbered by intermediate computation.
    fn parse_factor(&mut self) -> Result<u8, Error> {
        match self.current.kind {
            TokenKind::Number => {
                let value = parse_number(&self.current.text);
                self.advance();
                let sym = self.gen.symbols.intern_const(value)?;
                let into = self.gen.symbols.alloc_temp()?;
                self.gen.load(sym)?;
                self.gen.store(into)?;
                Ok(into)
            }
            TokenKind::Ident => {
                let name = self.current.text.clone();
                self.advance();
                let sym = self.gen.symbols.define(&name, 0, false)?;
                let into = self.gen.symbols.alloc_temp()?;
                self.gen.load(sym)?;
                self.gen.store(into)?;
                Ok(into)
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen, "`)`")?;
                let into = self.gen.symbols.alloc_temp()?;
                self.gen.load(expr)?;
                self.gen.store(into)?;
                Ok(into)
            }
            TokenKind::Minus => {
                self.advance();
                let operand = self.parse_factor()?;
                let into = self.gen.symbols.alloc_temp()?;
                self.gen.emit_neg(operand, into)?;
                Ok(into)
            }
            TokenKind::End => Err(Error::UnexpectedEnd("a factor")),
            _ => Err(Error::Unexpected(
                "a factor",
                self.current.text.clone(),
                self.current.offset,
            )),
        }
    }
}

/// Values wrap modulo 256, matching the machine's cells.
fn parse_number(text: &str) -> u8 {
    let mut value = 0u8;
    for digit in text.bytes() {
        value = value.wrapping_mul(10).wrapping_add(digit - b'0');
    }
    value
}

fn next_valid(lexer: &mut Lexer) -> Token {
    loop {
        let token = lexer.next_token();
        if token.kind != TokenKind::Unknown {
            return token;
        }
    }
}
