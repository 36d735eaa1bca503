use std::iter::Peekable;
use std::vec::IntoIter;

use simian_util::source::Location;

use crate::ast;
use crate::scanner::{Scanner, Token, TokenWithLocation};

use super::precedence::{get_infix_precedence, Precedence};
use super::result::{ParseErr, ParseResult};

/// Scan the specified text into tokens, parse the tokens, and return
/// the resulting AST or error.
pub fn parse_text(text: &str) -> ParseResult {
    let tokens = Scanner::new(text).scan_all()?;
    let mut parser = Parser::new(tokens);
    parser.parse()
}

/// Pratt parser over a fully scanned token list. The list is expected
/// to end with `EndOfInput`, which `Scanner::scan_all` guarantees.
pub struct Parser {
    tokens: Peekable<IntoIter<TokenWithLocation>>,
    /// End location of the most recently consumed token.
    prev_end: Location,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithLocation>) -> Self {
        Self { tokens: tokens.into_iter().peekable(), prev_end: Location::default() }
    }

    pub fn parse(&mut self) -> ParseResult {
        log::trace!("BEGIN: parse");
        let statements = self.statements(&Token::EndOfInput)?;
        log::trace!("END: parse");
        Ok(ast::Program::new(statements))
    }

    // Tokens ----------------------------------------------------------

    fn next_token(&mut self) -> TokenWithLocation {
        match self.tokens.next() {
            Some(token) => {
                self.prev_end = token.end;
                token
            }
            None => TokenWithLocation::new(Token::EndOfInput, self.prev_end, self.prev_end),
        }
    }

    fn peek_token(&mut self) -> &Token {
        match self.tokens.peek() {
            Some(token) => &token.token,
            None => &Token::EndOfInput,
        }
    }

    fn next_token_is(&mut self, token: &Token) -> bool {
        if self.peek_token() == token {
            self.next_token();
            true
        } else {
            false
        }
    }

    fn expect_token(&mut self, expected: Token) -> Result<TokenWithLocation, ParseErr> {
        let token = self.next_token();
        if token.token == expected {
            Ok(token)
        } else {
            Err(ParseErr::expected_token(expected, token))
        }
    }

    // Grammar ---------------------------------------------------------

    /// Parse statements up to (but not including) `terminator`.
    fn statements(&mut self, terminator: &Token) -> Result<Vec<ast::Statement>, ParseErr> {
        let mut statements = vec![];
        loop {
            while self.next_token_is(&Token::Semicolon) {}
            if self.peek_token() == terminator {
                break Ok(statements);
            }
            if self.peek_token() == &Token::EndOfInput {
                let found = self.next_token();
                break Err(ParseErr::expected_token(terminator.clone(), found));
            }
            let expr = self.expr(Precedence::Lowest)?;
            let start = expr.start;
            let mut end = expr.end;
            if self.next_token_is(&Token::Semicolon) {
                end = self.prev_end;
            }
            statements.push(ast::Statement::new_expr(expr, start, end));
        }
    }

    fn block(&mut self) -> Result<ast::Block, ParseErr> {
        let start = self.expect_token(Token::LBrace)?.start;
        let statements = self.statements(&Token::RBrace)?;
        let end = self.expect_token(Token::RBrace)?.end;
        Ok(ast::Block::new(statements, start, end))
    }

    fn expr(&mut self, precedence: Precedence) -> Result<ast::Expr, ParseErr> {
        let mut expr = self.prefix_expr()?;

        // Keep folding infix operations into the LHS while the next
        // operator binds tighter than the current level.
        loop {
            let infix_precedence = get_infix_precedence(self.peek_token());
            if infix_precedence <= precedence {
                break Ok(expr);
            }
            let op_token = self.next_token();
            let rhs = self.expr(infix_precedence)?;
            let (start, end) = (expr.start, rhs.end);
            expr = ast::Expr::new_infix(expr, op_token.token.as_str(), rhs, start, end);
        }
    }

    /// Parse a leaf, a grouped expression, a prefix operation, or an
    /// if expression.
    fn prefix_expr(&mut self) -> Result<ast::Expr, ParseErr> {
        let token = self.next_token();
        let TokenWithLocation { start, end, .. } = token;
        let expr = match token.token {
            Token::Int(digits) => match digits.parse::<i64>() {
                Ok(value) => ast::Expr::new_int(value, start, end),
                Err(_) => return Err(ParseErr::int_out_of_range(digits, start)),
            },
            Token::True => ast::Expr::new_bool(true, start, end),
            Token::False => ast::Expr::new_bool(false, start, end),
            Token::Minus | Token::Bang => {
                let operand = self.expr(Precedence::Prefix)?;
                let end = operand.end;
                ast::Expr::new_prefix(token.token.as_str(), operand, start, end)
            }
            Token::LParen => {
                let mut expr = self.expr(Precedence::Lowest)?;
                expr.end = self.expect_token(Token::RParen)?.end;
                expr.start = start;
                expr
            }
            Token::If => self.if_expr(start)?,
            Token::EndOfInput | Token::RBrace | Token::Semicolon => {
                return Err(ParseErr::expected_expr(start));
            }
            _ => return Err(ParseErr::unexpected_token(token)),
        };
        Ok(expr)
    }

    /// Parse the rest of an if expression after the `if` keyword.
    fn if_expr(&mut self, start: Location) -> Result<ast::Expr, ParseErr> {
        let condition = self.expr(Precedence::Lowest)?;
        let consequence = self.block()?;
        let alternative =
            if self.next_token_is(&Token::Else) { Some(self.block()?) } else { None };
        let end = match &alternative {
            Some(block) => block.end,
            None => consequence.end,
        };
        Ok(ast::Expr::new_if(condition, consequence, alternative, start, end))
    }
}
