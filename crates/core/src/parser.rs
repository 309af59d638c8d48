// SPDX-License-Identifier: MIT

//! Recursive-descent parser for rule conditions
//!
//! Grammar:
//!
//! ```text
//! condition  := "(" condition boolop condition ")" | expression
//! expression := field operator value
//! ```
//!
//! Joins are strictly binary and require enclosing parentheses; there is
//! no operator precedence. Field, operator, and boolean-operator tokens
//! are matched case-sensitively against their enumerations.

use crate::condition::{BoolOperator, Condition, Field, Operator};
use crate::tokenizer::Tokenizer;
use thiserror::Error;

/// Errors that can occur while parsing a condition string.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("condition must begin with a field name")]
    ExpectedField,
    #[error("expected operator after field name")]
    ExpectedOperator,
    #[error("expected value after operator")]
    ExpectedValue,
    #[error("expected boolean operator")]
    ExpectedBoolOperator,
    #[error("incoherent parentheses")]
    IncoherentParens,
    #[error("expected end of condition, got [{0}]")]
    TrailingTokens(String),
}

/// Single-pass parser holding one token of lookahead.
pub(crate) struct Parser<'a> {
    tokens: Tokenizer<'a>,
    current: Option<String>,
    next: Option<String>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: Tokenizer<'a>) -> Self {
        let mut parser = Parser {
            tokens,
            current: None,
            next: None,
        };
        parser.advance();
        parser
    }

    fn advance(&mut self) {
        self.current = self.next.take();
        self.next = self.tokens.next();
    }

    fn accept_paren_open(&mut self) -> bool {
        if self.next.as_deref() == Some("(") {
            self.advance();
            return true;
        }
        false
    }

    fn accept_paren_close(&mut self) -> bool {
        if self.next.as_deref() == Some(")") {
            self.advance();
            return true;
        }
        false
    }

    fn accept_field(&mut self) -> Option<Field> {
        let field = self.next.as_deref().and_then(Field::from_token)?;
        self.advance();
        Some(field)
    }

    fn accept_operator(&mut self) -> Option<Operator> {
        let op = self.next.as_deref().and_then(Operator::from_token)?;
        self.advance();
        Some(op)
    }

    fn accept_bool_op(&mut self) -> Option<BoolOperator> {
        let op = self.next.as_deref().and_then(BoolOperator::from_token)?;
        self.advance();
        Some(op)
    }

    fn accept_value(&mut self) -> Option<String> {
        self.next.as_ref()?;
        self.advance();
        self.current.clone()
    }

    fn parse_expression(&mut self) -> Result<Condition, ParseError> {
        let field = self.accept_field().ok_or(ParseError::ExpectedField)?;
        let op = self.accept_operator().ok_or(ParseError::ExpectedOperator)?;
        let value = self.accept_value().ok_or(ParseError::ExpectedValue)?;
        Ok(Condition::Compare { field, op, value })
    }

    fn parse_condition(&mut self) -> Result<Condition, ParseError> {
        if !self.accept_paren_open() {
            return self.parse_expression();
        }

        let left = self.parse_condition()?;
        let op = self
            .accept_bool_op()
            .ok_or(ParseError::ExpectedBoolOperator)?;
        let right = self.parse_condition()?;

        if !self.accept_paren_close() {
            return Err(ParseError::IncoherentParens);
        }

        Ok(Condition::Join {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// Parse the full token stream into one condition.
    ///
    /// Trailing tokens after the top-level condition are an error.
    pub(crate) fn parse(mut self) -> Result<Condition, ParseError> {
        let condition = self.parse_condition()?;
        match self.next {
            None => Ok(condition),
            Some(trailing) => Err(ParseError::TrailingTokens(trailing)),
        }
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
