//! Recursive-descent parser
//!
//! Precedence, lowest first:
//!
//! ```text
//! ternary     c ? a : b          (right)
//! ||  &&
//! == != < <= > >=
//! |   ^   &
//! << >>
//! +  -
//! *  /  %
//! **                             (right)
//! prefix - + ! ~
//! literal | ( ternary )
//! ```

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ParseError;
use crate::eval::Limits;
use crate::lexer::{Token, TokenKind, tokenize};
use crate::value::Value;

/// Left-associative binary levels, lowest precedence first.
const BINARY_LEVELS: &[&[BinaryOp]] = &[
    &[BinaryOp::Or],
    &[BinaryOp::And],
    &[
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::Lt,
        BinaryOp::Le,
        BinaryOp::Gt,
        BinaryOp::Ge,
    ],
    &[BinaryOp::BitOr],
    &[BinaryOp::BitXor],
    &[BinaryOp::BitAnd],
    &[BinaryOp::Shl, BinaryOp::Shr],
    &[BinaryOp::Add, BinaryOp::Sub],
    &[BinaryOp::Mul, BinaryOp::Div, BinaryOp::Rem],
];

/// Parse `input` into an expression tree, enforcing `limits`.
pub fn parse(input: &str, limits: &Limits) -> Result<Expr, ParseError> {
    if input.len() > limits.max_length {
        return Err(ParseError::TooLong {
            max: limits.max_length,
        });
    }
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        max_depth: limits.max_depth,
    };

    let expr = parser.ternary()?;
    if let Some(token) = parser.peek() {
        return Err(ParseError::UnexpectedToken {
            found: token.kind.to_string(),
            pos: token.pos,
        });
    }
    Ok(expr)
}

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Rem,
        TokenKind::StarStar => BinaryOp::Pow,
        TokenKind::Amp => BinaryOp::BitAnd,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Shl => BinaryOp::Shl,
        TokenKind::Shr => BinaryOp::Shr,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::Ne,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::Le => BinaryOp::Le,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::Ge => BinaryOp::Ge,
        TokenKind::AmpAmp => BinaryOp::And,
        TokenKind::PipePipe => BinaryOp::Or,
        _ => return None,
    };
    Some(op)
}

fn unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Bang => Some(UnaryOp::Not),
        TokenKind::Tilde => Some(UnaryOp::BitNot),
        _ => None,
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Run `f` one nesting level deeper; bounds recursion on hostile input.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::TooDeep {
                max: self.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn unexpected(token: Option<Token>) -> ParseError {
        match token {
            Some(token) => ParseError::UnexpectedToken {
                found: token.kind.to_string(),
                pos: token.pos,
            },
            None => ParseError::UnexpectedEnd,
        }
    }

    fn ternary(&mut self) -> Result<Expr, ParseError> {
        let condition = self.binary(0)?;
        if self.peek_kind() != Some(&TokenKind::Question) {
            return Ok(condition);
        }
        self.advance();

        let then = self.nested(Self::ternary)?;
        match self.advance() {
            Some(Token {
                kind: TokenKind::Colon,
                ..
            }) => {}
            other => return Err(Self::unexpected(other)),
        }
        let otherwise = self.nested(Self::ternary)?;

        Ok(Expr::Conditional {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn binary(&mut self, level: usize) -> Result<Expr, ParseError> {
        let Some(ops) = BINARY_LEVELS.get(level) else {
            return self.power();
        };

        let mut lhs = self.binary(level + 1)?;
        while let Some(op) = self
            .peek_kind()
            .and_then(binary_op)
            .filter(|op| ops.contains(op))
        {
            self.advance();
            let rhs = self.binary(level + 1)?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.unary()?;
        if self.peek_kind() != Some(&TokenKind::StarStar) {
            return Ok(base);
        }
        self.advance();
        let exponent = self.nested(Self::power)?;
        Ok(Expr::binary(BinaryOp::Pow, base, exponent))
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = self.peek_kind().and_then(unary_op) {
            self.advance();
            let operand = self.nested(Self::unary)?;
            return Ok(Expr::unary(op, operand));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.advance() else {
            return Err(ParseError::UnexpectedEnd);
        };

        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Literal(Value::Number(n))),
            TokenKind::Str(s) => Ok(Expr::Literal(Value::Text(s))),
            TokenKind::Ident(name) => match name.as_str() {
                "true" => Ok(Expr::Literal(Value::Bool(true))),
                "false" => Ok(Expr::Literal(Value::Bool(false))),
                _ => Err(ParseError::UnknownIdentifier {
                    name,
                    pos: token.pos,
                }),
            },
            TokenKind::LParen => {
                let inner = self.nested(Self::ternary)?;
                match self.advance() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(inner),
                    None => Err(ParseError::UnclosedParen { pos: token.pos }),
                    other => Err(Self::unexpected(other)),
                }
            }
            kind => Err(ParseError::UnexpectedToken {
                found: kind.to_string(),
                pos: token.pos,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(input: &str) -> Result<Expr, ParseError> {
        parse(input, &Limits::default())
    }

    fn num(n: f64) -> Expr {
        Expr::Literal(Value::Number(n))
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = parse_default("1 + 2 * 3").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                BinaryOp::Add,
                num(1.0),
                Expr::binary(BinaryOp::Mul, num(2.0), num(3.0))
            )
        );
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = parse_default("8 - 4 - 2").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                BinaryOp::Sub,
                Expr::binary(BinaryOp::Sub, num(8.0), num(4.0)),
                num(2.0)
            )
        );
    }

    #[test]
    fn power_is_right_associative() {
        let expr = parse_default("2 ** 3 ** 2").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                BinaryOp::Pow,
                num(2.0),
                Expr::binary(BinaryOp::Pow, num(3.0), num(2.0))
            )
        );
    }

    #[test]
    fn prefix_minus_binds_tighter_than_power() {
        let expr = parse_default("-2 ** 2").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                BinaryOp::Pow,
                Expr::unary(UnaryOp::Neg, num(2.0)),
                num(2.0)
            )
        );
    }

    #[test]
    fn ternary_nests_to_the_right() {
        let expr = parse_default("true ? 1 : false ? 2 : 3").unwrap();
        let Expr::Conditional { otherwise, .. } = &expr else {
            panic!("expected conditional");
        };
        assert!(matches!(**otherwise, Expr::Conditional { .. }));
    }

    #[test]
    fn trailing_operator_is_unexpected_end() {
        assert_eq!(parse_default("2+"), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn unclosed_paren_reports_its_position() {
        assert_eq!(
            parse_default("(2+3"),
            Err(ParseError::UnclosedParen { pos: 0 })
        );
    }

    #[test]
    fn stray_closing_paren_is_unexpected() {
        assert_eq!(
            parse_default("2+3)"),
            Err(ParseError::UnexpectedToken {
                found: ")".to_owned(),
                pos: 3
            })
        );
    }

    #[test]
    fn adjacent_operands_are_rejected() {
        assert!(matches!(
            parse_default("2 3"),
            Err(ParseError::UnexpectedToken { pos: 2, .. })
        ));
    }

    #[test]
    fn variables_are_rejected() {
        assert_eq!(
            parse_default("x + 1"),
            Err(ParseError::UnknownIdentifier {
                name: "x".to_owned(),
                pos: 0
            })
        );
        assert!(matches!(
            parse_default("sqrt(4)"),
            Err(ParseError::UnknownIdentifier { .. })
        ));
    }

    #[test]
    fn missing_colon_in_ternary() {
        assert_eq!(parse_default("true ? 1"), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(parse_default(""), Err(ParseError::Empty));
        assert_eq!(parse_default("   \t"), Err(ParseError::Empty));
    }

    #[test]
    fn length_limit_is_enforced_before_tokenizing() {
        let limits = Limits {
            max_length: 5,
            max_depth: 8,
        };
        assert_eq!(
            parse("1+1+1+1", &limits),
            Err(ParseError::TooLong { max: 5 })
        );
    }

    #[test]
    fn depth_limit_is_enforced() {
        let limits = Limits {
            max_length: 1024,
            max_depth: 4,
        };
        assert!(parse("((((1))))", &limits).is_ok());
        assert_eq!(
            parse("((((((1))))))", &limits),
            Err(ParseError::TooDeep { max: 4 })
        );
        assert_eq!(
            parse("------1", &limits),
            Err(ParseError::TooDeep { max: 4 })
        );
    }
}
