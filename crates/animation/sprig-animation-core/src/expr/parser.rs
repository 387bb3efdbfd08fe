use crate::expr::ast::{BinaryOp, Expr, Function, UnaryOp};
use crate::expr::error::FormulaError;
use crate::expr::lexer::{lex, Span, Token, TokenKind};

pub(crate) fn parse_expr(src: &str) -> Result<Expr, FormulaError> {
    let tokens = lex(src.trim())?;
    let mut p = Parser { tokens, pos: 0 };
    let expr = p.parse_term()?;
    p.expect(TokenKind::Eof)?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> &Token {
        let t = &self.tokens[self.pos];
        self.pos += 1;
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), FormulaError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(FormulaError::new(
                self.span().start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_term(&mut self) -> Result<Expr, FormulaError> {
        let mut e = self.parse_factor()?;
        loop {
            if self.consume(TokenKind::Plus) {
                let r = self.parse_factor()?;
                e = Expr::Binary {
                    op: BinaryOp::Add,
                    left: Box::new(e),
                    right: Box::new(r),
                };
            } else if self.consume(TokenKind::Minus) {
                let r = self.parse_factor()?;
                e = Expr::Binary {
                    op: BinaryOp::Sub,
                    left: Box::new(e),
                    right: Box::new(r),
                };
            } else {
                break;
            }
        }
        Ok(e)
    }

    fn parse_factor(&mut self) -> Result<Expr, FormulaError> {
        let mut e = self.parse_unary()?;
        loop {
            if self.consume(TokenKind::Star) {
                let r = self.parse_unary()?;
                e = Expr::Binary {
                    op: BinaryOp::Mul,
                    left: Box::new(e),
                    right: Box::new(r),
                };
            } else if self.consume(TokenKind::Slash) {
                let r = self.parse_unary()?;
                e = Expr::Binary {
                    op: BinaryOp::Div,
                    left: Box::new(e),
                    right: Box::new(r),
                };
            } else if self.consume(TokenKind::Percent) {
                let r = self.parse_unary()?;
                e = Expr::Binary {
                    op: BinaryOp::Rem,
                    left: Box::new(e),
                    right: Box::new(r),
                };
            } else {
                break;
            }
        }
        Ok(e)
    }

    fn parse_unary(&mut self) -> Result<Expr, FormulaError> {
        if self.consume(TokenKind::Minus) {
            let e = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Neg,
                expr: Box::new(e),
            });
        }
        self.parse_primary()
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, FormulaError> {
        let mut args = Vec::new();
        if self.consume(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_term()?);
            if self.consume(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RParen)?;
            return Ok(args);
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, FormulaError> {
        let t = self.bump().clone();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Lit(v)),
            TokenKind::Ident(s) => {
                if self.consume(TokenKind::LParen) {
                    let func = Function::from_name(&s).ok_or_else(|| {
                        FormulaError::new(t.span.start, format!("unknown function '{s}'"))
                    })?;
                    let args = self.parse_args()?;
                    if args.len() != func.arity() {
                        return Err(FormulaError::new(
                            t.span.start,
                            format!(
                                "{} takes {} argument(s), got {}",
                                func.name(),
                                func.arity(),
                                args.len()
                            ),
                        ));
                    }
                    return Ok(Expr::Call { func, args });
                }
                if s == "time" {
                    Ok(Expr::Time)
                } else {
                    Err(FormulaError::new(
                        t.span.start,
                        format!("unknown identifier '{s}' (only 'time' is available)"),
                    ))
                }
            }
            TokenKind::LParen => {
                let e = self.parse_term()?;
                self.expect(TokenKind::RParen)?;
                Ok(e)
            }
            other => Err(FormulaError::new(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_arithmetic_precedence() {
        let e = parse_expr("1+2*3").unwrap();
        match e {
            Expr::Binary {
                op: BinaryOp::Add, ..
            } => {}
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn parses_calls() {
        let e = parse_expr("min(1,2)").unwrap();
        match e {
            Expr::Call { func, args } => {
                assert_eq!(func, Function::Min);
                assert_eq!(args.len(), 2);
            }
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_identifiers() {
        let err = parse_expr("speed * 2").unwrap_err();
        assert!(err.message.contains("unknown identifier"));
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn rejects_bad_arity() {
        let err = parse_expr("sin(1, 2)").unwrap_err();
        assert!(err.message.contains("argument"));
    }
}
