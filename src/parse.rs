// SPDX: CC0-1.0

// precedence climbing over the operator table in `eval` (see
// https://en.wikipedia.org/wiki/Operator-precedence_parser#Precedence_climbing_method)

use crate::{
    eval::{Associativity, Expr, OperatorTyp},
    lex::{LexErr, LexErrTyp, SubStr, Tok, TokTyp},
    stdlib::{self, Ident, Y},
    Number,
};
use core::num::ParseFloatError;
use std::sync::Arc;

/// Deepest nesting of parentheses, calls and unary operators accepted.
pub const MAX_DEPTH: usize = 64;

/// Longest token sequence accepted, which also bounds the size of the tree.
pub const MAX_TOKENS: usize = 1024;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseErrTyp {
    #[error("{0}")]
    LexErr(LexErrTyp),
    #[error("invalid number: {0}")]
    ParseNum(ParseFloatError),
    #[error("mismatched parentheses")]
    ParenMismatch,
    #[error("empty expression")]
    Empty,
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected token")]
    Unexpected,
    #[error("expected an operator")]
    MissingOperator,
    #[error("undefined identifier '{0}'")]
    UndefinedIdent(String),
    #[error("function '{0}' must be called with parentheses")]
    NotCalled(&'static str),
    #[error(
        "function '{name}' requires {arity} argument{}, but found {found}",
        plural(.arity)
    )]
    Arity {
        name: &'static str,
        arity: usize,
        found: usize,
    },
    #[error("expression is nested more than {MAX_DEPTH} levels deep")]
    TooDeep,
    #[error("expression is longer than {MAX_TOKENS} tokens")]
    TooLong,
}

const fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        ""
    } else {
        "s"
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{typ}")]
pub struct ParseErr {
    pub typ: ParseErrTyp,
    pub loc: SubStr,
}

impl From<LexErr> for ParseErr {
    fn from(err: LexErr) -> Self {
        Self {
            typ: ParseErrTyp::LexErr(err.typ),
            loc: err.loc,
        }
    }
}

impl ParseErr {
    pub fn note(&self) -> Option<String> {
        match &self.typ {
            ParseErrTyp::MissingOperator => Some(String::from(
                "implicit multiplication is not supported, so for example '5x' would be '5*x'",
            )),
            ParseErrTyp::UndefinedIdent(name) if name == Y => Some(String::from(
                "'y' may only appear alone on one side of '='",
            )),
            ParseErrTyp::UndefinedIdent(name) => stdlib::most_similar(name)
                .map(|(key, ident)| format!("{} '{key}' has a similar name", ident.kind())),
            _ => None,
        }
    }

    /// Multi-line diagnostic: source, caret underline, message and note.
    pub fn report(&self) -> String {
        let mut out = format!("{}\nparse error: {self}", self.loc.underline());
        if let Some(note) = self.note() {
            out.push_str("\nnote: ");
            out.push_str(&note);
        }
        out
    }
}

#[derive(Debug)]
struct Parser<'t> {
    toks: &'t [Tok],
    pos: usize,
    depth: usize,
    end: SubStr,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Tok> {
        self.toks.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'t Tok> {
        let tok = self.toks.get(self.pos)?;
        self.pos += 1;
        Some(tok)
    }

    fn err(typ: ParseErrTyp, loc: &SubStr) -> ParseErr {
        ParseErr {
            typ,
            loc: loc.clone(),
        }
    }

    fn unexpected_end(&self) -> ParseErr {
        Self::err(ParseErrTyp::UnexpectedEnd, &self.end)
    }

    /// Error for a token that may not follow a complete operand.
    fn trailing(tok: &Tok) -> ParseErr {
        let typ = match tok.typ {
            TokTyp::Ident | TokTyp::Number | TokTyp::OpenParen => ParseErrTyp::MissingOperator,
            TokTyp::CloseParen => ParseErrTyp::ParenMismatch,
            _ => ParseErrTyp::Unexpected,
        };
        Self::err(typ, &tok.loc)
    }

    fn expr(&mut self, min_prec: i8) -> Result<Expr, ParseErr> {
        if self.depth >= MAX_DEPTH {
            let loc = self.peek().map_or(&self.end, |tok| &tok.loc);
            return Err(Self::err(ParseErrTyp::TooDeep, loc));
        }
        self.depth += 1;

        let mut lhs = self.prefix()?;
        while let Some(tok) = self.peek() {
            let op = match tok.typ {
                TokTyp::Op(op) if op != OperatorTyp::Neg && op.precedence() >= min_prec => op,
                _ => break,
            };
            self.bump();
            let next_min = match op.associativity() {
                Associativity::Left => op.precedence() + 1,
                Associativity::Right => op.precedence(),
            };
            let rhs = self.expr(next_min)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }

        self.depth -= 1;
        Ok(lhs)
    }

    fn prefix(&mut self) -> Result<Expr, ParseErr> {
        let tok = self.bump().ok_or_else(|| self.unexpected_end())?;
        match tok.typ {
            TokTyp::Op(OperatorTyp::Sub | OperatorTyp::Neg) => Ok(Expr::Neg(Box::new(
                self.expr(OperatorTyp::Neg.precedence())?,
            ))),
            TokTyp::Op(OperatorTyp::Add) => self.expr(OperatorTyp::Neg.precedence()),

            TokTyp::Number => match tok.loc.get().parse::<Number>() {
                Ok(val) => Ok(Expr::Val(val)),
                Err(err) => Err(Self::err(ParseErrTyp::ParseNum(err), &tok.loc)),
            },

            TokTyp::Ident => match stdlib::lookup(tok.loc.get()) {
                Some(Ident::Var) => Ok(Expr::Var),
                Some(Ident::Const(val)) => Ok(Expr::Val(val)),
                Some(Ident::Fun(fun)) => self.call(tok, fun),
                None => Err(Self::err(
                    ParseErrTyp::UndefinedIdent(tok.loc.get().to_string()),
                    &tok.loc,
                )),
            },

            TokTyp::OpenParen => {
                let inner = self.expr(0)?;
                match self.bump() {
                    Some(close) if close.typ == TokTyp::CloseParen => Ok(inner),
                    Some(other) => Err(Self::trailing(other)),
                    None => Err(Self::err(ParseErrTyp::ParenMismatch, &tok.loc)),
                }
            }

            TokTyp::CloseParen => Err(Self::err(ParseErrTyp::ParenMismatch, &tok.loc)),

            _ => Err(Self::err(ParseErrTyp::Unexpected, &tok.loc)),
        }
    }

    fn call(&mut self, name: &Tok, fun: stdlib::Builtin) -> Result<Expr, ParseErr> {
        let open = match self.bump() {
            Some(open) if open.typ == TokTyp::OpenParen => open,
            _ => return Err(Self::err(ParseErrTyp::NotCalled(fun.name()), &name.loc)),
        };

        let mut args = Vec::with_capacity(fun.arity());
        if self.peek().map(|tok| tok.typ) == Some(TokTyp::CloseParen) {
            self.bump();
        } else {
            loop {
                args.push(self.expr(0)?);
                match self.bump() {
                    Some(tok) if tok.typ == TokTyp::Comma => continue,
                    Some(tok) if tok.typ == TokTyp::CloseParen => break,
                    Some(other) => return Err(Self::trailing(other)),
                    None => return Err(Self::err(ParseErrTyp::ParenMismatch, &open.loc)),
                }
            }
        }

        if args.len() != fun.arity() {
            return Err(Self::err(
                ParseErrTyp::Arity {
                    name: fun.name(),
                    arity: fun.arity(),
                    found: args.len(),
                },
                &name.loc,
            ));
        }
        Ok(Expr::Call { fun, args })
    }
}

/// Parses a complete expression from `toks`, which were lexed from `src`.
pub fn parse(toks: &[Tok], src: &Arc<String>) -> Result<Expr, ParseErr> {
    let end = SubStr::end_of(Arc::clone(src));
    if toks.is_empty() {
        return Err(ParseErr {
            typ: ParseErrTyp::Empty,
            loc: end,
        });
    }

    if let Some(tok) = toks.get(MAX_TOKENS) {
        return Err(ParseErr {
            typ: ParseErrTyp::TooLong,
            loc: tok.loc.clone(),
        });
    }

    let mut parser = Parser {
        toks,
        pos: 0,
        depth: 0,
        end,
    };
    let expr = parser.expr(0)?;
    match parser.peek() {
        None => Ok(expr),
        Some(tok) => Err(Parser::trailing(tok)),
    }
}
