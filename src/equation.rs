// SPDX: CC0-1.0

//! Turns user text into an [`Evaluator`].
//!
//! Accepted forms are a bare expression in `x` (`x^2 - 1`) and an explicit
//! graph equation with `y` alone on one side (`y = sin(x)`, `2*x = y`).

use crate::{
    eval::Expr,
    lex::{Lexer, Tok, TokTyp},
    parse::{self, ParseErr},
    stdlib::{X, Y},
    Number,
};
use core::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CompileErr {
    #[error("equations mentioning 'y' must have the form 'y = f(x)' or 'f(x) = y'")]
    UnsupportedEquationForm,
    #[error("expression has no free variable 'x'")]
    NoFreeVariable,
    #[error(transparent)]
    Parse(#[from] ParseErr),
}

impl CompileErr {
    /// Multi-line text suitable for a status message.
    pub fn report(&self) -> String {
        match self {
            Self::Parse(err) => err.report(),
            other => other.to_string(),
        }
    }
}

/// A compiled, pure function of `x`.
///
/// The tree only references `x`, numeric literals, arithmetic and the
/// whitelist in [`crate::stdlib`], so evaluating it cannot touch anything
/// outside of its own arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluator {
    source: Arc<String>,
    expr: Expr,
}

impl Evaluator {
    /// Value at `x`, or `None` where the function is undefined.
    #[inline]
    pub fn eval(&self, x: Number) -> Option<Number> {
        self.expr.eval(x)
    }

    /// Normalized text this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {}", self.expr)
    }
}

/// Trims surrounding whitespace. `^` is already the exponent operator of the
/// evaluator and `**` lexes to the same token, so no rewriting is needed.
pub fn normalize(text: &str) -> String {
    text.trim().to_string()
}

pub fn compile(text: &str) -> Result<Evaluator, CompileErr> {
    let source = Arc::new(normalize(text));
    let toks = Lexer::new(&source)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ParseErr::from)?;

    let mentions = |name: &str| toks.iter().any(|tok| tok.is_ident(name));
    let body = match (mentions(X), mentions(Y)) {
        (true, true) => explicit_rhs(&toks)?,
        (true, false) => &toks[..],
        (false, _) => return Err(CompileErr::NoFreeVariable),
    };

    let expr = parse::parse(body, &source)?;
    Ok(Evaluator { source, expr })
}

/// The side of `y = rhs` (or `lhs = y`) that is not `y`.
fn explicit_rhs(toks: &[Tok]) -> Result<&[Tok], CompileErr> {
    let mut equals = toks
        .iter()
        .enumerate()
        .filter(|(_, tok)| tok.typ == TokTyp::Equal)
        .map(|(idx, _)| idx);
    let (Some(idx), None) = (equals.next(), equals.next()) else {
        return Err(CompileErr::UnsupportedEquationForm);
    };

    let (lhs, rhs) = (&toks[..idx], &toks[idx + 1..]);
    let is_y = |side: &[Tok]| matches!(side, [tok] if tok.is_ident(Y));
    if is_y(lhs) {
        Ok(rhs)
    } else if is_y(rhs) {
        Ok(lhs)
    } else {
        Err(CompileErr::UnsupportedEquationForm)
    }
}
