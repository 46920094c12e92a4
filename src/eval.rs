// SPDX: CC0-1.0

use crate::{stdlib::Builtin, Number};
use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperatorTyp {
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    Exp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

impl OperatorTyp {
    pub const fn precedence(&self) -> i8 {
        match self {
            Self::Add => 2,
            Self::Sub => 2,
            Self::Mul => 3,
            Self::Div => 3,
            Self::Neg => 4,
            Self::Exp => 5,
        }
    }

    pub const fn associativity(&self) -> Associativity {
        use Associativity::{Left, Right};
        match self {
            Self::Neg => Left,
            Self::Add => Left,
            Self::Sub => Left,
            Self::Mul => Left,
            Self::Div => Left,
            Self::Exp => Right,
        }
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Neg | Self::Sub => "-",
            Self::Add => "+",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Exp => "^",
        }
    }

    /// Applies a binary operator. Division by an exact zero is undefined
    /// rather than infinite.
    pub fn apply(&self, lhs: Number, rhs: Number) -> Number {
        match self {
            Self::Neg => -rhs,
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => {
                if rhs == 0.0 {
                    Number::NAN
                } else {
                    lhs / rhs
                }
            }
            Self::Exp => lhs.powf(rhs),
        }
    }
}

/// Syntax tree of a compiled expression in the single variable `x`.
///
/// Constants are folded to [`Expr::Val`] while parsing, so a tree only ever
/// refers to the variable, literals, operators and whitelisted functions.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Val(Number),
    Var,
    Neg(Box<Expr>),
    Binary {
        op: OperatorTyp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        fun: Builtin,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Evaluates the tree at `x`. Any non-finite intermediate result aborts
    /// evaluation with `None`.
    pub fn eval(&self, x: Number) -> Option<Number> {
        let val = match self {
            Self::Val(val) => *val,
            Self::Var => x,
            Self::Neg(inner) => -inner.eval(x)?,
            Self::Binary { op, lhs, rhs } => op.apply(lhs.eval(x)?, rhs.eval(x)?),
            Self::Call { fun, args } => match args.as_slice() {
                [arg] => fun.apply(&[arg.eval(x)?]),
                [a, b] => fun.apply(&[a.eval(x)?, b.eval(x)?]),
                _ => return None,
            },
        };
        val.is_finite().then_some(val)
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Self::Val(_) | Self::Var => 1,
            Self::Neg(inner) => 1 + inner.size(),
            Self::Binary { lhs, rhs, .. } => 1 + lhs.size() + rhs.size(),
            Self::Call { args, .. } => 1 + args.iter().map(Expr::size).sum::<usize>(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Val(val) => write!(f, "{val}"),
            Self::Var => write!(f, "x"),
            Self::Neg(inner) => write!(f, "(-{inner})"),
            Self::Binary { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Self::Call { fun, args } => {
                write!(f, "{}(", fun.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
