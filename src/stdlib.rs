// SPDX: CC0-1.0

use crate::Number;
use core::f64::consts; // assumes Number = f64

pub const X: &str = "x";
pub const Y: &str = "y";

/// Whitelisted functions. Nothing else is callable from an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Exp,
    Sqrt,
    Abs,
    Pow,
}

impl Builtin {
    pub const fn exhaustive() -> &'static [Builtin] {
        &[
            Self::Sin,
            Self::Cos,
            Self::Tan,
            Self::Exp,
            Self::Sqrt,
            Self::Abs,
            Self::Pow,
        ]
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Exp => "exp",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Pow => "pow",
        }
    }

    pub const fn arity(&self) -> usize {
        match self {
            Self::Pow => 2,
            _ => 1,
        }
    }

    /// `args.len()` must equal [`Builtin::arity`], which the parser checks.
    pub fn apply(&self, args: &[Number]) -> Number {
        match (self, args) {
            (Self::Sin, [x]) => x.sin(),
            (Self::Cos, [x]) => x.cos(),
            (Self::Tan, [x]) => x.tan(),
            (Self::Exp, [x]) => x.exp(),
            (Self::Sqrt, [x]) => x.sqrt(),
            (Self::Abs, [x]) => x.abs(),
            (Self::Pow, [x, exp]) => x.powf(*exp),
            _ => Number::NAN,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ident {
    Var,
    Const(Number),
    Fun(Builtin),
}

impl Ident {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Var => "variable",
            Self::Const(_) => "constant",
            Self::Fun(_) => "function",
        }
    }
}

const CONSTS: &[(&str, Number)] = &[("pi", consts::PI), ("e", consts::E)];

/// Every identifier an expression may mention, with its meaning.
pub fn standard_idents() -> impl Iterator<Item = (&'static str, Ident)> {
    core::iter::once((X, Ident::Var))
        .chain(CONSTS.iter().map(|&(name, val)| (name, Ident::Const(val))))
        .chain(
            Builtin::exhaustive()
                .iter()
                .map(|fun| (fun.name(), Ident::Fun(*fun))),
        )
}

pub fn lookup(name: &str) -> Option<Ident> {
    standard_idents()
        .find(|(key, _)| *key == name)
        .map(|(_, ident)| ident)
}

/// Closest known identifier to an unknown one, if it is similar enough to be
/// worth suggesting.
pub fn most_similar(name: &str) -> Option<(&'static str, Ident)> {
    let name = name.to_ascii_lowercase();
    standard_idents()
        .map(|(key, ident)| {
            (
                strsim::normalized_damerau_levenshtein(&name, &key.to_ascii_lowercase()),
                (key, ident),
            )
        })
        .reduce(|(acc_sim, acc_kv), (elem_sim, elem_kv)| {
            if elem_sim > acc_sim {
                (elem_sim, elem_kv)
            } else {
                (acc_sim, acc_kv)
            }
        })
        .filter(|(sim, _)| *sim > 0.3)
        .map(|(_, kv)| kv)
}
