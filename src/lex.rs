// SPDX: CC0-1.0

use crate::eval::OperatorTyp;
use core::{fmt, iter::Peekable, str::CharIndices};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubStr {
    // yes, silly, but atomic operations are cheap for this use case
    src: Arc<String>,
    start: usize,
    len: usize,
}

impl SubStr {
    #[inline]
    pub const fn new(src: Arc<String>, start: usize, len: usize) -> Self {
        Self { src, start, len }
    }

    #[inline]
    pub fn all(src: Arc<String>) -> Self {
        let len = src.len();
        Self::new(src, 0, len)
    }

    /// Zero-width span just past the end of `src`.
    #[inline]
    pub fn end_of(src: Arc<String>) -> Self {
        let start = src.len();
        Self::new(src, start, 0)
    }

    pub fn src(&self) -> Arc<String> {
        Arc::clone(&self.src)
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self) -> &str {
        &self.src[self.start..self.start + self.len]
    }

    pub fn shift_right(&mut self, by: usize) {
        self.len += by;
    }

    /// Renders the whole source with carets under this span.
    pub fn underline(&self) -> String {
        format!(
            "{}\n{}{}",
            self.src,
            " ".repeat(self.src[..self.start].chars().count()),
            "^".repeat(self.get().chars().count().max(1))
        )
    }
}

impl fmt::Display for SubStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokTyp {
    Ident,
    Number,
    Op(OperatorTyp),
    Comma,
    OpenParen,
    CloseParen,
    Equal,

    // unsupported tokens
    XGreater,
    XLess,
    XPipe,
    XOpenSquareBracket,
    XCloseSquareBracket,
    XOpenCurly,
    XCloseCurly,
}

impl TokTyp {
    pub const fn is_unsupported(&self) -> bool {
        match self {
            Self::Ident
            | Self::Number
            | Self::Op(_)
            | Self::Comma
            | Self::OpenParen
            | Self::CloseParen
            | Self::Equal => false,

            // unsupported tokens
            Self::XGreater
            | Self::XLess
            | Self::XPipe
            | Self::XOpenSquareBracket
            | Self::XCloseSquareBracket
            | Self::XOpenCurly
            | Self::XCloseCurly => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tok {
    pub typ: TokTyp,
    pub loc: SubStr,
}

impl Tok {
    pub fn is_ident(&self, name: &str) -> bool {
        self.typ == TokTyp::Ident && self.loc.get() == name
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LexErrTyp {
    #[error("invalid character")]
    InvalidChar,
    #[error("unsupported character")]
    Unsupported(TokTyp),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{typ}")]
pub struct LexErr {
    pub typ: LexErrTyp,
    pub loc: SubStr,
}

#[derive(Debug)]
pub struct Lexer<'src> {
    src: &'src Arc<String>,
    cur: Peekable<CharIndices<'src>>,
    has_errored: bool, // tells iter to yield None after error
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src Arc<String>) -> Self {
        Self {
            src,
            cur: src.char_indices().peekable(),
            has_errored: false,
        }
    }

    pub fn trim_whitespace(&mut self) {
        while let Some((_, chr)) = self.cur.peek() {
            if chr.is_whitespace() {
                self.cur.next();
            } else {
                break;
            }
        }
    }

    pub fn consume_unambiguous(&mut self) -> Option<Tok> {
        let (idx, chr) = self.cur.peek().copied()?;
        let typ = match chr {
            '+' => TokTyp::Op(OperatorTyp::Add),
            '-' => TokTyp::Op(OperatorTyp::Sub), // negation is decided by the parser
            '/' => TokTyp::Op(OperatorTyp::Div),
            '^' => TokTyp::Op(OperatorTyp::Exp),
            ',' => TokTyp::Comma,
            '(' => TokTyp::OpenParen,
            ')' => TokTyp::CloseParen,
            '=' => TokTyp::Equal,

            '>' => TokTyp::XGreater,
            '<' => TokTyp::XLess,
            '|' => TokTyp::XPipe,
            '[' => TokTyp::XOpenSquareBracket,
            ']' => TokTyp::XCloseSquareBracket,
            '{' => TokTyp::XOpenCurly,
            '}' => TokTyp::XCloseCurly,
            _ => return None,
        };
        self.cur.next(); // consume because we only peeked
        Some(Tok {
            typ,
            loc: SubStr::new(Arc::clone(self.src), idx, chr.len_utf8()),
        })
    }

    /// `*` is multiplication, `**` is the same operator as `^`.
    fn consume_star(&mut self, idx: usize) -> Tok {
        self.cur.next();
        let (typ, len) = match self.cur.peek() {
            Some((_, '*')) => {
                self.cur.next();
                (TokTyp::Op(OperatorTyp::Exp), 2)
            }
            _ => (TokTyp::Op(OperatorTyp::Mul), 1),
        };
        Tok {
            typ,
            loc: SubStr::new(Arc::clone(self.src), idx, len),
        }
    }

    /// Digits and dots, then an optional `e`/`E` exponent. The exponent is
    /// only taken when digits follow it, so `2*e` keeps `e` as the constant.
    fn consume_number(&mut self, next_idx: usize) -> Option<Tok> {
        let mut tok = self.consume_by(next_idx, TokTyp::Number, |chr| {
            chr.is_ascii_digit() || chr == '.'
        })?;

        let mut ahead = self.cur.clone();
        if let Some((_, 'e' | 'E')) = ahead.next() {
            let mut len = 1;
            if let Some((_, '+' | '-')) = ahead.peek() {
                ahead.next();
                len += 1;
            }
            let mut digits = 0;
            while ahead.next_if(|(_, chr)| chr.is_ascii_digit()).is_some() {
                digits += 1;
            }
            if digits > 0 {
                tok.loc.shift_right(len + digits);
                self.cur = ahead;
            }
        }
        Some(tok)
    }

    pub fn consume_by<P>(&mut self, next_idx: usize, typ: TokTyp, predicate: P) -> Option<Tok>
    where
        P: Fn(char) -> bool,
    {
        let mut tok = Tok {
            typ,
            loc: SubStr::new(Arc::clone(self.src), next_idx, 0),
        };
        while let Some((_, chr)) = self.cur.peek().copied() {
            if predicate(chr) {
                // predicate only accepts ascii, so one byte per char
                tok.loc.shift_right(1);
                self.cur.next();
            } else {
                break;
            }
        }
        if tok.loc.is_empty() {
            // there is no next token of type `typ`
            None
        } else {
            Some(tok)
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Tok, LexErr>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_errored {
            return None;
        }

        self.trim_whitespace();

        let (next_idx, next_chr) = self.cur.peek().copied()?;
        let ret = if next_chr == '*' {
            Ok(self.consume_star(next_idx))
        } else if let Some(tok) = self.consume_unambiguous() {
            Ok(tok)
        } else if let Some(tok) =
            // parse identifiers
            self.consume_by(next_idx, TokTyp::Ident, |chr| chr.is_ascii_alphabetic())
        {
            Ok(tok)
        } else if let Some(tok) = self.consume_number(next_idx) {
            Ok(tok)
        } else {
            Err(LexErr {
                typ: LexErrTyp::InvalidChar,
                loc: SubStr::new(Arc::clone(self.src), next_idx, next_chr.len_utf8()),
            })
        };
        let ret = match ret {
            Ok(tok) if tok.typ.is_unsupported() => Err(LexErr {
                typ: LexErrTyp::Unsupported(tok.typ),
                loc: tok.loc,
            }),
            other => other,
        };
        if ret.is_err() {
            self.has_errored = true;
        }
        Some(ret)
    }
}
