use crate::expr::Formula;

use super::lexer::*;
use super::namer::*;
use super::token::*;
use super::error::*;

/// A parser
pub struct Parser<I> where I : Iterator<Item = char> {
    /// The lexical analyzer that provides tokens
    lexer: Lexer<I>,

    /// The [TKind] of the lookahead token
    la: Option<TKind>,

    /// The full lookahead token
    token: Option<Token>
}

impl<I> Parser<I> where I : Iterator<Item = char> {
    /// Creates a new [Parser]
    pub fn new(iter: I) -> Self {
        let lexer = Lexer::new(iter);

        let mut parser = Self {
            lexer,
            la: None,
            token: None
        };

        // Shift first token into lookahead
        parser.shift();

        parser
    }

    /// Creates a soft miss at the next token. If no next token is present, it points
    /// just past the very last character of the input.
    fn miss<T>(&self) -> Attempt<T> {
        let at = match &self.token {
            Some(tok) => tok.at,
            None => self.lexer.pos()
        };

        Err(Miss::Soft(at))
    }


    /// Shifts to the next token
    fn shift(&mut self) {
        let tok = self.lexer.token();
        self.la = tok.as_ref().map(|e| e.kind);
        self.token = tok;
    }


    /// Expect a specific production rule: a soft miss becomes a hard `Expected {rule}`
    /// failure.
    fn expect<T>(res: Attempt<T>, rule: &str) -> Attempt<T> {
        res.map_err(|miss| miss.expected(rule))
    }

    /// Reads the end of the stream
    pub fn eof(&mut self) -> Attempt<()> {
        match self.la {
            None => Ok(()),
            _ => self.miss()
        }
    }

    /// Reads a token of the given [TKind]
    pub fn lit(&mut self, kind: TKind) -> Attempt<Token> {
        let tok = self.token.clone();

        match self.la {
            Some(la_kind) => {
                if la_kind == kind {
                    self.shift();
                    Ok(tok.unwrap())
                } else {
                    self.miss()
                }
            },
            None => self.miss()
        }
    }

    /// Reads a formula:
    /// ```text
    /// exp
    ///   = or_exp '=>' exp
    ///   | or_exp '<=>' exp
    ///   | or_exp
    /// ```
    /// `=>` and `<=>` share the lowest precedence level and associate to the right.
    pub fn exp(&mut self, nc: &mut NameContext) -> Attempt<Formula> {
        let lhs = self.or_exp(nc)?;

        if let Ok(_) = self.lit(TKind::Imp) {
            let rhs = Self::expect(self.exp(nc), "exp")?;
            return Ok(Formula::imp(lhs, rhs));
        }

        if let Ok(_) = self.lit(TKind::Iff) {
            let rhs = Self::expect(self.exp(nc), "exp")?;
            return Ok(Formula::iff(lhs, rhs));
        }

        Ok(lhs)
    }

    /// Reads a disjunction:
    /// ```text
    /// or_exp = and_exp ('|' and_exp)*
    /// ```
    /// `|` associates to the left.
    fn or_exp(&mut self, nc: &mut NameContext) -> Attempt<Formula> {
        let mut exp = self.and_exp(nc)?;

        while let Ok(_) = self.lit(TKind::Bar) {
            let rhs = Self::expect(self.and_exp(nc), "and_exp")?;
            exp = exp | rhs;
        }

        Ok(exp)
    }

    /// Reads a conjunction:
    /// ```text
    /// and_exp = unary_exp ('&' unary_exp)*
    /// ```
    /// `&` associates to the left.
    fn and_exp(&mut self, nc: &mut NameContext) -> Attempt<Formula> {
        let mut exp = self.unary_exp(nc)?;

        while let Ok(_) = self.lit(TKind::Amp) {
            let rhs = Self::expect(self.unary_exp(nc), "unary_exp")?;
            exp = exp & rhs;
        }

        Ok(exp)
    }

    /// Reads a unary expression:
    /// ```text
    /// unary_exp
    ///   = '~' unary_exp
    ///   | '[' id ']' unary_exp
    ///   | '<' id '>' unary_exp
    ///   | base_exp
    /// ```
    fn unary_exp(&mut self, nc: &mut NameContext) -> Attempt<Formula> {
        if let Ok(_) = self.lit(TKind::Tilde) {
            let rhs = Self::expect(self.unary_exp(nc), "unary_exp")?;
            return Ok(!rhs);
        }

        if let Ok(tok) = self.lit(TKind::BoxMod) {
            let rel = nc.resolve(tok.modality_id().into());
            let rhs = Self::expect(self.unary_exp(nc), "unary_exp")?;
            return Ok(Formula::bx(rel, rhs));
        }

        if let Ok(tok) = self.lit(TKind::DiaMod) {
            let rel = nc.resolve(tok.modality_id().into());
            let rhs = Self::expect(self.unary_exp(nc), "unary_exp")?;
            return Ok(Formula::dia(rel, rhs));
        }

        self.base_exp(nc)
    }

    /// Reads a base expression:
    /// ```text
    /// base_exp
    ///   = '(' exp ')'
    ///   | 'True'
    ///   | 'False'
    ///   | Ident
    /// ```
    fn base_exp(&mut self, nc: &mut NameContext) -> Attempt<Formula> {
        if let Ok(_) = self.lit(TKind::LPar) {
            let exp = Self::expect(self.exp(nc), "exp")?;
            Self::expect(self.lit(TKind::RPar), "RPar")?;

            return Ok(exp);
        }

        if let Ok(_) = self.lit(TKind::True) {
            return Ok(Formula::True);
        }

        if let Ok(_) = self.lit(TKind::False) {
            return Ok(Formula::False);
        }

        if let Ok(tok) = self.lit(TKind::Ident) {
            return Ok(Formula::atom(nc.resolve(tok.text)));
        }

        self.miss()
    }
}
