// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The built-in [TokenSource](../node/trait.TokenSource.html): reads
//! EDN (and, depending on [Format](../settings/struct.Format.html),
//! Clojure reader macro forms) from a character stream, one complete
//! top-level form per call.

//! The lexer validates the lexical grammar (string escapes, character
//! names, number syntax, balanced delimiters) but keeps atom text as
//! written; see [Value](../value/enum.Value.html) for what exactly
//! is kept.

use crate::buffered_chars::{CharResult, CharsError};
use crate::node::{Encoding, Node, TokenSource};
use crate::pos::Pos;
use crate::settings::{Format, Settings};
use crate::value::{AtomKind, SequenceKind, WrapperKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexError {
    #[error("{0}")]
    Stream(CharsError),
    #[error("unexpected closing character '{0}'")]
    UnexpectedClosing(char),
    #[error("'{0}' {1} expects '{2}', got '{3}'")]
    ParenMismatch(&'static str, Pos, char, char),
    #[error("premature EOF while expecting closing character '{0}'")]
    PrematureEof(char),
    #[error("map literal must have an even number of forms, got {0}")]
    UnevenMap(usize),
    #[error("unexpected EOF in string starting")]
    UnterminatedString,
    #[error("invalid escaped character '{0}'")]
    InvalidEscapedChar(char),
    #[error("not a hex digit: '{0}'")]
    NonHexDigit(char),
    #[error("invalid character literal '\\{0}'")]
    InvalidCharLiteral(String),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("invalid keyword ':{0}'")]
    InvalidKeyword(String),
    #[error("missing form after '{0}'")]
    MissingForm(&'static str),
    #[error("unsupported dispatch '#{0}'")]
    InvalidDispatch(char),
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("nesting too deep")]
    NestingTooDeep,
    /// For token sources other than [EdnLexer](EdnLexer).
    #[error("{0}")]
    Source(String),
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct LexErrorWithPos {
    pub err: LexError,
    pub pos: Pos
}

impl LexError {
    pub fn at(self, p: Pos) -> LexErrorWithPos {
        LexErrorWithPos {
            err: self,
            pos: p
        }
    }
}

type LexResult<T> = Result<T, LexErrorWithPos>;

#[derive(Debug, Default)]
pub struct ScanState {
    /// One character of lookahead, given back by the last token.
    pending: Option<(char, Pos)>,
    lastpos: Pos,
    /// The char stream ended or failed; it must not be polled again.
    exhausted: bool,
    /// An error node was handed out; only End follows.
    failed: bool,
}

enum Item {
    Form(Node),
    Close(char, Pos),
    Eof,
}

fn is_sign(c: char) -> bool {
    c == '+' || c == '-'
}

fn all_digits(s: &str, radix: u32) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_digit(radix))
}

/// `[+-]?digits N?`
fn is_int(s: &str) -> bool {
    let s = s.strip_prefix(is_sign).unwrap_or(s);
    all_digits(s.strip_suffix('N').unwrap_or(s), 10)
}

/// `[+-]?digits(.digits*)?([eE][+-]?digits)?M?`, with at least one
/// of fraction, exponent or `M`.
fn is_float(s: &str) -> bool {
    let s = s.strip_prefix(is_sign).unwrap_or(s);
    let (s, big) = match s.strip_suffix('M') {
        Some(s) => (s, true),
        None => (s, false),
    };
    let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };
    let (int, frac) = match mantissa.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (mantissa, None),
    };
    if !all_digits(int, 10) {
        return false
    }
    if let Some(f) = frac {
        if !f.chars().all(|c| c.is_ascii_digit()) {
            return false
        }
    }
    if let Some(e) = exponent {
        if !all_digits(e.strip_prefix(is_sign).unwrap_or(e), 10) {
            return false
        }
    }
    frac.is_some() || exponent.is_some() || big
}

fn is_char_literal(s: &str) -> bool {
    let mut cs = s.chars();
    if let (Some(_), None) = (cs.next(), cs.next()) {
        return true
    }
    match s {
        "newline" | "space" | "tab" | "return" | "backspace" | "formfeed" => true,
        _ => {
            if let Some(hex) = s.strip_prefix('u') {
                hex.len() == 4 && all_digits(hex, 16)
            } else if let Some(oct) = s.strip_prefix('o') {
                oct.len() <= 3 && all_digits(oct, 8)
                    && u32::from_str_radix(oct, 8).map_or(false, |n| n <= 0o377)
            } else {
                false
            }
        }
    }
}

struct Scanner<'a> {
    cs: &'a mut dyn Iterator<Item = CharResult>,
    state: &'a mut ScanState,
    format: &'a Format,
}

impl<'a> Scanner<'a> {
    fn next(&mut self) -> LexResult<Option<(char, Pos)>> {
        if let Some(cp) = self.state.pending.take() {
            return Ok(Some(cp))
        }
        if self.state.exhausted {
            return Ok(None)
        }
        match self.cs.next() {
            Some(Ok((c, pos))) => {
                self.state.lastpos = pos;
                Ok(Some((c, pos)))
            }
            Some(Err(e)) => {
                self.state.exhausted = true;
                Err(LexError::Stream(e).at(self.state.lastpos))
            }
            None => {
                self.state.exhausted = true;
                Ok(None)
            }
        }
    }

    fn unread(&mut self, cp: (char, Pos)) {
        self.state.pending = Some(cp);
    }

    fn is_whitespace(&self, c: char) -> bool {
        c.is_whitespace() || (c == ',' && self.format.comma_is_whitespace)
    }

    fn is_token_char(&self, c: char) -> bool {
        !self.is_whitespace(c)
            && !matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '"' | ';' | '\\')
    }

    /// Returns the first character that is not whitespace or part of
    /// a comment, None at EOF.
    fn skip_whitespace(&mut self) -> LexResult<Option<(char, Pos)>> {
        loop {
            match self.next()? {
                None => return Ok(None),
                Some((';', _)) => {
                    loop {
                        match self.next()? {
                            None => return Ok(None),
                            Some(('\n', _)) => break,
                            Some(_) => {}
                        }
                    }
                }
                Some((c, pos)) => {
                    if !self.is_whitespace(c) {
                        return Ok(Some((c, pos)))
                    }
                }
            }
        }
    }

    fn read_token_into(&mut self, out: &mut String) -> LexResult<()> {
        while let Some((c, pos)) = self.next()? {
            if self.is_token_char(c) {
                out.push(c);
            } else {
                self.unread((c, pos));
                break;
            }
        }
        Ok(())
    }

    fn read_item(&mut self, fuel: u32) -> LexResult<Item> {
        loop {
            let (c, pos) = match self.skip_whitespace()? {
                Some(cp) => cp,
                None => return Ok(Item::Eof),
            };
            let node = match c {
                ')' | ']' | '}' => return Ok(Item::Close(c, pos)),
                '(' => self.read_sequence(SequenceKind::List, pos, fuel)?,
                '[' => self.read_sequence(SequenceKind::Vector, pos, fuel)?,
                '{' => self.read_map(pos, fuel)?,
                '"' => self.read_string(pos)?,
                '\\' => self.read_char(pos)?,
                ':' => self.read_keyword(pos)?,
                '#' => match self.read_dispatch(pos, fuel)? {
                    Some(node) => node,
                    // #_ discarded a form
                    None => continue,
                },
                '\'' | '`' | '~' | '@' | '^' if self.format.reader_macros => {
                    let kind = match c {
                        '\'' => WrapperKind::Quote,
                        '`' => WrapperKind::Quasiquote,
                        '@' => WrapperKind::Deref,
                        '^' => WrapperKind::Meta,
                        _ => {
                            match self.next()? {
                                Some(('@', _)) => WrapperKind::UnquoteSplice,
                                Some(cp) => {
                                    self.unread(cp);
                                    WrapperKind::Unquote
                                }
                                None => WrapperKind::Unquote,
                            }
                        }
                    };
                    self.read_wrapper(kind, pos, fuel)?
                }
                '\'' | '`' | '~' | '@' | '^' =>
                    return Err(LexError::UnexpectedChar(c).at(pos)),
                _ if self.is_token_char(c) => self.read_number_or_symbol(c, pos)?,
                _ => return Err(LexError::UnexpectedChar(c).at(pos)),
            };
            return Ok(Item::Form(node))
        }
    }

    /// A form that must follow a prefix like `'` or `#tag`.
    fn read_required(&mut self, fuel: u32, after: &'static str, pos: Pos)
                     -> LexResult<Node> {
        match self.read_item(fuel)? {
            Item::Form(node) => Ok(node),
            Item::Close(..) | Item::Eof => Err(LexError::MissingForm(after).at(pos)),
        }
    }

    fn read_until(&mut self, open: &'static str, closing: char,
                  openpos: Pos, fuel: u32) -> LexResult<Vec<Node>> {
        if fuel == 0 {
            return Err(LexError::NestingTooDeep.at(openpos))
        }
        let mut v = Vec::new();
        loop {
            match self.read_item(fuel - 1)? {
                Item::Form(node) => v.push(node),
                Item::Close(c, pos) => {
                    return if c == closing {
                        Ok(v)
                    } else {
                        Err(LexError::ParenMismatch(open, openpos, closing, c).at(pos))
                    }
                }
                Item::Eof => return Err(LexError::PrematureEof(closing).at(openpos)),
            }
        }
    }

    fn read_sequence(&mut self, kind: SequenceKind, openpos: Pos, fuel: u32)
                     -> LexResult<Node> {
        let items = self.read_until(kind.opening(), kind.closing(), openpos, fuel)?;
        Ok(Node::Sequence(kind, items))
    }

    fn read_map(&mut self, openpos: Pos, fuel: u32) -> LexResult<Node> {
        let items = self.read_until("{", '}', openpos, fuel)?;
        let n = items.len();
        if n % 2 != 0 {
            return Err(LexError::UnevenMap(n).at(openpos))
        }
        let mut pairs = Vec::with_capacity(n / 2);
        let mut it = items.into_iter();
        while let (Some(k), Some(v)) = (it.next(), it.next()) {
            pairs.push((k, v));
        }
        Ok(Node::Dictionary(pairs))
    }

    fn read_wrapper(&mut self, kind: WrapperKind, pos: Pos, fuel: u32)
                    -> LexResult<Node> {
        if fuel == 0 {
            return Err(LexError::NestingTooDeep.at(pos))
        }
        let inner = self.read_required(fuel - 1, kind.sigil(), pos)?;
        Ok(Node::Wrapper(kind, Box::new(inner)))
    }

    /// Everything starting with `#`. Returns None for a discarded
    /// form.
    fn read_dispatch(&mut self, hashpos: Pos, fuel: u32) -> LexResult<Option<Node>> {
        let (c, pos) = match self.next()? {
            Some(cp) => cp,
            None => return Err(LexError::MissingForm("#").at(hashpos)),
        };
        match c {
            '{' => self.read_sequence(SequenceKind::Set, hashpos, fuel).map(Some),
            '_' if self.format.discard => {
                if fuel == 0 {
                    return Err(LexError::NestingTooDeep.at(hashpos))
                }
                self.read_required(fuel - 1, "#_", hashpos)?;
                Ok(None)
            }
            '\'' if self.format.reader_macros =>
                self.read_wrapper(WrapperKind::Varquote, hashpos, fuel).map(Some),
            _ if c.is_alphabetic() && self.format.tagged_literals => {
                let mut tag = String::new();
                tag.push(c);
                self.read_token_into(&mut tag)?;
                if fuel == 0 {
                    return Err(LexError::NestingTooDeep.at(hashpos))
                }
                let payload = self.read_required(fuel - 1, "#tag", hashpos)?;
                Ok(Some(Node::Tagged(
                    Box::new(Node::atom(AtomKind::Symbol, &tag, Encoding::Utf8)),
                    Box::new(payload))))
            }
            _ => Err(LexError::InvalidDispatch(c).at(pos)),
        }
    }

    fn read_string(&mut self, startpos: Pos) -> LexResult<Node> {
        let mut s = String::new();
        loop {
            let (c, _) = self.next()?
                .ok_or_else(|| LexError::UnterminatedString.at(startpos))?;
            match c {
                '"' => return Ok(Node::atom(AtomKind::String, &s, Encoding::Utf8)),
                '\\' => {
                    let (e, epos) = self.next()?
                        .ok_or_else(|| LexError::UnterminatedString.at(startpos))?;
                    s.push('\\');
                    s.push(e);
                    match e {
                        't' | 'r' | 'n' | '\\' | '"' | 'b' | 'f' => {}
                        'u' => {
                            for _ in 0..4 {
                                let (h, hpos) = self.next()?
                                    .ok_or_else(|| LexError::UnterminatedString.at(startpos))?;
                                if !h.is_ascii_hexdigit() {
                                    return Err(LexError::NonHexDigit(h).at(hpos))
                                }
                                s.push(h);
                            }
                        }
                        _ => return Err(LexError::InvalidEscapedChar(e).at(epos)),
                    }
                }
                _ => s.push(c),
            }
        }
    }

    fn read_char(&mut self, startpos: Pos) -> LexResult<Node> {
        let c0 = match self.next()? {
            Some((c, _)) if !c.is_whitespace() => c,
            _ => return Err(LexError::InvalidCharLiteral(String::new()).at(startpos)),
        };
        let mut text = String::new();
        text.push(c0);
        if self.is_token_char(c0) {
            self.read_token_into(&mut text)?;
        }
        if is_char_literal(&text) {
            Ok(Node::atom(AtomKind::Char, &text, Encoding::Utf8))
        } else {
            Err(LexError::InvalidCharLiteral(text).at(startpos))
        }
    }

    fn read_keyword(&mut self, startpos: Pos) -> LexResult<Node> {
        let mut name = String::new();
        self.read_token_into(&mut name)?;
        if name.is_empty() || name.starts_with(':') {
            return Err(LexError::InvalidKeyword(name).at(startpos))
        }
        Ok(Node::atom(AtomKind::Keyword, &name, Encoding::Utf8))
    }

    fn read_number_or_symbol(&mut self, c: char, startpos: Pos) -> LexResult<Node> {
        let mut text = String::new();
        text.push(c);
        self.read_token_into(&mut text)?;
        let numeric = c.is_ascii_digit()
            || (is_sign(c) && text[1..].starts_with(|d: char| d.is_ascii_digit()));
        let kind =
            if !numeric {
                AtomKind::Symbol
            } else if is_int(&text) {
                AtomKind::Int
            } else if is_float(&text) {
                AtomKind::Float
            } else {
                return Err(LexError::InvalidNumber(text).at(startpos))
            };
        Ok(Node::atom(kind, &text, Encoding::Utf8))
    }
}

/// Reads EDN text. Atom text is handed out as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdnLexer {
    settings: Settings,
}

impl EdnLexer {
    pub fn new(settings: Settings) -> Self {
        EdnLexer { settings }
    }
}

impl TokenSource for EdnLexer {
    type State = ScanState;

    fn encoding(&self) -> Encoding {
        Encoding::Utf8
    }

    fn read_node(
        &mut self,
        chars: &mut dyn Iterator<Item = CharResult>,
        state: &mut ScanState,
    ) -> Node {
        if state.failed {
            return Node::End
        }
        let r = {
            let mut scanner = Scanner {
                cs: chars,
                state: &mut *state,
                format: &self.settings.format,
            };
            scanner.read_item(self.settings.max_depth)
        };
        let e = match r {
            Ok(Item::Form(node)) => return node,
            Ok(Item::Eof) => return Node::End,
            Ok(Item::Close(c, pos)) => LexError::UnexpectedClosing(c).at(pos),
            Err(e) => e,
        };
        state.failed = true;
        Node::Error(e)
    }
}
