// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The value tree that reading produces.

//! [Value](Value) is one closed sum type. `End` and `Error` are
//! sentinels that only ever come out of a top-level read, never as
//! children. Atoms carry their source text (minus the sigil that
//! selects their kind, see [Value::text](Value::text)), all other
//! variants own their children.

use crate::number::{self, Number};
use kstring::KString;
use std::fmt::{Display, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomKind {
    Int,
    Float,
    Symbol,
    Keyword,
    String,
    Char,
}

impl AtomKind {
    pub fn make(self, text: KString) -> Value {
        match self {
            AtomKind::Int => Value::Int(text),
            AtomKind::Float => Value::Float(text),
            AtomKind::Symbol => Value::Symbol(text),
            AtomKind::Keyword => Value::Keyword(text),
            AtomKind::String => Value::String(text),
            AtomKind::Char => Value::Char(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    List,
    Set,
    Vector,
}

impl SequenceKind {
    pub fn opening(self) -> &'static str {
        match self {
            SequenceKind::List => "(",
            SequenceKind::Set => "#{",
            SequenceKind::Vector => "[",
        }
    }
    pub fn closing(self) -> char {
        match self {
            SequenceKind::List => ')',
            SequenceKind::Set => '}',
            SequenceKind::Vector => ']',
        }
    }
    pub fn make(self, items: Vec<Value>) -> Value {
        match self {
            SequenceKind::List => Value::List(items),
            SequenceKind::Set => Value::Set(items),
            SequenceKind::Vector => Value::Vector(items),
        }
    }
}

/// The reader macro forms that wrap exactly one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperKind {
    Deref,
    Quasiquote,
    Unquote,
    UnquoteSplice,
    Meta,
    Varquote,
    Quote,
}

impl WrapperKind {
    pub fn sigil(self) -> &'static str {
        match self {
            WrapperKind::Deref => "@",
            WrapperKind::Quasiquote => "`",
            WrapperKind::Unquote => "~",
            WrapperKind::UnquoteSplice => "~@",
            WrapperKind::Meta => "^",
            WrapperKind::Varquote => "#'",
            WrapperKind::Quote => "'",
        }
    }
    pub fn name(self) -> &'static str {
        match self {
            WrapperKind::Deref => "Deref",
            WrapperKind::Quasiquote => "Quasiquote",
            WrapperKind::Unquote => "Unquote",
            WrapperKind::UnquoteSplice => "UnquoteSplice",
            WrapperKind::Meta => "Meta",
            WrapperKind::Varquote => "Varquote",
            WrapperKind::Quote => "Quote",
        }
    }
    pub fn make(self, content: Value) -> Value {
        let b = Box::new(content);
        match self {
            WrapperKind::Deref => Value::Deref(b),
            WrapperKind::Quasiquote => Value::Quasiquote(b),
            WrapperKind::Unquote => Value::Unquote(b),
            WrapperKind::UnquoteSplice => Value::UnquoteSplice(b),
            WrapperKind::Meta => Value::Meta(b),
            WrapperKind::Varquote => Value::Varquote(b),
            WrapperKind::Quote => Value::Quote(b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    End,
    Error(KString),

    Int(KString),
    Float(KString),
    Symbol(KString),
    Keyword(KString), // :foo is stored as "foo"
    String(KString),  // without the quotes, escapes left as written
    Char(KString),    // \newline is stored as "newline"

    List(Vec<Value>),
    Set(Vec<Value>),
    Vector(Vec<Value>),
    Dictionary(Vec<(Value, Value)>),

    /// `#tag content`; the tag is always a symbol, kept as its text.
    Tagged { tag: KString, content: Box<Value> },

    Deref(Box<Value>),
    Quasiquote(Box<Value>),
    Unquote(Box<Value>),
    UnquoteSplice(Box<Value>),
    Meta(Box<Value>),
    Varquote(Box<Value>),
    Quote(Box<Value>),
}

impl Value {
    pub fn error(msg: &str) -> Value {
        Value::Error(KString::from_ref(msg))
    }

    /// End or Error.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Value::End | Value::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Value::Error(m) => Some(m.as_str()),
            _ => None
        }
    }

    pub fn atom_kind(&self) -> Option<AtomKind> {
        match self {
            Value::Int(_) => Some(AtomKind::Int),
            Value::Float(_) => Some(AtomKind::Float),
            Value::Symbol(_) => Some(AtomKind::Symbol),
            Value::Keyword(_) => Some(AtomKind::Keyword),
            Value::String(_) => Some(AtomKind::String),
            Value::Char(_) => Some(AtomKind::Char),
            _ => None
        }
    }

    /// The text of an atom.
    pub fn text(&self) -> Option<&str> {
        match self {
            Value::Int(s) | Value::Float(s) | Value::Symbol(s)
                | Value::Keyword(s) | Value::String(s) | Value::Char(s)
                => Some(s.as_str()),
            _ => None
        }
    }

    pub fn sequence_kind(&self) -> Option<SequenceKind> {
        match self {
            Value::List(_) => Some(SequenceKind::List),
            Value::Set(_) => Some(SequenceKind::Set),
            Value::Vector(_) => Some(SequenceKind::Vector),
            _ => None
        }
    }

    /// The items of a List, Set or Vector.
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) | Value::Set(v) | Value::Vector(v) => Some(v),
            _ => None
        }
    }

    pub fn entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Dictionary(v) => Some(v),
            _ => None
        }
    }

    pub fn tagged(&self) -> Option<(&str, &Value)> {
        match self {
            Value::Tagged { tag, content } => Some((tag.as_str(), content)),
            _ => None
        }
    }

    /// The kind and the single child of a reader macro form.
    pub fn wrapped(&self) -> Option<(WrapperKind, &Value)> {
        let (kind, b) = match self {
            Value::Deref(b) => (WrapperKind::Deref, b),
            Value::Quasiquote(b) => (WrapperKind::Quasiquote, b),
            Value::Unquote(b) => (WrapperKind::Unquote, b),
            Value::UnquoteSplice(b) => (WrapperKind::UnquoteSplice, b),
            Value::Meta(b) => (WrapperKind::Meta, b),
            Value::Varquote(b) => (WrapperKind::Varquote, b),
            Value::Quote(b) => (WrapperKind::Quote, b),
            _ => return None
        };
        Some((kind, &**b))
    }

    /// Numeric interpretation of Int and Float atoms.
    pub fn number(&self) -> Option<Number> {
        match self {
            Value::Int(s) => number::parse_int(s),
            Value::Float(s) => number::parse_float(s),
            _ => None
        }
    }
}

fn write_items<'t>(
    f: &mut std::fmt::Formatter<'_>,
    items: impl Iterator<Item = &'t Value>
) -> Result<(), std::fmt::Error> {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        item.fmt(f)?;
    }
    Ok(())
}

fn write_sequence(
    f: &mut std::fmt::Formatter<'_>,
    kind: SequenceKind,
    items: &[Value]
) -> Result<(), std::fmt::Error> {
    f.write_str(kind.opening())?;
    write_items(f, items.iter())?;
    f.write_char(kind.closing())
}

/// Prints EDN text that reads back into the same value. The sentinels
/// have no read syntax and print as `#<end>` and `#<error "...">`.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Value::End => f.write_str("#<end>"),
            Value::Error(m) => write!(f, "#<error {:?}>", m.as_str()),
            Value::Int(s) | Value::Float(s) | Value::Symbol(s) =>
                f.write_str(s),
            Value::Keyword(s) => write!(f, ":{}", s),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Char(s) => write!(f, "\\{}", s),
            Value::List(v) => write_sequence(f, SequenceKind::List, v),
            Value::Set(v) => write_sequence(f, SequenceKind::Set, v),
            Value::Vector(v) => write_sequence(f, SequenceKind::Vector, v),
            Value::Dictionary(entries) => {
                f.write_char('{')?;
                write_items(f, entries.iter().flat_map(|(k, v)| [k, v]))?;
                f.write_char('}')
            }
            Value::Tagged { tag, content } => write!(f, "#{} {}", tag, content),
            _ => match self.wrapped() {
                // `~@a` would read back as UnquoteSplice
                Some((WrapperKind::Unquote, content @ Value::Deref(_))) =>
                    write!(f, "~ {}", content),
                Some((kind, content)) => write!(f, "{}{}", kind.sigil(), content),
                None => Ok(())
            }
        }
    }
}

/// Easily create a symbol
pub fn symbol(s: &str) -> Value {
    Value::Symbol(KString::from_ref(s))
}

/// Easily create a keyword (without the colon)
pub fn keyword(s: &str) -> Value {
    Value::Keyword(KString::from_ref(s))
}

pub fn int(s: &str) -> Value {
    Value::Int(KString::from_ref(s))
}
