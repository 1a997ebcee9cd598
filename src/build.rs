// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turning one classified [Node](../node/enum.Node.html) into a
//! [Value](../value/enum.Value.html) tree.

//! Building is pure: it only reads the node. Anything going wrong
//! below the top level fails the whole node, so `End` and `Error`
//! can only ever be the result for a top-level node, never a child.

use crate::node::{Encoding, Node, RawText};
use crate::value::{AtomKind, Value};
use kstring::KString;
use thiserror::Error;

/// Atom text used when the raw text can't be decoded.
pub const DECODE_FAILED_PLACEHOLDER: &str = "PARSEFAILED";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("error encountered while parsing")]
    Malformed,
    #[error("unexpected end of input inside a form")]
    NestedEnd,
    #[error("unknown value kind")]
    UnknownKind(u16),
    #[error("unknown primitive value")]
    UnknownAtomKind(u16),
    #[error("tag of tagged literal is not a symbol")]
    TagNotSymbol,
    #[error("nesting too deep")]
    NestingTooDeep,
}

fn decode(raw: &RawText, kind: AtomKind, encoding: Encoding) -> KString {
    match encoding.decode(&raw.0) {
        Some(s) => KString::from_string(s),
        None => {
            tracing::warn!(?kind, ?encoding, len = raw.0.len(),
                           "atom text not decodable, using placeholder");
            KString::from_static(DECODE_FAILED_PLACEHOLDER)
        }
    }
}

/// Build the tree for `node`. `depth_fuel` is the number of nested
/// compound nodes (sequences, maps, tagged literals, reader macro
/// forms) allowed.
pub fn build_value(node: &Node, encoding: Encoding, depth_fuel: u32) -> Value {
    match node {
        Node::End => Value::End,
        _ => match build(node, encoding, depth_fuel) {
            Ok(v) => v,
            Err(e) => {
                if e == BuildError::TagNotSymbol {
                    tracing::warn!("token source produced a tagged literal \
                                    with a non-symbol tag");
                }
                Value::Error(KString::from_string(e.to_string()))
            }
        }
    }
}

fn take_fuel(depth_fuel: u32) -> Result<u32, BuildError> {
    depth_fuel.checked_sub(1).ok_or(BuildError::NestingTooDeep)
}

fn build(node: &Node, encoding: Encoding, depth_fuel: u32)
         -> Result<Value, BuildError> {
    match node {
        Node::Error(_) => Err(BuildError::Malformed),
        Node::End => Err(BuildError::NestedEnd),
        Node::Atom(kind, raw) => Ok(kind.make(decode(raw, *kind, encoding))),
        Node::UnknownAtom(code, _) => Err(BuildError::UnknownAtomKind(*code)),
        Node::Sequence(kind, children) => {
            let fuel = take_fuel(depth_fuel)?;
            let mut items = Vec::with_capacity(children.len());
            for child in children {
                items.push(build(child, encoding, fuel)?);
            }
            Ok(kind.make(items))
        }
        Node::Dictionary(pairs) => {
            let fuel = take_fuel(depth_fuel)?;
            let mut entries = Vec::with_capacity(pairs.len());
            for (k, v) in pairs {
                let key = build(k, encoding, fuel)?;
                let value = build(v, encoding, fuel)?;
                entries.push((key, value));
            }
            Ok(Value::Dictionary(entries))
        }
        Node::Tagged(tag, payload) => {
            let fuel = take_fuel(depth_fuel)?;
            let tag = match build(tag, encoding, fuel)? {
                Value::Symbol(s) => s,
                _ => return Err(BuildError::TagNotSymbol),
            };
            let content = build(payload, encoding, fuel)?;
            Ok(Value::Tagged { tag, content: Box::new(content) })
        }
        Node::Wrapper(kind, child) => {
            let fuel = take_fuel(depth_fuel)?;
            Ok(kind.make(build(child, encoding, fuel)?))
        }
        Node::Unknown(code) => Err(BuildError::UnknownKind(*code)),
    }
}
