// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Classified nodes, the interface between a token source (lexer)
//! and the [tree builder](../build/index.html).

//! A token source hands out one [Node](Node) per call, a complete
//! top-level form with all of its children, or one of the sentinels
//! `Error` and `End`. Atom text is kept as raw bytes in the encoding
//! the source declares; decoding is the builder's job.

use crate::buffered_chars::CharResult;
use crate::lexer::LexErrorWithPos;
use crate::value::{AtomKind, SequenceKind, WrapperKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    /// Fixed width 4 byte units, as used by `wchar_t` based
    /// tokenizers.
    Utf32Le,
}

impl Encoding {
    /// Returns None if `bytes` is not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(String::from),
            Encoding::Utf32Le => {
                let units = bytes.chunks_exact(4);
                if !units.remainder().is_empty() {
                    return None
                }
                units.map(|u| char::from_u32(
                    u32::from_le_bytes([u[0], u[1], u[2], u[3]])))
                    .collect()
            }
        }
    }

    pub fn encode(self, s: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => s.as_bytes().to_vec(),
            Encoding::Utf32Le =>
                s.chars().flat_map(|c| (c as u32).to_le_bytes()).collect(),
        }
    }
}

/// The undecoded text of an atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText(pub Vec<u8>);

impl RawText {
    pub fn new(s: &str, encoding: Encoding) -> Self {
        RawText(encoding.encode(s))
    }
}

#[derive(Debug)]
pub enum Node {
    /// Malformed input; carries the source's own diagnostic.
    Error(LexErrorWithPos),
    End,
    Atom(AtomKind, RawText),
    /// An atom sub-kind this reader does not know about, by the
    /// source's numeric code.
    UnknownAtom(u16, RawText),
    Sequence(SequenceKind, Vec<Node>),
    Dictionary(Vec<(Node, Node)>),
    /// Tag (expected to be a symbol atom), payload.
    Tagged(Box<Node>, Box<Node>),
    Wrapper(WrapperKind, Box<Node>),
    /// A node kind this reader does not know about.
    Unknown(u16),
}

impl Node {
    pub fn atom(kind: AtomKind, s: &str, encoding: Encoding) -> Node {
        Node::Atom(kind, RawText::new(s, encoding))
    }
}

pub trait TokenSource {
    /// Scan state, created fresh for every read session.
    type State: Default;

    /// The encoding of the raw text in the atoms this source returns.
    fn encoding(&self) -> Encoding;

    /// Read the next complete form from `chars`. Returns `Node::End`
    /// at the end of the input, `Node::Error` on malformed input.
    fn read_node(
        &mut self,
        chars: &mut dyn Iterator<Item = CharResult>,
        state: &mut Self::State,
    ) -> Node;

    /// Called exactly once for every node returned by `read_node`,
    /// after it has been converted to a value.
    fn release(&mut self, node: Node) {
        drop(node)
    }
}
