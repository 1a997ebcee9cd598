// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A read session: one input stream, one token source with its scan
//! state, read one value at a time.

use crate::build::build_value;
use crate::buffered_chars::{buffered_chars, Chars};
use crate::context::{Context, FileContext, Located, Name, SpecialContext};
use crate::lexer::EdnLexer;
use crate::node::{Node, TokenSource};
use crate::settings::Settings;
use crate::value::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Holds a node while it is being converted; gives it back to the
/// token source when dropped.
struct NodeLease<'a, T: TokenSource> {
    source: &'a mut T,
    node: Node,
}

impl<'a, T: TokenSource> Drop for NodeLease<'a, T> {
    fn drop(&mut self) {
        let node = std::mem::replace(&mut self.node, Node::End);
        self.source.release(node);
    }
}

pub struct ReadSession<'s, T: TokenSource> {
    chars: Chars<'s>,
    source: T,
    state: T::State,
    context: Box<dyn Context>,
    depth_fuel: u32,
    last_diagnostic: Option<String>,
    done: bool,
}

impl ReadSession<'static, EdnLexer> {
    /// Open `path` for reading with the built-in EDN lexer.
    pub fn open(path: &Path, settings: &Settings) -> Result<Self, std::io::Error> {
        let fh = File::open(path)?;
        tracing::debug!(?path, "opened read session");
        Ok(ReadSession::new(fh,
                            Box::new(FileContext { path: path.to_path_buf() }),
                            EdnLexer::new(*settings),
                            settings))
    }
}

impl<'s> ReadSession<'s, EdnLexer> {
    /// Read from any `Read` with the built-in EDN lexer.
    pub fn from_reader(fh: impl Read + 's, settings: &Settings) -> Self {
        ReadSession::new(fh,
                         Box::new(SpecialContext::new("reader")),
                         EdnLexer::new(*settings),
                         settings)
    }
}

impl<'s, T: TokenSource> ReadSession<'s, T> {
    pub fn new(
        fh: impl Read + 's,
        context: Box<dyn Context>,
        source: T,
        settings: &Settings,
    ) -> Self {
        ReadSession {
            chars: buffered_chars(fh),
            source,
            state: T::State::default(),
            context,
            depth_fuel: settings.max_depth,
            last_diagnostic: None,
            done: false,
        }
    }

    /// Read the next value: a data value, `Value::End` at the end of
    /// the input, or `Value::Error` for malformed input.
    pub fn read_next(&mut self) -> Value {
        let encoding = self.source.encoding();
        let node = self.source.read_node(&mut *self.chars, &mut self.state);
        let lease = NodeLease { source: &mut self.source, node };
        if let Node::Error(e) = &lease.node {
            let diagnostic = Located {
                reason: &e.err,
                pos: e.pos,
                context: &*self.context,
            }.to_string();
            tracing::debug!(%diagnostic, "malformed input");
            self.last_diagnostic = Some(diagnostic);
        }
        let value = build_value(&lease.node, encoding, self.depth_fuel);
        drop(lease);
        tracing::trace!(%value, "read");
        value
    }

    /// The token source's own description of the last malformed input
    /// seen, with location.
    pub fn last_diagnostic(&self) -> Option<&str> {
        self.last_diagnostic.as_deref()
    }

    /// Release the stream. Dropping the session has the same effect.
    pub fn close(self) {
        tracing::debug!(input = %Name(&*self.context), "closing read session");
    }
}

/// Yields the data values, then a final `Value::Error` if reading
/// failed; never yields `Value::End`.
impl<'s, T: TokenSource> Iterator for ReadSession<'s, T> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        if self.done {
            return None
        }
        match self.read_next() {
            Value::End => {
                self.done = true;
                None
            }
            v @ Value::Error(_) => {
                self.done = true;
                Some(v)
            }
            v => Some(v),
        }
    }
}
