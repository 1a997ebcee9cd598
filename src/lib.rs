// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A reader for EDN and Clojure style data: turns text into a tree of
//! typed [values](value/enum.Value.html).
//!
//! * `edntree::parse_file` and `edntree::parse_string` read a whole
//!   input into a `Vec<Value>`. Failure is reported in-band, as a
//!   result holding just one `Value::Error`.
//!
//! * Reading is layered: a [token source](node/trait.TokenSource.html)
//!   (the built-in one is [EdnLexer](lexer/struct.EdnLexer.html))
//!   classifies one complete form at a time into a
//!   [Node](node/enum.Node.html), the [builder](build/index.html)
//!   turns it into a `Value`, and a
//!   [ReadSession](session/struct.ReadSession.html) drives the two
//!   over one input stream. Sessions can also be iterated to stream
//!   values without collecting them.
//!
//! * Other token sources, e.g. ones handing out UTF-32 text, can be
//!   plugged into a `ReadSession`.
//!
//! Atoms keep their text as written (numbers are not converted, string
//! escapes are not resolved); see `Value::number` for numbers.

pub mod buffered_chars;
pub mod build;
pub mod context;
pub mod debug;
pub mod lexer;
pub mod node;
pub mod number;
pub mod pos;
pub mod read;
pub mod session;
pub mod settings;
pub mod value;

pub use read::{parse_file, parse_string};
pub use value::Value;
