// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Get characters and their positions from anything implementing
//! `Read`. This is the stream handle a
//! [ReadSession](../session/struct.ReadSession.html) owns.

use crate::pos::Pos;
use std::io::{self, Read};
use thiserror::Error;
use utf8::{BufReadDecoder, BufReadDecoderError};
use genawaiter::rc::Gen;

#[derive(Error, Debug)]
pub enum CharsError {
    #[error("IO error: {0}")]
    Io(io::Error),
    #[error("invalid UTF-8 sequence of {0} byte(s)")]
    InvalidUtf8(usize),
}

pub type CharResult = Result<(char, Pos), CharsError>;

/// A boxed character stream; ends after the first error.
pub type Chars<'s> = Box<dyn Iterator<Item = CharResult> + 's>;

pub fn buffered_chars<'s, R>(fh: R) -> Chars<'s>
    where R: Read + 's
{
    Box::new(Gen::new(|co| async move {
        let mut inp = BufReadDecoder::new(io::BufReader::new(fh));
        let mut pos = Pos::default();
        while let Some(r) = inp.next_strict() {
            let s = match r {
                Ok(s) => s,
                Err(e) => {
                    let e = match e {
                        BufReadDecoderError::Io(e) => CharsError::Io(e),
                        BufReadDecoderError::InvalidByteSequence(bytes) =>
                            CharsError::InvalidUtf8(bytes.len()),
                    };
                    co.yield_(Err(e)).await;
                    return;
                }
            };
            for c in s.chars() {
                co.yield_(Ok((c, pos))).await;
                pos = pos.after(c);
            }
        }
    }).into_iter())
}
