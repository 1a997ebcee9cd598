// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reading whole inputs into a sequence of values, and writing them
//! back.

//! All entry points report failure in-band: the result is either the
//! list of values read, or a list containing just one
//! `Value::Error`. Values read before a malformed form are
//! discarded.

use crate::node::TokenSource;
use crate::session::ReadSession;
use crate::settings::Settings;
use crate::value::Value;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

pub const FILE_NOT_FOUND_MESSAGE: &str = "File does not exist";

/// Read values until the end of the input or the first error, then
/// close the session.
pub fn read_all<T: TokenSource>(mut session: ReadSession<'_, T>) -> Vec<Value> {
    let mut values = Vec::new();
    let result = loop {
        match session.read_next() {
            Value::End => break values,
            e @ Value::Error(_) => {
                tracing::debug!(discarded = values.len(), "read failed");
                break vec![e]
            }
            v => values.push(v),
        }
    };
    session.close();
    result
}

pub fn parse_file(path: &Path) -> Vec<Value> {
    parse_file_with(path, &Settings::default())
}

pub fn parse_file_with(path: &Path, settings: &Settings) -> Vec<Value> {
    match ReadSession::open(path, settings) {
        Ok(session) => read_all(session),
        Err(e) => {
            tracing::debug!(?path, error = %e, "can't open input");
            if e.kind() == ErrorKind::NotFound {
                vec![Value::error(FILE_NOT_FOUND_MESSAGE)]
            } else {
                vec![Value::error(&format!("could not open file: {}", e))]
            }
        }
    }
}

/// Read from memory or any other stream, without a file.
pub fn parse_reader(fh: impl Read, settings: &Settings) -> Vec<Value> {
    read_all(ReadSession::from_reader(fh, settings))
}

/// Same as writing `source` to a file and calling
/// [parse_file](parse_file) on it, which is what this does, in the
/// system temporary directory.
pub fn parse_string(source: &str) -> Vec<Value> {
    parse_string_in(&std::env::temp_dir(), source)
}

pub fn parse_string_in(dir: &Path, source: &str) -> Vec<Value> {
    parse_string_with(dir, source, &Settings::default())
}

/// Stage `source` in a uniquely named file in `dir`, parse it and
/// remove the file again, whatever the outcome.
pub fn parse_string_with(dir: &Path, source: &str, settings: &Settings) -> Vec<Value> {
    // tempfile retries with a new random name if one is taken
    let mut tmp = match tempfile::Builder::new()
        .prefix("edntree-")
        .suffix(".edn")
        .tempfile_in(dir)
    {
        Ok(tmp) => tmp,
        Err(e) => {
            tracing::warn!(?dir, error = %e, "can't create temporary file");
            return vec![Value::error(&format!("could not stage input: {}", e))]
        }
    };
    tracing::trace!(path = ?tmp.path(), "staged input");
    if let Err(e) = tmp.write_all(source.as_bytes()).and_then(|()| tmp.flush()) {
        tracing::warn!(path = ?tmp.path(), error = %e, "can't write temporary file");
        return vec![Value::error(&format!("could not stage input: {}", e))]
    }
    let values = parse_file_with(tmp.path(), settings);
    if let Err(e) = tmp.close() {
        tracing::warn!(error = %e, "can't remove temporary file");
    }
    values
}

pub fn write_all<'t>(
    out: impl Write,
    vals: impl IntoIterator<Item = &'t Value>
) -> Result<(), std::io::Error> {
    let mut out = out; // for `File`
    for v in vals.into_iter() {
        writeln!(out, "{}", v)?;
    }
    out.flush()
}

pub fn write_file<'t>(path: &Path, vals: impl IntoIterator<Item = &'t Value>)
                      -> Result<(), std::io::Error> {
    write_all(File::create(path)?, vals)
}
