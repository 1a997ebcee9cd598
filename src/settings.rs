// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for reading.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// ' ` ~ ~@ @ ^ #'
    pub reader_macros: bool,
    /// #tag form
    pub tagged_literals: bool,
    /// #_form
    pub discard: bool,
    pub comma_is_whitespace: bool,
}

/// Plain data as in the edn format description.
pub const EDN_FORMAT : Format = Format {
    reader_macros: false,
    tagged_literals: true,
    discard: true,
    comma_is_whitespace: true,
};

/// Code as data, with the reader macro forms.
pub const CLOJURE_FORMAT : Format = Format {
    reader_macros: true,
    tagged_literals: true,
    discard: true,
    comma_is_whitespace: true,
};

/// Fits a 2 MB thread stack (the default for spawned threads) with
/// room to spare, in debug builds, for every kind of nesting.
pub const DEFAULT_MAX_DEPTH : u32 = 200;

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub format: Format,
    /// Maximum nesting of collections, tagged literals and reader
    /// macro forms, for both the lexer and the tree builder.
    pub max_depth: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            format: CLOJURE_FORMAT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Settings {
    pub fn edn() -> Self {
        Settings {
            format: EDN_FORMAT,
            ..Settings::default()
        }
    }
}
