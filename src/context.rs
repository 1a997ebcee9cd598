// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Naming the input a read session reads from, for diagnostics.

use crate::pos::Pos;
use std::{path::PathBuf, fmt::{Formatter, Debug, Display}};

pub trait Context : Debug {
    /// Format the location to be put *after* the error reason and a
    /// space; includes "in" or "from".
    fn format_with_pos(&self, p: Pos, f: &mut Formatter<'_>)
                       -> Result<(), std::fmt::Error>;
    /// Format the input name alone.
    fn format_without_pos(&self, f: &mut Formatter<'_>)
                          -> Result<(), std::fmt::Error>;
}

#[derive(Debug)]
pub struct FileContext {
    pub path: PathBuf
}

impl Context for FileContext {
    fn format_with_pos(&self, pos: Pos, f: &mut Formatter<'_>)
                       -> Result<(), std::fmt::Error> {
        write!(f, "in {:?}{}", &self.path, pos)
    }
    fn format_without_pos(&self, f: &mut Formatter<'_>)
                          -> Result<(), std::fmt::Error> {
        write!(f, "{:?}", &self.path)
    }
}

/// Input without a path, e.g. `(reader)`.
#[derive(Debug)]
pub struct SpecialContext {
    name: String
}

impl SpecialContext {
    pub fn new(name: &str) -> Self {
        SpecialContext { name: name.to_string() }
    }
}

impl Context for SpecialContext {
    fn format_with_pos(&self, pos: Pos, f: &mut Formatter<'_>)
                       -> Result<(), std::fmt::Error> {
        write!(f, "from ({}){}", &self.name, pos)
    }
    fn format_without_pos(&self, f: &mut Formatter<'_>)
                          -> Result<(), std::fmt::Error> {
        write!(f, "({})", &self.name)
    }
}

/// Displays as "{reason} in {context}@{pos}".
pub struct Located<'t, E: Display> {
    pub reason: &'t E,
    pub pos: Pos,
    pub context: &'t dyn Context,
}

impl<'t, E: Display> Display for Located<'t, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{} ", self.reason)?;
        self.context.format_with_pos(self.pos, f)
    }
}

/// Displays the input name alone.
pub struct Name<'t>(pub &'t dyn Context);

impl<'t> Display for Name<'t> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.format_without_pos(f)
    }
}
