// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Numeric interpretation of the text of Int and Float atoms. The
//! reader itself keeps numbers as text; this is for consumers.

use num::BigInt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(BigInt),
    Float(f64),
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}

fn strip_plus(s: &str) -> &str {
    s.strip_prefix('+').unwrap_or(s)
}

/// `-12`, `+7`, `12345678901234567890N`
pub fn parse_int(s: &str) -> Option<Number> {
    let s = s.strip_suffix('N').unwrap_or(s);
    BigInt::from_str(strip_plus(s)).ok().map(Number::Integer)
}

/// `1.5`, `-2e10`, `3.0M`
pub fn parse_float(s: &str) -> Option<Number> {
    let s = s.strip_suffix('M').unwrap_or(s);
    f64::from_str(strip_plus(s)).ok().map(Number::Float)
}
