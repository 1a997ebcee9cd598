// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Utilities for debugging: a description of a value tree that shows
//! every variant by name, e.g. `List<[Int<1>, Keyword<a>]>`.

use crate::value::Value;
use std::fmt::Write;

fn describe_list<'t>(out: &mut String, vals: impl Iterator<Item = &'t Value>) {
    out.push('[');
    for (i, v) in vals.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        v.describe_into(out);
    }
    out.push(']');
}

impl Value {
    pub fn describe(&self) -> String {
        let mut out = String::new();
        self.describe_into(&mut out);
        out
    }

    fn describe_into(&self, out: &mut String) {
        let (name, text) = match self {
            Value::End => return out.push_str("End"),
            Value::Error(m) => ("Error", m),
            Value::Int(s) => ("Int", s),
            Value::Float(s) => ("Float", s),
            Value::Symbol(s) => ("Symbol", s),
            Value::Keyword(s) => ("Keyword", s),
            Value::String(s) => ("String", s),
            Value::Char(s) => ("Char", s),
            Value::List(v) | Value::Set(v) | Value::Vector(v) => {
                let name = match self {
                    Value::List(_) => "List",
                    Value::Set(_) => "Set",
                    _ => "Vector",
                };
                out.push_str(name);
                out.push('<');
                describe_list(out, v.iter());
                return out.push('>')
            }
            Value::Dictionary(entries) => {
                out.push_str("Dictionary<[");
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str("Entry<");
                    k.describe_into(out);
                    out.push(',');
                    v.describe_into(out);
                    out.push('>');
                }
                return out.push_str("]>")
            }
            Value::Tagged { tag, content } => {
                let _ = write!(out, "Tagged<Symbol<{}>,", tag);
                content.describe_into(out);
                return out.push('>')
            }
            _ => {
                if let Some((kind, content)) = self.wrapped() {
                    out.push_str(kind.name());
                    out.push('<');
                    content.describe_into(out);
                    out.push('>');
                }
                return
            }
        };
        let _ = write!(out, "{}<{}>", name, text);
    }
}
