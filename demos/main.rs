// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use edntree::read::{parse_file_with, write_all};
use edntree::session::ReadSession;
use edntree::settings::Settings;
use edntree::Value;
use clap::Parser as ClapParser;
use std::io::{stdout, BufWriter};
use std::path::PathBuf;
use anyhow::{Result, bail};


#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Read the whole file before printing (default: stream values)
    #[clap(short, long, value_parser)]
    all: bool,
    /// Print the values read
    #[clap(long, value_parser)]
    print: bool,
    /// Print the debug description of each value instead of EDN text
    #[clap(short, long, value_parser)]
    describe: bool,
    /// Plain edn, without reader macro forms like 'x or @x
    #[clap(long, value_parser)]
    edn: bool,
    /// Path to the input file
    #[clap(value_parser, required(true))]
    input_path: PathBuf,
}

fn show(v: &Value, describe: bool) {
    if describe {
        println!("{}", v.describe());
    } else {
        println!("{}", v);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let settings = if args.edn { Settings::edn() } else { Settings::default() };

    if args.all {

        // Slurp in the whole file contents, then optionally print.

        let v = parse_file_with(&args.input_path, &settings);
        if let Some(Value::Error(msg)) = v.first() {
            bail!("{:?}: {}", args.input_path, msg)
        }
        if args.print {
            if args.describe {
                for val in &v {
                    show(val, true);
                }
            } else {
                write_all(BufWriter::new(stdout()), &v)?;
            }
        }
        println!(";; count_toplevel = {}", v.len());

    } else {

        // Stream through the values, printing each as it is read.

        let mut session = ReadSession::open(&args.input_path, &settings)?;
        let mut count_toplevel = 0;
        while let Some(val) = session.next() {
            if let Value::Error(msg) = &val {
                let detail = session.last_diagnostic().unwrap_or(msg.as_str());
                bail!("{}", detail)
            }
            count_toplevel += 1;
            if args.print {
                show(&val, args.describe);
            }
        }
        session.close();
        println!(";; count_toplevel = {count_toplevel}");

    }
    Ok(())
}
