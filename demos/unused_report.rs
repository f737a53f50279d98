// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loads a configuration file, performs one sample lookup, and reports
//! every entry the program never consulted on standard error.
//!
//! ```text
//! cargo run --example unused_report -- service.toml
//! ```

use cfgtrail::prelude::*;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: unused_report <config-file>");
        return ExitCode::FAILURE;
    };

    let mut conf = Config::with_notify(|st| {
        if !st.visited() {
            eprintln!("config not visited: {}", st.path());
        }
    });
    if let Err(err) = conf.load(&path) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match conf
        .root()
        .child("module")
        .and_then(|module| module.child("name"))
        .and_then(|name| name.to_string())
    {
        Ok(name) => println!("module.name = {name}"),
        Err(err) => eprintln!("{err}"),
    }

    ExitCode::SUCCESS
}
