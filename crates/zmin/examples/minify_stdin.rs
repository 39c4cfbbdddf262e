// SPDX-License-Identifier: MIT OR Apache-2.0
//! Minimal usage demonstration: reads all of stdin, minifies it under the
//! SPORT profile, and writes the result to stdout.
//!
//! This is *not* the CLI front-end `spec.md` §1 excludes from scope: it
//! takes no flags, loads no configuration, and exists only so the
//! library can be exercised by hand.

use std::io::{self, Read, Write};

fn main() -> io::Result<()> {
    let mut input = Vec::new();
    io::stdin().read_to_end(&mut input)?;

    let dispatcher = zmin::init();
    let (output, code) = dispatcher.minify_mode(&input, zmin::Mode::Sport);
    if code != 0 {
        eprintln!("zmin: minify failed with error code {code}");
        std::process::exit(1);
    }

    io::stdout().write_all(&output)
}
