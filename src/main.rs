// This file is part of the delta-movements generator.
// Copyright (C) 2026 The delta-movements developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::{
    io::{self, IsTerminal, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{ArgAction, Parser};
use delta_movements::{emit::DEFAULT_STEM, Emitter, Format, Tables};
use tracing::{error, level_filters::LevelFilter};

/// Generates the 0x88 delta movement and delta base tables, checks them,
/// and writes them as source files. Existing files are never overwritten.
#[derive(Debug, Parser)]
#[command(version)]
struct Opt {
    /// Directory to write the artifacts to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// File name stem of the artifacts
    #[arg(long, default_value = DEFAULT_STEM)]
    stem: String,
    /// Output language: c (header and source) or rust (single module)
    #[arg(long, default_value_t = Format::C)]
    format: Format,
    /// Print the artifacts to stdout instead of writing files
    #[arg(long)]
    stdout: bool,
    /// Log more (-v for written files, -vv for table statistics)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let opt = Opt::parse();

    tracing_subscriber::fmt()
        .with_max_level(match opt.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        })
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    match run(&opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(opt: &Opt) -> Result<(), Box<dyn std::error::Error>> {
    let tables = Tables::generate()?;

    let emitter = Emitter::new(&opt.out_dir)
        .stem(&opt.stem)
        .format(opt.format);

    if opt.stdout {
        print(&emitter, &tables, &mut io::stdout().lock())?;
    } else {
        emitter.emit(&tables)?;
    }

    Ok(())
}

/// Prints the artifacts, stopping quietly when the reader goes away.
fn print<W: Write>(emitter: &Emitter, tables: &Tables, w: &mut W) -> io::Result<()> {
    match emitter.write_to(tables, w) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        res => res,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Closed(io::ErrorKind);

    impl Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(self.0.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_print_ignores_broken_pipe() {
        let tables = Tables::generate().expect("tables");
        let emitter = Emitter::new(".");

        assert!(print(&emitter, &tables, &mut Closed(io::ErrorKind::BrokenPipe)).is_ok());

        let err = print(&emitter, &tables, &mut Closed(io::ErrorKind::WriteZero))
            .expect_err("other errors are reported");
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
    }

    #[test]
    fn test_print_matches_write_to() {
        let tables = Tables::generate().expect("tables");
        let emitter = Emitter::new(".").format(Format::Rust);

        let mut printed = Vec::new();
        print(&emitter, &tables, &mut printed).expect("print");

        let mut expected = Vec::new();
        emitter.write_to(&tables, &mut expected).expect("write");
        assert_eq!(printed, expected);
    }
}
