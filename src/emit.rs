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

//! Writes generated tables as C or Rust source.
//!
//! Artifacts are never overwritten. Each one is written to a temporary file
//! next to its target and moved into place only if the target still does
//! not exist.

use std::{
    error::Error,
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::{
    delta::Delta,
    errors::{EmitError, IoResultExt as _},
    role::Role,
    square::Square,
    tables::{Tables, BASES_LEN, MOVEMENT_INFO_LEN},
};

/// Default file name stem of the generated artifacts.
pub const DEFAULT_STEM: &str = "delta_movement_info";

const GENERATOR: &str = "generate-delta-movements";

const INDENT: usize = 4;

// Different widths give the two arrays distinct shapes.
const MOVEMENT_INFO_WIDTH: usize = 99;
const BASES_WIDTH: usize = 51;

/// Source language of the generated artifacts.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum Format {
    /// A header declaring the tables and a source file defining them.
    #[default]
    C,
    /// A single module with both tables as `static` arrays.
    Rust,
}

impl Format {
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Format::C => &["h", "c"],
            Format::Rust => &["rs"],
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::C => "c",
            Format::Rust => "rust",
        })
    }
}

/// Error when parsing an unknown output format.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseFormatError;

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid output format (expected 'c' or 'rust')")
    }
}

impl Error for ParseFormatError {}

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Format, ParseFormatError> {
        match s {
            "c" | "C" => Ok(Format::C),
            "rust" | "rs" => Ok(Format::Rust),
            _ => Err(ParseFormatError),
        }
    }
}

/// A rendered output file.
#[derive(Clone, Debug)]
pub struct Artifact {
    file_name: String,
    contents: Vec<u8>,
}

impl Artifact {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}

/// Renders and writes the generated tables.
///
/// # Examples
///
/// ```
/// use delta_movements::{emit::{Emitter, Format}, Tables};
///
/// let tables = Tables::generate()?;
/// let emitter = Emitter::new("src/engine").format(Format::C);
/// let artifacts = emitter.render(&tables)?;
///
/// assert_eq!(artifacts[0].file_name(), "delta_movement_info.h");
/// assert_eq!(artifacts[1].file_name(), "delta_movement_info.c");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Emitter {
    dir: PathBuf,
    stem: String,
    format: Format,
}

impl Emitter {
    /// Creates an emitter writing C artifacts named after [`DEFAULT_STEM`]
    /// into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Emitter {
        Emitter {
            dir: dir.into(),
            stem: DEFAULT_STEM.to_owned(),
            format: Format::default(),
        }
    }

    #[must_use]
    pub fn stem(mut self, stem: impl Into<String>) -> Emitter {
        self.stem = stem.into();
        self
    }

    #[must_use]
    pub fn format(mut self, format: Format) -> Emitter {
        self.format = format;
        self
    }

    /// Paths this emitter writes to, in writing order.
    pub fn targets(&self) -> Vec<PathBuf> {
        self.format
            .extensions()
            .iter()
            .map(|ext| self.dir.join(format!("{}.{ext}", self.stem)))
            .collect()
    }

    /// Renders all artifacts into memory.
    pub fn render(&self, tables: &Tables) -> io::Result<Vec<Artifact>> {
        let header_name = format!("{}.h", self.stem);

        let mut artifacts = Vec::new();
        for ext in self.format.extensions() {
            let mut contents = Vec::new();
            match *ext {
                "h" => write_c_header(&mut contents, &self.stem, tables)?,
                "c" => write_c_source(&mut contents, &header_name, tables)?,
                _ => write_rust_module(&mut contents, tables)?,
            }
            artifacts.push(Artifact {
                file_name: format!("{}.{ext}", self.stem),
                contents,
            });
        }
        Ok(artifacts)
    }

    /// Writes all artifacts to `w`, one after another.
    pub fn write_to<W: Write>(&self, tables: &Tables, w: &mut W) -> io::Result<()> {
        for (i, artifact) in self.render(tables)?.iter().enumerate() {
            if i > 0 {
                writeln!(w)?;
            }
            w.write_all(artifact.contents())?;
        }
        w.flush()
    }

    /// Writes all artifacts into the target directory.
    ///
    /// # Errors
    ///
    /// Fails without writing anything if any target already exists. If a
    /// later artifact cannot be written, artifacts already placed by this
    /// call are removed again.
    pub fn emit(&self, tables: &Tables) -> Result<Vec<PathBuf>, EmitError> {
        let artifacts = self.render(tables).ctx(&self.dir)?;
        let targets = self.targets();

        if let Some(path) = targets.iter().find(|path| path.exists()) {
            return Err(EmitError::OutputExists { path: path.clone() });
        }

        let mut written = Vec::with_capacity(targets.len());
        for (artifact, target) in artifacts.iter().zip(targets) {
            if let Err(err) = write_new(&self.dir, &target, artifact.contents()) {
                roll_back(&written);
                return Err(err);
            }
            info!(path = %target.display(), bytes = artifact.contents().len(), "wrote artifact");
            written.push(target);
        }

        Ok(written)
    }
}

fn write_new(dir: &Path, target: &Path, contents: &[u8]) -> Result<(), EmitError> {
    let mut file = NamedTempFile::new_in(dir).ctx(dir)?;
    file.write_all(contents).ctx(target)?;
    file.as_file().sync_all().ctx(target)?;
    file.persist_noclobber(target)
        .map_err(|err| err.error)
        .ctx(target)?;
    Ok(())
}

fn roll_back(written: &[PathBuf]) {
    for path in written {
        match fs::remove_file(path) {
            Ok(()) => warn!(path = %path.display(), "removed partially emitted artifact"),
            Err(error) => warn!(path = %path.display(), %error, "could not remove artifact"),
        }
    }
}

fn include_guard(stem: &str) -> String {
    let mut guard: String = stem
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    if guard.starts_with(|ch: char| ch.is_ascii_digit()) {
        guard.insert(0, '_');
    }
    guard.push_str("_H");
    guard
}

/// Writes `values` as comma separated `0xNN` literals, wrapped so that no
/// line exceeds `max_line_length` columns.
fn write_u8_array<W: Write>(w: &mut W, values: &[u8], max_line_length: usize) -> io::Result<()> {
    // Each literal takes six columns including its separator, the last one
    // on a line only five.
    let per_line = ((max_line_length - INDENT + 1) / 6).max(1);
    let mut lines = values.chunks(per_line).peekable();
    while let Some(line) = lines.next() {
        write!(w, "{:width$}", "", width = INDENT)?;
        for (i, value) in line.iter().enumerate() {
            if i > 0 {
                write!(w, ", ")?;
            }
            write!(w, "0x{value:02X}")?;
        }
        if lines.peek().is_some() {
            writeln!(w, ",")?;
        } else {
            writeln!(w)?;
        }
    }
    Ok(())
}

fn role_bits_description() -> String {
    Role::ALL
        .iter()
        .map(|role| format!("{} = {}", role, u8::from(*role)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The example in the header documentation, using values from the actual
/// table: a bishop move from c5 to a3.
fn example_lookup(tables: &Tables) -> (u8, u8, usize, u8) {
    let (from, to) = (Square::C5, Square::A3);
    let delta = Delta::between(to, from);
    let flags = tables.movement_info().movers(delta).bits();
    (from.to_u8(), to.to_u8(), delta.table_index(), flags)
}

fn write_c_header<W: Write>(w: &mut W, stem: &str, tables: &Tables) -> io::Result<()> {
    let guard = include_guard(stem);
    let (from, to, index, flags) = example_lookup(tables);

    writeln!(w, "/*")?;
    writeln!(w, " * Generated by '{GENERATOR}'. Do not edit.")?;
    writeln!(w, " */")?;
    writeln!(w)?;
    writeln!(w, "#ifndef {guard}")?;
    writeln!(w, "#define {guard}")?;
    writeln!(w)?;
    writeln!(w, "#include <stdint.h>")?;
    writeln!(w)?;
    writeln!(w, "#define DELTA_MOVEMENT_INFO_BIAS 0x{:02X}", Delta::MAX)?;
    writeln!(
        w,
        "#define DELTA_MOVEMENT_IS_VALID_FOR_PIECE(flags, piece_type) ((((flags) >> (piece_type)) & 1) != 0)"
    )?;
    writeln!(w)?;
    writeln!(w, "/* g_delta_movement_info is indexed by DELTA_MOVEMENT_INFO_BIAS plus the")?;
    writeln!(w, " * difference between two on-board squares (destination - source). Every")?;
    writeln!(w, " * entry is a set of bits: bit N is set if a piece of type N can travel that")?;
    writeln!(w, " * difference in a single move, ignoring pieces in between. The piece type")?;
    writeln!(w, " * bits are: {}.", role_bits_description())?;
    writeln!(w, " * The entries for a difference and its negation hold the same bits.")?;
    writeln!(w, " *   For example, moving from 0x{from:02X} to 0x{to:02X} looks up index")?;
    writeln!(
        w,
        " * 0x{:02X} + (0x{to:02X} - 0x{from:02X}) = 0x{index:02X}, which holds 0x{flags:02X}.",
        Delta::MAX
    )?;
    writeln!(w, " *   Pawns are not covered: whether a pawn may move by a difference depends")?;
    writeln!(w, " * on its side and rank, so pawn moves must be checked separately.")?;
    writeln!(w, " *")?;
    writeln!(w, " * g_delta_bases is indexed by the absolute value of a difference a sliding")?;
    writeln!(w, " * piece can travel. It holds the step that walks the same direction one")?;
    writeln!(w, " * square at a time. Negate the step if the difference was negative:")?;
    writeln!(w, " *")?;
    writeln!(w, " *     step = g_delta_bases[abs(delta)] * (delta < 0 ? -1 : 1)")?;
    writeln!(w, " *")?;
    writeln!(w, " * so that -0x60 walks by -0x10 and +0x4B walks by +0x0F. Entries for")?;
    writeln!(w, " * differences no sliding piece can travel are zero.")?;
    writeln!(w, " */")?;
    writeln!(w, "extern const uint8_t g_delta_movement_info[0x{MOVEMENT_INFO_LEN:02X}];")?;
    writeln!(w, "extern const uint8_t g_delta_bases[0x{BASES_LEN:02X}];")?;
    writeln!(w)?;
    writeln!(w, "#endif /* !defined({guard}) */")
}

fn write_c_source<W: Write>(w: &mut W, header_name: &str, tables: &Tables) -> io::Result<()> {
    writeln!(w, "/*")?;
    writeln!(w, " * Generated by '{GENERATOR}'. Do not edit.")?;
    writeln!(w, " */")?;
    writeln!(w)?;
    writeln!(w, "#include \"{header_name}\"")?;
    writeln!(w)?;
    writeln!(w, "const uint8_t g_delta_movement_info[] = {{")?;
    write_u8_array(w, tables.movement_info().as_bytes(), MOVEMENT_INFO_WIDTH)?;
    writeln!(w, "}};")?;
    writeln!(w)?;
    writeln!(w, "const uint8_t g_delta_bases[] = {{")?;
    write_u8_array(w, tables.bases().as_bytes(), BASES_WIDTH)?;
    writeln!(w, "}};")
}

fn write_rust_module<W: Write>(w: &mut W, tables: &Tables) -> io::Result<()> {
    writeln!(w, "// Generated by '{GENERATOR}'. Do not edit.")?;
    writeln!(w)?;
    writeln!(w, "/// Roles able to travel `to - from` in one move, indexed by")?;
    writeln!(w, "/// `0x{:02X} + (to - from)`. Bit N is set for piece type N", Delta::MAX)?;
    writeln!(w, "/// ({}). Pawns are not covered.", role_bits_description())?;
    writeln!(w, "#[rustfmt::skip]")?;
    writeln!(w, "pub static DELTA_MOVEMENT_INFO: [u8; {MOVEMENT_INFO_LEN}] = [")?;
    write_u8_array(w, tables.movement_info().as_bytes(), MOVEMENT_INFO_WIDTH)?;
    writeln!(w, "];")?;
    writeln!(w)?;
    writeln!(w, "/// Single step along a sliding move, indexed by the absolute value of the")?;
    writeln!(w, "/// move's delta. Negate for negative deltas. Zero if no slider can travel")?;
    writeln!(w, "/// the delta.")?;
    writeln!(w, "#[rustfmt::skip]")?;
    writeln!(w, "pub static DELTA_BASES: [u8; {BASES_LEN}] = [")?;
    write_u8_array(w, tables.bases().as_bytes(), BASES_WIDTH)?;
    writeln!(w, "];")
}
