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

use std::{error, fmt, io, path::PathBuf};

use crate::{delta::Delta, movers::Movers, role::Role, square::Square};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error while computing the tables. Always a logic defect.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GenerateError {
    /// A computed index does not fit the table it addresses.
    IndexOutOfRange {
        #[allow(missing_docs)]
        table: &'static str,
        #[allow(missing_docs)]
        index: usize,
        #[allow(missing_docs)]
        len: usize,
    },
    /// Two square pairs with the same delta produced different movers.
    InconsistentDelta {
        #[allow(missing_docs)]
        delta: Delta,
        #[allow(missing_docs)]
        first: Movers,
        #[allow(missing_docs)]
        second: Movers,
    },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::IndexOutOfRange { table, index, len } => {
                write!(f, "index {index} out of range for {table} (length {len})")
            }
            GenerateError::InconsistentDelta {
                delta,
                first,
                second,
            } => write!(
                f,
                "delta {delta} yields movers {first} and {second} for different square pairs"
            ),
        }
    }
}

impl error::Error for GenerateError {}

/// Generated tables disagree with the independently derived expectations.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SelfTestError {
    /// Movement table lookup differs from the expected validity.
    Movement {
        #[allow(missing_docs)]
        role: Role,
        #[allow(missing_docs)]
        delta: Delta,
        #[allow(missing_docs)]
        expected: bool,
        #[allow(missing_docs)]
        actual: bool,
    },
    /// One of the canonical sliding offsets has no delta base.
    MissingBase {
        #[allow(missing_docs)]
        magnitude: u8,
    },
    /// A delta base is defined for an offset outside the canonical list.
    UnexpectedBase {
        #[allow(missing_docs)]
        magnitude: u8,
        #[allow(missing_docs)]
        base: u8,
    },
    /// Walking by the delta base does not lead from one square to the other.
    Ray {
        #[allow(missing_docs)]
        from: Square,
        #[allow(missing_docs)]
        to: Square,
        /// Signed step used for the walk, if any.
        base: Option<Delta>,
    },
}

impl fmt::Display for SelfTestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelfTestError::Movement {
                role,
                delta,
                expected,
                actual,
            } => write!(
                f,
                "{role} move by {delta}: expected valid={expected}, table says valid={actual}"
            ),
            SelfTestError::MissingBase { magnitude } => {
                write!(f, "no delta base for sliding offset 0x{magnitude:02X}")
            }
            SelfTestError::UnexpectedBase { magnitude, base } => write!(
                f,
                "unexpected delta base 0x{base:02X} for offset 0x{magnitude:02X}"
            ),
            SelfTestError::Ray {
                from,
                to,
                base: Some(base),
            } => write!(f, "stepping by {base} does not lead from {from} to {to}"),
            SelfTestError::Ray {
                from,
                to,
                base: None,
            } => write!(f, "no delta base for the ray from {from} to {to}"),
        }
    }
}

impl error::Error for SelfTestError {}

/// Error while writing the generated artifacts.
#[derive(Debug)]
pub enum EmitError {
    /// Refusing to overwrite an existing artifact.
    OutputExists {
        #[allow(missing_docs)]
        path: PathBuf,
    },
    /// I/O error.
    Io {
        #[allow(missing_docs)]
        path: PathBuf,
        #[allow(missing_docs)]
        error: io::Error,
    },
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::OutputExists { path } => write!(
                f,
                "not overwriting existing file '{}', delete it first",
                path.display()
            ),
            EmitError::Io { path, error } => {
                write!(f, "i/o error writing '{}': {error}", path.display())
            }
        }
    }
}

impl error::Error for EmitError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            EmitError::Io { error, .. } => Some(error),
            EmitError::OutputExists { .. } => None,
        }
    }
}

pub(crate) trait IoResultExt<T> {
    fn ctx(self, path: impl Into<PathBuf>) -> Result<T, EmitError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn ctx(self, path: impl Into<PathBuf>) -> Result<T, EmitError> {
        self.map_err(|error| match error.kind() {
            io::ErrorKind::AlreadyExists => EmitError::OutputExists { path: path.into() },
            _ => EmitError::Io {
                path: path.into(),
                error,
            },
        })
    }
}

/// Any error of the generator.
#[derive(Debug)]
pub enum Error {
    /// Computing the tables failed.
    Generate(GenerateError),
    /// The tables failed the self-test.
    SelfTest(SelfTestError),
    /// Writing the tables failed.
    Emit(EmitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Generate(error) => write!(f, "table generation failed: {error}"),
            Error::SelfTest(error) => write!(f, "self-test failed: {error}"),
            Error::Emit(error) => error.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Generate(error) => Some(error),
            Error::SelfTest(error) => Some(error),
            Error::Emit(error) => error.source(),
        }
    }
}

impl From<GenerateError> for Error {
    fn from(error: GenerateError) -> Error {
        Error::Generate(error)
    }
}

impl From<SelfTestError> for Error {
    fn from(error: SelfTestError) -> Error {
        Error::SelfTest(error)
    }
}

impl From<EmitError> for Error {
    fn from(error: EmitError) -> Error {
        Error::Emit(error)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_already_exists_maps_to_output_exists() {
        let result: io::Result<()> = Err(io::Error::from(io::ErrorKind::AlreadyExists));
        assert!(matches!(
            result.ctx("delta_movement_info.h"),
            Err(EmitError::OutputExists { .. })
        ));

        let result: io::Result<()> = Err(io::Error::from(io::ErrorKind::PermissionDenied));
        let error = result.ctx("delta_movement_info.c").unwrap_err();
        assert!(matches!(error, EmitError::Io { .. }));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_self_test_message_names_role_and_delta() {
        let error = Error::from(SelfTestError::Movement {
            role: Role::Bishop,
            delta: Delta::new(-0x0f).expect("in range"),
            expected: true,
            actual: false,
        });
        let message = error.to_string();
        assert!(message.contains("bishop"));
        assert!(message.contains("-0x0F"));
    }
}
