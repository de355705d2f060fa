//! Generator for the 0x88 delta movement tables of a chess move generator.
//!
//! On a 0x88 board the difference between two squares identifies both the
//! direction and the distance of a move. This crate computes, for every
//! such difference, which piece types can travel it in one move
//! ([`DeltaMovementInfo`]), and for every sliding difference the single
//! step that walks it square by square ([`DeltaBases`]). The tables are
//! checked against independently derived expectations and then written out
//! as C or Rust source.
//!
//! # Examples
//!
//! Generate and query the tables:
//!
//! ```
//! use delta_movements::{Delta, Movers, Square, Tables};
//!
//! let tables = Tables::generate()?;
//!
//! let delta = Delta::between(Square::H8, Square::A1);
//! assert_eq!(tables.movement_info().movers(delta), Movers::QUEEN | Movers::BISHOP);
//! assert_eq!(tables.bases().base(delta), Delta::new(0x11));
//! # Ok::<_, delta_movements::Error>(())
//! ```
//!
//! Write the C header and source into a directory:
//!
//! ```no_run
//! use delta_movements::{emit::Emitter, Tables};
//!
//! let tables = Tables::generate()?;
//! Emitter::new("src/engine").emit(&tables)?;
//! # Ok::<_, delta_movements::Error>(())
//! ```

#![doc(html_root_url = "https://docs.rs/delta-movements/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod delta;
mod errors;
mod movers;
mod role;
mod util;

pub mod emit;
pub mod selftest;
pub mod square;
pub mod tables;

pub use delta::Delta;
pub use emit::{Emitter, Format, ParseFormatError};
pub use errors::{EmitError, Error, GenerateError, Result, SelfTestError};
pub use movers::Movers;
pub use role::{ByRole, Role};
pub use square::{ParseSquareError, Square};
pub use tables::{DeltaBases, DeltaMovementInfo, Tables};
