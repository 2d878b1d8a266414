//! `strides-output`: route output writers for strides.
//!
//! | Backend | Files created                                            |
//! |---------|----------------------------------------------------------|
//! | CSV     | `route.csv` (latest snapshot), `steps.csv` (one row/step) |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`PathOutputObserver`], which implements
//! `strides_search::GrowthObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use strides_output::{CsvWriter, PathOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = PathOutputObserver::new(writer);
//! let report = grower.plan(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::PathOutputObserver;
pub use row::{PathPointRow, StepSummaryRow};
pub use writer::OutputWriter;
