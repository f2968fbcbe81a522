//! `sw-output`: run logging for the rust_swarm framework.
//!
//! One backend is provided:
//!
//! | Backend | Files created                                               |
//! |---------|-------------------------------------------------------------|
//! | CSV     | the configured path (default `logs/run.csv`), one row/step  |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `sw_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sw_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(&config.logging.path, config.num_agents)?;
//! let mut obs = SimOutputObserver::new(writer);
//! swarm.run(&mut obs).await;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use writer::OutputWriter;
