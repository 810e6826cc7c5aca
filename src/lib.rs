//! # tcrm-capture
//!
//! Supervises a long-running external task, reads its two output streams
//! concurrently, captures the task region delimited by start/end markers on
//! the task stream, and recovers a structured record from the captured text.
//!
//! ## Features
//!
//! - **Concurrent Streams**: One reader per output stream, fanned into a single coordinator
//! - **Marker Capture**: Explicit `NotStarted -> Capturing -> Completed` state machine
//! - **Deadline**: Fixed execution deadline that kills the process and keeps partial output
//! - **Lenient Parsing**: Line-oriented parser that never fails, only yields emptier records
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tcrm_capture::tasks::{config::CaptureConfig, tokio::executor::CaptureExecutor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CaptureConfig::for_script("scripts/cleanup.rb");
//!     config.validate()?;
//!
//!     let executor = CaptureExecutor::new(config);
//!     let (report, record) = executor.run_and_parse().await?;
//!
//!     if report.is_degraded() {
//!         eprintln!("task did not complete normally: {:?}", report.outcome);
//!     }
//!     println!("{}", report.captured);
//!     println!("{}", record);
//!     Ok(())
//! }
//! ```
//!
//! ## Outcomes
//!
//! Only a launch failure (or an invalid configuration) is an error. A run that
//! ends by stream exhaustion or by the deadline still returns a
//! [`tasks::event::CaptureReport`] carrying whatever was captured, with
//! [`tasks::event::CaptureOutcome`] telling the three endings apart.
//!
//! ## Optional Features
//!
//! - `tracing`: Structured logging through `tracing` (enabled by default)
//! - `serde`: Serialization support for configuration, events and records

pub mod helper;
pub mod tasks;
