// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod descriptor;
pub mod error;
pub mod file;
pub mod locate;
pub mod logging;
pub mod progress;
pub mod runner;
pub mod search_sort;
pub mod transform;

pub use descriptor::{DescriptorStore, TableAlterDescriptor, TableBehaviorConfig};
pub use error::{AlterError, AugmentError, ConfigWarning, TransformError};
pub use runner::{Controller, RunSummary};
pub use search_sort::{AugmentReport, SearchSort};
