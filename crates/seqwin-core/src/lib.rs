//! Core types and traits for seqwin sliding-window environments.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! error taxonomy, the [`StepResult`] type, and the [`RewardFn`] and
//! [`Environment`] traits that the engine crate implements against.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod step;
pub mod traits;

pub use error::{EnvError, ExhaustedError, InvalidInputError};
pub use step::StepResult;
pub use traits::{Environment, RewardFn};
