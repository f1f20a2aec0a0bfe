//! LP solve invocation for Synthtab.
//!
//! Lowers an assembled constraint system into `good_lp`, performs a single
//! solve attempt, and reads the solved counts back under the model's typed
//! keys. Also exports the solved cell table as CSV. Infeasibility is
//! terminal: a changed declaration document is required, not a retry.

pub mod engine;
pub mod errors;
pub mod model;
pub mod output;

pub use engine::SolveEngine;
pub use errors::SolveError;
pub use model::{SolveOptions, SolveReport, SolveResult, SolveStatus, SolvedTable};
