pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod rounding;
pub mod solver;
pub mod summary;

pub use config::{Config, InputDefaults, SolverConfig};
pub use constants::{ATTRIBUTION, DEFAULT_MAX_RESULTS, DEFAULT_MAX_TOTAL_BOARDS};
pub use error::LayoutError;
pub use input::{LayoutInput, RawInput, format_number};
pub use rounding::round_half;
pub use solver::{Candidate, ResultSet, SearchOptions, compute_layout, compute_layout_with};
pub use summary::summarize;
