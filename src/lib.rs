pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod schema;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{run, RunReport};
