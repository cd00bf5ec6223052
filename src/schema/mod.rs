pub mod convert;
pub mod derive;

pub use convert::convert_to_final_types;
pub use derive::{derive_column_type, derive_schema};
