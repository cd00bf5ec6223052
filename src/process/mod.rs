// src/process/mod.rs
pub mod export;
pub mod filter;
pub mod inspect;
pub mod load;
pub mod mission;
pub mod quality;
pub mod summary;
pub mod table;

pub use export::{build_contact_list, write_csv};
pub use filter::{filter_focus_missions, filter_service_area};
pub use inspect::{inspect, Inspection};
pub use load::load_csv;
pub use mission::{classify_missions, count_missing_codes, MissingCodes};
pub use quality::flag_manual_review;
pub use summary::{summarize, Summary};
