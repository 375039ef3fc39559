pub mod lead;
pub mod request;

pub use lead::{LeadField, LeadRecord, UnknownField};
pub use request::ApiResponse;
