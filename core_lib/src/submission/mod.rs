//! Server side of the contact form: normalize the inbound body, build the
//! notification and dispatch it through the configured sink.

pub mod body;
pub mod handler;
pub mod message;

pub use body::{normalize_body, BodySource, DecodeError, FieldMap, InboundBody, NormalizedBody};
pub use handler::{Receipt, SubmissionHandler, SubmissionStage};
pub use message::{build_message, UNKNOWN_NAME};
