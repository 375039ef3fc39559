//! Contact form behaviour: field validation feedback, submission gating and
//! the service preselection hint.

pub mod preselect;
pub mod state;
pub mod transport;

pub use preselect::{MemorySlot, PreselectStore, SessionStorage, PRESELECT_KEY};
pub use state::{ContactForm, FieldErrorState, SubmissionPhase, SubmitEvent, SubmitOutcome};
pub use transport::{
    FormPayload, HttpTransport, InProcessTransport, SubmissionTransport, TransportError,
    TransportReply,
};
