use super::preselect::PreselectStore;
use super::transport::{FormPayload, SubmissionTransport, TransportReply};
use crate::models::{LeadField, LeadRecord};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Display state of one required field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrorState {
    pub invalid: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionPhase {
    Editing,
    Pending,
    Succeeded,
    Failed(String),
}

/// A form submit event. Submission always suppresses the default navigation.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Blocked { focus: Option<LeadField> },
    Accepted(TransportReply),
    Rejected(TransportReply),
    TransportFailed(String),
}

/// Contact form state, independent of any UI toolkit.
#[derive(Debug, Clone)]
pub struct ContactForm {
    values: LeadRecord,
    errors: BTreeMap<LeadField, FieldErrorState>,
    focused: Option<LeadField>,
    phase: SubmissionPhase,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        let errors = LeadField::REQUIRED
            .iter()
            .map(|field| (*field, FieldErrorState::default()))
            .collect();

        Self {
            values: LeadRecord::default(),
            errors,
            focused: None,
            phase: SubmissionPhase::Editing,
        }
    }

    /// Creates the form, applying and consuming any preselected service.
    pub fn initialize(store: &dyn PreselectStore) -> Self {
        let mut form = Self::new();
        if let Some(service) = store.take() {
            debug!(%service, "applying preselected service");
            form.values.service = service;
        }
        form
    }

    pub fn values(&self) -> &LeadRecord {
        &self.values
    }

    pub fn value(&self, field: LeadField) -> &str {
        self.values.get(field)
    }

    pub fn set_value(&mut self, field: LeadField, value: impl Into<String>) {
        self.values.set(field, value);
    }

    pub fn error(&self, field: LeadField) -> Option<&FieldErrorState> {
        self.errors.get(&field)
    }

    pub fn is_invalid(&self, field: LeadField) -> bool {
        self.errors.get(&field).map(|state| state.invalid).unwrap_or(false)
    }

    pub fn focused(&self) -> Option<LeadField> {
        self.focused
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    /// Re-checks one field and updates its display state.
    pub fn validate_field(&mut self, field: LeadField) -> bool {
        let result = field.check(self.values.get(field));

        if let Some(state) = self.errors.get_mut(&field) {
            state.invalid = !result.valid;
            state.message = result.message.unwrap_or_default();
        }

        result.valid
    }

    pub fn on_blur(&mut self, field: LeadField) -> bool {
        self.validate_field(field)
    }

    /// Records typed input. A flagged field is re-checked so the flag clears
    /// as soon as the value is fixed; an unflagged one is left alone.
    pub fn on_input(&mut self, field: LeadField, value: impl Into<String>) {
        self.values.set(field, value);
        if self.is_invalid(field) {
            self.validate_field(field);
        }
    }

    /// Checks every required field, marking each failure.
    pub fn validate_form(&mut self) -> bool {
        let mut valid = true;
        for field in LeadField::REQUIRED {
            if !self.validate_field(field) {
                valid = false;
            }
        }
        valid
    }

    pub fn first_invalid(&self) -> Option<LeadField> {
        LeadField::REQUIRED
            .iter()
            .copied()
            .find(|field| self.is_invalid(*field))
    }

    pub fn payload(&self) -> FormPayload {
        self.values.to_fields()
    }

    /// Picks a service from elsewhere on the page and leaves a hint for
    /// the next time the form is initialized.
    pub fn select_service(&mut self, service: &str, store: &dyn PreselectStore) {
        if service.is_empty() {
            return;
        }
        self.values.service = service.to_string();
        store.put(service);
    }

    pub async fn submit(
        &mut self,
        event: &mut SubmitEvent,
        transport: &dyn SubmissionTransport,
    ) -> SubmitOutcome {
        event.prevent_default();

        if !self.validate_form() {
            self.phase = SubmissionPhase::Editing;
            self.focused = self.first_invalid();
            return SubmitOutcome::Blocked {
                focus: self.focused,
            };
        }

        self.phase = SubmissionPhase::Pending;
        let payload = self.payload();

        match transport.submit(&payload).await {
            Ok(reply) if reply.is_success() => {
                self.phase = SubmissionPhase::Succeeded;
                SubmitOutcome::Accepted(reply)
            }
            Ok(reply) => {
                let message = reply.error_message();
                warn!(status = reply.status, %message, "submission rejected");
                self.phase = SubmissionPhase::Failed(message);
                SubmitOutcome::Rejected(reply)
            }
            Err(e) => {
                warn!(error = %e, "submission transport failed");
                self.phase = SubmissionPhase::Failed(e.to_string());
                SubmitOutcome::TransportFailed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::preselect::MemorySlot;
    use crate::form::transport::TransportError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;

    struct RecordingTransport {
        calls: Mutex<Vec<FormPayload>>,
        status: u16,
    }

    impl RecordingTransport {
        fn replying(status: u16) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                status,
            }
        }
    }

    #[async_trait]
    impl SubmissionTransport for RecordingTransport {
        async fn submit(&self, payload: &FormPayload) -> Result<TransportReply, TransportError> {
            self.calls.lock().push(payload.clone());
            let body = if self.status == 200 {
                json!({ "success": true })
            } else {
                json!({ "error": "Email failed to send" })
            };
            Ok(TransportReply {
                status: self.status,
                body,
            })
        }
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_value(LeadField::Name, "Jane Citizen");
        form.set_value(LeadField::Mobile, "0412 345 678");
        form.set_value(LeadField::Email, "jane@example.com");
        form.set_value(LeadField::Service, "Finance");
        form
    }

    #[test]
    fn test_new_form_has_clear_error_state() {
        let form = ContactForm::new();
        for field in LeadField::REQUIRED {
            assert_eq!(form.error(field), Some(&FieldErrorState::default()));
        }
        assert!(form.error(LeadField::Notes).is_none());
        assert_eq!(form.phase(), &SubmissionPhase::Editing);
    }

    #[test]
    fn test_blur_flags_and_clears() {
        let mut form = ContactForm::new();
        form.set_value(LeadField::Email, "jane@");

        assert!(!form.on_blur(LeadField::Email));
        let state = form.error(LeadField::Email).unwrap();
        assert!(state.invalid);
        assert_eq!(state.message, "Please enter a valid email address");

        form.set_value(LeadField::Email, "jane@example.com");
        assert!(form.on_blur(LeadField::Email));
        assert_eq!(form.error(LeadField::Email), Some(&FieldErrorState::default()));
    }

    #[test]
    fn test_input_does_not_flag_untouched_field() {
        let mut form = ContactForm::new();
        form.on_input(LeadField::Name, "J");
        assert!(!form.is_invalid(LeadField::Name));
    }

    #[test]
    fn test_input_clears_flag_once_fixed() {
        let mut form = ContactForm::new();
        form.on_input(LeadField::Name, "J");
        form.on_blur(LeadField::Name);
        assert!(form.is_invalid(LeadField::Name));

        form.on_input(LeadField::Name, "Jo");
        assert!(!form.is_invalid(LeadField::Name));
        assert!(form.error(LeadField::Name).unwrap().message.is_empty());
    }

    #[test]
    fn test_input_keeps_flag_while_still_invalid() {
        let mut form = ContactForm::new();
        form.on_input(LeadField::Mobile, "04");
        form.on_blur(LeadField::Mobile);

        form.on_input(LeadField::Mobile, "0412");
        assert!(form.is_invalid(LeadField::Mobile));
    }

    #[test]
    fn test_validate_form_marks_every_failure() {
        let mut form = ContactForm::new();
        form.set_value(LeadField::Name, "Jane");

        assert!(!form.validate_form());
        assert!(!form.is_invalid(LeadField::Name));
        assert!(form.is_invalid(LeadField::Mobile));
        assert!(form.is_invalid(LeadField::Email));
        assert!(form.is_invalid(LeadField::Service));
        assert_eq!(form.first_invalid(), Some(LeadField::Mobile));
    }

    #[test]
    fn test_optional_fields_never_block() {
        let mut form = filled_form();
        form.set_value(LeadField::Budget, "");
        form.set_value(LeadField::Notes, "");
        assert!(form.validate_form());
    }

    #[tokio::test]
    async fn test_invalid_submit_makes_no_transport_call() {
        let transport = RecordingTransport::replying(200);
        let mut form = ContactForm::new();
        form.set_value(LeadField::Name, "Jane");
        let mut event = SubmitEvent::new();

        let outcome = form.submit(&mut event, &transport).await;

        assert!(event.is_default_prevented());
        assert_eq!(outcome, SubmitOutcome::Blocked { focus: Some(LeadField::Mobile) });
        assert_eq!(form.focused(), Some(LeadField::Mobile));
        assert!(transport.calls.lock().is_empty());
        assert_eq!(form.phase(), &SubmissionPhase::Editing);
    }

    #[tokio::test]
    async fn test_valid_submit_sends_all_fields() {
        let transport = RecordingTransport::replying(200);
        let mut form = filled_form();
        form.set_value(LeadField::Budget, "$40k");
        let mut event = SubmitEvent::new();

        let outcome = form.submit(&mut event, &transport).await;

        assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
        assert_eq!(form.phase(), &SubmissionPhase::Succeeded);

        let calls = transport.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 6);
        assert_eq!(calls[0]["budget"], "$40k");
        assert_eq!(calls[0]["notes"], "");
        assert_eq!(calls[0]["mobile"], "0412 345 678");
    }

    #[tokio::test]
    async fn test_rejected_submit_records_failure() {
        let transport = RecordingTransport::replying(500);
        let mut form = filled_form();

        let outcome = form.submit(&mut SubmitEvent::new(), &transport).await;

        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(
            form.phase(),
            &SubmissionPhase::Failed("Email failed to send".to_string())
        );
    }

    #[tokio::test]
    async fn test_blocked_resubmit_clears_stale_failure() {
        let transport = RecordingTransport::replying(500);
        let mut form = filled_form();
        form.submit(&mut SubmitEvent::new(), &transport).await;
        assert!(matches!(form.phase(), SubmissionPhase::Failed(_)));

        form.set_value(LeadField::Email, "jane@");
        let outcome = form.submit(&mut SubmitEvent::new(), &transport).await;

        assert_eq!(outcome, SubmitOutcome::Blocked { focus: Some(LeadField::Email) });
        assert_eq!(form.phase(), &SubmissionPhase::Editing);
        assert_eq!(transport.calls.lock().len(), 1);
    }

    #[test]
    fn test_preselected_service_applied_once() {
        let slot = MemorySlot::new();
        slot.put("Finance");

        let form = ContactForm::initialize(&slot);
        assert_eq!(form.value(LeadField::Service), "Finance");
        assert_eq!(slot.take(), None);

        let later = ContactForm::initialize(&slot);
        assert_eq!(later.value(LeadField::Service), "");
    }

    #[test]
    fn test_select_service_sets_field_and_hint() {
        let slot = MemorySlot::new();
        let mut form = ContactForm::new();

        form.select_service("Finance", &slot);
        assert_eq!(form.value(LeadField::Service), "Finance");
        assert_eq!(slot.take().as_deref(), Some("Finance"));
    }
}
