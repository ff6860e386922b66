//! Contact form state
//!
//! Delivery belongs to an external form service; this module only tracks
//! what the visitor typed, whether a submission is in flight, and the
//! per-field errors the service sent back.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown in place of the form once it went through
pub const SUCCESS_MESSAGE: &str = "Thanks for your message !";

/// Prefix shown before email validation messages
pub const EMAIL_ERROR_PREFIX: &str = "Email";

/// Form service endpoint for `form_id`
pub fn endpoint(form_id: &str) -> String {
    format!("https://formspree.io/f/{form_id}")
}

/// One validation message; `field: None` applies to the whole form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

impl FieldError {
    pub fn form(message: impl Into<String>) -> Self {
        Self {
            field: None,
            code: None,
            message: message.into(),
        }
    }

    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            code: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),
    #[error("form service answered HTTP {0}")]
    Status(u16),
    #[error("unreadable response: {0}")]
    Decode(String),
    #[error("submission rejected ({} errors)", .0.len())]
    Rejected(Vec<FieldError>),
}

impl SubmitError {
    /// Errors to show inline; transport failures become one form-level message
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            SubmitError::Rejected(errors) => errors.clone(),
            other => vec![FieldError::form(other.to_string())],
        }
    }
}

/// What gets posted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ServiceResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    errors: Vec<FieldError>,
    #[serde(default)]
    error: Option<String>,
}

/// Interpret the form service's HTTP status and JSON body
pub fn decode_response(status: u16, body: &str) -> Result<(), SubmitError> {
    let parsed: Result<ServiceResponse, _> = serde_json::from_str(body);
    match parsed {
        Ok(response) if (200..300).contains(&status) && response.ok => Ok(()),
        Ok(response) if !response.errors.is_empty() => Err(SubmitError::Rejected(response.errors)),
        Ok(ServiceResponse {
            error: Some(message),
            ..
        }) => Err(SubmitError::Rejected(vec![FieldError::form(message)])),
        Ok(_) if (200..300).contains(&status) => Err(SubmitError::Decode("missing ok flag".into())),
        Ok(_) => Err(SubmitError::Status(status)),
        Err(e) if (200..300).contains(&status) => Err(SubmitError::Decode(e.to_string())),
        Err(_) => Err(SubmitError::Status(status)),
    }
}

/// Delivers a submission somewhere
pub trait FormSubmitter {
    fn submit(&self, submission: Submission) -> impl Future<Output = Result<(), SubmitError>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    status: FormStatus,
    errors: Vec<FieldError>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn succeeded(&self) -> bool {
        self.status == FormStatus::Succeeded
    }

    /// Snapshot the fields and mark the form in flight. `None` while a
    /// submission is already pending or after success.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if matches!(self.status, FormStatus::Submitting | FormStatus::Succeeded) {
            return None;
        }
        self.status = FormStatus::Submitting;
        self.errors.clear();
        Some(Submission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.clone(),
        })
    }

    /// Record the outcome of the pending submission
    pub fn finish(&mut self, result: Result<(), SubmitError>) {
        match result {
            Ok(()) => {
                log::info!("Contact form delivered");
                self.status = FormStatus::Succeeded;
                self.errors.clear();
            }
            Err(e) => {
                log::warn!("Contact form failed: {e}");
                self.status = FormStatus::Failed;
                self.errors = e.field_errors();
            }
        }
    }

    /// Errors for `field`, or the form-level ones for `None`
    pub fn errors_for(&self, field: Option<&str>) -> Vec<&FieldError> {
        self.errors
            .iter()
            .filter(|e| e.field.as_deref() == field)
            .collect()
    }

    /// Rendered messages for `field`, each prefixed when `prefix` is given
    pub fn messages_for(&self, field: Option<&str>, prefix: Option<&str>) -> Vec<String> {
        self.errors_for(field)
            .into_iter()
            .map(|e| match prefix {
                Some(p) => format!("{p} {}", e.message),
                None => e.message.clone(),
            })
            .collect()
    }

    /// Validation messages under the email input
    pub fn email_messages(&self) -> Vec<String> {
        self.messages_for(Some("email"), Some(EMAIL_ERROR_PREFIX))
    }

    /// Submit through `submitter`, updating the status around the call
    pub async fn submit_with<S: FormSubmitter>(&mut self, submitter: &S) -> FormStatus {
        let Some(submission) = self.begin_submit() else {
            return self.status;
        };
        let result = submitter.submit(submission).await;
        self.finish(result);
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    fn block_on<F: Future>(future: F) -> F::Output {
        let mut future = pin!(future);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(out) = future.as_mut().poll(&mut cx) {
                return out;
            }
        }
    }

    struct Canned(Result<(), SubmitError>);

    impl FormSubmitter for Canned {
        async fn submit(&self, _submission: Submission) -> Result<(), SubmitError> {
            self.0.clone()
        }
    }

    fn filled() -> ContactForm {
        ContactForm {
            name: " Ada ".into(),
            email: "ada@example.com".into(),
            message: "Hello".into(),
            ..ContactForm::default()
        }
    }

    #[test]
    fn test_refuses_double_submit() {
        let mut form = filled();
        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.name, "Ada");
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit(), None);
    }

    #[test]
    fn test_success_is_final() {
        let mut form = filled();
        let status = block_on(form.submit_with(&Canned(Ok(()))));
        assert_eq!(status, FormStatus::Succeeded);
        assert_eq!(form.begin_submit(), None);
    }

    #[test]
    fn test_field_and_form_errors() {
        let mut form = filled();
        let rejected = SubmitError::Rejected(vec![
            FieldError::field("email", "should be an email"),
            FieldError::form("Form not found"),
        ]);
        let status = block_on(form.submit_with(&Canned(Err(rejected))));
        assert_eq!(status, FormStatus::Failed);
        assert_eq!(form.email_messages(), vec!["Email should be an email"]);
        assert_eq!(form.messages_for(None, None), vec!["Form not found"]);
        assert!(form.errors_for(Some("name")).is_empty());

        // Resubmission allowed after failure and clears old errors
        assert!(form.begin_submit().is_some());
        assert!(form.errors_for(Some("email")).is_empty());
    }

    #[test]
    fn test_transport_failure_is_form_level() {
        let mut form = filled();
        form.begin_submit();
        form.finish(Err(SubmitError::Network("offline".into())));
        assert_eq!(form.messages_for(None, None), vec!["network error: offline"]);
    }

    #[test]
    fn test_decode_responses() {
        assert_eq!(decode_response(200, r#"{"ok":true,"next":"/thanks"}"#), Ok(()));
        assert_eq!(
            decode_response(
                422,
                r#"{"errors":[{"code":"TYPE_EMAIL","field":"email","message":"should be an email"}]}"#
            ),
            Err(SubmitError::Rejected(vec![FieldError {
                field: Some("email".into()),
                code: Some("TYPE_EMAIL".into()),
                message: "should be an email".into(),
            }]))
        );
        assert_eq!(
            decode_response(404, r#"{"error":"Form not found"}"#),
            Err(SubmitError::Rejected(vec![FieldError::form("Form not found")]))
        );
        assert_eq!(decode_response(502, "<html>"), Err(SubmitError::Status(502)));
        assert!(matches!(decode_response(200, "nope"), Err(SubmitError::Decode(_))));
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(endpoint("xnnpqapo"), "https://formspree.io/f/xnnpqapo");
    }
}
