//! Contact form delivery over `fetch`

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::content::form::{Submission, decode_response, endpoint};
use crate::content::{FormSubmitter, SubmitError};

fn js_error(value: JsValue) -> SubmitError {
    SubmitError::Network(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Posts submissions as JSON to the hosted form service
#[derive(Debug, Clone)]
pub struct FetchSubmitter {
    form_id: String,
}

impl FetchSubmitter {
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
        }
    }

    fn request(&self, submission: &Submission) -> Result<Request, SubmitError> {
        let body = serde_json::to_string(submission).map_err(|e| SubmitError::Decode(e.to_string()))?;

        let headers = Headers::new().map_err(js_error)?;
        headers.set("Content-Type", "application/json").map_err(js_error)?;
        headers.set("Accept", "application/json").map_err(js_error)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::Cors);
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));

        Request::new_with_str_and_init(&endpoint(&self.form_id), &init).map_err(js_error)
    }
}

impl FormSubmitter for FetchSubmitter {
    async fn submit(&self, submission: Submission) -> Result<(), SubmitError> {
        let request = self.request(&submission)?;
        let window = web_sys::window().ok_or_else(|| SubmitError::Network("no window".into()))?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;
        let status = response.status();

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        log::debug!("Form service answered {status}");
        decode_response(status, &text)
    }
}
