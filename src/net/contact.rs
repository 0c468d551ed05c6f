//! Contact form delivery.
//!
//! Client-side (hydrate): a single `POST` via `gloo-net` with the fields as
//! multipart form data and `Accept: application/json`, which is what hosted
//! form backends expect for an AJAX submission.
//!
//! ERROR HANDLING
//! ==============
//! Network failures and non-2xx statuses are distinct variants so they can be
//! logged precisely, but the page shows the same fallback text for both.
//! There is no retry.

#![allow(async_fn_in_trait)]

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

/// Everything needed to deliver one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactSubmission {
    /// Endpoint taken from the form's `action`.
    pub action: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("form has no action url")]
    MissingAction,
    #[error("network error: {0}")]
    Network(String),
    #[error("endpoint rejected submission: {status}")]
    Rejected { status: u16 },
}

/// Sends a submission and reports the HTTP status.
pub trait ContactTransport: 'static {
    /// # Errors
    ///
    /// Returns [`ContactError::Network`] if no response was received.
    async fn post(&self, submission: &ContactSubmission) -> Result<u16, ContactError>;
}

/// Whether `status` is in the 2xx range.
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Deliver `submission` once and map the status to success or failure.
///
/// In a browser a blank `action` already resolves to the page URL, so
/// [`ContactError::MissingAction`] only fires for documents without one.
///
/// # Errors
///
/// Returns [`ContactError`] for a missing endpoint, a transport failure, or a
/// non-2xx status.
pub async fn deliver<T: ContactTransport>(transport: &T, submission: &ContactSubmission) -> Result<(), ContactError> {
    if submission.action.trim().is_empty() {
        return Err(ContactError::MissingAction);
    }
    let status = transport.post(submission).await?;
    if is_success_status(status) {
        Ok(())
    } else {
        Err(ContactError::Rejected { status })
    }
}

/// Browser transport backed by `fetch`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[cfg(feature = "hydrate")]
impl ContactTransport for FetchTransport {
    async fn post(&self, submission: &ContactSubmission) -> Result<u16, ContactError> {
        let network = |err: wasm_bindgen::JsValue| ContactError::Network(format!("{err:?}"));
        let body = web_sys::FormData::new().map_err(network)?;
        for (name, value) in &submission.fields {
            body.append_with_str(name, value).map_err(network)?;
        }
        let resp = gloo_net::http::Request::post(&submission.action)
            .header("Accept", "application/json")
            .body(body)
            .map_err(|e| ContactError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ContactError::Network(e.to_string()))?;
        Ok(resp.status())
    }
}
