//! Page behaviors attached to existing markup.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each module finds its elements through [`crate::dom::Dom`], applies the
//! pure state from [`crate::state`], and registers its listeners. They share
//! nothing but the document, so one failing to install leaves the others
//! working.

pub mod contact_form;
pub mod navbar;
pub mod reveal;
pub mod theme_toggle;
pub mod typing;
pub mod year;

/// Why a behavior could not attach to the page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("missing {selector} inside #{parent}")]
    MissingChild { parent: String, selector: String },
    #[error("document has no root element")]
    NoRoot,
}

/// Look up a required element by id.
pub(crate) fn require_id<D: crate::dom::Dom>(dom: &D, id: &str) -> Result<D::Element, SetupError> {
    dom.by_id(id).ok_or_else(|| SetupError::MissingElement(id.to_owned()))
}
