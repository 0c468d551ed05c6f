//! Pure page state: typing cursor, theme value, navbar derivations.
//!
//! DESIGN
//! ======
//! Nothing in here touches the document, so every transition is unit
//! testable on its own. The `components` modules apply these values.

pub mod nav;
pub mod theme;
pub mod typing;
