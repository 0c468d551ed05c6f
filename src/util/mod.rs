//! Utility helpers shared across page behaviors.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (timers, storage)
//! from behavior logic to improve reuse and testability.

pub mod scheduler;
pub mod storage;
