//! Helpers for testing trees and components.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations for observing what a tree renders to and which
//! components ran; they are not a product renderer.

mod call_log;
mod static_markup;

pub use call_log::CallLog;
pub use static_markup::render_to_string;
