//! UI module - contains UI rendering components
//!
//! Standalone widgets live in `components`; the panels that tie them to the
//! session are rendered from `app::views`.

pub mod components;
