// Client-side building blocks for the Momentum Clips site:
// - Form field validators
// - Waiver gate and scroll latch
// - Booking date window
// - Site API client (likes, waiver submission)
// - Form drafts with debounced auto-save
// - Configuration loading and shared error types

// Export validators module - Pure predicates over form input values
pub mod validators;

// Export waiver module - Waiver gate state machine and scroll latch
pub mod waiver;
pub use waiver::{
    GateStatus, ScrollLatch, ScrollMetrics, UnmetCondition, WaiverEvent, WaiverGate,
    WaiverReadiness, WaiverSurface, WaiverVariant,
};

// Export booking module - Advisory booking date bounds
pub mod booking;
pub use booking::{BookingRejection, BookingWindow};

// Export markup module - Escaping text for HTML rendering
pub mod markup;
pub use markup::escape_html;

// Export types module - Site API request/response data structures
pub mod types;
pub use types::*;

// Export client module - HTTP client for the site API
pub mod client;
pub use client::*;

// Export drafts module - Form draft persistence
pub mod drafts;
pub use drafts::{Draft, DraftAutosaver, DraftStore};

// Export config module - Configuration loading
pub mod config;
pub use config::*;

// Export errors module - Shared error types
pub mod errors;
pub use errors::*;
