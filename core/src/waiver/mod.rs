//! Waiver gate
//!
//! The e-signature submit control is only enabled once the reader has
//! scrolled through the full waiver text, checked the agreement box and
//! typed valid identity fields. [`ScrollLatch`] tracks the first of those
//! signals, [`WaiverReadiness`] combines all of them, and [`WaiverGate`]
//! pushes the outcome to an injected [`WaiverSurface`].

pub mod gate;
pub mod readiness;
pub mod scroll;

pub use gate::{WaiverEvent, WaiverGate, WaiverSurface};
pub use readiness::{GateStatus, UnmetCondition, WaiverReadiness, WaiverVariant};
pub use scroll::{ScrollLatch, ScrollMetrics, ScrollObservation};
