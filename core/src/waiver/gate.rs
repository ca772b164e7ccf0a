use tracing::debug;

use super::readiness::{GateStatus, WaiverReadiness, WaiverVariant};
use super::scroll::{ScrollLatch, ScrollMetrics, ScrollObservation};
use crate::types::WaiverSubmission;

/// Interface handles the gate drives, resolved once at construction.
pub trait WaiverSurface {
    /// Enables or disables the signature submit control.
    fn set_submit_enabled(&mut self, enabled: bool);

    /// Shows the status label next to the submit control.
    fn show_status(&mut self, status: GateStatus);

    /// Locks or unlocks the agreement checkbox and identity inputs.
    fn set_inputs_locked(&mut self, locked: bool);

    /// Switches the scroll indicator to its "read the entire waiver" state.
    fn mark_fully_read(&mut self);

    /// Hides the scroll indicator when there was nothing to scroll.
    fn hide_scroll_indicator(&mut self);
}

/// Input events the gate reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum WaiverEvent {
    Scrolled(ScrollMetrics),
    LegalNameInput(String),
    AgreementChanged(bool),
    ClientNameInput(String),
    ClientEmailInput(String),
}

/// Gates the waiver submit control on scroll completion, agreement and identity fields.
#[derive(Debug)]
pub struct WaiverGate<S: WaiverSurface> {
    surface: S,
    latch: ScrollLatch,
    readiness: WaiverReadiness,
}

impl<S: WaiverSurface> WaiverGate<S> {
    /// Creates the gate and pushes the initial state to the surface.
    ///
    /// If the waiver text fits without scrolling, the latch starts set and the
    /// dependent inputs start unlocked.
    pub fn new(mut surface: S, variant: WaiverVariant, initial: ScrollMetrics) -> Self {
        let latch = ScrollLatch::new(initial);
        if latch.is_latched() {
            debug!("Waiver text fits the viewport, skipping scroll requirement");
            surface.hide_scroll_indicator();
            surface.set_inputs_locked(false);
        } else {
            surface.set_inputs_locked(true);
        }

        let mut readiness = WaiverReadiness::new(variant);
        readiness.scrolled_to_end = latch.is_latched();

        let mut gate = Self {
            surface,
            latch,
            readiness,
        };
        gate.evaluate();
        gate
    }

    pub fn handle(&mut self, event: WaiverEvent) {
        match event {
            WaiverEvent::Scrolled(metrics) => self.on_scroll(metrics),
            WaiverEvent::LegalNameInput(value) => {
                if self.accepts_input("legal_name") {
                    self.readiness.legal_name = value;
                }
            }
            WaiverEvent::AgreementChanged(checked) => {
                if self.accepts_input("agreement") {
                    self.readiness.agreed = checked;
                }
            }
            WaiverEvent::ClientNameInput(value) => {
                if self.accepts_input("client_name") {
                    self.readiness.client_name = value;
                }
            }
            WaiverEvent::ClientEmailInput(value) => {
                if self.accepts_input("client_email") {
                    self.readiness.client_email = value;
                }
            }
        }
        self.evaluate();
    }

    /// Recomputes readiness and reflects it on the surface.
    pub fn evaluate(&mut self) {
        let status = self.readiness.status();
        self.surface.set_submit_enabled(status.is_ready());
        self.surface.show_status(status);
    }

    fn on_scroll(&mut self, metrics: ScrollMetrics) {
        if self.latch.observe(metrics) == ScrollObservation::JustReached {
            debug!("Reader reached the end of the waiver text");
            self.readiness.scrolled_to_end = true;
            self.surface.mark_fully_read();
            self.surface.set_inputs_locked(false);
        }
    }

    // Inputs stay inert until the waiver text has been read.
    fn accepts_input(&self, field: &str) -> bool {
        if !self.latch.is_latched() {
            debug!("Ignoring {} input while waiver inputs are locked", field);
            return false;
        }
        true
    }

    pub fn readiness(&self) -> &WaiverReadiness {
        &self.readiness
    }

    pub fn status(&self) -> GateStatus {
        self.readiness.status()
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The form payload, available only while the gate is open.
    ///
    /// The server still decides whether the signature is accepted.
    pub fn submission(&self) -> Option<WaiverSubmission> {
        if !self.is_ready() {
            return None;
        }
        let standalone = self.readiness.variant.is_standalone();
        Some(WaiverSubmission {
            legal_name: self.readiness.legal_name.trim().to_string(),
            agreement: true,
            client_name: standalone.then(|| self.readiness.client_name.trim().to_string()),
            client_email: standalone.then(|| self.readiness.client_email.trim().to_string()),
        })
    }
}
