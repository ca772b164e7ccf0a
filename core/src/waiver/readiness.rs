use crate::validators::{has_email_marker, is_valid_client_name, is_valid_legal_name};

/// Which waiver page is being signed.
///
/// Booking-linked waivers already know the client; standalone waivers ask
/// for the client's name and email as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaiverVariant {
    #[default]
    BookingLinked,
    Standalone,
}

impl WaiverVariant {
    pub fn is_standalone(self) -> bool {
        matches!(self, Self::Standalone)
    }
}

/// First condition that keeps the submit control disabled, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnmetCondition {
    ScrollIncomplete,
    NotAgreed,
    LegalNameInvalid,
    /// Standalone only: client name or email is missing.
    ClientFieldsInvalid,
}

impl UnmetCondition {
    pub fn message(self) -> &'static str {
        match self {
            Self::ScrollIncomplete => "Please read the entire waiver to enable signing",
            Self::NotAgreed => "Please check the agreement box",
            Self::LegalNameInvalid => "Please enter your full legal name",
            Self::ClientFieldsInvalid => "Please fill in all required fields",
        }
    }
}

/// Outcome shown next to the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateStatus {
    Ready,
    Blocked(UnmetCondition),
}

impl GateStatus {
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Ready => "Ready to sign",
            Self::Blocked(condition) => condition.message(),
        }
    }
}

/// Snapshot of every input the gate depends on.
///
/// Readiness is a pure function of these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaiverReadiness {
    pub variant: WaiverVariant,
    pub scrolled_to_end: bool,
    pub agreed: bool,
    pub legal_name: String,
    pub client_name: String,
    pub client_email: String,
}

impl WaiverReadiness {
    pub fn new(variant: WaiverVariant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    pub fn legal_name_valid(&self) -> bool {
        is_valid_legal_name(&self.legal_name)
    }

    /// Always true for booking-linked waivers.
    pub fn client_fields_valid(&self) -> bool {
        !self.variant.is_standalone()
            || (is_valid_client_name(&self.client_name) && has_email_marker(&self.client_email))
    }

    pub fn is_ready(&self) -> bool {
        self.scrolled_to_end && self.agreed && self.legal_name_valid() && self.client_fields_valid()
    }

    /// The highest-priority unmet condition, if any.
    pub fn first_unmet(&self) -> Option<UnmetCondition> {
        if !self.scrolled_to_end {
            Some(UnmetCondition::ScrollIncomplete)
        } else if !self.agreed {
            Some(UnmetCondition::NotAgreed)
        } else if !self.legal_name_valid() {
            Some(UnmetCondition::LegalNameInvalid)
        } else if !self.client_fields_valid() {
            Some(UnmetCondition::ClientFieldsInvalid)
        } else {
            None
        }
    }

    pub fn status(&self) -> GateStatus {
        match self.first_unmet() {
            Some(condition) => GateStatus::Blocked(condition),
            None => GateStatus::Ready,
        }
    }
}
