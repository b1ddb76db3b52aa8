use serde::{ Deserialize, Serialize };
use std::fmt;

/// Auditor judgment on one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictStatus {
    Approved,
    PartiallyApproved,
    Rejected,
}

impl VerdictStatus {
    pub fn is_approved(&self) -> bool {
        matches!(self, VerdictStatus::Approved)
    }

    /// Marker as it appears in the audit vocabulary
    pub fn marker(&self) -> &'static str {
        match self {
            VerdictStatus::Approved => "✅ CUMPLE",
            VerdictStatus::PartiallyApproved => "⚠️ CUMPLE PARCIALMENTE",
            VerdictStatus::Rejected => "❌ RECHAZADO",
        }
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictStatus::Approved => write!(f, "Approved"),
            VerdictStatus::PartiallyApproved => write!(f, "Partially approved"),
            VerdictStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Why a verdict came out as rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// The auditor wrote the rejection marker
    Audited,
    /// No known marker was found in the audit text
    UnexpectedShape,
}

/// Parsed audit response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub observations: String,
    pub rejection: Option<RejectionReason>,
}

impl Verdict {
    pub fn approved() -> Self {
        Self {
            status: VerdictStatus::Approved,
            observations: String::new(),
            rejection: None,
        }
    }

    pub fn is_unexpected_shape(&self) -> bool {
        self.rejection == Some(RejectionReason::UnexpectedShape)
    }
}
