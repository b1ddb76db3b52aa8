use log::{ debug, warn };

use crate::implementations::prompts::OBSERVATIONS_LABEL;
use crate::models::verdict::{ RejectionReason, Verdict, VerdictStatus };
use crate::traits::verdict_parser::VerdictParser;

pub const APPROVED_MARKER: &str = "✅ CUMPLE";
pub const PARTIAL_MARKER: &str = "CUMPLE PARCIALMENTE";
pub const REJECTED_MARKER: &str = "❌ RECHAZADO";
pub const NO_OBSERVATIONS: &str = "No se pudieron extraer observaciones.";
pub const UNEXPECTED_SHAPE_NOTE: &str =
    "El dictamen del auditor no tiene el formato esperado; revisa la actividad completa contra todas las capas del modelo.";

/// Fixed-substring verdict scan
///
/// Approval wins over partial approval, which wins over rejection. Text
/// without any marker is a rejection with an unexpected shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerVerdictParser;

impl MarkerVerdictParser {
    pub fn new() -> Self {
        Self
    }

    fn status_of(audit_text: &str) -> Option<VerdictStatus> {
        if contains_full_approval(audit_text) {
            Some(VerdictStatus::Approved)
        } else if audit_text.contains(PARTIAL_MARKER) {
            Some(VerdictStatus::PartiallyApproved)
        } else if audit_text.contains(REJECTED_MARKER) {
            Some(VerdictStatus::Rejected)
        } else {
            None
        }
    }
}

/// `✅ CUMPLE` only counts when it is not the start of `✅ CUMPLE PARCIALMENTE`
fn contains_full_approval(text: &str) -> bool {
    text.match_indices(APPROVED_MARKER).any(|(index, marker)| {
        let rest = &text[index + marker.len()..];
        !rest.trim_start().starts_with("PARCIALMENTE")
    })
}

/// Everything after the first observations label, or None when the label is missing
///
/// Only the closing bold of the label itself (`**` right after the colon) is
/// dropped; bold text opening the observations is kept.
pub fn extract_observations(audit_text: &str) -> Option<String> {
    let start = audit_text.find(OBSERVATIONS_LABEL)? + OBSERVATIONS_LABEL.len();
    let rest = &audit_text[start..];
    let rest = rest.strip_prefix("**").unwrap_or(rest).trim();
    Some(rest.to_string())
}

impl VerdictParser for MarkerVerdictParser {
    fn parse(&self, audit_text: &str) -> Verdict {
        let status = match Self::status_of(audit_text) {
            Some(status) => status,
            None => {
                warn!("Audit response has no verdict marker; treating it as rejected");
                let observations = match extract_observations(audit_text) {
                    Some(obs) if !obs.is_empty() => format!("{} {}", UNEXPECTED_SHAPE_NOTE, obs),
                    _ => format!("{} {}", UNEXPECTED_SHAPE_NOTE, NO_OBSERVATIONS),
                };
                return Verdict {
                    status: VerdictStatus::Rejected,
                    observations,
                    rejection: Some(RejectionReason::UnexpectedShape),
                };
            }
        };

        debug!("Parsed verdict: {}", status);
        if status.is_approved() {
            return Verdict::approved();
        }

        let observations = extract_observations(audit_text)
            .filter(|obs| !obs.is_empty())
            .unwrap_or_else(|| NO_OBSERVATIONS.to_string());

        Verdict {
            status,
            observations,
            rejection: match status {
                VerdictStatus::Rejected => Some(RejectionReason::Audited),
                _ => None,
            },
        }
    }
}
