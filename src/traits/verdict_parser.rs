use crate::models::verdict::Verdict;

/// Extracts a verdict from an auditor's free-text response
///
/// Implementations must be total: any input yields a well-formed verdict.
pub trait VerdictParser: Send + Sync {
    fn parse(&self, audit_text: &str) -> Verdict;
}
