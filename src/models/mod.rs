pub mod artifact;
pub mod catalog;
pub mod common;
pub mod parameters;
pub mod progress;
pub mod sequence;
pub mod taxonomy;
pub mod verdict;

// Re-export common model types
pub use artifact::{ Artifact, RefinementOutcome, RefinementReport };
pub use catalog::{ ActivityCategory, ACTIVITY_CATEGORIES };
pub use common::{ Backend, ModelChoice, TemplateKind };
pub use parameters::{ Classification, GenerationParameters, SessionFocus };
pub use progress::ProgressEvent;
pub use sequence::{ SequencePlan, SequenceReport, SessionDescriptor, SessionReport };
pub use taxonomy::{ CognitiveLevel, BLOOM_TAXONOMY };
pub use verdict::{ RejectionReason, Verdict, VerdictStatus };
