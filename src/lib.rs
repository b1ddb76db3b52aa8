pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{ DidactOptions, DEFAULT_MAX_ATTEMPTS };
pub use errors::{ DidactError, DidactResult, ErrorSeverity, RecoverableError };
pub use implementations::config::GeneratorConfig;
pub use implementations::invoker::LlmInvoker;
pub use implementations::prompts::PromptAssembler;
pub use implementations::refinement::RefinementLoop;
pub use implementations::sequence::{ extract_target_levels, SequencePlanner };
pub use implementations::studio::Studio;
pub use implementations::verdict::MarkerVerdictParser;
pub use models::{
    artifact::{ Artifact, RefinementOutcome, RefinementReport },
    common::{ Backend, ModelChoice, TemplateKind },
    parameters::{ Classification, GenerationParameters, SessionFocus },
    progress::ProgressEvent,
    sequence::{ SequencePlan, SequenceReport, SessionDescriptor, SessionReport },
    taxonomy::CognitiveLevel,
    verdict::{ RejectionReason, Verdict, VerdictStatus },
};
pub use traits::{
    LessonDesigner,
    ModelInvoker,
    NoProgress,
    ProgressSink,
    SequenceRequest,
    VerdictParser,
};
