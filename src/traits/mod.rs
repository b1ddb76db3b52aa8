pub mod lesson_designer;
pub mod model_invoker;
pub mod progress_sink;
pub mod verdict_parser;

// Re-export traits
pub use lesson_designer::{ LessonDesigner, SequenceRequest };
pub use model_invoker::ModelInvoker;
pub use progress_sink::{ NoProgress, ProgressSink };
pub use verdict_parser::VerdictParser;
