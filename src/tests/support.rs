//! Shared fixtures: a scripted invoker and a recording progress sink.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::errors::{ DidactError, DidactResult };
use crate::models::common::{ Backend, ModelChoice, TemplateKind };
use crate::models::parameters::GenerationParameters;
use crate::models::progress::ProgressEvent;
use crate::models::taxonomy::CognitiveLevel;
use crate::traits::model_invoker::ModelInvoker;
use crate::traits::progress_sink::ProgressSink;

pub enum Reply {
    Text(String),
    Fail(String),
}

pub fn text(value: &str) -> Reply {
    Reply::Text(value.to_string())
}

pub fn fail(message: &str) -> Reply {
    Reply::Fail(message.to_string())
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub backend: Backend,
    pub model: String,
    pub prompt: String,
}

/// Answers calls from a fixed script, in order, and records every prompt
pub struct ScriptedInvoker {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
    unconfigured: Vec<Backend>,
}

impl ScriptedInvoker {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
            unconfigured: Vec::new(),
        }
    }

    pub fn without_credentials(mut self, backend: Backend) -> Self {
        self.unconfigured.push(backend);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn prompt(&self, index: usize) -> String {
        self.calls.lock().unwrap()[index].prompt.clone()
    }
}

#[async_trait]
impl ModelInvoker for ScriptedInvoker {
    async fn invoke(&self, backend: Backend, model: &str, prompt: &str) -> DidactResult<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            backend,
            model: model.to_string(),
            prompt: prompt.to_string(),
        });

        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(message)) => Err(DidactError::InvocationError { backend, message }),
            None =>
                Err(DidactError::InvocationError {
                    backend,
                    message: "script exhausted".to_string(),
                }),
        }
    }

    fn ensure_configured(&self, backend: Backend) -> DidactResult<()> {
        if self.unconfigured.contains(&backend) {
            return Err(DidactError::ConfigurationError(format!("Missing required API key for {}", backend)));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn notify(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub fn generator() -> ModelChoice {
    ModelChoice::new(Backend::OpenAi, "gpt-4o")
}

pub fn auditor() -> ModelChoice {
    ModelChoice::new(Backend::Gemini, "gemini-1.5-pro")
}

pub fn params() -> GenerationParameters {
    GenerationParameters {
        inspiration: "El tema central es: fracciones equivalentes.".to_string(),
        group: "8 a 11 años".to_string(),
        entry_level: "Saben sumar y restar números naturales".to_string(),
        exit_level: CognitiveLevel::Analizar,
        narrative_context: "Una tripulación de piratas debe repartir un tesoro.".to_string(),
        generator: generator(),
        auditor: auditor(),
        template: TemplateKind::Immersive,
        session: None,
    }
}

pub fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}
