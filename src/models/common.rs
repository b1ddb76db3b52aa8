use serde::{ Deserialize, Serialize };
use std::fmt;
use std::str::FromStr;

/// Text-generation backends the invoker can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Gemini,
    OpenAi,
    Vertex,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Gemini, Backend::OpenAi, Backend::Vertex];

    /// Model used when a choice names only the backend
    pub fn default_model(&self) -> &'static str {
        match self {
            Backend::Gemini => "gemini-1.5-pro",
            Backend::OpenAi => "gpt-4o",
            Backend::Vertex => "gemini-2.5-flash",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Gemini => write!(f, "Gemini"),
            Backend::OpenAi => write!(f, "OpenAI"),
            Backend::Vertex => write!(f, "Vertex AI"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Backend::Gemini),
            "openai" | "gpt" => Ok(Backend::OpenAi),
            "vertex" | "vertexai" | "vertex-ai" => Ok(Backend::Vertex),
            other => Err(format!("Unknown backend: {}", other)),
        }
    }
}

/// A backend plus the model name to call on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelChoice {
    pub backend: Backend,
    pub model: String,
}

impl ModelChoice {
    pub fn new(backend: Backend, model: impl Into<String>) -> Self {
        Self { backend, model: model.into() }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.backend, self.model)
    }
}

/// Parses `backend:model`, or a bare backend name which picks its default model
impl FromStr for ModelChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((backend, model)) => {
                let backend = backend.parse::<Backend>()?;
                let model = model.trim();
                if model.is_empty() {
                    Ok(ModelChoice::new(backend, backend.default_model()))
                } else {
                    Ok(ModelChoice::new(backend, model))
                }
            }
            None => {
                let backend = s.parse::<Backend>()?;
                Ok(ModelChoice::new(backend, backend.default_model()))
            }
        }
    }
}

/// Static template content the prompt assembler renders.
///
/// Both kinds share one control flow; they differ only in the reference
/// model layers, the output format and the audit criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    /// Activity immersed in a narrative context, three audit criteria
    #[default]
    Immersive,
    /// Learning-circle activity without narrative layer, four audit criteria
    LearningCircle,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateKind::Immersive => write!(f, "immersive"),
            TemplateKind::LearningCircle => write!(f, "learning-circle"),
        }
    }
}

impl FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "immersive" | "narrative" => Ok(TemplateKind::Immersive),
            "learning-circle" | "circle" | "circulo" => Ok(TemplateKind::LearningCircle),
            other => Err(format!("Unknown template: {}", other)),
        }
    }
}
