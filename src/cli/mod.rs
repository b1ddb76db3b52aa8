use clap::{ Args, Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "didact",
    about = "Designs lesson activities with a generate, audit and refine loop over LLM backends",
    version,
    author,
    long_about = None
)]
pub struct DidactCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub output_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl DidactCli {
    /// Machine-readable output: nothing but the JSON document goes to stdout
    pub fn wants_json(&self) -> bool {
        self.output_format.eq_ignore_ascii_case("json")
    }
}

/// Where the inspiration comes from; prompted for when none is given
#[derive(Args, Debug, Clone, Default)]
pub struct InspirationArgs {
    /// Central topic of the activity
    #[arg(long, conflicts_with_all = ["ideas", "file"])]
    pub topic: Option<String>,

    /// Free-form brainstorm text
    #[arg(long, conflicts_with = "file")]
    pub ideas: Option<String>,

    /// Word, text or Markdown document to draw inspiration from
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Generator and auditor models, as `backend:model` or a bare backend name
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Model used for generation (defaults to the configured generator)
    #[arg(long)]
    pub generator: Option<String>,

    /// Model used for auditing (defaults to the configured auditor)
    #[arg(long)]
    pub auditor: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate one activity and audit it until approved or out of attempts
    Activity {
        #[command(flatten)]
        inspiration: InspirationArgs,

        /// Audience group (age range or discipline)
        #[arg(short, long)]
        group: Option<String>,

        /// Where the learners start, in your own words
        #[arg(short, long)]
        entry_level: Option<String>,

        /// Bloom level the activity must reach
        #[arg(short = 'x', long)]
        exit_level: Option<String>,

        /// Narrative context the activity is immersed in
        #[arg(long, conflicts_with = "suggest_context")]
        context: Option<String>,

        /// Ask the generator for a narrative context first
        #[arg(long, default_value = "false")]
        suggest_context: bool,

        /// Template (immersive, learning-circle); prompted for when omitted
        #[arg(short, long)]
        template: Option<String>,

        #[command(flatten)]
        models: ModelArgs,

        /// Maximum generation attempts
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Output file; Markdown, or Word/JSON for a .docx/.json extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Plan a multi-session sequence and generate every session
    Sequence {
        #[command(flatten)]
        inspiration: InspirationArgs,

        /// Audience group (age range or discipline)
        #[arg(short, long)]
        group: Option<String>,

        /// Where the learners start, in your own words
        #[arg(short, long)]
        entry_level: Option<String>,

        /// Number of sessions
        #[arg(short, long, default_value = "3")]
        sessions: usize,

        /// Bloom level the last session must reach
        #[arg(short, long)]
        final_level: Option<String>,

        /// Template (immersive, learning-circle); prompted for when omitted
        #[arg(short, long)]
        template: Option<String>,

        #[command(flatten)]
        models: ModelArgs,

        /// Maximum generation attempts per session
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Output file; Markdown, or Word/JSON for a .docx/.json extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Suggest a short narrative context for an inspiration
    SuggestContext {
        #[command(flatten)]
        inspiration: InspirationArgs,

        /// Model to ask (defaults to the configured generator)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Rewrite an existing activity with your own feedback
    Refine {
        /// File holding the activity text
        #[arg(short, long)]
        activity: PathBuf,

        /// Feedback to apply; prompted for when omitted
        #[arg(short, long)]
        feedback: Option<String>,

        /// Model to ask (defaults to the configured generator)
        #[arg(short, long)]
        model: Option<String>,

        /// Output file for the refined activity
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the Bloom taxonomy levels and their sub-processes
    Levels {
        /// Show sub-processes and definitions
        #[arg(short, long, default_value = "false")]
        detailed: bool,
    },

    /// List activity categories and their groups
    Categories,
}
