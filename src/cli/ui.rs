use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Confirm, Input, Select };
use indicatif::{ ProgressBar, ProgressStyle };
use std::sync::Mutex;
use std::time::Duration;
use textwrap::wrap;

use didact::models::catalog::ACTIVITY_CATEGORIES;
use didact::models::common::TemplateKind;
use didact::models::progress::ProgressEvent;
use didact::models::taxonomy::{ CognitiveLevel, BLOOM_TAXONOMY };
use didact::models::verdict::VerdictStatus;
use didact::traits::progress_sink::ProgressSink;

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

fn terminal_width() -> usize {
    (Term::stdout().size().1 as usize).max(40)
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text with proper wrapping
pub fn print_text(text: &str) {
    let width = terminal_width();
    for line in text.lines() {
        if line.starts_with('#') || line.trim_start().starts_with("**") {
            println!("{}", line.bold());
        } else if line.trim_start().starts_with('-') {
            println!("{}", line);
        } else {
            for wrapped_line in wrap(line, width.saturating_sub(10)) {
                println!("{}", wrapped_line);
            }
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message to stderr
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message to stderr
pub fn print_success(message: &str) {
    eprintln!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information to stderr
pub fn print_info(message: &str) {
    eprintln!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Print an audit verdict with color
pub fn print_verdict_status(status: &VerdictStatus) {
    let marker = status.marker();
    match status {
        VerdictStatus::Approved => println!("{}", marker.green().bold()),
        VerdictStatus::PartiallyApproved => println!("{}", marker.yellow().bold()),
        VerdictStatus::Rejected => println!("{}", marker.red().bold()),
    }
}

/// Display a spinner while waiting for an operation to complete
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Renders pipeline progress as spinners and colored lines
pub struct ConsoleProgress {
    spinner: Mutex<Option<ProgressBar>>,
    show_audits: bool,
}

impl ConsoleProgress {
    pub fn new(show_audits: bool) -> Self {
        Self { spinner: Mutex::new(None), show_audits }
    }

    fn start(&self, message: String) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.take() {
                previous.finish_and_clear();
            }
            *slot = Some(spinner_with_message(&message));
        }
    }

    fn stop(&self, message: Option<String>) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(spinner) = slot.take() {
                match message {
                    Some(message) => spinner.finish_with_message(message),
                    None => spinner.finish_and_clear(),
                }
            }
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn notify(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::PlanningSequence { sessions, model } => {
                self.start(format!("Planning a sequence of {} sessions with {}...", sessions, model));
            }
            ProgressEvent::SessionStarted { number, total, target_level } => {
                self.stop(Some("Sequence plan ready".to_string()));
                print_header(&format!("Session {} of {} | {}", number, total, target_level));
            }
            ProgressEvent::AttemptStarted { attempt, max_attempts } => {
                println!("{}", format!("Attempt {}/{}", attempt, max_attempts).cyan().bold());
            }
            ProgressEvent::Generating { attempt, model } => {
                self.start(format!("Generating activity (attempt {}) with {}...", attempt, model));
            }
            ProgressEvent::Generated { attempt, content } => {
                self.stop(
                    Some(format!("Attempt {} generated ({} characters)", attempt, content.len()))
                );
            }
            ProgressEvent::Auditing { attempt, model } => {
                self.start(format!("Auditing attempt {} with {}...", attempt, model));
            }
            ProgressEvent::Audited { status, audit_text, .. } => {
                self.stop(None);
                print_verdict_status(status);
                if self.show_audits {
                    print_text(audit_text);
                }
            }
            ProgressEvent::NeedsRefinement { attempt, observations } => {
                print_warning(&format!("Attempt {} needs refinement: {}", attempt, observations));
            }
            ProgressEvent::Approved { attempt } => {
                print_success(&format!("Activity approved on attempt {}", attempt));
            }
            ProgressEvent::Exhausted { max_attempts } => {
                print_warning(
                    &format!("No approval after {} attempts; keeping the last version", max_attempts)
                );
            }
            ProgressEvent::GenerationFailed { attempt, error } => {
                self.stop(None);
                print_error(&format!("Generation failed on attempt {}: {}", attempt, error));
            }
            ProgressEvent::AuditFailed { attempt, error } => {
                self.stop(None);
                print_error(&format!("Audit failed on attempt {}: {}", attempt, error));
            }
        }
    }
}

/// Interactive selection of a Bloom level
pub fn select_level(prompt: &str, default: CognitiveLevel) -> std::io::Result<CognitiveLevel> {
    let items: Vec<String> = BLOOM_TAXONOMY.iter()
        .map(|entry| format!("{} - {}", entry.level, entry.definition))
        .collect();

    let selection = Select::with_theme(&get_theme())
        .with_prompt(prompt)
        .items(&items)
        .default(default as usize)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    Ok(CognitiveLevel::ALL.get(selection).copied().unwrap_or_else(CognitiveLevel::terminal))
}

/// Interactive selection of a category, then one of its groups
pub fn select_group() -> std::io::Result<String> {
    let categories: Vec<&str> = ACTIVITY_CATEGORIES.iter()
        .map(|c| c.name)
        .collect();

    let category_index = Select::with_theme(&get_theme())
        .with_prompt("Select activity category")
        .items(&categories)
        .default(0)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let category = &ACTIVITY_CATEGORIES[category_index];

    let group_index = Select::with_theme(&get_theme())
        .with_prompt(category.group_label())
        .items(category.groups)
        .default(0)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    Ok(category.groups[group_index].to_string())
}

/// Interactive selection of the activity template
pub fn select_template() -> std::io::Result<TemplateKind> {
    let templates = vec![
        "Immersive (narrative context, three audit criteria)",
        "Learning circle (four audit criteria, partial approval)"
    ];

    let selection = Select::with_theme(&get_theme())
        .with_prompt("Select activity template")
        .items(&templates)
        .default(0)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    Ok(match selection {
        1 => TemplateKind::LearningCircle,
        _ => TemplateKind::Immersive,
    })
}

/// Ask for a line of text
pub fn input_text(prompt: &str, allow_empty: bool) -> std::io::Result<String> {
    Input::<String>
        ::with_theme(&get_theme())
        .with_prompt(prompt)
        .allow_empty(allow_empty)
        .interact_text()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Confirm an action with the user
pub fn confirm_action(prompt: &str) -> std::io::Result<bool> {
    Confirm::with_theme(&get_theme())
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Display an activity under a header
pub fn display_activity(title: &str, content: &str) {
    print_header(title);
    print_text(content);
    println!();
}
