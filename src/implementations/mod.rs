pub mod config;
pub mod docx;
pub mod export;
pub mod inspiration;
pub mod invoker;
pub mod prompts;
pub mod refinement;
pub mod sequence;
pub mod studio;
pub mod verdict;
