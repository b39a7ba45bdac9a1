//! Terminal interface for Prompt Grader

mod backend;
mod client;
mod history;
mod ui;

#[cfg(test)]
mod tests;

pub use backend::{GradingBackend, LocalBackend};
pub use client::{status_message, RemoteGrader, DEFAULT_API_URL, REQUEST_TIMEOUT};
pub use history::{HistoryEntry, HistoryStore, DEFAULT_HISTORY_FILE, HISTORY_CAPACITY};
pub use ui::{
    band_color, display_banner, handle_input_with_history, highlight_prompt, print_breakdown,
    print_evaluation, print_help, print_history, print_score, print_suggestions, score_bar,
    truncate,
};

// Re-export core types
pub use grader_core::{Error, Result};
