//! Terminal rendering and line input

use std::io::{self, IsTerminal, Write};

use colored::*;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use grader_core::{highlight, Evaluation, Result, ScoreBand, ScoreBreakdown, Suggestion};

use crate::history::HistoryEntry;

const PROMPT_MARKER: &str = "pgrade>";

/// Display startup banner
pub fn display_banner(backend: &str) {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = 60.min(terminal_width.saturating_sub(4)).max(30);
    let inner = banner_width - 2;

    let boxed = |text: &str| {
        let pad = inner.saturating_sub(text.chars().count() + 2);
        format!("│  {}{}│", text, " ".repeat(pad))
    };

    println!();
    println!("{}", format!("┌{}┐", "─".repeat(inner)).blue());
    println!("{}", boxed("").blue());
    println!("{}", boxed("Prompt Grader").blue().bold());
    println!("{}", boxed("").blue());
    for line in [
        "Score prompts from 0 to 100 across seven criteria",
        "and get concrete suggestions to improve them.",
        "",
    ] {
        println!("{}", boxed(line).blue());
    }
    println!("{}", boxed(&format!("grader: {}", backend)).dimmed());
    println!("{}", format!("└{}┘", "─".repeat(inner)).blue());
    println!();
    println!(
        "{}",
        "💡 Tip: Type a prompt to grade it, or 'help' for commands".dimmed()
    );
    println!();
}

/// Read a line, with ↑/↓ navigating previous inputs
pub async fn handle_input_with_history(history: &mut Vec<String>) -> Result<String> {
    if !io::stdin().is_terminal() {
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok("exit".to_string());
        }
        let input = input.trim().to_string();
        if !input.is_empty() {
            history.push(input.clone());
        }
        return Ok(input);
    }

    enable_raw_mode()?;
    let result = read_line_raw(history);
    disable_raw_mode()?;
    println!();

    let input = result?;
    if !input.is_empty() {
        history.push(input.clone());
    }
    Ok(input)
}

fn redraw(input: &str, previous_len: usize) -> Result<()> {
    let marker = PROMPT_MARKER.green().bold();
    let blank = " ".repeat(previous_len);
    print!("\r{} {}\r{} {}", marker, blank, marker, input);
    io::stdout().flush()?;
    Ok(())
}

fn read_line_raw(history: &[String]) -> Result<String> {
    let mut input = String::new();
    let mut history_index: Option<usize> = None;

    redraw(&input, 0)?;

    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        let previous_len = input.chars().count();

        match key_event.code {
            KeyCode::Enter => return Ok(input),
            KeyCode::Esc => return Ok(String::new()),
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok("exit".to_string());
            }
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Up if !history.is_empty() => {
                let index = match history_index {
                    None => history.len() - 1,
                    Some(idx) => idx.saturating_sub(1),
                };
                history_index = Some(index);
                input = history[index].clone();
            }
            KeyCode::Down => match history_index {
                Some(idx) if idx + 1 < history.len() => {
                    history_index = Some(idx + 1);
                    input = history[idx + 1].clone();
                }
                Some(_) => {
                    history_index = None;
                    input.clear();
                }
                None => {}
            },
            _ => continue,
        }

        redraw(&input, previous_len)?;
    }
}

/// Display help message
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - Grade a prompt and list suggestions", "<prompt>".green());
    println!("  {} - Show recent evaluations", "history".green());
    println!("  {} - Clear the evaluation history", "clear".green());
    println!("  {} - Grade the reference prompt", "example".green());
    println!("  {} - Show this help message", "help".green());
    println!("  {} - Exit the application", "exit/quit".green());
    println!();
    println!("{}", "Examples:".bold());
    println!("  Write a short story.");
    println!("  Act as a travel agent and plan a 3-day trip to Lisbon for a family of four.");
}

/// Terminal colour for a band
pub fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Excellent => Color::Green,
        ScoreBand::Good => Color::Yellow,
        ScoreBand::Fair => Color::BrightRed,
        ScoreBand::Poor => Color::Red,
    }
}

/// Ten-cell bar for a 0-100 value
pub fn score_bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 100.0) / 10.0).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

pub fn print_score(score: u8) {
    let band = ScoreBand::from_score(score);
    println!("{}", score.to_string().color(band_color(band)).bold());
}

pub fn print_evaluation(prompt: &str, evaluation: &Evaluation) {
    let color = band_color(evaluation.band);
    println!();
    println!(
        "{} {} {}",
        "Score:".bold(),
        format!("{}/100", evaluation.score).color(color).bold(),
        format!("({})", evaluation.label).color(color)
    );
    println!("  {}", score_bar(evaluation.score as f64).color(color));

    if evaluation.suggestions.is_empty() {
        if !prompt.trim().is_empty() {
            println!("{} No suggestions. Nice prompt!", "✅".green());
        }
        return;
    }

    println!();
    print_suggestions(&evaluation.suggestions);

    if evaluation
        .suggestions
        .iter()
        .any(|s| !s.highlight_patterns.is_empty())
    {
        println!();
        println!("{}", "Highlighted:".bold());
        println!("  {}", highlight_prompt(prompt, &evaluation.suggestions));
    }
    println!();
}

pub fn print_suggestions(suggestions: &[Suggestion]) {
    println!("{}", "Suggestions:".bold());
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!(
            "  {}. {} {} {}",
            i + 1,
            suggestion.category.icon(),
            format!("[{}]", suggestion.category).cyan(),
            suggestion.message
        );
    }
}

pub fn print_breakdown(breakdown: &ScoreBreakdown) {
    println!("{}", "Breakdown:".bold());
    for sub in &breakdown.sub_scores {
        println!(
            "  {} {:<12} {} {:>5.1}",
            sub.criterion.icon(),
            sub.criterion.display_name(),
            score_bar(sub.value).dimmed(),
            sub.value
        );
    }
}

pub fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("{}", "No prompts evaluated yet.".dimmed());
        return;
    }

    for entry in entries {
        let color = band_color(ScoreBand::from_score(entry.score));
        println!(
            "{} {} {}",
            entry
                .timestamp
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed(),
            format!("{:>3}", entry.score).color(color).bold(),
            truncate(&entry.prompt, 60)
        );
    }
}

/// All highlight patterns carried by the suggestions
pub fn collect_patterns(suggestions: &[Suggestion]) -> Vec<&str> {
    suggestions
        .iter()
        .flat_map(|s| s.highlight_patterns.iter().map(String::as_str))
        .collect()
}

/// The prompt with every highlighted span emphasised
pub fn highlight_prompt(prompt: &str, suggestions: &[Suggestion]) -> String {
    highlight::mark_with(prompt, &collect_patterns(suggestions), |span| {
        span.black().on_yellow().to_string()
    })
}

/// Shorten to at most `max` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let kept: String = single_line.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
