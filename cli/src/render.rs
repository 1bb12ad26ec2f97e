//! Console rendering for debate output

use colored::{ColoredString, Colorize};
use consensus_domain::{
    ConsensusReport, DebateSession, ModelCatalog, ModelId, ProgressEvent, ResponseStatus,
};

/// Formats debate progress and results for console display
pub struct ConsoleRenderer {
    catalog: ModelCatalog,
}

impl ConsoleRenderer {
    pub fn new(catalog: ModelCatalog) -> Self {
        Self { catalog }
    }

    /// Model display name in its profile color.
    fn painted(&self, model: &ModelId) -> ColoredString {
        let profile = self.catalog.profile(model);
        match hex_components(&profile.color) {
            Some((r, g, b)) => profile.display_name.truecolor(r, g, b),
            None => profile.display_name.normal(),
        }
    }

    /// Opening banner for interactive runs.
    pub fn banner(&self, question: &str, models: &[ModelId], rounds: u32) -> String {
        let mut output = String::new();
        let line = "=".repeat(60);
        output.push_str(&format!("{}\n", line.cyan()));
        output.push_str(&format!("{:^60}\n", "Consensus - Multi-AI Debate".bold()));
        output.push_str(&format!("{}\n\n", line.cyan()));
        output.push_str(&format!("{} {}\n", "Question:".cyan().bold(), question));
        output.push_str(&format!(
            "{} {}\n",
            "Models:".cyan().bold(),
            models
                .iter()
                .map(|m| self.catalog.display_name(m))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        output.push_str(&format!("{} {}\n", "Rounds:".cyan().bold(), rounds));
        output
    }

    /// Catalog listing for `--list-models`.
    pub fn model_list(&self) -> String {
        let mut output = String::new();
        for profile in self.catalog.profiles() {
            output.push_str(&format!(
                "{:<10} {}  {}\n",
                profile.id.as_str(),
                self.painted(&profile.id),
                profile.color.dimmed()
            ));
        }
        output
    }

    /// One printable block for a live progress event, if it has one.
    pub fn live_event(&self, event: &ProgressEvent) -> Option<String> {
        match event {
            ProgressEvent::Response {
                model,
                round,
                content,
                status,
                ..
            } => {
                let heading = match status {
                    ResponseStatus::Ok => {
                        format!("── {} (round {}) ──", self.painted(model), round)
                    }
                    _ => format!("── {} (round {}) ──", self.painted(model), round)
                        .red()
                        .to_string(),
                };
                Some(format!("\n{}\n{}\n", heading, content))
            }
            ProgressEvent::Consensus { report } => Some(self.format_report(report)),
            ProgressEvent::Error { model: None, reason } => {
                Some(format!("\n{} {}\n", "Debate failed:".red().bold(), reason))
            }
            ProgressEvent::Error {
                model: Some(model),
                reason,
            } => Some(format!(
                "\n{} {}: {}\n",
                "Error from".red().bold(),
                self.painted(model),
                reason
            )),
            ProgressEvent::Done { cancelled: true } => {
                Some(format!("\n{}\n", "Debate cancelled.".yellow().bold()))
            }
            ProgressEvent::Done { cancelled: false } => None,
        }
    }

    /// Full transcript grouped by round, then the report.
    pub fn format_full(&self, session: &DebateSession) -> String {
        let mut output = String::new();
        for round in 1..=session.current_round() {
            let entries = session.responses_for_round(round);
            if entries.is_empty() {
                continue;
            }
            output.push_str(&section_header(&format!("Round {}", round)));
            for entry in entries {
                let name = self.painted(&entry.model);
                if entry.is_ok() {
                    output.push_str(&format!("\n{}\n{}\n", format!("── {} ──", name), entry.content));
                } else {
                    output.push_str(&format!(
                        "\n{}\n{}\n",
                        format!("── {} ──", name).red(),
                        entry.content
                    ));
                }
            }
        }

        if let Some(report) = session.report() {
            output.push_str(&self.format_report(report));
        }
        output
    }

    /// The consensus report section.
    pub fn format_report(&self, report: &ConsensusReport) -> String {
        let mut output = String::new();
        output.push_str(&section_header("Consensus"));
        output.push_str(&format!("\n{}\n", report.summary));

        if !report.common_themes.is_empty() {
            output.push_str(&format!("\n{}\n", "Common themes:".cyan().bold()));
            for theme in &report.common_themes {
                output.push_str(&format!("  * {}\n", theme));
            }
        }

        if !report.response_lengths.is_empty() {
            output.push_str(&format!("\n{}\n", "Response lengths:".dimmed()));
            for (model, length) in &report.response_lengths {
                output.push_str(&format!(
                    "  {} {} chars\n",
                    self.catalog.display_name(model),
                    length
                ));
            }
        }

        output.push_str(&format!(
            "\n{}\n",
            format!("(synthesized from round {})", report.generated_from_round).dimmed()
        ));
        output
    }
}

fn section_header(title: &str) -> String {
    format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
}

fn hex_components(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
