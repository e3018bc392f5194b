//! Console output formatter for council results

use colored::Colorize;
use council_domain::{
    AgentSlot, CouncilAction, EvaluationDetails, FinalRecommendation, IterationRecord, Verdict,
};
use std::collections::BTreeMap;

/// Formats the final recommendation for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result, including the debate history
    pub fn format(result: &FinalRecommendation) -> String {
        let mut output = Self::format_summary(result);

        if let Some(details) = &result.details {
            output.push_str(&Self::section_header("Decision Details"));
            output.push_str(&Self::details(details));
        }

        output.push_str(&Self::section_header("Debate History"));
        for record in &result.debate_history {
            output.push_str(&Self::history_line(record));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Recommendation and final verdicts only
    pub fn format_summary(result: &FinalRecommendation) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Investment Council Recommendation"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Asset:".cyan().bold(),
            result.asset_id
        ));
        output.push_str(&format!(
            "{} {:.2}\n\n",
            "Proposed amount:".cyan().bold(),
            result.proposed_amount
        ));

        let reason = result
            .recommendation
            .as_ref()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "NONE".to_string());
        let outcome = if result.forced_stop {
            format!("{} (iteration limit reached)", reason).yellow().bold()
        } else if result.consensus {
            reason.green().bold()
        } else {
            reason.red().bold()
        };
        output.push_str(&format!("{} {}\n", "Recommendation:".cyan().bold(), outcome));
        output.push_str(&format!(
            "{} {}\n",
            "Consensus:".cyan().bold(),
            if result.consensus { "yes" } else { "no" }
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Iterations:".cyan().bold(),
            result.iterations
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Average confidence:".cyan().bold(),
            result
                .average_confidence
                .map(|c| format!("{:.2}", c))
                .unwrap_or_else(|| "n/a".to_string())
        ));

        output.push_str(&Self::section_header("Agent Verdicts"));
        output.push_str(&Self::verdict_table(&result.agent_verdicts));

        output
    }

    /// Format as JSON
    pub fn format_json(result: &FinalRecommendation) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn verdict_table(verdicts: &BTreeMap<AgentSlot, Option<Verdict>>) -> String {
        let mut output = String::new();
        for (slot, verdict) in verdicts {
            let label = match verdict {
                Some(Verdict::Approve) => "APPROVE".green(),
                Some(Verdict::Modify) => "MODIFY".yellow(),
                Some(Verdict::Reject) => "REJECT".red(),
                None => "no output".dimmed(),
            };
            output.push_str(&format!("  {:<22} {}\n", slot.display_name(), label));
        }
        output
    }

    fn details(details: &EvaluationDetails) -> String {
        match details {
            EvaluationDetails::NoOutputs { message } => format!("  {}\n", message),
            EvaluationDetails::Rejected { rejecting_agents } => format!(
                "  Rejected by: {}\n",
                Self::slot_list(rejecting_agents.iter())
            ),
            EvaluationDetails::BlockingIssues { blocking_agents } => {
                let mut out = String::new();
                for (slot, issues) in blocking_agents {
                    out.push_str(&format!("  {}:\n", slot.display_name().bold()));
                    for issue in issues {
                        out.push_str(&format!("    * {}\n", issue));
                    }
                }
                out
            }
            EvaluationDetails::LowConfidence {
                average_confidence,
                threshold,
                ..
            } => format!(
                "  Average confidence {:.2} below threshold {:.2}\n",
                average_confidence, threshold
            ),
            EvaluationDetails::Consensus {
                average_confidence,
                agent_count,
                ..
            } => format!(
                "  {} agents agreed, average confidence {:.2}\n",
                agent_count, average_confidence
            ),
            EvaluationDetails::ServiceDecision { rationale, .. } => {
                format!("{}\n", Self::indent(rationale, "  "))
            }
            EvaluationDetails::MaxIterations {
                iterations,
                superseded_reason,
                superseded_details,
            } => {
                let mut out = format!("  Stopped after {} iterations\n", iterations);
                if let Some(reason) = superseded_reason {
                    out.push_str(&format!("  Last evaluation: {}\n", reason));
                }
                if let Some(inner) = superseded_details {
                    out.push_str(&Self::indent(&Self::details(inner), "  "));
                    out.push('\n');
                }
                out
            }
        }
    }

    fn history_line(record: &IterationRecord) -> String {
        let action = match record.action {
            CouncilAction::Terminate => record.action.as_str().green(),
            CouncilAction::Reiterate => record.action.as_str().yellow(),
        };
        let verdicts = record
            .verdicts
            .iter()
            .map(|(slot, verdict)| {
                format!(
                    "{}={}",
                    slot.as_str(),
                    verdict.map(|v| v.as_str()).unwrap_or("-")
                )
            })
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "  #{:<2} {} {} [{}]\n",
            record.iteration, action, record.decision, verdicts
        )
    }

    fn slot_list<'a>(slots: impl Iterator<Item = &'a AgentSlot>) -> String {
        slots
            .map(|s| s.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
