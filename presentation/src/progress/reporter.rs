//! Progress reporting for council runs

use colored::Colorize;
use council_application::CouncilProgress;
use council_domain::{AgentSlot, CouncilAction, EvaluationResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with one indicatif bar per iteration
pub struct ProgressReporter {
    iteration_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            iteration_bar: Mutex::new(None),
        }
    }

    fn iteration_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line decision summary, colored by action
fn decision_label(result: &EvaluationResult) -> String {
    let text = format!("{} ({})", result.action, result.reason);
    match result.action {
        CouncilAction::Terminate => text.green().to_string(),
        CouncilAction::Reiterate => text.yellow().to_string(),
    }
}

impl CouncilProgress for ProgressReporter {
    fn on_iteration_start(&self, iteration: u32, max_iterations: u32, agents: usize) {
        let pb = ProgressBar::new(agents as u64);
        pb.set_style(Self::iteration_style());
        pb.set_prefix(format!("Iteration {}/{}", iteration, max_iterations));
        pb.set_message("Consulting agents...");

        if let Ok(mut slot) = self.iteration_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_agent_complete(&self, slot: AgentSlot, accepted: bool) {
        if let Ok(guard) = self.iteration_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            let status = if accepted {
                format!("{} {}", "v".green(), slot.display_name())
            } else {
                format!("{} {}", "x".red(), slot.display_name())
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_evaluation(&self, _iteration: u32, result: &EvaluationResult) {
        if let Ok(mut guard) = self.iteration_bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_with_message(decision_label(result));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl CouncilProgress for SimpleProgress {
    fn on_iteration_start(&self, iteration: u32, max_iterations: u32, agents: usize) {
        println!(
            "{} {} ({} agents)",
            "->".cyan(),
            format!("Iteration {}/{}", iteration, max_iterations).bold(),
            agents
        );
    }

    fn on_agent_complete(&self, slot: AgentSlot, accepted: bool) {
        if accepted {
            println!("  {} {}", "v".green(), slot.display_name());
        } else {
            println!("  {} {} (no usable output)", "x".red(), slot.display_name());
        }
    }

    fn on_evaluation(&self, _iteration: u32, result: &EvaluationResult) {
        println!("  {} {}", "=".cyan(), decision_label(result));
    }

    fn on_terminated(&self, _result: &EvaluationResult) {
        println!();
    }
}
