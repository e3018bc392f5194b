//! Prompt templates for the reasoning service

use crate::agent::AgentSlot;
use crate::council::modification::ModificationRequest;
use crate::council::state::CouncilState;

/// Templates for the two reasoning-service calls a council makes
pub struct CouncilPromptTemplate;

impl CouncilPromptTemplate {
    /// Prompt asking the service whether the debate should stop.
    ///
    /// Lists every present output in full (reasoning is never truncated),
    /// highlights the devil's advocate when present, and asks for a single
    /// JSON object.
    pub fn evaluation_prompt(state: &CouncilState) -> String {
        let profile = state.user_profile();
        let asset = state.asset_candidate();
        let market = state.market_context();
        let position = state.position();

        let mut prompt = format!(
            r#"You are evaluating an investment council debate. Decide whether the debate should:
- TERMINATE: the council has reached consensus and is ready to proceed
- REITERATE: more debate is needed, contradictions remain, or confidence is insufficient

INVESTMENT CONTEXT:
User: risk tolerance {}, horizon {} months, savings {:.2}, monthly surplus {:.2}
Asset: {} ({}) type {}, sector {}, region {}, liquidity {}, expected return {:.2}%
Market: trend {}, volatility {:.1}, rates {}, macro risk {}
Position: {:.2} ({:.1}% of portfolio)
Current iteration: {} of {}

AGENT ANALYSIS:
"#,
            profile.risk_tolerance,
            profile.investment_horizon_months,
            profile.total_savings,
            profile.monthly_income - profile.monthly_expenses,
            asset.asset_name,
            asset.asset_id,
            asset.asset_type,
            asset.sector,
            asset.region,
            asset.liquidity_class,
            asset.expected_return_pct,
            market.market_trend,
            market.volatility_index,
            market.interest_rate_regime,
            market.macro_risk_level,
            position.proposed_investment_amount,
            position.percentage_of_portfolio * 100.0,
            state.iteration(),
            state.max_iterations(),
        );

        for (slot, output) in state.outputs() {
            prompt.push_str(&format!(
                "\n--- {} ({}) ---\nVerdict: {} | Confidence: {:.2}\n",
                slot.display_name(),
                output.agent_name,
                output.verdict,
                output.confidence
            ));
            push_list(&mut prompt, "Key findings", &output.key_findings);
            push_list(&mut prompt, "Blocking issues", &output.blocking_issues);
            push_list(&mut prompt, "Recommendations", &output.recommendations);
            if !output.reasoning.is_empty() {
                prompt.push_str(&format!("Reasoning:\n{}\n", output.reasoning));
            }
        }

        if let Some(devil) = state.output(AgentSlot::DevilsAdvocate) {
            prompt.push_str(&format!(
                "\nDEVIL'S ADVOCATE SPECIFICALLY WARNS:\n{}\n",
                if devil.reasoning.is_empty() {
                    devil.key_findings.join("; ")
                } else {
                    devil.reasoning.clone()
                }
            ));
        }

        prompt.push_str(
            r#"
DECISION RULES:
1. If the debate is genuinely stalled (contradictions not resolving), TERMINATE
2. If there are solvable concerns, REITERATE to address them
3. If agents conflict and overall confidence is low, REITERATE for clarity
4. If the devil's advocate raises critical risks, REITERATE to investigate further
5. If the majority strongly agrees and the devil's advocate is satisfied, TERMINATE

Respond with ONLY valid JSON (no other text):
{"action": "REITERATE" or "TERMINATE", "reason": "brief_reason", "reasoning": "detailed explanation"}"#,
        );

        prompt
    }

    /// Prompt asking the service to merge MODIFY recommendations
    pub fn synthesis_prompt(state: &CouncilState, requests: &[ModificationRequest]) -> String {
        let mut prompt = String::from(
            "You are the reasoning engine of an investment council.\n\
             Several agents have asked for modifications:\n\n",
        );

        for request in requests {
            for recommendation in &request.recommendations {
                prompt.push_str(&format!("- [{}] {}\n", request.agent, recommendation));
            }
        }

        let asset = state.asset_candidate();
        prompt.push_str(&format!(
            r#"
Asset: {} ({})
Investment amount: {:.2}

Synthesize these recommendations into a coherent set of modifications that
respects every constraint and maximizes the chance of consensus in the next
iteration. Return a JSON object of the form:
{{"actions": ["..."], "summary": "..."}}"#,
            asset.asset_name,
            asset.asset_id,
            state.position().proposed_investment_amount,
        ));

        prompt
    }
}

fn push_list(prompt: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        prompt.push_str(&format!("{}: none\n", title));
        return;
    }
    prompt.push_str(&format!("{}:\n", title));
    for item in items {
        prompt.push_str(&format!("  - {}\n", item));
    }
}
