//! Modification synthesis
//!
//! Runs between iterations that did not stop. Collects the recommendations of
//! every agent voting MODIFY and, when a reasoning service is available, asks
//! it to merge them. Never touches the TERMINATE/REITERATE decision.

use crate::ports::reasoning_service::ReasoningService;
use council_domain::council::{collect_modification_requests, parse_structured_response};
use council_domain::{CouncilPromptTemplate, CouncilState, ModificationContext};
use std::sync::Arc;
use tracing::{info, warn};

pub struct ModificationSynthesizer {
    service: Option<Arc<dyn ReasoningService>>,
}

impl ModificationSynthesizer {
    pub fn new(service: Option<Arc<dyn ReasoningService>>) -> Self {
        Self { service }
    }

    /// Context for the next round; `None` when no agent asked for changes
    pub async fn synthesize(&self, state: &CouncilState) -> Option<ModificationContext> {
        let requests = collect_modification_requests(state.outputs());
        if requests.is_empty() {
            return None;
        }
        info!("Processing {} MODIFY verdicts", requests.len());

        let Some(service) = &self.service else {
            return Some(ModificationContext::Pending { requests });
        };

        let prompt = CouncilPromptTemplate::synthesis_prompt(state, &requests);
        match service.reason(&prompt).await {
            Ok(text) => Some(ModificationContext::Synthesized {
                requests,
                synthesis: parse_structured_response(&text),
            }),
            Err(e) => {
                warn!("Modification synthesis failed: {}", e);
                Some(ModificationContext::SynthesisFailed {
                    requests,
                    error: e.to_string(),
                })
            }
        }
    }
}
