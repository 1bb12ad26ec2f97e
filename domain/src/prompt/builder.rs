//! Per-model prompt construction from the debate transcript.

use crate::core::model::{ModelCatalog, ModelId};
use crate::debate::session::DebateSession;

use super::template::{Prompt, PromptTemplate};

/// Builds the prompt each model receives for a round
///
/// Pure over its inputs: the same session state, round, and model always
/// produce the same prompt.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Prompt for `model` in `round`
    ///
    /// Round 1 asks for an opening position. Later rounds quote every other
    /// participant's accepted response from the previous round, in selection
    /// order, labeled with catalog display names; participants that failed
    /// or timed out in that round are left out entirely. The model's own
    /// latest accepted response, when it has one, is included for
    /// continuity.
    pub fn for_round(
        session: &DebateSession,
        catalog: &ModelCatalog,
        round: u32,
        model: &ModelId,
    ) -> Prompt {
        if round <= 1 {
            return Prompt::new(
                PromptTemplate::opening_system(),
                PromptTemplate::opening_query(session.question(), session.context()),
            );
        }

        let previous_round = round - 1;
        let others: Vec<(String, String)> = session
            .selected_models()
            .iter()
            .filter(|other| *other != model)
            .filter_map(|other| {
                session
                    .responses_for_round(previous_round)
                    .into_iter()
                    .find(|e| &e.model == other && e.is_ok())
                    .map(|e| (catalog.display_name(other), e.content.clone()))
            })
            .collect();

        let own_previous = session.latest_ok(model).map(|e| e.content.clone());

        Prompt::new(
            PromptTemplate::revision_system(),
            PromptTemplate::revision_query(
                session.question(),
                session.context(),
                own_previous.as_deref(),
                &others,
            ),
        )
    }

    /// Prompt asking the moderator to summarize the finished debate
    ///
    /// Quotes each participant's latest accepted response in selection
    /// order.
    pub fn for_synthesis(session: &DebateSession, catalog: &ModelCatalog) -> Prompt {
        let finals: Vec<(String, String)> = session
            .final_ok_responses()
            .into_iter()
            .map(|e| (catalog.display_name(&e.model), e.content.clone()))
            .collect();

        Prompt::new(
            PromptTemplate::synthesis_system(),
            PromptTemplate::synthesis_query(session.question(), &finals),
        )
    }
}
