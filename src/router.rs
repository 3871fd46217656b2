//! Message routing
//!
//! One inbound text message in, one or more outbound texts back.
//! Distinguishes command tokens (/start, /cancel, /help) from ordinary
//! answers, drives the state machine, and renders everything through the
//! presenter. Transport-agnostic: the console and HTTP binaries both sit
//! on top of this.

use std::sync::Arc;
use tracing::{info, warn};

use crate::intake::{CapacityMode, IntakeStateMachine, StepOutcome};
use crate::models::Language;
use crate::presenter;
use crate::session::{SessionId, SessionStore};
use crate::Result;

/// Flow-start trigger.
pub const START_COMMAND: &str = "/start";
/// Global cancellation trigger, accepted from any non-terminal state.
pub const CANCEL_COMMAND: &str = "/cancel";

/// Routes channel messages through the intake flow.
pub struct IntakeRouter {
    store: Arc<dyn SessionStore>,
    machine: IntakeStateMachine,
}

impl IntakeRouter {
    pub fn new(store: Arc<dyn SessionStore>, mode: CapacityMode) -> Self {
        Self {
            store,
            machine: IntakeStateMachine::new(mode),
        }
    }

    /// Handle one inbound message for one session, to completion.
    ///
    /// Returns the outbound messages for this turn, in send order.
    pub async fn handle_message(&self, channel_id: &str, text: &str) -> Result<Vec<String>> {
        let id = SessionId::from_channel_id(channel_id);
        let text = text.trim();

        match text {
            START_COMMAND => return self.start(id).await,
            CANCEL_COMMAND => return self.cancel(id).await,
            "/help" | "/guide" => {
                let lang = self.session_language(id).await?;
                return Ok(vec![presenter::guide_text(lang).to_string()]);
            }
            _ => {}
        }

        // Unknown commands get the guide rather than being fed to the
        // flow as answers.
        if text.starts_with('/') {
            let lang = self.session_language(id).await?;
            return Ok(vec![presenter::guide_text(lang).to_string()]);
        }

        self.answer(id, text).await
    }

    async fn start(&self, id: SessionId) -> Result<Vec<String>> {
        // begin() replaces any prior session wholesale, so a mid-flow
        // /start can never leak fields from the abandoned run
        let handle = self.store.begin(id, self.machine.mode()).await?;
        let session = handle.lock().await;

        info!(session_id = ?id, mode = ?session.mode, "intake started");
        Ok(vec![presenter::prompt_text(
            Language::English,
            &session.stage,
        )])
    }

    async fn cancel(&self, id: SessionId) -> Result<Vec<String>> {
        let Some(handle) = self.store.get(id).await? else {
            return Ok(vec![presenter::no_session_text(Language::English).to_string()]);
        };

        let lang = {
            let session = handle.lock().await;
            session.draft.language.unwrap_or(Language::English)
        };

        self.store.remove(id).await?;
        info!(session_id = ?id, "intake cancelled, draft discarded");
        Ok(vec![presenter::cancelled_text(lang).to_string()])
    }

    async fn answer(&self, id: SessionId, text: &str) -> Result<Vec<String>> {
        let Some(handle) = self.store.get(id).await? else {
            return Ok(vec![presenter::no_session_text(Language::English).to_string()]);
        };

        let mut guard = handle.lock().await;
        let session = &mut *guard;
        let outcome = self
            .machine
            .advance(&mut session.stage, &mut session.draft, text)?;
        // Read after the step so the very first answer (the language
        // choice) already affects the next prompt
        let lang = session.draft.language.unwrap_or(Language::English);

        match outcome {
            StepOutcome::Next(stage) => Ok(vec![presenter::prompt_text(lang, &stage)]),

            StepOutcome::Reprompt { stage, error } => {
                warn!(session_id = ?id, ?stage, ?error, "invalid answer");
                Ok(vec![
                    presenter::error_text(lang, error).to_string(),
                    presenter::prompt_text(lang, &stage),
                ])
            }

            StepOutcome::Completed(report) => {
                drop(guard);
                self.store.remove(id).await?;

                info!(
                    session_id = ?id,
                    true_net_profit = report.true_net_profit_year1,
                    "intake completed, session destroyed"
                );
                Ok(vec![
                    presenter::processing_text(lang).to_string(),
                    presenter::format_report(&report, lang),
                    presenter::done_text(lang).to_string(),
                ])
            }
        }
    }

    async fn session_language(&self, id: SessionId) -> Result<Language> {
        let Some(handle) = self.store.get(id).await? else {
            return Ok(Language::English);
        };
        let session = handle.lock().await;
        Ok(session.draft.language.unwrap_or(Language::English))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;

    fn router(mode: CapacityMode) -> IntakeRouter {
        IntakeRouter::new(Arc::new(InMemorySessionStore::new()), mode)
    }

    async fn send(router: &IntakeRouter, text: &str) -> Vec<String> {
        router.handle_message("chat-1", text).await.unwrap()
    }

    #[tokio::test]
    async fn test_full_fixed_flow_conversation() {
        let router = router(CapacityMode::FixedTwelve);

        let replies = send(&router, "/start").await;
        assert!(replies[0].contains("Choose language"));

        assert!(send(&router, "1").await[0].contains("Choose location"));
        assert!(send(&router, "1").await[0].contains("yearly rent"));
        assert!(send(&router, "85000").await[0].contains("bed price"));
        assert!(send(&router, "1000").await[0].contains("Choose manager"));

        let replies = send(&router, "1").await;
        assert_eq!(replies.len(), 3);
        assert!(replies[0].contains("Calculating"));
        assert!(replies[1].contains("Apartment Investment Report"));
        assert!(replies[1].contains("AED 52,833.33"));
        assert!(replies[2].contains("/start"));

        // Session torn down: the next answer needs a fresh /start
        let replies = send(&router, "1").await;
        assert!(replies[0].contains("/start"));
    }

    #[tokio::test]
    async fn test_arabic_prompts_after_language_choice() {
        let router = router(CapacityMode::RoomsAndHall);

        send(&router, "/start").await;
        let replies = send(&router, "2").await;
        assert!(replies[0].contains("دبي"));
    }

    #[tokio::test]
    async fn test_invalid_answer_reprompts_same_question() {
        let router = router(CapacityMode::FixedTwelve);

        send(&router, "/start").await;
        send(&router, "1").await;
        send(&router, "1").await;

        // Yearly rent stage: junk is rejected with error + same prompt
        let replies = send(&router, "not a number").await;
        assert_eq!(replies.len(), 2);
        assert!(replies[0].contains("Invalid number"));
        assert!(replies[1].contains("yearly rent"));

        // The flow is still alive and still on the same question
        assert!(send(&router, "60000").await[0].contains("bed price"));
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let router = router(CapacityMode::RoomsAndHall);

        send(&router, "/start").await;
        send(&router, "1").await;
        send(&router, "1").await;

        let replies = send(&router, "/cancel").await;
        assert!(replies[0].contains("Cancelled"));

        // Draft gone: an answer after cancel is met with the start hint
        let replies = send(&router, "2").await;
        assert!(replies[0].contains("/start"));
    }

    #[tokio::test]
    async fn test_restart_mid_flow_resets_everything() {
        let router = router(CapacityMode::FixedTwelve);

        send(&router, "/start").await;
        send(&router, "2").await; // Arabic
        send(&router, "1").await;

        // Restart: back to the language question, English default again
        let replies = send(&router, "/start").await;
        assert!(replies[0].contains("Choose language"));
    }

    #[tokio::test]
    async fn test_help_without_session() {
        let router = router(CapacityMode::FixedTwelve);
        let replies = send(&router, "/help").await;
        assert!(replies[0].contains("/start"));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated_by_channel() {
        let router = router(CapacityMode::FixedTwelve);

        router.handle_message("alice", "/start").await.unwrap();
        router.handle_message("alice", "1").await.unwrap();

        // Bob has no session; Alice's flow is unaffected by his message
        let replies = router.handle_message("bob", "1").await.unwrap();
        assert!(replies[0].contains("/start"));

        let replies = router.handle_message("alice", "1").await.unwrap();
        assert!(replies[0].contains("yearly rent"));
    }
}
