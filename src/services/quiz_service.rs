use std::sync::Arc;

use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{language::Language, question::OptionLabel, question::QuestionRecord},
        dto::quiz_view::{AnswerFeedback, QuizView},
    },
    repositories::InMemorySessionRepository,
    services::{
        completion_client::{CompletionCache, CompletionClient},
        question_parser,
    },
};

/// Drives quiz sessions on behalf of the page: fetches and parses questions,
/// routes answers and restarts, and renders the current view.
#[derive(Clone)]
pub struct QuizService {
    client: Arc<dyn CompletionClient>,
    cache: Option<CompletionCache>,
    sessions: Arc<InMemorySessionRepository>,
}

impl QuizService {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        cache: Option<CompletionCache>,
        sessions: Arc<InMemorySessionRepository>,
    ) -> Self {
        Self {
            client,
            cache,
            sessions,
        }
    }

    pub async fn view(&self, session_id: Uuid) -> QuizView {
        self.sessions
            .find(&session_id)
            .await
            .map(|slot| QuizView::from_slot(&slot))
            .unwrap_or_else(QuizView::idle)
    }

    /// Switching to a different language throws away the current quiz, as a restart would.
    pub async fn select_language(&self, session_id: Uuid, language: Language) -> QuizView {
        let generation = self
            .sessions
            .update(session_id, |slot| slot.begin_selection(language))
            .await;

        match generation {
            Some(generation) => self.load(session_id, language, generation, false).await,
            None => self.view(session_id).await,
        }
    }

    pub async fn submit_answer(
        &self,
        session_id: Uuid,
        label: OptionLabel,
    ) -> AppResult<AnswerFeedback> {
        let outcome = self
            .sessions
            .update(session_id, |slot| -> AppResult<_> {
                slot.active_session_mut()?.submit_answer(label)
            })
            .await?;

        Ok(AnswerFeedback {
            outcome,
            view: self.view(session_id).await,
        })
    }

    pub async fn restart(&self, session_id: Uuid, regenerate: bool) -> AppResult<QuizView> {
        let (language, generation) = self
            .sessions
            .update(session_id, |slot| slot.begin_restart())
            .await?;

        log::info!("Restarting {} quiz for session {}", language, session_id);
        Ok(self.load(session_id, language, generation, regenerate).await)
    }

    /// The fetch runs on its own task so the slot leaves `Loading` even when the
    /// request that started it is dropped.
    async fn load(
        &self,
        session_id: Uuid,
        language: Language,
        generation: u64,
        regenerate: bool,
    ) -> QuizView {
        let service = self.clone();
        let task = tokio::spawn(async move {
            let fetched = service.fetch_questions(language, regenerate).await;
            service
                .sessions
                .update(session_id, |slot| {
                    slot.apply_questions(language, generation, fetched);
                    QuizView::from_slot(slot)
                })
                .await
        });

        match task.await {
            Ok(view) => view,
            Err(err) => {
                log::error!("Question load for {} did not finish: {}", language, err);
                self.sessions
                    .update(session_id, |slot| {
                        slot.apply_questions(
                            language,
                            generation,
                            Err(AppError::InternalError(err.to_string())),
                        );
                        QuizView::from_slot(slot)
                    })
                    .await
            }
        }
    }

    async fn fetch_questions(
        &self,
        language: Language,
        regenerate: bool,
    ) -> AppResult<Vec<QuestionRecord>> {
        if let Some(cache) = &self.cache {
            if regenerate {
                cache.invalidate(language).await;
            } else if let Some(raw) = cache.get(language).await {
                log::debug!("Using cached questions for {}", language);
                return Ok(question_parser::parse(&raw));
            }
        }

        let raw = self.client.generate_questions(language).await?;
        let questions = question_parser::parse(&raw);

        if let Some(cache) = &self.cache {
            if questions.iter().any(QuestionRecord::is_usable) {
                cache.insert(language, raw).await;
            }
        }
        Ok(questions)
    }
}
