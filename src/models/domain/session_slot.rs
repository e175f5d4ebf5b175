use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        language::Language,
        question::QuestionRecord,
        quiz_session::{QuizSession, SessionState},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    FetchFailure,
    ParseYieldedNothing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Unavailable {
        reason: UnavailableReason,
        message: String,
    },
}

/// Everything one browser owns: the selected language, the quiz for it and the
/// generation of the question request currently allowed to fill it.
#[derive(Clone, Debug)]
pub struct SessionSlot {
    pub language: Option<Language>,
    pub generation: u64,
    pub status: LoadStatus,
    pub session: Option<QuizSession>,
    pub last_active: DateTime<Utc>,
}

impl Default for SessionSlot {
    fn default() -> Self {
        Self {
            language: None,
            generation: 0,
            status: LoadStatus::Idle,
            session: None,
            last_active: Utc::now(),
        }
    }
}

impl SessionSlot {
    /// Returns the generation to fetch under, or `None` when the language is
    /// already loaded or loading.
    pub fn begin_selection(&mut self, language: Language) -> Option<u64> {
        if self.language == Some(language)
            && matches!(self.status, LoadStatus::Loading | LoadStatus::Ready)
        {
            return None;
        }

        self.language = Some(language);
        self.session = None;
        Some(self.begin_loading())
    }

    /// Restarts the current quiz and returns the language and generation to refetch under.
    pub fn begin_restart(&mut self) -> AppResult<(Language, u64)> {
        let language = self.language.ok_or_else(|| {
            AppError::InvalidSessionState("no language has been selected".to_string())
        })?;

        if let Some(session) = self.session.as_mut() {
            session.restart();
        }
        Ok((language, self.begin_loading()))
    }

    fn begin_loading(&mut self) -> u64 {
        self.generation += 1;
        self.status = LoadStatus::Loading;
        self.generation
    }

    pub fn is_current(&self, language: Language, generation: u64) -> bool {
        self.language == Some(language) && self.generation == generation
    }

    /// Applies a finished fetch. Results for a superseded request are dropped and
    /// `false` is returned.
    pub fn apply_questions(
        &mut self,
        language: Language,
        generation: u64,
        fetched: AppResult<Vec<QuestionRecord>>,
    ) -> bool {
        if !self.is_current(language, generation) {
            log::info!(
                "Discarding {} questions from superseded request {} (current: {:?} #{})",
                language,
                generation,
                self.language,
                self.generation
            );
            return false;
        }

        let session = match fetched.and_then(|questions| self.session_for(language, questions)) {
            Ok(session) => session,
            Err(err) => {
                log::warn!("Question fetch for {} failed: {}", language, err);
                self.session = None;
                self.status = LoadStatus::Unavailable {
                    reason: UnavailableReason::FetchFailure,
                    message: err.to_string(),
                };
                return true;
            }
        };

        if session.questions().is_empty() {
            log::warn!("Completion for {} contained no usable questions", language);
            self.status = LoadStatus::Unavailable {
                reason: UnavailableReason::ParseYieldedNothing,
                message: "the generated text contained no usable questions".to_string(),
            };
            self.session = None;
        } else {
            self.status = LoadStatus::Ready;
            self.session = Some(session);
        }
        true
    }

    /// Refills a restarted quiz in place, otherwise starts a new one.
    fn session_for(
        &mut self,
        language: Language,
        questions: Vec<QuestionRecord>,
    ) -> AppResult<QuizSession> {
        match self.session.take() {
            Some(mut restarted) if restarted.state() == SessionState::Uninitialized => {
                restarted.load_questions(questions)?;
                Ok(restarted)
            }
            _ => Ok(QuizSession::new(language, questions)),
        }
    }

    /// The quiz that answers may be submitted to.
    pub fn active_session_mut(&mut self) -> AppResult<&mut QuizSession> {
        match (&self.status, self.session.as_mut()) {
            (LoadStatus::Ready, Some(session)) => Ok(session),
            _ => Err(AppError::InvalidSessionState(
                "no quiz is ready for answers".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::question::OptionLabel;
    use crate::test_utils::fixtures::sample_questions;

    #[test]
    fn selecting_same_language_twice_does_not_refetch() {
        let mut slot = SessionSlot::default();

        let generation = slot.begin_selection(Language::Python).unwrap();
        assert!(slot.apply_questions(Language::Python, generation, Ok(sample_questions())));

        assert_eq!(slot.begin_selection(Language::Python), None);
        assert_eq!(slot.status, LoadStatus::Ready);
    }

    #[test]
    fn changing_language_discards_session() {
        let mut slot = SessionSlot::default();
        let generation = slot.begin_selection(Language::Python).unwrap();
        slot.apply_questions(Language::Python, generation, Ok(sample_questions()));

        let next = slot.begin_selection(Language::Java).unwrap();

        assert!(next > generation);
        assert!(slot.session.is_none());
        assert_eq!(slot.status, LoadStatus::Loading);
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut slot = SessionSlot::default();
        let python = slot.begin_selection(Language::Python).unwrap();
        let java = slot.begin_selection(Language::Java).unwrap();

        assert!(!slot.apply_questions(Language::Python, python, Ok(sample_questions())));
        assert_eq!(slot.status, LoadStatus::Loading);
        assert!(slot.session.is_none());

        assert!(slot.apply_questions(Language::Java, java, Ok(sample_questions())));
        assert_eq!(slot.session.as_ref().unwrap().language(), Language::Java);
    }

    #[test]
    fn fetch_failure_and_empty_parse_are_unavailable() {
        let mut slot = SessionSlot::default();
        let generation = slot.begin_selection(Language::Go).unwrap();
        slot.apply_questions(
            Language::Go,
            generation,
            Err(AppError::FetchFailure("boom".to_string())),
        );
        assert!(matches!(
            slot.status,
            LoadStatus::Unavailable { reason: UnavailableReason::FetchFailure, .. }
        ));

        let retry = slot.begin_selection(Language::Go).unwrap();
        slot.apply_questions(Language::Go, retry, Ok(vec![]));
        assert!(matches!(
            slot.status,
            LoadStatus::Unavailable { reason: UnavailableReason::ParseYieldedNothing, .. }
        ));
        assert!(slot.active_session_mut().is_err());
    }

    #[test]
    fn restart_requires_language_and_blocks_answers_until_reloaded() {
        let mut slot = SessionSlot::default();
        assert!(slot.begin_restart().is_err());

        let generation = slot.begin_selection(Language::Ruby).unwrap();
        slot.apply_questions(Language::Ruby, generation, Ok(sample_questions()));
        slot.active_session_mut().unwrap().submit_answer(OptionLabel::A).unwrap();

        let (language, restarted) = slot.begin_restart().unwrap();
        assert_eq!(language, Language::Ruby);
        assert!(slot.active_session_mut().is_err());

        slot.apply_questions(language, restarted, Ok(sample_questions()));
        let session = slot.active_session_mut().unwrap();
        assert_eq!(session.score(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.state(), SessionState::AwaitingAnswer(0));
    }
}
