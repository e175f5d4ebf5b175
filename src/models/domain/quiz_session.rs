use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        language::Language,
        question::{OptionLabel, QuestionOption, QuestionRecord},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Restarted and waiting for a fresh question list.
    Uninitialized,
    AwaitingAnswer(usize),
    Completed,
}

/// History entry. Holds its own copy of the question so the summary survives a restart.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnsweredQuestion {
    pub prompt: String,
    pub options: Vec<QuestionOption>,
    pub chosen_label: OptionLabel,
    pub correct_label: Option<OptionLabel>,
}

impl AnsweredQuestion {
    pub fn is_correct(&self) -> bool {
        self.correct_label == Some(self.chosen_label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub chosen_label: OptionLabel,
    pub correct_label: Option<OptionLabel>,
    pub is_correct: bool,
}

#[derive(Clone, Debug)]
pub struct QuizSession {
    language: Language,
    questions: Vec<QuestionRecord>,
    current_index: usize,
    score: usize,
    history: Vec<AnsweredQuestion>,
    initialized: bool,
}

impl QuizSession {
    pub fn new(language: Language, questions: Vec<QuestionRecord>) -> Self {
        Self {
            language,
            questions: Self::playable(questions),
            current_index: 0,
            score: 0,
            history: Vec::new(),
            initialized: true,
        }
    }

    fn playable(questions: Vec<QuestionRecord>) -> Vec<QuestionRecord> {
        let total = questions.len();
        let playable: Vec<QuestionRecord> = questions
            .into_iter()
            .filter(QuestionRecord::is_usable)
            .map(QuestionRecord::normalized)
            .collect();

        if playable.len() < total {
            log::warn!(
                "Dropped {} question(s) without options",
                total - playable.len()
            );
        }
        playable
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn history(&self) -> &[AnsweredQuestion] {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        if !self.initialized {
            SessionState::Uninitialized
        } else if self.current_index < self.questions.len() {
            SessionState::AwaitingAnswer(self.current_index)
        } else {
            SessionState::Completed
        }
    }

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        match self.state() {
            SessionState::AwaitingAnswer(i) => self.questions.get(i),
            _ => None,
        }
    }

    /// Fraction of questions answered so far; zero for an empty list.
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            0.0
        } else {
            self.current_index as f64 / self.questions.len() as f64
        }
    }

    pub fn submit_answer(&mut self, label: OptionLabel) -> AppResult<AnswerOutcome> {
        let index = match self.state() {
            SessionState::AwaitingAnswer(i) => i,
            SessionState::Completed => {
                return Err(AppError::InvalidSessionState(
                    "quiz is already completed".to_string(),
                ))
            }
            SessionState::Uninitialized => {
                return Err(AppError::InvalidSessionState(
                    "no questions loaded since restart".to_string(),
                ))
            }
        };

        let question = &self.questions[index];
        if !question.has_label(label) {
            return Err(AppError::InvalidAnswerLabel(format!(
                "option {} does not exist for question {}",
                label,
                index + 1
            )));
        }

        let outcome = AnswerOutcome {
            chosen_label: label,
            correct_label: question.correct_label,
            is_correct: question.correct_label == Some(label),
        };

        self.history.push(AnsweredQuestion {
            prompt: question.prompt.clone(),
            options: question.options.clone(),
            chosen_label: label,
            correct_label: question.correct_label,
        });
        if outcome.is_correct {
            self.score += 1;
        }
        self.current_index += 1;

        Ok(outcome)
    }

    pub fn restart(&mut self) {
        self.questions.clear();
        self.history.clear();
        self.score = 0;
        self.current_index = 0;
        self.initialized = false;
    }

    pub fn load_questions(&mut self, questions: Vec<QuestionRecord>) -> AppResult<()> {
        if self.initialized {
            return Err(AppError::InvalidSessionState(
                "questions can only be loaded after a restart".to_string(),
            ));
        }

        self.questions = Self::playable(questions);
        self.initialized = true;
        Ok(())
    }
}
