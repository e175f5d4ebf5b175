use serde::Serialize;

use crate::models::domain::{
    language::Language,
    question::{OptionLabel, QuestionOption},
    quiz_session::{AnswerOutcome, AnsweredQuestion, QuizSession, SessionState},
    session_slot::{LoadStatus, SessionSlot, UnavailableReason},
};

/// What the quiz page should show right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuizView {
    Idle {
        languages: Vec<Language>,
    },
    Loading {
        language: Language,
    },
    Unavailable {
        language: Language,
        reason: UnavailableReason,
        message: String,
        retry: bool,
    },
    Question {
        language: Language,
        number: usize,
        total: usize,
        progress: f64,
        prompt: String,
        options: Vec<QuestionOption>,
    },
    Completed {
        language: Language,
        score: usize,
        total: usize,
        entries: Vec<SummaryEntry>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub number: usize,
    pub prompt: String,
    pub chosen_label: OptionLabel,
    pub correct_label: Option<OptionLabel>,
    pub is_correct: bool,
    pub options: Vec<AnnotatedOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedOption {
    pub label: OptionLabel,
    pub text: String,
    pub mark: OptionMark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionMark {
    CorrectChosen,
    WrongChosen,
    CorrectMissed,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerFeedback {
    #[serde(flatten)]
    pub outcome: AnswerOutcome,
    pub view: QuizView,
}

impl QuizView {
    pub fn idle() -> Self {
        QuizView::Idle {
            languages: Language::ALL.to_vec(),
        }
    }

    pub fn from_slot(slot: &SessionSlot) -> Self {
        let Some(language) = slot.language else {
            return Self::idle();
        };

        match (&slot.status, &slot.session) {
            (LoadStatus::Idle, _) => Self::idle(),
            (LoadStatus::Loading, _) => QuizView::Loading { language },
            (LoadStatus::Unavailable { reason, message }, _) => QuizView::Unavailable {
                language,
                reason: *reason,
                message: message.clone(),
                retry: true,
            },
            (LoadStatus::Ready, Some(session)) => Self::from_session(session),
            (LoadStatus::Ready, None) => Self::idle(),
        }
    }

    pub fn from_session(session: &QuizSession) -> Self {
        let language = session.language();
        let total = session.questions().len();

        match (session.state(), session.current_question()) {
            (SessionState::AwaitingAnswer(index), Some(question)) => QuizView::Question {
                language,
                number: index + 1,
                total,
                progress: session.progress(),
                prompt: question.prompt.clone(),
                options: question.options.clone(),
            },
            (SessionState::Uninitialized, _) => QuizView::Loading { language },
            _ => QuizView::Completed {
                language,
                score: session.score(),
                total,
                entries: session
                    .history()
                    .iter()
                    .enumerate()
                    .map(|(i, answered)| SummaryEntry::new(i + 1, answered))
                    .collect(),
            },
        }
    }
}

impl SummaryEntry {
    fn new(number: usize, answered: &AnsweredQuestion) -> Self {
        Self {
            number,
            prompt: answered.prompt.clone(),
            chosen_label: answered.chosen_label,
            correct_label: answered.correct_label,
            is_correct: answered.is_correct(),
            options: answered
                .options
                .iter()
                .map(|option| AnnotatedOption {
                    label: option.label,
                    text: option.text.clone(),
                    mark: OptionMark::for_option(option.label, answered),
                })
                .collect(),
        }
    }
}

impl OptionMark {
    fn for_option(label: OptionLabel, answered: &AnsweredQuestion) -> Self {
        let is_correct = answered.correct_label == Some(label);
        let is_chosen = answered.chosen_label == label;

        match (is_chosen, is_correct) {
            (true, true) => OptionMark::CorrectChosen,
            (true, false) => OptionMark::WrongChosen,
            (false, true) => OptionMark::CorrectMissed,
            (false, false) => OptionMark::Neutral,
        }
    }
}
