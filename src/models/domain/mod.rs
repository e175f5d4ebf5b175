pub mod language;
pub mod question;
pub mod quiz_session;
pub mod session_slot;
pub use language::Language;
pub use question::{OptionLabel, QuestionOption, QuestionRecord};
pub use quiz_session::{AnswerOutcome, AnsweredQuestion, QuizSession, SessionState};
pub use session_slot::SessionSlot;
