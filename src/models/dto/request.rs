use serde::Deserialize;
use validator::Validate;

use crate::errors::AppResult;
use crate::models::domain::{language::Language, question::OptionLabel};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SelectLanguageRequest {
    #[validate(length(min = 1, max = 32))]
    pub language: String,
}

impl SelectLanguageRequest {
    pub fn language(&self) -> AppResult<Language> {
        self.validate()?;
        self.language.parse()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(length(equal = 1, message = "Answer must be a single option label"))]
    pub label: String,
}

impl SubmitAnswerRequest {
    pub fn label(&self) -> AppResult<OptionLabel> {
        self.validate()?;
        self.label.parse()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestartRequest {
    /// Ask the model for a new set instead of replaying the cached one.
    #[serde(default)]
    pub regenerate: bool,
}
