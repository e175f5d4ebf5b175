use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [
        OptionLabel::A,
        OptionLabel::B,
        OptionLabel::C,
        OptionLabel::D,
    ];

    /// Case-sensitive: only the uppercase letters are labels.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(OptionLabel::A),
            'B' => Some(OptionLabel::B),
            'C' => Some(OptionLabel::C),
            'D' => Some(OptionLabel::D),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            OptionLabel::A => 'A',
            OptionLabel::B => 'B',
            OptionLabel::C => 'C',
            OptionLabel::D => 'D',
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for OptionLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => OptionLabel::from_char(c),
            _ => None,
        }
        .ok_or_else(|| AppError::InvalidAnswerLabel(format!("'{}' is not one of A, B, C, D", s)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionOption {
    pub label: OptionLabel,
    pub text: String,
}

impl QuestionOption {
    pub fn new(label: OptionLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}

/// One multiple-choice question as extracted from generated text.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionRecord {
    pub prompt: String,
    pub options: Vec<QuestionOption>,
    pub correct_label: Option<OptionLabel>,
}

impl QuestionRecord {
    pub fn has_label(&self, label: OptionLabel) -> bool {
        self.options.iter().any(|o| o.label == label)
    }

    /// A record with no options cannot be played.
    pub fn is_usable(&self) -> bool {
        !self.options.is_empty()
    }

    /// Drops repeated labels (first occurrence wins) and clears a correct label
    /// that names none of the options.
    pub fn normalized(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.options.len());
        self.options.retain(|o| {
            if seen.contains(&o.label) {
                false
            } else {
                seen.push(o.label);
                true
            }
        });

        if let Some(label) = self.correct_label {
            if !self.has_label(label) {
                log::warn!(
                    "Answer {} does not match any option of question '{}'; treating it as unknown",
                    label,
                    self.prompt
                );
                self.correct_label = None;
            }
        }

        self
    }
}
