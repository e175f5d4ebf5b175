use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Topics a quiz can be generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Language {
    Python,
    Java,
    #[serde(rename = "C++")]
    Cpp,
    JavaScript,
    #[serde(rename = "C#")]
    CSharp,
    Go,
    Ruby,
    #[serde(rename = "PHP")]
    Php,
    Swift,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::Python,
        Language::Java,
        Language::Cpp,
        Language::JavaScript,
        Language::CSharp,
        Language::Go,
        Language::Ruby,
        Language::Php,
        Language::Swift,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::JavaScript => "JavaScript",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
            Language::Swift => "Swift",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.display_name() == s)
            .ok_or_else(|| AppError::ValidationError(format!("Unsupported language '{}'", s)))
    }
}
