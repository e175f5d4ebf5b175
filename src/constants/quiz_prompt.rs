use crate::models::domain::language::Language;

/// One-question sample the model is asked to copy.
pub const QUESTION_FORMAT_EXAMPLE: &str =
    "Q1. What is Python?\nA) Snake\nB) Programming Language\nC) Car\nD) Game\nAnswer: B\n";

pub fn question_generation_prompt(language: Language, question_count: usize) -> String {
    format!(
        "Generate {count} unique multiple-choice questions (MCQs) on {language} programming. \
         Each question should have 4 options labeled A, B, C, and D, \
         and also provide the correct answer at the end. \
         Format:\n\n{example}",
        count = question_count,
        language = language,
        example = QUESTION_FORMAT_EXAMPLE,
    )
}
