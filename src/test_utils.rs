#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::question::{OptionLabel, QuestionOption, QuestionRecord};

    /// Completion text the way the model usually returns it, chatter included.
    pub const SAMPLE_COMPLETION: &str = "Here are your Python questions:

Q1. Which keyword defines a function in Python?
A) func
B) def
C) function
D) lambda
Answer: B

Q2. What does len([1, 2, 3]) return?
A) 2
B) 3
C) 4
D) An error
Answer: B

Q3. Which of these is immutable?
A) list
B) tuple
C) dict
D) set
Answer: B
";

    pub const SAMPLE_COMPLETION_QUESTIONS: usize = 3;

    /// Builds a record whose options are labeled A, B, C, D in order.
    pub fn question(
        prompt: &str,
        options: &[&str],
        correct: Option<OptionLabel>,
    ) -> QuestionRecord {
        QuestionRecord {
            prompt: prompt.to_string(),
            options: OptionLabel::ALL
                .iter()
                .zip(options)
                .map(|(label, text)| QuestionOption::new(*label, *text))
                .collect(),
            correct_label: correct,
        }
    }

    pub fn sample_questions() -> Vec<QuestionRecord> {
        vec![
            question(
                "Which keyword defines a function in Python?",
                &["func", "def", "function", "lambda"],
                Some(OptionLabel::B),
            ),
            question(
                "What does len([1, 2, 3]) return?",
                &["2", "3", "4", "An error"],
                Some(OptionLabel::B),
            ),
            question(
                "Which of these is immutable?",
                &["list", "tuple", "dict", "set"],
                Some(OptionLabel::B),
            ),
        ]
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::question::OptionLabel;
    use crate::services::question_parser;

    #[test]
    fn sample_completion_matches_sample_questions() {
        assert_eq!(question_parser::parse(SAMPLE_COMPLETION), sample_questions());
        assert_eq!(sample_questions().len(), SAMPLE_COMPLETION_QUESTIONS);
    }

    #[test]
    fn question_labels_options_in_order() {
        let record = question("Pick", &["x", "y"], Some(OptionLabel::B));

        assert_eq!(record.options.len(), 2);
        assert_eq!(record.options[1].label, OptionLabel::B);
        assert_eq!(record.options[1].text, "y");
    }
}
