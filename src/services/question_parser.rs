//! Extracts multiple-choice questions from free-form completion text.
//!
//! Expected shape, loosely followed by the model:
//!
//! ```text
//! Q1. What is 2+2?
//! A) 3
//! B) 4
//! C) 5
//! D) 6
//! Answer: B
//! ```
//!
//! Every `Q<digits>.` marker opens a new block that runs to the next marker or the end
//! of the text. A block that cannot be fully read still yields a record (possibly with
//! no options or no answer); it never stops the blocks after it from being read.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::question::{OptionLabel, QuestionOption, QuestionRecord};

static QUESTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Q\d+\.").expect("QUESTION_MARKER is a valid regex pattern"));

static ANSWER_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Answer:\s*([A-D])").expect("ANSWER_MARKER is a valid regex pattern")
});

const ANSWER_PREFIX: &str = "Answer:";

pub fn parse(raw: &str) -> Vec<QuestionRecord> {
    let records: Vec<QuestionRecord> = split_blocks(raw).into_iter().map(parse_block).collect();

    log::debug!(
        "Parsed {} question block(s), {} with options",
        records.len(),
        records.iter().filter(|r| r.is_usable()).count()
    );
    records
}

/// Returns each block with its marker already stripped, in source order.
fn split_blocks(raw: &str) -> Vec<&str> {
    let markers: Vec<(usize, usize)> = QUESTION_MARKER
        .find_iter(raw)
        .map(|m| (m.start(), m.end()))
        .collect();

    markers
        .iter()
        .enumerate()
        .map(|(i, &(_, body_start))| {
            let end = markers.get(i + 1).map_or(raw.len(), |&(next, _)| next);
            &raw[body_start..end]
        })
        .collect()
}

fn parse_block(body: &str) -> QuestionRecord {
    let mut lines = body.lines();
    let mut prompt_lines: Vec<&str> = lines.next().into_iter().collect();
    let mut options = Vec::new();

    for line in lines.by_ref() {
        if let Some(option) = parse_option_line(line) {
            options.push(option);
            break;
        }
        if is_answer_line(line) {
            break;
        }
        prompt_lines.push(line);
    }

    options.extend(lines.filter_map(parse_option_line));

    QuestionRecord {
        prompt: prompt_lines.join("\n").trim().to_string(),
        options,
        correct_label: parse_answer(body),
    }
}

fn parse_option_line(line: &str) -> Option<QuestionOption> {
    let mut chars = line.trim_start().chars();
    let label = chars.next().and_then(OptionLabel::from_char)?;
    if chars.next() != Some(')') {
        return None;
    }

    let text = chars.as_str().trim();
    if text.is_empty() {
        return None;
    }
    Some(QuestionOption::new(label, text))
}

fn is_answer_line(line: &str) -> bool {
    line.trim_start().starts_with(ANSWER_PREFIX)
}

fn parse_answer(body: &str) -> Option<OptionLabel> {
    ANSWER_MARKER
        .captures(body)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .and_then(OptionLabel::from_char)
}
