// Prompt constants and the prompt builder for the grading flow.

use crate::grading::models::{require_text, GradingError};

/// System prompt sent alongside every grading prompt.
pub const GRADER_SYSTEM: &str = "You are an experienced, fair teaching assistant. \
    You grade student assignments strictly against the rubric you are given. \
    Report one line per rubric criterion in the form `Criterion: Score`, \
    then write your feedback as plain prose.";

/// Grading prompt template.
/// Replace: {question}, {criteria}, {assignment_text}
pub const GRADING_PROMPT_TEMPLATE: &str = r#"Grade the following assignment based on the provided rubric and the question. Provide detailed feedback with marks for each section.

QUESTION:
{question}

RUBRIC CRITERIA:
{criteria}

ASSIGNMENT TEXT:
{assignment_text}

Provide the marks and feedback for each criterion.
Start with exactly one line per criterion using the format `Criterion: Score`.
After the score lines, write free-form feedback for the student."#;

/// Turns rubric text into a bulleted criteria block, one bullet per line.
/// Blank lines inside the rubric are kept as empty bullets.
pub fn format_criteria(rubric: &str) -> String {
    rubric
        .trim()
        .split('\n')
        .map(|line| format!("- {}", line.trim_end_matches('\r')))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the grading prompt from the three request inputs.
pub fn build_prompt(
    question: &str,
    assignment_text: &str,
    rubric: &str,
) -> Result<String, GradingError> {
    require_text("question", question)?;
    require_text("text", assignment_text)?;
    require_text("rubric", rubric)?;

    // Fill placeholders from the bottom of the template up: each inserted value
    // then sits below every placeholder still to be replaced, so `{...}` inside
    // user text is never expanded.
    let prompt = GRADING_PROMPT_TEMPLATE
        .replacen("{assignment_text}", assignment_text, 1)
        .replacen("{criteria}", &format_criteria(rubric), 1)
        .replacen("{question}", question, 1);
    Ok(prompt)
}
