//! Completion parser — recovers `Criterion: Score` pairs and a feedback narrative
//! from the model's free-text reply.
//!
//! Single pass over the lines with a two-state machine:
//!
//! | state               | line has `:`                        | no `:`                     |
//! |---------------------|-------------------------------------|----------------------------|
//! | `NoCriterionOpen`   | grade (split on first `:`), open it | feedback                   |
//! | `CriterionOpen(c)`  | feedback `"{c}: {line}"`, close     | feedback, stays open       |
//!
//! Never fails: anything that is not a score line ends up in `feedback`.

use crate::grading::models::{Grades, GradingResult};

const DELIMITER: char = ':';

/// Parser state carried from one line to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserState {
    NoCriterionOpen,
    CriterionOpen(String),
}

/// Where a single line ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Grade { criterion: String, score: String },
    Feedback(String),
}

impl ParserState {
    /// Classifies one trimmed line and returns the next state.
    pub fn step(self, line: &str) -> (ParserState, LineOutcome) {
        match (self, line.split_once(DELIMITER)) {
            (ParserState::NoCriterionOpen, Some((criterion, score))) => {
                let criterion = criterion.trim().to_string();
                let outcome = LineOutcome::Grade {
                    criterion: criterion.clone(),
                    score: score.trim().to_string(),
                };
                (ParserState::CriterionOpen(criterion), outcome)
            }
            (ParserState::CriterionOpen(criterion), Some(_)) => (
                ParserState::NoCriterionOpen,
                LineOutcome::Feedback(format!("{criterion}: {line}")),
            ),
            (state, None) => (state, LineOutcome::Feedback(line.to_string())),
        }
    }
}

/// Parses a raw completion into grades and feedback.
pub fn parse_completion(completion_text: &str) -> GradingResult {
    let mut grades = Grades::new();
    let mut feedback_lines: Vec<String> = Vec::new();
    let mut state = ParserState::NoCriterionOpen;

    for line in completion_text.split('\n').map(str::trim) {
        let (next, outcome) = state.step(line);
        state = next;
        match outcome {
            LineOutcome::Grade { criterion, score } => grades.insert(criterion, score),
            LineOutcome::Feedback(text) => feedback_lines.push(text),
        }
    }

    GradingResult {
        grades,
        feedback: feedback_lines.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grades_of(result: &GradingResult) -> Vec<(&str, &str)> {
        result.grades.iter().collect()
    }

    #[test]
    fn test_no_colon_input_is_all_feedback() {
        let result = parse_completion("just plain text\nmore text");
        assert!(result.grades.is_empty());
        assert_eq!(result.feedback, "just plain text\nmore text");
    }

    #[test]
    fn test_single_pair() {
        let result = parse_completion("Clarity: 8/10");
        assert_eq!(grades_of(&result), vec![("Clarity", "8/10")]);
        assert_eq!(result.feedback, "");
    }

    #[test]
    fn test_continuation_lines_fold_into_feedback() {
        let result = parse_completion("Clarity: 8/10\nGood structure\nNeeds more detail");
        assert_eq!(grades_of(&result), vec![("Clarity", "8/10")]);
        assert_eq!(result.feedback, "Good structure\nNeeds more detail");
    }

    #[test]
    fn test_sub_labelled_line_closes_open_criterion() {
        let result = parse_completion("Clarity: 8/10\nNote: could improve\nGrammar: 9/10");
        assert_eq!(
            grades_of(&result),
            vec![("Clarity", "8/10"), ("Grammar", "9/10")]
        );
        assert_eq!(result.feedback, "Clarity: Note: could improve");
    }

    #[test]
    fn test_last_write_wins_for_repeated_criterion() {
        let text = "Clarity: 6/10\nNote: first pass\nClarity: 8/10";
        let result = parse_completion(text);
        assert_eq!(result.grades.get("Clarity"), Some("8/10"));
        assert_eq!(result.grades.len(), 1);
        assert_eq!(result.feedback, "Clarity: Note: first pass");
    }

    #[test]
    fn test_only_first_colon_delimits() {
        let result = parse_completion("Timing: 10:30 - late: yes");
        assert_eq!(result.grades.get("Timing"), Some("10:30 - late: yes"));
    }

    #[test]
    fn test_blank_line_is_continuation_and_keeps_criterion_open() {
        let result = parse_completion("Clarity: 8/10\n\nNote: tighten intro");
        assert_eq!(grades_of(&result), vec![("Clarity", "8/10")]);
        assert_eq!(result.feedback, "\nClarity: Note: tighten intro");
    }

    #[test]
    fn test_lines_are_trimmed_including_crlf() {
        let result = parse_completion("  Clarity :  8/10 \r\n   Well argued.  \r\n");
        assert_eq!(grades_of(&result), vec![("Clarity", "8/10")]);
        assert_eq!(result.feedback, "Well argued.\n");
    }

    #[test]
    fn test_empty_completion() {
        let result = parse_completion("");
        assert!(result.grades.is_empty());
        assert_eq!(result.feedback, "");
    }

    #[test]
    fn test_colon_with_empty_sides() {
        let result = parse_completion(":\nplain");
        assert_eq!(result.grades.get(""), Some(""));
        assert_eq!(result.feedback, "plain");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "Intro\nClarity: 8/10\nok\nNote: x\nGrammar: 9/10";
        assert_eq!(parse_completion(text), parse_completion(text));
    }

    #[test]
    fn test_every_line_is_accounted_for_once() {
        let text = "Overall thoughts\nClarity: 8/10\nGood flow\nTip: cite sources\n\nGrammar: 9/10\nEnd";
        let result = parse_completion(text);

        let feedback_count = result.feedback.split('\n').count();
        let line_count = text.split('\n').count();
        assert_eq!(result.grades.len() + feedback_count, line_count);
    }

    #[test]
    fn test_step_opens_criterion_from_idle() {
        let (state, outcome) = ParserState::NoCriterionOpen.step("Clarity: 8/10");
        assert_eq!(state, ParserState::CriterionOpen("Clarity".to_string()));
        assert_eq!(
            outcome,
            LineOutcome::Grade {
                criterion: "Clarity".to_string(),
                score: "8/10".to_string()
            }
        );
    }

    #[test]
    fn test_step_colon_line_while_open_closes() {
        let (state, outcome) =
            ParserState::CriterionOpen("Clarity".to_string()).step("Note: ok");
        assert_eq!(state, ParserState::NoCriterionOpen);
        assert_eq!(outcome, LineOutcome::Feedback("Clarity: Note: ok".to_string()));
    }

    #[test]
    fn test_step_plain_line_keeps_state() {
        let open = ParserState::CriterionOpen("Clarity".to_string());
        let (state, outcome) = open.clone().step("more detail");
        assert_eq!(state, open);
        assert_eq!(outcome, LineOutcome::Feedback("more detail".to_string()));

        let (state, _) = ParserState::NoCriterionOpen.step("more detail");
        assert_eq!(state, ParserState::NoCriterionOpen);
    }
}
