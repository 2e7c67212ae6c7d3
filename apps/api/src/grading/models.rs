//! Grading domain types: the validated request and the parsed result.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GradingError {
    #[error("{0}")]
    InvalidInput(String),
}

/// Rejects empty or whitespace-only text fields.
pub fn require_text(field: &str, value: &str) -> Result<(), GradingError> {
    if value.trim().is_empty() {
        return Err(GradingError::InvalidInput(format!(
            "'{field}' must not be empty"
        )));
    }
    Ok(())
}

/// The three inputs the grader sends to the model. Built once per request.
#[derive(Debug, Clone)]
pub struct GradingRequest {
    question: String,
    assignment_text: String,
    rubric: String,
}

impl GradingRequest {
    pub fn new(
        question: impl Into<String>,
        assignment_text: impl Into<String>,
        rubric: impl Into<String>,
    ) -> Result<Self, GradingError> {
        let request = Self {
            question: question.into(),
            assignment_text: assignment_text.into(),
            rubric: rubric.into(),
        };
        require_text("question", &request.question)?;
        require_text("text", &request.assignment_text)?;
        require_text("rubric", &request.rubric)?;
        Ok(request)
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn assignment_text(&self) -> &str {
        &self.assignment_text
    }

    pub fn rubric(&self) -> &str {
        &self.rubric
    }
}

/// Criterion → score, in the order each criterion was first seen.
///
/// Serializes as a JSON object with keys in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grades(Vec<(String, String)>);

impl Grades {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites. An existing criterion keeps its position.
    pub fn insert(&mut self, criterion: impl Into<String>, score: impl Into<String>) {
        let criterion = criterion.into();
        let score = score.into();
        match self.0.iter_mut().find(|(name, _)| *name == criterion) {
            Some(entry) => entry.1 = score,
            None => self.0.push((criterion, score)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, criterion: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == criterion)
            .map(|(_, score)| score.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(c, s)| (c.as_str(), s.as_str()))
    }
}

impl<C, S> FromIterator<(C, S)> for Grades
where
    C: Into<String>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, S)>>(iter: I) -> Self {
        let mut grades = Grades::new();
        for (criterion, score) in iter {
            grades.insert(criterion, score);
        }
        grades
    }
}

impl Serialize for Grades {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (criterion, score) in &self.0 {
            map.serialize_entry(criterion, score)?;
        }
        map.end()
    }
}

/// Structured view of one model completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GradingResult {
    pub grades: Grades,
    pub feedback: String,
}
