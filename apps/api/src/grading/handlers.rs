//! Axum route handler for the grading endpoint.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::grading::models::{require_text, Grades, GradingRequest};
use crate::grading::service::grade_submission;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GradeResponse {
    pub student_id: String,
    pub assignment_id: String,
    pub grades: Grades,
    pub feedback: String,
}

#[derive(Debug)]
struct RubricUpload {
    content_type: String,
    bytes: Bytes,
}

/// Raw multipart fields, before validation.
#[derive(Debug, Default)]
struct GradeForm {
    student_id: Option<String>,
    assignment_id: Option<String>,
    question: Option<String>,
    text: Option<String>,
    rubric: Option<RubricUpload>,
}

async fn read_form(multipart: &mut Multipart) -> Result<GradeForm, AppError> {
    let mut form = GradeForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "student_id" => form.student_id = Some(field.text().await?),
            "assignment_id" => form.assignment_id = Some(field.text().await?),
            "question" => form.question = Some(field.text().await?),
            "text" => form.text = Some(field.text().await?),
            "rubric" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                form.rubric = Some(RubricUpload {
                    content_type,
                    bytes,
                });
            }
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(form)
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    let value =
        value.ok_or_else(|| AppError::InvalidInput(format!("Missing required field '{field}'")))?;
    require_text(field, &value)?;
    Ok(value)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /gradeAssignment
///
/// Multipart form: `student_id`, `assignment_id`, `question`, `text`, `rubric` (PDF or .docx).
/// Extracts the rubric, asks the model for grades, and returns the parsed result.
pub async fn handle_grade_assignment(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GradeResponse>, AppError> {
    let mut multipart = multipart?;
    let form = read_form(&mut multipart).await?;

    let student_id = required(form.student_id, "student_id")?;
    let assignment_id = required(form.assignment_id, "assignment_id")?;
    let question = required(form.question, "question")?;
    let text = required(form.text, "text")?;
    let rubric = form
        .rubric
        .ok_or_else(|| AppError::InvalidInput("Missing required field 'rubric'".to_string()))?;

    info!(
        "Grading request: student_id={student_id}, assignment_id={assignment_id}, rubric={} ({} bytes)",
        rubric.content_type,
        rubric.bytes.len()
    );

    let rubric_text = state
        .extractor
        .extract_text(rubric.bytes, &rubric.content_type)
        .await?;

    let request = GradingRequest::new(question, text, rubric_text)?;
    let result = grade_submission(state.completions.as_ref(), &request).await?;

    Ok(Json(GradeResponse {
        student_id,
        assignment_id,
        grades: result.grades,
        feedback: result.feedback,
    }))
}
