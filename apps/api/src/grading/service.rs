//! Grading pipeline: build prompt → one completion call → parse.

use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::grading::models::{GradingRequest, GradingResult};
use crate::grading::parser::parse_completion;
use crate::grading::prompts::build_prompt;
use crate::llm_client::CompletionProvider;

pub async fn grade_submission(
    provider: &dyn CompletionProvider,
    request: &GradingRequest,
) -> Result<GradingResult, AppError> {
    let prompt = build_prompt(
        request.question(),
        request.assignment_text(),
        request.rubric(),
    )?;
    debug!("Built grading prompt ({} chars)", prompt.len());

    let completion = provider.complete(&prompt).await?;
    debug!("Received completion ({} chars)", completion.len());

    let result = parse_completion(&completion);
    if result.grades.is_empty() {
        warn!("Completion contained no `Criterion: Score` lines; returning feedback only");
    }
    for (criterion, score) in result.grades.iter() {
        debug!("Grade: {criterion} = {score}");
    }
    info!(
        "Parsed completion: {} criteria graded, {} feedback chars",
        result.grades.len(),
        result.feedback.len()
    );
    Ok(result)
}
