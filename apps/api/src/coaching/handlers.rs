use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coaching::{
    generate_cover_letter, generate_interview_answer, generate_interview_questions, CoverLetter,
    InterviewAnswer, InterviewQuestions,
};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub job_description: String,
    pub company_name: Option<String>,
    pub tone: Option<String>,
    pub length: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub resume_id: Uuid,
    #[serde(flatten)]
    pub letter: CoverLetter,
}

/// POST /resume/:id/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    if req.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description must not be empty".to_string(),
        ));
    }
    let resume = state.store.get(id)?;
    let letter = generate_cover_letter(
        &state.llm,
        &resume,
        &req.job_description,
        req.company_name,
        req.tone,
        req.length,
    )
    .await?;
    tracing::info!(
        "Generated cover letter for resume {id} ({} words)",
        letter.word_count
    );
    Ok(Json(CoverLetterResponse {
        resume_id: id,
        letter,
    }))
}

#[derive(Debug, Deserialize)]
pub struct InterviewQuestionsRequest {
    pub job_description: String,
    pub question_types: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct InterviewQuestionsResponse {
    pub resume_id: Uuid,
    #[serde(flatten)]
    pub questions: InterviewQuestions,
}

/// POST /resume/:id/interview-questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<InterviewQuestionsRequest>,
) -> Result<Json<InterviewQuestionsResponse>, AppError> {
    if req.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description must not be empty".to_string(),
        ));
    }
    let resume = state.store.get(id)?;
    let questions = generate_interview_questions(
        &state.llm,
        &resume,
        &req.job_description,
        req.question_types,
    )
    .await?;
    Ok(Json(InterviewQuestionsResponse {
        resume_id: id,
        questions,
    }))
}

#[derive(Debug, Deserialize)]
pub struct InterviewAnswerRequest {
    pub question: String,
    pub job_description: Option<String>,
}

/// POST /resume/:id/interview-answer
pub async fn handle_interview_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<InterviewAnswerRequest>,
) -> Result<Json<InterviewAnswer>, AppError> {
    if req.question.trim().is_empty() {
        return Err(AppError::Validation("question must not be empty".to_string()));
    }
    let resume = state.store.get(id)?;
    let answer = generate_interview_answer(
        &state.llm,
        &resume,
        &req.question,
        req.job_description.as_deref(),
    )
    .await?;
    Ok(Json(answer))
}
