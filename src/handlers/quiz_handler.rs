use actix_web::{get, http::header::ContentType, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::QuizSessionId,
    models::{
        domain::language::Language,
        dto::request::{RestartRequest, SelectLanguageRequest, SubmitAnswerRequest},
    },
};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

#[get("/api/languages")]
pub async fn list_languages() -> HttpResponse {
    HttpResponse::Ok().json(Language::ALL)
}

#[get("/api/quiz")]
pub async fn get_quiz(state: web::Data<AppState>, session: QuizSessionId) -> HttpResponse {
    let view = state.quiz_service.view(session.0).await;
    HttpResponse::Ok().json(view)
}

#[post("/api/quiz/language")]
pub async fn select_language(
    state: web::Data<AppState>,
    session: QuizSessionId,
    request: web::Json<SelectLanguageRequest>,
) -> Result<HttpResponse, AppError> {
    let language = request.language()?;
    let view = state.quiz_service.select_language(session.0, language).await;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/quiz/answer")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    session: QuizSessionId,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let label = request.label()?;
    let feedback = state.quiz_service.submit_answer(session.0, label).await?;
    Ok(HttpResponse::Ok().json(feedback))
}

#[post("/api/quiz/restart")]
pub async fn restart_quiz(
    state: web::Data<AppState>,
    session: QuizSessionId,
    request: Option<web::Json<RestartRequest>>,
) -> Result<HttpResponse, AppError> {
    let regenerate = request.map(|r| r.regenerate).unwrap_or_default();
    let view = state.quiz_service.restart(session.0, regenerate).await?;
    Ok(HttpResponse::Ok().json(view))
}
