use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult, JsonResult},
    middleware::session::{clear_session_cookie, session_cookie, session_id},
    models::{HomeCatalog, MediaType},
    services::{PageController, PageState},
    views::{
        pages::{self, AuthMode},
        NavBar,
    },
};

use super::AppState;

const MIN_PASSWORD_LEN: usize = 4;
const MAX_PASSWORD_LEN: usize = 60;

// Request types

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Returns the message to show when the form is not acceptable
    fn validate(&self) -> Result<(), &'static str> {
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err("Please enter a valid email address."),
        }

        let len = self.password.chars().count();
        if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
            return Err("Your password must contain between 4 and 60 characters.");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

pub async fn landing() -> Html<String> {
    Html(pages::landing_page())
}

pub async fn login_form() -> Html<String> {
    Html(pages::auth_page(AuthMode::Login, None))
}

pub async fn signup_form() -> Html<String> {
    Html(pages::auth_page(AuthMode::Signup, None))
}

pub async fn login(State(state): State<AppState>, Form(form): Form<Credentials>) -> Response {
    start_session(&state, AuthMode::Login, form).await
}

pub async fn signup(State(state): State<AppState>, Form(form): Form<Credentials>) -> Response {
    start_session(&state, AuthMode::Signup, form).await
}

async fn start_session(state: &AppState, mode: AuthMode, form: Credentials) -> Response {
    if let Err(message) = form.validate() {
        tracing::debug!(path = mode.path(), "Rejected credentials");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::auth_page(mode, Some(message))),
        )
            .into_response();
    }

    let id = state.create_session().await;
    (
        [(header::SET_COOKIE, session_cookie(id))],
        Redirect::to("/browse"),
    )
        .into_response()
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = session_id(&headers) {
        state.end_session(&id).await;
    }
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}

/// The home page. Rows appear only once every category has arrived.
pub async fn browse(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    let mut controller = PageController::new();
    let page = controller.load(&state.aggregator, &state.categories).await;

    let status = match page {
        PageState::Failed(kind) => kind.status_code(),
        _ => StatusCode::OK,
    };

    (
        status,
        Html(pages::browse_page(page, &NavBar::new(), &state.images)),
    )
}

pub async fn browse_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Html<String>> {
    let list = state
        .aggregator
        .load_category(&state.categories, &category)
        .await?;

    Ok(Html(pages::category_page(
        &list,
        &NavBar::new(),
        &state.images,
    )))
}

pub async fn watch(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(String, String)>,
) -> AppResult<Html<String>> {
    let media_type: MediaType = media_type
        .parse()
        .map_err(|_| AppError::NotFound(format!("Unknown media type '{}'", media_type)))?;
    let id: u64 = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("Invalid title id '{}'", id)))?;

    let title = state.aggregator.load_title(media_type, id).await?;

    Ok(Html(pages::watch_page(
        &title,
        &NavBar::new(),
        &state.images,
    )))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Html<String>> {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Ok(Html(pages::search_page(
            "",
            None,
            &NavBar::new(),
            &state.images,
        )));
    }

    let results = state.aggregator.search(&query).await?;
    Ok(Html(pages::search_page(
        &query,
        Some(&results),
        &NavBar::new(),
        &state.images,
    )))
}

/// Home page data as JSON. Failures answer with a JSON error body.
pub async fn home_catalog(State(state): State<AppState>) -> JsonResult<Json<HomeCatalog>> {
    let catalog = state.aggregator.load_home(&state.categories).await?;
    Ok(Json(catalog))
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(pages::not_found_page()))
}
