//! Snippet HTTP Handlers

use std::sync::Arc;

use auth::{CurrentUser, page_chrome};
use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use kernel::id::SnippetId;
use kernel::validate::{self, FieldErrors};
use session::{FLASH_KEY, Session};

use crate::domain::entities::{EXPIRY_OPTIONS_DAYS, TITLE_MAX_LENGTH};
use crate::domain::repository::SnippetStore;
use crate::error::{SnippetError, SnippetResult};
use crate::presentation::forms::SnippetForm;
use crate::presentation::pages;

/// Shared state for snippet handlers
#[derive(Clone)]
pub struct SnippetAppState<S>
where
    S: SnippetStore + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
}

impl<S> SnippetAppState<S>
where
    S: SnippetStore + Clone + Send + Sync + 'static,
{
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// GET /
pub async fn home<S>(
    State(state): State<SnippetAppState<S>>,
    session: Session,
    current_user: CurrentUser,
) -> SnippetResult<Html<String>>
where
    S: SnippetStore + Clone + Send + Sync + 'static,
{
    let snippets = state.store.latest().await?;
    Ok(Html(pages::home_page(
        &page_chrome(&session, &current_user),
        &snippets,
    )))
}

/// GET /snippet/view/{id}
pub async fn view<S>(
    State(state): State<SnippetAppState<S>>,
    session: Session,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> SnippetResult<Html<String>>
where
    S: SnippetStore + Clone + Send + Sync + 'static,
{
    // Non-numeric, fractional, and non-positive ids are all just "not found"
    let id = match id.parse::<i64>() {
        Ok(id) if id > 0 => SnippetId::from_i64(id),
        _ => return Err(SnippetError::NoRecord),
    };

    let snippet = state.store.get(id).await?;
    Ok(Html(pages::view_page(
        &page_chrome(&session, &current_user),
        &snippet,
    )))
}

/// GET /snippet/create
pub async fn create_form(session: Session, current_user: CurrentUser) -> Html<String> {
    Html(pages::create_page(
        &page_chrome(&session, &current_user),
        &SnippetForm::default(),
        &FieldErrors::new(),
    ))
}

/// POST /snippet/create
pub async fn create_submit<S>(
    State(state): State<SnippetAppState<S>>,
    session: Session,
    current_user: CurrentUser,
    Form(form): Form<SnippetForm>,
) -> Response
where
    S: SnippetStore + Clone + Send + Sync + 'static,
{
    let mut errors = FieldErrors::new();
    errors.check(
        validate::not_blank(&form.title),
        "title",
        "This field cannot be blank",
    );
    errors.check(
        validate::max_chars(&form.title, TITLE_MAX_LENGTH),
        "title",
        "This field cannot be more than 100 characters long",
    );
    errors.check(
        validate::not_blank(&form.content),
        "content",
        "This field cannot be blank",
    );
    errors.check(
        validate::permitted(&form.expires, &EXPIRY_OPTIONS_DAYS),
        "expires",
        "This field must equal 1, 7 or 365",
    );

    if !errors.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::create_page(
                &page_chrome(&session, &current_user),
                &form,
                &errors,
            )),
        )
            .into_response();
    }

    match state
        .store
        .insert(&form.title, &form.content, form.expires)
        .await
    {
        Ok(id) => {
            session.put(FLASH_KEY, "Snippet successfully created!");
            Redirect::to(&format!("/snippet/view/{id}")).into_response()
        }
        Err(e) => e.into_response(),
    }
}
