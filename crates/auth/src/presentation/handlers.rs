//! Auth HTTP Handlers
//!
//! Orchestration only: validate at the boundary (422 re-render, store never
//! touched), map store domain errors to field-level form errors, and mutate
//! the session on the state transitions (login rotates the token and binds
//! the user id together; logout rotates and clears them together).

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use kernel::validate::{self, FieldErrors};
use platform::html::PageChrome;
use platform::password::ClearTextPassword;
use session::{FLASH_KEY, PREVIOUS_URL_KEY, Session};

use crate::domain::repository::UserStore;
use crate::domain::value_object::{Email, UserName};
use crate::error::{AuthError, AuthResult};
use crate::presentation::forms::{LoginForm, PasswordChangeForm, SignupForm};
use crate::presentation::middleware::{AUTHENTICATED_USER_ID_KEY, CurrentUser};
use crate::presentation::pages;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<S>
where
    S: UserStore + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
}

impl<S> AuthAppState<S>
where
    S: UserStore + Clone + Send + Sync + 'static,
{
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Per-request page chrome; pops the flash (at most once) and exposes the
/// session's CSRF token for the form about to be rendered. Shared with the
/// other page-rendering crates.
pub fn page_chrome(session: &Session, current_user: &CurrentUser) -> PageChrome {
    PageChrome {
        flash: session.pop_string(FLASH_KEY),
        authenticated: current_user.is_authenticated,
        csrf_token: session.csrf_token(),
    }
}

// ============================================================================
// Signup
// ============================================================================

/// GET /user/signup
pub async fn signup_form(session: Session, current_user: CurrentUser) -> Html<String> {
    Html(pages::signup_page(
        &page_chrome(&session, &current_user),
        &SignupForm::default(),
        &FieldErrors::new(),
    ))
}

/// POST /user/signup
pub async fn signup_submit<S>(
    State(state): State<AuthAppState<S>>,
    session: Session,
    current_user: CurrentUser,
    Form(form): Form<SignupForm>,
) -> Response
where
    S: UserStore + Clone + Send + Sync + 'static,
{
    let mut errors = FieldErrors::new();
    let name = validate_name(&form.name, &mut errors);
    let email = validate_email(&form.email, &mut errors);
    let password = validate_new_password(&form.password, "password", &mut errors);

    // Validation failures never reach the store
    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return render_signup(&session, &current_user, &form, &errors);
    };

    match state.store.insert(&name, &email, password).await {
        Ok(_) => {
            session.put(FLASH_KEY, "Your signup was successful. Please log in.");
            Redirect::to("/user/login").into_response()
        }
        Err(AuthError::DuplicateEmail) => {
            // A field-level error, not a failure page
            let mut errors = FieldErrors::new();
            errors.add("email", "Email address is already in use");
            render_signup(&session, &current_user, &form, &errors)
        }
        Err(e) => e.into_response(),
    }
}

fn render_signup(
    session: &Session,
    current_user: &CurrentUser,
    form: &SignupForm,
    errors: &FieldErrors,
) -> Response {
    // Prior input is preserved, the password never is
    let form = SignupForm {
        password: String::new(),
        ..form.clone()
    };
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(pages::signup_page(
            &page_chrome(session, current_user),
            &form,
            errors,
        )),
    )
        .into_response()
}

// ============================================================================
// Login
// ============================================================================

/// GET /user/login
pub async fn login_form(session: Session, current_user: CurrentUser) -> Html<String> {
    Html(pages::login_page(
        &page_chrome(&session, &current_user),
        &LoginForm::default(),
        &FieldErrors::new(),
        None,
    ))
}

/// POST /user/login
pub async fn login_submit<S>(
    State(state): State<AuthAppState<S>>,
    session: Session,
    current_user: CurrentUser,
    Form(form): Form<LoginForm>,
) -> Response
where
    S: UserStore + Clone + Send + Sync + 'static,
{
    let mut errors = FieldErrors::new();
    let email = validate_email(&form.email, &mut errors);
    errors.check(
        validate::not_blank(&form.password),
        "password",
        "This field cannot be blank",
    );

    let Some(email) = email else {
        return render_login(&session, &current_user, &form, &errors, None);
    };
    if !errors.is_empty() {
        return render_login(&session, &current_user, &form, &errors, None);
    }

    // Policy applies when passwords are set, not when they are checked
    let password = ClearTextPassword::new_unchecked(form.password.clone());

    match state.store.authenticate(&email, password).await {
        Ok(user_id) => {
            // Rotation and principal binding happen together: the pre-login
            // token never identifies an authenticated session
            session.renew_token();
            session.put(AUTHENTICATED_USER_ID_KEY, user_id.as_i64());

            let target = session
                .pop_string(PREVIOUS_URL_KEY)
                .filter(|path| path.starts_with('/'))
                .unwrap_or_else(|| "/".to_string());
            Redirect::to(&target).into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            // Deliberately silent about which part was wrong
            render_login(
                &session,
                &current_user,
                &form,
                &FieldErrors::new(),
                Some("Email or password is incorrect"),
            )
        }
        Err(e) => e.into_response(),
    }
}

fn render_login(
    session: &Session,
    current_user: &CurrentUser,
    form: &LoginForm,
    errors: &FieldErrors,
    banner: Option<&str>,
) -> Response {
    let form = LoginForm {
        password: String::new(),
        ..form.clone()
    };
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(pages::login_page(
            &page_chrome(session, current_user),
            &form,
            errors,
            banner,
        )),
    )
        .into_response()
}

// ============================================================================
// Logout
// ============================================================================

/// POST /user/logout
pub async fn logout_submit(session: Session) -> Redirect {
    // Rotate and clear together; the old token stops resolving either way
    session.renew_token();
    session.remove(AUTHENTICATED_USER_ID_KEY);
    session.put(FLASH_KEY, "You've been logged out successfully!");
    Redirect::to("/")
}

// ============================================================================
// Password Change
// ============================================================================

/// GET /user/password
pub async fn password_form<S>(
    State(state): State<AuthAppState<S>>,
    session: Session,
    current_user: CurrentUser,
) -> AuthResult<Html<String>>
where
    S: UserStore + Clone + Send + Sync + 'static,
{
    let email = match current_user.user_id {
        Some(id) => Some(state.store.get(id).await?.email.to_string()),
        None => None,
    };

    Ok(Html(pages::password_page(
        &page_chrome(&session, &current_user),
        &FieldErrors::new(),
        email.as_deref(),
    )))
}

/// POST /user/password
pub async fn password_submit<S>(
    State(state): State<AuthAppState<S>>,
    session: Session,
    current_user: CurrentUser,
    Form(form): Form<PasswordChangeForm>,
) -> Response
where
    S: UserStore + Clone + Send + Sync + 'static,
{
    let Some(user_id) = current_user.user_id else {
        // The route guard fronts this route; without a principal there is
        // nothing to change
        return Redirect::to("/user/login").into_response();
    };

    let mut errors = FieldErrors::new();
    errors.check(
        validate::not_blank(&form.current_password),
        "currentPassword",
        "This field cannot be blank",
    );
    let new = validate_new_password(&form.new_password, "newPassword", &mut errors);

    let Some(new) = new else {
        return render_password(&state, &session, &current_user, &errors).await;
    };
    if !errors.is_empty() {
        return render_password(&state, &session, &current_user, &errors).await;
    }

    let current = ClearTextPassword::new_unchecked(form.current_password.clone());

    match state.store.update_password(user_id, current, new).await {
        Ok(()) => {
            session.put(FLASH_KEY, "Your password has been updated.");
            Redirect::to("/").into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            let mut errors = FieldErrors::new();
            errors.add("currentPassword", "Current password is incorrect");
            render_password(&state, &session, &current_user, &errors).await
        }
        Err(e) => e.into_response(),
    }
}

async fn render_password<S>(
    state: &AuthAppState<S>,
    session: &Session,
    current_user: &CurrentUser,
    errors: &FieldErrors,
) -> Response
where
    S: UserStore + Clone + Send + Sync + 'static,
{
    let email = match current_user.user_id {
        Some(id) => match state.store.get(id).await {
            Ok(user) => Some(user.email.to_string()),
            Err(e) => return e.into_response(),
        },
        None => None,
    };

    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(pages::password_page(
            &page_chrome(session, current_user),
            errors,
            email.as_deref(),
        )),
    )
        .into_response()
}

// ============================================================================
// Field validation helpers
// ============================================================================

fn validate_name(raw: &str, errors: &mut FieldErrors) -> Option<UserName> {
    if !validate::not_blank(raw) {
        errors.add("name", "This field cannot be blank");
        return None;
    }
    match UserName::new(raw) {
        Ok(name) => Some(name),
        Err(_) => {
            errors.add("name", "This field cannot be more than 255 characters long");
            None
        }
    }
}

fn validate_email(raw: &str, errors: &mut FieldErrors) -> Option<Email> {
    if !validate::not_blank(raw) {
        errors.add("email", "This field cannot be blank");
        return None;
    }
    match Email::new(raw) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.add("email", "This field must be a valid email address");
            None
        }
    }
}

fn validate_new_password(
    raw: &str,
    field: &'static str,
    errors: &mut FieldErrors,
) -> Option<ClearTextPassword> {
    if !validate::not_blank(raw) {
        errors.add(field, "This field cannot be blank");
        return None;
    }
    match ClearTextPassword::new(raw.to_string()) {
        Ok(password) => Some(password),
        Err(e) => {
            errors.add(field, e.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_messages() {
        let mut errors = FieldErrors::new();
        assert!(validate_email("", &mut errors).is_none());
        assert_eq!(errors.get("email"), Some("This field cannot be blank"));

        let mut errors = FieldErrors::new();
        assert!(validate_email("bobexample.com", &mut errors).is_none());
        assert_eq!(
            errors.get("email"),
            Some("This field must be a valid email address")
        );

        let mut errors = FieldErrors::new();
        assert!(validate_email("bob@example.com", &mut errors).is_some());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_new_password_short() {
        let mut errors = FieldErrors::new();
        assert!(validate_new_password("pass", "password", &mut errors).is_none());
        assert!(errors.get("password").unwrap().contains("at least 8"));
    }

    #[test]
    fn test_validate_name_bounds() {
        let mut errors = FieldErrors::new();
        assert!(validate_name("Bob", &mut errors).is_some());
        assert!(validate_name("", &mut errors).is_none());

        let mut errors = FieldErrors::new();
        assert!(validate_name(&"x".repeat(256), &mut errors).is_none());
        assert!(errors.get("name").unwrap().contains("255"));
    }
}
