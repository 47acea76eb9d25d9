//! Auth Pages
//!
//! Minimal HTML for the signup, login, and password-change forms. Prior
//! input is preserved on re-render, except password fields, which are never
//! echoed back.

use kernel::validate::FieldErrors;
use platform::html::{PageChrome, escape, page};

use crate::presentation::forms::{LoginForm, SignupForm};

fn field_error(errors: &FieldErrors, field: &str) -> String {
    match errors.get(field) {
        Some(message) => format!("<label class='error'>{}</label>", escape(message)),
        None => String::new(),
    }
}

pub fn signup_page(chrome: &PageChrome, form: &SignupForm, errors: &FieldErrors) -> String {
    let body = format!(
        "<h2>Signup</h2>\n\
         <form action='/user/signup' method='POST' novalidate>\n\
         <input type='hidden' name='csrf_token' value='{csrf}'>\n\
         <div><label>Name:</label>{name_error}\
         <input type='text' name='name' value='{name}'></div>\n\
         <div><label>Email:</label>{email_error}\
         <input type='email' name='email' value='{email}'></div>\n\
         <div><label>Password:</label>{password_error}\
         <input type='password' name='password'></div>\n\
         <div><button type='submit'>Signup</button></div>\n\
         </form>",
        csrf = escape(&chrome.csrf_token),
        name_error = field_error(errors, "name"),
        name = escape(&form.name),
        email_error = field_error(errors, "email"),
        email = escape(&form.email),
        password_error = field_error(errors, "password"),
    );

    page("Signup", chrome, &body)
}

pub fn login_page(
    chrome: &PageChrome,
    form: &LoginForm,
    errors: &FieldErrors,
    banner: Option<&str>,
) -> String {
    let banner = match banner {
        Some(message) => format!("<div class='error'>{}</div>\n", escape(message)),
        None => String::new(),
    };

    let body = format!(
        "<h2>Login</h2>\n{banner}\
         <form action='/user/login' method='POST' novalidate>\n\
         <input type='hidden' name='csrf_token' value='{csrf}'>\n\
         <div><label>Email:</label>{email_error}\
         <input type='email' name='email' value='{email}'></div>\n\
         <div><label>Password:</label>{password_error}\
         <input type='password' name='password'></div>\n\
         <div><button type='submit'>Login</button></div>\n\
         </form>",
        csrf = escape(&chrome.csrf_token),
        email_error = field_error(errors, "email"),
        email = escape(&form.email),
        password_error = field_error(errors, "password"),
    );

    page("Login", chrome, &body)
}

pub fn password_page(chrome: &PageChrome, errors: &FieldErrors, email: Option<&str>) -> String {
    let account = match email {
        Some(email) => format!("<p>Change the password for {}</p>\n", escape(email)),
        None => String::new(),
    };

    let body = format!(
        "<h2>Change Password</h2>\n{account}\
         <form action='/user/password' method='POST' novalidate>\n\
         <input type='hidden' name='csrf_token' value='{csrf}'>\n\
         <div><label>Current password:</label>{current_error}\
         <input type='password' name='currentPassword'></div>\n\
         <div><label>New password:</label>{new_error}\
         <input type='password' name='newPassword'></div>\n\
         <div><button type='submit'>Change password</button></div>\n\
         </form>",
        csrf = escape(&chrome.csrf_token),
        current_error = field_error(errors, "currentPassword"),
        new_error = field_error(errors, "newPassword"),
    );

    page("Change Password", chrome, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome() -> PageChrome {
        PageChrome {
            flash: None,
            authenticated: false,
            csrf_token: "tok".to_string(),
        }
    }

    #[test]
    fn test_signup_page_preserves_input_except_password() {
        let form = SignupForm {
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "hunter22".to_string(),
        };
        let html = signup_page(&chrome(), &form, &FieldErrors::new());

        assert!(html.contains("value='Bob'"));
        assert!(html.contains("value='bob@example.com'"));
        assert!(!html.contains("hunter22"));
        assert!(html.contains("name='csrf_token' value='tok'"));
    }

    #[test]
    fn test_signup_page_renders_field_errors() {
        let mut errors = FieldErrors::new();
        errors.add("name", "This field cannot be blank");
        let html = signup_page(&chrome(), &SignupForm::default(), &errors);

        assert!(html.contains("This field cannot be blank"));
    }

    #[test]
    fn test_login_page_banner_is_generic() {
        let html = login_page(
            &chrome(),
            &LoginForm::default(),
            &FieldErrors::new(),
            Some("Email or password is incorrect"),
        );
        assert!(html.contains("Email or password is incorrect"));
    }

    #[test]
    fn test_password_page_never_prefills() {
        let html = password_page(&chrome(), &FieldErrors::new(), Some("a@b.com"));
        assert!(html.contains("a@b.com"));
        assert!(!html.contains("currentPassword' value"));
    }
}
