//! Snippet Pages

use kernel::validate::FieldErrors;
use platform::html::{PageChrome, escape, page};

use crate::domain::entities::{EXPIRY_OPTIONS_DAYS, Snippet};
use crate::presentation::forms::SnippetForm;

fn field_error(errors: &FieldErrors, field: &str) -> String {
    match errors.get(field) {
        Some(message) => format!("<label class='error'>{}</label>", escape(message)),
        None => String::new(),
    }
}

pub fn home_page(chrome: &PageChrome, snippets: &[Snippet]) -> String {
    let body = if snippets.is_empty() {
        "<h2>Latest Snippets</h2>\n<p>There's nothing to see here... yet!</p>".to_string()
    } else {
        let rows: String = snippets
            .iter()
            .map(|snippet| {
                format!(
                    "<tr><td><a href='/snippet/view/{id}'>{title}</a></td>\
                     <td>#{id}</td></tr>\n",
                    id = snippet.id,
                    title = escape(&snippet.title),
                )
            })
            .collect();
        format!("<h2>Latest Snippets</h2>\n<table>\n{rows}</table>")
    };

    page("Home", chrome, &body)
}

pub fn view_page(chrome: &PageChrome, snippet: &Snippet) -> String {
    let body = format!(
        "<div class='snippet'>\n<h2>{title}</h2>\n\
         <pre><code>{content}</code></pre>\n\
         <p>#{id} &middot; created {created}</p>\n</div>",
        title = escape(&snippet.title),
        content = escape(&snippet.content),
        id = snippet.id,
        created = snippet.created_at.format("%d %b %Y at %H:%M"),
    );

    page(&snippet.title, chrome, &body)
}

pub fn create_page(chrome: &PageChrome, form: &SnippetForm, errors: &FieldErrors) -> String {
    let expiry_options: String = EXPIRY_OPTIONS_DAYS
        .iter()
        .map(|days| {
            let checked = if *days == form.expires { " checked" } else { "" };
            let label = match days {
                1 => "One day".to_string(),
                7 => "One week".to_string(),
                _ => "One year".to_string(),
            };
            format!(
                "<label><input type='radio' name='expires' value='{days}'{checked}> {label}</label>\n"
            )
        })
        .collect();

    let body = format!(
        "<h2>Create a New Snippet</h2>\n\
         <form action='/snippet/create' method='POST'>\n\
         <input type='hidden' name='csrf_token' value='{csrf}'>\n\
         <div><label>Title:</label>{title_error}\
         <input type='text' name='title' value='{title}'></div>\n\
         <div><label>Content:</label>{content_error}\
         <textarea name='content'>{content}</textarea></div>\n\
         <div><label>Delete in:</label>{expires_error}\n{expiry_options}</div>\n\
         <div><button type='submit'>Publish snippet</button></div>\n\
         </form>",
        csrf = escape(&chrome.csrf_token),
        title_error = field_error(errors, "title"),
        title = escape(&form.title),
        content_error = field_error(errors, "content"),
        content = escape(&form.content),
        expires_error = field_error(errors, "expires"),
    );

    page("Create Snippet", chrome, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use kernel::id::SnippetId;

    fn chrome() -> PageChrome {
        PageChrome {
            flash: None,
            authenticated: true,
            csrf_token: "tok".to_string(),
        }
    }

    #[test]
    fn test_create_page_has_form_and_token() {
        let html = create_page(&chrome(), &SnippetForm::default(), &FieldErrors::new());
        assert!(html.contains("<form action='/snippet/create' method='POST'>"));
        assert!(html.contains("name='csrf_token' value='tok'"));
        // one-year default preselected
        assert!(html.contains("value='365' checked"));
    }

    #[test]
    fn test_view_page_escapes_content() {
        let snippet = Snippet {
            id: SnippetId::from_i64(1),
            title: "<b>bold</b>".to_string(),
            content: "<script>alert(1)</script>".to_string(),
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::days(1),
        };
        let html = view_page(&chrome(), &snippet);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_home_page_lists_snippets() {
        let snippet = Snippet {
            id: SnippetId::from_i64(1),
            title: "First".to_string(),
            content: "body".to_string(),
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::days(1),
        };
        let html = home_page(&chrome(), &[snippet]);
        assert!(html.contains("href='/snippet/view/1'"));
        assert!(html.contains("First"));

        let empty = home_page(&chrome(), &[]);
        assert!(empty.contains("nothing to see here"));
    }
}
