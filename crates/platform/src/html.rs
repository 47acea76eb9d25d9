//! Minimal HTML Rendering
//!
//! The service renders a handful of small pages; a templating engine would
//! be an external collaborator, so this module provides only the page shell
//! and escaping. Handlers build their body markup and pass the per-request
//! chrome (flash, authentication flag, CSRF token) through [`PageChrome`].

/// Escape a string for safe interpolation into HTML text or attributes
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Per-request data every page receives
#[derive(Debug, Clone, Default)]
pub struct PageChrome {
    /// One-shot notification popped from the session
    pub flash: Option<String>,
    /// Whether the request belongs to a signed-in principal
    pub authenticated: bool,
    /// Anti-forgery token for any form the page renders
    pub csrf_token: String,
}

/// Render a full page: shell + navigation + optional flash + body.
///
/// `body` is trusted markup built by the caller; everything user-supplied in
/// it must already be escaped at the point of interpolation.
pub fn page(title: &str, chrome: &PageChrome, body: &str) -> String {
    let nav = if chrome.authenticated {
        format!(
            "<nav><a href='/'>Home</a> <a href='/snippet/create'>Create snippet</a> \
             <a href='/user/password'>Change password</a>\
             <form action='/user/logout' method='POST'>\
             <input type='hidden' name='csrf_token' value='{csrf}'>\
             <button type='submit'>Logout</button></form></nav>",
            csrf = escape(&chrome.csrf_token),
        )
    } else {
        "<nav><a href='/'>Home</a> <a href='/user/signup'>Signup</a> \
         <a href='/user/login'>Login</a></nav>"
            .to_string()
    };

    let flash = match &chrome.flash {
        Some(message) => format!("<div class='flash'>{}</div>", escape(message)),
        None => String::new(),
    };

    format!(
        "<!doctype html>\n<html lang='en'>\n<head><meta charset='utf-8'>\
         <title>{title} - snipbin</title></head>\n<body>\n\
         <header><h1><a href='/'>snipbin</a></h1></header>\n\
         {nav}\n{flash}\n<main>\n{body}\n</main>\n</body>\n</html>",
        title = escape(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<script>alert('x&y\"')</script>"),
            "&lt;script&gt;alert(&#39;x&amp;y&quot;&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_page_anonymous_nav() {
        let html = page("Home", &PageChrome::default(), "<p>hi</p>");
        assert!(html.contains("href='/user/login'"));
        assert!(html.contains("href='/user/signup'"));
        assert!(!html.contains("/user/logout"));
        assert!(html.contains("<p>hi</p>"));
    }

    #[test]
    fn test_page_authenticated_nav_has_logout_with_csrf() {
        let chrome = PageChrome {
            flash: None,
            authenticated: true,
            csrf_token: "tok123".to_string(),
        };
        let html = page("Home", &chrome, "");
        assert!(html.contains("action='/user/logout'"));
        assert!(html.contains("name='csrf_token' value='tok123'"));
        assert!(!html.contains("href='/user/login'"));
    }

    #[test]
    fn test_page_escapes_flash() {
        let chrome = PageChrome {
            flash: Some("<b>done</b>".to_string()),
            ..PageChrome::default()
        };
        let html = page("Home", &chrome, "");
        assert!(html.contains("&lt;b&gt;done&lt;/b&gt;"));
        assert!(!html.contains("<b>done</b>"));
    }
}
