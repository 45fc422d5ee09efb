//! Login form

use super::layout::{Tone, banner, escape, public_page};
use sellcord_core::types::LoginFormErrors;

/// State of the login form when (re)rendered
#[derive(Debug, Clone, Default)]
pub struct LoginForm<'a> {
    /// Username to prefill
    pub username: &'a str,
    /// Per-field validation messages
    pub errors: LoginFormErrors,
    /// Message from a failed login attempt
    pub failure: Option<String>,
}

fn field_error(message: Option<&str>) -> String {
    message.map_or_else(String::new, |m| {
        format!(r#"<p class="field-error">{}</p>"#, escape(m))
    })
}

/// Render the login page
#[must_use]
pub fn login_page(form: &LoginForm<'_>) -> String {
    let failure = form
        .failure
        .as_deref()
        .map_or_else(String::new, |m| banner(Tone::Error, m));

    let content = format!(
        r#"<div class="card login">
<h1>Admin Login</h1>
{failure}
<form method="post" action="/login">
<label for="username">Username</label>
<input id="username" name="username" type="text" value="{username}" autocomplete="username">
{username_error}
<label for="password">Password</label>
<input id="password" name="password" type="password" autocomplete="current-password">
{password_error}
<button type="submit">Login</button>
</form>
</div>"#,
        username = escape(form.username),
        username_error = field_error(form.errors.username.as_deref()),
        password_error = field_error(form.errors.password.as_deref()),
    );

    public_page("Login", &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_form_has_no_errors() {
        let html = login_page(&LoginForm::default());
        assert!(!html.contains(r#"class="field-error""#));
        assert!(!html.contains(r#"role="status""#));
        assert!(html.contains(r#"action="/login""#));
    }

    #[test]
    fn test_errors_and_prefill_rendered() {
        let form = LoginForm {
            username: "ad\"min",
            errors: LoginFormErrors {
                username: None,
                password: Some("Password is required".to_string()),
            },
            failure: Some("Wrong username or password".to_string()),
        };
        let html = login_page(&form);

        assert!(html.contains(r#"value="ad&quot;min""#));
        assert!(html.contains("Password is required"));
        assert!(html.contains("Wrong username or password"));
    }
}
