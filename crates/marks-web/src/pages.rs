//! Server-rendered pages.
//!
//! Templates are embedded at compile time and registered once at startup.
//! Handlebars escapes every `{{value}}`, so user input is safe to echo back.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use handlebars::{Handlebars, TemplateError};
use serde::Serialize;

use marks_core::responses::StudentPayload;

static ERROR_500: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>Marks | Error</title>
</head>
<body>
<h1>Internal Server Error</h1>
<p>Something went wrong on our end.</p>
</body>
</html>"#;

const TEMPLATES: [(&str, &str); 6] = [
    ("login", include_str!("../templates/login.hbs")),
    ("register", include_str!("../templates/register.hbs")),
    ("forgot_password", include_str!("../templates/forgot_password.hbs")),
    ("students", include_str!("../templates/students.hbs")),
    ("edit_student", include_str!("../templates/edit_student.hbs")),
    ("error", include_str!("../templates/error.hbs")),
];

#[derive(Debug, Default, Serialize)]
pub struct LoginPage {
    pub error: Option<String>,
    pub notice: Option<String>,
    pub username: String,
}

#[derive(Debug, Default, Serialize)]
pub struct RegisterPage {
    pub error: Option<String>,
    pub username: String,
}

#[derive(Debug, Default, Serialize)]
pub struct ForgotPasswordPage {
    pub error: Option<String>,
    pub username: String,
    pub show_password_fields: bool,
}

/// The list page. `name`, `subject` and `marks` refill the add form after a
/// rejected submission.
#[derive(Debug, Default, Serialize)]
pub struct StudentsPage {
    pub username: String,
    pub students: Vec<StudentPayload>,
    pub error: Option<String>,
    pub name: String,
    pub subject: String,
    pub marks: String,
}

#[derive(Debug, Serialize)]
pub struct EditStudentPage {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub marks: String,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorPage {
    pub message: String,
}

/// The registered page templates.
pub struct Pages {
    registry: Handlebars<'static>,
}

impl Pages {
    /// Register the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError` if a template does not parse.
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("head", include_str!("../templates/head.hbs"))?;
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, source)?;
        }
        Ok(Self { registry })
    }

    /// Render `template` with `data`, falling back to a static 500 page.
    pub fn render<S: Serialize + std::fmt::Debug>(
        &self,
        status: StatusCode,
        template: &str,
        data: &S,
    ) -> Response {
        match self.registry.render(template, data) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!(template, ?data, error = %e, "template render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_500)).into_response()
            }
        }
    }

    /// Render the generic error page.
    pub fn error(&self, status: StatusCode, message: impl Into<String>) -> Response {
        self.render(
            status,
            "error",
            &ErrorPage {
                message: message.into(),
            },
        )
    }
}
