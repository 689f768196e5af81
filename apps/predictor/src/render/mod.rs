//! Server-rendered single page: the form, the submit button, and the outcome.

use std::fmt::Write;

use crate::models::request::SKILL_FIELDS;
use crate::models::{City, CompanySize, EducationLevel, JobTitle, PredictionRequest, PredictionResult};

/// Renders the full page for the current session state.
///
/// `notice` is an inline message that is not a prediction outcome, such as a
/// rejected edit. It is shown in place of the result.
pub fn render_page(
    form: &PredictionRequest,
    result: &PredictionResult,
    busy: bool,
    notice: Option<&str>,
) -> String {
    let mut fields = String::new();

    let _ = write!(
        fields,
        r#"<label>Years Experience <input name="years_experience" type="number" step="0.1" value="{}"/></label>"#,
        form.years_experience
    );
    fields.push_str(&select("Education", "education_level", EducationLevel::ALL.iter().map(|v| v.as_str()), form.education_level.as_str()));
    fields.push_str(&select("Job Title", "job_title", JobTitle::ALL.iter().map(|v| v.as_str()), form.job_title.as_str()));
    fields.push_str(&select("City", "city", City::ALL.iter().map(|v| v.as_str()), form.city.as_str()));
    fields.push_str(&select("Company Size", "company_size", CompanySize::ALL.iter().map(|v| v.as_str()), form.company_size.as_str()));

    for &name in SKILL_FIELDS {
        let label = name.trim_start_matches("skills_").to_uppercase();
        let _ = write!(
            fields,
            r#"<label>{label} (0/1) <input name="{name}" type="number" min="0" max="1" value="{}"/></label>"#,
            form.skill(name).unwrap_or_default()
        );
    }

    let button = if busy {
        r#"<button type="submit" disabled>Predicting...</button>"#
    } else {
        r#"<button type="submit">Predict</button>"#
    };

    let mut outcome = String::new();
    if let Some(msg) = notice.or(result.error()) {
        let _ = write!(outcome, r#"<p class="error">{}</p>"#, escape(msg));
    } else if let Some(headline) = result.headline() {
        let _ = write!(outcome, "<h2>{}</h2>", escape(&headline));
    }

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8"/>
<title>Salary Predictor</title>
<style>
body {{ font-family: system-ui, sans-serif; padding: 24px; }}
.grid {{ display: grid; grid-template-columns: repeat(2, minmax(0, 320px)); gap: 12px; }}
.error {{ color: crimson; }}
</style>
</head>
<body>
<h1>Salary Predictor</h1>
<form method="post" action="/">
<div class="grid">{fields}</div>
<div style="margin-top: 16px">{button}</div>
</form>
{outcome}
</body>
</html>
"#
    )
}

fn select<'a>(label: &str, name: &str, options: impl Iterator<Item = &'a str>, selected: &str) -> String {
    let mut out = format!(r#"<label>{label} <select name="{name}">"#);
    for option in options {
        let marker = if option == selected { " selected" } else { "" };
        let _ = write!(out, r#"<option value="{0}"{marker}>{0}</option>"#, escape(option));
    }
    out.push_str("</select></label>");
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_defaults_selected() {
        let html = render_page(&PredictionRequest::default(), &PredictionResult::Absent, false, None);
        assert!(html.contains(r#"<option value="Bachelor" selected>"#));
        assert!(html.contains(r#"<option value="Data Scientist" selected>"#));
        assert!(html.contains(r#"name="years_experience" type="number" step="0.1" value="3""#));
        assert!(html.contains(r#"<button type="submit">Predict</button>"#));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_renders_every_closed_set_option() {
        let html = render_page(&PredictionRequest::default(), &PredictionResult::Absent, false, None);
        for city in City::ALL {
            assert!(html.contains(&format!(r#"<option value="{city}""#)));
        }
        assert!(html.contains("PYTHON (0/1)"));
        assert!(html.contains("SQL (0/1)"));
    }

    #[test]
    fn test_busy_disables_button() {
        let html = render_page(&PredictionRequest::default(), &PredictionResult::Absent, true, None);
        assert!(html.contains("disabled>Predicting...</button>"));
    }

    #[test]
    fn test_renders_formatted_value() {
        let html = render_page(
            &PredictionRequest::default(),
            &PredictionResult::Value(1234567.0),
            false,
            None,
        );
        assert!(html.contains("<h2>Predicted: ₹ 12,34,567</h2>"));
    }

    #[test]
    fn test_renders_escaped_error() {
        let html = render_page(
            &PredictionRequest::default(),
            &PredictionResult::Error("city must be one of <list>".to_string()),
            false,
            None,
        );
        assert!(html.contains(r#"<p class="error">city must be one of &lt;list&gt;</p>"#));
        assert!(!html.contains("<h2>"));
    }

    #[test]
    fn test_notice_replaces_value() {
        let html = render_page(
            &PredictionRequest::default(),
            &PredictionResult::Value(10.0),
            false,
            Some("years_experience must be numeric"),
        );
        assert!(html.contains("years_experience must be numeric"));
        assert!(!html.contains("<h2>"));
    }
}
