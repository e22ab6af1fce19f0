//! Middleware for logging requests and responses.

use axum::{extract::Request, http::header::CONTENT_TYPE, middleware::Next, response::Response};

/// Form fields whose values must never reach the logs.
const REDACTED_FIELDS: [&str; 3] = ["current_password", "new_password", "confirm_password"];

const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level. If a body is
/// longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated and logged in
/// full at the `debug` level. Password fields in form posts are redacted.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let body_text = String::from_utf8_lossy(&body_bytes).to_string();

    let is_form_post = parts.method == axum::http::Method::POST
        && parts.headers.get(CONTENT_TYPE)
            == Some(&"application/x-www-form-urlencoded".parse().unwrap());

    if is_form_post {
        let mut display_text = body_text.clone();
        for field in REDACTED_FIELDS {
            display_text = redact_field(&display_text, field);
        }
        log_request(&parts, &display_text);
    } else {
        log_request(&parts, &body_text);
    }

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let body_text = String::from_utf8_lossy(&body_bytes).to_string();
    log_response(&parts, &body_text);

    Response::from_parts(parts, body_text.into())
}

fn redact_field(form_text: &str, field_name: &str) -> String {
    let prefix = format!("{field_name}=");

    let Some(start) = form_text.find(&prefix) else {
        return form_text.to_string();
    };

    let end = form_text[start..]
        .find('&')
        .map(|offset| start + offset)
        .unwrap_or(form_text.len());

    format!(
        "{}{prefix}********{}",
        &form_text[..start],
        &form_text[end..]
    )
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {parts:#?}\nbody: {:}...",
            &body[..LOG_BODY_LENGTH_LIMIT]
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {parts:#?}\nbody: {body:?}");
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {parts:#?}\nbody: {:}...",
            &body[..LOG_BODY_LENGTH_LIMIT]
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {parts:#?}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod redact_field_tests {
    use super::redact_field;

    #[test]
    fn redacts_a_field_in_the_middle() {
        let form = "name=Jo&current_password=hunter2&email=jo@example.com";

        assert_eq!(
            redact_field(form, "current_password"),
            "name=Jo&current_password=********&email=jo@example.com"
        );
    }

    #[test]
    fn redacts_a_trailing_field() {
        let form = "name=Jo&new_password=hunter2";

        assert_eq!(
            redact_field(form, "new_password"),
            "name=Jo&new_password=********"
        );
    }

    #[test]
    fn leaves_forms_without_the_field_alone() {
        let form = "amount=125";

        assert_eq!(redact_field(form, "current_password"), form);
    }
}
