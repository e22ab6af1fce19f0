//! The internal server error page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// Route handler for the 500 internal server error page.
pub async fn get_internal_server_error_page() -> Response {
    render_internal_server_error(
        "Sorry, something went wrong.",
        "Try again later or check the server logs",
    )
}

/// Render the 500 page with a custom description and suggested fix.
pub fn render_internal_server_error(description: &str, fix: &str) -> Response {
    let page = error_view("Internal Server Error", "500", description, fix);

    (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
}

#[cfg(test)]
mod internal_server_error_tests {
    use axum::http::StatusCode;

    use crate::{
        internal_server_error::get_internal_server_error_page,
        test_utils::{assert_valid_html, parse_html_document},
    };

    #[tokio::test]
    async fn renders_500_page() {
        let response = get_internal_server_error_page().await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
    }
}
