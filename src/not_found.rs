//! The 404 not found page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// Route handler for unmatched routes.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Build the 404 response directly, for use outside a route handler.
pub fn get_404_not_found_response() -> Response {
    let page = error_view(
        "Not Found",
        "404",
        "Sorry, we couldn't find that page.",
        "Check the address, or head back to the homepage.",
    );

    (StatusCode::NOT_FOUND, page).into_response()
}

#[cfg(test)]
mod not_found_tests {
    use axum::http::StatusCode;

    use crate::{
        not_found::get_404_not_found,
        test_utils::{assert_valid_html, parse_html_document},
    };

    #[tokio::test]
    async fn renders_404_page() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
    }
}
