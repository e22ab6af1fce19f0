//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    calendar::{
        accept_request_endpoint, add_slot_endpoint, decline_request_endpoint, get_calendar_page,
    },
    document::{
        delete_document_endpoint, get_documents_page, share_document_endpoint,
        sign_document_endpoint, upload_document_endpoint,
    },
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    settings::{
        change_password_endpoint, disable_two_factor_endpoint, enable_two_factor_endpoint,
        get_settings_page, update_profile_endpoint,
    },
    video::{end_call_endpoint, get_video_page, start_call_endpoint, toggle_media_endpoint},
    wallet::{
        deposit_endpoint, funding_endpoint, get_payments_page, transfer_endpoint,
        withdraw_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::PAYMENTS_VIEW, get(get_payments_page))
        .route(endpoints::CALENDAR_VIEW, get(get_calendar_page))
        .route(endpoints::DOCUMENTS_VIEW, get(get_documents_page))
        .route(endpoints::SETTINGS_VIEW, get(get_settings_page))
        .route(endpoints::VIDEO_VIEW, get(get_video_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(endpoints::DEPOSIT_API, post(deposit_endpoint))
        .route(endpoints::WITHDRAW_API, post(withdraw_endpoint))
        .route(endpoints::TRANSFER_API, post(transfer_endpoint))
        .route(endpoints::FUNDING_API, post(funding_endpoint))
        .route(endpoints::NEW_SLOT_API, post(add_slot_endpoint))
        .route(endpoints::ACCEPT_REQUEST_API, post(accept_request_endpoint))
        .route(
            endpoints::DECLINE_REQUEST_API,
            post(decline_request_endpoint),
        )
        .route(endpoints::UPLOAD_DOCUMENT_API, post(upload_document_endpoint))
        .route(endpoints::SIGN_DOCUMENT_API, post(sign_document_endpoint))
        .route(endpoints::SHARE_DOCUMENT_API, post(share_document_endpoint))
        .route(
            endpoints::DELETE_DOCUMENT_API,
            delete(delete_document_endpoint),
        )
        .route(endpoints::PROFILE_API, post(update_profile_endpoint))
        .route(endpoints::PASSWORD_API, post(change_password_endpoint))
        .route(
            endpoints::TWO_FACTOR_API,
            post(enable_two_factor_endpoint).delete(disable_two_factor_endpoint),
        )
        .route(endpoints::START_CALL_API, post(start_call_endpoint))
        .route(endpoints::END_CALL_API, post(end_call_endpoint))
        .route(endpoints::TOGGLE_MEDIA_API, post(toggle_media_endpoint));

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the payments page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::PAYMENTS_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_payments() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::PAYMENTS_VIEW);
    }
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde::Serialize;

    use crate::{build_router, demo::demo_app_state, endpoints};

    fn test_server() -> TestServer {
        let state = demo_app_state("UTC").expect("Could not build demo state");

        TestServer::new(build_router(state))
    }

    #[derive(Serialize)]
    struct AmountForm<'a> {
        amount: &'a str,
    }

    #[tokio::test]
    async fn every_page_renders() {
        let server = test_server();

        for page in [
            endpoints::PAYMENTS_VIEW,
            endpoints::CALENDAR_VIEW,
            endpoints::DOCUMENTS_VIEW,
            endpoints::SETTINGS_VIEW,
            endpoints::VIDEO_VIEW,
        ] {
            let response = server.get(page).await;

            response.assert_status(StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn unknown_routes_render_the_404_page() {
        let server = test_server();

        let response = server.get("/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn a_deposit_shows_up_on_the_payments_page() {
        let server = test_server();

        let response = server
            .post(endpoints::DEPOSIT_API)
            .form(&AmountForm { amount: "500" })
            .await;
        response.assert_status(StatusCode::SEE_OTHER);

        let page = server.get(endpoints::PAYMENTS_VIEW).await;
        let body = page.text();
        assert!(body.contains("$125,500"), "balance missing from page");
    }

    #[tokio::test]
    async fn an_overdraft_is_rejected_with_an_alert() {
        let server = test_server();

        let response = server
            .post(endpoints::WITHDRAW_API)
            .form(&AmountForm {
                amount: "999999999",
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Insufficient balance"));
    }
}
