//! Defines the endpoint for uploading documents via a multipart form.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    alert::Alert,
    document::{DocumentKind, DocumentVault},
    endpoints,
    timezone::current_local_date,
};

/// The state needed to upload documents.
#[derive(Debug, Clone)]
pub struct UploadDocumentState {
    /// The document chamber.
    pub documents: Arc<Mutex<DocumentVault>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for UploadDocumentState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            documents: state.documents.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Route handler for uploading one or more documents.
///
/// Every part named `document` is stored as a draft. All file names are
/// checked before anything is stored, so one bad file rejects the whole
/// upload instead of leaving half of it behind.
pub async fn upload_document_endpoint(
    State(state): State<UploadDocumentState>,
    mut multipart: Multipart,
) -> Result<Response, Response> {
    let date = current_local_date(&state.local_timezone).map_err(Error::into_response)?;

    let mut files: Vec<(String, u64)> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|error| {
        tracing::error!("could not read multipart field: {error}");
        Error::MultipartError(error.to_string()).into_alert_response()
    })? {
        if field.name() != Some("document") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_owned)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| Error::EmptyDocumentName.into_alert_response())?;

        let data = field.bytes().await.map_err(|error| {
            tracing::error!("could not read uploaded file: {error}");
            Error::MultipartError(error.to_string()).into_alert_response()
        })?;

        files.push((file_name, data.len() as u64));
    }

    if files.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Alert::ErrorSimple {
                message: "Choose a file to upload.".to_owned(),
            }
            .into_html(),
        )
            .into_response());
    }

    for (file_name, _) in &files {
        DocumentKind::from_file_name(file_name).map_err(Error::into_alert_response)?;
    }

    let mut vault = state.documents.lock().map_err(|error| {
        tracing::error!("could not acquire document lock: {error}");
        Error::StateLockError.into_alert_response()
    })?;

    for (file_name, size_bytes) in files {
        vault
            .add(&file_name, size_bytes, date)
            .map_err(Error::into_alert_response)?;
    }

    Ok((
        HxRedirect(endpoints::DOCUMENTS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response())
}

#[cfg(test)]
mod upload_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::{
        TestServer,
        multipart::{MultipartForm, Part},
    };

    use crate::{
        document::{DocumentVault, upload_endpoint::UploadDocumentState},
        endpoints,
    };

    fn test_server() -> (TestServer, UploadDocumentState) {
        let state = UploadDocumentState {
            documents: Arc::new(Mutex::new(DocumentVault::default())),
            local_timezone: "UTC".to_owned(),
        };

        let router = Router::new()
            .route(
                endpoints::UPLOAD_DOCUMENT_API,
                post(super::upload_document_endpoint),
            )
            .with_state(state.clone());

        (
            TestServer::new(router),
            state,
        )
    }

    fn pdf_part(file_name: &str, content: &'static [u8]) -> Part {
        Part::bytes(content)
            .file_name(file_name.to_owned())
            .mime_type("application/pdf")
    }

    #[tokio::test]
    async fn stores_an_uploaded_pdf() {
        let (server, state) = test_server();
        let form =
            MultipartForm::new().add_part("document", pdf_part("Term Sheet.pdf", b"%PDF-1.7"));

        let response = server.post(endpoints::UPLOAD_DOCUMENT_API).multipart(form).await;

        response.assert_status(StatusCode::SEE_OTHER);

        let vault = state.documents.lock().unwrap();
        assert_eq!(vault.documents().len(), 1);
        assert_eq!(vault.documents()[0].name, "Term Sheet.pdf");
        assert_eq!(vault.documents()[0].size_bytes, 8);
    }

    #[tokio::test]
    async fn rejects_unsupported_file_types() {
        let (server, state) = test_server();
        let form = MultipartForm::new().add_part(
            "document",
            Part::bytes(&b"RIFF"[..])
                .file_name("pitch.mp4")
                .mime_type("video/mp4"),
        );

        let response = server.post(endpoints::UPLOAD_DOCUMENT_API).multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(state.documents.lock().unwrap().documents(), []);
    }

    #[tokio::test]
    async fn one_bad_file_rejects_the_whole_upload() {
        let (server, state) = test_server();
        let form = MultipartForm::new()
            .add_part("document", pdf_part("Term Sheet.pdf", b"%PDF-1.7"))
            .add_part(
                "document",
                Part::bytes(&b"RIFF"[..])
                    .file_name("pitch.mp4")
                    .mime_type("video/mp4"),
            );

        let response = server.post(endpoints::UPLOAD_DOCUMENT_API).multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(state.documents.lock().unwrap().documents(), []);
    }

    #[tokio::test]
    async fn empty_form_is_rejected() {
        let (server, state) = test_server();
        let form = MultipartForm::new().add_text("unrelated", "value");

        let response = server.post(endpoints::UPLOAD_DOCUMENT_API).multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(state.documents.lock().unwrap().documents(), []);
    }
}
