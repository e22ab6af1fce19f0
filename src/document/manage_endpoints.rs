//! Defines the endpoints for signing, sharing, and deleting documents.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error,
    document::{DocumentId, DocumentVault},
    endpoints,
};

/// The state needed to manage an existing document.
#[derive(Debug, Clone)]
pub struct ManageDocumentState {
    /// The document chamber.
    pub documents: Arc<Mutex<DocumentVault>>,
}

impl FromRef<AppState> for ManageDocumentState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            documents: state.documents.clone(),
        }
    }
}

/// The form data for signing a document.
#[derive(Debug, Deserialize)]
pub struct SignatureForm {
    /// The typed signature.
    #[serde(default)]
    pub signature: String,
}

/// A route handler for signing a document, redirects to the documents view
/// on success.
pub async fn sign_document_endpoint(
    State(state): State<ManageDocumentState>,
    Path(document_id): Path<DocumentId>,
    Form(form): Form<SignatureForm>,
) -> Response {
    let mut vault = match lock_vault(&state) {
        Ok(vault) => vault,
        Err(response) => return response,
    };

    match vault.sign(document_id, &form.signature) {
        Ok(()) => {
            tracing::info!("document {document_id} signed");
            redirect_to_documents()
        }
        Err(error) => error.into_alert_response(),
    }
}

/// A route handler for toggling whether a document is shared, redirects to
/// the documents view on success.
pub async fn share_document_endpoint(
    State(state): State<ManageDocumentState>,
    Path(document_id): Path<DocumentId>,
) -> Response {
    let mut vault = match lock_vault(&state) {
        Ok(vault) => vault,
        Err(response) => return response,
    };

    match vault.toggle_shared(document_id) {
        Ok(shared) => {
            tracing::info!("document {document_id} shared: {shared}");
            redirect_to_documents()
        }
        Err(error) => error.into_alert_response(),
    }
}

/// A route handler for deleting a document, redirects to the documents view
/// on success.
pub async fn delete_document_endpoint(
    State(state): State<ManageDocumentState>,
    Path(document_id): Path<DocumentId>,
) -> Response {
    let mut vault = match lock_vault(&state) {
        Ok(vault) => vault,
        Err(response) => return response,
    };

    match vault.remove(document_id) {
        Ok(()) => {
            tracing::info!("document {document_id} deleted");
            redirect_to_documents()
        }
        Err(error) => error.into_alert_response(),
    }
}

fn lock_vault(state: &ManageDocumentState) -> Result<MutexGuard<'_, DocumentVault>, Response> {
    state.documents.lock().map_err(|error| {
        tracing::error!("could not acquire document lock: {error}");
        Error::StateLockError.into_alert_response()
    })
}

fn redirect_to_documents() -> Response {
    (
        HxRedirect(endpoints::DOCUMENTS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
