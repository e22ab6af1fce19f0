//! The document chamber: uploads, e-signatures, sharing, and the documents
//! page.

mod core;
mod documents_page;
mod manage_endpoints;
mod upload_endpoint;

pub use core::{
    Document, DocumentId, DocumentKind, DocumentStatus, DocumentVault, StatusCounts,
};
pub use documents_page::get_documents_page;
pub use manage_endpoints::{
    delete_document_endpoint, share_document_endpoint, sign_document_endpoint,
};
pub use upload_endpoint::upload_document_endpoint;
