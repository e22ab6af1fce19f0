//! The document chamber: contracts, agreements, and e-signatures.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// The identifier of a document, unique within a session.
pub type DocumentId = i64;

/// The broad file type of a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum DocumentKind {
    /// A PDF file.
    Pdf,
    /// A Word document (.doc or .docx).
    Word,
}

impl DocumentKind {
    /// The kind as display text, e.g. "PDF".
    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Word => "Document",
        }
    }

    /// Derive the kind from a file name.
    ///
    /// # Errors
    /// Returns [Error::UnsupportedFileType] if the extension is not `.pdf`,
    /// `.doc`, or `.docx`.
    pub fn from_file_name(name: &str) -> Result<Self, Error> {
        let lowercase = name.to_lowercase();

        if lowercase.ends_with(".pdf") {
            Ok(DocumentKind::Pdf)
        } else if lowercase.ends_with(".doc") || lowercase.ends_with(".docx") {
            Ok(DocumentKind::Word)
        } else {
            Err(Error::UnsupportedFileType(name.to_owned()))
        }
    }
}

/// The signing lifecycle of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum DocumentStatus {
    /// Freshly uploaded, not yet circulated.
    Draft,
    /// Circulated and awaiting signatures.
    InReview,
    /// Signed; no further changes.
    Signed,
}

impl DocumentStatus {
    /// The status as display text, e.g. "In Review".
    pub fn label(self) -> &'static str {
        match self {
            DocumentStatus::Draft => "Draft",
            DocumentStatus::InReview => "In Review",
            DocumentStatus::Signed => "Signed",
        }
    }
}

/// A stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The ID of the document.
    pub id: DocumentId,
    /// The file name, e.g. "Investment Agreement.pdf".
    pub name: String,
    /// The broad file type.
    pub kind: DocumentKind,
    /// The file size in bytes.
    pub size_bytes: u64,
    /// When the document was last changed.
    pub last_modified: Date,
    /// Whether the document is shared with the counterparty.
    pub shared: bool,
    /// Where the document is in its signing lifecycle.
    pub status: DocumentStatus,
    /// Who signed the document, once it is signed.
    pub signed_by: Option<String>,
}

/// The number of documents in each lifecycle state, for the stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    /// Documents in [DocumentStatus::Draft].
    pub draft: usize,
    /// Documents in [DocumentStatus::InReview].
    pub in_review: usize,
    /// Documents in [DocumentStatus::Signed].
    pub signed: usize,
}

/// The in-memory holder of documents.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentVault {
    documents: Vec<Document>,
    next_id: DocumentId,
}

impl Default for DocumentVault {
    fn default() -> Self {
        Self::with_fixtures(Vec::new())
    }
}

impl DocumentVault {
    /// Create a vault from pre-existing documents. Used to seed fixture
    /// data.
    pub fn with_fixtures(documents: Vec<Document>) -> Self {
        let next_id = documents
            .iter()
            .map(|document| document.id)
            .max()
            .unwrap_or(0)
            + 1;

        Self { documents, next_id }
    }

    /// All documents, oldest first.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Store an uploaded document as a draft and return it.
    ///
    /// Unlike the wallet's history, the document list appends: the page
    /// shows documents oldest first.
    ///
    /// # Errors
    /// Returns [Error::EmptyDocumentName] if `name` is empty, or
    /// [Error::UnsupportedFileType] if the extension is not a supported
    /// document type.
    pub fn add(&mut self, name: &str, size_bytes: u64, date: Date) -> Result<Document, Error> {
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::EmptyDocumentName);
        }

        let kind = DocumentKind::from_file_name(name)?;

        let document = Document {
            id: self.next_id,
            name: name.to_owned(),
            kind,
            size_bytes,
            last_modified: date,
            shared: false,
            status: DocumentStatus::Draft,
            signed_by: None,
        };

        self.documents.push(document.clone());
        self.next_id += 1;

        Ok(document)
    }

    /// Sign a document, recording the signer's name.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a document,
    /// [Error::DocumentAlreadySigned] if it is already signed, or
    /// [Error::MissingSignature] if `signer` is empty.
    pub fn sign(&mut self, id: DocumentId, signer: &str) -> Result<(), Error> {
        let signer = signer.trim();

        if signer.is_empty() {
            return Err(Error::MissingSignature);
        }

        let document = self.get_mut(id)?;

        if document.status == DocumentStatus::Signed {
            return Err(Error::DocumentAlreadySigned);
        }

        document.status = DocumentStatus::Signed;
        document.signed_by = Some(signer.to_owned());

        Ok(())
    }

    /// Toggle whether a document is shared, returning the new value.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a document.
    pub fn toggle_shared(&mut self, id: DocumentId) -> Result<bool, Error> {
        let document = self.get_mut(id)?;
        document.shared = !document.shared;

        Ok(document.shared)
    }

    /// Delete a document.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a document.
    pub fn remove(&mut self, id: DocumentId) -> Result<(), Error> {
        let index = self
            .documents
            .iter()
            .position(|document| document.id == id)
            .ok_or(Error::NotFound)?;

        self.documents.remove(index);

        Ok(())
    }

    /// Count documents per lifecycle state.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();

        for document in &self.documents {
            match document.status {
                DocumentStatus::Draft => counts.draft += 1,
                DocumentStatus::InReview => counts.in_review += 1,
                DocumentStatus::Signed => counts.signed += 1,
            }
        }

        counts
    }

    fn get_mut(&mut self, id: DocumentId) -> Result<&mut Document, Error> {
        self.documents
            .iter_mut()
            .find(|document| document.id == id)
            .ok_or(Error::NotFound)
    }
}
