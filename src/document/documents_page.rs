//! Defines the route handler for the document chamber page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error,
    document::{Document, DocumentStatus, DocumentVault, StatusCounts},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, BadgeTone, CARD_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, status_badge,
    },
    navigation::NavBar,
};

/// File names longer than this many graphemes are shortened in the list.
const NAME_DISPLAY_LIMIT: usize = 40;

/// The state needed for the documents page.
#[derive(Debug, Clone)]
pub struct DocumentsViewState {
    /// The document chamber.
    pub documents: Arc<Mutex<DocumentVault>>,
}

impl FromRef<AppState> for DocumentsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            documents: state.documents.clone(),
        }
    }
}

/// Render the document chamber.
pub async fn get_documents_page(
    State(state): State<DocumentsViewState>,
) -> Result<Response, Error> {
    let (documents, counts) = {
        let vault = state
            .documents
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire document lock: {error}"))
            .map_err(|_| Error::StateLockError)?;

        (vault.documents().to_vec(), vault.status_counts())
    };

    Ok(documents_view(&documents, counts).into_response())
}

fn documents_view(documents: &[Document], counts: StatusCounts) -> Markup {
    let nav_bar = NavBar::new(endpoints::DOCUMENTS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-5xl space-y-6"
            {
                header
                {
                    h1 class="text-xl font-bold" { "Document Chamber" }
                    p class="text-gray-600 dark:text-gray-400"
                    { "Manage contracts, agreements, and e-signatures" }
                }

                (stats_cards(counts))
                (upload_form())
                (document_list(documents))
            }
        }
    );

    base("Documents", &[], &content)
}

fn stats_cards(counts: StatusCounts) -> Markup {
    let stat_card = |label: &str, count: usize| {
        html!(
            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-600 dark:text-gray-400" { (label) }
                p class="text-lg font-semibold" { (count) }
            }
        )
    };

    html!(
        section class="grid grid-cols-1 md:grid-cols-3 gap-4"
        {
            (stat_card("Draft", counts.draft))
            (stat_card("In Review", counts.in_review))
            (stat_card("Signed", counts.signed))
        }
    )
}

fn upload_form() -> Markup {
    html!(
        form
            hx-post=(endpoints::UPLOAD_DOCUMENT_API)
            hx-encoding="multipart/form-data"
            hx-target-error="#alert-container"
            enctype="multipart/form-data"
            class=(format!("{CARD_STYLE} space-y-3"))
        {
            h2 class="text-lg font-medium" { "Upload Document" }
            p class="text-sm text-gray-600 dark:text-gray-400"
            { "Supports PDF, DOC, DOCX files" }

            div
            {
                label for="document-file" class=(FORM_LABEL_STYLE) { "File" }
                input
                    name="document"
                    id="document-file"
                    type="file"
                    accept=".pdf,.doc,.docx"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Upload" }
        }
    )
}

fn document_list(documents: &[Document]) -> Markup {
    html!(
        section class=(CARD_STYLE)
        {
            h2 class="text-lg font-medium mb-3" { "All Documents" }

            @if documents.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400 text-center py-4"
                { "No documents yet. Upload a contract to get started." }
            }

            ul class="space-y-2"
            {
                @for document in documents {
                    (document_entry(document))
                }
            }
        }
    )
}

fn document_entry(document: &Document) -> Markup {
    let badge_tone = match document.status {
        DocumentStatus::Draft => BadgeTone::Neutral,
        DocumentStatus::InReview => BadgeTone::Warning,
        DocumentStatus::Signed => BadgeTone::Success,
    };
    let share_url = format_endpoint(endpoints::SHARE_DOCUMENT_API, document.id);
    let delete_url = format_endpoint(endpoints::DELETE_DOCUMENT_API, document.id);
    let sign_url = format_endpoint(endpoints::SIGN_DOCUMENT_API, document.id);

    html!(
        li class="p-4 rounded-lg bg-gray-50 dark:bg-gray-700 space-y-3"
        {
            div class="flex items-center gap-2 flex-wrap"
            {
                h3 class="text-sm font-medium" title=(document.name)
                {
                    (truncated_name(&document.name, NAME_DISPLAY_LIMIT))
                }

                (status_badge(document.status.label(), badge_tone))

                @if document.shared {
                    (status_badge("Shared", BadgeTone::Neutral))
                }
            }

            div class="flex items-center gap-4 text-sm text-gray-500 dark:text-gray-400 flex-wrap"
            {
                span { (document.kind.label()) }
                span { (format_file_size(document.size_bytes)) }
                span
                {
                    "Modified "
                    time datetime=(document.last_modified) { (document.last_modified) }
                }

                @if let Some(signed_by) = &document.signed_by {
                    span class="text-green-600 dark:text-green-400"
                    { "Signed by " (signed_by) }
                }
            }

            div class="flex items-center gap-3 flex-wrap"
            {
                @if document.status != DocumentStatus::Signed {
                    form
                        hx-post=(sign_url)
                        hx-target-error="#alert-container"
                        class="flex items-center gap-2"
                    {
                        input
                            name="signature"
                            type="text"
                            placeholder="Type your full name to sign"
                            class=(FORM_TEXT_INPUT_STYLE);

                        button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Sign" }
                    }
                }

                form hx-post=(share_url) hx-target-error="#alert-container"
                {
                    button type="submit" class=(BUTTON_SECONDARY_STYLE)
                    {
                        @if document.shared { "Unshare" } @else { "Share" }
                    }
                }

                form
                    hx-delete=(delete_url)
                    hx-target-error="#alert-container"
                    hx-confirm=(format!(
                        "Are you sure you want to delete '{}'? This cannot be undone.",
                        document.name
                    ))
                {
                    button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
                }
            }
        }
    )
}

/// Render a byte count the way file managers do, e.g. "2.4 MB".
pub(crate) fn format_file_size(size_bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if size_bytes >= MB {
        format!("{:.1} MB", size_bytes as f64 / MB as f64)
    } else if size_bytes >= KB {
        format!("{:.1} KB", size_bytes as f64 / KB as f64)
    } else {
        format!("{size_bytes} B")
    }
}

/// Shorten long file names, counting graphemes so multi-byte names are not
/// split in the middle of a character.
fn truncated_name(name: &str, limit: usize) -> String {
    let graphemes: Vec<&str> = name.graphemes(true).collect();

    if graphemes.len() <= limit {
        name.to_owned()
    } else {
        format!("{}…", graphemes[..limit - 1].concat())
    }
}

#[cfg(test)]
mod documents_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        document::{
            DocumentVault, documents_page::DocumentsViewState, get_documents_page,
        },
        endpoints,
        test_utils::{assert_hx_endpoint, assert_valid_html, get_forms, parse_html_document},
    };

    use super::{format_file_size, truncated_name};

    fn get_state(vault: DocumentVault) -> DocumentsViewState {
        DocumentsViewState {
            documents: Arc::new(Mutex::new(vault)),
        }
    }

    fn fixtures() -> DocumentVault {
        let mut vault = DocumentVault::default();
        vault
            .add("Investment Agreement.pdf", 2_516_582, date!(2026 - 02 - 05))
            .unwrap();
        let term_sheet = vault
            .add("Term Sheet.pdf", 1_887_436, date!(2026 - 02 - 10))
            .unwrap();
        vault.sign(term_sheet.id, "John Investor").unwrap();

        vault
    }

    #[tokio::test]
    async fn renders_stats_upload_form_and_documents() {
        let state = get_state(fixtures());

        let response = get_documents_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Investment Agreement.pdf"));
        assert!(text.contains("Signed by John Investor"));

        let forms = get_forms(&html);
        assert_hx_endpoint(&forms[0], endpoints::UPLOAD_DOCUMENT_API, "hx-post");
    }

    #[tokio::test]
    async fn signed_documents_have_no_sign_form() {
        let state = get_state(fixtures());

        let response = get_documents_page(State(state)).await.unwrap();
        let html = parse_html_document(response).await;

        let sign_inputs = html
            .select(&Selector::parse("input[name=signature]").unwrap())
            .count();
        // Only the unsigned document offers a signature field.
        assert_eq!(sign_inputs, 1);
    }

    #[tokio::test]
    async fn empty_vault_renders_a_hint() {
        let state = get_state(DocumentVault::default());

        let response = get_documents_page(State(state)).await.unwrap();
        let html = parse_html_document(response).await;

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No documents yet"));
    }

    #[test]
    fn file_sizes_render_in_human_units() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2_516_582), "2.4 MB");
    }

    #[test]
    fn short_names_are_untouched() {
        assert_eq!(truncated_name("Term Sheet.pdf", 40), "Term Sheet.pdf");
    }

    #[test]
    fn long_names_are_shortened_by_grapheme() {
        let name = "a".repeat(50);

        let truncated = truncated_name(&name, 40);

        assert_eq!(truncated.chars().count(), 40);
        assert!(truncated.ends_with('…'));
    }
}
