//! End-to-end tests for the form -> preview -> download flow

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use profile_pdf::navigation::decode_query;
use profile_pdf::render::{DESCRIPTION_PLACEHOLDER, POSITION_PLACEHOLDER};
use profile_pdf::{
    entry, ContactRecord, DirectorySave, DownloadOutcome, Field, FormView, MemorySave,
    PreviewView, ProfileRenderer, Route, ViewRequest,
};
use tempfile::tempdir;

fn jane() -> ContactRecord {
    ContactRecord {
        name: "Jane Doe".to_string(),
        email: "jane@x.com".to_string(),
        phone: "(555) 123-4567".to_string(),
        position: "Engineer".to_string(),
        description: String::new(),
    }
}

fn typed_form(record: &ContactRecord) -> FormView {
    let mut form = entry(None);
    for field in Field::ALL {
        form.on_field_change(field, record.get(field));
    }
    form
}

/// Follows a route the way a browser would: through its URL.
fn open_preview(route: &Route) -> PreviewView {
    let url = route.to_url();
    assert!(url.starts_with("/preview?data="), "unexpected url {url}");
    let record = decode_query(&url).expect("preview url decodes");
    let param = profile_pdf::navigation::encode_param(&record);
    PreviewView::mount(Some(&param)).expect("preview mounts")
}

#[test]
fn test_view_navigates_with_identical_record() {
    let mut form = typed_form(&jane());

    let ViewRequest::Navigate(route) = form.on_view_requested() else {
        panic!("expected navigation");
    };
    assert!(form.errors().is_empty());

    let preview = open_preview(&route);
    assert_eq!(preview.record(), Some(&jane()));
}

#[test]
fn test_back_restores_form_state() {
    let mut form = typed_form(&jane());
    let ViewRequest::Navigate(route) = form.on_view_requested() else {
        panic!("expected navigation");
    };
    let preview = open_preview(&route);

    let back = preview.on_back();
    let url = back.to_url();
    assert!(url.starts_with("/?data="));

    let restored = decode_query(&url).unwrap();
    let form = entry(Some(&profile_pdf::navigation::encode_param(&restored)));
    assert_eq!(form.record(), &jane());
    assert!(form.errors().is_empty());
}

#[tokio::test]
async fn test_download_from_form_and_preview() {
    let renderer = ProfileRenderer::default();

    let mut form = typed_form(&jane());
    let mut saved = MemorySave::new();
    let outcome = form.on_download_requested(&renderer, &mut saved).await;
    assert_eq!(
        outcome,
        DownloadOutcome::Saved {
            file_name: "Jane_Doe_profile.pdf".to_string()
        }
    );

    let ViewRequest::Navigate(route) = form.on_view_requested() else {
        panic!("expected navigation");
    };
    let mut preview = open_preview(&route);
    let outcome = preview.on_download(&renderer, &mut saved).await;
    assert!(outcome.is_saved());

    assert_eq!(saved.documents.len(), 2);
    for document in &saved.documents {
        assert!(document.bytes.starts_with(b"%PDF-"));
        assert_eq!(document.file_name, "Jane_Doe_profile.pdf");
    }
}

#[tokio::test]
async fn test_download_into_directory() {
    let dir = tempdir().unwrap();
    let mut target = DirectorySave::new(dir.path());
    let mut form = typed_form(&jane());

    let outcome = form
        .on_download_requested(&ProfileRenderer::default(), &mut target)
        .await;

    assert!(outcome.is_saved());
    let path = dir.path().join("Jane_Doe_profile.pdf");
    assert_eq!(target.saved(), &[path.clone()]);
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn test_placeholders_only_for_empty_fields() {
    let renderer = ProfileRenderer::default();
    let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

    let empty = ContactRecord {
        position: String::new(),
        description: String::new(),
        ..jane()
    };
    let trace = renderer.trace_on(&empty, date).unwrap();
    assert!(trace.contains(POSITION_PLACEHOLDER));
    assert!(trace.contains(DESCRIPTION_PLACEHOLDER));

    let filled = ContactRecord {
        description: "Ten years of embedded work.".to_string(),
        ..jane()
    };
    let trace = renderer.trace_on(&filled, date).unwrap();
    assert!(!trace.contains(POSITION_PLACEHOLDER));
    assert!(!trace.contains(DESCRIPTION_PLACEHOLDER));
}

#[test]
fn test_malformed_preview_link_redirects_to_empty_form() {
    assert_eq!(
        PreviewView::mount(Some("{\"name\": 3}")).unwrap_err(),
        Route::Form(None)
    );
    assert_eq!(Route::Form(None).to_url(), "/");
}
