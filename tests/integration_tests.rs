use httpmock::prelude::*;
use speaker_scraper::{
    ExtractionPolicy, GoogleSheetsClient, LocalStorage, OutputTarget, ScrapeEngine, ScrapeError,
    SheetsSettings, SiteProfile, SpeakerPipeline, SpeakerRecord,
};
use speaker_scraper::adapters::google::GoogleEndpoints;
use std::path::PathBuf;
use tempfile::TempDir;

const SPEAKERS_HTML: &str = include_str!("fixtures/speakers.html");
const INCOMPLETE_HTML: &str = include_str!("fixtures/incomplete_speaker.html");
const PRIVATE_KEY: &str = include_str!("fixtures/service_account_key.pem");

type LocalPipeline = SpeakerPipeline<LocalStorage, GoogleSheetsClient>;

fn profile_for(server: &MockServer) -> SiteProfile {
    let mut profile = SiteProfile::default();
    profile.site.url = server.url("/");
    profile
}

fn serve<'a>(server: &'a MockServer, html: &'static str) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(html);
    })
}

#[tokio::test]
async fn test_end_to_end_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let page_mock = serve(&server, SPEAKERS_HTML);

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = LocalPipeline::from_profile(
        &profile_for(&server),
        storage,
        OutputTarget::Json(PathBuf::from("speakers.json")),
    )
    .unwrap();

    let summary = ScrapeEngine::new(pipeline).run().await.unwrap();

    page_mock.assert();
    assert_eq!(summary.records, 3);
    assert_eq!(summary.location, "speakers.json");

    let data = std::fs::read(temp_dir.path().join("speakers.json")).unwrap();
    let records: Vec<SpeakerRecord> = serde_json::from_slice(&data).unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ada Lovelace", "Grace Hopper", "Alan Kay"]);

    assert_eq!(records[0].role, "Principal Designer, Analytical Engines");
    assert_eq!(
        records[0].image_link,
        "https://interaction24.ixda.org/images/speakers/ada.webp"
    );
    assert_eq!(
        records[0].social_links,
        vec!["https://www.linkedin.com/in/ada", "https://twitter.com/ada"]
    );
    assert!(records[1].social_links.is_empty());
}

#[tokio::test]
async fn test_end_to_end_csv_output() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    serve(&server, SPEAKERS_HTML);

    let pipeline = LocalPipeline::from_profile(
        &profile_for(&server),
        LocalStorage::new(temp_dir.path()),
        OutputTarget::Csv(PathBuf::from("out/speakers.csv")),
    )
    .unwrap();

    ScrapeEngine::new(pipeline).run().await.unwrap();

    let content = std::fs::read_to_string(temp_dir.path().join("out/speakers.csv")).unwrap();
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        vec!["Name", "Role", "Image Link", "Social Links"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        &rows[0][3],
        "https://www.linkedin.com/in/ada;https://twitter.com/ada"
    );
}

#[tokio::test]
async fn test_empty_listing_produces_zero_records() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    serve(&server, "<html><body><p>Speakers coming soon</p></body></html>");

    let pipeline = LocalPipeline::from_profile(
        &profile_for(&server),
        LocalStorage::new(temp_dir.path()),
        OutputTarget::Json(PathBuf::from("speakers.json")),
    )
    .unwrap();

    let summary = ScrapeEngine::new(pipeline).run().await.unwrap();
    assert_eq!(summary.records, 0);

    let content = std::fs::read_to_string(temp_dir.path().join("speakers.json")).unwrap();
    assert_eq!(content, "[]");
}

#[tokio::test]
async fn test_http_failure_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let page_mock = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(500);
    });

    let pipeline = LocalPipeline::from_profile(
        &profile_for(&server),
        LocalStorage::new(temp_dir.path()),
        OutputTarget::Json(PathBuf::from("speakers.json")),
    )
    .unwrap();

    let err = ScrapeEngine::new(pipeline).run().await.unwrap_err();

    page_mock.assert();
    assert!(matches!(err, ScrapeError::Http { status: 500, .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(!temp_dir.path().join("speakers.json").exists());
}

#[tokio::test]
async fn test_incomplete_speaker_aborts_by_default() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    serve(&server, INCOMPLETE_HTML);

    let pipeline = LocalPipeline::from_profile(
        &profile_for(&server),
        LocalStorage::new(temp_dir.path()),
        OutputTarget::Json(PathBuf::from("speakers.json")),
    )
    .unwrap();

    let err = ScrapeEngine::new(pipeline).run().await.unwrap_err();
    assert!(matches!(err, ScrapeError::Extraction { ref field, .. } if field == "name"));
    assert!(!temp_dir.path().join("speakers.json").exists());
}

#[tokio::test]
async fn test_incomplete_speaker_skipped_with_skip_policy() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    serve(&server, INCOMPLETE_HTML);

    let pipeline = LocalPipeline::from_profile(
        &profile_for(&server),
        LocalStorage::new(temp_dir.path()),
        OutputTarget::Json(PathBuf::from("speakers.json")),
    )
    .unwrap()
    .with_policy(ExtractionPolicy::Skip);

    let summary = ScrapeEngine::new(pipeline).run().await.unwrap();
    assert_eq!(summary.records, 2);

    let data = std::fs::read(temp_dir.path().join("speakers.json")).unwrap();
    let records: Vec<SpeakerRecord> = serde_json::from_slice(&data).unwrap();
    assert_eq!(records[0].name, "Ada Lovelace");
    assert_eq!(records[1].name, "Alan Kay");
}

#[tokio::test]
async fn test_sheet_target_without_settings_is_config_error() {
    let server = MockServer::start();
    serve(&server, SPEAKERS_HTML);

    let pipeline = LocalPipeline::from_profile(
        &profile_for(&server),
        LocalStorage::current_dir(),
        OutputTarget::Sheet("speakers.gsheets".to_string()),
    )
    .unwrap();

    let err = ScrapeEngine::new(pipeline).run().await.unwrap_err();
    assert!(matches!(err, ScrapeError::MissingConfig { .. }));
    assert_eq!(err.exit_code(), 8);
}

#[tokio::test]
async fn test_end_to_end_sheet_output_returns_spreadsheet_url() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let page_mock = serve(&server, SPEAKERS_HTML);

    let creds_path = temp_dir.path().join("creds.json");
    let creds = serde_json::json!({
        "type": "service_account",
        "private_key_id": "test-key",
        "private_key": PRIVATE_KEY,
        "client_email": "scraper@speaker-scraper-test.iam.gserviceaccount.com",
        "token_uri": server.url("/token"),
    });
    std::fs::write(&creds_path, serde_json::to_vec(&creds).unwrap()).unwrap();
    let settings = SheetsSettings {
        credentials_path: creds_path,
        sharing_email: "editor@example.org".to_string(),
    };

    server.mock(|when, then| {
        when.method(POST).path("/token");
        then.status(200).json_body(serde_json::json!({
            "access_token": "test-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/drive/v3/files");
        then.status(200).json_body(serde_json::json!({ "files": [] }));
    });
    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v4/spreadsheets")
            .body_contains("speakers.gsheets");
        then.status(200).json_body(serde_json::json!({
            "spreadsheetId": "sheet-1",
            "spreadsheetUrl": "https://docs.google.com/spreadsheets/d/sheet-1/edit",
            "sheets": [{ "properties": { "sheetId": 0, "title": "Sheet1" } }]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/drive/v3/files/sheet-1/permissions");
        then.status(200).json_body(serde_json::json!({ "id": "perm-1" }));
    });
    let insert_mock = server.mock(|when, then| {
        when.method(POST).path("/v4/spreadsheets/sheet-1:batchUpdate");
        then.status(200).json_body(serde_json::json!({ "replies": [{}] }));
    });
    let values_mock = server.mock(|when, then| {
        when.method(PUT).path_contains("/v4/spreadsheets/sheet-1/values/");
        then.status(200).json_body(serde_json::json!({}));
    });

    let client = GoogleSheetsClient::new(&settings).with_endpoints(GoogleEndpoints {
        sheets: server.base_url(),
        drive: server.base_url(),
    });
    let pipeline = LocalPipeline::from_profile(
        &profile_for(&server),
        LocalStorage::new(temp_dir.path()),
        OutputTarget::Sheet("speakers.gsheets".to_string()),
    )
    .unwrap()
    .with_sheets(client, settings.sharing_email.clone());

    let summary = ScrapeEngine::new(pipeline).run().await.unwrap();

    page_mock.assert();
    create_mock.assert();
    assert_eq!(summary.records, 3);
    assert_eq!(
        summary.location,
        "https://docs.google.com/spreadsheets/d/sheet-1/edit"
    );
    insert_mock.assert_hits(3);
    values_mock.assert_hits(4);
}
