use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lifemap_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lifemap"));
    // Tests must not pick up source URLs from the developer's environment.
    cmd.env_remove("LIFEMAP_ROADMAP_URL")
        .env_remove("LIFEMAP_BOOKS_URL")
        .env_remove("LIFEMAP_PROFILE")
        .env_remove("LIFEMAP_TIMEOUT_SECS");
    cmd
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    lifemap_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("timeline"));
}

#[test]
fn test_version() {
    lifemap_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lifemap"));
}

#[test]
fn test_timeline_help_lists_filters() {
    lifemap_cmd()
        .args(["timeline", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--category").and(predicate::str::contains("--status")));
}

#[test]
fn test_invalid_profile_is_rejected() {
    let temp_dir = TempDir::new().unwrap();

    lifemap_cmd()
        .args(["timeline", "--profile", "bogus"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--profile"));
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();

    lifemap_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(temp_dir.path().join(".lifemap.toml").exists());
}

#[test]
fn test_init_records_source_urls() {
    let temp_dir = TempDir::new().unwrap();

    lifemap_cmd()
        .args([
            "init",
            "--roadmap-url",
            "https://example.com/roadmap.csv",
            "--books-url",
            "https://example.com/books.csv",
        ])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    let content = std::fs::read_to_string(temp_dir.path().join(".lifemap.toml")).unwrap();
    assert!(content.contains("https://example.com/roadmap.csv"));
    assert!(content.contains("https://example.com/books.csv"));
}

#[test]
fn test_init_twice_fails() {
    let temp_dir = TempDir::new().unwrap();

    lifemap_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success();

    lifemap_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Already initialized"));
}

// =============================================================================
// Missing configuration: the two recovery policies
// =============================================================================

#[test]
fn test_timeline_without_sources_fails_fast() {
    let temp_dir = TempDir::new().unwrap();

    lifemap_cmd()
        .arg("timeline")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("roadmap source URL is not set"));
}

#[test]
fn test_categories_without_sources_degrades_to_banner() {
    let temp_dir = TempDir::new().unwrap();

    lifemap_cmd()
        .arg("categories")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("not configured").and(predicate::str::contains("No data")),
        );
}

#[test]
fn test_malformed_url_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();

    lifemap_cmd()
        .args(["timeline", "--roadmap-url", "not a url"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid roadmap source URL"));
}

#[test]
fn test_non_http_url_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();

    lifemap_cmd()
        .args(["timeline", "--roadmap-url", "ftp://example.com/r.csv"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported scheme"));
}

// =============================================================================
// Doctor
// =============================================================================

#[test]
fn test_doctor_without_config_warns() {
    let temp_dir = TempDir::new().unwrap();

    lifemap_cmd()
        .arg("doctor")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("lifemap doctor")
                .and(predicate::str::contains("roadmap URL is not set"))
                .and(predicate::str::contains("warnings")),
        );
}

// =============================================================================
// End to end against a mock HTTP server
// =============================================================================

const ROADMAP_CSV: &str = "\
id,title,category,difficulty,timeframe,priority,description,start_date,end_date,status,tags
c1,Run a marathon,health,4,6 months,高,Train and finish,2024-01-15,2024-07-15,進行中,running
,Dropped row,health,1,,高,,,,計画中,
";

const BOOKS_CSV: &str = "\
id,title,author,category,difficulty,pages,estimated_reading_time,priority,description,status,start_date,end_date,tags
b1,Deep Work,Cal Newport,career,3,304,8 hours,高,Focused work,読書中,2024-02-01,,focus
";

async fn start_sources() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roadmap.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ROADMAP_CSV))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/books.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BOOKS_CSV))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_timeline_end_to_end_json() {
    let server = start_sources().await;
    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();

    tokio::task::spawn_blocking(move || {
        let output = lifemap_cmd()
            .args([
                "timeline",
                "--json",
                "--roadmap-url",
                &format!("{}/roadmap.csv", uri),
                "--books-url",
                &format!("{}/books.csv", uri),
            ])
            .current_dir(temp_dir.path())
            .assert()
            .success()
            .stdout(
                predicate::str::contains("Run a marathon")
                    .and(predicate::str::contains("Deep Work"))
                    .and(predicate::str::contains("Dropped row").not()),
            )
            .get_output()
            .clone();

        let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let items = items.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], "c1");
        assert_eq!(items[0]["kind"], "challenge");
        assert_eq!(items[1]["author"], "Cal Newport");
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_timeline_category_filter_end_to_end() {
    let server = start_sources().await;
    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();

    tokio::task::spawn_blocking(move || {
        lifemap_cmd()
            .args([
                "timeline",
                "--category",
                "career",
                "--roadmap-url",
                &format!("{}/roadmap.csv", uri),
                "--books-url",
                &format!("{}/books.csv", uri),
            ])
            .current_dir(temp_dir.path())
            .assert()
            .success()
            .stdout(
                predicate::str::contains("Deep Work")
                    .and(predicate::str::contains("Run a marathon").not()),
            );
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_timeline_reads_sources_from_config_file() {
    let server = start_sources().await;
    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();

    let config = format!(
        "[sources]\nroadmap_url = \"{0}/roadmap.csv\"\nbooks_url = \"{0}/books.csv\"\n",
        uri
    );
    std::fs::write(temp_dir.path().join(".lifemap.toml"), config).unwrap();

    tokio::task::spawn_blocking(move || {
        lifemap_cmd()
            .arg("timeline")
            .current_dir(temp_dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Run a marathon"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failing_source_surfaces_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roadmap.csv"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/books.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BOOKS_CSV))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();

    tokio::task::spawn_blocking(move || {
        lifemap_cmd()
            .args([
                "timeline",
                "--roadmap-url",
                &format!("{}/roadmap.csv", uri),
                "--books-url",
                &format!("{}/books.csv", uri),
            ])
            .current_dir(temp_dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("503"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_categories_end_to_end() {
    let server = start_sources().await;
    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();

    tokio::task::spawn_blocking(move || {
        lifemap_cmd()
            .args([
                "categories",
                "--roadmap-url",
                &format!("{}/roadmap.csv", uri),
                "--books-url",
                &format!("{}/books.csv", uri),
            ])
            .current_dir(temp_dir.path())
            .assert()
            .success()
            .stdout(
                predicate::str::contains("health")
                    .and(predicate::str::contains("career"))
                    .and(predicate::str::contains("Recommended books:")),
            );
    })
    .await
    .unwrap();
}
