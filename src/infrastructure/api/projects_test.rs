use anyhow::Result;
use mockito::Matcher;
use test_utils::project_fixture_json;

use super::ProjectsApi;
use crate::domain::models::ProjectStore;
use crate::domain::models::TargetLanguage;

impl ProjectsApi {
    fn with_url(url: String) -> ProjectsApi {
        return ProjectsApi { url };
    }
}

#[tokio::test]
async fn it_lists_projects_scoped_by_owner_email() -> Result<()> {
    let body = serde_json::to_string(&vec![
        project_fixture_json("g1", "ada@example.com"),
        project_fixture_json("g2", "ada@example.com"),
    ])?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/projects")
        .match_query(Matcher::UrlEncoded(
            "user_email".to_string(),
            "ada@example.com".to_string(),
        ))
        .with_status(200)
        .with_body(body)
        .create();

    let store = ProjectsApi::with_url(server.url());
    let projects = store.list("ada@example.com").await?;

    mock.assert();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].generation_id, "g1");
    assert_eq!(projects[0].target_language, TargetLanguage::Python);
    assert_eq!(projects[0].output_filename, "checkout_flow.py");

    return Ok(());
}

#[tokio::test]
async fn it_returns_an_empty_list_as_success() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/projects")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();

    let store = ProjectsApi::with_url(server.url());
    let projects = store.list("nobody@example.com").await?;

    mock.assert();
    assert!(projects.is_empty());

    return Ok(());
}

#[tokio::test]
async fn it_fetches_the_same_project_twice_without_drift() -> Result<()> {
    let body = serde_json::to_string(&project_fixture_json("g1", "ada@example.com"))?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/projects/g1")
        .with_status(200)
        .with_body(body)
        .expect(2)
        .create();

    let store = ProjectsApi::with_url(server.url());
    let first = store.get("g1").await?;
    let second = store.get("g1").await?;

    mock.assert();
    assert_eq!(first, second);

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_the_not_found_detail() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/projects/gone")
        .with_status(404)
        .with_body("{\"detail\": \"Project not found\"}")
        .create();

    let store = ProjectsApi::with_url(server.url());
    let res = store.get("gone").await;

    mock.assert();
    assert_eq!(res.unwrap_err().to_string(), "Project not found");
}

#[tokio::test]
async fn it_downloads_the_stored_diagram_binary() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/projects/g1/pdf")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body([0x89, 0x50, 0x4E, 0x47])
        .create();

    let store = ProjectsApi::with_url(server.url());
    let bytes = store.fetch_diagram("g1").await?;

    mock.assert();
    assert_eq!(bytes, vec![0x89, 0x50, 0x4E, 0x47]);

    return Ok(());
}

#[tokio::test]
async fn it_downloads_the_stored_code_binary() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/projects/g1/code")
        .with_status(200)
        .with_body("print('hello')")
        .create();

    let store = ProjectsApi::with_url(server.url());
    let bytes = store.fetch_code("g1").await?;

    mock.assert();
    assert_eq!(bytes, b"print('hello')".to_vec());

    return Ok(());
}

#[tokio::test]
async fn it_deletes_a_project_with_the_owner_email() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("DELETE", "/projects/g1")
        .match_query(Matcher::UrlEncoded(
            "user_email".to_string(),
            "ada@example.com".to_string(),
        ))
        .with_status(200)
        .with_body("{\"message\": \"Project deleted successfully\", \"generation_id\": \"g1\"}")
        .create();

    let store = ProjectsApi::with_url(server.url());
    store.delete("g1", "ada@example.com").await?;

    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_the_forbidden_detail_on_an_unauthorized_delete() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("DELETE", "/projects/g1")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body("{\"detail\": \"You do not have permission to delete this project\"}")
        .create();

    let store = ProjectsApi::with_url(server.url());
    let res = store.delete("g1", "mallory@example.com").await;

    mock.assert();
    assert_eq!(
        res.unwrap_err().to_string(),
        "You do not have permission to delete this project"
    );
}

#[tokio::test]
async fn it_fetches_usage_stats() -> Result<()> {
    let body = serde_json::to_string(&serde_json::json!({
        "generation_id": "g1",
        "target_language": "python",
        "code_lines": 11,
        "code_characters": 260,
        "code_size_kb": 0.25,
        "pdf_size_kb": 84.2,
        "created_at": "2026-05-11T09:14:02",
        "updated_at": "2026-05-12T10:00:00",
        "has_been_refined": true,
    }))?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/projects/g1/stats")
        .with_status(200)
        .with_body(body)
        .create();

    let store = ProjectsApi::with_url(server.url());
    let stats = store.stats("g1").await?;

    mock.assert();
    assert_eq!(stats.code_lines, 11);
    assert!(stats.has_been_refined);
    assert_eq!(stats.target_language, TargetLanguage::Python);

    return Ok(());
}

#[tokio::test]
async fn it_falls_back_to_a_generic_list_error() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/projects")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("<html>nope</html>")
        .create();

    let store = ProjectsApi::with_url(server.url());
    let res = store.list("ada@example.com").await;

    mock.assert();
    assert_eq!(res.unwrap_err().to_string(), "Failed to fetch projects");
}
