use anyhow::Result;
use test_utils::project_fixture_json;

use super::ProjectBrowser;
use crate::domain::models::Project;

fn project(generation_id: &str) -> Project {
    return serde_json::from_value(project_fixture_json(generation_id, "ada@example.com"))
        .unwrap();
}

fn loaded_browser(ids: &[&str]) -> ProjectBrowser {
    let mut browser = ProjectBrowser::default();
    browser.begin_load();
    browser.apply_list(ids.iter().map(|id| return project(id)).collect());
    return browser;
}

#[test]
fn it_replaces_the_cached_list_on_load() {
    let mut browser = loaded_browser(&["g1", "g2"]);
    assert_eq!(browser.projects().len(), 2);

    browser.begin_load();
    assert!(browser.is_loading());

    browser.apply_list(vec![project("g3")]);
    assert_eq!(browser.projects().len(), 1);
    assert_eq!(browser.projects()[0].generation_id, "g3");
}

#[test]
fn it_treats_an_empty_list_as_success() {
    let browser = loaded_browser(&[]);

    assert!(browser.is_empty());
    assert!(browser.list_error().is_none());
}

#[test]
fn it_surfaces_list_errors() {
    let mut browser = ProjectBrowser::default();
    browser.begin_load();
    browser.apply_list_error("Failed to fetch projects");

    assert!(!browser.is_loading());
    assert!(!browser.is_empty());
    assert_eq!(browser.list_error(), Some("Failed to fetch projects"));
}

#[test]
fn it_moves_the_selection_within_bounds() {
    let mut browser = loaded_browser(&["g1", "g2", "g3"]);

    browser.select_next();
    browser.select_next();
    browser.select_next();
    assert_eq!(browser.selected_index(), 2);

    browser.select_previous();
    assert_eq!(browser.selected_index(), 1);
}

#[test]
fn it_clamps_the_selection_when_the_list_shrinks() {
    let mut browser = loaded_browser(&["g1", "g2", "g3"]);
    browser.select_next();
    browser.select_next();

    browser.apply_list(vec![project("g1")]);
    assert_eq!(browser.selected_index(), 0);
    assert_eq!(browser.selected_project().unwrap().generation_id, "g1");
}

#[test]
fn it_opens_the_detail_view_for_the_selection() {
    let mut browser = loaded_browser(&["g1", "g2"]);
    browser.select_next();
    browser.open_detail();

    assert_eq!(browser.detail_project().unwrap().generation_id, "g2");
}

#[test]
fn it_removes_a_deleted_project_and_closes_its_detail_view() {
    let mut browser = loaded_browser(&["g1", "g2"]);
    browser.open_detail();
    assert_eq!(browser.detail_project().unwrap().generation_id, "g1");

    browser.apply_deleted("g1");

    assert!(browser.detail_project().is_none());
    assert_eq!(browser.projects().len(), 1);
    assert_eq!(browser.projects()[0].generation_id, "g2");
    assert!(browser.notice().is_some());
}

#[test]
fn it_keeps_an_unrelated_detail_view_open_across_a_delete() {
    let mut browser = loaded_browser(&["g1", "g2"]);
    browser.open_detail();

    browser.apply_deleted("g2");

    assert_eq!(browser.detail_project().unwrap().generation_id, "g1");
}

#[test]
fn it_closes_the_detail_view_when_a_fresh_list_no_longer_has_the_subject() {
    let mut browser = loaded_browser(&["g1", "g2"]);
    browser.open_detail();

    browser.apply_list(vec![project("g2")]);

    assert!(browser.detail_project().is_none());
}

#[test]
fn it_requires_arming_before_a_delete_is_confirmed() -> Result<()> {
    let mut browser = loaded_browser(&["g1", "g2"]);

    assert!(browser.confirm_delete().is_none());

    let armed = browser.arm_delete().unwrap();
    assert_eq!(armed.generation_id, "g1");
    assert_eq!(browser.confirm_delete(), Some("g1".to_string()));

    // The armed id is handed out exactly once.
    assert!(browser.confirm_delete().is_none());

    return Ok(());
}

#[test]
fn it_arms_the_detail_subject_when_the_detail_view_is_open() {
    let mut browser = loaded_browser(&["g1", "g2"]);
    browser.select_next();
    browser.open_detail();
    browser.select_previous();

    let armed = browser.arm_delete().unwrap();
    assert_eq!(armed.generation_id, "g2");
}

#[test]
fn it_disarms_when_the_selection_moves() {
    let mut browser = loaded_browser(&["g1", "g2"]);
    browser.arm_delete();
    browser.select_next();

    assert!(browser.confirm_delete().is_none());
}

#[test]
fn it_keeps_the_list_intact_on_a_per_action_error() {
    let mut browser = loaded_browser(&["g1", "g2"]);
    browser.apply_action_error("You do not have permission to delete this project");

    assert_eq!(browser.projects().len(), 2);
    assert_eq!(
        browser.action_error(),
        Some("You do not have permission to delete this project")
    );
    assert!(browser.list_error().is_none());
}
