use std::collections::HashMap;

use axum::http::StatusCode;
use axum_test::TestServer;
use journal_server::api::create_router;
use journal_server::db::Database;
use journal_server::models::*;
use serde_json::{json, Value};

const TEST_EMAIL: &str = "testEmail@gmail.com";
const TEST_PAGE_NUMBER: &str = "TestPageNumber";
const TEST_TITLE: &str = "Test-Manuscript-Title";

fn setup() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let app = create_router(db);
    TestServer::new(app).expect("Failed to create test server")
}

async fn seed_person(server: &TestServer) -> String {
    let response = server
        .put("/people/create")
        .json(&json!({
            "name": "Test Name",
            "affiliation": "Test Affiliation",
            "email": TEST_EMAIL,
            "roles": "ED",
        }))
        .await;
    response.assert_status_ok();
    response.json::<Envelope<String>>().ret
}

async fn seed_text_page(server: &TestServer) -> String {
    let response = server
        .put("/text/create")
        .json(&json!({
            "title": "Test Title",
            "text": "Test Text",
            "page_number": TEST_PAGE_NUMBER,
        }))
        .await;
    response.assert_status_ok();
    response.json::<Envelope<String>>().ret
}

fn manuscript_input() -> ManuscriptInput {
    ManuscriptInput {
        title: TEST_TITLE.to_string(),
        author: "Test Author".to_string(),
        author_email: TEST_EMAIL.to_string(),
        text: "Test Text".to_string(),
        abstract_text: "Test Abstract".to_string(),
        editor_email: TEST_EMAIL.to_string(),
    }
}

async fn seed_manuscript(server: &TestServer) -> String {
    let response = server.put("/manuscript/create").json(&manuscript_input()).await;
    response.assert_status_ok();
    response.json::<Envelope<String>>().ret
}

mod service_endpoints {
    use super::*;

    #[tokio::test]
    async fn hello_returns_greeting() {
        let server = setup();

        let response = server.get("/hello").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["hello"], "world");
    }

    #[tokio::test]
    async fn title_returns_fixed_journal_title() {
        let server = setup();

        let response = server.get("/title").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let title = body["Title"].as_str().expect("Title should be a string");
        assert!(!title.is_empty());
    }

    #[tokio::test]
    async fn endpoints_lists_routes_sorted_and_deduplicated() {
        let server = setup();

        let response = server.get("/endpoints").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let listed: Vec<String> = body["Available endpoints"]
            .as_array()
            .expect("endpoint listing should be an array")
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();

        assert!(listed.windows(2).all(|w| w[0] < w[1]), "not sorted: {listed:?}");
        for required in ["/hello", "/title", "/people", "/text"] {
            assert!(listed.contains(&required.to_string()), "missing {required}");
        }
    }
}

mod people {
    use super::*;

    #[tokio::test]
    async fn create_returns_envelope_with_email() {
        let server = setup();

        let response = server
            .put("/people/create")
            .json(&json!({
                "name": "Test Name",
                "affiliation": "Test Affiliation",
                "email": TEST_EMAIL,
                "roles": "ED",
            }))
            .await;

        response.assert_status_ok();
        let body: Envelope<String> = response.json();
        assert_eq!(body.message, "Person added!");
        assert_eq!(body.ret, TEST_EMAIL);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let server = setup();
        seed_person(&server).await;

        let response = server
            .put("/people/create")
            .json(&json!({
                "name": "Other Name",
                "affiliation": "Other Affiliation",
                "email": TEST_EMAIL,
                "roles": "AU",
            }))
            .await;

        response.assert_status(StatusCode::NOT_ACCEPTABLE);
        let body: Value = response.json();
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("Could not add person"), "got: {message}");
        assert!(message.contains(TEST_EMAIL), "got: {message}");
    }

    #[tokio::test]
    async fn create_rejects_malformed_email() {
        let server = setup();

        let response = server
            .put("/people/create")
            .json(&json!({
                "name": "Test Name",
                "affiliation": "Test Affiliation",
                "email": "not-an-email",
                "roles": "ED",
            }))
            .await;

        response.assert_status(StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    async fn create_rejects_unknown_role_code() {
        let server = setup();

        let response = server
            .put("/people/create")
            .json(&json!({
                "name": "Test Name",
                "affiliation": "Test Affiliation",
                "email": TEST_EMAIL,
                "roles": "XX",
            }))
            .await;

        response.assert_status(StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    async fn read_returns_mapping_keyed_by_email() {
        let server = setup();
        seed_person(&server).await;

        let response = server.get("/people").await;

        response.assert_status_ok();
        let people: HashMap<String, Person> = response.json();
        assert_eq!(people.len(), 1);
        for (email, person) in &people {
            assert!(!email.is_empty());
            assert!(!person.name.is_empty());
        }
        assert_eq!(people[TEST_EMAIL].name, "Test Name");
    }

    #[tokio::test]
    async fn read_one_returns_person() {
        let server = setup();
        seed_person(&server).await;

        let response = server.get(&format!("/people/{}", TEST_EMAIL)).await;

        response.assert_status_ok();
        let person: Person = response.json();
        assert_eq!(person.email, TEST_EMAIL);
        assert_eq!(person.roles, vec![Role::Editor]);
    }

    #[tokio::test]
    async fn read_one_missing_returns_not_found() {
        let server = setup();

        let response = server.get("/people/nobody@nowhere.org").await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn read_one_is_idempotent() {
        let server = setup();
        seed_person(&server).await;

        let first: Value = server.get(&format!("/people/{}", TEST_EMAIL)).await.json();
        let second: Value = server.get(&format!("/people/{}", TEST_EMAIL)).await.json();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn delete_returns_deleted_key() {
        let server = setup();
        seed_person(&server).await;

        let response = server.delete(&format!("/people/{}", TEST_EMAIL)).await;

        response.assert_status_ok();
        let body: Deleted<String> = response.json();
        assert_eq!(body.deleted, TEST_EMAIL);

        server
            .get(&format!("/people/{}", TEST_EMAIL))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_missing_returns_not_found() {
        let server = setup();

        let response = server.delete("/people/nobody@nowhere.org").await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn update_name_changes_name() {
        let server = setup();
        seed_person(&server).await;

        let response = server
            .put("/people/update")
            .json(&json!({
                "email": TEST_EMAIL,
                "field": "name",
                "value": "Yirong Wang",
            }))
            .await;

        response.assert_status_ok();
        let body: Envelope<String> = response.json();
        assert_eq!(body.message, format!("name updated for {}!", TEST_EMAIL));
        assert_eq!(body.ret, TEST_EMAIL);

        let person: Person = server.get(&format!("/people/{}", TEST_EMAIL)).await.json();
        assert_eq!(person.name, "Yirong Wang");
    }

    #[tokio::test]
    async fn update_affiliation_changes_affiliation() {
        let server = setup();
        seed_person(&server).await;

        let response = server
            .put("/people/update")
            .json(&json!({
                "email": TEST_EMAIL,
                "field": "affiliation",
                "value": "NYU",
            }))
            .await;

        response.assert_status_ok();
        let person: Person = server.get(&format!("/people/{}", TEST_EMAIL)).await.json();
        assert_eq!(person.affiliation, "NYU");
    }

    #[tokio::test]
    async fn update_unknown_field_is_not_acceptable() {
        let server = setup();
        seed_person(&server).await;

        let response = server
            .put("/people/update")
            .json(&json!({
                "email": TEST_EMAIL,
                "field": "email",
                "value": "new@email.org",
            }))
            .await;

        response.assert_status(StatusCode::NOT_ACCEPTABLE);
        let body: Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("invalid field name"));
    }

    #[tokio::test]
    async fn update_missing_person_returns_not_found() {
        let server = setup();

        let response = server
            .put("/people/update")
            .json(&json!({
                "email": "nobody@nowhere.org",
                "field": "name",
                "value": "Anyone",
            }))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn add_role_attaches_role() {
        let server = setup();
        seed_person(&server).await;

        let response = server
            .put("/people/add_role")
            .json(&json!({ "email": TEST_EMAIL, "role": "RE" }))
            .await;

        response.assert_status_ok();
        let body: Envelope<String> = response.json();
        assert_eq!(body.message, "Role added!");
        assert_eq!(body.ret, TEST_EMAIL);

        let person: Person = server.get(&format!("/people/{}", TEST_EMAIL)).await.json();
        assert!(person.roles.contains(&Role::Referee));
    }

    #[tokio::test]
    async fn add_role_to_missing_person_is_not_acceptable() {
        let server = setup();

        let response = server
            .put("/people/add_role")
            .json(&json!({ "email": "nobody@nowhere.org", "role": "RE" }))
            .await;

        response.assert_status(StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    async fn add_role_already_held_is_not_acceptable() {
        let server = setup();
        seed_person(&server).await;

        let response = server
            .put("/people/add_role")
            .json(&json!({ "email": TEST_EMAIL, "role": "ED" }))
            .await;

        response.assert_status(StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    async fn delete_role_removes_role() {
        let server = setup();
        seed_person(&server).await;

        let response = server
            .delete("/people/delete_role")
            .json(&json!({ "email": TEST_EMAIL, "role": "ED" }))
            .await;

        response.assert_status_ok();
        let body: Envelope<String> = response.json();
        assert_eq!(body.message, "Role deleted!");

        let person: Person = server.get(&format!("/people/{}", TEST_EMAIL)).await.json();
        assert!(person.roles.is_empty());
    }

    #[tokio::test]
    async fn delete_role_not_held_is_not_acceptable() {
        let server = setup();
        seed_person(&server).await;

        let response = server
            .delete("/people/delete_role")
            .json(&json!({ "email": TEST_EMAIL, "role": "ME" }))
            .await;

        response.assert_status(StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    async fn masthead_groups_members_by_role_title() {
        let server = setup();
        seed_person(&server).await; // Test Name is an Editor

        let response = server.get("/people/masthead").await;

        response.assert_status_ok();
        let body: MastheadResponse = response.json();
        let editors = body
            .masthead
            .get("Editor")
            .expect("Editor section should exist");
        assert_eq!(editors, &vec!["Test Name".to_string()]);
    }
}

mod text {
    use super::*;

    #[tokio::test]
    async fn create_returns_envelope_with_page_number() {
        let server = setup();

        let response = server
            .put("/text/create")
            .json(&json!({
                "title": "Test Title",
                "text": "Test Text",
                "page_number": TEST_PAGE_NUMBER,
            }))
            .await;

        response.assert_status_ok();
        let body: Envelope<String> = response.json();
        assert_eq!(body.message, "Text added!");
        assert_eq!(body.ret, TEST_PAGE_NUMBER);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_page_number() {
        let server = setup();
        seed_text_page(&server).await;

        let response = server
            .put("/text/create")
            .json(&json!({
                "title": "Another Title",
                "text": "Another Text",
                "page_number": TEST_PAGE_NUMBER,
            }))
            .await;

        response.assert_status(StatusCode::NOT_ACCEPTABLE);
        let body: Value = response.json();
        assert!(body["message"].as_str().unwrap().contains("Could not add text"));
    }

    #[tokio::test]
    async fn read_returns_mapping_keyed_by_page_number() {
        let server = setup();
        seed_text_page(&server).await;

        let response = server.get("/text").await;

        response.assert_status_ok();
        let pages: HashMap<String, TextPage> = response.json();
        assert_eq!(pages.len(), 1);
        for (page_number, page) in &pages {
            assert!(!page_number.is_empty());
            assert!(!page.title.is_empty());
            assert!(!page.text.is_empty());
        }
    }

    #[tokio::test]
    async fn read_one_returns_page() {
        let server = setup();
        seed_text_page(&server).await;

        let response = server.get(&format!("/text/{}", TEST_PAGE_NUMBER)).await;

        response.assert_status_ok();
        let page: TextPage = response.json();
        assert_eq!(page.page_number, TEST_PAGE_NUMBER);
        assert_eq!(page.title, "Test Title");
    }

    #[tokio::test]
    async fn read_one_missing_returns_not_found() {
        let server = setup();

        server.get("/text/no-such-page").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn update_replaces_title_and_text() {
        let server = setup();
        seed_text_page(&server).await;

        let response = server
            .put("/text/update")
            .json(&json!({
                "page_number": TEST_PAGE_NUMBER,
                "title": "New Title",
                "text": "New Text",
            }))
            .await;

        response.assert_status_ok();
        let body: Envelope<String> = response.json();
        assert_eq!(
            body.message,
            format!("text updated for {}!", TEST_PAGE_NUMBER)
        );

        let page: TextPage = server
            .get(&format!("/text/{}", TEST_PAGE_NUMBER))
            .await
            .json();
        assert_eq!(page.title, "New Title");
        assert_eq!(page.text, "New Text");
    }

    #[tokio::test]
    async fn update_missing_page_returns_not_found() {
        let server = setup();

        let response = server
            .put("/text/update")
            .json(&json!({
                "page_number": "no-such-page",
                "title": "New Title",
                "text": "New Text",
            }))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_returns_deleted_key() {
        let server = setup();
        seed_text_page(&server).await;

        let response = server.delete(&format!("/text/{}", TEST_PAGE_NUMBER)).await;

        response.assert_status_ok();
        let body: Deleted<String> = response.json();
        assert_eq!(body.deleted, TEST_PAGE_NUMBER);
    }

    #[tokio::test]
    async fn delete_missing_returns_not_found() {
        let server = setup();

        server
            .delete("/text/no-such-page")
            .await
            .assert_status_not_found();
    }
}

mod manuscript {
    use super::*;

    #[tokio::test]
    async fn create_returns_envelope_with_title() {
        let server = setup();

        let response = server.put("/manuscript/create").json(&manuscript_input()).await;

        response.assert_status_ok();
        let body: Envelope<String> = response.json();
        assert_eq!(body.message, "Manuscript added!");
        assert_eq!(body.ret, TEST_TITLE);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_title() {
        let server = setup();
        seed_manuscript(&server).await;

        let response = server.put("/manuscript/create").json(&manuscript_input()).await;

        response.assert_status(StatusCode::NOT_ACCEPTABLE);
        let body: Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("Could not add manuscript"));
    }

    #[tokio::test]
    async fn create_rejects_malformed_author_email() {
        let server = setup();

        let mut input = manuscript_input();
        input.author_email = "not-an-email".to_string();
        let response = server.put("/manuscript/create").json(&input).await;

        response.assert_status(StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    async fn read_returns_mapping_keyed_by_title() {
        let server = setup();
        seed_manuscript(&server).await;

        let response = server.get("/manuscript").await;

        response.assert_status_ok();
        let manuscripts: HashMap<String, Manuscript> = response.json();
        assert_eq!(manuscripts.len(), 1);
        assert_eq!(manuscripts[TEST_TITLE].author, "Test Author");
    }

    #[tokio::test]
    async fn read_one_returns_manuscript() {
        let server = setup();
        seed_manuscript(&server).await;

        let response = server.get(&format!("/manuscript/{}", TEST_TITLE)).await;

        response.assert_status_ok();
        let manuscript: Manuscript = response.json();
        assert_eq!(manuscript.title, TEST_TITLE);
        assert_eq!(manuscript.abstract_text, "Test Abstract");
    }

    #[tokio::test]
    async fn read_one_missing_returns_not_found() {
        let server = setup();

        server
            .get("/manuscript/no-such-title")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn update_replaces_record() {
        let server = setup();
        seed_manuscript(&server).await;

        let mut input = manuscript_input();
        input.abstract_text = "Revised Abstract".to_string();
        let response = server.put("/manuscript/update").json(&input).await;

        response.assert_status_ok();
        let body: Envelope<String> = response.json();
        assert_eq!(
            body.message,
            format!("manuscript updated for {}!", TEST_TITLE)
        );

        let manuscript: Manuscript = server
            .get(&format!("/manuscript/{}", TEST_TITLE))
            .await
            .json();
        assert_eq!(manuscript.abstract_text, "Revised Abstract");
    }

    #[tokio::test]
    async fn update_missing_manuscript_returns_not_found() {
        let server = setup();

        let mut input = manuscript_input();
        input.title = "No Such Title".to_string();
        let response = server.put("/manuscript/update").json(&input).await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_returns_deleted_key() {
        let server = setup();
        seed_manuscript(&server).await;

        let response = server.delete(&format!("/manuscript/{}", TEST_TITLE)).await;

        response.assert_status_ok();
        let body: Deleted<String> = response.json();
        assert_eq!(body.deleted, TEST_TITLE);
    }

    #[tokio::test]
    async fn delete_missing_returns_not_found() {
        let server = setup();

        server
            .delete("/manuscript/no-such-title")
            .await
            .assert_status_not_found();
    }
}

mod forms {
    use super::*;

    #[tokio::test]
    async fn each_resource_serves_its_field_registry() {
        let server = setup();

        for (path, first_field) in [
            ("/people/form", "name"),
            ("/text/form", "page_number"),
            ("/manuscript/form", "title"),
        ] {
            let response = server.get(path).await;
            response.assert_status_ok();
            let fields: Vec<Value> = response.json();
            assert!(!fields.is_empty());
            assert_eq!(fields[0]["name"], first_field, "at {path}");
            assert!(fields[0]["question"].is_string());
        }
    }
}
