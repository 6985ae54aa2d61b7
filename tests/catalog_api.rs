//! Author and book endpoints, liveness and routing contracts

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{create_author, create_book, link, send, send_raw, test_app};

#[tokio::test]
async fn liveness_answers_any_method() {
    let app = test_app();
    for method in [Method::GET, Method::POST, Method::DELETE] {
        let (status, body) = send(&app, method, "/test.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Good response!"}));
    }
}

#[tokio::test]
async fn health_reports_version() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn author_created_with_only_name_has_null_bio() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/authors/create/",
        Some(json!({"name": "Stanislaw Lem"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Stanislaw Lem");
    assert!(body["bio"].is_null());

    let id = body["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/authors/{id}/"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn partial_author_update_keeps_omitted_fields() {
    let app = test_app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/authors/create/",
        Some(json!({"name": "Octavia Butler", "bio": "Wrote Kindred"})),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/authors/{id}/update/"),
        Some(json!({"name": "Octavia E. Butler"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Octavia E. Butler");
    assert_eq!(updated["bio"], "Wrote Kindred");

    // An empty payload changes nothing
    let (status, unchanged) = send(
        &app,
        Method::PUT,
        &format!("/authors/{id}/update/"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged, updated);
}

#[tokio::test]
async fn missing_name_is_a_missing_field() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/authors/create/",
        Some(json!({"bio": "nameless"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "missing_field");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = test_app();
    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/authors/create/",
        Some("{\"name\": ".to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "malformed_input");
}

#[tokio::test]
async fn unknown_fields_are_rejected() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books/create/",
        Some(json!({"title": "Dune", "pages": 412})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "malformed_input");
}

#[tokio::test]
async fn overlong_name_is_invalid() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/authors/create/",
        Some(json!({"name": "x".repeat(101)})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_field");
}

#[tokio::test]
async fn surrounding_whitespace_is_trimmed_before_length_checks() {
    let app = test_app();
    let name = "x".repeat(100);
    let (status, body) = send(
        &app,
        Method::POST,
        "/authors/create/",
        Some(json!({ "name": format!(" {name} ") })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["name"], name.as_str());

    let title = "t".repeat(200);
    let (status, body) = send(
        &app,
        Method::POST,
        "/books/create/",
        Some(json!({ "title": format!("  {title}\n") })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["title"], title.as_str());

    let (status, body) = send(
        &app,
        Method::POST,
        "/authors/create/",
        Some(json!({"name": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_field");
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = test_app();
    for (method, uri) in [
        (Method::GET, "/authors/42/"),
        (Method::DELETE, "/authors/42/delete/"),
        (Method::GET, "/books/42/"),
        (Method::GET, "/books/not-a-number/"),
        (Method::GET, "/author-books/42/"),
        (Method::DELETE, "/author-books/42/delete/"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["kind"], "not_found");
    }

    let (status, _) = send(
        &app,
        Method::PUT,
        "/books/42/update/",
        Some(json!({"title": "Ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_verbs_are_method_not_allowed() {
    let app = test_app();
    for (method, uri) in [
        (Method::POST, "/authors/"),
        (Method::GET, "/authors/create/"),
        (Method::DELETE, "/authors/1/"),
        (Method::GET, "/books/1/update/"),
        (Method::PUT, "/books/1/delete/"),
        (Method::GET, "/author-books/create/"),
        (Method::POST, "/author-books/1/update/"),
        (Method::GET, "/author-books/1/delete/"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_eq!(body["kind"], "method_not_allowed");
    }
}

#[tokio::test]
async fn unknown_routes_are_json_not_found() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/publishers/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn books_default_to_available() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books/create/",
        Some(json!({"title": "Solaris", "published_date": "1961-06-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_available"], true);
    assert_eq!(body["published_date"], "1961-06-01");
    assert!(body["description"].is_null());
}

#[tokio::test]
async fn book_update_null_clears_description_only() {
    let app = test_app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/books/create/",
        Some(json!({"title": "Kindred", "description": "Time travel", "is_available": false})),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/books/{id}/update/"),
        Some(json!({"description": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["description"].is_null());
    assert_eq!(updated["title"], "Kindred");
    assert_eq!(updated["is_available"], false);
}

#[tokio::test]
async fn author_list_nests_books_in_insertion_order() {
    let app = test_app();
    let ursula = create_author(&app, "Ursula K. Le Guin").await;
    let lonely = create_author(&app, "No Books Yet").await;
    let later = create_book(&app, "The Dispossessed").await;
    let earlier = create_book(&app, "A Wizard of Earthsea").await;

    link(&app, ursula, earlier, json!(100)).await;
    link(&app, ursula, later, json!(null)).await;

    let (status, body) = send(&app, Method::GET, "/authors/", None).await;
    assert_eq!(status, StatusCode::OK);

    let authors = body["authors"].as_array().unwrap();
    assert_eq!(authors.len(), 2);
    assert_eq!(authors[0]["id"], ursula);
    assert_eq!(
        authors[0]["books"],
        json!([
            {"id": earlier, "title": "A Wizard of Earthsea"},
            {"id": later, "title": "The Dispossessed"}
        ])
    );
    assert_eq!(authors[1]["id"], lonely);
    assert_eq!(authors[1]["books"], json!([]));
}

#[tokio::test]
async fn list_filters_follow_query_parameters() {
    let app = test_app();
    create_author(&app, "Ursula K. Le Guin").await;
    create_author(&app, "Stanislaw Lem").await;
    send(
        &app,
        Method::POST,
        "/books/create/",
        Some(json!({"title": "Solaris", "is_available": false})),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/books/create/",
        Some(json!({"title": "Kindred", "description": "A story of the Solar age"})),
    )
    .await;

    let (_, body) = send(&app, Method::GET, "/authors/?search=le%20guin", None).await;
    assert_eq!(body["authors"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, Method::GET, "/books/?search=sola", None).await;
    assert_eq!(body["books"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, Method::GET, "/books/?is_available=false", None).await;
    let books = body["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Solaris");

    let (status, body) = send(&app, Method::GET, "/books/?is_available=maybe", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "malformed_input");
}

#[tokio::test]
async fn books_filter_by_publication_range() {
    let app = test_app();
    for (title, date) in [
        ("The Left Hand of Darkness", json!("1969-03-01")),
        ("The Dispossessed", json!("1974-05-01")),
        ("Untitled draft", json!(null)),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/books/create/",
            Some(json!({"title": title, "published_date": date})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, Method::GET, "/books/?published_from=1970-01-01", None).await;
    let books = body["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "The Dispossessed");

    let (_, body) = send(
        &app,
        Method::GET,
        "/books/?published_from=1969-03-01&published_to=1974-05-01",
        None,
    )
    .await;
    assert_eq!(body["books"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, Method::GET, "/books/?published_to=soon", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "malformed_input");
}
