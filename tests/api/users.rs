use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::json;

use crate::helpers::spawn_app;

#[tokio::test]
async fn create_update_delete_scenario() {
    let app = spawn_app();

    let (status, body) = app
        .post("/api/users", json!({"name": "Ana", "email": "ana@x.com"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["role"], "user");
    assert_eq!(body["message"], "user created successfully");
    let id = body["data"]["id"].as_i64().expect("id assigned");

    let uri = format!("/api/users/{id}");
    let (status, body) = app
        .put(
            &uri,
            json!({"name": "Ana B", "email": "ana@x.com", "role": "admin"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"id": id, "name": "Ana B", "email": "ana@x.com", "role": "admin"})
    );
    assert_eq!(body["message"], "user updated successfully");

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Ana B");

    let (status, body) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Ana B");
    assert_eq!(body["message"], "user removed successfully");

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "user not found"}));
}

#[tokio::test]
async fn list_is_ordered_and_counted() {
    let app = spawn_app();
    for name in ["carl", "ana", "bea"] {
        let (status, _) = app
            .post(
                "/api/users",
                json!({"name": name, "email": format!("{name}@x.com"), "role": "user"}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get("/api/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 3);
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(body["data"][0]["name"], "carl");
}

#[tokio::test]
async fn empty_list_still_has_a_count() {
    let app = spawn_app();
    let (status, body) = app.get("/api/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": [], "count": 0}));
}

#[tokio::test]
async fn create_adds_exactly_one_row() {
    let app = spawn_app();
    app.post("/api/users", json!({"name": "Ana", "email": "ana@x.com"}))
        .await;
    let before = app.user_count().await;

    let (_, body) = app
        .post(
            "/api/users",
            json!({"name": "Bea", "email": "bea@x.com", "role": "admin"}),
        )
        .await;

    assert_eq!(app.user_count().await, before + 1);
    let id = body["data"]["id"].as_i64().unwrap();
    let (_, fetched) = app.get(&format!("/api/users/{id}")).await;
    assert_eq!(
        fetched["data"],
        json!({"id": id, "name": "Bea", "email": "bea@x.com", "role": "admin"})
    );
}

#[tokio::test]
async fn create_requires_name_and_email() {
    let app = spawn_app();
    let cases = [
        json!({"email": "ana@x.com"}),
        json!({"name": "Ana"}),
        json!({"name": "", "email": "ana@x.com"}),
        json!({"name": "Ana", "email": null}),
        json!({}),
    ];
    for payload in cases {
        let (status, body) = app.post("/api/users", payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(
            body,
            json!({"success": false, "error": "name and email are required"})
        );
    }
    assert_eq!(app.user_count().await, 0);
}

#[tokio::test]
async fn duplicate_email_is_rejected_with_its_own_message() {
    let app = spawn_app();
    app.post("/api/users", json!({"name": "Ana", "email": "ana@x.com"}))
        .await;

    let (status, body) = app
        .post("/api/users", json!({"name": "Other", "email": "ana@x.com"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "error": "email already registered"})
    );
    assert_eq!(app.user_count().await, 1);
}

#[tokio::test]
async fn missing_ids_are_not_found_and_change_nothing() {
    let app = spawn_app();
    app.post("/api/users", json!({"name": "Ana", "email": "ana@x.com"}))
        .await;
    let (_, before) = app.get("/api/users").await;

    let (status, _) = app.get("/api/users/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .put(
            "/api/users/99",
            json!({"name": "X", "email": "x@x.com", "role": "user"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = app.delete("/api/users/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user not found");

    let (_, after) = app.get("/api/users").await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn non_numeric_id_is_not_found() {
    let app = spawn_app();
    let (status, body) = app.get("/api/users/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn update_overwrites_every_field() {
    let app = spawn_app();
    let (_, created) = app
        .post(
            "/api/users",
            json!({"name": "Ana", "email": "ana@x.com", "role": "admin"}),
        )
        .await;
    let uri = format!("/api/users/{}", created["data"]["id"]);

    let (status, body) = app
        .put(&uri, json!({"name": "Ana", "email": "ana@x.com"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name and email are required");

    let (_, fetched) = app.get(&uri).await;
    assert_eq!(fetched["data"]["role"], "admin");
}

#[tokio::test]
async fn update_to_a_taken_email_is_a_conflict() {
    let app = spawn_app();
    app.post("/api/users", json!({"name": "Ana", "email": "ana@x.com"}))
        .await;
    let (_, bea) = app
        .post("/api/users", json!({"name": "Bea", "email": "bea@x.com"}))
        .await;

    let (status, body) = app
        .put(
            &format!("/api/users/{}", bea["data"]["id"]),
            json!({"name": "Bea", "email": "ana@x.com", "role": "user"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "email already registered");
}

#[tokio::test]
async fn malformed_json_gets_an_envelope() {
    let app = spawn_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": "invalid JSON body"}));
}

#[tokio::test]
async fn delete_shrinks_the_list_by_one() {
    let app = spawn_app();
    for name in ["ana", "bea"] {
        app.post(
            "/api/users",
            json!({"name": name, "email": format!("{name}@x.com")}),
        )
        .await;
    }

    let (status, _) = app.delete("/api/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.user_count().await, 1);
    let (status, _) = app.get("/api/users/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
