//! REST API tests driving the router with a mocked scoring client

mod helpers;

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use helpers::*;
use resolver::{MockScoringClient, ResolverError, StuffPlusResolver};
use serde_json::{Value, json};
use shared::{Pitch, PitchId, PredictResponse, ScreenshotScore, StoreEvent, StuffPlusResult, sample_pitches};
use tower::ServiceExt;
use webserver::{AppState, PitchStore, RealClientRegistry, build_router};

fn reference_form(name: &str) -> Value {
    json!({
        "name": name,
        "pitchType": "ff",
        "handedness": "R",
        "release_speed": "96",
        "pfx_x": "8",
        "pfx_z": "18",
        "release_extension": "6.2",
        "release_spin_rate": "2400",
        "spin_axis": "205",
        "release_pos_x": "-1.8",
        "release_pos_z": "5.9"
    })
}

#[tokio::test]
async fn test_create_and_list_with_fallback() {
    let state = test_state(failing_client());
    let router = build_router(state.clone());

    let (status, created) = send(&router, "POST", "/api/pitches", Some(reference_form("Wheeler FF"))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Wheeler FF");
    assert_eq!(created["pitchType"], "FF");
    assert_close(&created["stuffPlus"], 101.82);
    assert_close(&created["percentile"], 75.0);
    assert!(!created["id"].as_str().unwrap().is_empty());

    let (status, list) = send(&router, "GET", "/api/pitches", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().last(), Some(&created));
}

#[tokio::test]
async fn test_create_uses_remote_score() {
    let router = build_router(test_state(remote_client(111.0)));

    let (_, created) = send(&router, "POST", "/api/pitches", Some(reference_form("Skenes FF"))).await;

    assert_close(&created["stuffPlus"], 111.0);
    assert_close(&created["percentile"], 95.0);
}

#[tokio::test]
async fn test_create_applies_fastball_defaults() {
    let router = build_router(test_state(failing_client()));
    let form = json!({
        "pitchType": "FF",
        "release_speed": "95",
        "pfx_z": "17",
        "pfx_x": "6",
        "fb_velo": "",
        "release_spin_rate": "not a number"
    });

    let (status, created) = send(&router, "POST", "/api/pitches", Some(form)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_close(&created["fb_velo"], 95.0);
    assert_close(&created["fb_ivb"], 17.0);
    assert_close(&created["fb_hmov"], 6.0);
    assert_close(&created["release_spin_rate"], 0.0);
    assert_eq!(created["handedness"], "R");
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let router = build_router(test_state(failing_client()));

    let mut ids = Vec::new();
    for n in 0..5 {
        let (_, created) = send(&router, "POST", "/api/pitches", Some(reference_form(&format!("p{n}")))).await;
        ids.push(created["id"].as_str().unwrap().to_string());
    }

    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[tokio::test]
async fn test_update_rescores_in_place() {
    let state = test_state(failing_client());
    let router = build_router(state.clone());

    let (_, first) = send(&router, "POST", "/api/pitches", Some(reference_form("first"))).await;
    let (_, second) = send(&router, "POST", "/api/pitches", Some(reference_form("second"))).await;
    let id = first["id"].as_str().unwrap();

    let mut edit = reference_form("first, edited");
    edit["release_speed"] = json!("100");
    let (status, updated) = send(&router, "PUT", &format!("/api/pitches/{id}"), Some(edit)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], first["id"]);
    assert_eq!(updated["name"], "first, edited");
    assert_close(&updated["stuffPlus"], 102.82);

    let (_, list) = send(&router, "GET", "/api/pitches", None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0], updated);
    assert_eq!(list[1], second);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found_and_unscored() {
    let mut client = MockScoringClient::new();
    client.expect_predict().times(1).returning(|_| Err(ResolverError::Offline));
    let state = test_state(client);
    let router = build_router(state.clone());

    send(&router, "POST", "/api/pitches", Some(reference_form("only"))).await;
    let before = state.store.read().await.list();

    let (status, body) = send(&router, "PUT", "/api/pitches/does-not-exist", Some(reference_form("x"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("does-not-exist"));
    assert_eq!(state.store.read().await.list(), before);
}

#[tokio::test]
async fn test_update_of_pitch_removed_while_scoring_is_not_found() {
    let mut store = PitchStore::new();
    store.add(Pitch::new(
        PitchId::new("p1"),
        "doomed",
        sample_pitches().remove(0),
        StuffPlusResult { stuff_plus: 101.82, percentile: 75.0 },
    ));

    // Another request deletes the pitch while its new score is being resolved
    let shared_store: Arc<OnceLock<Arc<tokio::sync::RwLock<PitchStore>>>> = Arc::new(OnceLock::new());
    let mut client = MockScoringClient::new();
    let store_slot = shared_store.clone();
    client.expect_predict().times(1).returning(move |_| {
        let store = store_slot.get().expect("store registered");
        assert!(store.try_write().unwrap().remove(&PitchId::new("p1")));
        Ok(PredictResponse {
            stuff_plus: Some(105.0),
            percentile: None,
        })
    });

    let state = AppState::with_store(store, StuffPlusResolver::new(client), RealClientRegistry::new());
    shared_store.set(state.store.clone()).unwrap();
    let router = build_router(state.clone());

    let (status, body) = send(&router, "PUT", "/api/pitches/p1", Some(reference_form("edited"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("p1"));
    assert!(state.store.read().await.is_empty());
}

#[tokio::test]
async fn test_get_pitch_form_prefills_edit() {
    let router = build_router(test_state(failing_client()));
    let (_, created) = send(&router, "POST", "/api/pitches", Some(reference_form("Wheeler FF"))).await;
    let id = created["id"].as_str().unwrap();

    let (status, form) = send(&router, "GET", &format!("/api/pitches/{id}/form"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["name"], "Wheeler FF");
    assert_eq!(form["pitchType"], "FF");
    assert_eq!(form["release_speed"], "96");
    assert_eq!(form["release_pos_x"], "-1.8");

    // Resubmitting the prefilled form leaves the pitch as it was
    let (_, updated) = send(&router, "PUT", &format!("/api/pitches/{id}"), Some(form)).await;
    assert_eq!(updated, created);

    let (status, _) = send(&router, "GET", "/api/pitches/missing/form", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_pitch() {
    let router = build_router(test_state(failing_client()));
    let (_, created) = send(&router, "POST", "/api/pitches", Some(reference_form("lookup"))).await;
    let id = created["id"].as_str().unwrap();

    let (status, found) = send(&router, "GET", &format!("/api/pitches/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, created);

    let (status, _) = send(&router, "GET", "/api/pitches/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_and_clear() {
    let state = test_state(failing_client());
    let router = build_router(state.clone());

    let (_, first) = send(&router, "POST", "/api/pitches", Some(reference_form("a"))).await;
    send(&router, "POST", "/api/pitches", Some(reference_form("b"))).await;
    send(&router, "POST", "/api/pitches", Some(reference_form("c"))).await;

    let id = first["id"].as_str().unwrap();
    let (status, _) = send(&router, "DELETE", &format!("/api/pitches/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(!state.store.read().await.contains(&PitchId::new(id)));
    assert_eq!(state.store.read().await.len(), 2);

    let (status, _) = send(&router, "DELETE", "/api/pitches/unknown", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(state.store.read().await.len(), 2);

    let (status, _) = send(&router, "DELETE", "/api/pitches", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&router, "GET", "/api/pitches", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_add_samples() {
    let router = build_router(test_state(failing_client()));

    let (status, added) = send(&router, "POST", "/api/samples", None).await;

    assert_eq!(status, StatusCode::CREATED);
    let added = added.as_array().unwrap();
    let types: Vec<&str> = added.iter().map(|p| p["pitchType"].as_str().unwrap()).collect();
    assert_eq!(types, vec!["FF", "SL", "CH"]);
    assert_eq!(added[0]["name"], "Sample FF");
    assert_close(&added[0]["stuffPlus"], 101.82);

    let (_, list) = send(&router, "GET", "/api/pitches", None).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_status_and_health() {
    let router = build_router(test_state(failing_client()));
    send(&router, "POST", "/api/pitches", Some(reference_form("a"))).await;

    let (status, body) = send(&router, "GET", "/api/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["server_status"], "running");
    assert_eq!(body["pitch_count"], 1);
    assert_eq!(body["store_revision"], 1);
    assert_eq!(body["connected_clients"], 0);
    assert_eq!(body["scoring_endpoint"], "mock scoring");

    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_mutations_notify_subscribers() {
    let state = test_state(failing_client());
    let router = build_router(state.clone());
    let mut events = state.store.read().await.subscribe();

    let (_, created) = send(&router, "POST", "/api/pitches", Some(reference_form("watched"))).await;
    send(&router, "DELETE", "/api/pitches", None).await;

    match events.recv().await.unwrap() {
        StoreEvent::Added { revision, pitch } => {
            assert_eq!(revision, 1);
            assert_eq!(pitch.id.as_str(), created["id"].as_str().unwrap());
        }
        other => panic!("expected Added, got {other:?}"),
    }
    assert_eq!(events.recv().await.unwrap(), StoreEvent::Cleared { revision: 2 });
}

const BOUNDARY: &str = "stuffplus-test-boundary";

fn multipart_request(parts: &[(&str, Option<(&str, &str)>, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, file, value) in parts {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        match file {
            Some((file_name, content_type)) => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
                ));
                body.push_str(&format!("Content-Type: {content_type}\r\n\r\n"));
            }
            None => body.push_str(&format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")),
        }
        body.push_str(value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri("/api/screenshots")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_screenshot_upload_forwards_fields() {
    let mut client = MockScoringClient::new();
    client
        .expect_upload_screenshot()
        .withf(|upload| {
            upload.file_name == "trackman.png"
                && upload.content_type == "image/png"
                && upload.bytes == b"fake image".to_vec()
                && upload.pitch_type == "SL"
                && upload.handedness == shared::Handedness::L
                && upload.fb_velo == "94.5"
                && upload.fb_ivb.is_empty()
        })
        .times(1)
        .returning(|_| {
            Ok(ScreenshotScore {
                stuff_plus: Some(108.2),
                percentile: Some(79.0),
            })
        });
    let router = build_router(test_state(client));

    let request = multipart_request(&[
        ("pitchType", None, "sl"),
        ("handedness", None, "L"),
        ("fb_velo", None, "94.5"),
        ("file", Some(("trackman.png", "image/png")), "fake image"),
    ]);
    let (status, body) = read_response(router.oneshot(request).await.unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_close(&body["stuffPlus"], 108.2);
    assert_close(&body["percentile"], 79.0);
}

#[tokio::test]
async fn test_screenshot_upload_requires_file() {
    let mut client = MockScoringClient::new();
    client.expect_upload_screenshot().never();
    let router = build_router(test_state(client));

    let request = multipart_request(&[("pitchType", None, "FF")]);
    let (status, body) = read_response(router.oneshot(request).await.unwrap()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("screenshot"));
}

#[tokio::test]
async fn test_screenshot_remote_error_is_bad_gateway() {
    let mut client = MockScoringClient::new();
    client.expect_upload_screenshot().returning(|_| {
        Err(ResolverError::RemoteRejected {
            message: "Could not read pitch metrics".to_string(),
        })
    });
    let router = build_router(test_state(client));

    let request = multipart_request(&[("file", Some(("shot.jpg", "image/jpeg")), "jpeg")]);
    let (status, body) = read_response(router.oneshot(request).await.unwrap()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Could not read pitch metrics");
}

#[tokio::test]
async fn test_status_reports_registry_count() {
    let mut clients = webserver::MockClientRegistry::new();
    clients.expect_connection_count().times(1).return_const(3usize);
    let state = webserver::AppState::new(resolver::StuffPlusResolver::new(failing_client()), clients);
    let router = build_router(state);

    let (status, body) = send(&router, "GET", "/api/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connected_clients"], 3);
    assert_eq!(body["pitch_count"], 0);
}
