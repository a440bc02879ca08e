//! REST API handlers
//!
//! Pitch CRUD backed by the shared store, plus screenshot scoring and status.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};

use resolver::{ScoringClient, ScreenshotUpload};
use shared::{
    Handedness, Pitch, PitchForm, PitchId, PitchInput, ScreenshotScore, ServiceId, sample_pitches, service_info,
};

use crate::error::{WebServerError, WebServerResult};
use crate::state::AppState;
use crate::traits::ClientRegistry;
use crate::types::StatusResponse;

/// Liveness probe - /health
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Server status - /api/status
pub async fn get_status<C, R>(State(state): State<AppState<C, R>>) -> Json<StatusResponse>
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    let (pitch_count, store_revision) = {
        let store = state.store.read().await;
        (store.len(), store.revision())
    };

    Json(StatusResponse {
        server_status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        pitch_count,
        store_revision,
        connected_clients: state.clients.connection_count().await,
        scoring_endpoint: state.resolver.describe(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// List pitches in insertion order - GET /api/pitches
pub async fn list_pitches<C, R>(State(state): State<AppState<C, R>>) -> Json<Vec<Pitch>>
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    Json(state.store.read().await.list())
}

/// Single pitch - GET /api/pitches/:id
pub async fn get_pitch<C, R>(
    State(state): State<AppState<C, R>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<Pitch>>
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    let store = state.store.read().await;
    store
        .get(&PitchId::new(id.clone()))
        .cloned()
        .map(Json)
        .ok_or(WebServerError::PitchNotFound { id })
}

/// Stored pitch as editable form text - GET /api/pitches/:id/form
pub async fn get_pitch_form<C, R>(
    State(state): State<AppState<C, R>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<PitchForm>>
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    let store = state.store.read().await;
    store
        .get(&PitchId::new(id.clone()))
        .map(|pitch| Json(PitchForm::from_input(pitch.name.clone(), &pitch.input)))
        .ok_or(WebServerError::PitchNotFound { id })
}

/// Score a submitted form and append it - POST /api/pitches
///
/// Scoring and the store write run on a spawned task, so a client that hangs
/// up mid-request only stops waiting: the pitch is still scored and stored.
pub async fn create_pitch<C, R>(
    State(state): State<AppState<C, R>>,
    Json(form): Json<PitchForm>,
) -> WebServerResult<(StatusCode, Json<Pitch>)>
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    let task_state = state.clone();
    let pitch = tokio::spawn(async move {
        let input = form.normalize();
        let pitch = score_pitch(&task_state, task_state.ids.next_id(), form.name, input).await;
        task_state.store.write().await.add(pitch.clone());
        pitch
    })
    .await?;

    Ok((StatusCode::CREATED, Json(pitch)))
}

/// Re-score an edited form and replace the stored pitch - PUT /api/pitches/:id
pub async fn update_pitch<C, R>(
    State(state): State<AppState<C, R>>,
    Path(id): Path<String>,
    Json(form): Json<PitchForm>,
) -> WebServerResult<Json<Pitch>>
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    let pitch_id = PitchId::new(id.clone());
    if !state.store.read().await.contains(&pitch_id) {
        return Err(WebServerError::PitchNotFound { id });
    }

    // The store lock is not held across the remote call
    let task_state = state.clone();
    let updated = tokio::spawn(async move {
        let input = form.normalize();
        let pitch = score_pitch(&task_state, pitch_id.clone(), form.name, input).await;
        let replaced = task_state.store.write().await.update(&pitch_id, pitch.clone());
        replaced.then_some(pitch)
    })
    .await?;

    // None when the pitch was removed while the score was being resolved
    updated.map(Json).ok_or(WebServerError::PitchNotFound { id })
}

/// Remove one pitch - DELETE /api/pitches/:id
pub async fn delete_pitch<C, R>(State(state): State<AppState<C, R>>, Path(id): Path<String>) -> StatusCode
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    state.store.write().await.remove(&PitchId::new(id));
    StatusCode::NO_CONTENT
}

/// Remove every pitch - DELETE /api/pitches
pub async fn clear_pitches<C, R>(State(state): State<AppState<C, R>>) -> StatusCode
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    state.store.write().await.clear();
    service_info!(ServiceId::current(), "🧹 Pitch list cleared");
    StatusCode::NO_CONTENT
}

/// Score and append the built-in sample pitches - POST /api/samples
pub async fn add_samples<C, R>(State(state): State<AppState<C, R>>) -> WebServerResult<(StatusCode, Json<Vec<Pitch>>)>
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    let task_state = state.clone();
    let added = tokio::spawn(async move {
        let mut added = Vec::new();
        for input in sample_pitches() {
            let name = format!("Sample {}", input.pitch_type);
            added.push(score_pitch(&task_state, task_state.ids.next_id(), name, input).await);
        }

        let mut store = task_state.store.write().await;
        for pitch in &added {
            store.add(pitch.clone());
        }
        added
    })
    .await?;

    Ok((StatusCode::CREATED, Json(added)))
}

/// Forward a Trackman screenshot to the remote scorer - POST /api/screenshots
///
/// Multipart fields: `file`, `pitchType`, `handedness`, `fb_velo`, `fb_ivb`, `fb_hmov`.
pub async fn upload_screenshot<C, R>(
    State(state): State<AppState<C, R>>,
    multipart: Multipart,
) -> WebServerResult<Json<ScreenshotScore>>
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    let upload = read_screenshot_form(multipart).await?;
    let score = state.resolver.score_screenshot(upload).await?;
    Ok(Json(score))
}

async fn score_pitch<C, R>(state: &AppState<C, R>, id: PitchId, name: String, input: PitchInput) -> Pitch
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    let resolution = state.resolver.resolve_detailed(&input).await;
    service_info!(
        ServiceId::current(),
        pitch_id = %id,
        source = resolution.source(),
        "⚾ Scored {} at {:.1} Stuff+",
        input.pitch_type,
        resolution.result().stuff_plus
    );
    Pitch::new(id, name, input, resolution.into_result())
}

async fn read_screenshot_form(mut multipart: Multipart) -> WebServerResult<ScreenshotUpload> {
    let invalid = |details: String| WebServerError::InvalidRequest { details };

    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut pitch_type = "FF".to_string();
    let mut handedness = Handedness::R;
    let mut fastball = [String::new(), String::new(), String::new()];

    while let Some(field) = multipart.next_field().await.map_err(|e| invalid(e.to_string()))? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("screenshot.jpg").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| invalid(e.to_string()))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            "pitchType" => pitch_type = field.text().await.map_err(|e| invalid(e.to_string()))?,
            "handedness" => {
                handedness = Handedness::from_text(&field.text().await.map_err(|e| invalid(e.to_string()))?)
            }
            "fb_velo" => fastball[0] = field.text().await.map_err(|e| invalid(e.to_string()))?,
            "fb_ivb" => fastball[1] = field.text().await.map_err(|e| invalid(e.to_string()))?,
            "fb_hmov" => fastball[2] = field.text().await.map_err(|e| invalid(e.to_string()))?,
            _ => {}
        }
    }

    let Some((file_name, content_type, bytes)) = file else {
        return Err(invalid("Please select a screenshot first.".to_string()));
    };

    let [fb_velo, fb_ivb, fb_hmov] = fastball;
    let mut upload = ScreenshotUpload::new(file_name, bytes)
        .with_pitch(pitch_type, handedness)
        .with_fastball(fb_velo, fb_ivb, fb_hmov);
    if let Some(content_type) = content_type {
        upload = upload.with_content_type(content_type);
    }
    Ok(upload)
}
