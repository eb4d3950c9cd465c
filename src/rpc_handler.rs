//! RPC method handler for the ticketscope JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so every method can be unit-tested.
//! `handle_method` dispatches synchronously; `handle_search_async` is the
//! debounced, last-write-wins path the server uses for `tickets.search`.

use std::sync::Mutex;
use std::time::Duration;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::history_manager::{HistoryManagerTrait, SqliteHistoryStore};
use crate::services::query_builder::build;
use crate::services::renderer::{relative_time, result_count_label};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::ticket_search::{SearchOutcome, SearchRequest, TicketResults};
use crate::types::errors::HistoryError;
use crate::types::settings::UserSettings;
use crate::types::time_filter::{Resolution, TimeFilter};

/// Reference time for a request: `params.now` (epoch ms) or the clock.
fn now_param(params: &Value) -> i64 {
    params
        .get("now")
        .and_then(|v| v.as_i64())
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis())
}

/// Builds a search request from saved settings, overridden by `since` and
/// `phrase` params when present.
fn request_from_params(settings: &UserSettings, params: &Value) -> SearchRequest {
    let phrase = params.get("phrase").and_then(|v| v.as_str());
    let mut request = SearchRequest::from_settings(settings, phrase);
    if let Some(since) = params.get("since").and_then(|v| v.as_str()) {
        request.filter = TimeFilter::parse(since);
    }
    request
}

/// The writable local store, or the read-only error for browser sources.
fn local_store(app: &App) -> Result<&SqliteHistoryStore, String> {
    app.local_history
        .as_deref()
        .ok_or_else(|| HistoryError::ReadOnly.to_string())
}

fn unrecognized_json(resolution: &Resolution) -> Value {
    match resolution {
        Resolution::Unrecognized(raw) => json!(raw),
        Resolution::Bounded(_) => Value::Null,
    }
}

/// JSON form of a completed search.
pub fn results_json(results: &TicketResults, now_ms: i64) -> Value {
    let items: Vec<Value> = results
        .rows
        .iter()
        .map(|row| {
            let mut item = serde_json::to_value(row).unwrap_or_else(|_| json!({}));
            if let Value::Object(map) = &mut item {
                map.insert(
                    "lastVisited".to_string(),
                    json!(relative_time(row.entry.last_visit_time, now_ms)),
                );
            }
            item
        })
        .collect();

    json!({
        "count": results.count(),
        "label": result_count_label(results.count()),
        "query": results.query.query,
        "unbounded": results.query.is_unbounded(),
        "unrecognized": unrecognized_json(&results.query.resolution),
        "items": items,
    })
}

/// JSON form of a debounced search outcome.
pub fn outcome_json(outcome: &SearchOutcome, now_ms: i64) -> Value {
    match outcome {
        SearchOutcome::Completed(results) => results_json(results, now_ms),
        SearchOutcome::Superseded => json!({"superseded": true}),
    }
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Tickets ───
        "tickets.query" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let request = request_from_params(a.settings_engine.get(), params);
            let query = build(&request.filter, now_param(params), request.week_start)
                .map_err(|e| e.to_string())?;
            Ok(json!({
                "query": query.query,
                "unbounded": query.is_unbounded(),
                "unrecognized": unrecognized_json(&query.resolution),
            }))
        }
        "tickets.search" => {
            let now = now_param(params);
            let a = app.lock().map_err(|e| e.to_string())?;
            let request = request_from_params(a.settings_engine.get(), params);
            let results = a.search.execute(&request, now).map_err(|e| e.to_string())?;
            Ok(results_json(&results, now))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            if let Some(settings) = params.get("settings") {
                let settings: UserSettings =
                    serde_json::from_value(settings.clone()).map_err(|e| format!("invalid settings: {}", e))?;
                a.settings_engine.set(settings).map_err(|e| e.to_string())?;
            } else {
                let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
                let value = params.get("value").cloned().ok_or("missing value")?;
                a.settings_engine.set_value(key, value).map_err(|e| e.to_string())?;
            }
            let debounce = Duration::from_millis(a.settings_engine.get().debounce_ms);
            a.search = a.search.clone().with_debounce(debounce);
            serde_json::to_value(a.settings_engine.get()).map_err(|e| e.to_string())
        }
        "settings.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.reset().map_err(|e| e.to_string())?;
            let debounce = Duration::from_millis(a.settings_engine.get().debounce_ms);
            a.search = a.search.clone().with_debounce(debounce);
            serde_json::to_value(a.settings_engine.get()).map_err(|e| e.to_string())
        }

        // ─── History ───
        "history.record" => {
            let url = params.get("url").and_then(|v| v.as_str()).ok_or("missing url")?;
            let title = params.get("title").and_then(|v| v.as_str()).ok_or("missing title")?;
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("invalid url: must start with http:// or https://".to_string());
            }
            let visit_time = params.get("visitTime").and_then(|v| v.as_i64());
            let a = app.lock().map_err(|e| e.to_string())?;
            let id = local_store(&a)?
                .with_manager(|mgr| match visit_time {
                    Some(at) => mgr.record_visit_at(url, title, at),
                    None => mgr.record_visit(url, title),
                })
                .map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }
        "history.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let entries = local_store(&a)?
                .with_manager(|mgr| mgr.list_history())
                .map_err(|e| e.to_string())?;
            serde_json::to_value(entries).map_err(|e| e.to_string())
        }
        "history.delete" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            local_store(&a)?
                .with_manager(|mgr| mgr.delete_entry(id))
                .map_err(|e| e.to_string())?;
            Ok(json!({"deleted": true}))
        }
        "history.clear" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            local_store(&a)?
                .with_manager(|mgr| mgr.clear_all())
                .map_err(|e| e.to_string())?;
            Ok(json!({"cleared": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

/// Debounced `tickets.search`. A request overtaken by a newer one resolves
/// to `{"superseded": true}`.
pub async fn handle_search_async(app: &Mutex<App>, params: &Value) -> Result<Value, String> {
    let now = now_param(params);
    let (search, request) = {
        let a = app.lock().map_err(|e| e.to_string())?;
        (a.search.clone(), request_from_params(a.settings_engine.get(), params))
    };
    let outcome = search.submit(request, now).await.map_err(|e| e.to_string())?;
    Ok(outcome_json(&outcome, now))
}
