//! ticketscope RPC server: JSON-RPC over stdin/stdout for a native-messaging host.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"tickets.search", "params":{"since":"today","phrase":"printer"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! `tickets.search` requests are debounced and run concurrently with the
//! read loop; only the latest one is answered with results, earlier ones get
//! `{"superseded": true}`.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use ticketscope::app::App;
use ticketscope::rpc_handler::{handle_method, handle_search_async};

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn db_path() -> std::path::PathBuf {
    match std::env::var("TICKETSCOPE_DATA_DIR") {
        Ok(dir) => std::path::PathBuf::from(dir).join("ticketscope.db"),
        Err(_) => App::default_db_path(),
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let path = db_path();
    let app = match App::open_local(&path, None) {
        Ok(app) => Arc::new(Mutex::new(app)),
        Err(e) => {
            log::error!("failed to initialize ticketscope at {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel::<Value>();
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(message) = rx.recv().await {
            let line = format!("{}\n", message);
            if stdout.write_all(line.as_bytes()).await.is_err() || stdout.flush().await.is_err() {
                break;
            }
        }
    });

    // Signal ready
    let _ = tx.send(json!({"event":"ready","version":env!("CARGO_PKG_VERSION")}));

    let mut rate_limiter = RateLimiter::new(200);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                log::warn!("stdin read failed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let _ = tx.send(json!({"id":null,"error":format!("parse error: {}",e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            let _ = tx.send(json!({"id": id, "error": "rate limit exceeded"}));
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("").to_string();
        let params = req.get("params").cloned().unwrap_or(json!({}));
        log::debug!("rpc {} (id {})", method, id);

        if method == "tickets.search" {
            let app = Arc::clone(&app);
            let tx = tx.clone();
            tokio::spawn(async move {
                let response = match handle_search_async(&app, &params).await {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => json!({"id": id, "error": err}),
                };
                let _ = tx.send(response);
            });
            continue;
        }

        let response = match handle_method(&app, &method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        let _ = tx.send(response);
    }

    // In-flight searches hold their own senders; the writer ends once they finish.
    drop(tx);
    let _ = writer.await;
}
