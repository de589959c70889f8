use crate::{models::DiagnosticsResponse, AppState};
use axum::{extract::State, Json};
use std::sync::Arc;
use std::sync::{Mutex, OnceLock};
use sysinfo::System;
use tracing::info;

static SYSTEM_MONITOR: OnceLock<Mutex<System>> = OnceLock::new();

/// Live service counters plus process CPU and memory usage
pub async fn diagnostics(State(app_state): State<Arc<AppState>>) -> Json<DiagnosticsResponse> {
    let n_conn = app_state.sessions.connection_count().await as u32;
    let n_sessions = app_state.sessions.active_sessions() as u32;
    let n_pads = app_state.store.len() as u32;
    let n_snapshots = app_state.store.snapshot_total() as u32;

    // System stats
    let (cpu_usage, memory_alloc, memory_free, memory_total) = {
        let sys_lock = SYSTEM_MONITOR.get_or_init(|| {
            Mutex::new(System::new_all())
        });
        match sys_lock.lock() {
            Ok(mut sys) => {
                sys.refresh_cpu();
                sys.refresh_memory();
                (
                    sys.global_cpu_info().cpu_usage(),
                    sys.used_memory(),
                    sys.free_memory(),
                    sys.total_memory(),
                )
            }
            Err(_) => (0.0, 0, 0, 0)
        }
    };

    info!(
        "Diagnostics: CPU: {:.2}%, Mem: {}/{} MB (Free: {} MB), Conn: {}, Sessions: {}",
        cpu_usage,
        memory_alloc / 1024 / 1024,
        memory_total / 1024 / 1024,
        memory_free / 1024 / 1024,
        n_conn,
        n_sessions
    );

    Json(DiagnosticsResponse {
        n_conn,
        n_sessions,
        n_pads,
        n_snapshots,
        cpu_usage,
        memory_alloc,
        memory_total,
        memory_free,
    })
}
