use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::formulas::Formula;
use crate::state::{new_state, Shared};

#[derive(Debug, Serialize, Deserialize)]
pub struct KernelHealth {
    pub uptime_seconds: u64,
    pub started_at: String,
    pub requests_total: u64,
    pub requests_failed: u64,
    pub memory_usage_mb: f32,
    pub calculations: BTreeMap<String, u64>, // "CalcularTensao" -> nb de succès
}

/// Compteurs de santé du kernel. Aucune entrée ni résultat n'est conservé.
#[derive(Clone)]
pub struct HealthTracker {
    start_time: Instant,
    started_at: OffsetDateTime,
    requests_total: Arc<AtomicU64>,
    requests_failed: Arc<AtomicU64>,
    calculations: Shared<HashMap<Formula, u64>>,
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            started_at: OffsetDateTime::now_utc(),
            requests_total: Arc::new(AtomicU64::new(0)),
            requests_failed: Arc::new(AtomicU64::new(0)),
            calculations: new_state(HashMap::new()),
        }
    }

    pub fn record_success(&self, formula: Formula) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        *self.calculations.lock().entry(formula).or_insert(0) += 1;
    }

    pub fn record_failure(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_health(&self) -> KernelHealth {
        let calculations = self
            .calculations
            .lock()
            .iter()
            .map(|(formula, count)| (formula.name().to_string(), *count))
            .collect();

        KernelHealth {
            uptime_seconds: self.start_time.elapsed().as_secs(),
            started_at: self.started_at.format(&Rfc3339).unwrap_or_default(),
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            memory_usage_mb: get_memory_usage_mb(),
            calculations,
        }
    }
}

fn get_memory_usage_mb() -> f32 {
    #[cfg(target_os = "linux")]
    {
        // VmRSS en kB dans /proc/self/status
        if let Ok(status) = std::fs::read_to_string("/proc/self/status") {
            let rss_kb = status
                .lines()
                .find(|line| line.starts_with("VmRSS:"))
                .and_then(|line| line.split_whitespace().nth(1))
                .and_then(|kb| kb.parse::<u64>().ok());
            if let Some(kb) = rss_kb {
                return kb as f32 / 1024.0;
            }
        }
    }

    0.0
}
