use crate::config::KernelConfig;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

#[derive(Debug, Serialize, Deserialize)]
pub struct KernelHealth {
    pub uptime_seconds: u64,
    pub started_at: String,
    pub memory_usage_mb: f32,
    pub types: Vec<TypeHealth>,
}

/// État du dossier d'un type (le montage réseau peut disparaître)
#[derive(Debug, Serialize, Deserialize)]
pub struct TypeHealth {
    pub id: String,
    pub folder: String,
    pub reachable: bool,
}

#[derive(Clone)]
pub struct HealthTracker {
    start_time: Instant,
    started_at: OffsetDateTime,
}

impl HealthTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            started_at: OffsetDateTime::now_utc(),
        }
    }

    pub async fn get_health(&self, config: &KernelConfig) -> KernelHealth {
        let mut types = Vec::with_capacity(config.types.len());
        for ty in config.types.values() {
            let reachable = tokio::fs::metadata(config.folder_of(ty))
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false);
            types.push(TypeHealth { id: ty.id.clone(), folder: ty.folder.clone(), reachable });
        }

        KernelHealth {
            uptime_seconds: self.start_time.elapsed().as_secs(),
            started_at: self.started_at.format(&Rfc3339).unwrap_or_default(),
            memory_usage_mb: get_memory_usage_mb(),
            types,
        }
    }
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn get_memory_usage_mb() -> f32 {
    #[cfg(target_os = "linux")]
    {
        if let Ok(status) = std::fs::read_to_string("/proc/self/status") {
            let rss_kb = status
                .lines()
                .find(|l| l.starts_with("VmRSS:"))
                .and_then(|l| l.split_whitespace().nth(1))
                .and_then(|kb| kb.parse::<u64>().ok());
            if let Some(kb) = rss_kb {
                return kb as f32 / 1024.0; // KB -> MB
            }
        }
    }

    // inconnu hors Linux
    0.0
}
