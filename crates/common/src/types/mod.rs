use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness payload served at `/health`.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: String,
    /// seconds since the process started serving
    pub uptime: f64,
    pub time_stamp: DateTime<Utc>,
}

impl Health {
    pub fn ok(uptime: f64) -> Self {
        Self { status: "ok".into(), uptime, time_stamp: Utc::now() }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ServiceBanner {
    pub message: String,
    pub version: String,
    pub status: String,
}

impl ServiceBanner {
    pub fn new(message: &str, version: &str) -> Self {
        Self { message: message.into(), version: version.into(), status: "running".into() }
    }
}
