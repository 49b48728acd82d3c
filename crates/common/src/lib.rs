//! Shared pieces used by the binaries and the HTTP layer: log setup and
//! small response types that do not belong to any domain.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serializes_camel_case() {
        let h = types::Health::ok(12.5);
        let v = serde_json::to_value(&h).unwrap();
        assert_eq!(v["status"], "ok");
        assert_eq!(v["uptime"], 12.5);
        assert!(v["timeStamp"].is_string());
    }

    #[test]
    fn banner_reports_running() {
        let b = types::ServiceBanner::new("SyntaxWear E-commerce API is running!", "1.0.0");
        assert_eq!(b.status, "running");
    }
}
