//! Per-process request counters.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters owned by the server state. Every handled request bumps
/// `total` plus the counter of its route family; failures also bump
/// `rejected`.
#[derive(Debug, Default)]
pub struct RequestMetrics {
    total: AtomicU64,
    auto: AtomicU64,
    manual: AtomicU64,
    application: AtomicU64,
    rejected: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Auto,
    Manual,
    Application,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub total: u64,
    pub auto: u64,
    pub manual: u64,
    pub application: u64,
    pub rejected: u64,
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, kind: RequestKind) -> u64 {
        let counter = match kind {
            RequestKind::Auto => &self.auto,
            RequestKind::Manual => &self.manual,
            RequestKind::Application => &self.application,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.total.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total: self.total.load(Ordering::Relaxed),
            auto: self.auto.load(Ordering::Relaxed),
            manual: self.manual.load(Ordering::Relaxed),
            application: self.application.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }

    /// Plain-text exposition, one `name value` pair per line.
    pub fn render(&self) -> String {
        let s = self.snapshot();
        let mut out = String::new();
        for (name, value) in [
            ("roi_requests_total", s.total),
            ("roi_requests_auto_total", s.auto),
            ("roi_requests_manual_total", s.manual),
            ("roi_requests_application_total", s.application),
            ("roi_requests_rejected_total", s.rejected),
        ] {
            let _ = writeln!(out, "{name} {value}");
        }
        out
    }
}
