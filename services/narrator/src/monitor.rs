//! Usage monitoring for the narration upstream
//!
//! The monitor is constructed and started explicitly by whoever owns the
//! client; there is no process-global instance.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Request/failure counters shared between client and monitor
#[derive(Debug, Default)]
pub struct UsageCounters {
    requests: AtomicU64,
    failures: AtomicU64,
}

impl UsageCounters {
    /// Count one upstream call attempt
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one failed upstream call
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Total call attempts so far
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Total failed calls so far
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Failure ratio over all requests so far; zero when idle
    #[allow(clippy::cast_precision_loss)]
    pub fn failure_ratio(&self) -> f64 {
        let requests = self.requests();
        if requests == 0 {
            0.0
        } else {
            self.failures() as f64 / requests as f64
        }
    }
}

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertLevel {
    /// Informational status
    Info,
    /// Failure ratio worth attention
    Warning,
    /// Failure ratio requiring action
    Critical,
}

/// Events broadcast by the monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NarratorEvent {
    /// Periodic usage snapshot
    Usage {
        /// Total call attempts
        requests: u64,
        /// Total failed calls
        failures: u64,
    },
    /// Failure ratio crossed a threshold
    Alert {
        /// Severity of the alert
        level: AlertLevel,
        /// Human-readable alert message
        message: String,
    },
}

/// Monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between usage snapshots
    pub interval_secs: u64,
    /// Failure ratio that raises a Warning
    pub warn_failure_ratio: f64,
    /// Failure ratio that raises a Critical alert
    pub critical_failure_ratio: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            warn_failure_ratio: 0.1,
            critical_failure_ratio: 0.5,
        }
    }
}

/// Interval-driven usage monitor with an explicit lifecycle
pub struct UsageMonitor {
    counters: Arc<UsageCounters>,
    config: MonitorConfig,
    events: broadcast::Sender<NarratorEvent>,
    handle: Option<JoinHandle<()>>,
}

impl UsageMonitor {
    /// Create a monitor over a shared counter set
    #[must_use]
    pub fn new(counters: Arc<UsageCounters>, config: MonitorConfig) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            counters,
            config,
            events,
            handle: None,
        }
    }

    /// Subscribe to usage snapshots and alerts
    pub fn subscribe(&self) -> broadcast::Receiver<NarratorEvent> {
        self.events.subscribe()
    }

    /// Spawn the interval task; a second call replaces the previous task.
    pub fn start(&mut self) {
        self.stop();
        let counters = Arc::clone(&self.counters);
        let config = self.config.clone();
        let events = self.events.clone();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(config.interval_secs));
            loop {
                interval.tick().await;

                let requests = counters.requests();
                let failures = counters.failures();
                info!("narrator usage: {} requests, {} failures", requests, failures);
                // Ignore send errors; subscribers may have gone away
                drop(events.send(NarratorEvent::Usage { requests, failures }));

                let ratio = counters.failure_ratio();
                if requests > 0 && ratio >= config.critical_failure_ratio {
                    warn!("narrator failure ratio at {:.0}%", ratio * 100.0);
                    drop(events.send(NarratorEvent::Alert {
                        level: AlertLevel::Critical,
                        message: format!("{:.0}% of narration calls failing", ratio * 100.0),
                    }));
                } else if requests > 0 && ratio >= config.warn_failure_ratio {
                    drop(events.send(NarratorEvent::Alert {
                        level: AlertLevel::Warning,
                        message: format!("{:.0}% of narration calls failing", ratio * 100.0),
                    }));
                }
            }
        }));
    }

    /// Abort the interval task; safe to call when not started.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether the interval task is currently alive
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_ratio() {
        let counters = UsageCounters::default();
        assert_eq!(counters.failure_ratio(), 0.0);

        for _ in 0..4 {
            counters.record_request();
        }
        counters.record_failure();
        counters.record_failure();
        assert_eq!(counters.failure_ratio(), 0.5);
    }

    #[tokio::test]
    async fn test_monitor_lifecycle() {
        let counters = Arc::new(UsageCounters::default());
        let mut monitor = UsageMonitor::new(
            Arc::clone(&counters),
            MonitorConfig { interval_secs: 3600, ..MonitorConfig::default() },
        );
        assert!(!monitor.is_running());

        let mut events = monitor.subscribe();
        monitor.start();
        assert!(monitor.is_running());

        // The first interval tick fires immediately with a usage snapshot
        let event = tokio::time::timeout(Duration::from_secs(1), events.recv())
            .await
            .expect("snapshot within a second")
            .expect("channel open");
        assert!(matches!(event, NarratorEvent::Usage { requests: 0, failures: 0 }));

        monitor.stop();
        assert!(!monitor.is_running());
    }

    #[tokio::test]
    async fn test_monitor_emits_critical_alert() {
        let counters = Arc::new(UsageCounters::default());
        counters.record_request();
        counters.record_request();
        counters.record_failure();
        counters.record_failure();

        let mut monitor = UsageMonitor::new(
            Arc::clone(&counters),
            MonitorConfig { interval_secs: 3600, ..MonitorConfig::default() },
        );
        let mut events = monitor.subscribe();
        monitor.start();

        // Usage snapshot first, then the alert for a 100% failure ratio
        let mut saw_critical = false;
        for _ in 0..2 {
            let event = tokio::time::timeout(Duration::from_secs(1), events.recv())
                .await
                .expect("event within a second")
                .expect("channel open");
            if let NarratorEvent::Alert { level, .. } = event {
                assert_eq!(level, AlertLevel::Critical);
                saw_critical = true;
            }
        }
        assert!(saw_critical);

        monitor.stop();
    }
}
