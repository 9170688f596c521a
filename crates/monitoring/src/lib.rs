//! Neo Monitoring and Observability
//!
//! Health checks, performance tracking, Prometheus/JSON/CSV metrics export
//! and threshold-based alerting for a running node. This crate is ambient
//! infrastructure: the ledger and network layers emit `tracing` events and
//! gauge updates that this crate aggregates and reports; it carries no
//! protocol-consensus logic of its own.

pub mod alerting;
pub mod error;
pub mod exporters;
pub mod health;
pub mod performance;
pub mod production_monitoring;
pub mod system_monitoring;

// Prometheus gauge registry and system-resource sampling.
pub mod advanced_metrics;
pub mod metrics;

pub use error::{MonitoringError, Result};

pub use health::{
    BlockchainHealthCheck, HealthCheck, HealthCheckResult, HealthMonitor, HealthReport,
    HealthStatus, MemoryHealthCheck, NetworkHealthCheck, StorageHealthCheck,
};

pub use performance::{
    MetricStatistics, PerformanceAlert, PerformanceMetric, PerformanceMonitor, PerformanceSample,
    PerformanceThreshold, Profiler, ThresholdType,
};

pub use exporters::{
    CsvExporter, ExporterFactory, JsonExporter, MetricsExporter, OpenTelemetryExporter,
    PrometheusExporter, StatusReport,
};

pub use alerting::{
    Alert, AlertLevel, AlertManager, AlertRule, AlertStats, AlertThreshold, LogChannel,
    NotificationChannel, ThresholdOperator, WebhookChannel,
};

use std::sync::Arc;

/// Wires up a `HealthMonitor` and `PerformanceMonitor` with the checks and
/// metrics a running node reports by default.
pub async fn init_monitoring(version: String) -> Result<MonitoringSystem> {
    metrics::init_metrics().map_err(MonitoringError::from)?;

    let health_monitor = Arc::new(HealthMonitor::new(version));

    health_monitor
        .register_check(Arc::new(BlockchainHealthCheck::new(100)))
        .await;
    health_monitor
        .register_check(Arc::new(NetworkHealthCheck::new(3)))
        .await;
    health_monitor
        .register_check(Arc::new(StorageHealthCheck::new(1_000_000_000))) // 1GB
        .await;
    health_monitor
        .register_check(Arc::new(MemoryHealthCheck::new(4_000_000_000))) // 4GB
        .await;

    let performance_monitor = Arc::new(PerformanceMonitor::new());

    performance_monitor
        .register_metric("block_processing".to_string(), 1000)
        .await;
    performance_monitor
        .register_metric("tx_validation".to_string(), 1000)
        .await;
    performance_monitor
        .register_metric("vm_execution".to_string(), 1000)
        .await;

    performance_monitor
        .set_threshold(PerformanceThreshold {
            metric: "block_processing".to_string(),
            warning: 1.0,  // 1 second
            critical: 5.0, // 5 seconds
            threshold_type: ThresholdType::Max,
        })
        .await;

    performance_monitor
        .set_threshold(PerformanceThreshold {
            metric: "tx_validation".to_string(),
            warning: 0.1,  // 100ms
            critical: 0.5, // 500ms
            threshold_type: ThresholdType::Max,
        })
        .await;

    Ok(MonitoringSystem {
        health_monitor,
        performance_monitor,
    })
}

/// Combines health and performance monitoring behind one handle.
pub struct MonitoringSystem {
    pub health_monitor: Arc<HealthMonitor>,
    pub performance_monitor: Arc<PerformanceMonitor>,
}

impl MonitoringSystem {
    /// Spawns the background task that samples process memory/CPU into the
    /// performance monitor every 10 seconds.
    pub fn start_background_tasks(&self) {
        let performance = self.performance_monitor.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(10));

            loop {
                interval.tick().await;

                metrics::update_system_metrics();

                let memory = metrics::MEMORY_USAGE.get() as f64;
                let _ = performance.record("memory_usage", memory).await;

                let cpu = metrics::CPU_USAGE.get();
                let _ = performance.record("cpu_usage", cpu).await;
            }
        });
    }

    pub async fn get_status(&self) -> Result<StatusReport> {
        let health = self.health_monitor.check_health().await?;
        let performance = self.performance_monitor.get_all_stats().await;
        let metrics = metrics::get_metrics();

        Ok(StatusReport {
            health,
            performance,
            metrics,
        })
    }

    pub async fn export(&self, format: &str) -> Result<String> {
        let report = self.get_status().await?;

        let exporter = ExporterFactory::create(format)
            .ok_or_else(|| MonitoringError::InvalidInput(format!("unsupported export format: {format}")))?;

        exporter.export(&report)
    }
}
