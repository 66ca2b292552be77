use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&self) -> Result<String> {
        tracing::info!("Starting passport batch...");

        // Sample
        let records = self.pipeline.sample()?;
        tracing::info!("Sampled {} identity records", records.len());
        self.monitor.log_stats("Sample");

        // Encode
        let result = self.pipeline.encode(records)?;
        tracing::info!("Encoded {} MRZ records", result.ground_truth.len());
        self.monitor.log_stats("Encode");

        // Load
        let output_path = self.pipeline.load(result)?;
        tracing::info!("Ground truth saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
