use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Start importing data ...");

        // Extract
        let rows = self.pipeline.extract().await?;
        tracing::info!("Extracted {} catalog rows", rows.len());
        self.monitor.log_stats("Extract", rows.len());

        // Transform
        let transformed = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Parsed dimensions for {} objects",
            transformed.objects.len()
        );
        self.monitor.log_stats("Transform", transformed.objects.len());

        // Load
        let imported = transformed.objects.len();
        let output_path = self.pipeline.load(transformed).await?;
        self.monitor.log_stats("Load", imported);

        tracing::info!("Import finished.");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
