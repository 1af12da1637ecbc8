use crate::domain::ports::View;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// 依序跑完一個視角的三個階段，並把終端摘要印出來
pub struct ViewEngine<V: View> {
    view: V,
    monitor: SystemMonitor,
}

impl<V: View> ViewEngine<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(view: V, monitor_enabled: bool) -> Self {
        Self {
            view,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Extracting keyword data...");
        let records = self.view.extract().await?;
        self.monitor.log_stats("extract");

        tracing::info!("🔧 Composing report...");
        let report = self.view.compose(records).await?;
        self.monitor.log_stats("compose");

        for line in &report.headline {
            println!("{}", line);
        }

        tracing::info!("💾 Publishing report...");
        let output_path = self.view.publish(&report).await?;
        self.monitor.log_stats("publish");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
