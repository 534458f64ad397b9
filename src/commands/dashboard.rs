use anyhow::Result;
use clap::Args;

use crate::ui::Dashboard;

#[derive(Args)]
pub struct DashboardCommand {
    /// Sign straight in with the demo patient account
    #[arg(long)]
    demo: bool,
}

impl DashboardCommand {
    pub async fn execute(self) -> Result<()> {
        let mut dashboard = Dashboard::new(self.demo)?;
        let result = dashboard.run();
        dashboard.cleanup()?;
        result
    }
}
