use clap::Subcommand;
use focusgate_core::{Schedule, StatePatch};

use super::CmdResult;

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show the focus schedule
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the daily focus window (zero-padded 24h HH:MM)
    Set {
        /// Window start, e.g. "09:00"
        start: String,
        /// Window end (inclusive), e.g. "17:00"
        end: String,
    },
    /// Enable schedule-driven blocking
    Enable,
    /// Disable schedule-driven blocking
    Disable,
}

pub async fn run(action: ScheduleAction) -> CmdResult {
    let ctl = super::controller().await?;
    match action {
        ScheduleAction::Show { json } => {
            let schedule = ctl.state().await.schedule;
            if json {
                println!("{}", serde_json::to_string_pretty(&schedule)?);
            } else {
                println!(
                    "{}-{} ({})",
                    schedule.start,
                    schedule.end,
                    if schedule.enabled { "enabled" } else { "disabled" }
                );
            }
        }
        ScheduleAction::Set { start, end } => {
            let enabled = ctl.state().await.schedule.enabled;
            apply(&ctl, Schedule { start, end, enabled }).await?;
            println!("ok");
        }
        ScheduleAction::Enable => {
            let mut schedule = ctl.state().await.schedule;
            schedule.enabled = true;
            apply(&ctl, schedule).await?;
            println!("schedule enabled");
        }
        ScheduleAction::Disable => {
            let mut schedule = ctl.state().await.schedule;
            schedule.enabled = false;
            apply(&ctl, schedule).await?;
            println!("schedule disabled");
        }
    }
    Ok(())
}

async fn apply(ctl: &super::Controller, schedule: Schedule) -> CmdResult {
    ctl.update_settings(StatePatch {
        schedule: Some(schedule),
        ..Default::default()
    })
    .await?;
    Ok(())
}
