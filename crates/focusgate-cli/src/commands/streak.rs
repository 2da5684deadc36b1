use clap::Subcommand;
use focusgate_core::{Request, Response};

use super::CmdResult;

#[derive(Subcommand)]
pub enum StreakAction {
    /// Show the current streak
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the streak day-check once (the daemon does this hourly)
    Check,
    /// Break the streak (user override; does not change blocking)
    Break,
}

pub async fn run(action: StreakAction) -> CmdResult {
    let ctl = super::controller().await?;
    match action {
        StreakAction::Show { json } => {
            let state = ctl.state().await;
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "streakCount": state.streak_count,
                        "bestStreak": state.best_streak,
                        "lastFocusDate": state.last_focus_date,
                    })
                );
            } else {
                println!("streak {} (best {})", state.streak_count, state.best_streak);
            }
        }
        StreakAction::Check => {
            ctl.on_streak_timer().await;
            let state = ctl.state().await;
            println!("streak {}", state.streak_count);
        }
        StreakAction::Break => match ctl.handle(Request::BreakStreak).await {
            Response::Streak { streak_count } => {
                println!("streak {streak_count}");
            }
            other => return Err(format!("unexpected response: {other:?}").into()),
        },
    }
    Ok(())
}
