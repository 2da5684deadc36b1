use focusgate_core::{Request, Response};

use super::CmdResult;

pub async fn status(json: bool) -> CmdResult {
    let ctl = super::controller().await?;
    let state = ctl.state().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }
    println!("focus:     {}", if state.is_active { "on" } else { "off" });
    println!(
        "schedule:  {}-{} ({})",
        state.schedule.start,
        state.schedule.end,
        if state.schedule.enabled { "enabled" } else { "disabled" }
    );
    println!("blocking:  {}", if ctl.should_block_now().await { "active" } else { "inactive" });
    println!("streak:    {} (best {})", state.streak_count, state.best_streak);
    println!("sites:     {}", state.blocked_sites.join(", "));
    Ok(())
}

pub async fn toggle() -> CmdResult {
    let ctl = super::controller().await?;
    match ctl.handle(Request::ToggleFocus).await {
        Response::Toggled { is_active } => {
            println!("focus {}", if is_active { "on" } else { "off" });
            Ok(())
        }
        other => Err(format!("unexpected response: {other:?}").into()),
    }
}

pub async fn should_block() -> CmdResult {
    let ctl = super::controller().await?;
    match ctl.handle(Request::ShouldBlock).await {
        Response::ShouldBlock { should_block } => {
            println!("{should_block}");
            Ok(())
        }
        other => Err(format!("unexpected response: {other:?}").into()),
    }
}
