use clap::Subcommand;
use focusroom_core::SettingsPatch;

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,
    /// Allow the bonus interval to change
    Unlock,
    /// Freeze the bonus interval again
    Lock,
    /// Minutes of focus per bonus check-in (settings must be unlocked)
    SetInterval { minutes: u32 },
}

pub fn run(ctx: &Context, action: SettingsAction) -> CmdResult {
    let tracker = ctx.tracker()?;

    let settings = match action {
        SettingsAction::Show => tracker.settings()?,
        SettingsAction::Unlock => tracker.unlock_settings()?,
        SettingsAction::Lock => tracker.lock_settings()?,
        SettingsAction::SetInterval { minutes } => tracker.update_settings(SettingsPatch {
            checkin_bonus_interval: Some(minutes),
            ..SettingsPatch::default()
        })?,
    };
    print_json(&settings)
}
