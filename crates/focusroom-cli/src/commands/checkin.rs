use clap::Subcommand;

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum CheckinAction {
    /// Today's allowance
    Status,
    /// Record a check-in
    Create,
}

pub fn run(ctx: &Context, action: CheckinAction) -> CmdResult {
    let tracker = ctx.tracker()?;

    match action {
        CheckinAction::Status => print_json(&tracker.can_check_in()?)?,
        CheckinAction::Create => print_json(&tracker.create_checkin()?)?,
    }
    Ok(())
}
