use clap::Subcommand;
use focusroom_core::{format_hours_minutes, StatsSummary};
use serde_json::{json, Value};

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's stats
    Today,
    /// Yesterday's stats
    Yesterday,
    /// This week so far
    Week,
    /// The four weeks before this one
    History,
    /// Every window at once
    All,
}

/// Summary JSON plus display strings.
fn with_display(summary: &StatsSummary) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(summary)?;
    if let Value::Object(map) = &mut value {
        map.insert("focus".into(), json!(format_hours_minutes(summary.focus_seconds)));
        map.insert(
            "dailyAverageFocus".into(),
            json!(format_hours_minutes(summary.daily_average_focus_seconds())),
        );
    }
    Ok(value)
}

pub fn run(ctx: &Context, action: StatsAction) -> CmdResult {
    let tracker = ctx.tracker()?;

    match action {
        StatsAction::Today => print_json(&with_display(&tracker.today_stats()?)?)?,
        StatsAction::Yesterday => print_json(&with_display(&tracker.yesterday_stats()?)?)?,
        StatsAction::Week => print_json(&with_display(&tracker.this_week_stats()?)?)?,
        StatsAction::History => print_json(&tracker.last_4_weeks_stats()?)?,
        StatsAction::All => print_json(&tracker.stats_overview()?)?,
    }
    Ok(())
}
