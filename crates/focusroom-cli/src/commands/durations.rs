use clap::Subcommand;
use focusroom_core::{format_countdown, format_duration_label, parse_duration, SessionType};
use serde_json::json;

use super::{parse_session_type, print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum DurationsAction {
    /// Recently used custom durations
    Recent,
    /// Presets followed by recent durations
    Quick {
        #[arg(long = "type", value_parser = parse_session_type, default_value = "focus")]
        session_type: SessionType,
    },
    /// Parse a "[[h:]m:]s" string
    Parse { text: String },
}

pub fn run(ctx: &Context, action: DurationsAction) -> CmdResult {
    match action {
        DurationsAction::Recent => print_json(&ctx.tracker()?.recent_durations()?),
        DurationsAction::Quick { session_type } => {
            print_json(&ctx.tracker()?.quick_select(session_type)?)
        }
        DurationsAction::Parse { text } => {
            let seconds =
                parse_duration(&text).ok_or_else(|| format!("invalid duration '{text}'"))?;
            print_json(&json!({
                "seconds": seconds,
                "label": format_duration_label(seconds),
                "countdown": format_countdown(seconds),
            }))
        }
    }
}
