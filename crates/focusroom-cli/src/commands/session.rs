use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Subcommand;
use focusroom_core::timer::DEFAULT_TICK_INTERVAL;
use focusroom_core::{
    format_countdown, format_duration_label, Clock, CountdownTimer, RecoveryStatus, SessionId,
    SessionType, SystemClock, Ticker, TimerEvent,
};
use serde_json::json;

use super::{parse_duration_arg, parse_session_type, print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Start a timed session
    Start {
        /// focus, break or cooloff
        #[arg(long = "type", value_parser = parse_session_type, default_value = "focus")]
        session_type: SessionType,
        /// Planned length, e.g. "25:00" or "1:30:00"
        #[arg(long, value_parser = parse_duration_arg)]
        duration: u64,
    },
    /// Mark a session as finished
    Complete { id: String },
    /// Delete a session that never really started
    Cancel { id: String },
    /// Stop early: keeps elapsed time, or deletes the session if none
    Stop {
        id: String,
        /// Seconds actually spent
        #[arg(long)]
        elapsed: u64,
    },
    /// Acknowledge an exceeded session
    Dismiss { id: String },
    /// Reconcile the running or overrun session
    Recover,
    /// Follow the running session until it reaches zero, then complete it
    Watch,
    /// Record time without running a timer
    Manual {
        #[arg(long = "type", value_parser = parse_session_type, default_value = "focus")]
        session_type: SessionType,
        #[arg(long, value_parser = parse_duration_arg)]
        duration: u64,
    },
}

pub fn run(ctx: &Context, action: SessionAction) -> CmdResult {
    let tracker = ctx.tracker()?;

    match action {
        SessionAction::Start {
            session_type,
            duration,
        } => {
            let started = tracker.start_session(session_type, duration)?;
            print_json(&json!({
                "id": started.id,
                "startTime": started.start_time,
                "type": session_type,
                "duration": duration,
                "label": format_duration_label(duration),
            }))?;
        }
        SessionAction::Complete { id } => {
            tracker.complete_session(&SessionId::from(id))?;
            println!("ok");
        }
        SessionAction::Cancel { id } => {
            tracker.cancel_session(&SessionId::from(id))?;
            println!("ok");
        }
        SessionAction::Stop { id, elapsed } => {
            let outcome = tracker.stop_session(&SessionId::from(id), elapsed)?;
            print_json(&outcome)?;
        }
        SessionAction::Dismiss { id } => {
            tracker.dismiss_session(&SessionId::from(id))?;
            println!("ok");
        }
        SessionAction::Recover => {
            let status = tracker.check_recovery()?;
            print_json(&status)?;
        }
        SessionAction::Watch => {
            let (remaining, session) = match tracker.check_recovery()? {
                RecoveryStatus::Resume { remaining, session } => (remaining, session),
                other => return print_json(&other),
            };
            let tick = Duration::from_millis(ctx.config().timer.tick_interval_ms.max(100));
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let event = runtime.block_on(watch(
                session.session_type,
                remaining,
                session.duration,
                session.id.clone(),
                session.start_time,
                tick,
            ));
            if let Some(TimerEvent::Completed { session_id, .. }) = &event {
                tracker.complete_session(session_id)?;
            }
            print_json(&event)?;
        }
        SessionAction::Manual {
            session_type,
            duration,
        } => {
            let session = tracker.add_manual_time(session_type, duration as i64)?;
            print_json(&session)?;
        }
    }
    Ok(())
}

/// Print the countdown to stderr until it reaches zero.
async fn watch(
    mode: SessionType,
    remaining: u64,
    total: u64,
    session_id: SessionId,
    start_time: chrono::DateTime<chrono::Utc>,
    tick: Duration,
) -> Option<TimerEvent> {
    let mut timer = CountdownTimer::new();
    timer.resume(mode, remaining, total, session_id, start_time);
    let timer = Arc::new(Mutex::new(timer));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let (tx, mut rx) = tokio::sync::oneshot::channel();
    let ticker = Ticker::spawn(timer.clone(), clock, tick, move |event| {
        let _ = tx.send(event);
    });

    let event = loop {
        tokio::select! {
            done = &mut rx => break done.ok(),
            _ = tokio::time::sleep(DEFAULT_TICK_INTERVAL) => {
                let left = timer.lock().map(|t| t.remaining_seconds()).unwrap_or(0);
                eprint!("\r{mode} {}", format_countdown(left));
            }
        }
    };
    eprintln!();
    ticker.stop();
    event
}
