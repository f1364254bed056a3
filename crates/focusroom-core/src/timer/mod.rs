mod engine;
mod ticker;

pub use engine::{CountdownTimer, TimerEvent, TimerState};
pub use ticker::{Ticker, DEFAULT_TICK_INTERVAL};
