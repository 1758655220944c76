use std::time::Duration;

/// Side effects requested by the reducer and carried out by the run loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScheduleFocus(Duration),
    ReloadConfig,
}
