//! Availability gating over wall-clock "HH:MM" windows.

use super::profile::ActiveHours;

/// Supplies the current wall-clock time as zero-padded "HH:MM".
pub trait Clock: Send + Sync {
    fn now_hhmm(&self) -> String;
}

/// Local-time clock for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_hhmm(&self) -> String {
        chrono::Local::now().format("%H:%M").to_string()
    }
}

/// Fixed clock for tests.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now_hhmm(&self) -> String {
        self.0.clone()
    }
}

/// True when `now` falls inside the window, comparing zero-padded "HH:MM"
/// strings lexicographically (`start <= now <= end`).
///
/// Windows that cross midnight (`start > end`) cannot be expressed with
/// this comparison: they evaluate inactive for the whole night. That
/// limitation is flagged with a warning instead of being silently
/// rewritten.
pub fn is_active(now: &str, hours: &ActiveHours) -> bool {
    if hours.is_overnight() {
        tracing::warn!(
            start = %hours.start,
            end = %hours.end,
            "ventana nocturna no soportada; el asistente queda inactivo"
        );
        return false;
    }
    hours.start.as_str() <= now && now <= hours.end.as_str()
}
