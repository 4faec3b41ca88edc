use crate::models::LeaveReason;

/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Colour used when printing a leave day in the monthly list.
pub fn color_for_reason(reason: LeaveReason) -> &'static str {
    match reason {
        LeaveReason::Vacation => GREEN,
        LeaveReason::Sick => YELLOW,
        LeaveReason::Other => MAGENTA,
    }
}
