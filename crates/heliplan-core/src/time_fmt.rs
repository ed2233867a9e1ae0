// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

/// Renders decimal hours as zero-padded `HH:MM`.
///
/// Minutes are truncated, never rounded: 1.999 h is `01:59`. Negative or
/// non-finite input renders as `00:00`.
pub fn format_hhmm(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 {
        return "00:00".to_string();
    }
    let whole = hours.floor();
    let minutes = ((hours - whole) * 60.0).floor();
    format!("{:02}:{:02}", whole as u64, minutes as u64)
}
