// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

const SIGNIFICANT_DIGITS: i32 = 6;

/// Formats a number with up to 6 significant digits, dropping trailing zeros.
pub fn format_number(x: f64) -> String {
    if x == 0.0 || !x.is_finite() {
        return format!("{}", x);
    }

    let magnitude = x.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - magnitude).max(0) as usize;
    let s = format!("{:.*}", decimals, x);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
