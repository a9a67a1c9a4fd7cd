//! Money formatting for naira amounts.
//!
//! Amounts are computed server-side and arrive as plain numbers; the
//! console only renders them. Two renderings exist: the full grouped form
//! for tables, and a compact `K`/`M`/`B` form for summary tiles.

const NAIRA: &str = "₦";

/// Full grouped rendering, e.g. `₦1,234,567` or `₦1,234.50`.
///
/// Missing values render as `₦0`. Fractional kobo show as two decimals only
/// when present.
pub fn format_money(value: Option<f64>) -> String {
    let Some(value) = value else {
        return format!("{NAIRA}0");
    };

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    let whole = magnitude.trunc();
    let fraction = magnitude - whole;

    let grouped = group_thousands(whole as u128);
    if fraction >= 0.005 {
        format!("{sign}{NAIRA}{grouped}.{:02}", (fraction * 100.0).round() as u8)
    } else {
        format!("{sign}{NAIRA}{grouped}")
    }
}

/// Compact rendering for summary tiles, e.g. `₦5.4M`.
///
/// Zero and missing values render as `₦0`.
pub fn format_compact_money(value: Option<f64>) -> String {
    let Some(value) = value else {
        return format!("{NAIRA}0");
    };
    if value == 0.0 {
        return format!("{NAIRA}0");
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    if magnitude >= 1_000_000_000.0 {
        format!("{sign}{NAIRA}{:.1}B", magnitude / 1_000_000_000.0)
    } else if magnitude >= 1_000_000.0 {
        format!("{sign}{NAIRA}{:.1}M", magnitude / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{sign}{NAIRA}{:.1}K", magnitude / 1_000.0)
    } else {
        format!("{sign}{NAIRA}{}", group_thousands(magnitude.trunc() as u128))
    }
}

fn group_thousands(mut value: u128) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut groups = Vec::new();
    while value > 0 {
        groups.push((value % 1_000) as u16);
        value /= 1_000;
    }
    let mut out = String::new();
    for (index, group) in groups.iter().rev().enumerate() {
        if index == 0 {
            out.push_str(&group.to_string());
        } else {
            out.push_str(&format!(",{group:03}"));
        }
    }
    out
}
