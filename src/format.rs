//! Number and currency formatting for KPI cards, tooltips and axis ticks.
//!
//! All output is fixed to the Italian locale: `.` groups thousands and `,`
//! separates decimals, except for the scaled-suffix currency policy which keeps
//! a `.` decimal point before the K/M/B suffix. Rounding is always
//! half-away-from-zero (`f64::round`), never the ties-to-even behaviour of
//! `format!`.
use num_format::{Locale, ToFormattedString};

/// Separator between amount and currency sign in the fixed policy.
const NBSP: char = '\u{a0}';

/// How a dashboard renders monetary amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyPolicy {
    /// Magnitude abbreviated with one decimal: `€ 1.5B`, `€ 2.3M`, `€ 4.1K`.
    /// Below one thousand the plain grouped integer is used: `€ 999`.
    ScaledSuffix,
    /// Locale currency string with no fraction digits: `2.500.000.000 €`.
    Fixed,
}

impl CurrencyPolicy {
    pub fn format_currency(&self, n: f64) -> String {
        let n = finite(n);
        match self {
            CurrencyPolicy::ScaledSuffix => {
                // a band holds what still reads below 1000 once rounded, and
                // applies to the magnitude so negative amounts scale too
                let abs = n.abs();
                if abs.round() < 1_000.0 {
                    format!("€ {}", format_int(n))
                } else if round_to(abs / 1_000.0, 1) < 1_000.0 {
                    scaled(n, 1_000.0, 'K')
                } else if round_to(abs / 1_000_000.0, 1) < 1_000.0 {
                    scaled(n, 1_000_000.0, 'M')
                } else {
                    scaled(n, 1_000_000_000.0, 'B')
                }
            }
            CurrencyPolicy::Fixed => format!("{}{}€", format_int(n), NBSP),
        }
    }
}

fn scaled(n: f64, div: f64, suffix: char) -> String {
    format!("€ {:.1}{}", round_to(n / div, 1), suffix)
}

/// Format a value as an Italian locale number with up to three fraction
/// digits, trailing zeros dropped (`1500` -> `1.500`, `12.5` -> `12,5`).
pub fn format_number(n: f64) -> String {
    let n = finite(n);
    let thousandths = (n.abs() * 1000.0).round();
    let int_part = (thousandths / 1000.0).trunc();
    let frac = (thousandths - int_part * 1000.0) as u32;

    let mut res = (int_part as i64).to_formatted_string(&Locale::it);
    if frac > 0 {
        let digits = format!("{:03}", frac);
        res.push(',');
        res.push_str(digits.trim_end_matches('0'));
    }
    if n < 0.0 && thousandths > 0.0 {
        format!("-{}", res)
    } else {
        res
    }
}

/// Percentage with exactly one decimal and no sign, e.g. `33.3`.
pub fn format_percentage(p: f64) -> String {
    format!("{:.1}", round_to(finite(p), 1))
}

/// Rounded grouped integer, e.g. `-1.235` for `-1234.5`.
pub fn format_int(n: f64) -> String {
    let rounded = finite(n).round() as i64;
    rounded.to_formatted_string(&Locale::it)
}

fn round_to(n: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let v = (n * factor).round() / factor;
    // avoid printing `-0.0`
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

fn finite(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}
