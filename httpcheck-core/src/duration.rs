//! Duration notation.
//!
//! Probe latencies are printed, and flag values are parsed, in the
//! compact `1h2m3.5s` / `250ms` / `850µs` notation familiar from Go
//! tooling. Downstream parsers of the output stream rely on this exact
//! rendering.

use std::time::Duration;

use crate::error::CoreError;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

// ============================================================================
// Formatting
// ============================================================================

/// Formats a duration as `1h2m3.5s`, `1.5s`, `123.456ms`, `850µs` or `12ns`.
///
/// Sub-second values use the largest unit that keeps the integer part
/// non-zero; trailing fractional zeros are trimmed. Zero is `0s`.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();

    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", fixed_point(nanos, NANOS_PER_MICRO, 3));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", fixed_point(nanos, NANOS_PER_MILLI, 6));
    }

    let hours = nanos / NANOS_PER_HOUR;
    let minutes = (nanos % NANOS_PER_HOUR) / NANOS_PER_MIN;
    let seconds = fixed_point(nanos % NANOS_PER_MIN, NANOS_PER_SEC, 9);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Renders `value / unit` with up to `digits` fractional digits, trimmed.
fn fixed_point(value: u128, unit: u128, digits: usize) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:0digits$}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses a duration such as `30s`, `1m30s`, `1.5h`, `250ms` or `0`.
///
/// Accepted units are `ns`, `us` (also `µs`), `ms`, `s`, `m` and `h`.
/// Every number needs a unit except a lone `0`. Negative durations are
/// rejected.
pub fn parse_duration(input: &str) -> Result<Duration, CoreError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(CoreError::invalid_duration(input, "empty"));
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.starts_with('-') {
        return Err(CoreError::invalid_duration(input, "negative"));
    }

    let mut rest = s.strip_prefix('+').unwrap_or(s);
    let mut total: u128 = 0;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(CoreError::invalid_duration(input, "expected a number"));
        }
        let (number, tail) = rest.split_at(number_len);

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);

        let unit_nanos = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SEC,
            "m" => NANOS_PER_MIN,
            "h" => NANOS_PER_HOUR,
            "" => return Err(CoreError::invalid_duration(input, "missing unit")),
            _ => return Err(CoreError::invalid_duration(input, "unknown unit")),
        };

        let value = scaled(number, unit_nanos)
            .ok_or_else(|| CoreError::invalid_duration(input, "malformed number"))?;
        total = total
            .checked_add(value)
            .ok_or_else(|| CoreError::invalid_duration(input, "overflow"))?;
        rest = next;
    }

    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| CoreError::invalid_duration(input, "overflow"))
}

/// Converts a decimal `number` of `unit_nanos`-sized units into nanoseconds.
/// Fractional digits finer than one nanosecond are truncated.
fn scaled(number: &str, unit_nanos: u128) -> Option<u128> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut value = whole.checked_mul(unit_nanos)?;

    let mut scale = unit_nanos;
    for digit in frac.bytes() {
        scale /= 10;
        if scale == 0 {
            break;
        }
        value = value.checked_add(u128::from(digit - b'0') * scale)?;
    }
    Some(value)
}
