use std::str::FromStr;
use std::time::Duration;

const TOO_LARGE: &str = "Duration too large";

/// Durations such as `30m`, `1h15m30s` or bare seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3_600),
        'd' => Some(86_400),
        _ => None,
    }
}

fn add_term(total: u64, digits: &str, scale: u64) -> Result<u64, String> {
    // only digits reach here, so a parse failure means the value overflowed
    digits
        .parse::<u64>()
        .ok()
        .and_then(|value| value.checked_mul(scale))
        .and_then(|seconds| total.checked_add(seconds))
        .ok_or_else(|| TOO_LARGE.to_string())
}

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut terms = 0usize;
        let mut digits = String::new();

        for c in s.trim().chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if c.is_whitespace() {
                if !digits.is_empty() {
                    return Err(format!("Missing unit after {}", digits));
                }
            } else {
                let scale = unit_seconds(c).ok_or_else(|| format!("Invalid duration unit: {}", c))?;
                if digits.is_empty() {
                    return Err(format!("Missing number before unit: {}", c));
                }
                total_seconds = add_term(total_seconds, &digits, scale)?;
                digits.clear();
                terms += 1;
            }
        }

        // A trailing number without a unit counts as seconds
        if !digits.is_empty() {
            total_seconds = add_term(total_seconds, &digits, 1)?;
            terms += 1;
        }

        if terms == 0 {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}
