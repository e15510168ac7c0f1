#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid numeric token `{0}`")]
pub struct InvalidNumber(pub String);

/// Parses a lab value token. Commas are accepted only as digit-group
/// separators: the leading group has 1-3 digits, every following group has
/// 2 (lakh style) or 3 digits. Anything else, a decimal comma included, is
/// rejected rather than guessed.
pub fn parse_number(token: &str) -> Result<f64, InvalidNumber> {
    let token = token.trim();
    let (integer, fraction) = match token.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (token, None),
    };

    if integer.contains(',') {
        let mut groups = integer.split(',');
        let head = groups.next().unwrap_or_default();
        if head.is_empty() || head.len() > 3 {
            return Err(InvalidNumber(token.to_string()));
        }
        for group in groups {
            if !(group.len() == 2 || group.len() == 3) {
                return Err(InvalidNumber(token.to_string()));
            }
        }
    }

    let digits: String = integer.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(InvalidNumber(token.to_string()));
    }
    let normalized = match fraction {
        Some(f) if f.is_empty() || !f.chars().all(|c| c.is_ascii_digit()) => {
            return Err(InvalidNumber(token.to_string()));
        }
        Some(f) => format!("{digits}.{f}"),
        None => digits,
    };

    let value = normalized
        .parse::<f64>()
        .map_err(|_| InvalidNumber(token.to_string()))?;
    if !value.is_finite() {
        return Err(InvalidNumber(token.to_string()));
    }
    Ok(value)
}

pub fn parse_integer(token: &str) -> Result<u32, InvalidNumber> {
    token
        .trim()
        .parse::<u32>()
        .map_err(|_| InvalidNumber(token.to_string()))
}

#[cfg(test)]
#[path = "../../tests/src_inline/rules/number.rs"]
mod tests;
