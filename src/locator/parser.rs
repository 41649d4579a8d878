use crate::locator::strategy::{LocatorError, LocatorStrategy, UnsupportedKind};

/// Parse a locator string into a strategy.
///
/// Forms are tried in priority order: `=content`, `left >> right`,
/// the `@` family, then a bare horizontal label.
pub fn parse_locator(locator: &str) -> Result<LocatorStrategy, LocatorError> {
    let input = locator.trim();

    if let Some(value) = input.strip_prefix('=') {
        return Ok(LocatorStrategy::Content {
            value: value.trim().to_string(),
        });
    }

    if let Some((left, right)) = input.split_once(">>") {
        let (left, right) = (left.trim(), right.trim());
        if left.is_empty() || right.is_empty() {
            return Err(parse_error(input, "both sides of '>>' must be non-empty"));
        }
        return Ok(LocatorStrategy::HLabelHLabel {
            left_label: left.to_string(),
            right_label: right.to_string(),
        });
    }

    if let Some((left, right)) = input.split_once('@') {
        return parse_at(input, left.trim(), right.trim());
    }

    if input.is_empty() {
        return Err(parse_error(input, "empty locator"));
    }

    Ok(LocatorStrategy::HLabel {
        label: input.to_string(),
    })
}

fn parse_at(input: &str, left: &str, right: &str) -> Result<LocatorStrategy, LocatorError> {
    match (left.is_empty(), right.is_empty()) {
        (true, false) => Ok(LocatorStrategy::VLabel {
            label: right.to_string(),
        }),
        (false, false) => match (is_index(left), is_index(right)) {
            (false, false) => Ok(LocatorStrategy::HLabelVLabel {
                h_label: strip_quotes(left).to_string(),
                v_label: strip_quotes(right).to_string(),
            }),
            (true, false) => Err(unsupported(input, UnsupportedKind::HIndexVLabel)),
            (false, true) => Err(unsupported(input, UnsupportedKind::HLabelVIndex)),
            (true, true) => Err(parse_error(input, "both sides of '@' are indexes")),
        },
        _ => Err(parse_error(input, "'@' needs a label on its right side")),
    }
}

/// Non-empty and all numeric characters, in any script.
fn is_index(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_numeric)
}

/// Quoting lets a numeric label avoid being read as an index.
fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

fn parse_error(input: &str, reason: &str) -> LocatorError {
    LocatorError::Parse {
        locator: input.to_string(),
        reason: reason.to_string(),
    }
}

fn unsupported(input: &str, kind: UnsupportedKind) -> LocatorError {
    LocatorError::Unsupported {
        locator: input.to_string(),
        kind,
    }
}
