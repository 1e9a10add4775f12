//! Length range argument

use anyhow::{anyhow, Result};

/// Parse `"min-max"` or a single length into an inclusive range
pub fn parse_range(text: &str) -> Result<(usize, usize)> {
    let text = text.trim();
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| anyhow!("Invalid length range '{}': expected 'min-max' or a number", text))
    };

    match text.split_once('-') {
        Some((min, max)) => Ok((parse(min)?, parse(max)?)),
        None => {
            let length = parse(text)?;
            Ok((length, length))
        }
    }
}
