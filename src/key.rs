//! Compound key names for indexed statistics.
//!
//! Multi-dimensional statistics (per-channel, per-rank, per-bank counters)
//! are labeled by appending bracketed coordinates to a base name, producing
//! field names like `Latency[2][1]` that feed straight into the writer's
//! header-capture pass.
//!
//! Key length is checked against a fixed budget instead of the rendered
//! length: every subscript reserves 4 bytes (a one-to-two digit index plus
//! brackets), so the check does not depend on the coordinate values.

use std::process;

use log::error;

use crate::error::KeyError;

/// Maximum total length of a compound key, base name plus all subscripts.
pub const MAX_KEY_LEN: usize = 64;

/// Bytes reserved per subscript: a two digit index plus brackets, `[xx]`.
const SUBSCRIPT_RESERVE: usize = 4;

/// Build a compound key, failing on budget violation.
///
/// Renders `base` followed by one `[index]` group per coordinate, each index
/// as an unpadded decimal. Fails with [`KeyError::TooLong`] when
/// `base.len() + 4 * indices.len()` exceeds [`MAX_KEY_LEN`]; the key is never
/// truncated. One to three coordinates is the intended range.
///
/// # Examples
///
/// ```
/// use statline::key::try_compound_key;
///
/// assert_eq!(try_compound_key("Latency", &[2]).unwrap(), "Latency[2]");
/// assert!(try_compound_key(&"x".repeat(80), &[0]).is_err());
/// ```
pub fn try_compound_key(base: &str, indices: &[u32]) -> Result<String, KeyError> {
    let needed = base.len() + SUBSCRIPT_RESERVE * indices.len();
    if needed > MAX_KEY_LEN {
        return Err(KeyError::TooLong {
            base: base.to_string(),
            needed,
            max: MAX_KEY_LEN,
        });
    }

    let mut key = String::with_capacity(needed);
    key.push_str(base);
    for index in indices {
        key.push_str(&format!("[{}]", index));
    }
    Ok(key)
}

/// Build a compound key, aborting the process on budget violation.
///
/// An over-budget base name is a programming error in the embedding code,
/// not a runtime condition: the violation is logged and the process aborts.
/// Callers that want to recover instead should use [`try_compound_key`].
///
/// # Examples
///
/// ```
/// use statline::key::compound_key;
///
/// assert_eq!(compound_key("Latency", &[2]), "Latency[2]");
/// assert_eq!(compound_key("Latency", &[2, 1]), "Latency[2][1]");
/// assert_eq!(compound_key("Latency", &[2, 1, 0]), "Latency[2][1][0]");
/// ```
pub fn compound_key(base: &str, indices: &[u32]) -> String {
    match try_compound_key(base, indices) {
        Ok(key) => key,
        Err(err) => {
            error!("{}", err);
            process::abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_index() {
        assert_eq!(compound_key("Latency", &[2]), "Latency[2]");
    }

    #[test]
    fn test_two_indices() {
        assert_eq!(compound_key("Latency", &[2, 1]), "Latency[2][1]");
    }

    #[test]
    fn test_three_indices() {
        assert_eq!(compound_key("Latency", &[2, 1, 0]), "Latency[2][1][0]");
    }

    #[test]
    fn test_wide_index_renders_unpadded() {
        // The budget check reserves 4 bytes per subscript, but rendering is
        // exact: a five digit index is not truncated or padded.
        assert_eq!(compound_key("Reads", &[12345]), "Reads[12345]");
    }

    #[test]
    fn test_budget_boundary() {
        // 60 + 4 == MAX_KEY_LEN exactly: allowed.
        let base = "b".repeat(60);
        assert_eq!(try_compound_key(&base, &[7]).unwrap(), format!("{}[7]", base));

        // One more byte of base name crosses the budget.
        let base = "b".repeat(61);
        assert_eq!(
            try_compound_key(&base, &[7]),
            Err(KeyError::TooLong {
                base: base.clone(),
                needed: 65,
                max: MAX_KEY_LEN,
            })
        );
    }

    #[test]
    fn test_budget_counts_every_subscript() {
        // 54 + 3 * 4 = 66 > 64, even though the rendered key would be
        // 54 + 9 = 63 bytes: the reservation is what is checked.
        let base = "b".repeat(54);
        assert!(try_compound_key(&base, &[0, 1, 2]).is_err());
        assert!(try_compound_key(&base, &[0, 1]).is_ok());
    }
}
