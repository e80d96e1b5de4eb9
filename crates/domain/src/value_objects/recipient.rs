//! Recipient identifier helpers

/// Mask a recipient identifier for logging, keeping only the last four
/// characters. Identifiers are personal data and never logged in full.
#[must_use]
pub fn mask_recipient(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() > 4 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("***{tail}")
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_identifier_keeps_last_four() {
        assert_eq!(mask_recipient("+491234567890"), "***7890");
    }

    #[test]
    fn short_identifier_is_fully_masked() {
        assert_eq!(mask_recipient("123"), "****");
        assert_eq!(mask_recipient(""), "****");
    }
}
