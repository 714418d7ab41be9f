//! Phone number formatting helpers

/// Characters users type between digits
const FORMATTING_CHARS: &[char] = &[' ', '-', '.', '(', ')', '/', '\t'];

/// Remove formatting characters, keeping digits, `+` and anything unexpected
///
/// Unexpected characters are kept so that later validation can reject them.
pub fn strip_formatting(phone: &str) -> String {
    phone
        .trim()
        .chars()
        .filter(|c| !FORMATTING_CHARS.contains(c))
        .collect()
}

/// Mask a phone number for logs, keeping only the last four digits
pub fn mask_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = digits[digits.len() - 4..].iter().collect();
    format!("***{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_formatting() {
        assert_eq!(strip_formatting("333 123-4567"), "3331234567");
        assert_eq!(strip_formatting(" +39 (333) 123.45.67 "), "+393331234567");
        assert_eq!(strip_formatting("0039/333/1234567"), "00393331234567");
        assert_eq!(strip_formatting("333abc"), "333abc");
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("+393331234567"), "***4567");
        assert_eq!(mask_phone("3331234567"), "***4567");
        assert_eq!(mask_phone("123"), "****");
    }
}
