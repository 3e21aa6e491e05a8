/// Turns a camelCase or PascalCase identifier into a display label.
///
/// A space goes in front of every ASCII uppercase letter that starts a new
/// word, unless whitespace already precedes it. A run of capitals such as
/// `ID` stays together as one word, and it splits again only where a
/// capital is followed by a lowercase letter (`XMLParser` -> `XML Parser`).
/// The first character is then uppercased and the result trimmed. Nothing
/// else changes case.
///
/// ```
/// use dash_shape::humanize;
///
/// assert_eq!(humanize("firstName"), "First Name");
/// assert_eq!(humanize("userID"), "User ID");
/// ```
pub fn humanize(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut spaced = String::with_capacity(input.len() + chars.len() / 2);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() && starts_word(chars[i - 1], chars.get(i + 1)) {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    capitalize_first(&spaced).trim().to_string()
}

fn starts_word(prev: char, next: Option<&char>) -> bool {
    if prev.is_whitespace() {
        return false;
    }
    // 連續大寫視為同一個字，直到下一個字元是小寫
    !prev.is_ascii_uppercase() || next.is_some_and(|n| n.is_lowercase())
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(humanize("firstName"), "First Name");
        assert_eq!(humanize("totalRevenueThisMonth"), "Total Revenue This Month");
    }

    #[test]
    fn test_single_word_and_empty() {
        assert_eq!(humanize("id"), "Id");
        assert_eq!(humanize(""), "");
        assert_eq!(humanize("   "), "");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(humanize("PascalCase"), "Pascal Case");
        assert_eq!(humanize("Completed"), "Completed");
    }

    #[test]
    fn test_acronyms_stay_together() {
        assert_eq!(humanize("userID"), "User ID");
        assert_eq!(humanize("XMLParser"), "XML Parser");
        assert_eq!(humanize("avgOrderUSD"), "Avg Order USD");
    }

    #[test]
    fn test_existing_whitespace_is_not_doubled() {
        assert_eq!(humanize("already Spaced"), "Already Spaced");
        assert_eq!(humanize("two Words here"), "Two Words here");
    }

    #[test]
    fn test_non_letters_pass_through() {
        assert_eq!(humanize("snake_case"), "Snake_case");
        assert_eq!(humanize("top10Products"), "Top10 Products");
        assert_eq!(humanize("payment.failed"), "Payment.failed");
    }

    #[test]
    fn test_capitalizes_before_trimming() {
        // 先大寫第一個字元再 trim，開頭是空白時不會大寫字母
        assert_eq!(humanize(" leadingSpace"), "leading Space");
    }

    #[test]
    fn test_unicode_first_letter() {
        assert_eq!(humanize("émailAddress"), "Émail Address");
    }
}
