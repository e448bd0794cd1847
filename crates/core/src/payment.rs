//! Payment input formatting.
//!
//! The card number is kept as raw digits and only grouped for display.

/// Maximum number of card digits.
pub const CARD_DIGITS: usize = 16;

/// Glyph used for digits not entered yet in the card preview.
pub const MASK_GLYPH: char = '•';

/// Accept a card number entry: whitespace is dropped, anything that is not
/// all digits or is longer than 16 digits is refused.
#[must_use]
pub fn sanitize_card_number(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() <= CARD_DIGITS && digits.chars().all(|c| c.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

/// Group digits in blocks of four: `4111111111111111` → `4111 1111 1111 1111`.
#[must_use]
pub fn format_card_number(digits: &str) -> String {
    let cleaned: Vec<char> = digits.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Card preview: four groups of four, missing digits shown as `•`.
///
/// ```
/// use clarity_core::payment::mask_card_number;
///
/// assert_eq!(mask_card_number(""), "•••• •••• •••• ••••");
/// assert_eq!(mask_card_number("411111"), "4111 11•• •••• ••••");
/// ```
#[must_use]
pub fn mask_card_number(digits: &str) -> String {
    let cleaned: Vec<char> = digits.chars().filter(|c| !c.is_whitespace()).collect();
    (0..CARD_DIGITS / 4)
        .map(|group| {
            (0..4)
                .map(|offset| cleaned.get(group * 4 + offset).copied().unwrap_or(MASK_GLYPH))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format raw expiry entry as `MM/YY`, inserting the separator once two
/// digits have been typed. Non-digits are dropped and at most four digits
/// are kept.
///
/// ```
/// use clarity_core::payment::format_expiry_input;
///
/// assert_eq!(format_expiry_input("1"), "1");
/// assert_eq!(format_expiry_input("12"), "12/");
/// assert_eq!(format_expiry_input("1225"), "12/25");
/// assert_eq!(format_expiry_input("12/25"), "12/25");
/// ```
#[must_use]
pub fn format_expiry_input(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(4)
        .collect();
    if digits.len() >= 2 {
        let (month, year) = digits.split_at(2);
        format!("{month}/{year}")
    } else {
        digits
    }
}

/// Keep at most four digits of a CVV entry.
#[must_use]
pub fn sanitize_cvv(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).take(4).collect()
}
