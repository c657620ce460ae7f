/// Reduces a phone number to its digits, the key owners are deduplicated on.
/// Any Unicode numeric character counts as a digit, not only ASCII `0-9`.
///
/// Nothing else is interpreted: a leading country code stays part of the key,
/// so `+1 (555) 123-4567` and `5551234567` are different owners.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_numeric()).collect()
}
