use validator::ValidationError;

/// Canonicalizes a phone number into E.164 form.
///
/// Strips separators, rewrites an international `00` prefix to `+`, and
/// prefixes bare national-format digits with `+` so that outbound
/// recipients and inbound webhook senders compare equal. Returns `None`
/// when the result is not a plausible E.164 number.
pub fn canonicalize(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();

    let number = if let Some(rest) = cleaned.strip_prefix("00") {
        format!("+{}", rest)
    } else if cleaned.starts_with('+') {
        cleaned
    } else {
        format!("+{}", cleaned)
    };

    let digits = &number[1..];
    if digits.len() >= 6 && digits.len() <= 15 && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(number)
    } else {
        None
    }
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    match canonicalize(value) {
        Some(_) => Ok(()),
        None => {
            let mut err = ValidationError::new("phone");
            err.message = Some("must be an E.164 phone number".into());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_separators_and_prefixes() {
        assert_eq!(canonicalize("+47 999 99 999").as_deref(), Some("+4799999999"));
        assert_eq!(canonicalize("004799999999").as_deref(), Some("+4799999999"));
        assert_eq!(canonicalize("4799999999").as_deref(), Some("+4799999999"));
        assert_eq!(canonicalize("(47) 999-99-999").as_deref(), Some("+4799999999"));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(canonicalize("not a number"), None);
        assert_eq!(canonicalize("+123"), None);
        assert_eq!(canonicalize(""), None);
    }
}
