/// Closed vocabulary of affirmative replies. Matching is exact after
/// trim + lowercase: a bare "OK" confirms a contract, "ok please" does
/// not. False positives are worse than making a customer re-send a clean
/// "OK", so no substring or fuzzy matching.
const AFFIRMATIVE_TOKENS: &[&str] = &[
    "ok", "ok.", "ok!", "okay", "okay.", "okay!", "yes", "yes.", "yes!", "ja", "ja.", "ja!",
    "jepp", "jepp.", "jepp!", "confirm", "confirm.", "confirm!", "confirmed", "confirmed.",
    "confirmed!", "accept", "accept.", "accept!", "aksepterer", "aksepterer.", "aksepterer!",
];

pub fn is_affirmative(body: &str) -> bool {
    let normalized = body.trim().to_lowercase();
    AFFIRMATIVE_TOKENS.contains(&normalized.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_tokens_match_after_normalization() {
        assert!(is_affirmative("ok"));
        assert!(is_affirmative("Ok!"));
        assert!(is_affirmative("  YES  "));
        assert!(is_affirmative("Ja."));
        assert!(is_affirmative("CONFIRMED"));
        assert!(is_affirmative("aksepterer"));
    }

    #[test]
    fn near_misses_do_not_match() {
        assert!(!is_affirmative("ok please"));
        assert!(!is_affirmative("okkk"));
        assert!(!is_affirmative("yes, sounds good"));
        assert!(!is_affirmative("maybe later"));
        assert!(!is_affirmative("o k"));
        assert!(!is_affirmative(""));
    }
}
