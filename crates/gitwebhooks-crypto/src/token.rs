use subtle::ConstantTimeEq;

/// Compare two strings without short-circuiting on the first mismatch.
///
/// Lengths are not hidden.
pub fn constant_time_eq(left: &str, right: &str) -> bool {
    left.as_bytes().ct_eq(right.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::constant_time_eq;

    #[test]
    fn equal_tokens() {
        assert!(constant_time_eq("realtoken", "realtoken"));
        assert!(constant_time_eq("", ""));
    }

    #[test]
    fn different_tokens() {
        assert!(!constant_time_eq("realtoken", "wrongtoken"));
        assert!(!constant_time_eq("realtoken", "realtokeN"));
        assert!(!constant_time_eq("realtoken", "realtoken "));
        assert!(!constant_time_eq("", "realtoken"));
    }
}
