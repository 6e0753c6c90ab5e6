use crate::error::{ImportError, Result};

/// Returns the part of `email` after its single `@`.
///
/// The address must contain exactly one `@` with something on both sides of it.
/// No trimming or case folding is done, so the domain comes back byte for byte.
pub fn extract_domain(email: &str) -> Result<&str> {
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(domain)
        }
        _ => Err(ImportError::InvalidEmail(email.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_domain_from_valid_addresses() {
        assert_eq!(extract_domain("user@example.com").unwrap(), "example.com");
        assert_eq!(extract_domain("someone@domain.org").unwrap(), "domain.org");
        assert_eq!(extract_domain("a@b").unwrap(), "b");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "invalid-email.com",
            "anotherinvalidemail@",
            "@nodomain",
            "",
            "@",
            "two@at@signs.com",
            "trailing@domain.com@",
        ] {
            let err = extract_domain(email).unwrap_err();
            assert!(
                matches!(err, ImportError::InvalidEmail(ref e) if e == email),
                "expected InvalidEmail for {email:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn keeps_domain_as_found() {
        assert_eq!(extract_domain("Bob@Example.COM").unwrap(), "Example.COM");
        assert_eq!(extract_domain("bob@ example.com ").unwrap(), " example.com ");
    }
}
