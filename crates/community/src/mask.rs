//! Author-name masking for secret posts.

/// Partially mask an author name for display to non-owner, non-admin
/// viewers of secret content: the leading half (rounded up) stays visible
/// and the rest becomes `*`. Very short names (two characters or fewer)
/// are shown whole with a single `*` appended, so "Al" and "A" do not
/// collapse to nothing.
///
/// Counts characters, not bytes, so multi-byte names mask cleanly.
/// Display-only; never part of an access decision. The gate uses the
/// stored identity, not the name.
pub fn mask_author(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= 2 {
        return format!("{name}*");
    }
    let visible = (chars.len() + 1) / 2;
    let prefix: String = chars[..visible].iter().collect();
    format!("{prefix}{}", "*".repeat(chars.len() - visible))
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn reveals_leading_half_rounded_up() {
        assert_eq!(mask_author("Alice"), "Ali**");
        assert_eq!(mask_author("Seller123"), "Selle****");
        assert_eq!(mask_author("Amazon Master"), "Amazon ******");
    }

    #[test]
    fn boundary_lengths() {
        assert_eq!(mask_author("A"), "A*");
        assert_eq!(mask_author("Al"), "Al*");
        assert_eq!(mask_author("Bob"), "Bo*");
        assert_eq!(mask_author("Anna"), "An**");
    }

    #[test]
    fn multibyte_names_mask_by_character() {
        assert_eq!(mask_author("판매자킹"), "판매**");
        assert_eq!(mask_author("김셀"), "김셀*");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the visible prefix is exactly ceil(n/2) characters of
        /// the original for names longer than two characters, and the rest
        /// is all mask characters.
        #[test]
        fn masking_invariants(name in "[^*]{1,24}") {
            let masked = mask_author(&name);
            let n = name.chars().count();
            let m = masked.chars().count();

            if n <= 2 {
                prop_assert_eq!(m, n + 1);
                prop_assert!(masked.starts_with(&name));
                prop_assert!(masked.ends_with('*'));
            } else {
                prop_assert_eq!(m, n);
                let visible = (n + 1) / 2;
                let prefix: String = name.chars().take(visible).collect();
                prop_assert!(masked.starts_with(&prefix));
                prop_assert!(masked.chars().skip(visible).all(|c| c == '*'));
            }
        }
    }
}
