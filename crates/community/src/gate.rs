//! The secret-content gate.

use sellerdesk_auth::Principal;

use crate::post::Post;

/// May this viewer see the post's body?
///
/// Pure function of its three inputs; nothing is recorded anywhere. Every
/// render re-evaluates, so an unlock obtained with a password lasts exactly
/// one check and can never leak to another principal or another post.
///
/// Decision order:
/// 1. a post without a lock is open to everyone, password or not;
/// 2. the author sees their own post without a password;
/// 3. staff see every post without a password;
/// 4. anyone else needs the exact lock code.
pub fn check_access(post: &Post, supplied: Option<&str>, principal: Option<&Principal>) -> bool {
    let Some(lock) = &post.lock else {
        return true;
    };

    if let Some(p) = principal {
        if post.author_identity.as_ref() == Some(p.identity()) {
            return true;
        }
        if p.is_admin() {
            return true;
        }
    }

    supplied.is_some_and(|code| lock.matches(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use sellerdesk_auth::Role;
    use sellerdesk_core::{Identity, LockCode};

    use crate::post::{PostCategory, PostId};

    fn post(lock: Option<&str>, owner: Option<&str>) -> Post {
        Post {
            id: PostId::new(),
            title: "t".to_string(),
            body: "b".to_string(),
            author_name: "Author".to_string(),
            author_identity: owner.map(|o| Identity::parse(o).unwrap()),
            category: PostCategory::Free,
            lock: lock.map(|l| LockCode::parse(l).unwrap()),
            views: 0,
            created_at: Utc::now(),
        }
    }

    fn principal(raw: &str, role: Role) -> Principal {
        Principal::new(Identity::parse(raw).unwrap(), "P", role)
    }

    #[test]
    fn public_post_passes_for_everyone() {
        let p = post(None, Some("a@x.io"));
        assert!(check_access(&p, None, None));
        assert!(check_access(&p, Some("0000"), None));
        assert!(check_access(&p, Some(""), Some(&principal("b@x.io", Role::Starter))));
    }

    #[test]
    fn owner_bypasses_without_password() {
        let p = post(Some("1234"), Some("a@x.io"));
        let owner = principal("a@x.io", Role::Starter);

        assert!(check_access(&p, None, Some(&owner)));
        assert!(check_access(&p, Some("9999"), Some(&owner)));
    }

    #[test]
    fn admin_bypasses_without_password() {
        let p = post(Some("1234"), Some("a@x.io"));
        for role in [Role::Manager, Role::Master] {
            let admin = principal("staff@x.io", role);
            assert!(check_access(&p, None, Some(&admin)));
            assert!(check_access(&p, Some("0000"), Some(&admin)));
        }
    }

    #[test]
    fn stranger_needs_the_exact_code() {
        let p = post(Some("1234"), Some("a@x.io"));
        let viewer = principal("b@x.io", Role::Brand);

        assert!(check_access(&p, Some("1234"), Some(&viewer)));
        assert!(!check_access(&p, Some("0000"), Some(&viewer)));
        assert!(!check_access(&p, Some("123"), Some(&viewer)));
        assert!(!check_access(&p, Some(""), Some(&viewer)));
        assert!(!check_access(&p, None, Some(&viewer)));
    }

    #[test]
    fn signed_out_viewer_can_still_use_the_code() {
        let p = post(Some("1234"), Some("a@x.io"));
        assert!(check_access(&p, Some("1234"), None));
        assert!(!check_access(&p, None, None));
    }

    #[test]
    fn anonymous_post_has_no_owner_bypass() {
        let p = post(Some("1234"), None);
        let viewer = principal("a@x.io", Role::Seller);
        assert!(!check_access(&p, None, Some(&viewer)));
        assert!(check_access(&p, Some("1234"), Some(&viewer)));
    }

    #[test]
    fn unlock_does_not_persist_between_checks() {
        let p = post(Some("1234"), Some("a@x.io"));
        let viewer = principal("b@x.io", Role::Seller);

        assert!(check_access(&p, Some("1234"), Some(&viewer)));
        // The next check starts from scratch.
        assert!(!check_access(&p, None, Some(&viewer)));
    }
}
