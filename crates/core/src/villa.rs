//! Villa naming and identity rules.
//!
//! Both store backends and the HTTP layer rely on these so the
//! case-insensitive name comparison and the id sequence behave the same
//! whether villas live in PostgreSQL or in memory.

use crate::types::DbId;

/// Entity label used in not-found errors and log messages.
pub const ENTITY: &str = "Villa";

/// Maximum length for a villa name.
pub const MAX_NAME_LEN: u64 = 30;

/// Maximum length for free-text fields (details, amenity, image URL).
pub const MAX_TEXT_LEN: u64 = 2048;

/// Key under which duplicate-name errors are reported.
pub const NAME_FIELD: &str = "name";

/// Message returned when a villa name is already taken.
pub const DUPLICATE_NAME_MESSAGE: &str = "Villa already exists";

/// Comparison key for a villa name. Names are unique under this key.
///
/// Only ASCII letters are folded, the same as PostgreSQL's `LOWER` under the
/// `C` collation used by the name index. `"École"` and `"école"` are
/// distinct names.
pub fn name_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Whether two villa names collide (ASCII case-insensitive).
pub fn names_match(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}

/// Next identifier after the current maximum (`None` for an empty store).
pub fn next_id(current_max: Option<DbId>) -> DbId {
    current_max.map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_ignores_case() {
        assert!(names_match("Pool House", "pool house"));
        assert!(names_match("BEACH view", "Beach View"));
        assert!(!names_match("Pool House", "Pool  House"));
    }

    #[test]
    fn name_key_folds_ascii_only() {
        assert_eq!(name_key("Pool VIEW"), "pool view");
        assert_eq!(name_key("ÉCOLE"), "École");
        assert!(!names_match("École", "école"));
        assert!(names_match("Château Rouge", "CHâTEAU ROUGE"));
    }

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_id(None), 1);
    }

    #[test]
    fn next_id_follows_maximum() {
        assert_eq!(next_id(Some(7)), 8);
    }
}
