use std::collections::HashMap;
use std::sync::OnceLock;

/// Known InDesign format generations and their marketing names, ascending.
///
/// The names follow Adobe's product history and cannot be derived from the
/// number, so the table is maintained by hand.
pub const VERSION_CATALOG: &[(u32, &str)] = &[
    (3, "CS"),
    (4, "CS2"),
    (5, "CS3"),
    (6, "CS4"),
    (7, "CS5"),
    (8, "CS6"),
    (9, "CC"),
    (10, "CC 2014"),
    (11, "CC 2015"),
    (12, "CC 2017"),
    (13, "CC 2018"),
    (14, "CC 2019"),
    (15, "2020"),
    (16, "2021"),
    (17, "2022"),
    (18, "2023"),
    (19, "2024"),
    (20, "2025"),
    (21, "2026"),
    (22, "2027"),
    (23, "2028"),
];

static REVERSE_CATALOG: OnceLock<HashMap<&'static str, u32>> = OnceLock::new();

/// Display name for a major version, e.g. `19 -> "2024"`.
pub fn version_name(major: u32) -> Option<&'static str> {
    VERSION_CATALOG
        .binary_search_by_key(&major, |&(v, _)| v)
        .ok()
        .map(|i| VERSION_CATALOG[i].1)
}

/// Major version for a display name, e.g. `"CC 2018" -> 13`.
pub fn version_for_name(name: &str) -> Option<u32> {
    REVERSE_CATALOG
        .get_or_init(|| VERSION_CATALOG.iter().map(|&(v, n)| (n, v)).collect())
        .get(name)
        .copied()
}

/// Iterates the catalog in ascending version order.
pub fn known_versions() -> impl Iterator<Item = (u32, &'static str)> {
    VERSION_CATALOG.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn naming_eras() {
        assert_eq!(version_name(3), Some("CS"));
        assert_eq!(version_name(8), Some("CS6"));
        assert_eq!(version_name(9), Some("CC"));
        assert_eq!(version_name(12), Some("CC 2017"));
        assert_eq!(version_name(15), Some("2020"));
        assert_eq!(version_name(19), Some("2024"));
        assert_eq!(version_name(2), None);
        assert_eq!(version_name(24), None);
    }

    #[test]
    fn reverse_lookup() {
        assert_eq!(version_for_name("2024"), Some(19));
        assert_eq!(version_for_name("CC 2018"), Some(13));
        assert_eq!(version_for_name("CS"), Some(3));
        assert_eq!(version_for_name("CC 2016"), None);
        assert_eq!(version_for_name(""), None);
        assert_eq!(version_for_name("cs6"), None);
    }

    #[test]
    fn catalog_is_sorted_and_bijective() {
        assert!(VERSION_CATALOG.windows(2).all(|w| w[0].0 < w[1].0));
        let names: HashSet<_> = known_versions().map(|(_, n)| n).collect();
        assert_eq!(names.len(), VERSION_CATALOG.len());
        for (major, name) in known_versions() {
            assert_eq!(version_for_name(name), Some(major));
        }
    }
}
