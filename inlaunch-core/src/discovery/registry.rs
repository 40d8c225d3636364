use crate::catalog::known_versions;
use crate::discovery::{IgnoreFilter, InstalledVersionFinder};
use crate::error::Result;
use crate::selector::InstalledVersions;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default install locations, checked before the registry.
const STANDARD_LOCATIONS: &[(u32, &[&str])] = &[
    (3, &[
        r"C:\Program Files\Adobe\Adobe InDesign CS\InDesign.exe",
        r"C:\Program Files (x86)\Adobe\Adobe InDesign CS\InDesign.exe",
    ]),
    (4, &[
        r"C:\Program Files\Adobe\Adobe InDesign CS2\InDesign.exe",
        r"C:\Program Files (x86)\Adobe\Adobe InDesign CS2\InDesign.exe",
    ]),
    (5, &[
        r"C:\Program Files\Adobe\Adobe InDesign CS3\InDesign.exe",
        r"C:\Program Files (x86)\Adobe\Adobe InDesign CS3\InDesign.exe",
    ]),
    (6, &[
        r"C:\Program Files\Adobe\Adobe InDesign CS4\InDesign.exe",
        r"C:\Program Files (x86)\Adobe\Adobe InDesign CS4\InDesign.exe",
    ]),
    (7, &[
        r"C:\Program Files\Adobe\Adobe InDesign CS5\InDesign.exe",
        r"C:\Program Files (x86)\Adobe\Adobe InDesign CS5\InDesign.exe",
    ]),
    (8, &[
        r"C:\Program Files\Adobe\Adobe InDesign CS6\InDesign.exe",
        r"C:\Program Files (x86)\Adobe\Adobe InDesign CS6\InDesign.exe",
    ]),
    (9, &[r"C:\Program Files\Adobe\Adobe InDesign CC\InDesign.exe"]),
    (10, &[r"C:\Program Files\Adobe\Adobe InDesign CC 2014\InDesign.exe"]),
    (11, &[r"C:\Program Files\Adobe\Adobe InDesign CC 2015\InDesign.exe"]),
    (12, &[r"C:\Program Files\Adobe\Adobe InDesign CC 2017\InDesign.exe"]),
    (13, &[r"C:\Program Files\Adobe\Adobe InDesign CC 2018\InDesign.exe"]),
    (14, &[r"C:\Program Files\Adobe\Adobe InDesign CC 2019\InDesign.exe"]),
    (15, &[r"C:\Program Files\Adobe\Adobe InDesign 2020\InDesign.exe"]),
    (16, &[r"C:\Program Files\Adobe\Adobe InDesign 2021\InDesign.exe"]),
    (17, &[r"C:\Program Files\Adobe\Adobe InDesign 2022\InDesign.exe"]),
    (18, &[r"C:\Program Files\Adobe\Adobe InDesign 2023\InDesign.exe"]),
    (19, &[r"C:\Program Files\Adobe\Adobe InDesign 2024\InDesign.exe"]),
    (20, &[r"C:\Program Files\Adobe\Adobe InDesign 2025\InDesign.exe"]),
    (21, &[r"C:\Program Files\Adobe\Adobe InDesign 2026\InDesign.exe"]),
    (22, &[r"C:\Program Files\Adobe\Adobe InDesign 2027\InDesign.exe"]),
    (23, &[r"C:\Program Files\Adobe\Adobe InDesign 2028\InDesign.exe"]),
];

/// Windows discovery: standard install folders first, then the COM
/// registration `InDesign.Application.<Name>` in `HKEY_CLASSES_ROOT`.
#[derive(Debug)]
pub struct RegistryFinder {
    filter: IgnoreFilter,
    locations: BTreeMap<u32, Vec<PathBuf>>,
    query_registry: bool,
}

impl RegistryFinder {
    pub fn new(filter: IgnoreFilter) -> Self {
        let locations = STANDARD_LOCATIONS
            .iter()
            .map(|&(major, paths)| (major, paths.iter().map(PathBuf::from).collect()))
            .collect();
        Self {
            filter,
            locations,
            query_registry: cfg!(windows),
        }
    }

    /// Probes only the given locations and never touches the registry.
    pub fn with_locations(filter: IgnoreFilter, locations: BTreeMap<u32, Vec<PathBuf>>) -> Self {
        Self {
            filter,
            locations,
            query_registry: false,
        }
    }

    fn standard_location(&self, major: u32) -> Option<PathBuf> {
        self.locations
            .get(&major)?
            .iter()
            .find(|p| p.exists() && !self.filter.is_ignored(&p.to_string_lossy()))
            .cloned()
    }

    fn registered_server(&self, name: &str) -> Option<PathBuf> {
        if !self.query_registry {
            return None;
        }
        let command = com_server_command(&format!(
            "InDesign.Application.{}",
            name.replace(' ', ".")
        ))?;
        if self.filter.is_ignored(&command) {
            return None;
        }
        Some(PathBuf::from(executable_from_command(&command)))
    }
}

impl InstalledVersionFinder for RegistryFinder {
    fn find_installed(&self) -> Result<InstalledVersions> {
        let mut found = InstalledVersions::new();
        for (major, name) in known_versions() {
            let hit = self
                .standard_location(major)
                .or_else(|| self.registered_server(name));
            if let Some(path) = hit {
                log::info!("Found version {major} ({name}) at {}", path.display());
                found.insert(major, path);
            }
        }
        Ok(found)
    }
}

/// Strips the quoting and any arguments from a `LocalServer32` command line.
fn executable_from_command(command: &str) -> &str {
    let command = command.trim();
    if let Some(rest) = command.strip_prefix('"') {
        return rest.split('"').next().unwrap_or(rest);
    }
    // Unquoted: the executable ends at the first ".exe" followed by
    // whitespace or the end, so spaces inside the path are kept.
    let lower = command.to_ascii_lowercase();
    lower
        .match_indices(".exe")
        .map(|(i, _)| i + ".exe".len())
        .find(|&end| {
            lower[end..]
                .chars()
                .next()
                .map_or(true, char::is_whitespace)
        })
        .map_or(command, |end| &command[..end])
}

#[cfg(windows)]
fn com_server_command(prog_id: &str) -> Option<String> {
    use winreg::enums::{HKEY_CLASSES_ROOT, KEY_QUERY_VALUE};
    use winreg::RegKey;

    let hkcr = RegKey::predef(HKEY_CLASSES_ROOT);
    let clsid: String = hkcr
        .open_subkey_with_flags(format!(r"{prog_id}\CLSID"), KEY_QUERY_VALUE)
        .and_then(|k| k.get_value(""))
        .ok()?;
    let command: String = hkcr
        .open_subkey_with_flags(format!(r"CLSID\{clsid}\LocalServer32"), KEY_QUERY_VALUE)
        .and_then(|k| k.get_value(""))
        .map_err(|e| log::debug!("{prog_id}: CLSID {clsid} has no LocalServer32: {e}"))
        .ok()?;
    Some(command)
}

#[cfg(not(windows))]
fn com_server_command(_prog_id: &str) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_IGNORE_KEYWORDS;
    use std::fs;

    #[test]
    fn standard_table_covers_catalog() {
        for (major, _) in known_versions() {
            assert!(STANDARD_LOCATIONS.iter().any(|&(m, _)| m == major));
        }
    }

    #[test]
    fn first_existing_location_wins() {
        let dir = tempfile::tempdir().unwrap();
        let x64 = dir.path().join("x64").join("InDesign.exe");
        let x86 = dir.path().join("x86").join("InDesign.exe");
        fs::create_dir_all(x86.parent().unwrap()).unwrap();
        fs::write(&x86, b"").unwrap();

        let locations = BTreeMap::from([(8, vec![x64.clone(), x86.clone()])]);
        let finder =
            RegistryFinder::with_locations(IgnoreFilter::new(DEFAULT_IGNORE_KEYWORDS), locations);
        let found = finder.find_installed().unwrap();
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec![(8, x86)]);
    }

    #[test]
    fn ignored_locations_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let beta = dir.path().join("InDesign Beta").join("InDesign.exe");
        fs::create_dir_all(beta.parent().unwrap()).unwrap();
        fs::write(&beta, b"").unwrap();

        let locations = BTreeMap::from([(19, vec![beta])]);
        let finder =
            RegistryFinder::with_locations(IgnoreFilter::new(DEFAULT_IGNORE_KEYWORDS), locations);
        assert!(finder.find_installed().unwrap().is_empty());
    }

    #[test]
    fn local_server_command_is_unquoted() {
        assert_eq!(
            executable_from_command(r#""C:\Adobe\InDesign.exe" /automation"#),
            r"C:\Adobe\InDesign.exe"
        );
        assert_eq!(
            executable_from_command(r"C:\Adobe\InDesign.exe"),
            r"C:\Adobe\InDesign.exe"
        );
    }

    #[test]
    fn unquoted_local_server_command_drops_arguments() {
        assert_eq!(
            executable_from_command(r"C:\PROGRA~1\Adobe\ADOBEI~1\InDesign.exe /automation"),
            r"C:\PROGRA~1\Adobe\ADOBEI~1\InDesign.exe"
        );
        assert_eq!(
            executable_from_command(r"C:\Program Files\Adobe\Adobe InDesign 2024\InDesign.EXE -Embedding"),
            r"C:\Program Files\Adobe\Adobe InDesign 2024\InDesign.EXE"
        );
        assert_eq!(
            executable_from_command(r"C:\Program Files\Adobe\Adobe InDesign 2024\InDesign.exe"),
            r"C:\Program Files\Adobe\Adobe InDesign 2024\InDesign.exe"
        );
        assert_eq!(
            executable_from_command(r"C:\Tools.exec\InDesign.exe /automation"),
            r"C:\Tools.exec\InDesign.exe"
        );
    }
}
