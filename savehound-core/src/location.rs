/// Per-profile directories inside a Proton prefix that may hold save data.
///
/// The three `AppData` variants form the default scan set. `Documents` and
/// `SavedGames` are opt-in because many games also dump logs and shader
/// caches there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum SaveLocation {
    Local,
    Roaming,
    LocalLow,
    Documents,
    SavedGames,
}

const ALL_LOCATIONS: &[SaveLocation] = &[
    SaveLocation::Local,
    SaveLocation::Roaming,
    SaveLocation::LocalLow,
    SaveLocation::Documents,
    SaveLocation::SavedGames,
];

const APPDATA_LOCATIONS: &[SaveLocation] = &[
    SaveLocation::Local,
    SaveLocation::Roaming,
    SaveLocation::LocalLow,
];

impl SaveLocation {
    /// Path of this location relative to `drive_c/users/<profile>/`.
    pub fn relative_dir(&self) -> &'static [&'static str] {
        match self {
            SaveLocation::Local => &["AppData", "Local"],
            SaveLocation::Roaming => &["AppData", "Roaming"],
            SaveLocation::LocalLow => &["AppData", "LocalLow"],
            SaveLocation::Documents => &["Documents"],
            SaveLocation::SavedGames => &["Saved Games"],
        }
    }

    /// Short label used in CLI output and `--json` records.
    pub fn label(&self) -> &'static str {
        match self {
            SaveLocation::Local => "AppData/Local",
            SaveLocation::Roaming => "AppData/Roaming",
            SaveLocation::LocalLow => "AppData/LocalLow",
            SaveLocation::Documents => "Documents",
            SaveLocation::SavedGames => "Saved Games",
        }
    }

    pub fn all() -> &'static [SaveLocation] {
        ALL_LOCATIONS
    }

    /// The `AppData/{Local,Roaming,LocalLow}` set scanned by default.
    pub fn appdata() -> &'static [SaveLocation] {
        APPDATA_LOCATIONS
    }
}

impl std::fmt::Display for SaveLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appdata_is_prefix_of_all() {
        assert_eq!(&SaveLocation::all()[..3], SaveLocation::appdata());
    }

    #[test]
    fn label_matches_relative_dir() {
        for loc in SaveLocation::all() {
            assert_eq!(loc.label(), loc.relative_dir().join("/"));
        }
    }
}
