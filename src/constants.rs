//! Storage keys, fragment parameters, hit-test tolerance, list name words
//! and config file names

/// Persistent store key layout
pub mod store {
    /// Prefix for every named favorite list (`favorites:<listKey>`)
    pub const LIST_PREFIX: &str = "favorites:";

    /// Pre-multi-list single favorites record, consumed by migration
    pub const LEGACY_KEY: &str = "favorites";

    /// Visited booth marks used by the list overview
    pub const VISITED_KEY: &str = "visitedBooths";
}

/// Location fragment layout (`#list=<key>&favs=<token>`)
pub mod fragment {
    /// Parameter carrying the active list key
    pub const LIST_PARAM: &str = "list";

    /// Parameter carrying the compressed favorites token
    pub const FAVS_PARAM: &str = "favs";
}

/// Compression codec constants
pub mod codec {
    /// Separator between booth labels before compression
    pub const DELIMITER: char = ',';
}

/// Geometry constants
pub mod geometry {
    /// Added to an edge's y-span so horizontal edges never divide by zero
    pub const EDGE_EPSILON: f64 = 0.00001;

    /// Fewer vertices than this never contain anything
    pub const MIN_VERTICES: usize = 3;
}

/// Random list name generation
pub mod names {
    pub const ADJECTIVES: [&str; 8] = [
        "brave", "cheeky", "happy", "sleepy", "sneaky", "gentle", "noisy", "bouncy",
    ];

    pub const ANIMALS: [&str; 8] = [
        "otter", "fox", "tiger", "panda", "sloth", "owl", "lizard", "turtle",
    ];

    /// Random draws before falling back to a numeric suffix
    pub const MAX_ATTEMPTS: usize = 16;
}

/// Config and data file locations
pub mod config {
    /// Application directory name under the config/data dirs
    pub const APP_DIR: &str = "boothmark";

    /// Config file name
    pub const FILENAME: &str = "config.json";

    /// Key-value store file name (inside the data dir)
    pub const STORAGE_FILENAME: &str = "storage.json";

    /// Current location fragment file name (inside the data dir)
    pub const LOCATION_FILENAME: &str = "location";

    /// Base URL used when building share links
    pub const DEFAULT_SHARE_BASE_URL: &str = "https://localhost/";

    /// Environment variable overriding the data directory
    pub const DATA_DIR_ENV: &str = "BOOTHMARK_DATA_DIR";

    /// Environment variable overriding the log level
    pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
}
