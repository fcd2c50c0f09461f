//! Radarr v3 endpoint paths

pub const SYSTEM_STATUS: &str = "/api/v3/system/status";

// Provider categories
pub const INDEXER: &str = "/api/v3/indexer";
pub const DOWNLOAD_CLIENT: &str = "/api/v3/downloadclient";
pub const NOTIFICATION: &str = "/api/v3/notification";
pub const IMPORT_LIST: &str = "/api/v3/importlist";
pub const METADATA: &str = "/api/v3/metadata";

// Flat resources
pub const TAG: &str = "/api/v3/tag";
pub const ROOT_FOLDER: &str = "/api/v3/rootfolder";
pub const REMOTE_PATH_MAPPING: &str = "/api/v3/remotepathmapping";
pub const IMPORT_LIST_EXCLUSION: &str = "/api/v3/exclusions";
pub const DELAY_PROFILE: &str = "/api/v3/delayprofile";
pub const QUALITY_PROFILE: &str = "/api/v3/qualityprofile";
pub const RESTRICTION: &str = "/api/v3/restriction";
pub const MOVIE: &str = "/api/v3/movie";
pub const CUSTOM_FORMAT: &str = "/api/v3/customformat";
pub const AUTO_TAG: &str = "/api/v3/autotagging";

// Singletons
pub const NAMING_CONFIG: &str = "/api/v3/config/naming";
pub const MEDIA_MANAGEMENT_CONFIG: &str = "/api/v3/config/mediamanagement";
pub const INDEXER_CONFIG: &str = "/api/v3/config/indexer";
pub const METADATA_CONFIG: &str = "/api/v3/config/metadata";
pub const IMPORT_LIST_CONFIG: &str = "/api/v3/config/importlist";
pub const HOST_CONFIG: &str = "/api/v3/config/host";
