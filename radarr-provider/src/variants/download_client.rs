//! Download clients

use crate::envelope::{Category, EnvelopeAttr, Flags, Variant};
use crate::fields::FieldDescriptor;

pub static CATEGORY: Category = Category {
    label: "download client",
    resource_prefix: "radarr_download_client",
    path: radarr_client::paths::DOWNLOAD_CLIENT,
    has_tags: true,
    has_config_contract: true,
    has_protocol: true,
    flags: &[
        EnvelopeAttr::bool("enable"),
        EnvelopeAttr::int("priority"),
        EnvelopeAttr::bool("removeCompletedDownloads"),
        EnvelopeAttr::bool("removeFailedDownloads"),
    ],
    generic_fields: FieldDescriptor {
        bools: &[
            "useSsl",
            "addPaused",
            "addStopped",
            "startOnAdd",
            "sequentialOrder",
            "firstAndLast",
            "saveMagnetFiles",
            "readOnly",
        ],
        ints: &[
            "port",
            "recentMoviePriority",
            "olderMoviePriority",
            "initialState",
            "intialState",
        ],
        floats: &[],
        strings: &[
            "host",
            "urlBase",
            "rpcPath",
            "secretToken",
            "username",
            "password",
            "apiKey",
            "movieCategory",
            "movieImportedCategory",
            "movieDirectory",
            "category",
            "destination",
            "nzbFolder",
            "strmFolder",
            "torrentFolder",
            "watchFolder",
            "magnetFileExtension",
        ],
        int_slices: &["additionalTags"],
        string_slices: &["tags", "postImportTags"],
        sensitive: &["password", "apiKey", "secretToken"],
        aliases: &[("tags", "field_tags")],
    },
};

/// Settings shared by Transmission and Vuze
const TRANSMISSION_FIELDS: FieldDescriptor = FieldDescriptor {
    bools: &["useSsl", "addPaused"],
    ints: &["port", "recentMoviePriority", "olderMoviePriority"],
    strings: &[
        "host",
        "urlBase",
        "username",
        "password",
        "movieCategory",
        "movieDirectory",
    ],
    sensitive: &["password"],
    ..FieldDescriptor::EMPTY
};

/// Settings shared by both Download Station flavours
const DOWNLOAD_STATION_FIELDS: FieldDescriptor = FieldDescriptor {
    bools: &["useSsl"],
    ints: &["port"],
    strings: &["host", "username", "password", "movieCategory", "movieDirectory"],
    sensitive: &["password"],
    ..FieldDescriptor::EMPTY
};

const FOLDER_FLAGS: Flags = Flags::Only(&["enable", "priority"]);

pub static VARIANTS: &[Variant] = &[
    Variant {
        suffix: "aria2",
        implementation: "Aria2",
        config_contract: "Aria2Settings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["useSsl"],
            ints: &["port"],
            strings: &["host", "rpcPath", "secretToken"],
            sensitive: &["secretToken"],
            ..FieldDescriptor::EMPTY
        },
        required: &["host"],
    },
    Variant {
        suffix: "deluge",
        implementation: "Deluge",
        config_contract: "DelugeSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["useSsl", "addPaused"],
            ints: &["port", "recentMoviePriority", "olderMoviePriority"],
            strings: &[
                "host",
                "urlBase",
                "password",
                "movieCategory",
                "movieImportedCategory",
            ],
            sensitive: &["password"],
            ..FieldDescriptor::EMPTY
        },
        required: &["host"],
    },
    Variant {
        suffix: "torrent_download_station",
        implementation: "TorrentDownloadStation",
        config_contract: "DownloadStationSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: DOWNLOAD_STATION_FIELDS,
        required: &["host"],
    },
    Variant {
        suffix: "usenet_download_station",
        implementation: "UsenetDownloadStation",
        config_contract: "DownloadStationSettings",
        protocol: Some("usenet"),
        flags: Flags::All,
        fields: DOWNLOAD_STATION_FIELDS,
        required: &["host"],
    },
    Variant {
        suffix: "flood",
        implementation: "Flood",
        config_contract: "FloodSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["useSsl", "startOnAdd"],
            ints: &["port"],
            strings: &["host", "urlBase", "username", "password", "destination"],
            int_slices: &["additionalTags"],
            string_slices: &["tags", "postImportTags"],
            sensitive: &["password"],
            aliases: &[("tags", "field_tags")],
            ..FieldDescriptor::EMPTY
        },
        required: &["host"],
    },
    Variant {
        suffix: "hadouken",
        implementation: "Hadouken",
        config_contract: "HadoukenSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["useSsl"],
            ints: &["port"],
            strings: &["host", "urlBase", "username", "password", "category"],
            sensitive: &["password"],
            ..FieldDescriptor::EMPTY
        },
        required: &["host", "username", "password"],
    },
    Variant {
        suffix: "nzbget",
        implementation: "Nzbget",
        config_contract: "NzbgetSettings",
        protocol: Some("usenet"),
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["useSsl", "addPaused"],
            ints: &["port", "recentMoviePriority", "olderMoviePriority"],
            strings: &["host", "urlBase", "username", "password", "movieCategory"],
            sensitive: &["password"],
            ..FieldDescriptor::EMPTY
        },
        required: &["host"],
    },
    Variant {
        suffix: "nzbvortex",
        implementation: "NzbVortex",
        config_contract: "NzbVortexSettings",
        protocol: Some("usenet"),
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["port", "recentMoviePriority", "olderMoviePriority"],
            strings: &["host", "urlBase", "apiKey", "movieCategory"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["host", "apiKey"],
    },
    Variant {
        suffix: "pneumatic",
        implementation: "Pneumatic",
        config_contract: "PneumaticSettings",
        protocol: Some("usenet"),
        flags: FOLDER_FLAGS,
        fields: FieldDescriptor {
            strings: &["nzbFolder", "strmFolder"],
            ..FieldDescriptor::EMPTY
        },
        required: &["nzbFolder"],
    },
    Variant {
        suffix: "qbittorrent",
        implementation: "QBittorrent",
        config_contract: "QBittorrentSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["useSsl", "sequentialOrder", "firstAndLast"],
            ints: &[
                "port",
                "recentMoviePriority",
                "olderMoviePriority",
                "initialState",
            ],
            strings: &[
                "host",
                "urlBase",
                "username",
                "password",
                "movieCategory",
                "movieImportedCategory",
            ],
            sensitive: &["password"],
            ..FieldDescriptor::EMPTY
        },
        required: &["host"],
    },
    Variant {
        suffix: "rtorrent",
        implementation: "RTorrent",
        config_contract: "RTorrentSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["useSsl", "addStopped"],
            ints: &["port", "recentMoviePriority", "olderMoviePriority"],
            strings: &[
                "host",
                "urlBase",
                "username",
                "password",
                "movieCategory",
                "movieImportedCategory",
                "movieDirectory",
            ],
            sensitive: &["password"],
            ..FieldDescriptor::EMPTY
        },
        required: &["host"],
    },
    Variant {
        suffix: "sabnzbd",
        implementation: "Sabnzbd",
        config_contract: "SabnzbdSettings",
        protocol: Some("usenet"),
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["useSsl"],
            ints: &["port", "recentMoviePriority", "olderMoviePriority"],
            strings: &[
                "host",
                "urlBase",
                "apiKey",
                "username",
                "password",
                "movieCategory",
            ],
            sensitive: &["apiKey", "password"],
            ..FieldDescriptor::EMPTY
        },
        required: &["host"],
    },
    Variant {
        suffix: "torrent_blackhole",
        implementation: "TorrentBlackhole",
        config_contract: "TorrentBlackholeSettings",
        protocol: Some("torrent"),
        flags: FOLDER_FLAGS,
        fields: FieldDescriptor {
            bools: &["saveMagnetFiles", "readOnly"],
            strings: &["torrentFolder", "watchFolder", "magnetFileExtension"],
            ..FieldDescriptor::EMPTY
        },
        required: &["torrentFolder", "watchFolder"],
    },
    Variant {
        suffix: "usenet_blackhole",
        implementation: "UsenetBlackhole",
        config_contract: "UsenetBlackholeSettings",
        protocol: Some("usenet"),
        flags: FOLDER_FLAGS,
        fields: FieldDescriptor {
            strings: &["nzbFolder", "watchFolder"],
            ..FieldDescriptor::EMPTY
        },
        required: &["nzbFolder", "watchFolder"],
    },
    Variant {
        suffix: "transmission",
        implementation: "Transmission",
        config_contract: "TransmissionSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: TRANSMISSION_FIELDS,
        required: &["host"],
    },
    Variant {
        suffix: "vuze",
        implementation: "Vuze",
        config_contract: "TransmissionSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: TRANSMISSION_FIELDS,
        required: &["host"],
    },
    Variant {
        suffix: "utorrent",
        implementation: "UTorrent",
        config_contract: "UTorrentSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["useSsl"],
            // the service spells this one "intial"
            ints: &[
                "port",
                "recentMoviePriority",
                "olderMoviePriority",
                "intialState",
            ],
            strings: &[
                "host",
                "urlBase",
                "username",
                "password",
                "movieCategory",
                "movieImportedCategory",
            ],
            sensitive: &["password"],
            ..FieldDescriptor::EMPTY
        },
        required: &["host"],
    },
];
