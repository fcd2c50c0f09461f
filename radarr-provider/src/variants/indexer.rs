//! Indexers

use crate::envelope::{Category, EnvelopeAttr, Flags, Variant};
use crate::fields::FieldDescriptor;

pub static CATEGORY: Category = Category {
    label: "indexer",
    resource_prefix: "radarr_indexer",
    path: radarr_client::paths::INDEXER,
    has_tags: true,
    has_config_contract: true,
    has_protocol: true,
    flags: &[
        EnvelopeAttr::bool("enableRss"),
        EnvelopeAttr::bool("enableAutomaticSearch"),
        EnvelopeAttr::bool("enableInteractiveSearch"),
        EnvelopeAttr::int("priority"),
        EnvelopeAttr::int("downloadClientId"),
    ],
    generic_fields: FieldDescriptor {
        bools: &["removeYear", "allowZeroSize"],
        ints: &["minimumSeeders", "seedCriteria.seedTime", "delay"],
        floats: &["seedCriteria.seedRatio"],
        strings: &[
            "baseUrl",
            "apiPath",
            "apiKey",
            "additionalParameters",
            "username",
            "passkey",
            "cookie",
            "user",
        ],
        int_slices: &[
            "categories",
            "codecs",
            "mediums",
            "multiLanguages",
            "requiredFlags",
        ],
        string_slices: &[],
        sensitive: &["apiKey", "passkey"],
        aliases: &[],
    },
};

pub static VARIANTS: &[Variant] = &[
    Variant {
        suffix: "newznab",
        implementation: "Newznab",
        config_contract: "NewznabSettings",
        protocol: Some("usenet"),
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["removeYear"],
            strings: &["baseUrl", "apiPath", "apiKey", "additionalParameters"],
            int_slices: &["categories", "multiLanguages"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["baseUrl"],
    },
    Variant {
        suffix: "torznab",
        implementation: "Torznab",
        config_contract: "TorznabSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["removeYear"],
            ints: &["minimumSeeders", "seedCriteria.seedTime"],
            floats: &["seedCriteria.seedRatio"],
            strings: &["baseUrl", "apiPath", "apiKey", "additionalParameters"],
            int_slices: &["categories", "multiLanguages", "requiredFlags"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["baseUrl"],
    },
    Variant {
        suffix: "filelist",
        implementation: "FileList",
        config_contract: "FileListSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["minimumSeeders", "seedCriteria.seedTime"],
            floats: &["seedCriteria.seedRatio"],
            strings: &["baseUrl", "username", "passkey"],
            int_slices: &["categories", "multiLanguages", "requiredFlags"],
            sensitive: &["passkey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["username", "passkey"],
    },
    Variant {
        suffix: "hdbits",
        implementation: "HDBits",
        config_contract: "HDBitsSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["minimumSeeders", "seedCriteria.seedTime"],
            floats: &["seedCriteria.seedRatio"],
            strings: &["baseUrl", "username", "apiKey"],
            int_slices: &[
                "categories",
                "codecs",
                "mediums",
                "multiLanguages",
                "requiredFlags",
            ],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["username", "apiKey"],
    },
    Variant {
        suffix: "iptorrents",
        implementation: "IPTorrents",
        config_contract: "IPTorrentsSettings",
        protocol: Some("torrent"),
        flags: Flags::Only(&["enableRss", "priority", "downloadClientId"]),
        fields: FieldDescriptor {
            ints: &["minimumSeeders", "seedCriteria.seedTime"],
            floats: &["seedCriteria.seedRatio"],
            strings: &["baseUrl"],
            int_slices: &["multiLanguages", "requiredFlags"],
            ..FieldDescriptor::EMPTY
        },
        required: &["baseUrl"],
    },
    Variant {
        suffix: "nyaa",
        implementation: "Nyaa",
        config_contract: "NyaaSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["minimumSeeders", "seedCriteria.seedTime"],
            floats: &["seedCriteria.seedRatio"],
            strings: &["baseUrl", "additionalParameters"],
            int_slices: &["multiLanguages", "requiredFlags"],
            ..FieldDescriptor::EMPTY
        },
        required: &[],
    },
    Variant {
        suffix: "omgwtfnzbs",
        implementation: "Omgwtfnzbs",
        config_contract: "OmgwtfnzbsSettings",
        protocol: Some("usenet"),
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["delay"],
            strings: &["username", "apiKey"],
            int_slices: &["multiLanguages"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["username", "apiKey"],
    },
    Variant {
        suffix: "passthepopcorn",
        implementation: "PassThePopcorn",
        config_contract: "PassThePopcornSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["minimumSeeders", "seedCriteria.seedTime"],
            floats: &["seedCriteria.seedRatio"],
            strings: &["baseUrl", "aPIUser", "aPIKey"],
            int_slices: &["multiLanguages", "requiredFlags"],
            sensitive: &["aPIKey"],
            aliases: &[("aPIUser", "api_user"), ("aPIKey", "api_key")],
            ..FieldDescriptor::EMPTY
        },
        required: &["aPIUser", "aPIKey"],
    },
    Variant {
        suffix: "torrent_potato",
        implementation: "TorrentPotato",
        config_contract: "TorrentPotatoSettings",
        protocol: Some("torrent"),
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["minimumSeeders", "seedCriteria.seedTime"],
            floats: &["seedCriteria.seedRatio"],
            strings: &["baseUrl", "user", "passkey"],
            int_slices: &["multiLanguages", "requiredFlags"],
            sensitive: &["passkey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["baseUrl"],
    },
    Variant {
        suffix: "torrent_rss",
        implementation: "TorrentRssIndexer",
        config_contract: "TorrentRssIndexerSettings",
        protocol: Some("torrent"),
        flags: Flags::Only(&["enableRss", "priority", "downloadClientId"]),
        fields: FieldDescriptor {
            bools: &["allowZeroSize"],
            ints: &["minimumSeeders", "seedCriteria.seedTime"],
            floats: &["seedCriteria.seedRatio"],
            strings: &["baseUrl", "cookie"],
            int_slices: &["multiLanguages", "requiredFlags"],
            ..FieldDescriptor::EMPTY
        },
        required: &["baseUrl"],
    },
    Variant {
        suffix: "torrentleech",
        implementation: "TorrentLeech",
        config_contract: "TorrentLeechSettings",
        protocol: Some("torrent"),
        flags: Flags::Only(&["enableRss", "priority", "downloadClientId"]),
        fields: FieldDescriptor {
            ints: &["minimumSeeders", "seedCriteria.seedTime"],
            floats: &["seedCriteria.seedRatio"],
            strings: &["baseUrl", "apiKey"],
            int_slices: &["multiLanguages", "requiredFlags"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["apiKey"],
    },
];
