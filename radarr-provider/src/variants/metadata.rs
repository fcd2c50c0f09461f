//! Metadata consumers

use crate::envelope::{Category, EnvelopeAttr, Flags, Variant};
use crate::fields::FieldDescriptor;

pub static CATEGORY: Category = Category {
    label: "metadata",
    resource_prefix: "radarr_metadata",
    path: radarr_client::paths::METADATA,
    has_tags: true,
    has_config_contract: true,
    has_protocol: false,
    flags: &[EnvelopeAttr::bool("enable")],
    generic_fields: FieldDescriptor {
        bools: &[
            "movieMetadata",
            "movieMetadataURL",
            "movieImages",
            "useMovieNfo",
            "addCollectionName",
        ],
        ints: &["movieMetadataLanguage"],
        floats: &[],
        strings: &[],
        int_slices: &[],
        string_slices: &[],
        sensitive: &[],
        aliases: &[("movieMetadataURL", "movie_metadata_url")],
    },
};

pub static VARIANTS: &[Variant] = &[
    Variant {
        suffix: "emby",
        implementation: "MediaBrowserMetadata",
        config_contract: "MediaBrowserMetadataSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["movieMetadata"],
            ..FieldDescriptor::EMPTY
        },
        required: &[],
    },
    Variant {
        suffix: "kodi",
        implementation: "XbmcMetadata",
        config_contract: "XbmcMetadataSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &[
                "movieMetadata",
                "movieMetadataURL",
                "movieImages",
                "useMovieNfo",
                "addCollectionName",
            ],
            ints: &["movieMetadataLanguage"],
            aliases: &[("movieMetadataURL", "movie_metadata_url")],
            ..FieldDescriptor::EMPTY
        },
        required: &[],
    },
    Variant {
        suffix: "roksbox",
        implementation: "RoksboxMetadata",
        config_contract: "RoksboxMetadataSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["movieMetadata", "movieImages"],
            ..FieldDescriptor::EMPTY
        },
        required: &[],
    },
    Variant {
        suffix: "wdtv",
        implementation: "WdtvMetadata",
        config_contract: "WdtvMetadataSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["movieMetadata", "movieImages"],
            ..FieldDescriptor::EMPTY
        },
        required: &[],
    },
];
