//! Import lists

use crate::envelope::{Category, EnvelopeAttr, Flags, Variant};
use crate::fields::FieldDescriptor;

pub static CATEGORY: Category = Category {
    label: "import list",
    resource_prefix: "radarr_import_list",
    path: radarr_client::paths::IMPORT_LIST,
    has_tags: true,
    has_config_contract: true,
    has_protocol: false,
    flags: &[
        EnvelopeAttr::bool("enabled"),
        EnvelopeAttr::bool("enableAuto"),
        EnvelopeAttr::bool("searchOnAdd"),
        EnvelopeAttr::string("monitor"),
        EnvelopeAttr::string("minimumAvailability"),
        EnvelopeAttr::int("qualityProfileId"),
        EnvelopeAttr::string("rootFolderPath"),
        EnvelopeAttr::int("listOrder"),
    ],
    generic_fields: FieldDescriptor {
        bools: &["onlyActive"],
        ints: &["port", "limit", "listType", "traktListType", "source", "minScore"],
        floats: &[],
        strings: &[
            "link",
            "url",
            "baseUrl",
            "urlBase",
            "apiKey",
            "listId",
            "accessToken",
            "refreshToken",
            "expires",
            "authUser",
            "username",
            "listname",
            "collectionId",
            "companyId",
            "keywordId",
            "personId",
        ],
        int_slices: &["profileIds", "tagIds"],
        string_slices: &[],
        sensitive: &["apiKey", "accessToken", "refreshToken"],
        aliases: &[],
    },
};

/// Secrets shared by the Trakt lists
const TRAKT_SENSITIVE: &[&str] = &["accessToken", "refreshToken"];

pub static VARIANTS: &[Variant] = &[
    Variant {
        suffix: "couchpotato",
        implementation: "CouchPotatoImport",
        config_contract: "CouchPotatoSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["onlyActive"],
            ints: &["port"],
            strings: &["link", "urlBase", "apiKey"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["link", "apiKey"],
    },
    Variant {
        suffix: "imdb",
        implementation: "IMDbListImport",
        config_contract: "IMDbListSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["listId"],
            ..FieldDescriptor::EMPTY
        },
        required: &["listId"],
    },
    Variant {
        suffix: "plex",
        implementation: "PlexImport",
        config_contract: "PlexListSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["accessToken"],
            sensitive: &["accessToken"],
            ..FieldDescriptor::EMPTY
        },
        required: &["accessToken"],
    },
    Variant {
        suffix: "plex_rss",
        implementation: "PlexRssImport",
        config_contract: "PlexRssImportSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["url"],
            ..FieldDescriptor::EMPTY
        },
        required: &["url"],
    },
    Variant {
        suffix: "radarr",
        implementation: "RadarrImport",
        config_contract: "RadarrSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["baseUrl", "apiKey"],
            int_slices: &["profileIds", "tagIds"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["baseUrl", "apiKey"],
    },
    Variant {
        suffix: "rss",
        implementation: "RSSImport",
        config_contract: "RSSImportSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["url"],
            ..FieldDescriptor::EMPTY
        },
        required: &["url"],
    },
    Variant {
        suffix: "stevenlu",
        implementation: "StevenLuImport",
        config_contract: "StevenLuSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["link"],
            ..FieldDescriptor::EMPTY
        },
        required: &["link"],
    },
    Variant {
        suffix: "stevenlu2",
        implementation: "StevenLu2Import",
        config_contract: "StevenLu2Settings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["source", "minScore"],
            ..FieldDescriptor::EMPTY
        },
        required: &[],
    },
    Variant {
        suffix: "tmdb_collection",
        implementation: "TMDbCollectionImport",
        config_contract: "TMDbCollectionSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["collectionId"],
            ..FieldDescriptor::EMPTY
        },
        required: &["collectionId"],
    },
    Variant {
        suffix: "tmdb_company",
        implementation: "TMDbCompanyImport",
        config_contract: "TMDbCompanySettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["companyId"],
            ..FieldDescriptor::EMPTY
        },
        required: &["companyId"],
    },
    Variant {
        suffix: "tmdb_keyword",
        implementation: "TMDbKeywordImport",
        config_contract: "TMDbKeywordSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["keywordId"],
            ..FieldDescriptor::EMPTY
        },
        required: &["keywordId"],
    },
    Variant {
        suffix: "tmdb_list",
        implementation: "TMDbListImport",
        config_contract: "TMDbListSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["listId"],
            ..FieldDescriptor::EMPTY
        },
        required: &["listId"],
    },
    Variant {
        suffix: "tmdb_person",
        implementation: "TMDbPersonImport",
        config_contract: "TMDbPersonSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &[
                "personCast",
                "personCastDirector",
                "personCastProducer",
                "personCastSound",
                "personCastWriting",
            ],
            strings: &["personId"],
            ..FieldDescriptor::EMPTY
        },
        required: &["personId"],
    },
    Variant {
        suffix: "tmdb_popular",
        implementation: "TMDbPopularImport",
        config_contract: "TMDbPopularSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["tMDbListType", "filterCriteria.languageCode"],
            strings: &[
                "filterCriteria.minVoteAverage",
                "filterCriteria.minVotes",
                "filterCriteria.certification",
                "filterCriteria.includeGenreIds",
                "filterCriteria.excludeGenreIds",
            ],
            aliases: &[("tMDbListType", "tmdb_list_type")],
            ..FieldDescriptor::EMPTY
        },
        required: &["tMDbListType"],
    },
    Variant {
        suffix: "tmdb_user",
        implementation: "TMDbUserImport",
        config_contract: "TMDbUserSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["listType"],
            strings: &["accessToken", "accountId"],
            sensitive: &["accessToken"],
            ..FieldDescriptor::EMPTY
        },
        required: &["accessToken", "accountId", "listType"],
    },
    Variant {
        suffix: "trakt_list",
        implementation: "TraktListImport",
        config_contract: "TraktListSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["limit"],
            strings: &[
                "accessToken",
                "refreshToken",
                "expires",
                "authUser",
                "username",
                "listname",
                "genres",
                "years",
                "rating",
                "certification",
                "traktAdditionalParameters",
            ],
            sensitive: TRAKT_SENSITIVE,
            ..FieldDescriptor::EMPTY
        },
        required: &["accessToken", "authUser", "username", "listname"],
    },
    Variant {
        suffix: "trakt_popular",
        implementation: "TraktPopularImport",
        config_contract: "TraktPopularSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["traktListType", "limit"],
            strings: &[
                "accessToken",
                "refreshToken",
                "expires",
                "authUser",
                "genres",
                "years",
                "rating",
                "certification",
                "traktAdditionalParameters",
            ],
            sensitive: TRAKT_SENSITIVE,
            ..FieldDescriptor::EMPTY
        },
        required: &["accessToken", "authUser", "traktListType"],
    },
    Variant {
        suffix: "trakt_user",
        implementation: "TraktUserImport",
        config_contract: "TraktUserSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["traktListType", "limit"],
            strings: &[
                "accessToken",
                "refreshToken",
                "expires",
                "authUser",
                "username",
                "traktAdditionalParameters",
            ],
            sensitive: TRAKT_SENSITIVE,
            ..FieldDescriptor::EMPTY
        },
        required: &["accessToken", "authUser", "traktListType"],
    },
];
