//! Notifications (connections)

use crate::envelope::{Category, EnvelopeAttr, Flags, Variant};
use crate::fields::FieldDescriptor;

pub static CATEGORY: Category = Category {
    label: "notification",
    resource_prefix: "radarr_notification",
    path: radarr_client::paths::NOTIFICATION,
    has_tags: true,
    has_config_contract: true,
    has_protocol: false,
    flags: &[
        EnvelopeAttr::bool("onGrab"),
        EnvelopeAttr::bool("onDownload"),
        EnvelopeAttr::bool("onUpgrade"),
        EnvelopeAttr::bool("onRename"),
        EnvelopeAttr::bool("onMovieAdded"),
        EnvelopeAttr::bool("onMovieDelete"),
        EnvelopeAttr::bool("onMovieFileDelete"),
        EnvelopeAttr::bool("onMovieFileDeleteForUpgrade"),
        EnvelopeAttr::bool("onHealthIssue"),
        EnvelopeAttr::bool("onHealthRestored"),
        EnvelopeAttr::bool("onApplicationUpdate"),
        EnvelopeAttr::bool("onManualInteractionRequired"),
        EnvelopeAttr::bool("includeHealthWarnings"),
    ],
    generic_fields: FieldDescriptor {
        bools: &[
            "useSsl",
            "notify",
            "updateLibrary",
            "cleanLibrary",
            "alwaysUpdate",
            "sendSilently",
            "directMessage",
            "useEuEndpoint",
        ],
        ints: &[
            "port",
            "priority",
            "notificationType",
            "useEncryption",
            "displayTime",
            "retry",
            "expire",
            "topicId",
            "method",
        ],
        floats: &[],
        strings: &[
            "host",
            "path",
            "arguments",
            "url",
            "serverUrl",
            "webHookUrl",
            "apiKey",
            "username",
            "password",
            "authUsername",
            "authPassword",
            "accessToken",
            "from",
            "server",
            "sound",
            "botToken",
            "chatId",
        ],
        int_slices: &["grabFields", "importFields"],
        string_slices: &["to", "cc", "bcc", "recipients", "devices", "topics", "tags"],
        sensitive: &[
            "webHookUrl",
            "apiKey",
            "password",
            "authPassword",
            "accessToken",
            "botToken",
        ],
        aliases: &[("tags", "field_tags")],
    },
};

/// Flags of notifiers that only report library changes
const LIBRARY_FLAGS: Flags = Flags::Only(&[
    "onDownload",
    "onUpgrade",
    "onRename",
    "onMovieDelete",
    "onMovieFileDelete",
    "onMovieFileDeleteForUpgrade",
]);

pub static VARIANTS: &[Variant] = &[
    Variant {
        suffix: "apprise",
        implementation: "Apprise",
        config_contract: "AppriseSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["notificationType"],
            strings: &[
                "serverUrl",
                "configurationKey",
                "statelessUrls",
                "authUsername",
                "authPassword",
            ],
            string_slices: &["tags"],
            sensitive: &["configurationKey", "authPassword"],
            aliases: &[("tags", "field_tags")],
            ..FieldDescriptor::EMPTY
        },
        required: &["serverUrl"],
    },
    Variant {
        suffix: "custom_script",
        implementation: "CustomScript",
        config_contract: "CustomScriptSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["path", "arguments"],
            ..FieldDescriptor::EMPTY
        },
        required: &["path"],
    },
    Variant {
        suffix: "discord",
        implementation: "Discord",
        config_contract: "DiscordSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["webHookUrl", "username", "avatar", "author"],
            int_slices: &["grabFields", "importFields"],
            sensitive: &["webHookUrl"],
            ..FieldDescriptor::EMPTY
        },
        required: &["webHookUrl"],
    },
    Variant {
        suffix: "email",
        implementation: "Email",
        config_contract: "EmailSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["port", "useEncryption"],
            strings: &["server", "username", "password", "from"],
            string_slices: &["to", "cc", "bcc"],
            sensitive: &["password"],
            ..FieldDescriptor::EMPTY
        },
        required: &["server", "from", "to"],
    },
    Variant {
        suffix: "emby",
        implementation: "MediaBrowser",
        config_contract: "MediaBrowserSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["useSsl", "notify", "updateLibrary"],
            ints: &["port"],
            strings: &["host", "apiKey"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["host", "apiKey"],
    },
    Variant {
        suffix: "gotify",
        implementation: "Gotify",
        config_contract: "GotifySettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["priority"],
            strings: &["server", "appToken"],
            sensitive: &["appToken"],
            ..FieldDescriptor::EMPTY
        },
        required: &["server", "appToken"],
    },
    Variant {
        suffix: "join",
        implementation: "Join",
        config_contract: "JoinSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["priority"],
            strings: &["apiKey", "deviceNames"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["apiKey"],
    },
    Variant {
        suffix: "kodi",
        implementation: "Xbmc",
        config_contract: "XbmcSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["useSsl", "notify", "updateLibrary", "cleanLibrary", "alwaysUpdate"],
            ints: &["port", "displayTime"],
            strings: &["host", "username", "password"],
            sensitive: &["password"],
            ..FieldDescriptor::EMPTY
        },
        required: &["host"],
    },
    Variant {
        suffix: "mailgun",
        implementation: "Mailgun",
        config_contract: "MailgunSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["useEuEndpoint"],
            strings: &["apiKey", "from", "senderDomain"],
            string_slices: &["recipients"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["apiKey", "from"],
    },
    Variant {
        suffix: "notifiarr",
        implementation: "Notifiarr",
        config_contract: "NotifiarrSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["apiKey"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["apiKey"],
    },
    Variant {
        suffix: "ntfy",
        implementation: "Ntfy",
        config_contract: "NtfySettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["priority"],
            strings: &["serverUrl", "accessToken", "username", "password", "clickUrl"],
            string_slices: &["topics", "tags"],
            sensitive: &["accessToken", "password"],
            aliases: &[("tags", "field_tags")],
            ..FieldDescriptor::EMPTY
        },
        required: &["topics"],
    },
    Variant {
        suffix: "plex",
        implementation: "PlexServer",
        config_contract: "PlexServerSettings",
        protocol: None,
        flags: LIBRARY_FLAGS,
        fields: FieldDescriptor {
            bools: &["useSsl", "updateLibrary"],
            ints: &["port"],
            strings: &["host", "authToken"],
            sensitive: &["authToken"],
            ..FieldDescriptor::EMPTY
        },
        required: &["host", "authToken"],
    },
    Variant {
        suffix: "prowl",
        implementation: "Prowl",
        config_contract: "ProwlSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["priority"],
            strings: &["apiKey"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["apiKey"],
    },
    Variant {
        suffix: "pushbullet",
        implementation: "PushBullet",
        config_contract: "PushBulletSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["apiKey", "senderId"],
            string_slices: &["channelTags", "deviceIds"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["apiKey"],
    },
    Variant {
        suffix: "pushover",
        implementation: "Pushover",
        config_contract: "PushoverSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["priority", "retry", "expire"],
            strings: &["apiKey", "userKey", "sound"],
            string_slices: &["devices"],
            sensitive: &["apiKey", "userKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["apiKey", "userKey"],
    },
    Variant {
        suffix: "sendgrid",
        implementation: "SendGrid",
        config_contract: "SendGridSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["apiKey", "from"],
            string_slices: &["recipients"],
            sensitive: &["apiKey"],
            ..FieldDescriptor::EMPTY
        },
        required: &["apiKey", "from", "recipients"],
    },
    Variant {
        suffix: "signal",
        implementation: "Signal",
        config_contract: "SignalSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["useSsl"],
            ints: &["port"],
            strings: &[
                "host",
                "senderNumber",
                "receiverId",
                "authUsername",
                "authPassword",
            ],
            sensitive: &["authPassword"],
            ..FieldDescriptor::EMPTY
        },
        required: &["host", "senderNumber", "receiverId"],
    },
    Variant {
        suffix: "simplepush",
        implementation: "Simplepush",
        config_contract: "SimplepushSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["key", "event"],
            sensitive: &["key"],
            ..FieldDescriptor::EMPTY
        },
        required: &["key"],
    },
    Variant {
        suffix: "slack",
        implementation: "Slack",
        config_contract: "SlackSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            strings: &["webHookUrl", "username", "icon", "channel"],
            sensitive: &["webHookUrl"],
            ..FieldDescriptor::EMPTY
        },
        required: &["webHookUrl", "username"],
    },
    Variant {
        suffix: "synology_indexer",
        implementation: "SynologyIndexer",
        config_contract: "SynologyIndexerSettings",
        protocol: None,
        flags: LIBRARY_FLAGS,
        fields: FieldDescriptor {
            bools: &["updateLibrary"],
            ..FieldDescriptor::EMPTY
        },
        required: &[],
    },
    Variant {
        suffix: "telegram",
        implementation: "Telegram",
        config_contract: "TelegramSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["sendSilently"],
            ints: &["topicId"],
            strings: &["botToken", "chatId"],
            sensitive: &["botToken"],
            ..FieldDescriptor::EMPTY
        },
        required: &["botToken", "chatId"],
    },
    Variant {
        suffix: "trakt",
        implementation: "Trakt",
        config_contract: "TraktSettings",
        protocol: None,
        flags: LIBRARY_FLAGS,
        fields: FieldDescriptor {
            strings: &["accessToken", "refreshToken", "expires", "authUser"],
            sensitive: &["accessToken", "refreshToken"],
            ..FieldDescriptor::EMPTY
        },
        required: &["accessToken", "authUser"],
    },
    Variant {
        suffix: "twitter",
        implementation: "Twitter",
        config_contract: "TwitterSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            bools: &["directMessage"],
            strings: &[
                "accessToken",
                "accessTokenSecret",
                "consumerKey",
                "consumerSecret",
                "mention",
            ],
            sensitive: &[
                "accessToken",
                "accessTokenSecret",
                "consumerKey",
                "consumerSecret",
            ],
            ..FieldDescriptor::EMPTY
        },
        required: &[
            "accessToken",
            "accessTokenSecret",
            "consumerKey",
            "consumerSecret",
        ],
    },
    Variant {
        suffix: "webhook",
        implementation: "Webhook",
        config_contract: "WebhookSettings",
        protocol: None,
        flags: Flags::All,
        fields: FieldDescriptor {
            ints: &["method"],
            strings: &["url", "username", "password"],
            sensitive: &["password"],
            ..FieldDescriptor::EMPTY
        },
        required: &["url"],
    },
];
