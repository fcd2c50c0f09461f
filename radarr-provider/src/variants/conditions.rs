//! Custom-format specifications and auto-tag conditions
//!
//! Neither has an endpoint of its own: they travel inside custom formats and
//! auto tags, and are exposed standalone only as pseudo data sources.

use crate::envelope::{Category, EnvelopeAttr, Flags, Variant};
use crate::fields::FieldDescriptor;

const CONDITION_FLAGS: &[EnvelopeAttr] =
    &[EnvelopeAttr::bool("negate"), EnvelopeAttr::bool("required")];

const GENERIC_CONDITION_FIELDS: FieldDescriptor = FieldDescriptor {
    strings: &["value"],
    ints: &["min", "max"],
    ..FieldDescriptor::EMPTY
};

const STRING_VALUE: FieldDescriptor = FieldDescriptor {
    strings: &["value"],
    ..FieldDescriptor::EMPTY
};

const INT_VALUE: FieldDescriptor = FieldDescriptor {
    ints: &["value"],
    ..FieldDescriptor::EMPTY
};

const INT_RANGE: FieldDescriptor = FieldDescriptor {
    ints: &["min", "max"],
    ..FieldDescriptor::EMPTY
};

const FLOAT_RANGE: FieldDescriptor = FieldDescriptor {
    floats: &["min", "max"],
    ..FieldDescriptor::EMPTY
};

pub static CUSTOM_FORMAT_CATEGORY: Category = Category {
    label: "custom format specification",
    resource_prefix: "radarr_custom_format_condition",
    path: "",
    has_tags: false,
    has_config_contract: false,
    has_protocol: false,
    flags: CONDITION_FLAGS,
    generic_fields: GENERIC_CONDITION_FIELDS,
};

pub static AUTO_TAG_CATEGORY: Category = Category {
    label: "auto tag condition",
    resource_prefix: "radarr_auto_tag_condition",
    path: "",
    has_tags: false,
    has_config_contract: false,
    has_protocol: false,
    flags: CONDITION_FLAGS,
    generic_fields: GENERIC_CONDITION_FIELDS,
};

const fn condition(
    suffix: &'static str,
    implementation: &'static str,
    fields: FieldDescriptor,
) -> Variant {
    Variant {
        suffix,
        implementation,
        config_contract: "",
        protocol: None,
        flags: Flags::All,
        fields,
        required: &[],
    }
}

pub static CUSTOM_FORMAT_VARIANTS: &[Variant] = &[
    condition("release_title", "ReleaseTitleSpecification", STRING_VALUE),
    condition("edition", "EditionSpecification", STRING_VALUE),
    condition("language", "LanguageSpecification", INT_VALUE),
    condition("indexer_flag", "IndexerFlagSpecification", INT_VALUE),
    condition("source", "SourceSpecification", INT_VALUE),
    condition("resolution", "ResolutionSpecification", INT_VALUE),
    condition("quality_modifier", "QualityModifierSpecification", INT_VALUE),
    condition("size", "SizeSpecification", FLOAT_RANGE),
    condition("release_group", "ReleaseGroupSpecification", STRING_VALUE),
    condition("year", "YearSpecification", INT_RANGE),
];

pub static AUTO_TAG_VARIANTS: &[Variant] = &[
    condition("genres", "GenreSpecification", STRING_VALUE),
    condition("keywords", "KeywordSpecification", STRING_VALUE),
    condition("original_language", "OriginalLanguageSpecification", INT_VALUE),
    condition("quality_profile", "QualityProfileSpecification", INT_VALUE),
    condition("root_folder", "RootFolderSpecification", STRING_VALUE),
    condition("runtime", "RuntimeSpecification", INT_RANGE),
    condition("status", "StatusSpecification", INT_VALUE),
    condition("studio", "StudioSpecification", STRING_VALUE),
    condition("year", "YearSpecification", INT_RANGE),
];
