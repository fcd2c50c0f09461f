//! Variant tables
//!
//! One row per concrete implementation. Schemas and envelope projections are
//! derived from the rows; see [`crate::envelope`].

pub mod conditions;
pub mod download_client;
pub mod import_list;
pub mod indexer;
pub mod metadata;
pub mod notification;

use crate::envelope::{Category, Projection, Variant};

/// A category together with its variant rows
#[derive(Debug, Clone, Copy)]
pub struct Family {
    pub category: &'static Category,
    pub variants: &'static [Variant],
}

impl Family {
    /// The generic projection followed by one typed projection per row
    pub fn projections(&self) -> Vec<Projection> {
        std::iter::once(Projection::generic(self.category))
            .chain(
                self.variants
                    .iter()
                    .map(|variant| Projection::typed(self.category, variant)),
            )
            .collect()
    }

    pub fn by_implementation(&self, implementation: &str) -> Option<&'static Variant> {
        self.variants
            .iter()
            .find(|v| v.implementation == implementation)
    }
}

pub static INDEXERS: Family = Family {
    category: &indexer::CATEGORY,
    variants: indexer::VARIANTS,
};

pub static DOWNLOAD_CLIENTS: Family = Family {
    category: &download_client::CATEGORY,
    variants: download_client::VARIANTS,
};

pub static NOTIFICATIONS: Family = Family {
    category: &notification::CATEGORY,
    variants: notification::VARIANTS,
};

pub static IMPORT_LISTS: Family = Family {
    category: &import_list::CATEGORY,
    variants: import_list::VARIANTS,
};

pub static METADATA: Family = Family {
    category: &metadata::CATEGORY,
    variants: metadata::VARIANTS,
};

pub static CUSTOM_FORMAT_CONDITIONS: Family = Family {
    category: &conditions::CUSTOM_FORMAT_CATEGORY,
    variants: conditions::CUSTOM_FORMAT_VARIANTS,
};

pub static AUTO_TAG_CONDITIONS: Family = Family {
    category: &conditions::AUTO_TAG_CATEGORY,
    variants: conditions::AUTO_TAG_VARIANTS,
};

/// Families backed by their own collection endpoint
pub fn managed() -> [Family; 5] {
    [
        INDEXERS,
        DOWNLOAD_CLIENTS,
        NOTIFICATIONS,
        IMPORT_LISTS,
        METADATA,
    ]
}

/// Families only embedded in other objects
pub fn embedded() -> [Family; 2] {
    [CUSTOM_FORMAT_CONDITIONS, AUTO_TAG_CONDITIONS]
}
