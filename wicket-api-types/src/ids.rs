//! Typed entity identifiers
//!
//! Every entity gets its own id newtype so a `RoleId` can never be handed
//! to a lookup expecting a `MenuId`. Ids serialize transparently as their
//! numeric value, matching what the store and the wire formats carry.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Raw numeric value
            pub fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id! {
    /// Identifier of a [`Tenant`](crate::domain::Tenant)
    TenantId
}

entity_id! {
    /// Identifier of a [`User`](crate::domain::User)
    UserId
}

entity_id! {
    /// Identifier of a [`Role`](crate::domain::Role)
    RoleId
}

entity_id! {
    /// Identifier of a [`Feature`](crate::domain::Feature)
    FeatureId
}

entity_id! {
    /// Identifier of a [`Menu`](crate::domain::Menu)
    MenuId
}
