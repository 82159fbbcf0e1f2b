//! Newtype wrappers around [`uuid::Uuid`] for all explorer entity identifiers.
//!
//! Using distinct types prevents accidentally passing a `FolderId` where a
//! `CollectionId` is expected. Identifiers are generated on the client so an
//! entity keeps the same identity before and after the server confirms it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a newtype ID wrapper around `Uuid`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Return the inner UUID value.
            pub fn into_uuid(self) -> Uuid {
                self.0
            }

            /// Return a reference to the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a workspace.
    WorkspaceId
);

define_id!(
    /// Unique identifier for an organization.
    OrganizationId
);

define_id!(
    /// Unique identifier for a collection.
    CollectionId
);

define_id!(
    /// Unique identifier for a folder.
    FolderId
);

define_id!(
    /// Unique identifier for a request.
    RequestId
);

define_id!(
    /// Unique identifier for an environment.
    EnvironmentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_id_new() {
        let id1 = CollectionId::new();
        let id2 = CollectionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_folder_id_display() {
        let uuid = Uuid::new_v4();
        let id = FolderId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn test_workspace_id_from_str() {
        let uuid = Uuid::new_v4();
        let id: WorkspaceId = uuid.to_string().parse().expect("should parse");
        assert_eq!(id.0, uuid);
        assert!("not-a-uuid".parse::<WorkspaceId>().is_err());
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let id = RequestId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{}\"", id.0));
    }
}
