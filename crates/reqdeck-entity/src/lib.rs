//! # reqdeck-entity
//!
//! Entity models for the Reqdeck explorer. Every struct in this crate is
//! either a value held in the explorer snapshot or a payload sent through the
//! remote gateway. All entities derive `Debug`, `Clone`, `Serialize` and
//! `Deserialize`; create/update payloads additionally derive `Validate`.

pub mod collection;
pub mod environment;
pub mod explorer;
pub mod folder;
pub mod organization;
pub mod request;
pub mod workspace;

pub use collection::{Collection, CreateCollection, UpdateCollection};
pub use environment::Environment;
pub use explorer::{ExplorerArtifacts, ExplorerSnapshot, NodeKind};
pub use folder::{CreateFolder, Folder, UpdateFolder};
pub use organization::{CreateOrganization, NameAvailability, Organization};
pub use request::{CreateRequest, Request, UpdateRequest};
pub use workspace::{CreateWorkspace, Workspace};
