//! Declaration generation engine: schema ownership, operation discovery,
//! artifact writing, and file-change coordination.

mod coordinator;
mod error;
mod locator;
mod schema;
mod writer;

pub use coordinator::{ChangeCoordinator, ReloadNotifier};
pub use error::{Error, Result, SchemaLoadCause};
pub use locator::OperationLocator;
pub use schema::SchemaStore;
pub use writer::{DeclarationWriter, PassReport};
