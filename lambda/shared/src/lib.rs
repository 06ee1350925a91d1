//! Pieces shared by the basket and market functions: the storage collaborator,
//! the update-instruction builder and the API Gateway response envelope.

pub mod config;
pub mod dynamo;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod request;
pub mod response;
pub mod table;
pub mod timestamp;
pub mod update;

pub use error::{HandlerError, StoreError};
pub use table::{Acknowledgement, Record, Table, KEY_FIELD};
pub use update::UpdateInstruction;
