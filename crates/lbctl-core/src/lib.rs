// lbctl-core: Load balancer business logic independent of the CLI
//
// Everything here talks to the API through the capability traits in
// `lbctl_api::service`, never through the HTTP client directly.

pub mod acl;
pub mod bulk;
pub mod error;
pub mod terraform;
pub mod validate;

pub use bulk::{BulkOutcome, for_each_id, parse_id};
pub use error::{CoreError, ToolExit};
