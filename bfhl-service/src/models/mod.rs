pub mod envelope;
pub mod error;
pub mod operation;

pub use envelope::Envelope;
pub use error::{BfhlError, INTERNAL_ERROR_MESSAGE};
pub use operation::{as_integer, Operation, OperationKind};
