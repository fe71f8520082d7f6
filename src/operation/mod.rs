//! Operation descriptors and the polymorphic parameter and return contracts
//! they are built from.

pub mod descriptor;
pub mod param;
pub mod return_spec;

pub use descriptor::{OperationDescriptor, OperationKind, Relevance};
pub use param::ParamSpec;
pub use return_spec::ReturnSpec;
