//! Plain query functions over a borrowed connection or transaction.

pub mod deployments;
pub mod incidents;
