pub mod lower;
pub mod mir;
pub mod targets;
pub mod ty;
