pub use base::{Object, ObjectRef};

pub mod new;

mod base;
