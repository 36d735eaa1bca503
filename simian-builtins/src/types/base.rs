use std::fmt;
use std::sync::Arc;

/// Objects are immutable once created, so they're shared by reference
/// count without any locking.
pub type ObjectRef = Arc<Object>;

/// Runtime values the VM knows how to discriminate. New value types
/// are added here and given behavior in the VM's opcode handlers.
#[derive(Debug, Eq, PartialEq)]
pub enum Object {
    Int(i64),
    Bool(bool),
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "Int",
            Self::Bool(_) => "Bool",
        }
    }

    pub fn int_val(&self) -> Option<i64> {
        if let Self::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    pub fn bool_val(&self) -> Option<bool> {
        if let Self::Bool(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    /// Everything is truthy except `false`. Note that this includes
    /// the integer 0.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Bool(false))
    }

    /// Is this object the other object? Identity is only meaningful
    /// for the bool singletons; equality by value is defined by
    /// `PartialEq` and always agrees with identity.
    pub fn is(this: &ObjectRef, other: &ObjectRef) -> bool {
        Arc::ptr_eq(this, other)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}
