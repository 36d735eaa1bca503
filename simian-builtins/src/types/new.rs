//! Type Constructors.
//!
//! These constructors simplify the creation of runtime objects. Bools
//! are never allocated after startup: every `true` is the same `TRUE`
//! object and every `false` is the same `FALSE` object.
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::base::{Object, ObjectRef};

// Global singletons ---------------------------------------------------

static TRUE: Lazy<ObjectRef> = Lazy::new(|| Arc::new(Object::Bool(true)));
static FALSE: Lazy<ObjectRef> = Lazy::new(|| Arc::new(Object::Bool(false)));

#[inline]
pub fn bool(val: bool) -> ObjectRef {
    if val {
        TRUE.clone()
    } else {
        FALSE.clone()
    }
}

#[inline]
pub fn true_obj() -> ObjectRef {
    TRUE.clone()
}

#[inline]
pub fn false_obj() -> ObjectRef {
    FALSE.clone()
}

// Ints ----------------------------------------------------------------

pub fn int(value: i64) -> ObjectRef {
    Arc::new(Object::Int(value))
}
