use std::slice::Iter;

use crate::types::ObjectRef;

use super::inst::Instructions;

/// The compiled form of a program: an instruction stream together
/// with the constant pool its `Constant` operands index into. The two
/// are never separated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ByteCode {
    instructions: Instructions,
    constants: Vec<ObjectRef>,
}

impl ByteCode {
    pub fn new(instructions: Instructions, constants: Vec<ObjectRef>) -> Self {
        Self { instructions, constants }
    }

    pub fn instructions(&self) -> &Instructions {
        &self.instructions
    }

    pub fn constants(&self) -> &[ObjectRef] {
        &self.constants
    }

    pub fn get_const(&self, index: usize) -> Option<&ObjectRef> {
        self.constants.get(index)
    }

    pub fn iter_constants(&self) -> Iter<'_, ObjectRef> {
        self.constants.iter()
    }

    pub fn into_parts(self) -> (Instructions, Vec<ObjectRef>) {
        (self.instructions, self.constants)
    }
}
