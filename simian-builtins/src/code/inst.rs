use std::fmt;
use std::ops::Index;

use super::op::{lookup, Definition, Opcode};
use super::result::{CodeErr, CodeResult};

/// Encode an instruction: the opcode's tag followed by each operand,
/// big-endian, at the width its definition declares.
///
/// Passing the wrong number of operands, or an operand that doesn't
/// fit its width, is a bug in the caller and panics.
pub fn make(opcode: Opcode, operands: &[usize]) -> Vec<u8> {
    let def = opcode.definition();
    assert_eq!(
        operands.len(),
        def.operand_widths.len(),
        "{} takes {} operand(s)",
        def.name,
        def.operand_widths.len()
    );
    let mut inst = Vec::with_capacity(def.inst_len());
    inst.push(opcode.as_byte());
    for (operand, width) in operands.iter().zip(def.operand_widths) {
        assert!(
            *width >= std::mem::size_of::<usize>() || *operand >> (8 * width) == 0,
            "{} operand {operand} does not fit in {width} byte(s)",
            def.name
        );
        for shift in (0..*width).rev() {
            inst.push((operand >> (8 * shift)) as u8);
        }
    }
    inst
}

/// Decode the operands of an instruction. `bytes` starts immediately
/// after the opcode. Returns the operands along with the number of
/// bytes read.
pub fn read_operands(def: &Definition, bytes: &[u8]) -> CodeResult<(Vec<usize>, usize)> {
    let expected = def.operands_len();
    if bytes.len() < expected {
        return Err(CodeErr::truncated_operands(def.name, expected, bytes.len()));
    }
    let mut operands = Vec::with_capacity(def.operand_widths.len());
    let mut offset = 0;
    for width in def.operand_widths {
        let operand = bytes[offset..offset + width]
            .iter()
            .fold(0usize, |acc, byte| (acc << 8) | *byte as usize);
        operands.push(operand);
        offset += width;
    }
    Ok((operands, offset))
}

/// Read a 2-byte operand. The caller must ensure there are at least
/// two bytes.
#[inline]
pub fn read_u16(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// An append-only stream of encoded instructions. Previously emitted
/// instructions can only be overwritten by an instruction of the same
/// length, so addresses never shift once they're handed out.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Instructions {
    bytes: Vec<u8>,
}

impl Index<usize> for Instructions {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bytes[index]
    }
}

impl From<Vec<u8>> for Instructions {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

/// Concatenate encoded instructions.
impl FromIterator<Vec<u8>> for Instructions {
    fn from_iter<I: IntoIterator<Item = Vec<u8>>>(iter: I) -> Self {
        let mut instructions = Self::new();
        for inst in iter {
            instructions.push(&inst);
        }
        instructions
    }
}

impl Instructions {
    pub fn new() -> Self {
        Self { bytes: vec![] }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn get(&self, addr: usize) -> Option<u8> {
        self.bytes.get(addr).copied()
    }

    /// Append an encoded instruction and return its address.
    pub fn push(&mut self, inst: &[u8]) -> usize {
        let addr = self.bytes.len();
        self.bytes.extend_from_slice(inst);
        addr
    }

    /// Drop everything from `addr` on. Used to remove the last
    /// instruction emitted.
    pub fn truncate(&mut self, addr: usize) {
        self.bytes.truncate(addr);
    }

    /// Overwrite the instruction at `addr` in place. The replacement
    /// must encode to exactly the same length as the instruction it
    /// replaces.
    pub fn replace(&mut self, addr: usize, inst: &[u8]) {
        let old_len = match lookup(self.bytes[addr]) {
            Ok(def) => def.inst_len(),
            Err(err) => panic!("Cannot replace instruction at {addr}: {err}"),
        };
        assert_eq!(
            inst.len(),
            old_len,
            "Replacement for instruction at {addr} must be {old_len} byte(s)"
        );
        self.bytes[addr..addr + old_len].copy_from_slice(inst);
    }

    /// Decode the instruction at `addr`.
    pub fn decode_at(&self, addr: usize) -> CodeResult<(Definition, Vec<usize>)> {
        let def = lookup(self.bytes[addr])?;
        let (operands, _) = read_operands(&def, &self.bytes[addr + 1..])?;
        Ok((def, operands))
    }

    /// Render one line per instruction: address, opcode name, then
    /// operands. An undecodable byte gets an ERROR line and decoding
    /// resumes at the next byte.
    pub fn disassemble(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut addr = 0;
        while addr < self.bytes.len() {
            match self.decode_at(addr) {
                Ok((def, operands)) => {
                    write!(f, "{addr:0>4} {}", def.name)?;
                    for operand in operands {
                        write!(f, " {operand}")?;
                    }
                    writeln!(f)?;
                    addr += def.inst_len();
                }
                Err(err) => {
                    writeln!(f, "{addr:0>4} ERROR: {err}")?;
                    addr += 1;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        write!(f, "{self}")
    }
}
