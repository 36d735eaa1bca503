use std::fmt;

use simian_builtins::code::{ByteCode, Definition, Opcode};

/// Renders compiled bytecode for humans: an instruction listing with
/// constant values inlined, followed by the constant table.
pub struct Disassembler {
    width: usize,
}

impl Disassembler {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { width: 16 }
    }

    pub fn disassemble(&self, bytecode: &ByteCode) -> String {
        let mut out = String::new();
        out.push_str(&format!("{:=<79}\n", "INSTRUCTIONS "));
        out.push_str(&self.format_instructions(bytecode));
        out.push_str(&format!("\n{:=<79}\n", "CONSTANTS "));
        out.push_str(&self.format_constants(bytecode));
        out
    }

    pub fn format_instructions(&self, bytecode: &ByteCode) -> String {
        let instructions = bytecode.instructions();
        if instructions.is_empty() {
            return "[EMPTY]\n".to_owned();
        }
        let mut out = String::new();
        let mut addr = 0;
        while addr < instructions.len() {
            match instructions.decode_at(addr) {
                Ok((def, operands)) => {
                    let line = self.format_inst(bytecode, &def, &operands);
                    out.push_str(&format!("{addr:0>4}    {line}\n"));
                    addr += def.inst_len();
                }
                Err(err) => {
                    out.push_str(&format!("{addr:0>4}    ERROR: {err}\n"));
                    addr += 1;
                }
            }
        }
        out
    }

    pub fn format_constants(&self, bytecode: &ByteCode) -> String {
        if bytecode.constants().is_empty() {
            return "[EMPTY]\n".to_owned();
        }
        let mut out = String::new();
        for (index, obj) in bytecode.iter_constants().enumerate() {
            let line = self.align(obj.type_name(), obj);
            out.push_str(&format!("{index:0>4}    {line}\n"));
        }
        out
    }

    /// Align instruction name and any additional data, such as a
    /// constant's value.
    fn align<T: fmt::Display>(&self, name: &str, value: T) -> String {
        format!("{name: <w$}{value}", w = self.width)
    }

    fn format_inst(&self, bytecode: &ByteCode, def: &Definition, operands: &[usize]) -> String {
        let operands_str =
            operands.iter().map(|op| op.to_string()).collect::<Vec<_>>().join(" ");
        if def.name == Opcode::Constant.name() {
            if let Some(index) = operands.first() {
                let value = match bytecode.get_const(*index) {
                    Some(obj) => format!("{obj}"),
                    None => "?".to_owned(),
                };
                return self.align(def.name, format!("{operands_str} ({value})"));
            }
        }
        self.align(def.name, operands_str).trim_end().to_owned()
    }
}
