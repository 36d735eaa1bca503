use simian_builtins::code::{read_u16, ByteCode, Instructions, Opcode};
use simian_builtins::types::{new, Object, ObjectRef};

use super::result::{RuntimeErr, RuntimeResult};

pub const DEFAULT_STACK_SIZE: usize = 2048;

/// Stack machine that runs one compiled program. The constants and
/// instructions are never modified; the only mutable state is the
/// operand stack.
pub struct VM {
    constants: Vec<ObjectRef>,
    instructions: Instructions,
    // Slots at and above `sp` are free. They keep whatever was last
    // popped until the next push overwrites them.
    stack: Vec<Option<ObjectRef>>,
    sp: usize,
}

impl VM {
    pub fn new(bytecode: ByteCode) -> Self {
        Self::with_stack_size(bytecode, DEFAULT_STACK_SIZE)
    }

    pub fn with_stack_size(bytecode: ByteCode, stack_size: usize) -> Self {
        let (instructions, constants) = bytecode.into_parts();
        Self { constants, instructions, stack: vec![None; stack_size], sp: 0 }
    }

    /// Run the instructions from the beginning. On error, execution
    /// stops at the failing instruction and the stack is left as is.
    pub fn run(&mut self) -> RuntimeResult {
        use Opcode::*;

        log::trace!("BEGIN: run ({} bytes)", self.instructions.len());

        let len = self.instructions.len();
        let mut ip = 0;

        while ip < len {
            let byte = self.instructions[ip];
            let opcode =
                Opcode::try_from(byte).map_err(|_| RuntimeErr::undefined_opcode(byte, ip))?;
            let def = opcode.definition();
            let mut next_ip = ip + def.inst_len();

            if next_ip > len {
                return Err(RuntimeErr::truncated_instruction(ip));
            }

            log::trace!("{ip:0>4} {} (sp = {})", def.name, self.sp);

            match opcode {
                Constant => {
                    let index = self.read_operand(ip);
                    let obj = match self.constants.get(index) {
                        Some(obj) => obj.clone(),
                        None => return Err(RuntimeErr::constant_not_found(index)),
                    };
                    self.push(obj)?;
                }
                Pop => {
                    self.pop()?;
                }
                Add | Sub | Mul | Div => self.execute_arithmetic(opcode)?,
                True => self.push(new::true_obj())?,
                False => self.push(new::false_obj())?,
                Equal | NotEqual | GreaterThan => self.execute_comparison(opcode)?,
                Minus => {
                    let operand = self.pop()?;
                    match operand.int_val() {
                        Some(value) => self.push(new::int(value.wrapping_neg()))?,
                        None => {
                            return Err(RuntimeErr::unsupported_operand(
                                "-",
                                operand.type_name(),
                            ))
                        }
                    }
                }
                Bang => {
                    let operand = self.pop()?;
                    self.push(new::bool(!operand.is_truthy()))?;
                }
                Jump => {
                    next_ip = self.read_operand(ip);
                }
                JumpNotTruthy => {
                    let condition = self.pop()?;
                    if !condition.is_truthy() {
                        next_ip = self.read_operand(ip);
                    }
                }
            }

            ip = next_ip;
        }

        log::trace!("END: run (sp = {})", self.sp);
        Ok(())
    }

    /// Read the 2-byte operand of the instruction at `ip`. The caller
    /// has already checked that the operand is in bounds.
    fn read_operand(&self, ip: usize) -> usize {
        read_u16(&self.instructions.as_bytes()[ip + 1..]) as usize
    }

    fn execute_arithmetic(&mut self, opcode: Opcode) -> RuntimeResult {
        let rhs = self.pop()?;
        let lhs = self.pop()?;
        let op = op_symbol(opcode);
        let (a, b) = match (&*lhs, &*rhs) {
            (Object::Int(a), Object::Int(b)) => (*a, *b),
            _ => return Err(RuntimeErr::type_mismatch(op, lhs.type_name(), rhs.type_name())),
        };
        let result = match opcode {
            Opcode::Add => a.wrapping_add(b),
            Opcode::Sub => a.wrapping_sub(b),
            Opcode::Mul => a.wrapping_mul(b),
            Opcode::Div => {
                if b == 0 {
                    return Err(RuntimeErr::division_by_zero());
                }
                a.wrapping_div(b)
            }
            _ => unreachable!("Not an arithmetic opcode: {}", opcode.name()),
        };
        self.push(new::int(result))
    }

    fn execute_comparison(&mut self, opcode: Opcode) -> RuntimeResult {
        let rhs = self.pop()?;
        let lhs = self.pop()?;
        let op = op_symbol(opcode);
        let result = match (&*lhs, &*rhs, opcode) {
            (Object::Int(a), Object::Int(b), Opcode::Equal) => a == b,
            (Object::Int(a), Object::Int(b), Opcode::NotEqual) => a != b,
            (Object::Int(a), Object::Int(b), Opcode::GreaterThan) => a > b,
            (Object::Bool(_), Object::Bool(_), Opcode::Equal) => {
                Object::is(&lhs, &rhs) || lhs == rhs
            }
            (Object::Bool(_), Object::Bool(_), Opcode::NotEqual) => {
                !(Object::is(&lhs, &rhs) || lhs == rhs)
            }
            (Object::Bool(_), Object::Bool(_), _) => {
                return Err(RuntimeErr::unsupported_operand(op, lhs.type_name()))
            }
            _ => return Err(RuntimeErr::type_mismatch(op, lhs.type_name(), rhs.type_name())),
        };
        self.push(new::bool(result))
    }

    // Stack -----------------------------------------------------------

    fn push(&mut self, obj: ObjectRef) -> RuntimeResult {
        if self.sp >= self.stack.len() {
            return Err(RuntimeErr::stack_overflow(self.stack.len()));
        }
        self.stack[self.sp] = Some(obj);
        self.sp += 1;
        Ok(())
    }

    fn pop(&mut self) -> RuntimeResult<ObjectRef> {
        if self.sp == 0 {
            return Err(RuntimeErr::empty_stack());
        }
        self.sp -= 1;
        self.stack[self.sp].clone().ok_or_else(RuntimeErr::empty_stack)
    }

    /// The object on top of the stack, if the stack isn't empty.
    pub fn stack_top(&self) -> Option<&ObjectRef> {
        match self.sp {
            0 => None,
            sp => self.stack[sp - 1].as_ref(),
        }
    }

    /// The object most recently popped, if it hasn't been overwritten.
    /// This is how the result of an expression statement is observed
    /// after its trailing Pop.
    pub fn last_popped(&self) -> Option<&ObjectRef> {
        self.stack.get(self.sp).and_then(|slot| slot.as_ref())
    }

    pub fn sp(&self) -> usize {
        self.sp
    }

    pub fn stack_size(&self) -> usize {
        self.stack.len()
    }

    /// Format the live portion of the stack, top first.
    pub fn format_stack(&self) -> String {
        if self.sp == 0 {
            return "[EMPTY]\n".to_owned();
        }
        let mut out = String::new();
        for (index, slot) in self.stack[..self.sp].iter().enumerate().rev() {
            let obj_str = match slot {
                Some(obj) => format!("{obj} ({})", obj.type_name()),
                None => "[EMPTY SLOT]".to_owned(),
            };
            let marker = if index + 1 == self.sp { " <- TOS" } else { "" };
            out.push_str(&format!("{index:0>4} {obj_str}{marker}\n"));
        }
        out
    }

    pub fn display_stack(&self) {
        eprint!("{}", self.format_stack());
    }
}

fn op_symbol(opcode: Opcode) -> &'static str {
    use Opcode::*;
    match opcode {
        Add => "+",
        Sub => "-",
        Mul => "*",
        Div => "/",
        Equal => "==",
        NotEqual => "!=",
        GreaterThan => ">",
        Minus => "-",
        Bang => "!",
        _ => opcode.name(),
    }
}
