use simian_builtins::code::{make, ByteCode, Instructions, Opcode};
use simian_builtins::types::{new, ObjectRef};
use simian_util::op::{InfixOperator, PrefixOperator};
use simian_util::source::Location;

use crate::ast;

use super::result::{CompErr, CompResult};
use super::symbol_table::SymbolTable;

/// Operand for forward jumps until the target is known.
const PLACEHOLDER_ADDR: usize = 9999;

type VisitResult = Result<(), CompErr>;

/// Opcode and address of an instruction that's already been emitted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct EmittedInst {
    opcode: Opcode,
    addr: usize,
}

/// Walks an AST and emits instructions plus the constants they refer
/// to. A compiler is good for one program; use a fresh one (optionally
/// seeded with an existing symbol table) for each compile.
pub struct Compiler {
    instructions: Instructions,
    constants: Vec<ObjectRef>,
    last_inst: Option<EmittedInst>,
    prev_inst: Option<EmittedInst>,
    symbol_table: SymbolTable,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_symbol_table(SymbolTable::new())
    }

    pub fn with_symbol_table(symbol_table: SymbolTable) -> Self {
        Self {
            instructions: Instructions::new(),
            constants: vec![],
            last_inst: None,
            prev_inst: None,
            symbol_table,
        }
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    pub fn symbol_table_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbol_table
    }

    pub fn compile(&mut self, program: &ast::Program) -> CompResult {
        log::trace!("BEGIN: compile program");
        self.visit_statements(&program.statements)?;
        log::trace!(
            "END: compile program ({} bytes, {} constants)",
            self.instructions.len(),
            self.constants.len()
        );
        Ok(())
    }

    /// Snapshot of the instructions and constants emitted so far. After
    /// a failed compile, this is whatever was emitted before the error.
    pub fn bytecode(&self) -> ByteCode {
        ByteCode::new(self.instructions.clone(), self.constants.clone())
    }

    pub fn into_bytecode(self) -> ByteCode {
        ByteCode::new(self.instructions, self.constants)
    }

    // Visitors --------------------------------------------------------

    fn visit_statements(&mut self, statements: &[ast::Statement]) -> VisitResult {
        for statement in statements {
            self.visit_statement(statement)?;
        }
        Ok(())
    }

    fn visit_statement(&mut self, node: &ast::Statement) -> VisitResult {
        match &node.kind {
            ast::StatementKind::Expr(expr) => {
                if let ast::ExprKind::If(if_expr) = &expr.kind {
                    if if_expr.alternative.is_none() {
                        return self.visit_if_statement(if_expr);
                    }
                }
                self.visit_expr(expr)?;
                self.emit(Opcode::Pop, &[]);
            }
        }
        Ok(())
    }

    fn visit_expr(&mut self, node: &ast::Expr) -> VisitResult {
        type Kind = ast::ExprKind;
        match &node.kind {
            Kind::Int(value) => {
                let index = self.add_const(new::int(*value))?;
                self.emit(Opcode::Constant, &[index]);
            }
            Kind::Bool(true) => {
                self.emit(Opcode::True, &[]);
            }
            Kind::Bool(false) => {
                self.emit(Opcode::False, &[]);
            }
            Kind::Prefix(op, operand) => {
                self.visit_prefix_op(op, operand, node.start, node.end)?
            }
            Kind::Infix(lhs, op, rhs) => {
                self.visit_infix_op(lhs, op, rhs, node.start, node.end)?
            }
            Kind::If(if_expr) => self.visit_if_expr(if_expr, node.start, node.end)?,
        }
        Ok(())
    }

    fn visit_prefix_op(
        &mut self,
        op: &str,
        operand: &ast::Expr,
        start: Location,
        end: Location,
    ) -> VisitResult {
        self.visit_expr(operand)?;
        let op = PrefixOperator::from_token(op)
            .map_err(|_| CompErr::unknown_prefix_operator(op, start, end))?;
        match op {
            PrefixOperator::Negate => self.emit(Opcode::Minus, &[]),
            PrefixOperator::Not => self.emit(Opcode::Bang, &[]),
        };
        Ok(())
    }

    fn visit_infix_op(
        &mut self,
        lhs: &ast::Expr,
        op: &str,
        rhs: &ast::Expr,
        start: Location,
        end: Location,
    ) -> VisitResult {
        // a < b is compiled as b > a.
        if op == "<" {
            self.visit_expr(rhs)?;
            self.visit_expr(lhs)?;
        } else {
            self.visit_expr(lhs)?;
            self.visit_expr(rhs)?;
        }
        let op = InfixOperator::from_token(op)
            .map_err(|_| CompErr::unknown_infix_operator(op, start, end))?;
        let opcode = match op {
            InfixOperator::Add => Opcode::Add,
            InfixOperator::Sub => Opcode::Sub,
            InfixOperator::Mul => Opcode::Mul,
            InfixOperator::Div => Opcode::Div,
            InfixOperator::Equal => Opcode::Equal,
            InfixOperator::NotEqual => Opcode::NotEqual,
            InfixOperator::LessThan | InfixOperator::GreaterThan => Opcode::GreaterThan,
        };
        self.emit(opcode, &[]);
        Ok(())
    }

    /// Compile an if/else expression, which leaves the value of
    /// whichever branch ran on the stack.
    ///
    /// ```text
    /// <condition>
    /// JumpNotTruthy ELSE
    /// <consequence without trailing Pop>
    /// Jump END
    /// ELSE: <alternative without trailing Pop>
    /// END:
    /// ```
    fn visit_if_expr(
        &mut self,
        node: &ast::IfExpr,
        start: Location,
        end: Location,
    ) -> VisitResult {
        let alternative = match &node.alternative {
            Some(alternative) => alternative,
            None => return Err(CompErr::valueless_if(start, end)),
        };

        self.visit_expr(&node.condition)?;
        let jump_not_truthy = self.emit(Opcode::JumpNotTruthy, &[PLACEHOLDER_ADDR]);

        self.visit_branch(&node.consequence)?;
        let jump = self.emit(Opcode::Jump, &[PLACEHOLDER_ADDR]);

        self.change_operand(jump_not_truthy, self.instructions.len())?;

        self.visit_branch(alternative)?;
        self.change_operand(jump, self.instructions.len())?;

        Ok(())
    }

    /// Compile an if without an else in statement position. The
    /// consequence keeps its Pops and nothing is left on the stack
    /// either way.
    ///
    /// ```text
    /// <condition>
    /// JumpNotTruthy END
    /// <consequence>
    /// END:
    /// ```
    fn visit_if_statement(&mut self, node: &ast::IfExpr) -> VisitResult {
        self.visit_expr(&node.condition)?;
        let jump_not_truthy = self.emit(Opcode::JumpNotTruthy, &[PLACEHOLDER_ADDR]);
        self.visit_statements(&node.consequence.statements)?;
        self.change_operand(jump_not_truthy, self.instructions.len())?;
        // The jump lands here, so whatever came last must stay put.
        self.last_inst = None;
        self.prev_inst = None;
        Ok(())
    }

    /// Compile a branch of an if/else so that it leaves its value on
    /// the stack.
    fn visit_branch(&mut self, block: &ast::Block) -> VisitResult {
        if !block.yields_value() {
            return Err(CompErr::branch_without_value(block.start, block.end));
        }
        self.visit_statements(&block.statements)?;
        if self.last_inst_is(Opcode::Pop) {
            self.remove_last_inst();
        }
        Ok(())
    }

    // Emission --------------------------------------------------------

    fn emit(&mut self, opcode: Opcode, operands: &[usize]) -> EmittedInst {
        let addr = self.instructions.push(&make(opcode, operands));
        let inst = EmittedInst { opcode, addr };
        self.prev_inst = self.last_inst;
        self.last_inst = Some(inst);
        inst
    }

    fn add_const(&mut self, obj: ObjectRef) -> Result<usize, CompErr> {
        let index = self.constants.len();
        if index > u16::MAX as usize {
            return Err(CompErr::too_many_constants(index + 1));
        }
        self.constants.push(obj);
        Ok(index)
    }

    fn last_inst_is(&self, opcode: Opcode) -> bool {
        matches!(self.last_inst, Some(inst) if inst.opcode == opcode)
    }

    fn remove_last_inst(&mut self) {
        if let Some(inst) = self.last_inst {
            self.instructions.truncate(inst.addr);
            self.last_inst = self.prev_inst;
            self.prev_inst = None;
        }
    }

    /// Re-encode the single-operand instruction `inst` with `operand`
    /// and write it over the original.
    fn change_operand(&mut self, inst: EmittedInst, operand: usize) -> VisitResult {
        if operand > u16::MAX as usize {
            return Err(CompErr::jump_out_of_range(operand));
        }
        log::trace!("PATCH: {} @ {} -> {operand}", inst.opcode.name(), inst.addr);
        self.instructions.replace(inst.addr, &make(inst.opcode, &[operand]));
        Ok(())
    }
}
