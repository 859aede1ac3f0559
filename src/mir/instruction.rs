use crate::mir::{GenericOpcode, Opcode, Operand, Register};

#[derive(Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
    pub implicit_defs: Vec<Register>,
    pub implicit_uses: Vec<Register>,
}

impl Instruction {
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            operands: Vec::new(),
            implicit_defs: Vec::new(),
            implicit_uses: Vec::new(),
        }
    }

    pub fn copy(lhs: Register, rhs: Operand) -> Self {
        Builder::new(GenericOpcode::Copy.into())
            .add_def(lhs)
            .add_operand(rhs)
            .into()
    }

    pub fn is_copy(&self) -> bool {
        self.opcode == Opcode::from(GenericOpcode::Copy)
    }

    pub fn add_implicit_use(&mut self, reg: Register) {
        if !self.implicit_uses.contains(&reg) {
            self.implicit_uses.push(reg);
        }
    }

    pub fn add_implicit_def(&mut self, reg: Register) {
        if !self.implicit_defs.contains(&reg) {
            self.implicit_defs.push(reg);
        }
    }
}

pub struct Builder {
    instr: Instruction,
}

impl Builder {
    pub fn new(opcode: Opcode) -> Self {
        Self {
            instr: Instruction::new(opcode),
        }
    }

    pub fn add_operand(mut self, operand: Operand) -> Self {
        self.instr.operands.push(operand);

        self
    }

    pub fn add_def(self, reg: Register) -> Self {
        self.add_operand(Operand::def(reg))
    }

    pub fn add_use(self, reg: Register) -> Self {
        self.add_operand(Operand::not_def(reg))
    }
}

impl From<Builder> for Instruction {
    fn from(value: Builder) -> Self {
        value.instr
    }
}
