pub mod basic_block;
pub mod function;
mod instruction;
mod opcode;

pub use basic_block::BasicBlock;
pub use function::{Function, Vreg, VregIdx, VregInfo};
pub use instruction::{Builder as InstrBuilder, Instruction};
pub use opcode::{GenericOpcode, Opcode};

pub type PhysicalRegister = usize;
pub type BlockIdx = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterClass(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterRole {
    Def,
    Use,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Register {
    Virtual(VregIdx),
    Physical(PhysicalRegister),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(Register, RegisterRole),
}

impl Operand {
    pub fn def(r: Register) -> Self {
        Self::Register(r, RegisterRole::Def)
    }

    // Can't use `use` -.-
    pub fn not_def(r: Register) -> Self {
        Self::Register(r, RegisterRole::Use)
    }
}
