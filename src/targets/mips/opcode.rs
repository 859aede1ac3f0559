use crate::mir::{self, GenericOpcode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Opcode {
    /// Return through `$ra`.
    RetRA,

    Num,
}

impl From<Opcode> for mir::Opcode {
    fn from(value: Opcode) -> Self {
        GenericOpcode::Num as mir::Opcode + value as mir::Opcode
    }
}

impl From<mir::Opcode> for Opcode {
    fn from(value: mir::Opcode) -> Self {
        let value = value - GenericOpcode::Num as mir::Opcode;

        assert!(value < Self::Num as mir::Opcode);

        unsafe { std::mem::transmute::<_, Self>(value) }
    }
}
