pub type Opcode = usize;

#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericOpcode {
    Copy,

    Num,
}

impl From<GenericOpcode> for Opcode {
    fn from(value: GenericOpcode) -> Self {
        value as Opcode
    }
}

impl From<Opcode> for GenericOpcode {
    fn from(value: Opcode) -> Self {
        assert!(value < Self::Num as Opcode);

        unsafe { std::mem::transmute::<_, Self>(value) }
    }
}
