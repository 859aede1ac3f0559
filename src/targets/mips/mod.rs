pub mod abi;
mod lowering;
pub mod opcode;
pub mod register;

use crate::mir::{self, PhysicalRegister};
use std::collections::HashMap;

pub use abi::O32;
pub use lowering::Lowering;
pub use opcode::Opcode;
pub use register::Register;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum RegisterClass {
    Gpr32,
}

impl From<RegisterClass> for mir::RegisterClass {
    fn from(value: RegisterClass) -> Self {
        mir::RegisterClass(value as usize)
    }
}

pub struct RegisterInfo {
    register_classes: HashMap<mir::RegisterClass, Vec<PhysicalRegister>>,
}

impl RegisterInfo {
    pub fn new() -> Self {
        // $zero, $at, $k0/$k1, $gp, $sp, $fp and $ra are reserved
        let gpr32 = [
            Register::V0,
            Register::V1,
            Register::A0,
            Register::A1,
            Register::A2,
            Register::A3,
            Register::T0,
            Register::T1,
            Register::T2,
            Register::T3,
            Register::T4,
            Register::T5,
            Register::T6,
            Register::T7,
            Register::S0,
            Register::S1,
            Register::S2,
            Register::S3,
            Register::S4,
            Register::S5,
            Register::S6,
            Register::S7,
            Register::T8,
            Register::T9,
        ];

        Self {
            register_classes: HashMap::from([(
                RegisterClass::Gpr32.into(),
                gpr32.into_iter().map(Into::into).collect(),
            )]),
        }
    }
}

impl crate::targets::RegisterInfo for RegisterInfo {
    fn get_registers_by_class(&self, class: &mir::RegisterClass) -> &[PhysicalRegister] {
        &self.register_classes[class]
    }

    fn get_name(&self, reg: &PhysicalRegister) -> &'static str {
        Register::from(*reg).name()
    }
}

pub struct Target {
    abi: O32,
    register_info: RegisterInfo,
    lowering: Lowering,
}

impl Target {
    pub fn new() -> Self {
        Self {
            abi: O32::new(),
            register_info: RegisterInfo::new(),
            lowering: Lowering::new(),
        }
    }
}

impl super::Target for Target {
    type Abi = O32;
    type RegisterInfo = RegisterInfo;
    type Lowering = Lowering;

    fn abi(&self) -> &Self::Abi {
        &self.abi
    }

    fn register_info(&self) -> &Self::RegisterInfo {
        &self.register_info
    }

    fn lowering(&self) -> &Self::Lowering {
        &self.lowering
    }
}
