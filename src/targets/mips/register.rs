use crate::mir::PhysicalRegister;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Register {
    Zero,
    At,

    V0,
    V1,

    A0,
    A1,
    A2,
    A3,

    T0,
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,

    S0,
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,

    T8,
    T9,

    K0,
    K1,

    Gp,
    Sp,
    Fp,
    Ra,

    Num,
}

impl Register {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Zero => "$zero",
            Self::At => "$at",

            Self::V0 => "$v0",
            Self::V1 => "$v1",

            Self::A0 => "$a0",
            Self::A1 => "$a1",
            Self::A2 => "$a2",
            Self::A3 => "$a3",

            Self::T0 => "$t0",
            Self::T1 => "$t1",
            Self::T2 => "$t2",
            Self::T3 => "$t3",
            Self::T4 => "$t4",
            Self::T5 => "$t5",
            Self::T6 => "$t6",
            Self::T7 => "$t7",

            Self::S0 => "$s0",
            Self::S1 => "$s1",
            Self::S2 => "$s2",
            Self::S3 => "$s3",
            Self::S4 => "$s4",
            Self::S5 => "$s5",
            Self::S6 => "$s6",
            Self::S7 => "$s7",

            Self::T8 => "$t8",
            Self::T9 => "$t9",

            Self::K0 => "$k0",
            Self::K1 => "$k1",

            Self::Gp => "$gp",
            Self::Sp => "$sp",
            Self::Fp => "$fp",
            Self::Ra => "$ra",

            Self::Num => unreachable!(),
        }
    }
}

impl From<Register> for PhysicalRegister {
    fn from(value: Register) -> Self {
        value as PhysicalRegister
    }
}

impl From<PhysicalRegister> for Register {
    fn from(value: PhysicalRegister) -> Self {
        assert!(value < Self::Num as PhysicalRegister);

        unsafe { std::mem::transmute::<_, Self>(value) }
    }
}
