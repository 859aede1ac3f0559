pub mod mips;

use crate::{
    lower::CcAssignFn,
    mir::{Opcode, PhysicalRegister, RegisterClass},
    ty::{Storage, TyIdx},
};

pub trait Abi {
    fn field_offset(&self, storage: &Storage, fields: &[TyIdx], i: usize) -> usize;
    fn ty_size(&self, storage: &Storage, ty: TyIdx) -> usize;
    fn alignment(&self, storage: &Storage, ty: TyIdx) -> usize;
}

/// Per-target calling-convention policy: how value types map onto what the
/// target's registers actually hold, and the assignment tables that place
/// pieces into physical registers. All of it must be deterministic and pure.
pub trait TargetLowering {
    /// The type the target's registers hold for `ty` in a call; narrower
    /// scalars are promoted to it before classification.
    fn register_ty_for_calling_conv(&self, storage: &Storage, ty: TyIdx) -> TyIdx;

    fn register_class_for_calling_conv(&self, storage: &Storage, ty: TyIdx) -> RegisterClass;

    fn abi_alignment_for_calling_conv(&self, storage: &Storage, ty: TyIdx) -> usize;

    fn assign_fn_for_call(&self) -> CcAssignFn;

    fn assign_fn_for_return(&self) -> CcAssignFn;

    /// Opcode of the target's bare return instruction.
    fn return_opcode(&self) -> Opcode;
}

pub trait RegisterInfo {
    fn get_registers_by_class(&self, class: &RegisterClass) -> &[PhysicalRegister];
    fn get_name(&self, reg: &PhysicalRegister) -> &'static str;
}

pub trait Target {
    type Abi: Abi;
    type RegisterInfo: RegisterInfo;
    type Lowering: TargetLowering;

    fn abi(&self) -> &Self::Abi;
    fn register_info(&self) -> &Self::RegisterInfo;
    fn lowering(&self) -> &Self::Lowering;
}
