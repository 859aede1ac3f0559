use crate::{
    lower::{ArgFlags, CcAssignFn, CcState},
    mir::{self, PhysicalRegister, RegisterClass},
    targets::{
        Abi, TargetLowering,
        mips::{self, Opcode, Register, abi::O32},
    },
    ty::{Storage, Ty, TyIdx},
};

const ARG_REGS: [PhysicalRegister; 4] = [
    Register::A0 as PhysicalRegister,
    Register::A1 as PhysicalRegister,
    Register::A2 as PhysicalRegister,
    Register::A3 as PhysicalRegister,
];

const RET_REGS: [PhysicalRegister; 2] = [
    Register::V0 as PhysicalRegister,
    Register::V1 as PhysicalRegister,
];

/// O32 argument table: one word per piece in `$a0..$a3`, declaration order.
/// Pieces past the fourth word would live on the stack, which the lowering
/// core doesn't model, so they are left unassigned.
fn cc_mips_o32(state: &mut CcState, val_no: usize, loc_ty: TyIdx, _flags: &ArgFlags) {
    match state.allocate_reg(&ARG_REGS) {
        Some(reg) => state.assign_reg(val_no, loc_ty, reg),
        None => state.assign_unallocated(val_no, loc_ty),
    }
}

/// O32 return table: `$v0`, then `$v1`.
fn ret_cc_mips_o32(state: &mut CcState, val_no: usize, loc_ty: TyIdx, _flags: &ArgFlags) {
    match state.allocate_reg(&RET_REGS) {
        Some(reg) => state.assign_reg(val_no, loc_ty, reg),
        None => state.assign_unallocated(val_no, loc_ty),
    }
}

pub struct Lowering {
    abi: O32,
}

impl Lowering {
    pub fn new() -> Self {
        Self { abi: O32::new() }
    }
}

impl TargetLowering for Lowering {
    fn register_ty_for_calling_conv(&self, storage: &Storage, ty: TyIdx) -> TyIdx {
        match storage.get_ty(ty) {
            // narrower integers are promoted to a full word
            Ty::I8 | Ty::I16 | Ty::I32 => storage.i32_ty,
            _ => ty,
        }
    }

    fn register_class_for_calling_conv(&self, _storage: &Storage, _ty: TyIdx) -> RegisterClass {
        mips::RegisterClass::Gpr32.into()
    }

    fn abi_alignment_for_calling_conv(&self, storage: &Storage, ty: TyIdx) -> usize {
        self.abi.alignment(storage, ty)
    }

    fn assign_fn_for_call(&self) -> CcAssignFn {
        cc_mips_o32
    }

    fn assign_fn_for_return(&self) -> CcAssignFn {
        ret_cc_mips_o32
    }

    fn return_opcode(&self) -> mir::Opcode {
        Opcode::RetRA.into()
    }
}
