use crate::{
    lower::{ArgFlags, ArgInfo, CallConv},
    mir::PhysicalRegister,
    targets::TargetLowering,
    ty::{self, TyIdx},
};
use std::collections::HashSet;

/// A per-target classification table. Called once per value piece, in
/// declaration order; must record exactly one assignment per call, either a
/// register or [`CcLocation::Unassigned`]. Kept a plain function pointer so
/// tables stay pure and trivially swappable in tests.
pub type CcAssignFn = fn(&mut CcState, usize, TyIdx, &ArgFlags);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum CcLocation {
    #[display("reg {_0}")]
    Register(PhysicalRegister),
    /// The table could not place the piece in a register. This core has no
    /// stack-slot fallback, so downstream handling fails on it.
    #[display("unassigned")]
    Unassigned,
}

/// Where one value piece ends up, in bijective order-preserving
/// correspondence with the classified pieces.
#[derive(Debug, Clone, Copy)]
pub struct CcAssignment {
    pub val_no: usize,
    pub loc_ty: TyIdx,
    pub location: CcLocation,
}

/// Accumulated calling-convention decisions for one signature: which
/// registers the table has already handed out and the ordered assignment
/// list it produced.
pub struct CcState<'a> {
    pub call_conv: CallConv,
    pub variadic: bool,
    pub ty_storage: &'a ty::Storage,
    allocated: HashSet<PhysicalRegister>,
    assignments: Vec<CcAssignment>,
}

impl<'a> CcState<'a> {
    pub fn new(call_conv: CallConv, variadic: bool, ty_storage: &'a ty::Storage) -> Self {
        Self {
            call_conv,
            variadic,
            ty_storage,
            allocated: HashSet::new(),
            assignments: Vec::new(),
        }
    }

    /// Hands out the first register from `candidates` that hasn't been
    /// allocated yet.
    pub fn allocate_reg(&mut self, candidates: &[PhysicalRegister]) -> Option<PhysicalRegister> {
        let reg = candidates
            .iter()
            .find(|reg| !self.allocated.contains(reg))
            .copied()?;

        self.allocated.insert(reg);

        Some(reg)
    }

    pub fn assign_reg(&mut self, val_no: usize, loc_ty: TyIdx, reg: PhysicalRegister) {
        self.assignments.push(CcAssignment {
            val_no,
            loc_ty,
            location: CcLocation::Register(reg),
        });
    }

    pub fn assign_unallocated(&mut self, val_no: usize, loc_ty: TyIdx) {
        self.assignments.push(CcAssignment {
            val_no,
            loc_ty,
            location: CcLocation::Unassigned,
        });
    }

    pub fn analyze_formal_arguments<T: TargetLowering>(&mut self, tli: &T, args: &[ArgInfo]) {
        self.analyze(tli, args, tli.assign_fn_for_call());
    }

    pub fn analyze_return<T: TargetLowering>(&mut self, tli: &T, rets: &[ArgInfo]) {
        self.analyze(tli, rets, tli.assign_fn_for_return());
    }

    fn analyze<T: TargetLowering>(&mut self, tli: &T, args: &[ArgInfo], assign: CcAssignFn) {
        for (val_no, arg) in args.iter().enumerate() {
            let loc_ty = tli.register_ty_for_calling_conv(self.ty_storage, arg.ty);
            let mut flags = arg.flags;

            flags.orig_align = tli.abi_alignment_for_calling_conv(self.ty_storage, arg.ty);

            assign(self, val_no, loc_ty, &flags);
            assert_eq!(self.assignments.len(), val_no + 1);
        }
    }

    pub fn assignments(&self) -> &[CcAssignment] {
        &self.assignments
    }
}
