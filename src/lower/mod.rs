pub mod call;
pub mod cc;

pub use call::CallLowering;
pub use cc::{CcAssignFn, CcAssignment, CcLocation, CcState};

use crate::{
    mir::{self, BlockIdx, Instruction, PhysicalRegister, VregIdx},
    ty::{self, TyIdx},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallConv {
    C,
}

/// Attributes attached to one parameter or to the return value of a
/// function declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamAttrs {
    pub zext: bool,
    pub sext: bool,
    pub byval: bool,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub ty: TyIdx,
    pub attrs: ParamAttrs,
}

impl Param {
    pub fn new(ty: TyIdx) -> Self {
        Self {
            ty,
            attrs: ParamAttrs::default(),
        }
    }
}

/// Everything the lowering needs to know about a function's declared
/// interface: parameter types and attributes, variadic-ness and the calling
/// convention it was declared with.
#[derive(Debug, Clone)]
pub struct Signature {
    pub params: Vec<Param>,
    pub ret_ty: TyIdx,
    pub variadic: bool,
    pub call_conv: CallConv,
}

/// ABI-relevant flags of one value piece. `orig_align` is stamped during
/// classification from the target's alignment rules; the rest come straight
/// from the declaration attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgFlags {
    pub zext: bool,
    pub sext: bool,
    pub byval: bool,
    pub orig_align: usize,
}

impl From<&ParamAttrs> for ArgFlags {
    fn from(attrs: &ParamAttrs) -> Self {
        Self {
            zext: attrs.zext,
            sext: attrs.sext,
            byval: attrs.byval,
            orig_align: 0,
        }
    }
}

/// One register-width piece of a logical argument or return value, together
/// with the virtual register that holds it.
#[derive(Debug, Clone)]
pub struct ArgInfo {
    pub vreg: VregIdx,
    pub ty: TyIdx,
    pub flags: ArgFlags,
}

/// Splits one logical value into register-sized pieces, recording the index
/// of the originating value for every piece.
///
/// TODO: perform structure and array splits; for now only types that pass
/// the supported-type check reach this point, so every value is exactly one
/// piece.
pub(crate) fn split_to_value_types(
    orig_arg: ArgInfo,
    orig_idx: usize,
    split_args: &mut Vec<ArgInfo>,
    split_orig_indices: &mut Vec<usize>,
) {
    split_args.push(orig_arg);
    split_orig_indices.push(orig_idx);
}

/// Per-function lowering state: the MIR function being built and the basic
/// block instructions are currently appended to.
pub struct FnLowering<'a> {
    pub ty_storage: &'a ty::Storage,
    pub func: &'a mut mir::Function,
    pub bb_idx: BlockIdx,
}

impl<'a> FnLowering<'a> {
    pub fn new(ty_storage: &'a ty::Storage, func: &'a mut mir::Function) -> Self {
        Self {
            ty_storage,
            func,
            bb_idx: 0,
        }
    }

    pub fn get_basic_block(&mut self) -> &mut mir::BasicBlock {
        &mut self.func.blocks[self.bb_idx]
    }

    pub fn emit(&mut self, instr: Instruction) {
        self.get_basic_block().instructions.push(instr);
    }

    pub fn add_live_in(&mut self, reg: PhysicalRegister) {
        self.get_basic_block().add_live_in(reg);
    }
}
