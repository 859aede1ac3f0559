use crate::{
    lower::{
        ArgInfo, CcAssignment, CcLocation, CcState, FnLowering, Signature, split_to_value_types,
    },
    mir::{Instruction, Operand, PhysicalRegister, Register, VregIdx},
    targets::TargetLowering,
    ty::{self, Ty, TyIdx},
};
use log::{debug, trace};

/// The only types this lowering handles today: scalar integers exactly one
/// machine word wide. Everything else is an ordinary, expected failure the
/// caller is supposed to route to a more general lowering path.
fn is_supported_ty(storage: &ty::Storage, ty: TyIdx) -> bool {
    matches!(storage.get_ty(ty), Ty::I32)
}

/// Realizes a finished assignment list as register copies, in piece order.
/// Incoming reads physical registers at function entry; Outgoing feeds them
/// behind a pending return instruction.
enum ValueHandler<'a> {
    Incoming,
    Outgoing { instr: &'a mut Instruction },
}

impl ValueHandler<'_> {
    /// Returns false on the first piece without a register location. Copies
    /// already emitted for earlier pieces are not rolled back.
    fn handle(
        &mut self,
        lowering: &mut FnLowering,
        assignments: &[CcAssignment],
        args: &[ArgInfo],
    ) -> bool {
        assert_eq!(assignments.len(), args.len());

        for (assignment, arg) in assignments.iter().zip(args) {
            trace!("piece {} -> {}", assignment.val_no, assignment.location);

            match assignment.location {
                CcLocation::Register(reg) => self.assign_value_to_reg(lowering, arg.vreg, reg),
                CcLocation::Unassigned => return false,
            }
        }

        true
    }

    fn assign_value_to_reg(
        &mut self,
        lowering: &mut FnLowering,
        vreg: VregIdx,
        phys: PhysicalRegister,
    ) {
        match self {
            Self::Incoming => {
                lowering.emit(Instruction::copy(
                    Register::Virtual(vreg),
                    Operand::not_def(Register::Physical(phys)),
                ));
                lowering.add_live_in(phys);
            }
            Self::Outgoing { instr } => {
                lowering.emit(Instruction::copy(
                    Register::Physical(phys),
                    Operand::not_def(Register::Virtual(vreg)),
                ));
                instr.add_implicit_use(Register::Physical(phys));
            }
        }
    }
}

pub struct CallLowering<'t, T: TargetLowering> {
    tli: &'t T,
}

impl<'t, T: TargetLowering> CallLowering<'t, T> {
    pub fn new(tli: &'t T) -> Self {
        Self { tli }
    }

    /// Materializes the function's formal arguments: one copy from each
    /// assigned argument register into the parameter's virtual register,
    /// with the argument register marked live-in on the entry block.
    ///
    /// Nothing is emitted unless every parameter type passes the
    /// supported-type check and the signature isn't variadic.
    pub fn lower_formal_arguments(
        &self,
        lowering: &mut FnLowering,
        sig: &Signature,
        vregs: &[VregIdx],
    ) -> bool {
        if sig.params.is_empty() {
            return true;
        }

        if sig.variadic {
            debug!("variadic signatures are not supported");

            return false;
        }

        let ty_storage = lowering.ty_storage;

        if sig
            .params
            .iter()
            .any(|param| !is_supported_ty(ty_storage, param.ty))
        {
            debug!("signature has a parameter outside the supported type set");

            return false;
        }

        assert_eq!(sig.params.len(), vregs.len());
        trace!(
            "lowering {} formal arguments for `{}`",
            sig.params.len(),
            lowering.func.name
        );

        let mut arg_infos = Vec::new();
        let mut orig_indices = Vec::new();

        for (i, (param, &vreg)) in sig.params.iter().zip(vregs).enumerate() {
            let arg = ArgInfo {
                vreg,
                ty: param.ty,
                flags: (&param.attrs).into(),
            };

            split_to_value_types(arg, i, &mut arg_infos, &mut orig_indices);
        }

        for arg in &arg_infos {
            let class = self
                .tli
                .register_class_for_calling_conv(ty_storage, arg.ty);

            lowering.func.vreg_info.set_class(arg.vreg, class);
        }

        let mut state = CcState::new(sig.call_conv, sig.variadic, ty_storage);

        state.analyze_formal_arguments(self.tli, &arg_infos);

        ValueHandler::Incoming.handle(lowering, state.assignments(), &arg_infos)
    }

    /// Builds the target's return instruction, wiring the return value (if
    /// any) through the registers the return table picks. The instruction is
    /// only inserted once every piece has a register, so a failed lowering
    /// never leaves a half-built return in the stream.
    pub fn lower_return(
        &self,
        lowering: &mut FnLowering,
        sig: &Signature,
        val: Option<(VregIdx, TyIdx)>,
    ) -> bool {
        let mut ret = Instruction::new(self.tli.return_opcode());

        if let Some((vreg, ty)) = val {
            let ty_storage = lowering.ty_storage;

            if !is_supported_ty(ty_storage, ty) {
                debug!("return value type is outside the supported type set");

                return false;
            }

            trace!("lowering return value for `{}`", lowering.func.name);

            let mut ret_infos = Vec::new();
            let mut orig_indices = Vec::new();

            split_to_value_types(
                ArgInfo {
                    vreg,
                    ty,
                    flags: Default::default(),
                },
                0,
                &mut ret_infos,
                &mut orig_indices,
            );

            let mut state = CcState::new(sig.call_conv, sig.variadic, ty_storage);

            state.analyze_return(self.tli, &ret_infos);

            let mut handler = ValueHandler::Outgoing { instr: &mut ret };

            if !handler.handle(lowering, state.assignments(), &ret_infos) {
                return false;
            }
        }

        lowering.emit(ret);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lower::{CallConv, Param},
        mir::{self, GenericOpcode},
        targets::{Target as _, mips},
        ty::Storage,
    };

    fn signature(storage: &Storage, params: &[TyIdx], variadic: bool) -> Signature {
        Signature {
            params: params.iter().copied().map(Param::new).collect(),
            ret_ty: storage.void_ty,
            variadic,
            call_conv: CallConv::C,
        }
    }

    fn phys(reg: mips::Register) -> Register {
        Register::Physical(reg.into())
    }

    #[test]
    fn zero_params_lower_trivially() {
        let storage = Storage::new();
        let target = mips::Target::new();
        let mut func = mir::Function::new("nop".into());
        let mut lowering = FnLowering::new(&storage, &mut func);
        let sig = signature(&storage, &[], false);

        assert!(CallLowering::new(target.lowering()).lower_formal_arguments(
            &mut lowering,
            &sig,
            &[]
        ));
        assert!(func.blocks[0].instructions.is_empty());
        assert!(func.blocks[0].live_ins.is_empty());
    }

    #[test]
    fn variadic_signatures_are_rejected() {
        let storage = Storage::new();
        let target = mips::Target::new();
        let mut func = mir::Function::new("printf_like".into());
        let mut lowering = FnLowering::new(&storage, &mut func);
        let vreg = lowering.func.vreg_info.create_vreg(storage.i32_ty);
        let sig = signature(&storage, &[storage.i32_ty], true);

        assert!(!CallLowering::new(target.lowering()).lower_formal_arguments(
            &mut lowering,
            &sig,
            &[vreg]
        ));
        assert!(func.blocks[0].instructions.is_empty());
    }

    #[test]
    fn unsupported_param_fails_without_side_effects() {
        let storage = Storage::new();
        let target = mips::Target::new();
        let mut func = mir::Function::new("wide".into());
        let mut lowering = FnLowering::new(&storage, &mut func);
        let vregs = [
            lowering.func.vreg_info.create_vreg(storage.i32_ty),
            lowering.func.vreg_info.create_vreg(storage.i64_ty),
        ];
        let sig = signature(&storage, &[storage.i32_ty, storage.i64_ty], false);

        assert!(!CallLowering::new(target.lowering()).lower_formal_arguments(
            &mut lowering,
            &sig,
            &vregs
        ));
        // the whole signature is checked before anything is emitted
        assert!(func.blocks[0].instructions.is_empty());
        assert!(func.blocks[0].live_ins.is_empty());
    }

    #[test]
    fn word_sized_params_land_in_argument_registers() {
        let storage = Storage::new();
        let target = mips::Target::new();
        let mut func = mir::Function::new("add3".into());
        let mut lowering = FnLowering::new(&storage, &mut func);
        let vregs: Vec<_> = (0..3)
            .map(|_| lowering.func.vreg_info.create_vreg(storage.i32_ty))
            .collect();
        let sig = signature(&storage, &[storage.i32_ty; 3], false);

        assert!(CallLowering::new(target.lowering()).lower_formal_arguments(
            &mut lowering,
            &sig,
            &vregs
        ));

        let expected_regs = [mips::Register::A0, mips::Register::A1, mips::Register::A2];
        let entry = &func.blocks[0];

        assert_eq!(entry.instructions.len(), 3);

        for ((instr, &vreg), &reg) in entry.instructions.iter().zip(&vregs).zip(&expected_regs) {
            assert!(instr.is_copy());
            assert_eq!(
                instr.operands,
                vec![
                    Operand::def(Register::Virtual(vreg)),
                    Operand::not_def(phys(reg)),
                ]
            );
        }

        assert_eq!(
            entry.live_ins,
            expected_regs
                .iter()
                .map(|&reg| PhysicalRegister::from(reg))
                .collect::<Vec<_>>()
        );

        for &vreg in &vregs {
            assert_eq!(
                func.vreg_info.get_vreg(vreg).class,
                Some(mips::RegisterClass::Gpr32.into())
            );
        }
    }

    #[test]
    fn register_exhaustion_fails_partway() {
        let storage = Storage::new();
        let target = mips::Target::new();
        let mut func = mir::Function::new("many".into());
        let mut lowering = FnLowering::new(&storage, &mut func);
        let vregs: Vec<_> = (0..5)
            .map(|_| lowering.func.vreg_info.create_vreg(storage.i32_ty))
            .collect();
        let sig = signature(&storage, &[storage.i32_ty; 5], false);

        assert!(!CallLowering::new(target.lowering()).lower_formal_arguments(
            &mut lowering,
            &sig,
            &vregs
        ));

        // the fifth piece has no register; copies for the first four stay
        // emitted
        assert_eq!(func.blocks[0].instructions.len(), 4);
        assert_eq!(func.blocks[0].live_ins.len(), 4);
    }

    #[test]
    fn void_return_emits_bare_ret() {
        let storage = Storage::new();
        let target = mips::Target::new();
        let mut func = mir::Function::new("noop".into());
        let mut lowering = FnLowering::new(&storage, &mut func);
        let sig = signature(&storage, &[], false);

        assert!(CallLowering::new(target.lowering()).lower_return(&mut lowering, &sig, None));

        let entry = &func.blocks[0];

        assert_eq!(entry.instructions.len(), 1);
        assert_eq!(entry.instructions[0].opcode, mir::Opcode::from(mips::Opcode::RetRA));
        assert!(entry.instructions[0].implicit_uses.is_empty());
    }

    #[test]
    fn valued_return_copies_into_v0() {
        let storage = Storage::new();
        let target = mips::Target::new();
        let mut func = mir::Function::new("fortytwo".into());
        let mut lowering = FnLowering::new(&storage, &mut func);
        let vreg = lowering.func.vreg_info.create_vreg(storage.i32_ty);
        let sig = signature(&storage, &[], false);

        assert!(CallLowering::new(target.lowering()).lower_return(
            &mut lowering,
            &sig,
            Some((vreg, storage.i32_ty))
        ));

        let entry = &func.blocks[0];

        assert_eq!(entry.instructions.len(), 2);
        assert!(entry.instructions[0].is_copy());
        assert_eq!(
            entry.instructions[0].operands,
            vec![
                Operand::def(phys(mips::Register::V0)),
                Operand::not_def(Register::Virtual(vreg)),
            ]
        );
        assert_eq!(entry.instructions[1].opcode, mir::Opcode::from(mips::Opcode::RetRA));
        assert_eq!(
            entry.instructions[1].implicit_uses,
            vec![phys(mips::Register::V0)]
        );
    }

    #[test]
    fn unsupported_return_leaves_stream_untouched() {
        let storage = Storage::new();
        let target = mips::Target::new();
        let mut func = mir::Function::new("wide_ret".into());
        let mut lowering = FnLowering::new(&storage, &mut func);
        let vreg = lowering.func.vreg_info.create_vreg(storage.i64_ty);
        let sig = signature(&storage, &[], false);

        assert!(!CallLowering::new(target.lowering()).lower_return(
            &mut lowering,
            &sig,
            Some((vreg, storage.i64_ty))
        ));
        // insertion is deferred until assignment succeeds, so not even the
        // return instruction shows up
        assert!(func.blocks[0].instructions.is_empty());
    }

    #[test]
    fn identity_function_round_trip() {
        let storage = Storage::new();
        let target = mips::Target::new();
        let mut func = mir::Function::new("id".into());
        let mut lowering = FnLowering::new(&storage, &mut func);
        let vreg = lowering.func.vreg_info.create_vreg(storage.i32_ty);
        let sig = signature(&storage, &[storage.i32_ty], false);
        let call_lowering = CallLowering::new(target.lowering());

        assert!(call_lowering.lower_formal_arguments(&mut lowering, &sig, &[vreg]));
        assert!(call_lowering.lower_return(&mut lowering, &sig, Some((vreg, storage.i32_ty))));

        let entry = &func.blocks[0];

        assert_eq!(entry.live_ins, vec![PhysicalRegister::from(mips::Register::A0)]);
        assert_eq!(entry.instructions.len(), 3);
        assert_eq!(
            entry.instructions[0].operands,
            vec![
                Operand::def(Register::Virtual(vreg)),
                Operand::not_def(phys(mips::Register::A0)),
            ]
        );
        assert_eq!(
            entry.instructions[1].operands,
            vec![
                Operand::def(phys(mips::Register::V0)),
                Operand::not_def(Register::Virtual(vreg)),
            ]
        );
        assert_eq!(entry.instructions[2].opcode, mir::Opcode::from(mips::Opcode::RetRA));
        assert_eq!(
            entry.instructions[2].implicit_uses,
            vec![phys(mips::Register::V0)]
        );
    }

    #[test]
    fn copies_are_generic_copy_opcode() {
        let instr = Instruction::copy(
            Register::Physical(mips::Register::V0.into()),
            Operand::not_def(Register::Physical(mips::Register::A0.into())),
        );

        assert_eq!(instr.opcode, mir::Opcode::from(GenericOpcode::Copy));
        assert!(instr.is_copy());
    }
}
