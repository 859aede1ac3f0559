use crate::mir::{BlockIdx, Instruction, PhysicalRegister};
use std::collections::HashSet;

#[derive(Debug)]
pub struct BasicBlock {
    pub name: String,
    pub instructions: Vec<Instruction>,
    pub successors: HashSet<BlockIdx>,
    pub live_ins: Vec<PhysicalRegister>,
}

impl BasicBlock {
    pub fn new(name: String) -> Self {
        Self {
            name,
            instructions: Vec::new(),
            successors: HashSet::new(),
            live_ins: Vec::new(),
        }
    }

    /// Records a physical register as defined on entry to this block, so
    /// later liveness passes treat it as live rather than undefined.
    pub fn add_live_in(&mut self, reg: PhysicalRegister) {
        if !self.live_ins.contains(&reg) {
            self.live_ins.push(reg);
        }
    }
}
