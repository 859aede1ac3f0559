use crate::{
    mir::{BasicBlock, RegisterClass},
    ty::TyIdx,
};
use index_vec::{IndexVec, define_index_type};

define_index_type! {
    pub struct VregIdx = usize;
}

#[derive(Debug)]
pub struct Vreg {
    pub ty: TyIdx,
    pub class: Option<RegisterClass>,
}

#[derive(Debug, Default)]
pub struct VregInfo {
    vregs: IndexVec<VregIdx, Vreg>,
}

impl VregInfo {
    pub fn new() -> Self {
        Self {
            vregs: IndexVec::new(),
        }
    }

    pub fn create_vreg(&mut self, ty: TyIdx) -> VregIdx {
        self.vregs.push(Vreg { ty, class: None })
    }

    pub fn get_vreg(&self, idx: VregIdx) -> &Vreg {
        &self.vregs[idx]
    }

    pub fn set_class(&mut self, idx: VregIdx, class: RegisterClass) {
        self.vregs[idx].class = Some(class);
    }
}

#[derive(Debug)]
pub struct Function {
    pub name: String,
    pub vreg_info: VregInfo,
    pub blocks: Vec<BasicBlock>,
}

impl Function {
    pub fn new(name: String) -> Self {
        Self {
            name,
            vreg_info: VregInfo::new(),
            blocks: vec![BasicBlock::new("entry".into())],
        }
    }
}
