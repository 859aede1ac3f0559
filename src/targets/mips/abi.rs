use crate::{
    targets::Abi,
    ty::{self, Ty, TyIdx},
};

/// MIPS O32 data layout: natural alignment for scalars, structs aligned to
/// their widest field.
pub struct O32;

impl O32 {
    pub fn new() -> Self {
        Self
    }
}

impl Abi for O32 {
    fn field_offset(&self, storage: &ty::Storage, fields: &[TyIdx], i: usize) -> usize {
        fields
            .iter()
            .take(i)
            .fold(0usize, |offset, ty| {
                offset.next_multiple_of(self.alignment(storage, *ty)) + self.ty_size(storage, *ty)
            })
            .next_multiple_of(self.alignment(storage, fields[i]))
    }

    fn ty_size(&self, storage: &ty::Storage, ty: TyIdx) -> usize {
        match storage.get_ty(ty) {
            Ty::Struct(fields) => {
                if fields.is_empty() {
                    0
                } else {
                    let last_field = fields.len() - 1;
                    (self.field_offset(storage, fields, last_field)
                        + self.ty_size(storage, fields[last_field]))
                    .next_multiple_of(self.alignment(storage, ty))
                }
            }
            Ty::Array { ty, len } => self.ty_size(storage, *ty) * len,
            _ => storage.get_ty(ty).size(),
        }
    }

    fn alignment(&self, storage: &ty::Storage, ty: TyIdx) -> usize {
        match storage.get_ty(ty) {
            Ty::Struct(fields) => fields
                .iter()
                .map(|ty| self.alignment(storage, *ty))
                .max()
                .unwrap_or_default(),
            Ty::Array { ty, .. } => self.alignment(storage, *ty),
            _ => self.ty_size(storage, ty),
        }
    }
}
