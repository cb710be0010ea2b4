use quickcrud_core::schema::{Field, Type};

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub ty: Type,
    pub nullable: bool,
}

impl From<&Field> for ColumnDef {
    fn from(field: &Field) -> Self {
        ColumnDef {
            name: field.name.clone(),
            ty: field.ty.clone(),
            nullable: field.nullable,
        }
    }
}
