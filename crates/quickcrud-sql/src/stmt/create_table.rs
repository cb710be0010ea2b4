use super::{ColumnDef, Statement};
use quickcrud_core::schema::{ForeignKey, Model};

#[derive(Debug, Clone)]
pub struct CreateTable {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub primary_key: String,

    /// Single-column unique constraints, other than the primary key
    pub unique: Vec<String>,

    pub foreign_keys: Vec<(String, ForeignKey)>,
}

impl CreateTable {
    pub fn from_model(model: &Model) -> CreateTable {
        CreateTable {
            name: model.name.clone(),
            columns: model.fields.iter().map(ColumnDef::from).collect(),
            primary_key: model.primary_key().name.clone(),
            unique: model
                .fields
                .iter()
                .filter(|field| field.unique && !field.primary_key)
                .map(|field| field.name.clone())
                .collect(),
            foreign_keys: model
                .fields
                .iter()
                .filter_map(|field| {
                    let fk = field.references.clone()?;
                    Some((field.name.clone(), fk))
                })
                .collect(),
        }
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Statement::CreateTable(value)
    }
}
