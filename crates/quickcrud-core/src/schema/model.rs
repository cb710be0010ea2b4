use super::Field;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct Model {
    /// Table name
    pub name: String,

    /// Fields, in declaration order
    pub fields: Vec<Field>,

    /// Index of the primary key in `fields`. Set when the model is
    /// registered with a schema.
    pk: usize,
}

impl Model {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Model {
        Model {
            name: name.into(),
            fields: fields.into_iter().collect(),
            pk: 0,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Looks up a field, failing with an unknown field error.
    pub fn expect_field(&self, name: &str) -> Result<&Field> {
        self.field(name)
            .ok_or_else(|| Error::unknown_field(&self.name, name))
    }

    pub fn primary_key(&self) -> &Field {
        &self.fields[self.pk]
    }

    /// A copy of the model without the named columns. The primary key is
    /// always kept.
    pub fn without_columns<'a>(&self, excluded: impl IntoIterator<Item = &'a str>) -> Model {
        let excluded: Vec<&str> = excluded.into_iter().collect();
        let pk = self.primary_key().name.clone();

        let fields: Vec<Field> = self
            .fields
            .iter()
            .filter(|field| field.name == pk || !excluded.contains(&field.name.as_str()))
            .cloned()
            .collect();

        let pk = fields
            .iter()
            .position(|field| field.primary_key)
            .unwrap_or_default();

        Model {
            name: self.name.clone(),
            fields,
            pk,
        }
    }

    pub(super) fn index_primary_key(&mut self) -> Result<()> {
        let mut pks = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.primary_key);

        match (pks.next(), pks.next()) {
            (Some((index, _)), None) => {
                self.pk = index;
                Ok(())
            }
            (None, _) => Err(Error::invalid_schema(format!(
                "model `{}` has no primary key",
                self.name
            ))),
            (Some(_), Some(_)) => Err(Error::invalid_schema(format!(
                "model `{}` has more than one primary key",
                self.name
            ))),
        }
    }
}
