use super::Schema;
use crate::{Error, Result};
use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        self.verify_field_names_are_unique()?;
        self.verify_primary_keys_are_not_nullable()?;
        self.verify_foreign_keys()?;
        Ok(())
    }

    fn verify_field_names_are_unique(&self) -> Result<()> {
        for model in self.schema.models() {
            let mut seen = HashSet::new();

            for field in &model.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(Error::invalid_schema(format!(
                        "duplicate field `{}` on `{}`",
                        field.name, model.name
                    )));
                }
            }
        }

        Ok(())
    }

    fn verify_primary_keys_are_not_nullable(&self) -> Result<()> {
        for model in self.schema.models() {
            let pk = model.primary_key();

            if pk.nullable {
                return Err(Error::invalid_schema(format!(
                    "primary key `{}` on `{}` is nullable",
                    pk.name, model.name
                )));
            }
        }

        Ok(())
    }

    fn verify_foreign_keys(&self) -> Result<()> {
        for model in self.schema.models() {
            for field in &model.fields {
                let Some(fk) = &field.references else {
                    continue;
                };

                let target = self
                    .schema
                    .model(&fk.table)
                    .map_err(|_| {
                        Error::invalid_schema(format!(
                            "`{}.{}` references missing model `{}`",
                            model.name, field.name, fk.table
                        ))
                    })?
                    .field(&fk.column)
                    .ok_or_else(|| {
                        Error::invalid_schema(format!(
                            "`{}.{}` references missing field `{}.{}`",
                            model.name, field.name, fk.table, fk.column
                        ))
                    })?;

                if target.ty != field.ty {
                    return Err(Error::invalid_schema(format!(
                        "`{}.{}` is {} but references `{}.{}` of type {}",
                        model.name, field.name, field.ty, fk.table, fk.column, target.ty
                    )));
                }
            }
        }

        Ok(())
    }
}
