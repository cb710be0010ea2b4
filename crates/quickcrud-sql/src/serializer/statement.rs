use super::{Comma, Delimited, Ident, Params, ToSql};

use crate::stmt::{self, Statement};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Query(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

/// Column definitions followed by table constraints, one per line.
struct TableElements<'a>(&'a stmt::CreateTable);

impl ToSql for TableElements<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        for column in &self.0.columns {
            fmt!(f, "\n    " column ",");
        }

        let pk = Ident(&self.0.primary_key);
        fmt!(f, "\n    PRIMARY KEY (" pk ")");

        for column in &self.0.unique {
            let column = Ident(column);
            fmt!(f, ",\n    UNIQUE (" column ")");
        }

        for (column, fk) in &self.0.foreign_keys {
            let column = Ident(column);
            let table = Ident(&fk.table);
            let target = Ident(&fk.column);
            fmt!(f, ",\n    FOREIGN KEY (" column ") REFERENCES " table " (" target ")");
        }

        fmt!(f, "\n");
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let name = Ident(&self.name);
        let elements = TableElements(self);

        fmt!(f, "CREATE TABLE " name " (" elements ")");
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = Ident(&self.table);
        let filter = Where(&self.filter);
        let returning = Returning(&self.returning);

        fmt!(f, "DELETE FROM " table filter returning);
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = Ident(&self.table);
        let returning = Returning(&self.returning);

        if self.columns.is_empty() {
            fmt!(f, "INSERT INTO " table " DEFAULT VALUES" returning);
        } else {
            let columns = Comma(self.columns.iter().map(Ident));
            let values = Comma(&self.values);

            fmt!(f, "INSERT INTO " table " (" columns ") VALUES (" values ")" returning);
        }
    }
}

impl ToSql for &stmt::Query {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let columns = Comma(self.columns.iter().map(Ident));
        let table = Ident(&self.table);
        let filter = Where(&self.filter);

        fmt!(f, "SELECT " columns " FROM " table filter);

        if !self.order_by.is_empty() {
            let order_by = Comma(&self.order_by);
            fmt!(f, " ORDER BY " order_by);
        }

        match (self.limit, self.offset) {
            (Some(limit), _) => fmt!(f, " LIMIT " limit),
            // SQLite has no OFFSET without LIMIT
            (None, Some(_)) if f.serializer.is_sqlite() => fmt!(f, " LIMIT -1"),
            (None, _) => {}
        }

        if let Some(offset) = self.offset {
            fmt!(f, " OFFSET " offset);
        }
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = Ident(&self.table);
        let assignments = Comma(&self.assignments);
        let filter = Where(&self.filter);
        let returning = Returning(&self.returning);

        fmt!(f, "UPDATE " table " SET " assignments filter returning);
    }
}

impl ToSql for &(String, stmt::Value) {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let column = Ident(&self.0);
        let value = &self.1;

        fmt!(f, column " = " value);
    }
}

impl ToSql for &stmt::OrderBy {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let column = Ident(&self.column);
        let direction = match self.direction {
            stmt::Direction::Asc => " ASC",
            stmt::Direction::Desc => " DESC",
        };

        fmt!(f, column direction);
    }
}

/// ` WHERE <filter>`, omitted when the filter matches everything.
struct Where<'a>(&'a stmt::Expr);

impl ToSql for Where<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        if !self.0.is_true() {
            let filter = self.0;
            fmt!(f, " WHERE " filter);
        }
    }
}

struct Returning<'a>(&'a [String]);

impl ToSql for Returning<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        if !self.0.is_empty() {
            let columns = Delimited(self.0.iter().map(Ident), ", ");
            fmt!(f, " RETURNING " columns);
        }
    }
}
