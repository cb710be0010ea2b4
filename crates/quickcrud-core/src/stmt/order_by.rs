use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub direction: Direction,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl OrderBy {
    pub fn asc(column: impl Into<String>) -> OrderBy {
        OrderBy {
            column: column.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> OrderBy {
        OrderBy {
            column: column.into(),
            direction: Direction::Desc,
        }
    }

    /// Parses `column[:ASC|DESC]`. The direction is case-insensitive and
    /// defaults to ascending.
    pub fn parse(src: &str) -> Result<OrderBy> {
        let (column, direction) = match src.split_once(':') {
            Some((column, direction)) => (column, Some(direction)),
            None => (src, None),
        };

        let column = column.trim();
        if column.is_empty() {
            return Err(Error::invalid_request(format!(
                "invalid order_by_columns entry {src:?}"
            )));
        }

        let direction = match direction.map(str::trim) {
            None => Direction::Asc,
            Some(dir) if dir.eq_ignore_ascii_case("asc") => Direction::Asc,
            Some(dir) if dir.eq_ignore_ascii_case("desc") => Direction::Desc,
            Some(dir) => {
                return Err(Error::invalid_request(format!(
                    "invalid sort direction {dir:?}"
                )))
            }
        };

        Ok(OrderBy {
            column: column.to_string(),
            direction,
        })
    }
}
