use std::{borrow::Cow, fmt};

/// The dialect-specific seam of the builder: turns a bare table or column name
/// into a quoted identifier.
///
/// The provided method returns the name untouched, so an adapter that does not
/// quote at all only needs an empty impl block.
pub trait Adapter: fmt::Debug + Send + Sync {
    fn quote_identifier<'a>(&self, identifier: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(identifier)
    }
}

/// No-op adapter, identifiers are written exactly as given.
#[derive(Debug, Default, Clone, Copy)]
pub struct Plain;

impl Adapter for Plain {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySql,
    Sqlite,
    MsSql,
}

impl Dialect {
    fn quotes(&self) -> (char, char) {
        match self {
            Dialect::Postgres | Dialect::Sqlite => ('"', '"'),
            Dialect::MySql => ('`', '`'),
            Dialect::MsSql => ('[', ']'),
        }
    }
}

impl Adapter for Dialect {
    fn quote_identifier<'a>(&self, identifier: &'a str) -> Cow<'a, str> {
        Cow::Owned(quote_parts(identifier, self.quotes()))
    }
}

// each dotted part is quoted on its own, `*` stays bare
fn quote_parts(identifier: &str, (open, close): (char, char)) -> String {
    let mut out = String::with_capacity(identifier.len() + 2);
    for (i, part) in identifier.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        if part == "*" {
            out.push('*');
            continue;
        }
        out.push(open);
        for char in part.chars() {
            // duplicate the closing quote if present
            if char == close {
                out.push(close);
            }
            out.push(char);
        }
        out.push(close);
    }
    out
}

#[cfg(feature = "postgres")]
impl Adapter for sqlx::Postgres {
    fn quote_identifier<'a>(&self, identifier: &'a str) -> Cow<'a, str> {
        Dialect::Postgres.quote_identifier(identifier)
    }
}

#[cfg(feature = "mysql")]
impl Adapter for sqlx::MySql {
    fn quote_identifier<'a>(&self, identifier: &'a str) -> Cow<'a, str> {
        Dialect::MySql.quote_identifier(identifier)
    }
}

#[cfg(feature = "sqlite")]
impl Adapter for sqlx::Sqlite {
    fn quote_identifier<'a>(&self, identifier: &'a str) -> Cow<'a, str> {
        Dialect::Sqlite.quote_identifier(identifier)
    }
}
