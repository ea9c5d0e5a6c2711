//! Fluent `SELECT` builder compiling to one SQL string with `?` placeholders
//! plus the ordered list of values bound to them.
//!
//! ```
//! use qselect::{Builder, Dialect, Sort};
//!
//! let mut builder = Builder::new(Dialect::Postgres, "users");
//! builder
//!     .set_columns(["id", "name"])
//!     .where_raw("age > ?", 18)
//!     .where_in("role", ["admin", "staff"])?
//!     .order(Sort::desc("created_at"))?
//!     .limit(10);
//!
//! let compiled = builder.compile()?;
//! assert_eq!(
//!     "SELECT \"id\", \"name\" FROM \"users\" WHERE (age > ?) AND (\"role\" IN (?, ?)) ORDER BY \"created_at\" DESC LIMIT 10",
//!     compiled.text,
//! );
//! assert_eq!(3, compiled.values.len());
//! # Ok::<(), qselect::Error>(())
//! ```

mod adapter;
mod alias;
mod bind;
mod builder;
mod col;
mod error;
mod exec;
mod expr;
mod ident;
mod options;
mod paginate;
mod raw;
mod writer;

pub use adapter::{Adapter, Dialect, Plain};
pub use alias::{AliasGenerator, AliasSequence};
pub use bind::{Array, Bind, Binds, IntoBind, IntoBinds};
pub use builder::{Builder, CompiledQuery, IntoCount};
pub use col::{Column, Columns, IntoColumn, IntoColumns, Wildcard};
pub use error::{Error, Result};
pub use exec::{Executor, Processor, Record};
pub use expr::{
    Conditions, GroupBy, InList, InOperator, IntoInList, IntoOrder, IntoOrderExpr, Order,
    OrderExpr, Ordering, Predicate, Sort,
};
pub use ident::{Ident, IntoIdent, IntoTable, TableRef};
pub use options::{ALIAS_PREFIX, OptionValue, Options, STRICT};
pub use paginate::Paginator;
pub use raw::{IntoRaw, Raw};

pub fn ident_static(value: &'static str) -> Ident {
    Ident::new_static(value)
}

pub fn ident(value: &str) -> Ident {
    Ident::new(value)
}

pub fn raw_static(value: &'static str) -> Raw {
    Raw::new_static(value)
}

pub fn raw(value: &str) -> Raw {
    Raw::new(value)
}

/// Mixed column list, e.g. `cols!["id", raw("count(*)")]`.
#[macro_export]
macro_rules! cols {
    () => {
        $crate::Columns::None
    };
    ( $($col:expr),+ $(,)? ) => {
        [$( $crate::IntoColumn::into_column($col) ),+]
    };
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::{adapter::Adapter, writer};

    pub(crate) fn format_writer<W: writer::FormatWriter>(writer: W, adapter: &dyn Adapter) -> String {
        let mut str = String::new();
        let mut context = writer::FormatContext::new(&mut str, adapter);
        writer.format_writer(&mut context).unwrap();
        str
    }
}
