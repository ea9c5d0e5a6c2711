use std::fmt;

use smol_str::SmolStr;

use crate::{
    bind::Array,
    ident::{Ident, IntoIdent},
    raw::Raw,
    writer::{FormatContext, FormatWriter},
};

/// A selected or grouped column: quoted through the adapter, or written raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    Ident(Ident),
    Raw(Raw),
}

impl FormatWriter for Column {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()> {
        match self {
            Column::Ident(ident) => ident.format_writer(context),
            Column::Raw(raw) => raw.format_writer(context),
        }
    }
}

/// `Columns::None` stands for every column.
pub type Columns = Array<Column>;

impl FormatWriter for Columns {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()> {
        if self.is_empty() {
            context.writer.write_char('*')?;
            return Ok(());
        }
        // just format the elem seperated with comma
        for (index, elem) in self.iter().enumerate() {
            if index > 0 {
                context.writer.write_str(", ")?;
            }
            elem.format_writer(context)?;
        }
        Ok(())
    }
}

/// Explicit "all columns" marker.
#[derive(Debug, Default, Clone, Copy)]
pub struct Wildcard;

pub trait IntoColumn {
    fn into_column(self) -> Column;
}

impl IntoColumn for Column {
    fn into_column(self) -> Column {
        self
    }
}

impl IntoColumn for Raw {
    fn into_column(self) -> Column {
        Column::Raw(self)
    }
}

impl IntoColumn for Ident {
    fn into_column(self) -> Column {
        Column::Ident(self)
    }
}

impl IntoColumn for &str {
    fn into_column(self) -> Column {
        Column::Ident(self.into_ident())
    }
}

impl IntoColumn for &String {
    fn into_column(self) -> Column {
        Column::Ident(self.into_ident())
    }
}

impl IntoColumn for String {
    fn into_column(self) -> Column {
        Column::Ident(self.into_ident())
    }
}

impl IntoColumn for SmolStr {
    fn into_column(self) -> Column {
        Column::Ident(self.into_ident())
    }
}

pub trait IntoColumns {
    fn into_columns(self) -> Columns;
}

impl IntoColumns for Columns {
    fn into_columns(self) -> Columns {
        self
    }
}

impl IntoColumns for Wildcard {
    fn into_columns(self) -> Columns {
        Columns::None
    }
}

impl IntoColumns for () {
    fn into_columns(self) -> Columns {
        Columns::None
    }
}

// a lone "*" means every column, like `Wildcard`
impl IntoColumns for &str {
    fn into_columns(self) -> Columns {
        if self == "*" {
            Columns::None
        } else {
            Columns::One(self.into_column())
        }
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Columns {
        self.as_str().into_columns()
    }
}

impl IntoColumns for Raw {
    fn into_columns(self) -> Columns {
        Columns::One(self.into_column())
    }
}

impl IntoColumns for Ident {
    fn into_columns(self) -> Columns {
        Columns::One(self.into_column())
    }
}

impl IntoColumns for Column {
    fn into_columns(self) -> Columns {
        Columns::One(self)
    }
}

impl<T, const N: usize> IntoColumns for [T; N]
where
    T: IntoColumn,
{
    fn into_columns(self) -> Columns {
        Columns::from(self.into_iter().map(IntoColumn::into_column).collect::<Vec<_>>())
    }
}

impl<T> IntoColumns for Vec<T>
where
    T: IntoColumn,
{
    fn into_columns(self) -> Columns {
        Columns::from(self.into_iter().map(IntoColumn::into_column).collect::<Vec<_>>())
    }
}
