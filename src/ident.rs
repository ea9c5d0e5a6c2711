use std::{borrow::Cow, fmt, sync::Arc};

use smol_str::SmolStr;

use crate::{
    Builder,
    raw::Raw,
    writer::{FormatContext, FormatWriter},
};

/// What a query selects from: a table name, literal SQL, or a whole builder
/// used as a derived table.
#[derive(Debug, Clone)]
pub enum TableRef {
    Ident(Ident),
    Raw(Raw),
    Subquery(Box<Builder>),
}

impl TableRef {
    pub fn ident_static(value: &'static str) -> Self {
        Self::Ident(Ident::new_static(value))
    }

    pub fn ident<T>(value: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self::Ident(Ident::new(value))
    }

    pub fn raw<T>(value: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self::Raw(Raw::new(value))
    }

    pub fn is_subquery(&self) -> bool {
        matches!(self, TableRef::Subquery(_))
    }
}

#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ident(SmolStr);

impl Ident {
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self(value.into())
    }

    #[inline]
    pub fn new_static(value: &'static str) -> Self {
        Self(SmolStr::new_static(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FormatWriter for Ident {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()> {
        context.write_ident(self.0.as_str())
    }
}

pub trait IntoIdent {
    fn into_ident(self) -> Ident;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> Ident {
        self
    }
}

impl IntoIdent for &str {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for &String {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for String {
    #[inline(always)]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for Box<str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for Arc<str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl<'a> IntoIdent for Cow<'a, str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for SmolStr {
    #[inline(always)]
    fn into_ident(self) -> Ident {
        Ident(self)
    }
}

pub trait IntoTable {
    fn into_table(self) -> TableRef;
}

impl IntoTable for &str {
    fn into_table(self) -> TableRef {
        TableRef::ident(self)
    }
}

impl IntoTable for String {
    fn into_table(self) -> TableRef {
        TableRef::ident(self)
    }
}

impl IntoTable for Ident {
    fn into_table(self) -> TableRef {
        TableRef::Ident(self)
    }
}

impl IntoTable for Raw {
    fn into_table(self) -> TableRef {
        TableRef::Raw(self)
    }
}

impl IntoTable for Builder {
    fn into_table(self) -> TableRef {
        TableRef::Subquery(Box::new(self))
    }
}

impl IntoTable for &Builder {
    fn into_table(self) -> TableRef {
        TableRef::Subquery(Box::new(self.clone()))
    }
}

impl IntoTable for TableRef {
    fn into_table(self) -> TableRef {
        self
    }
}
