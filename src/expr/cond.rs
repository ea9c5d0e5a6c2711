use std::fmt;

use smol_str::SmolStr;

use crate::{
    bind::Binds,
    writer::{FormatContext, FormatWriter},
};

/// One where fragment: caller-written SQL with `?` markers and the values
/// for those markers. The text is opaque to the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub(crate) sql: SmolStr,
    pub(crate) binds: Binds,
}

impl Predicate {
    pub fn new<T>(sql: T, binds: Binds) -> Self
    where
        T: Into<SmolStr>,
    {
        Self {
            sql: sql.into(),
            binds,
        }
    }

    pub fn sql(&self) -> &str {
        self.sql.as_str()
    }

    pub fn binds(&self) -> &Binds {
        &self.binds
    }
}

impl FormatWriter for Predicate {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()> {
        context.writer.write_str(self.sql.as_str())?;
        context.append_binds(self.binds.clone());
        Ok(())
    }
}

/// Fragments are and-ed together, each one kept inside its own parentheses.
#[derive(Debug, Default, Clone)]
pub struct Conditions(pub(crate) Vec<Predicate>);

impl Conditions {
    pub fn push(&mut self, other: Predicate) {
        self.0.push(other);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FormatWriter for Conditions {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()> {
        if self.0.is_empty() {
            return Ok(());
        }
        context.writer.write_char('(')?;
        for (index, predicate) in self.0.iter().enumerate() {
            if index > 0 {
                context.writer.write_str(") AND (")?;
            }
            predicate.format_writer(context)?;
        }
        context.writer.write_char(')')?;
        Ok(())
    }
}
