use std::fmt;

use crate::{
    bind::Binds,
    col::Columns,
    raw::Raw,
    writer::{FormatContext, FormatWriter},
};

/// The single `GROUP BY` of a query with its optional `HAVING`.
#[derive(Debug, Default, Clone)]
pub struct GroupBy {
    pub(crate) columns: Columns,
    pub(crate) maybe_having: Option<Raw>,
    pub(crate) binds: Binds,
}

impl GroupBy {
    pub fn new(columns: Columns) -> Self {
        Self {
            columns,
            maybe_having: None,
            binds: Binds::None,
        }
    }

    pub fn having(mut self, having: Raw, binds: Binds) -> Self {
        self.maybe_having = if having.is_empty() { None } else { Some(having) };
        self.binds = binds;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// A having predicate that will never be written since there is nothing
    /// to group by.
    pub fn has_orphan_having(&self) -> bool {
        self.columns.is_empty() && self.maybe_having.is_some()
    }
}

impl FormatWriter for GroupBy {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()> {
        if self.columns.is_empty() {
            return Ok(());
        }
        context.writer.write_str("GROUP BY ")?;
        self.columns.format_writer(context)?;
        if let Some(ref having) = self.maybe_having {
            context.writer.write_str(" HAVING ")?;
            having.format_writer(context)?;
            context.append_binds(self.binds.clone());
        }
        Ok(())
    }
}
