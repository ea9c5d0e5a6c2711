use std::{fmt::Write, ops::Deref};

use crate::{
    CompiledQuery,
    adapter::Adapter,
    bind::{Bind, Binds},
};

pub(crate) trait FormatWriter {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()>;
}

/// Text and bound values are produced by the same walk, so every `?` written
/// here lines up with the value pushed at the same moment.
pub(crate) struct FormatContext<'a, W: Write> {
    pub(crate) writer: &'a mut W,
    pub(crate) adapter: &'a dyn Adapter,
    binds: Binds,
}

impl<'a, W: Write> FormatContext<'a, W> {
    pub fn new(writer: &'a mut W, adapter: &'a dyn Adapter) -> Self {
        Self {
            writer,
            adapter,
            binds: Binds::None,
        }
    }

    pub(crate) fn write_ident(&mut self, ident: &str) -> crate::Result<()> {
        let quoted = self.adapter.quote_identifier(ident);
        self.writer.write_str(&quoted)?;
        Ok(())
    }

    pub(crate) fn write_placeholder(&mut self, bind: Bind) -> crate::Result<()> {
        self.writer.write_char('?')?;
        self.binds.push(bind);
        Ok(())
    }

    /// `?, ?, ?` for each value, in order.
    pub(crate) fn write_placeholders(&mut self, binds: &Binds) -> crate::Result<()> {
        for (index, bind) in binds.iter().enumerate() {
            if index > 0 {
                self.writer.write_str(", ")?;
            }
            self.write_placeholder(bind.clone())?;
        }
        Ok(())
    }

    /// Values belonging to text that was already written verbatim.
    pub(crate) fn append_binds(&mut self, binds: Binds) {
        self.binds.append(binds);
    }

    pub(crate) fn write_compiled(&mut self, compiled: CompiledQuery) -> crate::Result<()> {
        self.writer.write_str(&compiled.text)?;
        self.binds.append(Binds::from(compiled.values));
        Ok(())
    }

    pub(crate) fn into_binds(self) -> Binds {
        self.binds
    }
}

impl<D> FormatWriter for D
where
    D: Deref,
    D::Target: FormatWriter,
{
    fn format_writer<W: Write>(&self, ctx: &mut FormatContext<'_, W>) -> crate::Result<()> {
        self.deref().format_writer(ctx)
    }
}
