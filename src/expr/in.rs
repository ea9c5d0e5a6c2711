use std::fmt;

use qselect_derive::InOperator;

use crate::{
    Builder,
    bind::{Binds, IntoBind, IntoBinds},
    ident::Ident,
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, InOperator)]
pub enum InOperator {
    In,
    NotIn,
}

impl FormatWriter for InOperator {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()> {
        match self {
            InOperator::In => context.writer.write_str("IN")?,
            InOperator::NotIn => context.writer.write_str("NOT IN")?,
        }
        Ok(())
    }
}

/// Right-hand side of an `IN`: literal values or a subquery.
#[derive(Debug, Clone)]
pub enum InList {
    Values(Binds),
    Subquery(Box<Builder>),
}

impl InList {
    pub fn is_empty(&self) -> bool {
        match self {
            InList::Values(binds) => binds.is_empty(),
            InList::Subquery(_) => false,
        }
    }
}

/// Relations accepted by `where_in` / `where_not_in`: a builder or a sequence
/// of values. `()` is the empty sequence.
///
/// A lone value is not a relation:
///
/// ```compile_fail
/// let mut builder = qselect::Builder::table("t");
/// builder.where_in("id", 5)?;
/// # Ok::<(), qselect::Error>(())
/// ```
pub trait IntoInList {
    fn into_in_list(self) -> InList;
}

impl IntoInList for Builder {
    fn into_in_list(self) -> InList {
        InList::Subquery(Box::new(self))
    }
}

impl IntoInList for &Builder {
    fn into_in_list(self) -> InList {
        InList::Subquery(Box::new(self.clone()))
    }
}

impl IntoInList for InList {
    fn into_in_list(self) -> InList {
        self
    }
}

impl IntoInList for Binds {
    fn into_in_list(self) -> InList {
        InList::Values(self)
    }
}

impl IntoInList for () {
    fn into_in_list(self) -> InList {
        InList::Values(Binds::None)
    }
}

impl<T> IntoInList for Vec<T>
where
    T: IntoBind,
{
    fn into_in_list(self) -> InList {
        InList::Values(self.into_binds())
    }
}

impl<T> IntoInList for &[T]
where
    T: IntoBind + Clone,
{
    fn into_in_list(self) -> InList {
        InList::Values(self.into_binds())
    }
}

impl<T, const N: usize> IntoInList for [T; N]
where
    T: IntoBind,
{
    fn into_in_list(self) -> InList {
        InList::Values(self.into_binds())
    }
}

impl FormatWriter for InList {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()> {
        match self {
            InList::Values(binds) => context.write_placeholders(binds),
            // the subquery keeps its own adapter
            InList::Subquery(builder) => {
                let compiled = builder.compile()?;
                context.write_compiled(compiled)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct InCondition {
    pub(crate) operator: InOperator,
    pub(crate) column: Ident,
    pub(crate) list: InList,
}

impl FormatWriter for InCondition {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()> {
        self.column.format_writer(context)?;
        context.writer.write_char(' ')?;
        self.operator.format_writer(context)?;
        context.writer.write_str(" (")?;
        self.list.format_writer(context)?;
        context.writer.write_char(')')?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        adapter::{Dialect, Plain},
        bind::Bind,
        tests::format_writer,
    };

    use super::*;

    #[test]
    fn test_in_values() {
        let cond = InCondition {
            operator: InOperator::In,
            column: Ident::new("id"),
            list: [1, 2, 3].into_in_list(),
        };
        assert_eq!("id IN (?, ?, ?)", format_writer(cond, &Plain));
    }

    #[test]
    fn test_not_in_values() {
        let cond = InCondition {
            operator: InOperator::NotIn,
            column: Ident::new("id"),
            list: vec![1, 2, 3].into_in_list(),
        };
        assert_eq!("\"id\" NOT IN (?, ?, ?)", format_writer(cond, &Dialect::Postgres));
    }

    #[test]
    fn test_in_list_shapes() {
        assert!(Vec::<i32>::new().into_in_list().is_empty());
        assert!(().into_in_list().is_empty());
        assert!(!Builder::table("roles").into_in_list().is_empty());
        let ids: &[i64] = &[4, 5];
        match ids.into_in_list() {
            InList::Values(binds) => {
                assert_eq!(vec![Bind::I64(4), Bind::I64(5)], binds.into_vec())
            }
            InList::Subquery(_) => panic!("a slice is not a subquery"),
        }
        match [None, Some(3)].into_in_list() {
            InList::Values(binds) => assert_eq!(vec![Bind::Null, Bind::I32(3)], binds.into_vec()),
            InList::Subquery(_) => panic!("an array is not a subquery"),
        }
    }

    #[test]
    fn test_empty_values() {
        let cond = InCondition {
            operator: InOperator::NotIn,
            column: Ident::new("id"),
            list: ().into_in_list(),
        };
        assert_eq!("id NOT IN ()", format_writer(cond, &Plain));
    }
}
