use std::fmt;

use smol_str::SmolStr;

use crate::{
    Error,
    bind::Array,
    ident::{Ident, IntoIdent},
    raw::Raw,
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderExpr {
    Column(Ident, Ordering),
    Raw(Raw),
}

impl FormatWriter for OrderExpr {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()> {
        match self {
            OrderExpr::Column(ident, ordering) => {
                ident.format_writer(context)?;
                ordering.format_writer(context)
            }
            OrderExpr::Raw(raw) => raw.format_writer(context),
        }
    }
}

pub type OrderProjections = Array<OrderExpr>;

#[derive(Debug, Default, Clone)]
pub struct Order {
    projections: OrderProjections,
}

impl Order {
    pub fn new(projections: OrderProjections) -> Self {
        Self { projections }
    }

    pub fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.projections.len()
    }
}

impl FormatWriter for Order {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()> {
        for (index, proj) in self.projections.iter().enumerate() {
            if index > 0 {
                context.writer.write_str(", ")?;
            }
            proj.format_writer(context)?;
        }
        Ok(())
    }
}

/// Ascending is the database default, so it is never written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    #[default]
    Asc,
    Desc,
}

impl Ordering {
    /// Only a case-insensitive `desc` sorts descending, anything else is
    /// ascending.
    pub fn parse(sort: &str) -> Self {
        if sort.eq_ignore_ascii_case("desc") {
            Ordering::Desc
        } else {
            Ordering::Asc
        }
    }
}

impl FormatWriter for Ordering {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> crate::Result<()> {
        if let Ordering::Desc = self {
            context.writer.write_str(" DESC")?;
        }
        Ok(())
    }
}

/// A `{column, sort}` order descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub column: SmolStr,
    pub sort: Option<SmolStr>,
}

impl Sort {
    pub fn new<C, S>(column: C, sort: S) -> Self
    where
        C: Into<SmolStr>,
        S: Into<SmolStr>,
    {
        Self {
            column: column.into(),
            sort: Some(sort.into()),
        }
    }

    pub fn asc<C: Into<SmolStr>>(column: C) -> Self {
        Self {
            column: column.into(),
            sort: None,
        }
    }

    pub fn desc<C: Into<SmolStr>>(column: C) -> Self {
        Self::new(column, SmolStr::new_static("desc"))
    }
}

/// Turns one order term into an [`OrderExpr`], rejecting unusable shapes.
pub trait IntoOrderExpr {
    fn into_order_expr(self) -> crate::Result<OrderExpr>;
}

impl IntoOrderExpr for OrderExpr {
    fn into_order_expr(self) -> crate::Result<OrderExpr> {
        Ok(self)
    }
}

impl IntoOrderExpr for Raw {
    fn into_order_expr(self) -> crate::Result<OrderExpr> {
        Ok(OrderExpr::Raw(self))
    }
}

impl IntoOrderExpr for Ident {
    fn into_order_expr(self) -> crate::Result<OrderExpr> {
        Ok(OrderExpr::Column(self, Ordering::Asc))
    }
}

impl IntoOrderExpr for &str {
    fn into_order_expr(self) -> crate::Result<OrderExpr> {
        self.into_ident().into_order_expr()
    }
}

impl IntoOrderExpr for String {
    fn into_order_expr(self) -> crate::Result<OrderExpr> {
        self.into_ident().into_order_expr()
    }
}

impl IntoOrderExpr for &String {
    fn into_order_expr(self) -> crate::Result<OrderExpr> {
        self.into_ident().into_order_expr()
    }
}

impl IntoOrderExpr for Sort {
    fn into_order_expr(self) -> crate::Result<OrderExpr> {
        if self.column.is_empty() {
            return Err(Error::invalid_argument(
                "invalid order by expression: descriptor has no column",
            ));
        }
        let ordering = self
            .sort
            .as_deref()
            .map(Ordering::parse)
            .unwrap_or_default();
        Ok(OrderExpr::Column(self.column.into_ident(), ordering))
    }
}

/// One term, a sequence of terms, or a tuple mixing term kinds.
pub trait IntoOrder {
    fn into_order(self) -> crate::Result<Order>;
}

impl IntoOrder for Order {
    fn into_order(self) -> crate::Result<Order> {
        Ok(self)
    }
}

impl<T> IntoOrder for T
where
    T: IntoOrderExpr,
{
    fn into_order(self) -> crate::Result<Order> {
        Ok(Order::new(OrderProjections::One(self.into_order_expr()?)))
    }
}

impl<T> IntoOrder for Vec<T>
where
    T: IntoOrderExpr,
{
    fn into_order(self) -> crate::Result<Order> {
        let projections = self
            .into_iter()
            .map(IntoOrderExpr::into_order_expr)
            .collect::<crate::Result<Vec<_>>>()?;
        Ok(Order::new(OrderProjections::from(projections)))
    }
}

impl<T, const N: usize> IntoOrder for [T; N]
where
    T: IntoOrderExpr,
{
    fn into_order(self) -> crate::Result<Order> {
        Vec::from(self).into_order()
    }
}

macro_rules! tuple_into_order {
    ($($name:ident),+) => {
        impl<$($name),+> IntoOrder for ($($name,)+)
        where
            $($name: IntoOrderExpr,)+
        {
            #[allow(non_snake_case)]
            fn into_order(self) -> crate::Result<Order> {
                let ($($name,)+) = self;
                let projections = vec![$($name.into_order_expr()?),+];
                Ok(Order::new(OrderProjections::from(projections)))
            }
        }
    };
}

tuple_into_order!(A, B);
tuple_into_order!(A, B, C);
tuple_into_order!(A, B, C, D);
tuple_into_order!(A, B, C, D, E);
