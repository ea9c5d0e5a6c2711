use std::{fmt, sync::Arc};

use tracing::trace;

use crate::{
    Error, Result,
    adapter::{Adapter, Plain},
    alias::{AliasGenerator, AliasSequence},
    bind::{Bind, IntoBinds},
    col::{Columns, IntoColumns},
    exec::Processor,
    expr::{Conditions, GroupBy, InCondition, InList, InOperator, IntoOrder, Order, Predicate},
    ident::{Ident, IntoTable, TableRef},
    options::{ALIAS_PREFIX, OptionValue, Options, STRICT},
    raw::IntoRaw,
    writer::{FormatContext, FormatWriter},
};

/// A compiled statement: `text` holds one `?` per entry of `values`, in the
/// same order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub text: String,
    pub values: Vec<Bind>,
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Limit and offset counts. Inputs are truncated to 32 bits the way a signed
/// 32-bit conversion would, then made absolute, so negative and fractional
/// inputs are clamped instead of rejected.
pub trait IntoCount {
    fn into_count(self) -> u32;
}

macro_rules! into_count_int {
    ($($ty:ty),+) => {
        $(
            impl IntoCount for $ty {
                #[inline]
                fn into_count(self) -> u32 {
                    (self as i32).unsigned_abs()
                }
            }
        )+
    };
}

into_count_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl IntoCount for f64 {
    fn into_count(self) -> u32 {
        if !self.is_finite() {
            return 0;
        }
        // modulo 2^32 then reinterpret as signed
        let wrapped = self.trunc().rem_euclid(4_294_967_296.0) as u32;
        (wrapped as i32).unsigned_abs()
    }
}

impl IntoCount for f32 {
    fn into_count(self) -> u32 {
        f64::from(self).into_count()
    }
}

#[derive(Debug, Clone)]
pub struct Builder {
    adapter: Arc<dyn Adapter>,
    aliases: Arc<dyn AliasGenerator>,
    options: Options,
    table: TableRef,
    columns: Columns,
    conditions: Conditions,
    maybe_group: Option<GroupBy>,
    order: Order,
    pub(crate) limit: u32,
    pub(crate) offset: u32,
    pub(crate) maybe_processor: Option<Processor>,
}

impl Builder {
    pub fn new<A, T>(adapter: A, table: T) -> Self
    where
        A: Adapter + 'static,
        T: IntoTable,
    {
        Self::with_adapter(Arc::new(adapter), table)
    }

    pub fn with_adapter<T>(adapter: Arc<dyn Adapter>, table: T) -> Self
    where
        T: IntoTable,
    {
        Self {
            adapter,
            aliases: AliasSequence::shared(),
            options: Options::default(),
            table: table.into_table(),
            columns: Columns::None,
            conditions: Conditions::default(),
            maybe_group: None,
            order: Order::default(),
            limit: 0,
            offset: 0,
            maybe_processor: None,
        }
    }

    /// A builder that does not quote identifiers at all.
    pub fn table<T>(table: T) -> Self
    where
        T: IntoTable,
    {
        Self::new(Plain, table)
    }

    /// A fresh builder sharing this one's adapter, alias generator and options,
    /// meant to be nested as a derived table or an `IN` relation.
    pub fn sub<T>(&self, table: T) -> Self
    where
        T: IntoTable,
    {
        let mut builder = Self::with_adapter(self.adapter.clone(), table);
        builder.aliases = self.aliases.clone();
        builder.options = self.options.clone();
        builder
    }

    pub fn set_aliases(&mut self, aliases: Arc<dyn AliasGenerator>) -> &mut Self {
        self.aliases = aliases;
        self
    }

    pub fn from<T: IntoTable>(&mut self, table: T) -> &mut Self {
        self.table = table.into_table();
        self
    }

    pub fn adapter(&self) -> &dyn Adapter {
        self.adapter.as_ref()
    }

    pub fn table_ref(&self) -> &TableRef {
        &self.table
    }

    // options

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn set_option<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<smol_str::SmolStr>,
        V: Into<OptionValue>,
    {
        self.options.set(key, value);
        self
    }

    pub fn option(&self, key: &str) -> Result<&OptionValue> {
        self.options.get(key)
    }

    /// Clears every clause, keeping the adapter, table, options and processor.
    pub fn reset(&mut self) -> &mut Self {
        self.columns.reset();
        self.conditions = Conditions::default();
        self.maybe_group = None;
        self.order = Order::default();
        self.limit = 0;
        self.offset = 0;
        self
    }

    // select stuff

    pub fn set_columns<T>(&mut self, cols: T) -> &mut Self
    where
        T: IntoColumns,
    {
        self.columns = cols.into_columns();
        self
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    // where stuff

    pub fn where_raw<T, B>(&mut self, predicate: T, binds: B) -> &mut Self
    where
        T: IntoRaw,
        B: IntoBinds,
    {
        let predicate = Predicate::new(predicate.into_raw(), binds.into_binds());
        self.conditions.push(predicate);
        self
    }

    /// Renders the `IN` condition right away, a subquery relation is compiled
    /// now and later changes to it are not seen. An empty list is written as
    /// `IN ()`; whether the database accepts it is not checked here.
    pub(crate) fn where_in_expr(
        &mut self,
        column: Ident,
        list: InList,
        operator: InOperator,
    ) -> Result<&mut Self> {
        let condition = InCondition {
            operator,
            column,
            list,
        };
        let mut sql = String::new();
        let mut context = FormatContext::new(&mut sql, self.adapter.as_ref());
        condition.format_writer(&mut context)?;
        let binds = context.into_binds();

        self.conditions.push(Predicate::new(sql, binds));
        Ok(self)
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    // group stuff

    /// Replaces the group clause; there is only one per query.
    pub fn group<C>(&mut self, columns: C) -> &mut Self
    where
        C: IntoColumns,
    {
        self.maybe_group = Some(GroupBy::new(columns.into_columns()));
        self
    }

    pub fn group_having<C, H, B>(&mut self, columns: C, having: H, binds: B) -> &mut Self
    where
        C: IntoColumns,
        H: IntoRaw,
        B: IntoBinds,
    {
        let group = GroupBy::new(columns.into_columns()).having(having.into_raw(), binds.into_binds());
        self.maybe_group = Some(group);
        self
    }

    // order stuff

    /// Replaces the order clause with the given terms. Nothing changes when a
    /// term is rejected.
    pub fn order<O>(&mut self, order: O) -> Result<&mut Self>
    where
        O: IntoOrder,
    {
        self.order = order.into_order()?;
        Ok(self)
    }

    // limit stuff

    pub fn limit<N: IntoCount>(&mut self, count: N) -> &mut Self {
        self.limit = count.into_count();
        self
    }

    pub fn offset<N: IntoCount>(&mut self, count: N) -> &mut Self {
        self.offset = count.into_count();
        self
    }

    pub fn limit_value(&self) -> u32 {
        self.limit
    }

    pub fn offset_value(&self) -> u32 {
        self.offset
    }

    // building the builder

    pub fn compile(&self) -> Result<CompiledQuery> {
        if let Some(ref group) = self.maybe_group {
            if group.has_orphan_having() && self.options.get_bool(STRICT)? {
                return Err(Error::invalid_argument(
                    "having predicate given without group by columns",
                ));
            }
        }

        let mut text = String::with_capacity(64);
        let mut context = FormatContext::new(&mut text, self.adapter.as_ref());
        self.format_writer(&mut context)?;
        let values = context.into_binds().into_vec();

        trace!(sql = %text, binds = values.len(), "compiled select");
        Ok(CompiledQuery { text, values })
    }

    pub fn to_sql(&self) -> Result<String> {
        self.compile().map(|compiled| compiled.text)
    }

    fn write_from<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        let builder = match self.table {
            TableRef::Ident(ref ident) => return ident.format_writer(context),
            TableRef::Raw(ref raw) => return raw.format_writer(context),
            TableRef::Subquery(ref builder) => builder,
        };
        let compiled = builder.compile()?;
        let alias = self.aliases.next_alias(self.options.get_str(ALIAS_PREFIX)?);
        trace!(alias = %alias, "aliasing derived table");

        context.writer.write_char('(')?;
        context.write_compiled(compiled)?;
        context.writer.write_str(") AS ")?;
        context.write_ident(alias.as_str())
    }
}

impl FormatWriter for Builder {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.writer.write_str("SELECT ")?;
        self.columns.format_writer(context)?;

        context.writer.write_str(" FROM ")?;
        self.write_from(context)?;

        if !self.conditions.is_empty() {
            context.writer.write_str(" WHERE ")?;
            self.conditions.format_writer(context)?;
        }

        if let Some(ref group) = self.maybe_group {
            if !group.is_empty() {
                context.writer.write_char(' ')?;
                group.format_writer(context)?;
            }
        }

        if !self.order.is_empty() {
            context.writer.write_str(" ORDER BY ")?;
            self.order.format_writer(context)?;
        }

        // counts are written as literals, never bound
        if self.limit > 0 {
            write!(context.writer, " LIMIT {}", self.limit)?;
        }
        if self.offset > 0 {
            write!(context.writer, " OFFSET {}", self.offset)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        adapter::Dialect,
        alias::AliasSequence,
        bind::Bind,
        col::Wildcard,
        expr::Sort,
        raw,
    };

    use super::*;

    fn users() -> Builder {
        Builder::new(Dialect::Postgres, "users")
    }

    #[test]
    fn test_basic_select() {
        let mut builder = users();
        assert_eq!("SELECT * FROM \"users\"", builder.to_sql().unwrap());
        builder.set_columns(["id", "username"]);
        assert_eq!(
            "SELECT \"id\", \"username\" FROM \"users\"",
            builder.to_sql().unwrap()
        );
        builder.set_columns("*");
        assert_eq!("SELECT * FROM \"users\"", builder.to_sql().unwrap());
        builder.set_columns(Vec::<&str>::new());
        assert_eq!("SELECT * FROM \"users\"", builder.to_sql().unwrap());
        builder.set_columns(Wildcard);
        assert_eq!("SELECT * FROM \"users\"", builder.to_sql().unwrap());
    }

    #[test]
    fn test_plain_adapter() {
        let mut builder = Builder::table("users");
        builder.set_columns(["id", "name"]);
        assert_eq!("SELECT id, name FROM users", builder.to_sql().unwrap());
    }

    #[test]
    fn test_raw_table() {
        let builder = Builder::new(Dialect::MySql, raw("users u"));
        assert_eq!("SELECT * FROM users u", builder.to_sql().unwrap());
        let builder = Builder::new(Dialect::Postgres, "public.users");
        assert_eq!(
            "SELECT * FROM \"public\".\"users\"",
            builder.to_sql().unwrap()
        );
    }

    #[test]
    fn test_where_raw_and_together() {
        let mut builder = users();
        builder
            .where_raw("id = ?", 1)
            .where_raw("name = ? or name = ?", ["a", "b"])
            .where_raw("deleted_at is null", ());
        let compiled = builder.compile().unwrap();
        assert_eq!(
            "SELECT * FROM \"users\" WHERE (id = ?) AND (name = ? or name = ?) AND (deleted_at is null)",
            compiled.text
        );
        assert_eq!(
            vec![
                Bind::I32(1),
                Bind::StaticString("a"),
                Bind::StaticString("b")
            ],
            compiled.values
        );
    }

    #[test]
    fn test_where_in_values() {
        let mut builder = Builder::table("users");
        builder.where_in("id", [1, 2, 3]).unwrap();
        let compiled = builder.compile().unwrap();
        assert_eq!("SELECT * FROM users WHERE (id IN (?, ?, ?))", compiled.text);
        assert_eq!(
            vec![Bind::I32(1), Bind::I32(2), Bind::I32(3)],
            compiled.values
        );
    }

    #[test]
    fn test_where_not_in_negates() {
        let mut builder = Builder::table("users");
        builder.where_not_in("id", vec![1, 2, 3]).unwrap();
        let compiled = builder.compile().unwrap();
        assert_eq!(
            "SELECT * FROM users WHERE (id NOT IN (?, ?, ?))",
            compiled.text
        );
        assert_eq!(3, compiled.values.len());
    }

    #[test]
    fn test_where_in_subquery() {
        let mut roles = Builder::new(Dialect::Postgres, "roles");
        roles.set_columns("user_id").where_raw("name = ?", "admin");

        let mut builder = users();
        builder
            .where_raw("active = ?", true)
            .where_in("id", &roles)
            .unwrap()
            .where_raw("age > ?", 18);
        let compiled = builder.compile().unwrap();
        assert_eq!(
            "SELECT * FROM \"users\" WHERE (active = ?) AND (\"id\" IN (SELECT \"user_id\" FROM \"roles\" WHERE (name = ?))) AND (age > ?)",
            compiled.text
        );
        assert_eq!(
            vec![Bind::Bool(true), Bind::StaticString("admin"), Bind::I32(18)],
            compiled.values
        );
    }

    #[test]
    fn test_where_in_empty_values() {
        let mut builder = Builder::table("t");
        builder.where_in("id", Vec::<i32>::new()).unwrap();
        let compiled = builder.compile().unwrap();
        assert_eq!("SELECT * FROM t WHERE (id IN ())", compiled.text);
        assert!(compiled.values.is_empty());

        let mut builder = Builder::table("t");
        builder.where_not_in("id", ()).unwrap().where_raw("a = ?", 1);
        let compiled = builder.compile().unwrap();
        assert_eq!("SELECT * FROM t WHERE (id NOT IN ()) AND (a = ?)", compiled.text);
        assert_eq!(vec![Bind::I32(1)], compiled.values);
    }

    #[test]
    fn test_group_replaces() {
        let mut builder = Builder::table("orders");
        builder.group("a").group_having(["b", "c"], "sum(x) > ?", 10);
        let compiled = builder.compile().unwrap();
        assert_eq!(
            "SELECT * FROM orders GROUP BY b, c HAVING sum(x) > ?",
            compiled.text
        );
        assert_eq!(vec![Bind::I32(10)], compiled.values);
    }

    #[test]
    fn test_group_without_columns_is_omitted() {
        let mut builder = Builder::table("orders");
        builder.group_having(Vec::<&str>::new(), "x > ?", 1);
        let compiled = builder.compile().unwrap();
        assert_eq!("SELECT * FROM orders", compiled.text);
        assert!(compiled.values.is_empty());
    }

    #[test]
    fn test_strict_rejects_orphan_having() {
        let mut builder = Builder::table("orders");
        builder
            .set_option(STRICT, true)
            .group_having((), "x > 1", ());
        assert!(builder.compile().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_order_replaces() {
        let mut builder = users();
        builder.order("a").unwrap();
        builder.order(("foo", Sort::new("bar", "desc"))).unwrap();
        assert_eq!(
            "SELECT * FROM \"users\" ORDER BY \"foo\", \"bar\" DESC",
            builder.to_sql().unwrap()
        );
    }

    #[test]
    fn test_order_error_keeps_previous() {
        let mut builder = Builder::table("users");
        builder.order("a").unwrap();
        assert!(builder.order(Sort::asc("")).is_err());
        assert_eq!("SELECT * FROM users ORDER BY a", builder.to_sql().unwrap());
    }

    #[test]
    fn test_limit_offset_coercion() {
        let mut builder = Builder::table("users");
        builder.limit(-5);
        assert_eq!(5, builder.limit_value());
        builder.limit(5.9);
        assert_eq!(5, builder.limit_value());
        builder.limit(-5.9f32);
        assert_eq!(5, builder.limit_value());
        builder.offset(f64::NAN);
        assert_eq!(0, builder.offset_value());
        builder.offset(i32::MIN);
        assert_eq!(2_147_483_648, builder.offset_value());
        builder.offset(4_294_967_301i64);
        assert_eq!(5, builder.offset_value());
    }

    #[test]
    fn test_limit_offset_literals() {
        let mut builder = Builder::table("users");
        builder.limit(10).offset(20);
        let compiled = builder.compile().unwrap();
        assert_eq!("SELECT * FROM users LIMIT 10 OFFSET 20", compiled.text);
        assert!(compiled.values.is_empty());
        builder.limit(0);
        assert_eq!("SELECT * FROM users OFFSET 20", builder.to_sql().unwrap());
    }

    #[test]
    fn test_derived_table() {
        let mut inner = Builder::new(Dialect::Postgres, "users");
        inner.where_raw("age > ?", 21);
        let mut builder = Builder::new(Dialect::Postgres, inner);
        builder.set_aliases(Arc::new(AliasSequence::new()));
        builder.where_raw("name = ?", "bob");
        let compiled = builder.compile().unwrap();
        assert_eq!(
            "SELECT * FROM (SELECT * FROM \"users\" WHERE (age > ?)) AS \"t_1\" WHERE (name = ?)",
            compiled.text
        );
        assert_eq!(
            vec![Bind::I32(21), Bind::StaticString("bob")],
            compiled.values
        );
    }

    #[test]
    fn test_alias_prefix_option() {
        let mut builder = Builder::table(Builder::table("users"));
        builder
            .set_aliases(Arc::new(AliasSequence::new()))
            .set_option(ALIAS_PREFIX, "derived_");
        assert_eq!(
            "SELECT * FROM (SELECT * FROM users) AS derived_1",
            builder.to_sql().unwrap()
        );
    }

    #[test]
    fn test_full_clause_order() {
        let mut builder = users();
        builder
            .limit(5)
            .order(Sort::desc("total"))
            .unwrap()
            .group_having("country", "count(*) > ?", 3)
            .where_raw("age > ?", 18)
            .set_columns(cols_country());
        let compiled = builder.compile().unwrap();
        assert_eq!(
            "SELECT \"country\", count(*) as total FROM \"users\" WHERE (age > ?) GROUP BY \"country\" HAVING count(*) > ? ORDER BY \"total\" DESC LIMIT 5",
            compiled.text
        );
        assert_eq!(vec![Bind::I32(18), Bind::I32(3)], compiled.values);
    }

    fn cols_country() -> Columns {
        crate::cols!["country", raw("count(*) as total")].into_columns()
    }

    #[test]
    fn test_reset() {
        let mut builder = users();
        builder
            .set_columns("id")
            .where_raw("id = ?", 1)
            .group("id")
            .limit(1)
            .offset(2)
            .order("id")
            .unwrap();
        builder.reset();
        let compiled = builder.compile().unwrap();
        assert_eq!("SELECT * FROM \"users\"", compiled.text);
        assert!(compiled.values.is_empty());
    }

    #[test]
    fn test_unknown_option() {
        let builder = users();
        assert!(builder.option("readonly").unwrap_err().is_invalid_argument());
        assert_eq!(
            &OptionValue::Bool(false),
            builder.option(STRICT).unwrap()
        );
    }
}
