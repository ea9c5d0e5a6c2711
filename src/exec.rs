//! The seam between the builder and whatever talks to the database.
//!
//! The builder never does I/O. The entry points here compile the statement
//! and hand it to an [`Executor`], then post-process the returned rows.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::{
    Builder, CompiledQuery, Error, Result,
    bind::Bind,
    raw::Raw,
};

/// One result row, columns in the order the database returned them.
pub type Record = IndexMap<SmolStr, Bind>;

/// Sends a compiled statement to a database and returns its rows.
///
/// Implementations consume `values` left to right, one per `?` in `text`.
/// Transport failures should be wrapped with [`Error::executor`].
pub trait Executor {
    fn fetch_all(&self, query: &CompiledQuery) -> Result<Vec<Record>>;
}

impl<E> Executor for &E
where
    E: Executor + ?Sized,
{
    fn fetch_all(&self, query: &CompiledQuery) -> Result<Vec<Record>> {
        (**self).fetch_all(query)
    }
}

/// Row hook applied by [`Builder::get`] and [`Builder::get_one`].
#[derive(Clone)]
pub struct Processor(Arc<dyn Fn(Record) -> Record + Send + Sync>);

impl Processor {
    pub fn new<F>(processor: F) -> Self
    where
        F: Fn(Record) -> Record + Send + Sync + 'static,
    {
        Self(Arc::new(processor))
    }

    pub fn process(&self, record: Record) -> Record {
        (self.0)(record)
    }
}

impl fmt::Debug for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Processor(..)")
    }
}

impl Builder {
    pub fn set_processor<F>(&mut self, processor: F) -> &mut Self
    where
        F: Fn(Record) -> Record + Send + Sync + 'static,
    {
        self.maybe_processor = Some(Processor::new(processor));
        self
    }

    /// Compiles and runs the statement, returning the rows untouched.
    pub fn query<E>(&self, executor: &E) -> Result<Vec<Record>>
    where
        E: Executor + ?Sized,
    {
        let compiled = self.compile()?;
        debug!(sql = %compiled.text, binds = compiled.values.len(), "executing select");
        executor.fetch_all(&compiled)
    }

    /// Like [`query`](Self::query), with the processor applied to every row.
    pub fn get<E>(&self, executor: &E) -> Result<Vec<Record>>
    where
        E: Executor + ?Sized,
    {
        let rows = self.query(executor)?;
        Ok(match self.maybe_processor {
            Some(ref processor) => rows.into_iter().map(|row| processor.process(row)).collect(),
            None => rows,
        })
    }

    /// First row only; the statement is sent with `LIMIT 1`, this builder is
    /// left as is.
    pub fn get_one<E>(&self, executor: &E) -> Result<Option<Record>>
    where
        E: Executor + ?Sized,
    {
        let mut single = self.clone();
        single.limit(1);
        Ok(single.get(executor)?.into_iter().next())
    }

    /// Counts the rows this query would return, by wrapping it as a derived
    /// table: `SELECT count(*) FROM (<query>) AS <alias>`.
    pub fn count<E>(&self, executor: &E) -> Result<i64>
    where
        E: Executor + ?Sized,
    {
        let mut counter = self.sub(self.clone());
        counter.set_columns(Raw::new_static("count(*)"));

        let rows = counter.query(executor)?;
        let Some(row) = rows.into_iter().next() else {
            warn!("count query returned no row");
            return Ok(0);
        };
        let value = row
            .values()
            .next()
            .ok_or_else(|| Error::decode("count row has no column"))?;
        value
            .as_i64()
            .ok_or_else(|| Error::decode(format!("count is not an integer: {value:?}")))
    }
}
