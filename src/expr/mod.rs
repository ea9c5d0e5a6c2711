pub mod cond;
pub mod group;
pub mod r#in;
pub mod order;

pub use cond::{Conditions, Predicate};
pub use group::GroupBy;
pub use r#in::{InCondition, InList, InOperator, IntoInList};
pub use order::{IntoOrder, IntoOrderExpr, Order, OrderExpr, Ordering, Sort};
