use sea_orm::{
    sea_query::IntoCondition, ColumnTrait, Condition, IntoSimpleExpr, Order, QueryOrder,
};

/// Accumulates optional predicates into a single conjunctive [`Condition`].
///
/// Filters whose value is `None` are skipped, so callers can pass request
/// parameters straight through.
#[derive(Debug, Clone)]
pub struct SearchBuilder {
    condition: Condition,
    terms: usize,
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBuilder {
    pub fn new() -> Self {
        Self {
            condition: Condition::all(),
            terms: 0,
        }
    }

    /// Add a condition unconditionally
    pub fn add<C: IntoCondition>(mut self, condition: C) -> Self
    where
        sea_orm::sea_query::ConditionExpression: From<C>,
    {
        self.condition = self.condition.add(condition);
        self.terms += 1;
        self
    }

    pub fn add_eq<C, V>(self, column: C, value: V) -> Self
    where
        C: ColumnTrait,
        V: Into<sea_orm::Value>,
    {
        self.add(column.eq(value))
    }

    pub fn add_eq_opt<C, V>(self, column: C, value: Option<V>) -> Self
    where
        C: ColumnTrait,
        V: Into<sea_orm::Value>,
    {
        match value {
            Some(value) => self.add(column.eq(value)),
            None => self,
        }
    }

    pub fn add_gte_opt<C, V>(self, column: C, value: Option<V>) -> Self
    where
        C: ColumnTrait,
        V: Into<sea_orm::Value>,
    {
        match value {
            Some(value) => self.add(column.gte(value)),
            None => self,
        }
    }

    pub fn add_lte_opt<C, V>(self, column: C, value: Option<V>) -> Self
    where
        C: ColumnTrait,
        V: Into<sea_orm::Value>,
    {
        match value {
            Some(value) => self.add(column.lte(value)),
            None => self,
        }
    }

    /// Number of predicates added so far
    pub fn len(&self) -> usize {
        self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms == 0
    }

    pub fn build(self) -> Condition {
        self.condition
    }
}

/// Orders `query` by `column` when `ascending` is set: `Some(true)` ascending,
/// `Some(false)` descending, `None` leaves the query untouched.
pub fn order_by_flag<Q, C>(query: Q, column: C, ascending: Option<bool>) -> Q
where
    Q: QueryOrder,
    C: IntoSimpleExpr,
{
    match ascending {
        Some(true) => query.order_by(column, Order::Asc),
        Some(false) => query.order_by(column, Order::Desc),
        None => query,
    }
}
