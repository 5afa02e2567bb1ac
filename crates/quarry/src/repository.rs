use crate::{Entity, EntityManager, Include, Pending, Result};

use quarry_core::{
    stmt::{Criteria, Criterion, Direction, OrderBy, QueryPlan, Value},
    Error,
};

use std::marker::PhantomData;

/// Per-entity façade over an [`EntityManager`].
///
/// The fluent methods accumulate a query plan; a terminator runs it and
/// resets the repository for the next query. Relations are hydrated unless
/// [`include`](Self::include) says otherwise.
///
/// Entity-specific queries belong on a newtype wrapping `Repository<T>`.
#[derive(Debug)]
pub struct Repository<'em, T> {
    em: &'em mut EntityManager,
    plan: QueryPlan,
    include: Include,
    _entity: PhantomData<fn() -> T>,
}

impl<'em, T: Entity> Repository<'em, T> {
    pub(crate) fn new(em: &'em mut EntityManager) -> Self {
        Self {
            em,
            plan: QueryPlan::new(),
            include: Include::All,
            _entity: PhantomData,
        }
    }

    pub fn and_where(
        &mut self,
        column: impl Into<String>,
        criterion: impl Into<Criterion>,
    ) -> &mut Self {
        self.plan.filter.and(column, criterion);
        self
    }

    /// Joins the next condition with `OR`. Conditions are not grouped, so
    /// `AND` still binds tighter.
    pub fn or_where(
        &mut self,
        column: impl Into<String>,
        criterion: impl Into<Criterion>,
    ) -> &mut Self {
        self.plan.filter.or(column, criterion);
        self
    }

    pub fn filter_by(&mut self, criteria: Criteria) -> &mut Self {
        self.plan.filter.extend(criteria);
        self
    }

    pub fn order_by(&mut self, column: impl Into<String>, direction: Direction) -> &mut Self {
        self.plan.order_by.push(column, direction);
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.plan.limit = Some(limit);
        self
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.plan.offset = Some(offset);
        self
    }

    /// Selects only these columns. Disables relation hydration.
    pub fn columns<I>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.plan.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn include(&mut self, include: impl Into<Include>) -> &mut Self {
        self.include = include.into();
        self
    }

    /// The plan accumulated so far.
    pub fn plan(&self) -> &QueryPlan {
        &self.plan
    }

    pub fn get_results(&mut self) -> Result<Vec<T>> {
        let (plan, include) = self.take();
        self.em.find_by(&plan, include)
    }

    pub fn get_one_or_none(&mut self) -> Result<Option<T>> {
        let (mut plan, include) = self.take();
        plan.limit.get_or_insert(1);
        Ok(self.em.find_by(&plan, include)?.into_iter().next())
    }

    pub fn get_one_or_fail(&mut self) -> Result<T> {
        self.get_one_or_none()?
            .ok_or_else(|| Error::entity_not_found(format!("table={}", T::table_name())))
    }

    /// Counts the rows matching the accumulated filter. Ordering, paging and
    /// projection are discarded.
    pub fn count(&mut self) -> Result<u64> {
        let (plan, _) = self.take();
        self.em.count::<T>(plan.filter)
    }

    pub fn find(&mut self, id: impl Into<Value>) -> Result<Option<T>> {
        let include = self.include.clone();
        self.em.find(id, include)
    }

    pub fn find_by(&mut self, plan: &QueryPlan) -> Result<Vec<T>> {
        let include = self.include.clone();
        self.em.find_by(plan, include)
    }

    pub fn find_one_by(&mut self, criteria: Criteria, order_by: OrderBy) -> Result<Option<T>> {
        let include = self.include.clone();
        self.em.find_one_by(criteria, order_by, include)
    }

    pub fn find_all(&mut self, order_by: OrderBy) -> Result<Vec<T>> {
        let include = self.include.clone();
        self.em.find_all(order_by, include)
    }

    pub fn create(&mut self, entity: &T) -> Result<()> {
        self.em.create(entity)
    }

    pub fn save(&mut self, entity: &T) -> Result<()> {
        self.em.save(entity)
    }

    pub fn delete(&mut self, entity: &T) -> Result<()> {
        self.em.delete(entity)
    }

    pub fn clear(&mut self, entity: &T) -> bool {
        self.em.clear(entity)
    }

    pub fn persist(&mut self) -> Result<()> {
        self.em.persist()
    }

    pub fn pending(&self) -> Pending {
        self.em.pending()
    }

    /// The manager this repository works through.
    pub fn manager(&mut self) -> &mut EntityManager {
        self.em
    }

    fn take(&mut self) -> (QueryPlan, Include) {
        (
            std::mem::take(&mut self.plan),
            std::mem::replace(&mut self.include, Include::All),
        )
    }
}
