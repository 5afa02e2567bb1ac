mod builder;
pub use builder::{Builder, DEFAULT_MAX_RELATION_DEPTH};

use crate::{
    deferred::{DeferredWrites, Pending, PendingWrite, WriteKind},
    hydrate, Entity, Include, Query, QueryResult, Repository,
};

use quarry_core::{
    stmt::{ColumnValue, Criteria, Filter, OrderBy, QueryPlan, Record, Value},
    Connection, Error, Result,
};
use quarry_sql::{stmt::Predicate, translate, Placeholders, QueryBuilder, Serializer, Statement};

/// Owns one connection, its transaction and the deferred write sets.
///
/// Writes registered with [`create`](Self::create), [`save`](Self::save) and
/// [`delete`](Self::delete) touch nothing until [`commit`](Self::commit)
/// flushes them. Reads go to the database immediately.
#[derive(Debug)]
pub struct EntityManager {
    connection: Box<dyn Connection>,
    table_name_prefix: String,
    max_relation_depth: usize,
    deferred: DeferredWrites,
}

impl EntityManager {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Opens a manager with default settings on the database at `url`.
    pub fn connect(url: &str) -> Result<Self> {
        Builder::default().connect(url)
    }

    /// Wraps an open connection with default settings.
    pub fn new(connection: impl Connection + 'static) -> Result<Self> {
        Builder::default().build(connection)
    }

    /// Every manager starts with a transaction open.
    fn open(
        connection: Box<dyn Connection>,
        table_name_prefix: String,
        max_relation_depth: usize,
    ) -> Result<Self> {
        let mut em = EntityManager {
            connection,
            table_name_prefix,
            max_relation_depth,
            deferred: DeferredWrites::default(),
        };
        em.begin_transaction()?;
        Ok(em)
    }

    pub fn begin_transaction(&mut self) -> Result<()> {
        if self.connection.in_transaction() {
            return Err(Error::transaction(
                "a transaction is already active; nested transactions are not supported",
            ));
        }
        self.connection.begin_transaction()
    }

    pub fn in_transaction(&self) -> bool {
        self.connection.in_transaction()
    }

    /// Flushes the deferred sets, then commits.
    ///
    /// Creates are flushed as INSERT, saves as UPDATE and deletes as DELETE,
    /// in that order and in registration order within each set. An entry
    /// leaves its set only once its statement succeeded. If a statement
    /// fails, the error is returned, the failed entry and everything after
    /// it stay pending, and the transaction stays open.
    pub fn commit(&mut self) -> Result<()> {
        if !self.connection.in_transaction() {
            return Err(Error::transaction("commit without an active transaction"));
        }

        let pending = self.deferred.pending();
        tracing::debug!(
            create = pending.create,
            save = pending.save,
            delete = pending.delete,
            "flushing deferred writes"
        );

        for kind in WriteKind::ALL {
            self.flush(kind)?;
        }

        self.connection.commit()
    }

    /// Rolls back the transaction. Pending writes are kept; call
    /// [`clear_all`](Self::clear_all) to drop them as well.
    pub fn rollback(&mut self) -> Result<()> {
        if !self.connection.in_transaction() {
            return Err(Error::transaction("rollback without an active transaction"));
        }

        tracing::debug!(pending = self.deferred.pending().total(), "rolling back");
        self.connection.rollback()
    }

    /// Commits, then opens a fresh transaction.
    pub fn persist(&mut self) -> Result<()> {
        self.commit()?;
        self.begin_transaction()
    }

    /// Registers `entity` to be inserted on commit.
    pub fn create<T: Entity>(&mut self, entity: &T) -> Result<()> {
        let write = PendingWrite::capture(entity)?;
        self.deferred.create(entity.identity(), write);
        Ok(())
    }

    /// Registers `entity` to be updated on commit. An entity pending creation
    /// has its insert snapshot refreshed instead.
    pub fn save<T: Entity>(&mut self, entity: &T) -> Result<()> {
        let write = PendingWrite::capture(entity)?;
        self.deferred.save(entity.identity(), write)
    }

    /// Registers `entity` to be deleted on commit.
    pub fn delete<T: Entity>(&mut self, entity: &T) -> Result<()> {
        let write = PendingWrite::capture(entity)?;
        self.deferred.delete(entity.identity(), write)
    }

    /// Drops the pending write of `entity`, if any.
    pub fn clear<T: Entity>(&mut self, entity: &T) -> bool {
        self.deferred.clear(&entity.identity())
    }

    pub fn clear_all(&mut self) {
        self.deferred.clear_all();
    }

    pub fn pending(&self) -> Pending {
        self.deferred.pending()
    }

    /// The set `entity` is pending in.
    pub fn pending_kind<T: Entity>(&self, entity: &T) -> Option<WriteKind> {
        self.deferred.kind_of(&entity.identity())
    }

    pub fn is_pending<T: Entity>(&self, entity: &T) -> bool {
        self.pending_kind(entity).is_some()
    }

    /// Loads the row whose id column equals `id`.
    pub fn find<T: Entity>(
        &mut self,
        id: impl Into<Value>,
        include: impl Into<Include>,
    ) -> Result<Option<T>> {
        let id = id.into();
        if !id.is_scalar() {
            return Err(Error::invalid_argument(format!(
                "`{}` id must be a scalar; got {}",
                T::table_name(),
                id.kind_name()
            )));
        }

        let placeholder = Placeholders::new().fresh(T::id_field());
        let stmt = QueryBuilder::select(self.table_name_of::<T>())
            .and_where(Predicate::Eq {
                column: T::id_field().to_owned(),
                placeholder: placeholder.clone(),
            })
            .limit(1)
            .build()?;

        let entities = self.fetch::<T>(&stmt, vec![(placeholder, id)], &include.into(), 0)?;
        Ok(entities.into_iter().next())
    }

    /// Loads every row matching `plan`. Relations are hydrated only when the
    /// plan selects all columns.
    pub fn find_by<T: Entity>(
        &mut self,
        plan: &QueryPlan,
        include: impl Into<Include>,
    ) -> Result<Vec<T>> {
        self.select(plan, &include.into(), 0)
    }

    pub fn find_one_by<T: Entity>(
        &mut self,
        criteria: Criteria,
        order_by: OrderBy,
        include: impl Into<Include>,
    ) -> Result<Option<T>> {
        let plan = QueryPlan::new().criteria(criteria).sorted(order_by).limit(1);
        Ok(self.find_by(&plan, include)?.into_iter().next())
    }

    pub fn find_all<T: Entity>(
        &mut self,
        order_by: OrderBy,
        include: impl Into<Include>,
    ) -> Result<Vec<T>> {
        self.find_by(&QueryPlan::new().sorted(order_by), include)
    }

    /// Counts the rows matching `filter`. Never hydrates.
    pub fn count<T: Entity>(&mut self, filter: impl Into<Filter>) -> Result<u64> {
        let translated = translate(&filter.into(), &mut Placeholders::new())?;
        let stmt = QueryBuilder::select(self.table_name_of::<T>())
            .count()
            .filter(translated.clauses)
            .build()?;

        let rows = self.run(&stmt, translated.binds)?.into_rows();
        let count = rows
            .into_iter()
            .next()
            .and_then(|mut row| row.shift_remove("count"));

        match count {
            Some(ColumnValue::Int(count)) => {
                u64::try_from(count).map_err(|_| Error::type_conversion("Int", "u64"))
            }
            Some(other) => Err(Error::type_conversion(other.kind_name(), "u64")),
            None => Err(Error::execute("count query returned no rows")),
        }
    }

    /// Id generated by the most recent INSERT on this connection.
    pub fn last_insert_id(&self) -> Result<Value> {
        self.connection.last_insert_id()
    }

    pub fn repository<T: Entity>(&mut self) -> Repository<'_, T> {
        Repository::new(self)
    }

    /// The underlying connection, for schema setup and other work outside
    /// the entity layer.
    pub fn connection_mut(&mut self) -> &mut dyn Connection {
        &mut *self.connection
    }

    pub fn table_name_prefix(&self) -> &str {
        &self.table_name_prefix
    }

    pub fn max_relation_depth(&self) -> usize {
        self.max_relation_depth
    }

    /// Prefixed table name of `T`.
    pub fn table_name_of<T: Entity>(&self) -> String {
        self.prefixed(T::table_name())
    }

    fn prefixed(&self, table: &str) -> String {
        format!("{}{table}", self.table_name_prefix)
    }

    pub(crate) fn select<T: Entity>(
        &mut self,
        plan: &QueryPlan,
        include: &Include,
        depth: usize,
    ) -> Result<Vec<T>> {
        let translated = translate(&plan.filter, &mut Placeholders::new())?;

        let mut builder =
            QueryBuilder::select(self.table_name_of::<T>()).filter(translated.clauses);

        if let Some(columns) = &plan.columns {
            builder = builder.columns(columns.iter().cloned());
        }
        for (column, direction) in plan.order_by.iter() {
            builder = builder.order_by(column, direction);
        }
        if let Some(limit) = plan.limit {
            builder = builder.limit(limit);
        }
        if let Some(offset) = plan.offset {
            builder = builder.offset(offset);
        }

        let stmt = builder.build()?;
        if plan.columns.is_some() {
            return self.fetch(&stmt, translated.binds, &Include::None, depth);
        }
        self.fetch(&stmt, translated.binds, include, depth)
    }

    fn fetch<T: Entity>(
        &mut self,
        stmt: &Statement,
        binds: Vec<(String, Value)>,
        include: &Include,
        depth: usize,
    ) -> Result<Vec<T>> {
        let types = T::property_types();

        let mut entities = self
            .run(stmt, binds)?
            .into_rows()
            .into_iter()
            .map(|row| {
                let record = row
                    .into_iter()
                    .map(|(column, value)| {
                        let value = value.decode(types.kind_of(&column))?;
                        Ok::<_, Error>((column, value))
                    })
                    .collect::<Result<Record>>()?;
                T::from_record(record)
            })
            .collect::<Result<Vec<T>>>()?;

        hydrate::hydrate(self, &mut entities, include, depth)?;
        Ok(entities)
    }

    fn run(&mut self, stmt: &Statement, binds: Vec<(String, Value)>) -> Result<QueryResult> {
        let sql = Serializer::for_dialect(self.connection.dialect()).serialize(stmt);
        tracing::debug!(sql = %sql, binds = binds.len(), "executing statement");

        let mut query = Query::prepare(&mut *self.connection, &sql)?;
        for (name, value) in binds {
            query.bind_value(name, ColumnValue::encode(&value)?);
        }
        query.execute()?;
        query.result()
    }

    fn flush(&mut self, kind: WriteKind) -> Result<()> {
        while let Some(write) = self.deferred.front(kind) {
            let entity = write.entity;
            let (stmt, binds) = self.write_statement(kind, write)?;

            if let Err(err) = self.run(&stmt, binds) {
                tracing::warn!(
                    ?kind,
                    entity,
                    error = %err,
                    "flush failed; remaining writes stay pending"
                );
                return Err(err);
            }

            self.deferred.pop_front(kind);
        }
        Ok(())
    }

    fn write_statement(
        &self,
        kind: WriteKind,
        write: &PendingWrite,
    ) -> Result<(Statement, Vec<(String, Value)>)> {
        let table = self.prefixed(write.table);
        let mut placeholders = Placeholders::new();
        let mut binds = vec![];

        let builder = match kind {
            WriteKind::Create => {
                let mut builder = QueryBuilder::insert(table);
                for (column, value) in write.record.iter() {
                    // Left out so the database assigns the id.
                    if column == write.id_field && value.is_null() {
                        continue;
                    }
                    let placeholder = placeholders.fresh(column);
                    builder = builder.set(column, placeholder.clone());
                    binds.push((placeholder, value.clone()));
                }
                builder
            }
            WriteKind::Save => {
                let mut builder = QueryBuilder::update(table);
                for (column, value) in write.record.iter() {
                    if column == write.id_field {
                        continue;
                    }
                    let placeholder = placeholders.fresh(column);
                    builder = builder.set(column, placeholder.clone());
                    binds.push((placeholder, value.clone()));
                }
                builder.and_where(id_predicate(write, &mut placeholders, &mut binds))
            }
            WriteKind::Delete => QueryBuilder::delete(table)
                .and_where(id_predicate(write, &mut placeholders, &mut binds)),
        };

        let stmt = builder
            .build()
            .map_err(|err| err.context(quarry_core::err!("flushing `{}`", write.entity)))?;
        Ok((stmt, binds))
    }
}

fn id_predicate(
    write: &PendingWrite,
    placeholders: &mut Placeholders,
    binds: &mut Vec<(String, Value)>,
) -> Predicate {
    let placeholder = placeholders.fresh(write.id_field);
    binds.push((placeholder.clone(), write.id.clone()));
    Predicate::Eq {
        column: write.id_field.to_owned(),
        placeholder,
    }
}
