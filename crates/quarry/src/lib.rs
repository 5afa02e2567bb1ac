mod config;
pub use config::Config;

mod deferred;
pub use deferred::{Pending, PendingWrite, WriteKind};

pub mod driver;

mod hydrate;

pub mod manager;
pub use manager::EntityManager;

mod model;
pub use model::{Entity, Identity};

pub mod query;
pub use query::{Query, QueryResult};

pub mod relation;
pub use relation::{HasMany, HasOne};

pub mod repository;
pub use repository::Repository;

pub mod schema;
pub use schema::{
    Include, PropertyType, PropertyTypes, Related, Relation, RelationOptions, Relations,
};

pub use quarry_core::{
    criteria,
    schema::ScalarKind,
    stmt::{
        self, ColumnValue, Criteria, Criterion, Direction, Filter, OrderBy, QueryPlan, Record,
        Value,
    },
    Connection, Error, Result,
};
