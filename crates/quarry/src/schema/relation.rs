use super::{Include, Related};
use crate::{Entity, EntityManager, Result};

use quarry_core::stmt::QueryPlan;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

/// Loads the target entities of a relation. `None` means the owner's local
/// value is null and nothing can match.
type Loader = fn(&mut EntityManager, Option<QueryPlan>, &Include, usize) -> Result<Related>;

/// Describes how a property is filled from another entity's table.
///
/// The target rows are those whose `remote` column equals the owner's
/// `local` property.
#[derive(Clone)]
pub struct Relation {
    target: &'static str,
    cardinality: Cardinality,
    remote: String,
    local: String,
    loader: Loader,
}

impl Relation {
    /// A relation holding every matching `T`.
    pub fn to_many<T: Entity>(remote: impl Into<String>, local: impl Into<String>) -> Self {
        Self::new::<T>(Cardinality::Many, remote.into(), local.into(), load_many::<T>)
    }

    /// A relation holding the first matching `T`, if any.
    pub fn to_one<T: Entity>(remote: impl Into<String>, local: impl Into<String>) -> Self {
        Self::new::<T>(Cardinality::One, remote.into(), local.into(), load_one::<T>)
    }

    fn new<T: Entity>(
        cardinality: Cardinality,
        remote: String,
        local: String,
        loader: Loader,
    ) -> Self {
        Self {
            target: T::table_name(),
            cardinality,
            remote,
            local,
            loader,
        }
    }

    /// Table name of the target entity.
    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn is_many(&self) -> bool {
        self.cardinality == Cardinality::Many
    }

    /// Column on the target table.
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Property on the owning entity.
    pub fn local(&self) -> &str {
        &self.local
    }

    pub(crate) fn load(
        &self,
        em: &mut EntityManager,
        plan: Option<QueryPlan>,
        include: &Include,
        depth: usize,
    ) -> Result<Related> {
        (self.loader)(em, plan, include, depth)
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("target", &self.target)
            .field("cardinality", &self.cardinality)
            .field("remote", &self.remote)
            .field("local", &self.local)
            .finish()
    }
}

fn load_many<T: Entity>(
    em: &mut EntityManager,
    plan: Option<QueryPlan>,
    include: &Include,
    depth: usize,
) -> Result<Related> {
    let values = match plan {
        Some(plan) => em.select::<T>(&plan, include, depth)?,
        None => vec![],
    };
    Ok(Related::many(values))
}

fn load_one<T: Entity>(
    em: &mut EntityManager,
    plan: Option<QueryPlan>,
    include: &Include,
    depth: usize,
) -> Result<Related> {
    let value = match plan {
        Some(mut plan) => {
            plan.limit.get_or_insert(1);
            em.select::<T>(&plan, include, depth)?.into_iter().next()
        }
        None => None,
    };
    Ok(Related::one(value))
}
