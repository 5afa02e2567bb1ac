use quarry_core::stmt::{Criteria, Criterion, OrderBy, QueryPlan, Value};

use indexmap::IndexMap;

/// Which relations a select hydrates.
#[derive(Debug, Clone, Default)]
pub enum Include {
    /// Leave every relation unloaded.
    #[default]
    None,

    /// Hydrate every relation with default options.
    All,

    /// Hydrate every relation, using the given options for the listed ones
    /// and defaults for the rest.
    Relations(Relations),
}

impl Include {
    pub fn is_none(&self) -> bool {
        matches!(self, Include::None)
    }

    /// Options for one relation property. `None` when nothing is hydrated.
    pub(crate) fn options(&self, property: &str) -> Option<RelationOptions> {
        match self {
            Include::None => None,
            Include::All => Some(RelationOptions::default()),
            Include::Relations(relations) => {
                Some(relations.get(property).cloned().unwrap_or_default())
            }
        }
    }
}

impl From<bool> for Include {
    fn from(value: bool) -> Self {
        if value {
            Include::All
        } else {
            Include::None
        }
    }
}

impl From<Relations> for Include {
    fn from(value: Relations) -> Self {
        Include::Relations(value)
    }
}

/// Per-relation options, keyed by relation property name.
#[derive(Debug, Clone, Default)]
pub struct Relations {
    entries: IndexMap<String, RelationOptions>,
}

impl Relations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: impl Into<String>, options: RelationOptions) -> Self {
        self.entries.insert(property.into(), options);
        self
    }

    pub fn get(&self, property: &str) -> Option<&RelationOptions> {
        self.entries.get(property)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// How one relation is loaded.
///
/// The defaults load every matching row and eager-load the targets' own
/// relations.
#[derive(Debug, Clone)]
pub struct RelationOptions {
    pub criteria: Criteria,
    pub order_by: OrderBy,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub columns: Option<Vec<String>>,
    pub include_relations: bool,

    /// Options for the targets' own relations.
    pub relations: Relations,
}

impl Default for RelationOptions {
    fn default() -> Self {
        Self {
            criteria: Criteria::new(),
            order_by: OrderBy::new(),
            limit: None,
            offset: None,
            columns: None,
            include_relations: true,
            relations: Relations::new(),
        }
    }
}

impl RelationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn include_relations(mut self, include: bool) -> Self {
        self.include_relations = include;
        self
    }

    pub fn relations(mut self, relations: Relations) -> Self {
        self.relations = relations;
        self
    }

    /// The select for targets whose `remote` column equals `local`. The
    /// relation key takes precedence over a caller criterion on the same
    /// column.
    pub(crate) fn plan(&self, remote: &str, local: Value) -> QueryPlan {
        let mut criteria = Criteria::new().with(remote, Criterion::Value(local));
        for (column, criterion) in self.criteria.iter() {
            if column != remote {
                criteria.insert(column, criterion.clone());
            }
        }

        QueryPlan {
            columns: self.columns.clone(),
            filter: criteria.into(),
            order_by: self.order_by.clone(),
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// What the loaded targets hydrate in turn.
    pub(crate) fn nested(&self) -> Include {
        if self.include_relations && self.columns.is_none() {
            Include::Relations(self.relations.clone())
        } else {
            Include::None
        }
    }
}
