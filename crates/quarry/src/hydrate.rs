use crate::{Entity, EntityManager, Include, Result};

/// Fills the relation properties of freshly fetched entities.
///
/// Each relation runs one select per owner against the target table, keyed
/// by `remote = owner[local]`. An owner whose local value is null gets an
/// empty relation without a query. Loaded targets hydrate their own
/// relations in turn until `depth` reaches the manager's limit.
pub(crate) fn hydrate<T: Entity>(
    em: &mut EntityManager,
    entities: &mut [T],
    include: &Include,
    depth: usize,
) -> Result<()> {
    if include.is_none() || entities.is_empty() {
        return Ok(());
    }

    let types = T::property_types();
    if types.relations().next().is_none() {
        return Ok(());
    }

    if depth >= em.max_relation_depth() {
        tracing::debug!(
            entity = std::any::type_name::<T>(),
            depth,
            "relation depth limit reached; relations left unloaded"
        );
        return Ok(());
    }

    for entity in entities.iter_mut() {
        let record = entity.to_record()?;

        for (property, relation) in types.relations() {
            let Some(options) = include.options(property) else {
                continue;
            };

            let local = record.get(relation.local()).cloned().unwrap_or_default();
            let plan = (!local.is_null()).then(|| options.plan(relation.remote(), local));

            let related = relation.load(em, plan, &options.nested(), depth + 1)?;
            entity.attach(property, related)?;
        }
    }

    Ok(())
}
