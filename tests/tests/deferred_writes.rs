use pretty_assertions::assert_eq;
use quarry::{ColumnValue, Filter, OrderBy, Value, WriteKind};
use tests::{
    fixtures::{LineItem, Order, User},
    seed, setup,
};

#[test]
fn create_flushes_as_insert() {
    let mut test = setup();
    let mut user = User::new("grace");
    user.email = Some("grace@example.com".to_owned());

    test.em.create(&user).unwrap();
    assert!(test.log.is_empty(), "create must not touch the database");

    test.em.commit().unwrap();

    assert_eq!(
        test.log.statements(),
        [
            r#"INSERT INTO "users" ("name", "email", "password_hash", "settings", "tags", "active") VALUES (:name, :email, :password_hash, :settings, :tags, :active);"#,
            "COMMIT",
        ]
    );
    assert!(test.em.pending().is_empty());
}

#[test]
fn save_flushes_as_update() {
    let mut test = setup();
    seed(&mut test);

    let mut ada: User = test.em.find(42, false).unwrap().unwrap();
    ada.name = "Ada Lovelace".to_owned();
    test.log.clear();

    test.em.save(&ada).unwrap();
    test.em.persist().unwrap();

    assert_eq!(
        test.log.statements(),
        [
            r#"UPDATE "users" SET "name" = :name, "email" = :email, "password_hash" = :password_hash, "settings" = :settings, "tags" = :tags, "active" = :active WHERE "id" = :id;"#,
            "COMMIT",
            "BEGIN",
        ]
    );

    let reloaded: User = test.em.find(42, false).unwrap().unwrap();
    assert_eq!(reloaded.name, "Ada Lovelace");

    // Still exactly one user: the save did not insert a second row.
    assert_eq!(test.em.count::<User>(Filter::new()).unwrap(), 1);
}

#[test]
fn rejected_delete_keeps_pending_save() {
    let mut test = setup();
    seed(&mut test);

    let mut ada: User = test.em.find(42, false).unwrap().unwrap();
    ada.name = "Ada Lovelace".to_owned();
    test.em.save(&ada).unwrap();

    ada.id = None;
    let err = test.em.delete(&ada).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(test.em.pending_kind(&ada), Some(WriteKind::Save));
    assert_eq!(test.em.pending().save, 1);
    assert_eq!(test.em.pending().total(), 1);
}

#[test]
fn flush_order_is_create_save_delete() {
    let mut test = setup();
    seed(&mut test);

    let orders: Vec<Order> = test.em.find_all(OrderBy::asc("id"), false).unwrap();
    let mut shipped = orders[1].clone();
    shipped.status = "delivered".to_owned();
    test.log.clear();

    // Registered in reverse of the flush order.
    test.em.delete(&orders[3]).unwrap();
    test.em.save(&shipped).unwrap();
    test.em.create(&Order::new(Some(42), "open", 400)).unwrap();
    test.em.commit().unwrap();

    let statements = test.log.statements();
    let verbs = statements
        .iter()
        .map(|sql| sql.split(' ').next().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(verbs, ["INSERT", "UPDATE", "DELETE", "COMMIT"]);
}

#[test]
fn registration_order_within_a_set() {
    let mut test = setup();

    for sku in ["first", "second", "third"] {
        test.em.create(&LineItem::new(1, sku, 1)).unwrap();
    }
    test.em.commit().unwrap();

    let skus = test
        .log
        .ops()
        .into_iter()
        .filter(|op| op.sql.starts_with("INSERT"))
        .map(|op| {
            op.binds
                .into_iter()
                .find(|bind| bind.name == "sku")
                .unwrap()
                .value
        })
        .collect::<Vec<_>>();

    assert_eq!(
        skus,
        ["first", "second", "third"].map(|sku| ColumnValue::Text(sku.to_owned()))
    );
}

#[test]
fn create_then_delete_of_new_entity_flushes_nothing() {
    let mut test = setup();
    let user = User::new("temp");

    test.em.create(&user).unwrap();
    test.em.delete(&user).unwrap();

    assert!(!test.em.is_pending(&user));
    test.em.commit().unwrap();
    assert_eq!(test.log.statements(), ["COMMIT"]);
}

#[test]
fn create_then_delete_with_id_flushes_one_delete() {
    let mut test = setup();
    let mut user = User::new("temp");
    user.id = Some(7);

    test.em.create(&user).unwrap();
    test.em.delete(&user).unwrap();
    assert_eq!(test.em.pending_kind(&user), Some(WriteKind::Delete));

    test.em.commit().unwrap();
    assert_eq!(
        test.log.statements(),
        [r#"DELETE FROM "users" WHERE "id" = :id;"#, "COMMIT"]
    );
}

#[test]
fn clones_share_a_pending_write() {
    let mut test = setup();
    let user = User::new("grace");
    test.em.create(&user).unwrap();

    let mut renamed = user.clone();
    renamed.name = "Grace Hopper".to_owned();
    test.em.save(&renamed).unwrap();

    assert_eq!(test.em.pending().total(), 1);
    assert_eq!(test.em.pending_kind(&user), Some(WriteKind::Create));

    test.em.persist().unwrap();
    let stored: Vec<User> = test.em.find_all(OrderBy::new(), false).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Grace Hopper");
}

#[test]
fn save_and_delete_need_an_id() {
    let mut test = setup();
    let user = User::new("anonymous");

    assert!(test.em.save(&user).unwrap_err().is_invalid_argument());
    assert!(test.em.delete(&user).unwrap_err().is_invalid_argument());
    assert!(test.em.pending().is_empty());
}

#[test]
fn successful_commit_empties_every_set() {
    let mut test = setup();
    seed(&mut test);

    let order: Order = test.em.find(2, false).unwrap().unwrap();
    let mut ada: User = test.em.find(42, false).unwrap().unwrap();
    ada.active = false;

    test.em.create(&User::new("grace")).unwrap();
    test.em.save(&ada).unwrap();
    test.em.delete(&order).unwrap();
    assert_eq!(test.em.pending().total(), 3);

    test.em.commit().unwrap();
    assert!(test.em.pending().is_empty());
    assert!(!test.em.in_transaction());
}

#[test]
fn failed_commit_keeps_failed_and_untried_entries() {
    let mut test = setup();

    let first = LineItem::new(1, "ok", 1);
    let invalid = LineItem::new(1, "zero", 0);
    let untried = LineItem::new(1, "later", 3);
    test.em.create(&first).unwrap();
    test.em.create(&invalid).unwrap();
    test.em.create(&untried).unwrap();

    let err = test.em.commit().unwrap_err();
    assert!(err.is_execute());
    assert!(err.execute_message().unwrap().contains("CHECK constraint failed"));

    assert!(!test.em.is_pending(&first));
    assert!(test.em.is_pending(&invalid));
    assert!(test.em.is_pending(&untried));
    assert!(test.em.in_transaction());
    assert_eq!(test.log.count_prefix("COMMIT"), 0);

    // The caller resolves the failure and commits again.
    test.em.clear(&invalid);
    test.em.commit().unwrap();

    test.em.begin_transaction().unwrap();
    let stored: Vec<LineItem> = test.em.find_all(OrderBy::asc("id"), false).unwrap();
    assert_eq!(
        stored.iter().map(|item| item.sku.as_str()).collect::<Vec<_>>(),
        ["ok", "later"]
    );
}

#[test]
fn injected_failure_leaves_later_sets_untouched() {
    let mut test = setup();
    seed(&mut test);

    let order: Order = test.em.find(4, false).unwrap().unwrap();
    test.em.create(&User::new("grace")).unwrap();
    test.em.delete(&order).unwrap();

    test.log.fail_on("INSERT INTO \"users\"");
    assert!(test.em.commit().unwrap_err().is_execute());

    let pending = test.em.pending();
    assert_eq!((pending.create, pending.save, pending.delete), (1, 0, 1));
    assert_eq!(test.log.count_prefix("DELETE"), 0);

    test.log.stop_failing();
    test.em.commit().unwrap();
    assert!(test.em.pending().is_empty());
    assert_eq!(test.log.count_ok("INSERT"), 1);
    assert_eq!(test.log.count_ok("DELETE"), 1);
}

#[test]
fn rollback_keeps_pending_writes_without_double_apply() {
    let mut test = setup();
    let mut user = User::new("grace");
    user.id = Some(7);

    test.em.create(&user).unwrap();
    test.em.rollback().unwrap();
    assert!(test.em.is_pending(&user));

    // A new transaction flushes the write exactly once.
    test.em.begin_transaction().unwrap();
    test.em.persist().unwrap();
    test.em.persist().unwrap();

    assert_eq!(test.log.count_prefix("INSERT"), 1);
    assert_eq!(
        test.em.count::<User>(quarry::criteria! { "id" => 7 }).unwrap(),
        1
    );
}

#[test]
fn rollback_reverts_flushed_statements() {
    let mut test = setup();
    seed(&mut test);

    let order: Order = test.em.find(1, false).unwrap().unwrap();
    test.em.delete(&order).unwrap();
    test.em.create(&User::new("grace")).unwrap();

    test.log.fail_on("DELETE");
    assert!(test.em.commit().is_err());

    // The INSERT ran inside the still-open transaction.
    assert_eq!(test.log.count_ok("INSERT"), 1);
    test.em.rollback().unwrap();
    test.log.stop_failing();

    test.em.begin_transaction().unwrap();
    assert_eq!(test.em.count::<User>(Filter::new()).unwrap(), 1);
    assert!(test.em.find::<Order>(1, false).unwrap().is_some());
    assert_eq!(test.em.pending().delete, 1);
}

#[test]
fn transaction_state_errors() {
    let mut test = setup();
    assert!(test.em.in_transaction());

    let err = test.em.begin_transaction().unwrap_err();
    assert!(err.is_transaction());

    test.em.commit().unwrap();
    assert!(test.em.commit().unwrap_err().is_transaction());
    assert!(test.em.rollback().unwrap_err().is_transaction());
}

#[test]
fn persist_reopens_a_transaction() {
    let mut test = setup();
    test.em.create(&User::new("grace")).unwrap();

    test.em.persist().unwrap();
    assert!(test.em.in_transaction());
    assert_eq!(test.log.statements().last().unwrap(), "BEGIN");
}

#[test]
fn last_insert_id_after_flush() {
    let mut test = setup();
    seed(&mut test);

    test.em.create(&User::new("grace")).unwrap();
    test.em.persist().unwrap();

    assert_eq!(test.em.last_insert_id().unwrap(), Value::I64(43));
}

#[test]
fn clear_drops_one_entity() {
    let mut test = setup();
    let keep = User::new("keep");
    let drop = User::new("drop");

    test.em.create(&keep).unwrap();
    test.em.create(&drop).unwrap();
    assert!(test.em.clear(&drop));

    test.em.commit().unwrap();
    assert_eq!(test.log.count_prefix("INSERT"), 1);

    test.em.begin_transaction().unwrap();
    test.em.create(&drop).unwrap();
    test.em.clear_all();
    assert!(test.em.pending().is_empty());
}
