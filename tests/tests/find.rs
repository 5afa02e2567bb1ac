use pretty_assertions::assert_eq;
use quarry::{
    criteria, Direction, Entity, OrderBy, QueryPlan, RelationOptions, Relations, Value,
};
use serde_json::json;
use tests::{
    fixtures::{Order, Settings, User},
    seed, setup, setup_with,
};

fn ids(orders: &[Order]) -> Vec<i64> {
    orders.iter().map(|order| order.id.unwrap()).collect()
}

#[test]
fn find_by_id_without_relations() {
    let mut test = setup();
    seed(&mut test);

    let ada: User = test.em.find(42, false).unwrap().unwrap();
    assert_eq!(ada.name, "ada");
    assert_eq!(ada.email.as_deref(), Some("ada@example.com"));
    assert!(!ada.orders.is_loaded());

    assert_eq!(
        test.log.statements(),
        [r#"SELECT * FROM "users" WHERE "id" = :id LIMIT 1;"#]
    );
}

#[test]
fn find_missing_id_is_none() {
    let mut test = setup();
    seed(&mut test);

    assert!(test.em.find::<User>(1000, true).unwrap().is_none());
    assert_eq!(test.log.selects(), 1);
}

#[test]
fn find_rejects_non_scalar_id() {
    let mut test = setup();

    let err = test
        .em
        .find::<User>(Value::Array(vec![json!(1)]), false)
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(test.log.is_empty());
}

#[test]
fn json_array_criterion_is_an_in_list() {
    let mut test = setup();
    seed(&mut test);

    let ids_value = Value::Array(vec![json!(1), json!(4)]);
    let plan = QueryPlan::new().criteria(criteria! { "id" => ids_value });
    let orders: Vec<Order> = test.em.find_by(&plan, false).unwrap();

    let mut found = ids(&orders);
    found.sort_unstable();
    assert_eq!(found, [1, 4]);
    assert_eq!(
        test.log.statements(),
        [r#"SELECT * FROM "orders" WHERE "id" IN (:id0, :id1);"#]
    );
}

#[test]
fn object_criterion_is_rejected_before_querying() {
    let mut test = setup();

    let mut city = serde_json::Map::new();
    city.insert("city".to_owned(), json!("Oslo"));
    let plan = QueryPlan::new().criteria(criteria! { "settings" => Value::Object(city) });
    let err = test.em.find_by::<User>(&plan, false).unwrap_err();

    assert!(err.is_invalid_criteria());
    assert!(test.log.is_empty());
}

#[test]
fn find_by_hydrates_relations() {
    let mut test = setup();
    seed(&mut test);

    let plan = QueryPlan::new()
        .and_where("status", "open")
        .order_by("created_at", Direction::Desc);
    let orders: Vec<Order> = test.em.find_by(&plan, true).unwrap();

    assert_eq!(ids(&orders), [3, 1, 4]);
    assert_eq!(
        test.log.statements()[0],
        r#"SELECT * FROM "orders" WHERE "status" = :status ORDER BY "created_at" DESC;"#
    );

    let skus = |order: &Order| {
        order
            .line_items
            .get()
            .iter()
            .map(|item| item.sku.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(skus(&orders[0]), ["C-3"]);
    assert_eq!(skus(&orders[1]), ["A-1", "B-2"]);
    assert!(skus(&orders[2]).is_empty());

    assert_eq!(orders[0].customer.get().unwrap().name, "Acme");
    assert!(orders[2].customer.get().is_none());

    // A to-one relation reads a single row.
    assert!(test
        .log
        .statements()
        .iter()
        .any(|sql| sql == r#"SELECT * FROM "customers" WHERE "id" = :id LIMIT 1;"#));
}

#[test]
fn count_matches_find_by() {
    let mut test = setup();
    seed(&mut test);

    let open = criteria! { "status" => "open" };
    let count = test.em.count::<Order>(open.clone()).unwrap();

    assert_eq!(
        test.log.statements(),
        [r#"SELECT COUNT(*) AS "count" FROM "orders" WHERE "status" = :status;"#]
    );

    let orders: Vec<Order> = test
        .em
        .find_by(&QueryPlan::new().criteria(open), false)
        .unwrap();
    assert_eq!(count, orders.len() as u64);
    assert_eq!(count, 3);
}

#[test]
fn relations_stop_at_the_depth_limit() {
    let mut test = setup();
    seed(&mut test);

    let order: Order = test.em.find(1, true).unwrap().unwrap();

    // orders -> line_items -> order -> line_items, then no further.
    let item = &order.line_items.get()[0];
    let parent = item.order.get().unwrap();
    assert_eq!(parent.id, Some(1));

    let nested = &parent.line_items.get()[0];
    assert_eq!(nested.sku, "A-1");
    assert!(!nested.order.is_loaded());
}

#[test]
fn depth_limit_is_configurable() {
    let mut test = setup_with("", 1);
    seed(&mut test);

    let order: Order = test.em.find(1, true).unwrap().unwrap();
    let items = order.line_items.get();

    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| !item.order.is_loaded()));
}

#[test]
fn null_local_value_loads_empty_without_query() {
    let mut test = setup();
    seed(&mut test);

    let include = Relations::new().with(
        "line_items",
        RelationOptions::new().include_relations(false),
    );
    let order: Order = test.em.find(4, include).unwrap().unwrap();

    assert!(order.customer.is_loaded());
    assert!(order.customer.get().is_none());
    assert!(order.line_items.get().is_empty());

    // The order itself and its line items; nothing for the customer.
    assert_eq!(test.log.selects(), 2);
    assert!(!test
        .log
        .statements()
        .iter()
        .any(|sql| sql.contains("\"customers\"")));
}

#[test]
fn relation_options_shape_the_relation_query() {
    let mut test = setup();
    seed(&mut test);

    let include = Relations::new().with(
        "line_items",
        RelationOptions::new()
            .order_by(OrderBy::desc("sku"))
            .include_relations(false),
    );
    let order: Order = test.em.find(1, include).unwrap().unwrap();

    let skus = order
        .line_items
        .get()
        .iter()
        .map(|item| item.sku.as_str())
        .collect::<Vec<_>>();
    assert_eq!(skus, ["B-2", "A-1"]);
    assert!(order
        .line_items
        .get()
        .iter()
        .all(|item| !item.order.is_loaded()));

    assert!(test.log.statements().iter().any(|sql| sql
        == r#"SELECT * FROM "line_items" WHERE "order_id" = :order_id ORDER BY "sku" DESC;"#));

    // Relations not listed still load with defaults.
    assert_eq!(order.customer.get().unwrap().name, "Acme");
}

#[test]
fn relation_key_overrides_caller_criteria() {
    let mut test = setup();
    seed(&mut test);

    let include = Relations::new().with(
        "line_items",
        RelationOptions::new()
            .criteria(criteria! { "order_id" => 3, "sku" => "A%" })
            .include_relations(false),
    );
    let order: Order = test.em.find(1, include).unwrap().unwrap();

    let skus = order
        .line_items
        .get()
        .iter()
        .map(|item| item.sku.as_str())
        .collect::<Vec<_>>();
    assert_eq!(skus, ["A-1"]);
}

#[test]
fn projection_disables_hydration() {
    let mut test = setup();
    seed(&mut test);

    let plan = QueryPlan::new()
        .columns(["id", "status"])
        .order_by("id", Direction::Asc);
    let orders: Vec<Order> = test.em.find_by(&plan, true).unwrap();

    assert_eq!(ids(&orders), [1, 2, 3, 4]);
    assert!(orders.iter().all(|order| !order.line_items.is_loaded()));
    assert_eq!(orders[0].user_id, None);
    assert_eq!(
        test.log.statements(),
        [r#"SELECT "id", "status" FROM "orders" ORDER BY "id" ASC;"#]
    );
}

#[test]
fn find_one_by_and_find_all() {
    let mut test = setup();
    seed(&mut test);

    let first: Order = test
        .em
        .find_one_by(
            criteria! { "status" => "open" },
            OrderBy::asc("created_at"),
            false,
        )
        .unwrap()
        .unwrap();
    assert_eq!(first.id, Some(4));

    let none = test
        .em
        .find_one_by::<Order>(criteria! { "status" => "lost" }, OrderBy::new(), false)
        .unwrap();
    assert!(none.is_none());

    let all: Vec<Order> = test.em.find_all(OrderBy::desc("id"), false).unwrap();
    assert_eq!(ids(&all), [4, 3, 2, 1]);
}

#[test]
fn composite_properties_round_trip() {
    let mut test = setup();

    let settings = Settings {
        theme: "dark".to_owned(),
        notifications: true,
        languages: vec!["en".to_owned(), "fr".to_owned()],
    };
    let mut user = User::new("grace");
    user.id = Some(7);
    user.settings = Some(settings.clone());
    user.tags = vec![json!("admin"), json!(3), json!({ "k": "v" })];
    user.active = false;

    test.em.create(&user).unwrap();
    test.em.persist().unwrap();

    let stored: User = test.em.find(7, false).unwrap().unwrap();
    assert_eq!(stored.settings, Some(settings));
    assert_eq!(stored.tags, user.tags);
    assert!(!stored.active);
}

#[test]
fn hidden_fields() {
    let mut test = setup();

    let mut user = User::new("grace");
    user.id = Some(7);
    user.password_hash = "s3cret".to_owned();
    user.session_token = Some("token".to_owned());

    let json = user.to_json().unwrap();
    assert_eq!(json["name"], json!("grace"));
    assert!(json.get("password_hash").is_none());
    assert!(json.get("session_token").is_none());
    assert!(json.get("orders").is_none());

    test.em.create(&user).unwrap();
    test.em.persist().unwrap();

    let insert = test
        .log
        .ops()
        .into_iter()
        .find(|op| op.sql.starts_with("INSERT"))
        .unwrap();
    assert!(insert.sql.contains("\"password_hash\""));
    assert!(!insert.sql.contains("session_token"));

    let stored: User = test.em.find(7, false).unwrap().unwrap();
    assert_eq!(stored.password_hash, "s3cret");
    assert_eq!(stored.session_token, None);
}
