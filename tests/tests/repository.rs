use pretty_assertions::assert_eq;
use quarry::{criteria, Direction, Entity, QueryPlan, Repository, Result};
use tests::{
    fixtures::{LineItem, Order},
    seed, setup,
};

fn ids(orders: &[Order]) -> Vec<i64> {
    orders.iter().map(|order| order.id.unwrap()).collect()
}

#[test]
fn fluent_query() {
    let mut test = setup();
    seed(&mut test);

    let orders = test
        .em
        .repository::<Order>()
        .and_where("user_id", 42)
        .and_where("status", "open")
        .order_by("created_at", Direction::Desc)
        .limit(1)
        .include(false)
        .get_results()
        .unwrap();

    assert_eq!(ids(&orders), [3]);
    assert_eq!(
        test.log.statements(),
        [r#"SELECT * FROM "orders" WHERE "user_id" = :user_id AND "status" = :status ORDER BY "created_at" DESC LIMIT 1;"#]
    );
}

#[test]
fn or_where_and_is_null() {
    let mut test = setup();
    seed(&mut test);

    let orders = test
        .em
        .repository::<Order>()
        .and_where("status", "shipped")
        .or_where("user_id", None::<i64>)
        .order_by("id", Direction::Asc)
        .include(false)
        .get_results()
        .unwrap();

    assert_eq!(ids(&orders), [2, 4]);
    assert_eq!(
        test.log.statements(),
        [r#"SELECT * FROM "orders" WHERE "status" = :status OR "user_id" IS NULL ORDER BY "id" ASC;"#]
    );
}

#[test]
fn in_list_and_like() {
    let mut test = setup();
    seed(&mut test);

    let mut orders = test.em.repository::<Order>();
    let picked = orders
        .and_where("id", vec![1, 3])
        .order_by("id", Direction::Unspecified)
        .include(false)
        .get_results()
        .unwrap();
    assert_eq!(ids(&picked), [1, 3]);

    let items = test
        .em
        .repository::<LineItem>()
        .and_where("sku", "%-2")
        .include(false)
        .get_results()
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].sku, "B-2");
    assert!(test
        .log
        .statements()
        .last()
        .unwrap()
        .contains(r#""sku" LIKE :sku"#));
}

#[test]
fn empty_in_list_is_rejected_before_execution() {
    let mut test = setup();
    seed(&mut test);

    let err = test
        .em
        .repository::<Order>()
        .and_where("id", Vec::<i64>::new())
        .get_results()
        .unwrap_err();

    assert!(err.is_invalid_criteria());
    assert!(test.log.is_empty());
}

#[test]
fn get_one_variants() {
    let mut test = setup();
    seed(&mut test);

    let mut orders = test.em.repository::<Order>();

    let order = orders
        .and_where("status", "shipped")
        .get_one_or_fail()
        .unwrap();
    assert_eq!(order.id, Some(2));
    assert!(order.line_items.is_loaded());

    let missing = orders.and_where("status", "lost").get_one_or_none().unwrap();
    assert!(missing.is_none());

    let err = orders
        .and_where("status", "lost")
        .get_one_or_fail()
        .unwrap_err();
    assert!(err.is_entity_not_found());
    assert!(err.to_string().contains("table=orders"));

    let first = test.log.statements()[0].clone();
    assert_eq!(
        first,
        r#"SELECT * FROM "orders" WHERE "status" = :status LIMIT 1;"#
    );
}

#[test]
fn terminators_reset_the_plan() {
    let mut test = setup();
    seed(&mut test);

    let mut orders = test.em.repository::<Order>();
    let shipped = orders
        .and_where("status", "shipped")
        .include(false)
        .get_results()
        .unwrap();
    assert_eq!(shipped.len(), 1);
    assert!(!shipped[0].line_items.is_loaded());

    assert_eq!(orders.plan(), &QueryPlan::new());

    // Filter and include both start over.
    let all = orders.get_results().unwrap();
    assert_eq!(all.len(), 4);
    assert!(all.iter().all(|order| order.line_items.is_loaded()));
}

#[test]
fn limit_and_offset() {
    let mut test = setup();
    seed(&mut test);

    let mut orders = test.em.repository::<Order>();
    let page = orders
        .order_by("id", Direction::Asc)
        .limit(2)
        .offset(1)
        .include(false)
        .get_results()
        .unwrap();
    assert_eq!(ids(&page), [2, 3]);

    let rest = orders
        .order_by("id", Direction::Asc)
        .offset(3)
        .include(false)
        .get_results()
        .unwrap();
    assert_eq!(ids(&rest), [4]);

    assert_eq!(
        test.log.statements(),
        [
            r#"SELECT * FROM "orders" ORDER BY "id" ASC LIMIT 2 OFFSET 1;"#,
            r#"SELECT * FROM "orders" ORDER BY "id" ASC LIMIT -1 OFFSET 3;"#,
        ]
    );
}

#[test]
fn count_ignores_order_and_paging() {
    let mut test = setup();
    seed(&mut test);

    let count = test
        .em
        .repository::<Order>()
        .filter_by(criteria! { "status" => "open" })
        .order_by("created_at", Direction::Desc)
        .limit(1)
        .count()
        .unwrap();

    assert_eq!(count, 3);
    assert_eq!(
        test.log.statements(),
        [r#"SELECT COUNT(*) AS "count" FROM "orders" WHERE "status" = :status;"#]
    );
}

#[test]
fn writes_go_through_the_manager() {
    let mut test = setup();
    seed(&mut test);

    let mut orders = test.em.repository::<Order>();
    let mut order = orders.find(2).unwrap().unwrap();
    order.status = "delivered".to_owned();
    orders.save(&order).unwrap();
    orders.create(&Order::new(Some(42), "open", 500)).unwrap();
    assert_eq!(orders.pending().total(), 2);

    orders.persist().unwrap();
    assert!(orders.pending().is_empty());

    let delivered = orders
        .find_one_by(criteria! { "status" => "delivered" }, Default::default())
        .unwrap()
        .unwrap();
    assert_eq!(delivered.id, Some(2));
    assert_eq!(orders.manager().count::<Order>(criteria!()).unwrap(), 5);
}

/// Entity-specific queries live on a wrapper around the generic repository.
struct OrderRepository<'em>(Repository<'em, Order>);

impl OrderRepository<'_> {
    fn open_for_user(&mut self, user_id: i64) -> Result<Vec<Order>> {
        self.0
            .filter_by(criteria! { "user_id" => user_id, "status" => "open" })
            .order_by("created_at", Direction::Asc)
            .include(false)
            .get_results()
    }
}

#[test]
fn custom_repository() {
    let mut test = setup();
    seed(&mut test);

    let mut orders = OrderRepository(test.em.repository());
    let open = orders.open_for_user(42).unwrap();

    assert_eq!(ids(&open), [1, 3]);
    assert!(open.iter().all(|order| order.user_id == Some(42)));
    assert_eq!(Order::table_name(), "orders");
}
