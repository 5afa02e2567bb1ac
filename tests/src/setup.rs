use crate::{ExecLog, LoggingConnection};

use quarry::{manager::DEFAULT_MAX_RELATION_DEPTH, EntityManager};
use quarry_driver_sqlite::Sqlite;

/// Tables for the fixture entities, with `{prefix}` in front of each name.
const SCHEMA: &str = r#"
CREATE TABLE {prefix}users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT UNIQUE,
    password_hash TEXT,
    session_token TEXT,
    settings BLOB,
    tags TEXT,
    active INTEGER NOT NULL DEFAULT 1
);
CREATE TABLE {prefix}customers (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);
CREATE TABLE {prefix}orders (
    id INTEGER PRIMARY KEY,
    user_id INTEGER,
    customer_id INTEGER,
    status TEXT NOT NULL,
    created_at INTEGER NOT NULL
);
CREATE TABLE {prefix}line_items (
    id INTEGER PRIMARY KEY,
    order_id INTEGER NOT NULL,
    sku TEXT NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity > 0)
);
"#;

pub struct Test {
    pub em: EntityManager,
    pub log: ExecLog,
}

/// An entity manager over a fresh in-memory database with the fixture
/// schema. The log starts empty.
pub fn setup() -> Test {
    setup_with("", DEFAULT_MAX_RELATION_DEPTH)
}

pub fn setup_with(table_name_prefix: &str, max_relation_depth: usize) -> Test {
    let mut sqlite = Sqlite::in_memory().connect().unwrap();
    sqlite
        .execute_batch(&SCHEMA.replace("{prefix}", table_name_prefix))
        .unwrap();

    let connection = LoggingConnection::new(Box::new(sqlite));
    let log = ExecLog::new(connection.shared());
    let em = EntityManager::builder()
        .table_name_prefix(table_name_prefix)
        .max_relation_depth(max_relation_depth)
        .build(connection)
        .unwrap();
    log.clear();

    Test { em, log }
}

/// Seeds and commits a small data set, then clears the log:
///
/// - customer 1 "Acme"
/// - user 42 "ada"
/// - orders 1 (open, t=100, Acme), 2 (shipped, t=200), 3 (open, t=300,
///   Acme) for user 42, and 4 (open, t=50) with no user and no customer
/// - line items A-1 and B-2 on order 1, C-3 on order 3
pub fn seed(test: &mut Test) {
    use crate::fixtures::{Customer, LineItem, Order, User};

    let em = &mut test.em;

    let mut acme = Customer::new("Acme");
    acme.id = Some(1);
    em.create(&acme).unwrap();

    let mut ada = User::new("ada");
    ada.id = Some(42);
    ada.email = Some("ada@example.com".to_owned());
    em.create(&ada).unwrap();

    let orders = [
        (1, Some(42), Some(1), "open", 100),
        (2, Some(42), None, "shipped", 200),
        (3, Some(42), Some(1), "open", 300),
        (4, None, None, "open", 50),
    ];
    for (id, user_id, customer_id, status, created_at) in orders {
        let mut order = Order::new(user_id, status, created_at);
        order.id = Some(id);
        order.customer_id = customer_id;
        em.create(&order).unwrap();
    }

    for (order_id, sku, quantity) in [(1, "A-1", 1), (1, "B-2", 2), (3, "C-3", 5)] {
        em.create(&LineItem::new(order_id, sku, quantity)).unwrap();
    }

    em.persist().unwrap();
    test.log.clear();
}
