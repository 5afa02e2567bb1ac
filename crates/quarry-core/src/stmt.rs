mod column_value;
pub use column_value::ColumnValue;

mod criteria;
pub use criteria::{Criteria, Criterion};

mod filter;
pub use filter::{Condition, Conjunction, Filter};

mod order_by;
pub use order_by::{Direction, OrderBy};

mod query_plan;
pub use query_plan::QueryPlan;

mod record;
pub use record::Record;

mod value;
pub use value::{FromValue, Value};
