mod exec_log;
pub use exec_log::ExecLog;


mod logging_connection;
pub use logging_connection::{LoggedOp, LoggingConnection};

mod setup;
pub use setup::{seed, setup, setup_with, Test};
