//! Driver selection by connection URL scheme.

use quarry_core::{Connection, Error, Result};

use url::Url;

/// Opens a connection for `url`. The scheme picks the driver; drivers are
/// compiled in through cargo features.
pub fn connect(url: &str) -> Result<Box<dyn Connection>> {
    let parsed = Url::parse(url)?;

    match parsed.scheme() {
        "sqlite" => connect_sqlite(url),
        scheme => Err(Error::invalid_argument(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Box<dyn Connection>> {
    let driver = quarry_driver_sqlite::Sqlite::new(url)?;
    tracing::debug!(url = %driver.url(), "connecting");
    Ok(Box::new(driver.connect()?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Box<dyn Connection>> {
    Err(Error::invalid_argument("`sqlite` feature not enabled"))
}
