use crate::Result;

use quickcrud_core::{
    async_trait,
    driver::{Connection, Driver},
};

use std::borrow::Cow;
use url::Url;

/// Dispatches to a built-in driver based on the connection URL's scheme.
#[derive(Debug)]
pub struct Connect {
    url: Url,
    driver: Box<dyn Driver>,
}

impl Connect {
    pub fn new(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(anyhow::Error::from)?;

        let driver = match parsed.scheme() {
            "sqlite" => connect_sqlite(url)?,
            scheme => {
                return Err(anyhow::anyhow!(
                    "unsupported database; scheme={scheme}; url={url}"
                )
                .into())
            }
        };

        Ok(Self {
            url: parsed,
            driver,
        })
    }
}

#[async_trait]
impl Driver for Connect {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.url.as_str())
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        self.driver.connect().await
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(quickcrud_driver_sqlite::Sqlite::new(url)?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Box<dyn Driver>> {
    Err(anyhow::anyhow!("`sqlite` feature not enabled").into())
}
