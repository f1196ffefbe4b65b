use crate::{categories::CategoryIndex, client::ApiClient, err::Result, ConnectionOptions};

/// An authenticated connection to one inventory server: the HTTP client plus
/// the category index primed at connect time as the pseudo-schema.
#[derive(Debug)]
pub struct InventreeConnection {
    pub client: ApiClient,
    pub categories: CategoryIndex,
}

impl InventreeConnection {
    /// Acquires a token for the given options and primes the category index.
    /// A connection only exists once both have succeeded, so a connected
    /// handle always has a usable pseudo-schema.
    pub fn connect(options: &ConnectionOptions) -> Result<InventreeConnection> {
        let client = ApiClient::connect(options)?;
        let categories = CategoryIndex::fetch(&client)?;
        log::debug!(
            "connected to {}, {} categories",
            options.server,
            categories.len()
        );
        Ok(InventreeConnection { client, categories })
    }
}
