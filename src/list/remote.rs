use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::api::ApiClient;
use crate::error::Result;
use crate::table::{Row, ToRow};

use super::{ListQuery, ListSource, Page};

/// Backend list endpoint returning `{items, total, page, pages}` of `T`.
pub struct RemoteSource<T> {
    client: ApiClient,
    path: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> RemoteSource<T> {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl<T> ListSource for RemoteSource<T>
where
    T: DeserializeOwned + ToRow + Send,
{
    async fn load(&self, query: &ListQuery) -> Result<Page<Row>> {
        let page: Page<T> = self
            .client
            .get_json(&self.path, &query.to_query_pairs())
            .await?;
        Ok(page.map(|item| item.to_row()))
    }
}
