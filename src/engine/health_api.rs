use super::Engine;

use async_trait::async_trait;

use crate::{api::HealthAPI, error::Error};

#[async_trait]
impl HealthAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn health(&self) -> Result<(), Error> {
        self.store.ping().await
    }
}
