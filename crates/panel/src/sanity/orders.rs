//! Typed order operations on top of the raw client.

use peony_core::{Order, OrderFilters, StatusUpdate};
use tracing::instrument;

use super::groq;
use super::{CommitResult, SanityClient, SanityError};

impl SanityClient {
    /// Fetch the most recent orders matching the active filters, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not
    /// deserialize into orders.
    #[instrument(skip(self))]
    pub async fn recent_orders(&self, filters: &OrderFilters) -> Result<Vec<Order>, SanityError> {
        self.fetch(&groq::order_list_query(filters)).await
    }

    /// Patch a single status field on one order document.
    ///
    /// Only the named field is touched; the patch is atomic, so a
    /// concurrent edit to a different field is never clobbered.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is rejected or does not commit.
    #[instrument(skip(self, update), fields(field = update.field().key()))]
    pub async fn update_order(
        &self,
        order_id: &str,
        update: &StatusUpdate,
    ) -> Result<CommitResult, SanityError> {
        let patch = serde_json::json!({
            "patch": {
                "id": order_id,
                "set": {
                    update.field().document_field(): update.value(),
                }
            }
        });

        let commit = self.mutate(vec![patch]).await?;
        tracing::info!(
            order_id,
            transaction_id = %commit.transaction_id,
            "order status updated"
        );
        Ok(commit)
    }
}
