//! Customer operations.

use crate::envelope::{item, page};
use crate::error::Result;
use crate::transport::Transport;
use helpernote_core::validation::validate_customer;
use helpernote_core::{
    AttachTags, CreateCustomer, CreateCustomerMemo, Customer, CustomerId, CustomerQuery,
    CustomerSearch, Memo, Page, Tag, TagId, UpdateCustomer,
};
use tracing::info;

/// Customer client for the Helpernote API.
pub struct CustomersClient<'a> {
    transport: &'a Transport,
}

impl<'a> CustomersClient<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Create a customer. The input is validated locally first.
    pub async fn create(&self, customer: &CreateCustomer) -> Result<Customer> {
        validate_customer(customer)?;
        let value = self.transport.post("/api/customers", customer).await?;
        let created: Customer = item(value, "customer")?;
        info!(customer_id = created.id, "Customer created");
        Ok(created)
    }

    pub async fn list(&self, query: &CustomerQuery) -> Result<Page<Customer>> {
        let value = self
            .transport
            .get_query("/api/customers", query)
            .await?;
        page(value, "customers")
    }

    /// Search by name or phone.
    pub async fn search(&self, search: &CustomerSearch) -> Result<Page<Customer>> {
        let value = self
            .transport
            .get_query("/api/customers/search", search)
            .await?;
        page(value, "customers")
    }

    pub async fn get(&self, id: CustomerId) -> Result<Customer> {
        let value = self
            .transport
            .get(&format!("/api/customers/{}", id))
            .await?;
        item(value, "customer")
    }

    pub async fn update(&self, id: CustomerId, update: &UpdateCustomer) -> Result<Customer> {
        let value = self
            .transport
            .put(&format!("/api/customers/{}", id), update)
            .await?;
        item(value, "customer")
    }

    /// Soft-delete a customer.
    pub async fn delete(&self, id: CustomerId) -> Result<()> {
        self.transport
            .delete(&format!("/api/customers/{}", id))
            .await?;
        info!(customer_id = id, "Customer deleted");
        Ok(())
    }

    // Memos

    pub async fn add_memo(&self, id: CustomerId, content: impl Into<String>) -> Result<Memo> {
        let value = self
            .transport
            .post(
                &format!("/api/customers/{}/memos", id),
                &CreateCustomerMemo::new(id, content),
            )
            .await?;
        item(value, "memo")
    }

    pub async fn memos(&self, id: CustomerId) -> Result<Page<Memo>> {
        let value = self
            .transport
            .get(&format!("/api/customers/{}/memos", id))
            .await?;
        page(value, "memos")
    }

    // Tags

    pub async fn attach_tags(&self, id: CustomerId, tag_ids: Vec<TagId>) -> Result<()> {
        self.transport
            .post(
                &format!("/api/customers/{}/tags", id),
                &AttachTags { tag_ids },
            )
            .await?;
        Ok(())
    }

    pub async fn tags(&self, id: CustomerId) -> Result<Page<Tag>> {
        let value = self
            .transport
            .get(&format!("/api/customers/{}/tags", id))
            .await?;
        page(value, "tags")
    }

    pub async fn detach_tag(&self, id: CustomerId, tag_id: TagId) -> Result<()> {
        self.transport
            .delete(&format!("/api/customers/{}/tags/{}", id, tag_id))
            .await
    }
}
