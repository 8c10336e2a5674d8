//! Contact endpoints, scoped to a customer account.

use registrar::{
    ClassifiedError, Contact, ContactHandle, ContactRequest, CustomerHandle, ListOptions,
    ListResponse, SearchParam,
};

use crate::paths::{segment, with_query};
use crate::ApiClient;

fn contacts_path(customer: &CustomerHandle) -> String {
    format!("/customers/{}/contacts", segment(customer.as_str()))
}

fn contact_path(customer: &CustomerHandle, handle: &ContactHandle) -> String {
    format!("{}/{}", contacts_path(customer), segment(handle.as_str()))
}

impl ApiClient {
    pub async fn list_contacts(
        &self,
        customer: &CustomerHandle,
        options: &ListOptions,
    ) -> Result<ListResponse<Contact>, ClassifiedError> {
        let path = with_query(contacts_path(customer), &options.query_pairs(SearchParam::Search));
        self.get(&path).await
    }

    pub async fn get_contact(
        &self,
        customer: &CustomerHandle,
        handle: &ContactHandle,
    ) -> Result<Contact, ClassifiedError> {
        self.get(&contact_path(customer, handle)).await
    }

    pub async fn create_contact(
        &self,
        customer: &CustomerHandle,
        handle: &ContactHandle,
        request: &ContactRequest,
    ) -> Result<(), ClassifiedError> {
        self.post_no_content(&contact_path(customer, handle), Some(request))
            .await
    }

    pub async fn update_contact(
        &self,
        customer: &CustomerHandle,
        handle: &ContactHandle,
        request: &ContactRequest,
    ) -> Result<(), ClassifiedError> {
        let path = format!("{}/update", contact_path(customer, handle));
        self.post_no_content(&path, Some(request)).await
    }

    pub async fn delete_contact(
        &self,
        customer: &CustomerHandle,
        handle: &ContactHandle,
    ) -> Result<(), ClassifiedError> {
        self.delete(&contact_path(customer, handle)).await
    }
}
