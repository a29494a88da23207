//! `/product-attributes` endpoints.

use crate::{ApiClient, FetchError};
use techmart_catalog::catalog::AttributeRecord;
use techmart_catalog::ids::{AttributeId, ProductId};

#[derive(Clone, Copy)]
pub struct AttributeService<'a> {
    client: &'a ApiClient,
}

impl<'a> AttributeService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<AttributeRecord>, FetchError> {
        self.client.fetch(self.client.get("product-attributes")).await
    }

    pub async fn get(&self, id: AttributeId) -> Result<AttributeRecord, FetchError> {
        self.client
            .fetch(self.client.get(format!("product-attributes/{}", id)))
            .await
    }

    pub async fn for_product(&self, product_id: ProductId) -> Result<Vec<AttributeRecord>, FetchError> {
        self.client
            .fetch(self.client.get(format!("product-attributes/product/{}", product_id)))
            .await
    }

    pub async fn create(&self, attribute: &AttributeRecord) -> Result<AttributeRecord, FetchError> {
        let request = self.client.post("product-attributes").json(attribute)?;
        self.client.fetch(request).await
    }

    pub async fn update(
        &self,
        id: AttributeId,
        attribute: &AttributeRecord,
    ) -> Result<AttributeRecord, FetchError> {
        let request = self
            .client
            .put(format!("product-attributes/{}", id))
            .json(attribute)?;
        self.client.fetch(request).await
    }

    /// Returns whether the backend deleted anything.
    pub async fn delete(&self, id: AttributeId) -> Result<bool, FetchError> {
        self.client
            .fetch(self.client.delete(format!("product-attributes/{}", id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::{ApiClient, Method};
    use serde_json::json;
    use techmart_catalog::catalog::ProductAttribute;
    use techmart_catalog::ids::{AttributeId, ProductId};

    #[tokio::test]
    async fn test_for_product_converts_to_attributes() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond_json(
            Method::Get,
            "/api/product-attributes/product/3",
            json!([{"id": 1, "productId": 3, "attributeName": "RAM", "attributeValue": "16GB"}]),
        );

        let records = client
            .attributes()
            .for_product(ProductId::new(3))
            .await
            .unwrap();
        let attrs: Vec<ProductAttribute> = records.iter().map(ProductAttribute::from).collect();
        assert_eq!(attrs[0].name, "RAM");
        assert_eq!(attrs[0].value, "16GB");
    }

    #[tokio::test]
    async fn test_delete_returns_flag() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond(Method::Delete, "/api/product-attributes/1", 200, "true");
        assert!(client.attributes().delete(AttributeId::new(1)).await.unwrap());
    }
}
