//! `/products` endpoints.

use crate::{ApiClient, FetchError};
use serde_json::json;
use techmart_catalog::catalog::{PageResponse, Product, ProductAccessory, ProductStatus};
use techmart_catalog::ids::{CategoryId, ProductId};

/// Paging and filtering for the product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: u32,
    pub size: u32,
    pub search: Option<String>,
    pub category_id: Option<CategoryId>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            search: None,
            category_id: None,
        }
    }
}

impl ProductQuery {
    pub fn page(mut self, page: u32, size: u32) -> Self {
        self.page = page;
        self.size = size;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.is_empty() { None } else { Some(search) };
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

#[derive(Clone, Copy)]
pub struct ProductService<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// One page of products.
    pub async fn list(&self, query: &ProductQuery) -> Result<PageResponse<Product>, FetchError> {
        let request = self
            .client
            .get("products")
            .query("page", query.page)
            .query("size", query.size)
            .query_opt("search", query.search.as_deref())
            .query_opt("categoryId", query.category_id);
        self.client.fetch(request).await
    }

    pub async fn get(&self, id: ProductId) -> Result<Product, FetchError> {
        self.client.fetch(self.client.get(format!("products/{}", id))).await
    }

    pub async fn create(&self, product: &Product) -> Result<Product, FetchError> {
        let request = self.client.post("products").json(product)?;
        self.client.fetch(request).await
    }

    pub async fn update(&self, id: ProductId, product: &Product) -> Result<Product, FetchError> {
        let request = self.client.put(format!("products/{}", id)).json(product)?;
        self.client.fetch(request).await
    }

    pub async fn delete(&self, id: ProductId) -> Result<(), FetchError> {
        self.client
            .execute(self.client.delete(format!("products/{}", id)))
            .await
    }

    pub async fn update_status(
        &self,
        id: ProductId,
        status: ProductStatus,
    ) -> Result<Product, FetchError> {
        let request = self
            .client
            .patch(format!("products/{}/status", id))
            .json(&json!({ "status": status }))?;
        self.client.fetch(request).await
    }

    /// Every product in a category, unpaged. This is what listings group.
    pub async fn by_category(&self, category_id: CategoryId) -> Result<Vec<Product>, FetchError> {
        self.client
            .fetch(self.client.get(format!("products/category/{}", category_id)))
            .await
    }

    /// Name search.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Product>, FetchError> {
        let request = self.client.get("products/search").query("keyword", keyword);
        self.client.fetch(request).await
    }

    /// All members of a variant family.
    pub async fn by_group(&self, group_code: &str) -> Result<Vec<Product>, FetchError> {
        self.client
            .fetch(self.client.get(format!("products/group/{}", group_code)))
            .await
    }

    pub async fn featured(&self) -> Result<Vec<Product>, FetchError> {
        self.client.fetch(self.client.get("products/featured")).await
    }

    pub async fn accessories(&self, id: ProductId) -> Result<Vec<ProductAccessory>, FetchError> {
        self.client
            .fetch(self.client.get(format!("products/{}/accessories", id)))
            .await
    }

    /// Products that could still be linked as accessories of `id`.
    pub async fn available_accessories(&self, id: ProductId) -> Result<Vec<Product>, FetchError> {
        self.client
            .fetch(self.client.get(format!("products/{}/available-accessories", id)))
            .await
    }

    pub async fn add_accessory(
        &self,
        id: ProductId,
        accessory_id: ProductId,
    ) -> Result<ProductAccessory, FetchError> {
        let request = self
            .client
            .post(format!("products/{}/accessories", id))
            .json(&json!({ "accessoryId": accessory_id }))?;
        self.client.fetch(request).await
    }

    pub async fn remove_accessory(
        &self,
        id: ProductId,
        accessory_id: ProductId,
    ) -> Result<(), FetchError> {
        self.client
            .execute(
                self.client
                    .delete(format!("products/{}/accessories/{}", id, accessory_id)),
            )
            .await
    }
}
