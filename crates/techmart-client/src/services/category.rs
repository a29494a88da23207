//! `/categories` endpoints.

use crate::{ApiClient, FetchError};
use serde_json::json;
use techmart_catalog::catalog::{build_category_tree, ProductCategory};
use techmart_catalog::ids::CategoryId;

#[derive(Clone, Copy)]
pub struct CategoryService<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoryService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Every category as the backend returns it, unnested.
    pub async fn list_flat(&self) -> Result<Vec<ProductCategory>, FetchError> {
        self.client.fetch(self.client.get("categories")).await
    }

    /// Every category, nested under its parent.
    pub async fn list_tree(&self) -> Result<Vec<ProductCategory>, FetchError> {
        let flat = self.list_flat().await?;
        Ok(build_category_tree(&flat))
    }

    pub async fn get(&self, id: CategoryId) -> Result<ProductCategory, FetchError> {
        self.client
            .fetch(self.client.get(format!("categories/{}", id)))
            .await
    }

    /// Root categories.
    pub async fn parents(&self) -> Result<Vec<ProductCategory>, FetchError> {
        self.client.fetch(self.client.get("categories/parents")).await
    }

    pub async fn children(&self, parent_id: CategoryId) -> Result<Vec<ProductCategory>, FetchError> {
        self.client
            .fetch(self.client.get(format!("categories/{}/children", parent_id)))
            .await
    }

    pub async fn create(&self, category: &ProductCategory) -> Result<ProductCategory, FetchError> {
        let request = self.client.post("categories").json(category)?;
        self.client.fetch(request).await
    }

    pub async fn update(
        &self,
        id: CategoryId,
        category: &ProductCategory,
    ) -> Result<ProductCategory, FetchError> {
        let request = self.client.put(format!("categories/{}", id)).json(category)?;
        self.client.fetch(request).await
    }

    pub async fn delete(&self, id: CategoryId) -> Result<(), FetchError> {
        self.client
            .execute(self.client.delete(format!("categories/{}", id)))
            .await
    }

    /// Re-parent a category; `None` makes it a root.
    pub async fn move_to(
        &self,
        id: CategoryId,
        new_parent: Option<CategoryId>,
    ) -> Result<ProductCategory, FetchError> {
        let request = self
            .client
            .patch(format!("categories/{}/move", id))
            .json(&json!({ "parentId": new_parent }))?;
        self.client.fetch(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{ApiClient, Method};
    use serde_json::json;
    use techmart_catalog::ids::CategoryId;

    #[tokio::test]
    async fn test_list_tree_nests_children() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond_json(
            Method::Get,
            "/api/categories",
            json!([
                {"id": 1, "categoryName": "Computers"},
                {"id": 21, "categoryName": "Laptops", "parentId": 1},
                {"id": 2, "categoryName": "Phones"}
            ]),
        );

        let tree = client.categories().list_tree().await.unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].children[0].category_name, "Laptops");
        assert_eq!(tree[0].children[0].level, Some(1));
    }

    #[tokio::test]
    async fn test_move_to_root_sends_null_parent() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond_json(
            Method::Patch,
            "/api/categories/21/move",
            json!({"id": 21, "categoryName": "Laptops"}),
        );
        client
            .categories()
            .move_to(CategoryId::new(21), None)
            .await
            .unwrap();
        assert_eq!(mock.requests()[0].body, Some(json!({"parentId": null})));
    }
}
