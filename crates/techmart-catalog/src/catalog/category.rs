//! Category types and tree assembly.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A product category in the catalog hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    pub category_name: String,
    /// Parent category ID (None for root categories).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    /// Depth in the hierarchy (0 = root). Filled in by [`build_category_tree`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    /// Sort order within the parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ProductCategory>,
}

impl ProductCategory {
    /// Create a root category.
    pub fn new_root(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(CategoryId::new(id)),
            category_name: name.into(),
            ..Default::default()
        }
    }

    /// Create a category under `parent_id`.
    pub fn new_child(id: i64, parent_id: i64, name: impl Into<String>) -> Self {
        Self {
            parent_id: Some(CategoryId::new(parent_id)),
            ..Self::new_root(id, name)
        }
    }

    /// Check if this is a root category.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Depth-first search for a category by id.
    pub fn find(&self, id: CategoryId) -> Option<&ProductCategory> {
        if self.id == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Number of categories in this subtree, including itself.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_len()).sum::<usize>()
    }
}

/// Assemble a flat category list into a forest.
///
/// Roots keep their input order and children keep the order they appear in
/// under their parent. A category whose parent is not in the list is dropped,
/// and each id is placed at most once, so repeated ids and parent cycles
/// cannot loop.
pub fn build_category_tree(categories: &[ProductCategory]) -> Vec<ProductCategory> {
    let known: HashSet<CategoryId> = categories.iter().filter_map(|c| c.id).collect();
    let mut children_of: HashMap<CategoryId, Vec<&ProductCategory>> = HashMap::new();
    let mut roots = Vec::new();

    for category in categories {
        match category.parent_id {
            Some(parent) if known.contains(&parent) => {
                children_of.entry(parent).or_default().push(category)
            }
            Some(parent) => {
                tracing::debug!(
                    category = %category.category_name,
                    %parent,
                    "dropping category with unknown parent"
                );
            }
            None => roots.push(category),
        }
    }

    let mut placed = HashSet::new();
    roots
        .into_iter()
        .filter_map(|root| attach(root, 0, &children_of, &mut placed))
        .collect()
}

fn attach(
    category: &ProductCategory,
    level: u32,
    children_of: &HashMap<CategoryId, Vec<&ProductCategory>>,
    placed: &mut HashSet<CategoryId>,
) -> Option<ProductCategory> {
    if let Some(id) = category.id {
        if !placed.insert(id) {
            tracing::debug!(
                category = %category.category_name,
                %id,
                "skipping category already in the tree"
            );
            return None;
        }
    }

    let children = match category.id.and_then(|id| children_of.get(&id)) {
        Some(kids) => kids
            .iter()
            .filter_map(|kid| attach(kid, level + 1, children_of, placed))
            .collect(),
        None => Vec::new(),
    };

    Some(ProductCategory {
        level: Some(level),
        children,
        ..category.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_category() {
        let cat = ProductCategory::new_root(1, "Electronics");
        assert!(cat.is_root());
    }

    #[test]
    fn test_tree_levels_and_order() {
        let flat = vec![
            ProductCategory::new_root(1, "Electronics"),
            ProductCategory::new_child(2, 1, "Phones"),
            ProductCategory::new_child(21, 1, "Laptops"),
            ProductCategory::new_child(30, 21, "Gaming"),
            ProductCategory::new_root(5, "Accessories"),
        ];
        let tree = build_category_tree(&flat);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].category_name, "Electronics");
        assert_eq!(tree[0].level, Some(0));
        assert_eq!(tree[0].children[0].category_name, "Phones");
        assert_eq!(tree[0].children[1].category_name, "Laptops");
        let gaming = tree[0].find(CategoryId::new(30)).unwrap();
        assert_eq!(gaming.level, Some(2));
        assert_eq!(tree[0].subtree_len(), 4);
    }

    #[test]
    fn test_child_listed_before_parent() {
        let flat = vec![
            ProductCategory::new_child(2, 1, "Phones"),
            ProductCategory::new_root(1, "Electronics"),
        ];
        let tree = build_category_tree(&flat);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 1);
    }

    #[test]
    fn test_orphan_is_dropped() {
        let flat = vec![
            ProductCategory::new_root(1, "Electronics"),
            ProductCategory::new_child(9, 404, "Orphan"),
        ];
        let tree = build_category_tree(&flat);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].find(CategoryId::new(9)).is_none());
    }

    #[test]
    fn test_repeated_ids_are_placed_once() {
        let flat = vec![
            ProductCategory::new_root(1, "Electronics"),
            ProductCategory::new_child(1, 1, "Electronics again"),
            ProductCategory::new_child(2, 1, "Phones"),
            ProductCategory::new_child(1, 2, "Back to the top"),
        ];
        let tree = build_category_tree(&flat);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].subtree_len(), 2);
        assert_eq!(tree[0].children[0].category_name, "Phones");
        assert!(tree[0].children[0].children.is_empty());
    }

    #[test]
    fn test_parent_cycle_without_root_is_dropped() {
        let flat = vec![
            ProductCategory::new_root(1, "Electronics"),
            ProductCategory::new_child(7, 8, "Loop A"),
            ProductCategory::new_child(8, 7, "Loop B"),
        ];
        let tree = build_category_tree(&flat);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].subtree_len(), 1);
    }
}
