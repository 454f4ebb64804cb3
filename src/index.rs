use std::collections::{hash_map::Entry, HashMap};

use crate::{
    error::{ReportError, Result},
    model::{Product, Seller},
};

/// Sellers by id, remembering the order they were supplied in.
#[derive(Debug)]
pub struct SellerIndex<'a> {
    sellers: Vec<&'a Seller>,
    positions: HashMap<&'a str, usize>,
}

impl<'a> SellerIndex<'a> {
    /// Indexes `sellers` by id.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidInput`] if `sellers` is empty, or if two
    /// sellers share an id.
    pub fn build(sellers: &'a [Seller]) -> Result<Self> {
        if sellers.is_empty() {
            return Err(ReportError::InvalidInput("no sellers supplied".into()));
        }
        let mut positions = HashMap::with_capacity(sellers.len());
        for (pos, seller) in sellers.iter().enumerate() {
            match positions.entry(seller.id.as_str()) {
                Entry::Occupied(_) => {
                    return Err(ReportError::InvalidInput(format!(
                        "duplicate seller id {:?}",
                        seller.id
                    )))
                }
                Entry::Vacant(slot) => {
                    slot.insert(pos);
                }
            }
        }
        Ok(Self {
            sellers: sellers.iter().collect(),
            positions,
        })
    }

    /// Returns the position of seller `id` in the original collection.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Iterates over sellers in their original order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Seller> + '_ {
        self.sellers.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sellers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sellers.is_empty()
    }
}

/// Products by SKU.
#[derive(Debug)]
pub struct ProductIndex<'a>(HashMap<&'a str, &'a Product>);

impl<'a> ProductIndex<'a> {
    /// Indexes `products` by SKU.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidInput`] if `products` is empty, or if two
    /// products share a SKU.
    pub fn build(products: &'a [Product]) -> Result<Self> {
        if products.is_empty() {
            return Err(ReportError::InvalidInput("no products supplied".into()));
        }
        let mut index = HashMap::with_capacity(products.len());
        for product in products {
            if index.insert(product.sku.as_str(), product).is_some() {
                return Err(ReportError::InvalidInput(format!(
                    "duplicate product sku {:?}",
                    product.sku
                )));
            }
        }
        Ok(Self(index))
    }

    #[must_use]
    pub fn get(&self, sku: &str) -> Option<&'a Product> {
        self.0.get(sku).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
