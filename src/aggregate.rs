use log::{debug, warn};

use std::collections::BTreeMap;

use crate::{
    error::{MissingRef, ReportError, Result},
    index::{ProductIndex, SellerIndex},
    model::{LineItem, Product, PurchaseRecord, Seller},
    strategy::{IntegrityPolicy, RevenueStrategy},
};

/// Running sales totals for one seller.
///
/// Amounts are raw sums, never rounded here; rounding to cents happens once,
/// when the report is produced.
#[derive(Clone, Debug, PartialEq)]
pub struct SellerAggregate {
    pub seller_id: String,
    pub name: String,
    pub revenue: f64,
    pub profit: f64,
    /// Units sold: the sum of line item quantities, not the number of records.
    pub sales_count: u64,
    /// Units sold, by SKU.
    pub products_sold: BTreeMap<String, u64>,
}

impl SellerAggregate {
    #[must_use]
    pub fn new(seller: &Seller) -> Self {
        Self {
            seller_id: seller.id.clone(),
            name: seller.display_name(),
            revenue: 0.0,
            profit: 0.0,
            sales_count: 0,
            products_sold: BTreeMap::new(),
        }
    }

    fn add_item(&mut self, item: &LineItem, product: &Product, revenue: f64) {
        let cost = product.cost * f64::from(item.quantity);
        self.revenue += revenue;
        self.profit += revenue - cost;
        self.sales_count += u64::from(item.quantity);
        *self.products_sold.entry(item.sku.clone()).or_default() += u64::from(item.quantity);
    }
}

/// Per-seller totals, in the sellers' original order.
#[derive(Debug)]
pub struct Aggregates {
    sellers: Vec<SellerAggregate>,
    skipped_records: usize,
    skipped_items: usize,
}

impl Aggregates {
    #[cfg(test)]
    pub(crate) fn from_sellers(sellers: Vec<SellerAggregate>) -> Self {
        Self {
            sellers,
            skipped_records: 0,
            skipped_items: 0,
        }
    }

    #[must_use]
    pub fn sellers(&self) -> &[SellerAggregate] {
        &self.sellers
    }

    #[must_use]
    pub fn into_sellers(self) -> Vec<SellerAggregate> {
        self.sellers
    }

    /// Records left out because their seller is unknown.
    #[must_use]
    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }

    /// Line items left out because their product is unknown.
    #[must_use]
    pub fn skipped_items(&self) -> usize {
        self.skipped_items
    }
}

/// Folds every line item in `records` into its seller's totals.
///
/// Every indexed seller gets an aggregate, even one with no sales.
///
/// # Errors
///
/// Under [`IntegrityPolicy::Reject`], returns
/// [`ReportError::ReferentialIntegrity`] for the first record naming an
/// unknown seller, or the first line item naming an unknown product.
pub fn aggregate(
    records: &[PurchaseRecord],
    sellers: &SellerIndex<'_>,
    products: &ProductIndex<'_>,
    revenue: &dyn RevenueStrategy,
    policy: IntegrityPolicy,
) -> Result<Aggregates> {
    let mut totals = Aggregates {
        sellers: sellers.iter().map(SellerAggregate::new).collect(),
        skipped_records: 0,
        skipped_items: 0,
    };
    for (n, record) in records.iter().enumerate() {
        let Some(pos) = sellers.position(&record.seller_id) else {
            dangling(policy, n, MissingRef::Seller(record.seller_id.clone()))?;
            totals.skipped_records += 1;
            continue;
        };
        for item in &record.items {
            let Some(product) = products.get(&item.sku) else {
                dangling(policy, n, MissingRef::Product(item.sku.clone()))?;
                totals.skipped_items += 1;
                continue;
            };
            let item_revenue = revenue.revenue(item, product);
            totals.sellers[pos].add_item(item, product, item_revenue);
        }
    }
    debug!(
        "aggregated {} records for {} sellers ({} records, {} items skipped)",
        records.len(),
        totals.sellers.len(),
        totals.skipped_records,
        totals.skipped_items,
    );
    Ok(totals)
}

fn dangling(policy: IntegrityPolicy, record: usize, missing: MissingRef) -> Result<()> {
    match policy {
        IntegrityPolicy::Skip => {
            warn!("purchase record {record}: skipping unknown {missing}");
            Ok(())
        }
        IntegrityPolicy::Reject => Err(ReportError::ReferentialIntegrity { record, missing }),
    }
}
