#![doc = include_str!("../README.md")]
use log::debug;

mod aggregate;
mod error;
mod index;
mod model;
mod money;
mod rank;
mod report;
mod strategy;

pub use aggregate::{aggregate, Aggregates, SellerAggregate};
pub use error::{MissingRef, ReportError, Result};
pub use index::{ProductIndex, SellerIndex};
pub use model::{LineItem, Product, PurchaseRecord, SalesData, Seller};
pub use money::Money;
pub use rank::{rank, top_products, RankedSeller, TopProduct, TOP_PRODUCTS_LIMIT};
pub use report::{SalesReport, SellerReport};
pub use strategy::{
    BonusStrategy, DiscountedRevenue, GrossRevenue, IntegrityPolicy, ProfitTierBonus,
    RevenueStrategy, Strategies, StrategiesBuilder,
};

/// Builds the performance report for every seller in `data`, best first.
///
/// Sellers are ranked by profit, descending; sellers with equal profit keep
/// the order they appear in `data.sellers`. Every seller appears exactly once,
/// whether or not they made any sales.
///
/// # Examples
///
/// ```
/// # use seller_report::*;
/// let data = SalesData::from_path("testdata/sales.json").unwrap();
/// let strategies = Strategies::new(DiscountedRevenue, ProfitTierBonus);
/// let report = generate_sales_report(&data, &strategies).unwrap();
/// assert_eq!(report[0].name, "Alexey Petrov");
/// assert_eq!(report[0].bonus.to_string(), "6.60");
/// ```
///
/// # Errors
///
/// Returns errors if:
/// * There are no sellers or no products, or ids are duplicated
///   ([`ReportError::InvalidInput`])
/// * A record names an unknown seller or product, and the integrity policy is
///   [`IntegrityPolicy::Reject`] ([`ReportError::ReferentialIntegrity`])
pub fn generate_sales_report(data: &SalesData, strategies: &Strategies) -> Result<Vec<SellerReport>> {
    let sellers = SellerIndex::build(&data.sellers)?;
    let products = ProductIndex::build(&data.products)?;
    debug!(
        "indexed {} sellers and {} products",
        sellers.len(),
        products.len()
    );
    let totals = aggregate(
        &data.purchase_records,
        &sellers,
        &products,
        strategies.revenue(),
        strategies.integrity(),
    )?;
    Ok(rank(totals, strategies.bonus())
        .into_iter()
        .map(SellerReport::from)
        .collect())
}
