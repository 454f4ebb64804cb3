use serde::Serialize;

use std::collections::BTreeMap;

use crate::{aggregate::Aggregates, aggregate::SellerAggregate, strategy::BonusStrategy};

/// The most products listed per seller.
pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// Units sold of one SKU.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TopProduct {
    pub sku: String,
    pub quantity: u64,
}

/// A seller's totals, with the fields that depend on their rank filled in.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedSeller {
    pub aggregate: SellerAggregate,
    /// Monetary bonus, unrounded.
    pub bonus: f64,
    pub top_products: Vec<TopProduct>,
}

/// Sorts sellers by profit, best first, and works out their bonuses and top
/// products.
///
/// Sellers with equal profit keep their original order. `bonus` returns a
/// percentage, and each seller's bonus is that percentage of their profit.
#[must_use]
pub fn rank(aggregates: Aggregates, bonus: &dyn BonusStrategy) -> Vec<RankedSeller> {
    let mut sellers = aggregates.into_sellers();
    sellers.sort_by(|a, b| b.profit.total_cmp(&a.profit));
    let total = sellers.len();
    sellers
        .into_iter()
        .enumerate()
        .map(|(index, aggregate)| {
            let percent = bonus.bonus_percent(index, total, &aggregate);
            let bonus = if percent == 0.0 {
                0.0
            } else {
                aggregate.profit * percent / 100.0
            };
            let top_products = top_products(&aggregate.products_sold);
            RankedSeller {
                aggregate,
                bonus,
                top_products,
            }
        })
        .collect()
}

/// Returns the best-selling SKUs by units, descending.
///
/// SKUs with identical sales are sorted alphabetically, and no more than
/// [`TOP_PRODUCTS_LIMIT`] are returned.
#[must_use]
pub fn top_products(sold: &BTreeMap<String, u64>) -> Vec<TopProduct> {
    let mut products: Vec<_> = sold
        .iter()
        .map(|(sku, &quantity)| TopProduct {
            sku: sku.clone(),
            quantity,
        })
        .collect();
    products.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.sku.cmp(&b.sku)));
    products.truncate(TOP_PRODUCTS_LIMIT);
    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        index::{ProductIndex, SellerIndex},
        model::{Product, Seller},
        strategy::{DiscountedRevenue, IntegrityPolicy, ProfitTierBonus},
    };

    fn aggregates(profits: &[f64]) -> Aggregates {
        let sellers: Vec<_> = (0..profits.len())
            .map(|n| Seller {
                id: format!("seller_{n}"),
                first_name: "Seller".into(),
                last_name: n.to_string(),
            })
            .collect();
        let products = vec![Product {
            sku: "SKU_001".into(),
            cost: 0.0,
            name: None,
            category: None,
        }];
        let mut totals = crate::aggregate::aggregate(
            &[],
            &SellerIndex::build(&sellers).unwrap(),
            &ProductIndex::build(&products).unwrap(),
            &DiscountedRevenue,
            IntegrityPolicy::Skip,
        )
        .unwrap()
        .into_sellers();
        for (agg, &profit) in totals.iter_mut().zip(profits) {
            agg.profit = profit;
        }
        Aggregates::from_sellers(totals)
    }

    fn ids(ranked: &[RankedSeller]) -> Vec<&str> {
        ranked.iter().map(|r| r.aggregate.seller_id.as_str()).collect()
    }

    #[test]
    fn rank_fn_sorts_by_profit_descending() {
        let ranked = rank(aggregates(&[5.0, 40.0, -3.0, 12.0]), &ProfitTierBonus);
        assert_eq!(ids(&ranked), vec!["seller_1", "seller_3", "seller_0", "seller_2"]);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].aggregate.profit >= w[1].aggregate.profit));
    }

    #[test]
    fn rank_fn_keeps_input_order_for_equal_profits() {
        let ranked = rank(aggregates(&[10.0, 20.0, 10.0, 10.0]), &ProfitTierBonus);
        assert_eq!(ids(&ranked), vec!["seller_1", "seller_0", "seller_2", "seller_3"]);
    }

    #[test]
    fn rank_fn_applies_bonus_tiers_as_percentage_of_profit() {
        let ranked = rank(aggregates(&[100.0, 80.0, 60.0, 40.0, 20.0]), &ProfitTierBonus);
        let bonuses: Vec<f64> = ranked.iter().map(|r| r.bonus).collect();
        assert_eq!(bonuses, vec![15.0, 8.0, 6.0, 2.0, 0.0]);
    }

    #[test]
    fn rank_fn_gives_single_seller_top_bonus() {
        let ranked = rank(aggregates(&[200.0]), &ProfitTierBonus);
        assert_eq!(ranked[0].bonus, 30.0);
    }

    #[test]
    fn rank_fn_passes_rank_and_total_to_bonus_strategy() {
        let bonus = |rank: usize, total: usize, _: &SellerAggregate| (rank * 10 + total) as f64;
        let ranked = rank(aggregates(&[300.0, 200.0, 100.0]), &bonus);
        let bonuses: Vec<f64> = ranked.iter().map(|r| r.bonus).collect();
        assert_eq!(bonuses, vec![9.0, 26.0, 23.0]);
    }

    #[test]
    fn top_products_fn_breaks_ties_by_sku() {
        let sold = BTreeMap::from([
            ("C".to_string(), 3),
            ("B".to_string(), 5),
            ("A".to_string(), 5),
        ]);
        let skus: Vec<_> = top_products(&sold).into_iter().map(|p| p.sku).collect();
        assert_eq!(skus, vec!["A", "B", "C"]);
    }

    #[test]
    fn top_products_fn_keeps_at_most_ten() {
        let sold: BTreeMap<_, _> = (1..=15).map(|n| (format!("SKU_{n:03}"), n)).collect();
        let top = top_products(&sold);
        assert_eq!(top.len(), TOP_PRODUCTS_LIMIT);
        assert_eq!(
            top[0],
            TopProduct {
                sku: "SKU_015".into(),
                quantity: 15
            }
        );
        assert_eq!(top[9].quantity, 6);
    }
}
