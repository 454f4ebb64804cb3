use serde::Serialize;
use serde_with::{serde_as, DisplayFromStr};

use std::{
    fmt::{self, Display},
    io::Write,
};

use crate::{
    money::Money,
    rank::{RankedSeller, TopProduct},
};

/// One seller's line in the finished report.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SellerReport {
    pub seller_id: String,
    pub name: String,
    pub revenue: Money,
    pub profit: Money,
    /// Total units sold across all line items.
    pub sales_count: u64,
    pub top_products: Vec<TopProduct>,
    /// Bonus as a monetary amount, not a percentage.
    pub bonus: Money,
}

impl From<RankedSeller> for SellerReport {
    fn from(ranked: RankedSeller) -> Self {
        let RankedSeller {
            aggregate,
            bonus,
            top_products,
        } = ranked;
        Self {
            seller_id: aggregate.seller_id,
            name: aggregate.name,
            revenue: Money::round(aggregate.revenue),
            profit: Money::round(aggregate.profit),
            sales_count: aggregate.sales_count,
            top_products,
            bonus: Money::round(bonus),
        }
    }
}

/// Holds a ranked list of seller reports, best first, for output.
///
/// To get a printable table, use its [`Display`] implementation. For
/// machine-readable output, use [`Self::to_json`] or [`Self::write_csv`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SalesReport {
    sellers: Vec<SellerReport>,
}

impl SalesReport {
    #[must_use]
    pub fn new(sellers: Vec<SellerReport>) -> Self {
        Self { sellers }
    }

    #[must_use]
    pub fn sellers(&self) -> &[SellerReport] {
        &self.sellers
    }

    /// Keeps only the `n` best-ranked sellers.
    pub fn truncate(&mut self, n: usize) {
        self.sellers.truncate(n);
    }

    /// Renders the report as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns any errors from [`serde_json`].
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.sellers)
    }

    /// Writes the report as CSV, one row per seller, with a header.
    ///
    /// Top products are flattened into a single `SKU:quantity;...` column.
    ///
    /// # Errors
    ///
    /// Returns any errors from writing to `wtr`.
    pub fn write_csv(&self, wtr: impl Write) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(wtr);
        for (pos, seller) in self.sellers.iter().enumerate() {
            wtr.serialize(CsvRow {
                rank: pos + 1,
                seller_id: &seller.seller_id,
                name: &seller.name,
                revenue: seller.revenue,
                profit: seller.profit,
                sales_count: seller.sales_count,
                bonus: seller.bonus,
                top_products: seller
                    .top_products
                    .iter()
                    .map(|p| format!("{}:{}", p.sku, p.quantity))
                    .collect::<Vec<_>>()
                    .join(";"),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl Display for SalesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .sellers
            .iter()
            .map(|s| s.name.chars().count())
            .max()
            .unwrap_or_default()
            .max("Seller".len());
        writeln!(
            f,
            "{:>4} {:width$} {:>12} {:>12} {:>6} {:>12}",
            "Rank", "Seller", "Revenue", "Profit", "Units", "Bonus"
        )?;
        let length = width + 51;
        writeln!(f, "{:-<length$}", "")?;
        let (mut revenue, mut profit, mut units, mut bonus) =
            (Money::ZERO, Money::ZERO, 0, Money::ZERO);
        for (pos, s) in self.sellers.iter().enumerate() {
            writeln!(
                f,
                "{:>4} {:width$} {:>12} {:>12} {:>6} {:>12}",
                pos + 1,
                s.name,
                s.revenue,
                s.profit,
                s.sales_count,
                s.bonus
            )?;
            revenue += s.revenue;
            profit += s.profit;
            units += s.sales_count;
            bonus += s.bonus;
        }
        writeln!(f, "{:-<length$}", "")?;
        writeln!(
            f,
            "{:>4} {:width$} {revenue:>12} {profit:>12} {units:>6} {bonus:>12}",
            "", "Total"
        )?;
        Ok(())
    }
}

#[serde_as]
#[derive(Serialize)]
struct CsvRow<'a> {
    rank: usize,
    seller_id: &'a str,
    name: &'a str,
    #[serde_as(as = "DisplayFromStr")]
    revenue: Money,
    #[serde_as(as = "DisplayFromStr")]
    profit: Money,
    sales_count: u64,
    #[serde_as(as = "DisplayFromStr")]
    bonus: Money,
    top_products: String,
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, str::FromStr};

    use super::*;
    use crate::aggregate::SellerAggregate;

    fn seller(id: &str, name: &str, revenue: &str, profit: &str, bonus: &str) -> SellerReport {
        SellerReport {
            seller_id: id.into(),
            name: name.into(),
            revenue: Money::from_str(revenue).unwrap(),
            profit: Money::from_str(profit).unwrap(),
            sales_count: 3,
            top_products: vec![
                TopProduct {
                    sku: "SKU_001".into(),
                    quantity: 2,
                },
                TopProduct {
                    sku: "SKU_002".into(),
                    quantity: 1,
                },
            ],
            bonus: Money::from_str(bonus).unwrap(),
        }
    }

    fn report() -> SalesReport {
        SalesReport::new(vec![
            seller("seller_1", "Alexey Petrov", "95", "44", "6.60"),
            seller("seller_2", "Ivan Smirnov", "60", "28", "0"),
        ])
    }

    #[test]
    fn from_ranked_seller_rounds_money_fields() {
        let ranked = RankedSeller {
            aggregate: SellerAggregate {
                seller_id: "seller_1".into(),
                name: "Alexey Petrov".into(),
                revenue: 10.125,
                profit: 0.375,
                sales_count: 7,
                products_sold: BTreeMap::new(),
            },
            bonus: 0.125,
            top_products: Vec::new(),
        };
        let report = SellerReport::from(ranked);
        assert_eq!(report.revenue, Money::from_str("10.13").unwrap());
        assert_eq!(report.profit, Money::from_str("0.38").unwrap());
        assert_eq!(report.bonus, Money::from_str("0.13").unwrap());
        assert_eq!(report.sales_count, 7);
    }

    #[test]
    fn display_renders_table_with_totals() {
        let text = report().to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[0],
            "Rank Seller             Revenue       Profit  Units        Bonus"
        );
        assert_eq!(
            lines[2],
            "   1 Alexey Petrov        95.00        44.00      3         6.60"
        );
        assert_eq!(
            lines[5],
            "     Total               155.00        72.00      6         6.60"
        );
    }

    #[test]
    fn to_json_fn_emits_numbers_for_money() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["seller_id"], "seller_1");
        assert_eq!(value[0]["bonus"], 6.6);
        assert_eq!(value[1]["revenue"], 60.0);
        assert_eq!(value[0]["top_products"][1]["sku"], "SKU_002");
    }

    #[test]
    fn write_csv_fn_writes_header_and_rows() {
        let mut buf = Vec::new();
        report().write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "rank,seller_id,name,revenue,profit,sales_count,bonus,top_products"
        );
        assert_eq!(
            lines[1],
            "1,seller_1,Alexey Petrov,95.00,44.00,3,6.60,SKU_001:2;SKU_002:1"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn truncate_fn_keeps_best_sellers() {
        let mut report = report();
        report.truncate(1);
        assert_eq!(report.sellers().len(), 1);
        assert_eq!(report.sellers()[0].seller_id, "seller_1");
    }
}
