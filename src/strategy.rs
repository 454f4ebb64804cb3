use crate::{
    aggregate::SellerAggregate,
    error::{ReportError, Result},
    model::{LineItem, Product},
};

/// Computes the revenue earned from one line item.
///
/// Any `Fn(&LineItem, &Product) -> f64` closure is a `RevenueStrategy`.
pub trait RevenueStrategy: Send + Sync {
    fn revenue(&self, item: &LineItem, product: &Product) -> f64;
}

impl<F> RevenueStrategy for F
where
    F: Fn(&LineItem, &Product) -> f64 + Send + Sync,
{
    fn revenue(&self, item: &LineItem, product: &Product) -> f64 {
        self(item, product)
    }
}

/// Computes a seller's bonus from their position in the profit ranking.
///
/// `rank` is the zero-based position of `seller` among `total` sellers, best
/// first. The return value is a **percentage** of the seller's profit: the
/// ranking step multiplies it by the profit to get the monetary bonus.
///
/// Any `Fn(usize, usize, &SellerAggregate) -> f64` closure is a
/// `BonusStrategy`.
pub trait BonusStrategy: Send + Sync {
    fn bonus_percent(&self, rank: usize, total: usize, seller: &SellerAggregate) -> f64;
}

impl<F> BonusStrategy for F
where
    F: Fn(usize, usize, &SellerAggregate) -> f64 + Send + Sync,
{
    fn bonus_percent(&self, rank: usize, total: usize, seller: &SellerAggregate) -> f64 {
        self(rank, total, seller)
    }
}

/// Sale price times quantity, less the item's percentage discount.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscountedRevenue;

impl RevenueStrategy for DiscountedRevenue {
    fn revenue(&self, item: &LineItem, _product: &Product) -> f64 {
        let full_price = item.sale_price * f64::from(item.quantity);
        full_price - full_price * (item.discount / 100.0)
    }
}

/// Sale price times quantity, ignoring any discount.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrossRevenue;

impl RevenueStrategy for GrossRevenue {
    fn revenue(&self, item: &LineItem, _product: &Product) -> f64 {
        item.sale_price * f64::from(item.quantity)
    }
}

/// The standard bonus tiers.
///
/// | Rank              | Bonus |
/// |-------------------|-------|
/// | first             | 15%   |
/// | second and third  | 10%   |
/// | last              | 0%    |
/// | everyone else     | 5%    |
///
/// The tiers are checked in that order, so a lone seller is both first and
/// last, and gets 15%.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProfitTierBonus;

impl BonusStrategy for ProfitTierBonus {
    fn bonus_percent(&self, rank: usize, total: usize, _seller: &SellerAggregate) -> f64 {
        if rank == 0 {
            15.0
        } else if rank == 1 || rank == 2 {
            10.0
        } else if rank + 1 == total {
            0.0
        } else {
            5.0
        }
    }
}

/// What to do with a purchase record naming an unknown seller, or a line item
/// naming an unknown product.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum IntegrityPolicy {
    /// Leave the record or item out of the totals, and log a warning.
    #[default]
    Skip,
    /// Fail with [`ReportError::ReferentialIntegrity`].
    Reject,
}

/// The caller-supplied behaviour for [`generate_sales_report`](crate::generate_sales_report).
///
/// Use [`Self::new`] when both strategies are at hand, [`Self::builder`] to
/// assemble them piecemeal, or [`Self::named`] to pick the stock strategies by
/// name.
pub struct Strategies {
    revenue: Box<dyn RevenueStrategy>,
    bonus: Box<dyn BonusStrategy>,
    integrity: IntegrityPolicy,
}

impl Strategies {
    #[must_use]
    pub fn new(
        revenue: impl RevenueStrategy + 'static,
        bonus: impl BonusStrategy + 'static,
    ) -> Self {
        Self {
            revenue: Box::new(revenue),
            bonus: Box::new(bonus),
            integrity: IntegrityPolicy::default(),
        }
    }

    #[must_use]
    pub fn builder() -> StrategiesBuilder {
        StrategiesBuilder::default()
    }

    /// Looks up stock strategies by name.
    ///
    /// Revenue strategies: `discounted` (alias `simple`) and `gross`.
    /// Bonus strategies: `profit-tiers` (alias `profit`).
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidOptions`] if either name is unknown.
    pub fn named(revenue: &str, bonus: &str) -> Result<Self> {
        let revenue: Box<dyn RevenueStrategy> = match revenue {
            "discounted" | "simple" => Box::new(DiscountedRevenue),
            "gross" => Box::new(GrossRevenue),
            other => {
                return Err(ReportError::InvalidOptions(format!(
                    "unknown revenue strategy {other:?}"
                )))
            }
        };
        let bonus: Box<dyn BonusStrategy> = match bonus {
            "profit-tiers" | "profit" => Box::new(ProfitTierBonus),
            other => {
                return Err(ReportError::InvalidOptions(format!(
                    "unknown bonus strategy {other:?}"
                )))
            }
        };
        Ok(Self {
            revenue,
            bonus,
            integrity: IntegrityPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_integrity(mut self, integrity: IntegrityPolicy) -> Self {
        self.integrity = integrity;
        self
    }

    #[must_use]
    pub fn revenue(&self) -> &dyn RevenueStrategy {
        self.revenue.as_ref()
    }

    #[must_use]
    pub fn bonus(&self) -> &dyn BonusStrategy {
        self.bonus.as_ref()
    }

    #[must_use]
    pub fn integrity(&self) -> IntegrityPolicy {
        self.integrity
    }
}

/// Assembles [`Strategies`]; both strategies must be set before
/// [`Self::build`].
#[derive(Default)]
pub struct StrategiesBuilder {
    revenue: Option<Box<dyn RevenueStrategy>>,
    bonus: Option<Box<dyn BonusStrategy>>,
    integrity: IntegrityPolicy,
}

impl StrategiesBuilder {
    #[must_use]
    pub fn revenue(mut self, strategy: impl RevenueStrategy + 'static) -> Self {
        self.revenue = Some(Box::new(strategy));
        self
    }

    #[must_use]
    pub fn bonus(mut self, strategy: impl BonusStrategy + 'static) -> Self {
        self.bonus = Some(Box::new(strategy));
        self
    }

    #[must_use]
    pub fn integrity(mut self, integrity: IntegrityPolicy) -> Self {
        self.integrity = integrity;
        self
    }

    /// # Errors
    ///
    /// Returns [`ReportError::InvalidOptions`] if either strategy is missing.
    pub fn build(self) -> Result<Strategies> {
        let revenue = self
            .revenue
            .ok_or_else(|| ReportError::InvalidOptions("missing revenue strategy".into()))?;
        let bonus = self
            .bonus
            .ok_or_else(|| ReportError::InvalidOptions("missing bonus strategy".into()))?;
        Ok(Strategies {
            revenue,
            bonus,
            integrity: self.integrity,
        })
    }
}
