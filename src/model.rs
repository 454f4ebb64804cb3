use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use std::{fs::File, io::BufReader, io::Read, path::Path};

use crate::error::{ReportError, Result};

/// A seller, identified by a unique `id`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Seller {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Seller {
    /// Returns the name shown in reports: first name, then last name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A catalog entry, identified by a unique `sku`.
///
/// `cost` is the cost basis per unit. Datasets that call it `purchase_price`
/// are accepted too, and a missing cost counts as zero.
#[serde_as]
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Product {
    pub sku: String,
    #[serde(alias = "purchase_price", default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One product sold within a purchase record.
///
/// Numeric fields may be given either as numbers or as numeric strings.
#[serde_as]
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LineItem {
    pub sku: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub quantity: u32,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub sale_price: f64,
    /// Discount as a percentage, from 0 to 100.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub discount: f64,
}

/// A single transaction, attributed to one seller.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PurchaseRecord {
    pub seller_id: String,
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

/// The three input collections a report is built from.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SalesData {
    pub sellers: Vec<Seller>,
    pub products: Vec<Product>,
    pub purchase_records: Vec<PurchaseRecord>,
}

impl SalesData {
    /// Parses a JSON dataset from `rdr`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidInput`] if the data is not valid JSON, or
    /// if any of the three top-level collections is missing or has the wrong
    /// shape.
    pub fn from_reader(rdr: impl Read) -> Result<Self> {
        serde_json::from_reader(rdr)
            .map_err(|e| ReportError::InvalidInput(format!("malformed sales data: {e}")))
    }

    /// Reads a JSON dataset from the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns any errors from opening the file, or from [`Self::from_reader`].
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let data = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(data)
    }
}
