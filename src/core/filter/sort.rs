//! Sort specification for the meter list

use crate::domain::MeterRecord;
use icu_collator::{Collator, CollatorOptions};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Column the list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    Name,
    Address,
    Region,
    #[default]
    Rating,
    LastConsumption,
    Tariff,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Address => "address",
            SortKey::Region => "region",
            SortKey::Rating => "rating",
            SortKey::LastConsumption => "last_consumption",
            SortKey::Tariff => "tariff",
        }
    }

    /// Ascending comparison of two records on this key
    ///
    /// Missing values compare as the key's zero/empty value.
    pub fn compare(self, a: &MeterRecord, b: &MeterRecord) -> Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Rating => a.effective_rating().cmp(&b.effective_rating()),
            SortKey::Name => collate(a.name().unwrap_or(""), b.name().unwrap_or("")),
            SortKey::Address => collate(
                a.address.as_deref().unwrap_or(""),
                b.address.as_deref().unwrap_or(""),
            ),
            SortKey::Region => collate(
                a.region.as_deref().unwrap_or(""),
                b.region.as_deref().unwrap_or(""),
            ),
            SortKey::Tariff => collate(
                a.details.tariff_type_name.as_deref().unwrap_or(""),
                b.details.tariff_type_name.as_deref().unwrap_or(""),
            ),
            SortKey::LastConsumption => a
                .last_consumption
                .unwrap_or(0.0)
                .total_cmp(&b.last_consumption.unwrap_or(0.0)),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "address" => Ok(SortKey::Address),
            "region" => Ok(SortKey::Region),
            "rating" => Ok(SortKey::Rating),
            "last_consumption" | "consumption" => Ok(SortKey::LastConsumption),
            "tariff" => Ok(SortKey::Tariff),
            other => Err(format!(
                "Invalid sort key '{other}'. Must be one of: id, name, address, region, rating, last_consumption, tariff"
            )),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascend" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descend" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!(
                "Invalid sort direction '{other}'. Must be 'asc' or 'desc'"
            )),
        }
    }
}

/// Key plus direction; defaults to rating ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn descending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    /// Comparison honouring the direction
    pub fn compare(&self, a: &MeterRecord, b: &MeterRecord) -> Ordering {
        let ord = self.key.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Parses `key` or `key:asc|desc`
impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = match s.split_once(':') {
            Some((key, dir)) => (key.parse()?, dir.parse()?),
            None => (s.parse()?, SortDirection::Ascending),
        };
        Ok(Self { key, direction })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        write!(f, "{}:{}", self.key.as_str(), dir)
    }
}

thread_local! {
    static COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new())
            .map_err(|e| {
                tracing::warn!(error = %e, "Unicode collation unavailable, comparing case-folded text");
            })
            .ok();
}

/// Unicode (CLDR root) string ordering with a byte-wise tie break
///
/// Accented letters sort next to their base letter (`É` with `E`, `Ё` with
/// `Е`), Latin before Cyrillic, lowercase before uppercase on otherwise equal
/// text. The tie break keeps the order total for strings the collator treats
/// as equal.
pub fn collate(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        })
        .then_with(|| a.cmp(b))
}
