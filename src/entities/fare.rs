use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::entities::{Category, RouteMetrics};
use crate::error::{config_error, invalid_category_error, invalid_input_error, Error};

/// Pricing parameters of a single ride tier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareRule {
    #[serde(with = "rust_decimal::serde::float")]
    pub base: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub per_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub per_min: Decimal,
}

impl FareRule {
    pub fn new(base: Decimal, per_km: Decimal, per_min: Decimal) -> Self {
        Self {
            base,
            per_km,
            per_min,
        }
    }

    /// Unrounded linear price, `None` when the decimal range overflows.
    pub fn price(&self, metrics: &RouteMetrics) -> Option<Decimal> {
        let distance = self.per_km.checked_mul(metrics.distance_km)?;
        let duration = self.per_min.checked_mul(metrics.duration_min)?;

        self.base.checked_add(distance)?.checked_add(duration)
    }

    fn is_valid(&self) -> bool {
        !(self.base.is_sign_negative() || self.per_km.is_sign_negative() || self.per_min.is_sign_negative())
    }
}

/// The complete pricing configuration: one rule per category and the
/// floor applied to every fare. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareTable {
    #[serde(with = "rust_decimal::serde::float")]
    minimum_fare: Decimal,
    rules: BTreeMap<Category, FareRule>,
}

impl FareTable {
    pub fn new(rules: BTreeMap<Category, FareRule>, minimum_fare: Decimal) -> Result<Self, Error> {
        if minimum_fare.is_sign_negative() {
            return Err(config_error("minimum fare must not be negative"));
        }

        for category in Category::ALL {
            match rules.get(&category) {
                Some(rule) if rule.is_valid() => {}
                Some(_) => {
                    return Err(config_error(format!(
                        "fare rule for {} has a negative component",
                        category
                    )))
                }
                None => return Err(config_error(format!("no fare rule for {}", category))),
            }
        }

        Ok(Self {
            minimum_fare: round_money(minimum_fare),
            rules,
        })
    }

    /// Reference pricing.
    pub fn standard() -> Self {
        let rules = BTreeMap::from([
            (
                Category::Economy,
                FareRule::new(Decimal::new(30, 1), Decimal::new(9, 1), Decimal::new(2, 1)),
            ),
            (
                Category::Premium,
                FareRule::new(Decimal::new(50, 1), Decimal::new(14, 1), Decimal::new(35, 2)),
            ),
            (
                Category::Xl,
                FareRule::new(Decimal::new(65, 1), Decimal::new(18, 1), Decimal::new(45, 2)),
            ),
        ]);

        Self {
            minimum_fare: Decimal::new(300, 2),
            rules,
        }
    }

    /// Parses and validates a table from its JSON form.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let table: FareTable = serde_json::from_str(raw)
            .map_err(|err| config_error(format!("invalid fare table: {}", err)))?;

        Self::new(table.rules, table.minimum_fare)
    }

    pub fn minimum_fare(&self) -> Decimal {
        self.minimum_fare
    }

    pub fn rules(&self) -> &BTreeMap<Category, FareRule> {
        &self.rules
    }

    pub fn rule(&self, category: Category) -> Result<&FareRule, Error> {
        self.rules.get(&category).ok_or_else(invalid_category_error)
    }

    /// `max(minimum_fare, round(base + per_km * km + per_min * min, 2))`.
    ///
    /// Negative metrics are priced as given; rejecting them is up to the
    /// caller.
    pub fn compute_fare(&self, category: Category, metrics: &RouteMetrics) -> Result<Decimal, Error> {
        let rule = self.rule(category)?;
        let raw = rule
            .price(metrics)
            .ok_or_else(|| invalid_input_error("route metrics"))?;

        Ok(round_money(raw).max(self.minimum_fare))
    }
}

impl Default for FareTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Two decimal places, midpoint away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A fare computed for display. Never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareQuote {
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub distance_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub duration_min: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fare: Decimal,
}
