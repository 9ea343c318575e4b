//! Configuration types for statutory rate tables.
//!
//! This module contains the strongly-typed structures that are
//! deserialized from the year-versioned YAML rate files. Tables are
//! immutable after load; the year to apply is always passed explicitly by
//! the period being processed, never read from "today".

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Metadata about the statutory jurisdiction.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// The jurisdiction code (e.g., "SG").
    pub code: String,
    /// The human-readable name of the rule set.
    pub name: String,
    /// The version or effective date of the rule set.
    pub version: String,
    /// URL to the official documentation.
    pub source_url: String,
}

/// One age-banded CPF contribution rate row.
///
/// `age_max` is the inclusive upper bound of the band; the last row of a
/// table leaves it unset and is open-ended.
#[derive(Debug, Clone, Deserialize)]
pub struct CpfRateBand {
    /// Inclusive upper age bound, or open-ended when absent.
    #[serde(default)]
    pub age_max: Option<u32>,
    /// Employer contribution rate, percent of capped wages.
    pub employer_pct: Decimal,
    /// Employee contribution rate, percent of capped wages.
    pub employee_pct: Decimal,
}

/// CPF rate tables keyed by residency bucket.
///
/// Citizens and full-rate PRs resolve to `full`; new permanent residents
/// use the graduated first/second-year tables.
#[derive(Debug, Clone, Deserialize)]
pub struct CpfRateTables {
    /// Full rates (citizens, third-year-plus PRs, full-rate-agreed PRs).
    pub full: Vec<CpfRateBand>,
    /// Graduated rates for the first year of PR status.
    pub spr_year_one: Vec<CpfRateBand>,
    /// Graduated rates for the second year of PR status.
    pub spr_year_two: Vec<CpfRateBand>,
}

/// One age-banded CPF sub-account allocation row.
///
/// Ordinary and Special account percentages are explicit; the MediSave
/// share is the remainder, so the three always reconcile with the total.
#[derive(Debug, Clone, Deserialize)]
pub struct CpfAllocationBand {
    /// Inclusive upper age bound, or open-ended when absent.
    #[serde(default)]
    pub age_max: Option<u32>,
    /// Ordinary Account share, percent of the total contribution.
    pub ordinary_pct: Decimal,
    /// Special Account share, percent of the total contribution.
    pub special_pct: Decimal,
}

/// The complete CPF configuration for one calendar year.
#[derive(Debug, Clone, Deserialize)]
pub struct CpfConfig {
    /// Monthly ordinary-wage ceiling.
    pub monthly_ordinary_ceiling: Decimal,
    /// Annual salary ceiling across OW and AW.
    pub annual_salary_ceiling: Decimal,
    /// Contribution rate tables by residency bucket.
    pub rates: CpfRateTables,
    /// Sub-account allocation bands.
    pub allocations: Vec<CpfAllocationBand>,
}

impl CpfConfig {
    /// Returns the allocation band for an age, clamping to the last band
    /// when the age exceeds every defined bound.
    pub fn allocation_for(&self, age: u32) -> &CpfAllocationBand {
        band_for_age(&self.allocations, age, |band| band.age_max)
    }
}

/// Selects the first band whose upper bound covers `age`, falling back to
/// the final band. Rate tables must therefore never be empty.
pub(crate) fn band_for_age<T>(bands: &[T], age: u32, bound: impl Fn(&T) -> Option<u32>) -> &T {
    bands
        .iter()
        .find(|band| bound(band).is_none_or(|max| age <= max))
        .unwrap_or_else(|| bands.last().expect("rate table has at least one band"))
}

/// Skills Development Levy parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SdlConfig {
    /// Levy rate, percent of monthly wages.
    pub rate_pct: Decimal,
    /// Wages below this threshold pay the flat minimum.
    pub low_wage_threshold: Decimal,
    /// Minimum levy per employee per month.
    pub minimum: Decimal,
    /// Maximum levy per employee per month.
    pub maximum: Decimal,
}

/// One wage-bracket tier of a community-fund table.
///
/// `wage_max` is the inclusive upper wage bound; the last tier leaves it
/// unset and is open-ended. Amounts are flat dollar values, not rates.
#[derive(Debug, Clone, Deserialize)]
pub struct ShgTier {
    /// Inclusive upper wage bound, or open-ended when absent.
    #[serde(default)]
    pub wage_max: Option<Decimal>,
    /// Flat monthly deduction for this tier.
    pub amount: Decimal,
}

/// The four independent community self-help-group fund tables.
#[derive(Debug, Clone, Deserialize)]
pub struct ShgConfig {
    /// Chinese Development Assistance Council tiers.
    pub cdac: Vec<ShgTier>,
    /// Eurasian Community Fund tiers.
    pub ecf: Vec<ShgTier>,
    /// Mosque Building and Mendaki Fund tiers.
    pub mbmf: Vec<ShgTier>,
    /// Singapore Indian Development Association tiers.
    pub sinda: Vec<ShgTier>,
}

/// One progressive tax bracket row.
///
/// Rows are ordered by ascending `floor`; the row containing an income is
/// the last row whose floor does not exceed it.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket (chargeable income at which it starts).
    pub floor: Decimal,
    /// Cumulative tax payable at the bracket floor.
    pub cumulative: Decimal,
    /// Marginal rate within the bracket, percent.
    pub rate_pct: Decimal,
}

/// Income tax parameters for one year of assessment.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// Flat non-resident employment-income rate, percent.
    pub non_resident_flat_pct: Decimal,
    /// Resident progressive brackets, ordered by ascending floor.
    pub resident_brackets: Vec<TaxBracket>,
}

/// All statutory tables for one calendar year.
#[derive(Debug, Clone, Deserialize)]
pub struct StatutoryRates {
    /// The calendar year these tables take effect.
    pub year: i32,
    /// CPF contribution configuration.
    pub cpf: CpfConfig,
    /// SDL parameters.
    pub sdl: SdlConfig,
    /// Community-fund tier tables.
    pub shg: ShgConfig,
    /// Income tax brackets.
    pub tax: TaxConfig,
}

/// The complete, immutable book of statutory rate tables.
///
/// Built once at process start from the year-versioned YAML files; every
/// calculator call selects its tables by the period year explicitly.
#[derive(Debug, Clone)]
pub struct RateBook {
    metadata: JurisdictionMetadata,
    /// Rate tables sorted by ascending effective year.
    tables: Vec<StatutoryRates>,
}

impl RateBook {
    /// Creates a new RateBook from its component parts.
    pub fn new(metadata: JurisdictionMetadata, tables: Vec<StatutoryRates>) -> Self {
        let mut sorted = tables;
        sorted.sort_by_key(|t| t.year);
        Self {
            metadata,
            tables: sorted,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns the rate tables for a period year.
    ///
    /// Selects the newest tables effective on or before the requested
    /// year; a year earlier than every table is an error.
    pub fn for_year(&self, year: i32) -> EngineResult<&StatutoryRates> {
        self.tables
            .iter()
            .rfind(|t| t.year <= year)
            .ok_or(EngineError::RateTableNotFound { year })
    }

    /// Returns the effective years available, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.tables.iter().map(|t| t.year).collect()
    }
}
