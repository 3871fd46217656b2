//! Core data models for the apartment partnership calculator

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Arabic,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Dubai,
    Sharjah,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ManagerType {
    /// The 50% partner (P1) runs the apartment.
    MajorityPartner,
    /// A regular 12.5% partner (P2) runs it.
    StandardPartner,
}

/// The five fixed partners of the partnership.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PartnerId {
    P1,
    P2,
    P3,
    P4,
    P5,
}

impl PartnerId {
    pub const ALL: [PartnerId; 5] = [
        PartnerId::P1,
        PartnerId::P2,
        PartnerId::P3,
        PartnerId::P4,
        PartnerId::P5,
    ];
}

//
// ================= Intake inputs =================
//

/// One room (or the hall) as reported by the user.
///
/// Invariant: `doubles <= beds`. `beds = 0` is allowed and contributes
/// nothing to capacity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomRecord {
    pub beds: u32,
    pub doubles: u32,
}

impl RoomRecord {
    /// Capacity in bed-units: a double bed counts as 2 units.
    pub fn bed_units(&self) -> u32 {
        self.beds + self.doubles
    }
}

/// How the apartment's bed capacity is determined.
///
/// This is the one extension point between the two intake flow variants:
/// the simple flow assumes a fixed 12-bed setup, the detailed flow walks
/// the user through every room plus the hall.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum CapacitySpec {
    FixedUnits,
    RoomsAndHall {
        rooms: Vec<RoomRecord>,
        hall: RoomRecord,
    },
}

/// Bed-unit count for the fixed-capacity flow.
pub const FIXED_BED_UNITS: u32 = 12;

impl CapacitySpec {
    /// Total reported single beds (doubles counted once).
    pub fn reported_beds(&self) -> u32 {
        match self {
            CapacitySpec::FixedUnits => FIXED_BED_UNITS,
            CapacitySpec::RoomsAndHall { rooms, hall } => {
                rooms.iter().map(|r| r.beds).sum::<u32>() + hall.beds
            }
        }
    }

    /// Total double beds across rooms and hall.
    pub fn double_count(&self) -> u32 {
        match self {
            CapacitySpec::FixedUnits => 0,
            CapacitySpec::RoomsAndHall { rooms, hall } => {
                rooms.iter().map(|r| r.doubles).sum::<u32>() + hall.doubles
            }
        }
    }

    /// Income-bearing capacity: singles + one extra unit per double.
    pub fn total_bed_units(&self) -> u32 {
        match self {
            CapacitySpec::FixedUnits => FIXED_BED_UNITS,
            CapacitySpec::RoomsAndHall { .. } => self.reported_beds() + self.double_count(),
        }
    }
}

/// Fully validated intake answers, frozen once the flow completes.
///
/// Constructed only by the intake state machine, so by the time
/// [`crate::finance::compute`] sees one of these, every invariant
/// (non-negative amounts, doubles <= beds) already holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialInputs {
    pub location: Location,
    pub capacity: CapacitySpec,
    pub yearly_rent: f64,
    pub bed_price: f64,
    pub manager_type: ManagerType,
}

//
// ================= Report =================
//

/// One partner's slice of the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartnerShare {
    pub id: PartnerId,
    pub ownership_pct: f64,
    pub initial_investment: f64,
    pub yearly_profit: f64,
    pub monthly_profit: f64,
    pub roi_pct: f64,
    pub is_manager: bool,
}

/// Complete output of the financial model.
///
/// All monetary fields are full-precision reals; rounding to two decimals
/// is the presenter's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub location: Location,
    pub yearly_rent: f64,

    // Initial cost breakdown
    pub monthly_rent: f64,
    pub upfront_months: u32,
    pub upfront_payment: f64,
    pub commission_deposit: f64,
    pub legal_fee: f64,
    pub furniture_fee: f64,
    pub total_initial_cost: f64,

    // Income & expenses
    pub total_bed_units: u32,
    pub monthly_income: f64,
    pub operating_expenses: f64,
    pub total_monthly_expenses: f64,
    pub net_monthly_profit: f64,
    pub net_profit_first_ten_months: f64,
    pub true_net_profit_year1: f64,

    // Manager block
    pub manager_fee: f64,
    pub remaining_after_manager_fee: f64,
    pub manager_partner: PartnerId,

    pub partners: Vec<PartnerShare>,
}

impl Report {
    pub fn partner(&self, id: PartnerId) -> Option<&PartnerShare> {
        self.partners.iter().find(|p| p.id == id)
    }
}

//
// ================= Display =================
//

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PartnerId::P1 => "P1",
            PartnerId::P2 => "P2",
            PartnerId::P3 => "P3",
            PartnerId::P4 => "P4",
            PartnerId::P5 => "P5",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Location::Dubai => "Dubai",
            Location::Sharjah => "Sharjah",
        };
        write!(f, "{}", s)
    }
}
