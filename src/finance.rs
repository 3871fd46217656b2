//! Deterministic financial model
//!
//! Pure function over validated inputs. No I/O, no shared state, no error
//! path: the intake state machine only ever hands over a fully validated,
//! frozen [`FinancialInputs`], so every invalid combination is excluded
//! by construction.

use crate::models::{
    FinancialInputs, Location, ManagerType, PartnerId, PartnerShare, Report,
};

//
// ================= Partnership constants =================
//

/// One-time legal/documentation cost (AED).
pub const LEGAL_FEE: f64 = 8_000.0;
/// One-time furniture cost (AED).
pub const FURNITURE_FEE: f64 = 8_000.0;
/// Flat monthly operating expenses (AED).
pub const OPERATING_EXPENSES: f64 = 2_000.0;
/// Agency commission + deposit as a fraction of yearly rent.
pub const COMMISSION_RATE: f64 = 0.10;
/// Manager's cut of positive first-year true net profit.
pub const MANAGER_FEE_RATE: f64 = 0.15;

/// Fixed ownership fractions. A policy of the partnership, never derived
/// from input and never configurable per session.
pub const OWNERSHIP: [(PartnerId, f64); 5] = [
    (PartnerId::P1, 0.50),
    (PartnerId::P2, 0.125),
    (PartnerId::P3, 0.125),
    (PartnerId::P4, 0.125),
    (PartnerId::P5, 0.125),
];

/// Months of rent paid in advance at move-in, fixed by emirate.
pub fn upfront_months(location: Location) -> u32 {
    match location {
        Location::Dubai => 4,
        Location::Sharjah => 3,
    }
}

/// Compute the full partnership report.
///
/// Referentially transparent: identical inputs always produce
/// bit-identical output.
pub fn compute(inputs: &FinancialInputs) -> Report {
    // Initial cost breakdown
    let monthly_rent = inputs.yearly_rent / 12.0;
    let upfront_months = upfront_months(inputs.location);
    let upfront_payment = monthly_rent * upfront_months as f64;
    let commission_deposit = COMMISSION_RATE * inputs.yearly_rent;
    let total_initial_cost = upfront_payment + commission_deposit + LEGAL_FEE + FURNITURE_FEE;

    // Income & expenses
    let total_bed_units = inputs.capacity.total_bed_units();
    let monthly_income = inputs.bed_price * total_bed_units as f64;
    let total_monthly_expenses = OPERATING_EXPENSES + monthly_rent;
    let net_monthly_profit = monthly_income - total_monthly_expenses;
    let net_profit_first_ten_months = net_monthly_profit * 10.0;
    let true_net_profit_year1 = net_profit_first_ten_months - total_initial_cost;

    // Manager fee only applies to a positive first-year profit
    let manager_fee = if true_net_profit_year1 > 0.0 {
        MANAGER_FEE_RATE * true_net_profit_year1
    } else {
        0.0
    };
    let remaining_after_manager_fee = true_net_profit_year1 - manager_fee;

    let manager_partner = match inputs.manager_type {
        ManagerType::MajorityPartner => PartnerId::P1,
        ManagerType::StandardPartner => PartnerId::P2,
    };

    // Distribute the remainder by ownership, manager fee on top for the
    // managing partner
    let partners = OWNERSHIP
        .iter()
        .map(|&(id, fraction)| {
            let is_manager = id == manager_partner;
            let mut yearly_profit = remaining_after_manager_fee * fraction;
            if is_manager {
                yearly_profit += manager_fee;
            }

            let initial_investment = total_initial_cost * fraction;
            let roi_pct = if initial_investment == 0.0 {
                0.0
            } else {
                yearly_profit / initial_investment * 100.0
            };

            PartnerShare {
                id,
                ownership_pct: fraction * 100.0,
                initial_investment,
                yearly_profit,
                monthly_profit: yearly_profit / 12.0,
                roi_pct,
                is_manager,
            }
        })
        .collect();

    Report {
        location: inputs.location,
        yearly_rent: inputs.yearly_rent,
        monthly_rent,
        upfront_months,
        upfront_payment,
        commission_deposit,
        legal_fee: LEGAL_FEE,
        furniture_fee: FURNITURE_FEE,
        total_initial_cost,
        total_bed_units,
        monthly_income,
        operating_expenses: OPERATING_EXPENSES,
        total_monthly_expenses,
        net_monthly_profit,
        net_profit_first_ten_months,
        true_net_profit_year1,
        manager_fee,
        remaining_after_manager_fee,
        manager_partner,
        partners,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CapacitySpec;

    const TOLERANCE: f64 = 1e-6;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.01,
            "expected {expected}, got {actual}"
        );
    }

    fn fixed_inputs(
        location: Location,
        yearly_rent: f64,
        bed_price: f64,
        manager_type: ManagerType,
    ) -> FinancialInputs {
        FinancialInputs {
            location,
            capacity: CapacitySpec::FixedUnits,
            yearly_rent,
            bed_price,
            manager_type,
        }
    }

    #[test]
    fn test_dubai_fixed_capacity_scenario() {
        let inputs = fixed_inputs(Location::Dubai, 85_000.0, 1_000.0, ManagerType::MajorityPartner);
        let report = compute(&inputs);

        assert_close(report.monthly_rent, 7_083.33);
        assert_eq!(report.upfront_months, 4);
        assert_close(report.upfront_payment, 28_333.33);
        assert_close(report.commission_deposit, 8_500.0);
        assert_close(report.total_initial_cost, 52_833.33);
        assert_eq!(report.total_bed_units, 12);
        assert_close(report.monthly_income, 12_000.0);
        assert_close(report.total_monthly_expenses, 9_083.33);
        assert_close(report.net_monthly_profit, 2_916.67);
        assert_close(report.net_profit_first_ten_months, 29_166.67);
        assert_close(report.true_net_profit_year1, -23_666.67);

        // A losing year never charges a manager fee
        assert_eq!(report.manager_fee, 0.0);
        assert_close(report.remaining_after_manager_fee, -23_666.67);
        assert_eq!(report.manager_partner, PartnerId::P1);
    }

    #[test]
    fn test_sharjah_upfront_months() {
        let inputs = fixed_inputs(Location::Sharjah, 60_000.0, 1_000.0, ManagerType::MajorityPartner);
        let report = compute(&inputs);

        assert_eq!(report.upfront_months, 3);
        assert_close(report.upfront_payment, 15_000.0);
    }

    #[test]
    fn test_rooms_and_hall_capacity_drives_income() {
        let inputs = FinancialInputs {
            location: Location::Dubai,
            capacity: CapacitySpec::RoomsAndHall {
                rooms: vec![
                    crate::models::RoomRecord { beds: 2, doubles: 1 },
                    crate::models::RoomRecord { beds: 1, doubles: 0 },
                ],
                hall: crate::models::RoomRecord { beds: 1, doubles: 1 },
            },
            yearly_rent: 85_000.0,
            bed_price: 1_000.0,
            manager_type: ManagerType::MajorityPartner,
        };
        let report = compute(&inputs);

        assert_eq!(report.total_bed_units, 6);
        assert_close(report.monthly_income, 6_000.0);
    }

    #[test]
    fn test_standard_partner_manager_fee_distribution() {
        // Reverse-engineer a bed price that yields exactly 100000 true
        // net profit: with zero rent, bed price x and 12 units,
        // true = (12x - 2000) * 10 - 16000, so x = 13600 / 12.
        let inputs = fixed_inputs(Location::Dubai, 0.0, 13_600.0 / 12.0, ManagerType::StandardPartner);
        let report = compute(&inputs);

        assert_close(report.true_net_profit_year1, 100_000.0);
        assert_close(report.manager_fee, 15_000.0);
        assert_close(report.remaining_after_manager_fee, 85_000.0);
        assert_eq!(report.manager_partner, PartnerId::P2);

        let p1 = report.partner(PartnerId::P1).unwrap();
        let p2 = report.partner(PartnerId::P2).unwrap();
        assert_close(p1.yearly_profit, 42_500.0);
        assert!(!p1.is_manager);
        assert_close(p2.yearly_profit, 25_625.0);
        assert!(p2.is_manager);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let inputs = fixed_inputs(Location::Dubai, 85_000.0, 1_000.0, ManagerType::MajorityPartner);
        let a = compute(&inputs);
        let b = compute(&inputs);
        assert_eq!(a, b);
    }

    #[test]
    fn test_partners_reported_in_canonical_order() {
        let inputs = fixed_inputs(Location::Dubai, 85_000.0, 1_000.0, ManagerType::MajorityPartner);
        let report = compute(&inputs);

        let ids: Vec<PartnerId> = report.partners.iter().map(|p| p.id).collect();
        assert_eq!(ids, PartnerId::ALL);
    }

    #[test]
    fn test_ownership_sums_to_exactly_100() {
        let inputs = fixed_inputs(Location::Sharjah, 42_000.0, 950.0, ManagerType::StandardPartner);
        let report = compute(&inputs);

        let total: f64 = report.partners.iter().map(|p| p.ownership_pct).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_investments_sum_to_total_initial_cost() {
        let inputs = fixed_inputs(Location::Dubai, 85_000.0, 1_000.0, ManagerType::MajorityPartner);
        let report = compute(&inputs);

        let total: f64 = report.partners.iter().map(|p| p.initial_investment).sum();
        assert!((total - report.total_initial_cost).abs() < TOLERANCE);
    }

    #[test]
    fn test_distributed_profit_is_conserved() {
        for manager_type in [ManagerType::MajorityPartner, ManagerType::StandardPartner] {
            let inputs = fixed_inputs(Location::Sharjah, 30_000.0, 2_500.0, manager_type);
            let report = compute(&inputs);

            let distributed: f64 = report.partners.iter().map(|p| p.yearly_profit).sum();
            let expected = report.remaining_after_manager_fee + report.manager_fee;
            assert!((distributed - expected).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_negative_profit_never_charges_manager_fee() {
        let inputs = fixed_inputs(Location::Dubai, 200_000.0, 100.0, ManagerType::StandardPartner);
        let report = compute(&inputs);

        assert!(report.true_net_profit_year1 < 0.0);
        assert_eq!(report.manager_fee, 0.0);
        assert_eq!(
            report.remaining_after_manager_fee,
            report.true_net_profit_year1
        );
    }
}
