//! Cash-shortfall waterfall
//!
//! When a month's inflows do not cover expenses, funding is drawn from the
//! nearest liquid source first: cash, then bonds, then stocks, then a single
//! forced property sale. Anything still uncovered leaves cash negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::InvestmentProperty;

/// The last funding source needed to cover a month's expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundingTier {
    /// Inflows covered expenses; the surplus stays in cash
    Cash,
    /// Bonds absorbed the shortfall
    Bonds,
    /// Bonds were drained and stocks absorbed the rest
    Stocks,
    /// One property was sold
    PropertySale,
    /// Every source was exhausted and cash went negative
    Insolvent,
}

/// Balances after covering a month's expenses
#[derive(Debug, Clone, PartialEq)]
pub struct Funding {
    pub tier: FundingTier,
    pub cash: Decimal,
    pub bonds: Decimal,
    pub stocks: Decimal,
    /// Properties still held
    pub properties: Vec<InvestmentProperty>,
    /// The property sold this month, if any
    pub sold: Option<InvestmentProperty>,
}

/// Cover `expenses` from `available_cash`, then bonds, stocks and at most one
/// property sale, in that order.
///
/// The property sold is the one with the lowest net cash value; on ties the
/// first in list order goes. Only one property is ever sold per call even if
/// that leaves part of the shortfall uncovered.
pub fn cover_expenses(
    available_cash: Decimal,
    expenses: Decimal,
    bonds: Decimal,
    stocks: Decimal,
    mut properties: Vec<InvestmentProperty>,
) -> Funding {
    if available_cash > expenses {
        return Funding {
            tier: FundingTier::Cash,
            cash: available_cash - expenses,
            bonds,
            stocks,
            properties,
            sold: None,
        };
    }

    if available_cash + bonds > expenses {
        return Funding {
            tier: FundingTier::Bonds,
            cash: Decimal::ZERO,
            bonds: bonds - (expenses - available_cash),
            stocks,
            properties,
            sold: None,
        };
    }

    if available_cash + bonds + stocks > expenses {
        return Funding {
            tier: FundingTier::Stocks,
            cash: Decimal::ZERO,
            bonds: Decimal::ZERO,
            stocks: stocks - (expenses - available_cash - bonds),
            properties,
            sold: None,
        };
    }

    let shortfall = expenses - available_cash - bonds - stocks;
    let property_value: Decimal = properties
        .iter()
        .map(InvestmentProperty::net_cash_value)
        .sum();

    if available_cash + bonds + stocks + property_value > expenses
        && let Some(index) = cheapest_property(&properties)
    {
        let sold = properties.remove(index);
        return Funding {
            tier: FundingTier::PropertySale,
            cash: sold.net_cash_value() - shortfall,
            bonds: Decimal::ZERO,
            stocks: Decimal::ZERO,
            properties,
            sold: Some(sold),
        };
    }

    Funding {
        tier: FundingTier::Insolvent,
        cash: -shortfall,
        bonds: Decimal::ZERO,
        stocks: Decimal::ZERO,
        properties,
        sold: None,
    }
}

/// Index of the property with the lowest net cash value.
fn cheapest_property(properties: &[InvestmentProperty]) -> Option<usize> {
    properties
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| p.net_cash_value())
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn owned(value: Decimal) -> InvestmentProperty {
        InvestmentProperty::unencumbered(value, Decimal::ZERO)
    }

    #[test]
    fn test_surplus_stays_in_cash() {
        let f = cover_expenses(dec!(12000), dec!(11000), dec!(5), dec!(7), vec![]);
        assert_eq!(f.tier, FundingTier::Cash);
        assert_eq!(f.cash, dec!(1000));
        assert_eq!(f.bonds, dec!(5));
        assert_eq!(f.stocks, dec!(7));
    }

    #[test]
    fn test_exact_cover_falls_through_to_bonds() {
        // Strict comparison: equal inflows and expenses draw on the next tier
        let f = cover_expenses(dec!(11000), dec!(11000), dec!(100), dec!(0), vec![]);
        assert_eq!(f.tier, FundingTier::Bonds);
        assert_eq!(f.cash, Decimal::ZERO);
        assert_eq!(f.bonds, dec!(100));
    }

    #[test]
    fn test_bonds_drained_before_stocks() {
        let f = cover_expenses(dec!(10000), dec!(21000), dec!(10000), dec!(10000), vec![]);
        assert_eq!(f.tier, FundingTier::Stocks);
        assert_eq!(f.bonds, Decimal::ZERO);
        assert_eq!(f.stocks, dec!(9000));
        assert_eq!(f.cash, Decimal::ZERO);
    }

    #[test]
    fn test_sells_lowest_net_value_property() {
        let props = vec![owned(dec!(300000)), owned(dec!(90000)), owned(dec!(150000))];
        let f = cover_expenses(dec!(1000), dec!(5000), dec!(500), dec!(500), props);

        assert_eq!(f.tier, FundingTier::PropertySale);
        assert_eq!(f.sold.as_ref().unwrap().market_value, dec!(90000));
        assert_eq!(f.properties.len(), 2);
        assert_eq!(f.properties[0].market_value, dec!(300000));
        assert_eq!(f.properties[1].market_value, dec!(150000));
        assert_eq!(f.cash, dec!(87000));
        assert_eq!(f.stocks, Decimal::ZERO);
        assert_eq!(f.bonds, Decimal::ZERO);
    }

    #[test]
    fn test_tie_sells_first_in_order() {
        let mut first = owned(dec!(50000));
        first.monthly_income = dec!(1);
        let props = vec![first, owned(dec!(50000))];
        let f = cover_expenses(Decimal::ZERO, dec!(100), Decimal::ZERO, Decimal::ZERO, props);
        assert_eq!(f.sold.unwrap().monthly_income, dec!(1));
    }

    #[test]
    fn test_single_sale_may_leave_cash_negative() {
        // Two properties are needed but only one is sold
        let props = vec![owned(dec!(3000)), owned(dec!(4000))];
        let f = cover_expenses(Decimal::ZERO, dec!(5000), Decimal::ZERO, Decimal::ZERO, props);
        assert_eq!(f.tier, FundingTier::PropertySale);
        assert_eq!(f.cash, dec!(-2000));
        assert_eq!(f.properties.len(), 1);
    }

    #[test]
    fn test_insolvent_goes_negative() {
        let f = cover_expenses(dec!(10000), dec!(11000), Decimal::ZERO, Decimal::ZERO, vec![]);
        assert_eq!(f.tier, FundingTier::Insolvent);
        assert_eq!(f.cash, dec!(-1000));
    }

    #[test]
    fn test_underwater_properties_do_not_fund() {
        let underwater =
            InvestmentProperty::new(dec!(100000), dec!(0), dec!(150000), dec!(5), 200, dec!(0));
        let f = cover_expenses(dec!(10), dec!(110), dec!(0), dec!(0), vec![underwater]);
        assert_eq!(f.tier, FundingTier::Insolvent);
        assert_eq!(f.cash, dec!(-100));
        assert_eq!(f.properties.len(), 1);
    }
}
