#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::models::{AccountType, DividendForecast, Transaction};
    use crate::portfolio::aggregate_holdings;

    fn tx(
        id: i64,
        ticker: &str,
        shares: Decimal,
        price: Decimal,
        date: Option<&str>,
        account_type: AccountType,
    ) -> Transaction {
        Transaction::new(
            id,
            1,
            ticker.to_string(),
            shares,
            price,
            date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            account_type,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    fn no_dividend(_: &str) -> Option<DividendForecast> {
        None
    }

    #[test]
    fn buys_and_partial_sell_keep_average_cost() {
        let transactions = vec![
            tx(1, "7203", dec!(100), dec!(1000), Some("2024-01-01"), AccountType::General),
            tx(2, "7203", dec!(100), dec!(1200), Some("2024-02-01"), AccountType::General),
            tx(3, "7203", dec!(-50), dec!(1500), Some("2024-03-01"), AccountType::General),
        ];

        let holdings = aggregate_holdings(transactions, no_dividend);

        assert_eq!(holdings.len(), 1);
        let holding = &holdings[0];
        assert_eq!(*holding.total_shares(), dec!(150));
        assert_eq!(*holding.average_price(), dec!(1100));
        assert_eq!(*holding.total_invested(), dec!(165000));
    }

    #[test]
    fn equal_quantity_buys_average_to_the_mean() {
        let transactions = vec![
            tx(1, "9432", dec!(40), dec!(140), Some("2024-01-10"), AccountType::General),
            tx(2, "9432", dec!(40), dec!(180), Some("2024-02-10"), AccountType::General),
        ];

        let holdings = aggregate_holdings(transactions, no_dividend);

        assert_eq!(*holdings[0].average_price(), dec!(160));
    }

    #[test]
    fn oversell_clamps_holding_away() {
        let transactions = vec![
            tx(1, "8306", dec!(100), dec!(1500), Some("2024-01-01"), AccountType::General),
            tx(2, "8306", dec!(-150), dec!(1600), Some("2024-02-01"), AccountType::General),
        ];

        let holdings = aggregate_holdings(transactions, no_dividend);

        assert!(holdings.is_empty());
    }

    #[test]
    fn buy_after_oversell_starts_from_clean_state() {
        let transactions = vec![
            tx(1, "8306", dec!(100), dec!(500), Some("2024-01-01"), AccountType::General),
            tx(2, "8306", dec!(-150), dec!(600), Some("2024-02-01"), AccountType::General),
            tx(3, "8306", dec!(30), dec!(700), Some("2024-03-01"), AccountType::General),
        ];

        let holdings = aggregate_holdings(transactions, no_dividend);

        assert_eq!(holdings.len(), 1);
        assert_eq!(*holdings[0].total_shares(), dec!(30));
        assert_eq!(*holdings[0].average_price(), dec!(700));
        assert_eq!(*holdings[0].total_invested(), dec!(21000));
    }

    #[test]
    fn full_exit_then_rebuy_resets_cost_basis() {
        let transactions = vec![
            tx(1, "6758", dec!(100), dec!(1000), Some("2024-01-01"), AccountType::General),
            tx(2, "6758", dec!(-100), dec!(1200), Some("2024-02-01"), AccountType::General),
            tx(3, "6758", dec!(50), dec!(800), Some("2024-03-01"), AccountType::General),
        ];

        let holdings = aggregate_holdings(transactions, no_dividend);

        assert_eq!(holdings.len(), 1);
        assert_eq!(*holdings[0].average_price(), dec!(800));
        assert_eq!(*holdings[0].total_invested(), dec!(40000));
    }

    #[test]
    fn zero_share_entry_is_vacuous() {
        let transactions = vec![
            tx(1, "7203", dec!(100), dec!(1000), Some("2024-01-01"), AccountType::General),
            tx(2, "7203", dec!(0), dec!(9999), Some("2024-01-15"), AccountType::General),
        ];

        let holdings = aggregate_holdings(transactions, no_dividend);

        assert_eq!(*holdings[0].total_shares(), dec!(100));
        assert_eq!(*holdings[0].average_price(), dec!(1000));
    }

    #[test]
    fn undated_transactions_fold_first() {
        // The undated buy must fold before the dated sell, so the dated
        // rebuy starts from a clean basis.
        let transactions = vec![
            tx(1, "4063", dec!(-100), dec!(1500), Some("2024-01-02"), AccountType::General),
            tx(2, "4063", dec!(100), dec!(1000), None, AccountType::General),
            tx(3, "4063", dec!(50), dec!(2000), Some("2024-01-05"), AccountType::General),
        ];

        let holdings = aggregate_holdings(transactions, no_dividend);

        assert_eq!(holdings.len(), 1);
        assert_eq!(*holdings[0].total_shares(), dec!(50));
        assert_eq!(*holdings[0].average_price(), dec!(2000));
    }

    #[test]
    fn nisa_and_general_positions_stay_separate() {
        let transactions = vec![
            tx(1, "7203", dec!(100), dec!(1000), Some("2024-01-01"), AccountType::General),
            tx(2, "7203", dec!(100), dec!(1000), Some("2024-01-01"), AccountType::Nisa),
        ];

        let holdings = aggregate_holdings(transactions, no_dividend);

        assert_eq!(holdings.len(), 2);
        assert_eq!(*holdings[0].account_type(), AccountType::General);
        assert_eq!(*holdings[1].account_type(), AccountType::Nisa);
    }

    #[test]
    fn dividend_tax_applies_to_general_only() {
        let forecast = |ticker: &str| {
            Some(DividendForecast::new(
                ticker.to_string(),
                Some("トヨタ自動車".to_string()),
                dec!(20),
                Some(3),
                Some(6),
            ))
        };

        let general = aggregate_holdings(
            vec![tx(1, "7203", dec!(150), dec!(1100), Some("2024-01-01"), AccountType::General)],
            forecast,
        );
        assert_eq!(*general[0].projected_dividend(), dec!(3000));
        assert_eq!(*general[0].net_dividend(), dec!(2390.55));

        let nisa = aggregate_holdings(
            vec![tx(1, "7203", dec!(150), dec!(1100), Some("2024-01-01"), AccountType::Nisa)],
            forecast,
        );
        assert_eq!(*nisa[0].projected_dividend(), dec!(3000));
        assert_eq!(*nisa[0].net_dividend(), dec!(3000));
    }

    #[test]
    fn lookup_miss_degrades_to_zero_dividend() {
        let holdings = aggregate_holdings(
            vec![tx(1, "2802", dec!(10), dec!(5000), Some("2024-01-01"), AccountType::General)],
            no_dividend,
        );

        let holding = &holdings[0];
        assert_eq!(*holding.dividend_per_share(), Decimal::ZERO);
        assert_eq!(*holding.projected_dividend(), Decimal::ZERO);
        assert_eq!(*holding.net_dividend(), Decimal::ZERO);
        assert_eq!(*holding.rights_month(), None);
        assert_eq!(*holding.payment_month(), None);
    }
}
