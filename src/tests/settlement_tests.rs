use super::{balances, expense, members, payment};
use crate::core::balance_calculator::BalanceCalculator;
use crate::core::errors::LedgerError;
use crate::core::models::{Money, SuggestedTransaction, TransactionKind};
use crate::core::settlement_optimizer::SettlementOptimizer;
use chrono::Utc;

fn suggestion(debtor: &str, creditor: &str, minor: i64) -> SuggestedTransaction {
    SuggestedTransaction {
        debtor_id: debtor.to_string(),
        creditor_id: creditor.to_string(),
        payment: Money::from_minor(minor),
    }
}

#[test]
fn test_single_creditor_absorbs_all_debts() {
    let roster = members(&["a", "b", "c"]);
    let expenses = vec![expense("e1", "a", Money::from_major(300), &[])];
    let computed = BalanceCalculator::default().calculate(&roster, &expenses, &[]).unwrap();
    assert_eq!(computed, balances(&[("a", 20000), ("b", -10000), ("c", -10000)]));

    let plan = SettlementOptimizer::default().optimize(&computed).unwrap();

    assert_eq!(plan, vec![suggestion("b", "a", 10000), suggestion("c", "a", 10000)]);
}

#[test]
fn test_two_debtors_one_creditor() {
    let input = balances(&[("a", -5000), ("b", -3000), ("c", 8000)]);

    let plan = SettlementOptimizer::default().optimize(&input).unwrap();

    assert_eq!(plan, vec![suggestion("a", "c", 5000), suggestion("b", "c", 3000)]);
}

#[test]
fn test_largest_pairs_are_matched_first() {
    let input = balances(&[("a", 5000), ("b", 5000), ("c", -4000), ("d", -6000)]);

    let plan = SettlementOptimizer::default().optimize(&input).unwrap();

    assert_eq!(
        plan,
        vec![
            suggestion("d", "a", 5000),
            suggestion("c", "b", 4000),
            suggestion("d", "b", 1000),
        ]
    );
    assert!(plan.len() < input.nonzero_count());
}

#[test]
fn test_settled_group_needs_no_payments() {
    let input = balances(&[("a", 0), ("b", 0)]);
    assert!(SettlementOptimizer::default().optimize(&input).unwrap().is_empty());
    assert!(SettlementOptimizer::default().optimize(&balances(&[])).unwrap().is_empty());
}

#[test]
fn test_unbalanced_input_is_rejected() {
    let input = balances(&[("a", 5000), ("b", -4000)]);

    let err = SettlementOptimizer::default().optimize(&input).unwrap_err();

    assert_eq!(
        err,
        LedgerError::UnbalancedLedger {
            total: Money::from_minor(1000),
            tolerance: Money::ZERO
        }
    );
    assert!(err.is_data_consistency());
}

#[test]
fn test_residue_within_tolerance_is_dropped() {
    let input = balances(&[("a", 101), ("b", -100)]);

    let plan = SettlementOptimizer::new(Money::from_minor(1)).optimize(&input).unwrap();

    assert_eq!(plan, vec![suggestion("b", "a", 100)]);
}

#[test]
fn test_plan_closes_the_ledger() {
    let roster = members(&["a", "b", "c", "d"]);
    let expenses = vec![
        expense("e1", "a", Money::from_minor(12_345), &[]),
        expense(
            "e2",
            "b",
            Money::from_minor(8_000),
            &[("c", Money::from_minor(5_000)), ("d", Money::from_minor(3_000))],
        ),
    ];
    let calculator = BalanceCalculator::default();
    let before = calculator.calculate(&roster, &expenses, &[]).unwrap();

    let plan = SettlementOptimizer::default().optimize(&before).unwrap();
    let settlements: Vec<_> = plan
        .iter()
        .enumerate()
        .map(|(i, s)| payment(&format!("s{}", i), &s.debtor_id, &s.creditor_id, s.payment))
        .collect();
    let after = calculator.calculate(&roster, &expenses, &settlements).unwrap();

    assert!(after.is_settled());
    assert!(plan.len() < before.nonzero_count());
}

#[test]
fn test_ties_produce_identical_plans() {
    let input = balances(&[("d", 100), ("c", 100), ("b", -100), ("a", -100)]);
    let optimizer = SettlementOptimizer::default();

    let first = optimizer.optimize(&input).unwrap();
    let second = optimizer.optimize(&input).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, vec![suggestion("a", "c", 100), suggestion("b", "d", 100)]);
}

#[test]
fn test_suggestions_become_proposed_records() {
    let plan = vec![suggestion("b", "a", 250)];

    let records = SettlementOptimizer::into_transactions(&plan, "g1", Some("e1"), Utc::now());

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, TransactionKind::Proposed);
    assert_eq!(records[0].debtor, "b");
    assert_eq!(records[0].creditor, "a");
    assert_eq!(records[0].payment, Money::from_minor(250));
    assert_eq!(records[0].expense_id.as_deref(), Some("e1"));
    assert!(!records[0].is_actual());
}

#[test]
fn test_balances_outside_money_range_are_rejected() {
    let optimizer = SettlementOptimizer::default();

    let wide = balances(&[("a", i64::MAX), ("b", 1), ("c", -i64::MAX), ("d", -1)]);
    let err = optimizer.optimize(&wide).unwrap_err();
    assert!(matches!(err, LedgerError::AmountOverflow(_)));
    assert!(err.is_invalid_input());

    let floor = balances(&[("a", i64::MIN)]);
    assert!(matches!(
        optimizer.optimize(&floor).unwrap_err(),
        LedgerError::AmountOverflow(_)
    ));
}
