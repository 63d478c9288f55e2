//! Budget reporting over the event collection.
//!
//! Reporting prefers an event's session-observed `actual_cost` over the
//! computed cost when present. The optimizer does the opposite; see the
//! `optimizer` module.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cost;
use crate::event::Event;

/// Daily budget status for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub daily_budget: i32,
    pub spent: i32,
    pub remaining: i32,
    pub is_overdrafted: bool,
    pub overdraft_amount: i32,
    pub weekly_total: i32,
    pub weekly_debt: i32,
}

/// Outcome of checking a total against a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overdraft {
    pub is_overdrafted: bool,
    pub overdraft_amount: i32,
    pub remaining: i32,
}

/// Check a cost total against a budget.
pub fn detect_overdraft(total: i32, budget: i32) -> Overdraft {
    let remaining = budget - total;
    Overdraft {
        is_overdrafted: remaining < 0,
        overdraft_amount: if remaining < 0 { -remaining } else { 0 },
        remaining,
    }
}

/// The cost a budget consumer should charge for an event: the
/// session-observed actual cost when present, the computed cost otherwise.
pub fn effective_cost(event: &Event) -> i32 {
    event
        .actual_cost
        .or(event.calculated_cost)
        .unwrap_or(0)
}

/// Budget status for one calendar day.
///
/// Recomputes proximity costs over the whole collection first, so the
/// report always reflects the current arrangement.
pub fn daily_status(events: &mut [Event], day: NaiveDate, daily_budget: i32) -> BudgetStatus {
    cost::apply_proximity(events);

    let spent: i32 = events
        .iter()
        .filter(|e| e.start_time.date_naive() == day)
        .map(effective_cost)
        .sum();

    let overdraft = detect_overdraft(spent, daily_budget);

    let weekly_total: i32 = events.iter().map(effective_cost).sum();
    let weekly_debt = weekly_total - daily_budget * 7;

    BudgetStatus {
        daily_budget,
        spent,
        remaining: overdraft.remaining,
        is_overdrafted: overdraft.is_overdrafted,
        overdraft_amount: overdraft.overdraft_amount,
        weekly_total,
        weekly_debt,
    }
}

/// Per-day effective totals, keyed by `%Y-%m-%d`, plus the week total.
pub fn weekly_totals(events: &mut [Event]) -> (BTreeMap<String, i32>, i32) {
    cost::apply_proximity(events);

    let mut totals: BTreeMap<String, i32> = BTreeMap::new();
    for event in events.iter() {
        *totals.entry(event.day_key()).or_insert(0) += effective_cost(event);
    }
    let week_total = totals.values().sum();
    (totals, week_total)
}
