//! The expense tools: `add_expense`, `list_expenses`, `summarize`.

use crate::store::{DateRange, ExpenseStore, NewExpense, SummaryFilter};
use crate::tools::catalog::{ParamDef, ParamType, ToolEntry};
use crate::tools::registry::ToolRegistry;
use crate::types::Result;
use serde_json::{json, Value};
use std::sync::Arc;

pub const ADD_EXPENSE: &str = "add_expense";
pub const LIST_EXPENSES: &str = "list_expenses";
pub const SUMMARIZE: &str = "summarize";

pub fn add_expense_entry() -> ToolEntry {
    ToolEntry::new(
        ADD_EXPENSE,
        "Add a new expense to the database.",
        vec![
            ParamDef::required("date", ParamType::String, "Expense date, e.g. 2024-03-01"),
            ParamDef::required("amount", ParamType::Float, "Amount spent"),
            ParamDef::required("category", ParamType::String, "Category label"),
            ParamDef::with_default(
                "subcategory",
                ParamType::String,
                "Optional subcategory label",
                json!(""),
            ),
            ParamDef::with_default("note", ParamType::String, "Free-text note", json!("")),
        ],
    )
}

pub fn list_expenses_entry() -> ToolEntry {
    ToolEntry::new(
        LIST_EXPENSES,
        "List expenses between two dates (inclusive).",
        vec![
            ParamDef::required("start_date", ParamType::String, "First date, inclusive"),
            ParamDef::required("end_date", ParamType::String, "Last date, inclusive"),
        ],
    )
}

pub fn summarize_entry() -> ToolEntry {
    ToolEntry::new(
        SUMMARIZE,
        "Summarize total expenses by category within a date range.",
        vec![
            ParamDef::required("start_date", ParamType::String, "First date, inclusive"),
            ParamDef::required("end_date", ParamType::String, "Last date, inclusive"),
            ParamDef::with_default(
                "category",
                ParamType::Optional(Box::new(ParamType::String)),
                "Only total this category",
                Value::Null,
            ),
        ],
    )
}

/// Register all expense tools against a shared store.
pub fn register_all(registry: &mut ToolRegistry, store: Arc<ExpenseStore>) -> Result<()> {
    let s = store.clone();
    registry.register_typed(add_expense_entry(), move |expense: NewExpense| {
        s.record(&expense)
    })?;

    let s = store.clone();
    registry.register_typed(list_expenses_entry(), move |range: DateRange| {
        s.query(&range)
    })?;

    registry.register_typed(summarize_entry(), move |filter: SummaryFilter| {
        store.summarize(&filter)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Error;
    use pretty_assertions::assert_eq;

    fn registry() -> ToolRegistry {
        let store = Arc::new(ExpenseStore::open_in_memory().unwrap());
        let mut registry = ToolRegistry::new();
        register_all(&mut registry, store).unwrap();
        registry
    }

    #[test]
    fn test_registered_in_order() {
        assert_eq!(
            registry().names(),
            vec![ADD_EXPENSE, LIST_EXPENSES, SUMMARIZE]
        );
    }

    #[test]
    fn test_add_then_list_round_trip() {
        let registry = registry();
        let added = registry
            .invoke(
                ADD_EXPENSE,
                &json!({"date": "2024-03-01", "amount": 12.5, "category": "Food"}),
            )
            .unwrap();
        assert_eq!(added, json!({"status": "ok", "id": 1}));

        let listed = registry
            .invoke(
                LIST_EXPENSES,
                &json!({"start_date": "2024-03-01", "end_date": "2024-03-01"}),
            )
            .unwrap();
        assert_eq!(
            listed,
            json!([{
                "id": 1,
                "date": "2024-03-01",
                "amount": 12.5,
                "category": "Food",
                "subcategory": "",
                "note": "",
            }])
        );
    }

    #[test]
    fn test_list_record_field_order() {
        let registry = registry();
        registry
            .invoke(
                ADD_EXPENSE,
                &json!({"date": "2024-03-01", "amount": 1, "category": "Food"}),
            )
            .unwrap();
        let listed = registry
            .invoke(
                LIST_EXPENSES,
                &json!({"start_date": "2024-03-01", "end_date": "2024-03-01"}),
            )
            .unwrap();
        let text = serde_json::to_string(&listed[0]).unwrap();
        assert!(text.starts_with(r#"{"id":1,"date":"2024-03-01","amount":1.0,"category":"Food","subcategory":"","note":""#));
    }

    #[test]
    fn test_amount_string_is_coerced() {
        let registry = registry();
        registry
            .invoke(
                ADD_EXPENSE,
                &json!({"date": "2024-03-01", "amount": "7.25", "category": "Food"}),
            )
            .unwrap();
        let totals = registry
            .invoke(
                SUMMARIZE,
                &json!({"start_date": "2024-03-01", "end_date": "2024-03-01"}),
            )
            .unwrap();
        assert_eq!(totals, json!([{"category": "Food", "total_amount": 7.25}]));
    }

    #[test]
    fn test_add_expense_missing_amount() {
        let err = registry()
            .invoke(ADD_EXPENSE, &json!({"date": "2024-03-01", "category": "Food"}))
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter { ref param, .. } if param == "amount"));
    }

    #[test]
    fn test_add_expense_bad_amount() {
        let err = registry()
            .invoke(
                ADD_EXPENSE,
                &json!({"date": "2024-03-01", "amount": "lots", "category": "Food"}),
            )
            .unwrap_err();
        assert_eq!(err.kind(), "type_mismatch");
    }

    #[test]
    fn test_summarize_scenario_with_null_category() {
        let registry = registry();
        for (date, amount, category) in [
            ("2024-03-01", 12.5, "Food"),
            ("2024-03-02", 7.25, "Food"),
            ("2024-03-02", 20.0, "Travel"),
        ] {
            registry
                .invoke(
                    ADD_EXPENSE,
                    &json!({"date": date, "amount": amount, "category": category}),
                )
                .unwrap();
        }

        let totals = registry
            .invoke(
                SUMMARIZE,
                &json!({"start_date": "2024-03-01", "end_date": "2024-03-02", "category": null}),
            )
            .unwrap();
        assert_eq!(
            totals,
            json!([
                {"category": "Food", "total_amount": 19.75},
                {"category": "Travel", "total_amount": 20.0},
            ])
        );
    }

    #[test]
    fn test_summarize_unknown_category_is_empty() {
        let registry = registry();
        registry
            .invoke(
                ADD_EXPENSE,
                &json!({"date": "2024-03-01", "amount": 3, "category": "Food"}),
            )
            .unwrap();
        let totals = registry
            .invoke(
                SUMMARIZE,
                &json!({"start_date": "2024-03-01", "end_date": "2024-03-31", "category": "Travel"}),
            )
            .unwrap();
        assert_eq!(totals, json!([]));
    }
}
