//! crates/pairpad_core/src/forms/dashboard.rs
//!
//! Single-screen entry forms on the shared dashboard and in messaging. Each check
//! runs before the request is sent.

use crate::coliving::{BillDraft, CalendarEventDraft, ExpenseDraft, ShoppingItemDraft, TaskDraft};
use crate::validation::{require, FieldErrors};
use rust_decimal::Decimal;

pub fn check_task(task: &TaskDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "title", &task.title, "Task title is required");
    errors
}

pub fn check_expense(expense: &ExpenseDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "title", &expense.title, "Expense title is required");
    if expense.amount <= Decimal::ZERO {
        errors.insert("amount", "Amount must be greater than zero");
    }
    if expense.participant_ids.is_empty() {
        errors.insert("participant_ids", "Please select at least one member to split with");
    }
    errors
}

pub fn check_bill(bill: &BillDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "title", &bill.title, "Bill title is required");
    if bill.amount <= Decimal::ZERO {
        errors.insert("amount", "Amount must be greater than zero");
    }
    if bill.due_date.is_none() {
        errors.insert("due_date", "Due date is required");
    }
    errors
}

pub fn check_event(event: &CalendarEventDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "title", &event.title, "Event title is required");
    if let Some(end) = event.end_datetime {
        if end < event.start_datetime {
            errors.insert("end_datetime", "End time must be after the start time");
        }
    }
    errors
}

pub fn check_shopping_list(name: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "name", name, "List name is required");
    errors
}

pub fn check_shopping_item(item: &ShoppingItemDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "name", &item.name, "Item name is required");
    errors
}

pub fn check_message(content: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "content", content, "Message cannot be empty");
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coliving::EventType;
    use crate::domain::RecordId;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn expense_needs_title_and_positive_amount() {
        let errors = check_expense(&ExpenseDraft::default());
        assert!(errors.contains("title"));
        assert!(errors.contains("amount"));
        assert!(errors.contains("participant_ids"));

        let ok = ExpenseDraft {
            title: "Groceries".into(),
            amount: Decimal::new(4250, 2),
            participant_ids: vec![RecordId(1), RecordId(2)],
            ..ExpenseDraft::default()
        };
        assert!(check_expense(&ok).is_empty());
    }

    #[test]
    fn bill_needs_a_due_date() {
        let bill = BillDraft {
            title: "Internet".into(),
            amount: Decimal::from(60),
            ..BillDraft::default()
        };
        assert_eq!(check_bill(&bill).get("due_date"), Some("Due date is required"));
    }

    #[test]
    fn event_cannot_end_before_it_starts() {
        let start = Utc.with_ymd_and_hms(2026, 11, 1, 18, 0, 0).unwrap();
        let mut event = CalendarEventDraft {
            living_space: RecordId(1),
            title: "House meeting".into(),
            description: String::new(),
            event_type: EventType::Meeting,
            start_datetime: start,
            end_datetime: Some(start - Duration::hours(1)),
            all_day: false,
        };
        assert!(check_event(&event).contains("end_datetime"));

        event.end_datetime = Some(start + Duration::hours(1));
        assert!(check_event(&event).is_empty());
    }

    #[test]
    fn blank_message_and_names_are_refused() {
        assert!(check_message("   ").contains("content"));
        assert!(check_message("hi").is_empty());
        assert!(check_shopping_list("").contains("name"));
        assert!(check_task(&TaskDraft::default()).contains("title"));
        assert!(check_shopping_item(&ShoppingItemDraft::default()).contains("name"));
    }
}
