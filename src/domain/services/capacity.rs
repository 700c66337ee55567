use crate::domain::models::event::{CapacityChange, Event};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub total: i32,
    pub remaining: i32,
}

impl Capacity {
    pub fn of(event: &Event) -> Self {
        Self { total: event.capacity, remaining: event.remaining_capacity }
    }

    pub fn apply_to(self, event: &mut Event) {
        event.capacity = self.total;
        event.remaining_capacity = self.remaining;
    }
}

fn to_slots(raw: i64, field: &str) -> Result<i32, AppError> {
    if raw < 0 {
        return Err(AppError::Validation(format!("{} cannot be negative", field)));
    }
    i32::try_from(raw).map_err(|_| AppError::Validation(format!("{} is too large", field)))
}

/// A new event starts with every seat available.
pub fn initial(submitted: i64) -> Result<Capacity, AppError> {
    let total = to_slots(submitted, "Capacity")?;
    Ok(Capacity { total, remaining: total })
}

/// Lowering the total resets `remaining` to the new total; raising it leaves
/// `remaining` untouched. An explicit `remaining` is applied last and must fit
/// in `0..=total`.
pub fn apply_update(current: Capacity, new_total: Option<i64>, new_remaining: Option<i64>) -> Result<Capacity, AppError> {
    let mut next = current;

    if let Some(raw) = new_total {
        let total = to_slots(raw, "Capacity")?;
        if total < current.total {
            next.remaining = total;
        }
        next.total = total;
    }

    if let Some(raw) = new_remaining {
        if raw < 0 {
            return Err(AppError::Validation("Remaining capacity cannot be less than 0".into()));
        }
        if raw > i64::from(next.total) {
            return Err(AppError::Validation("Remaining capacity cannot exceed capacity".into()));
        }
        next.remaining = raw as i32;
    }

    Ok(next)
}

/// Validates an edit against the event as read. `None` when neither field was
/// supplied, so the stored seat counts are left alone.
pub fn plan_update(current: Capacity, new_total: Option<i64>, new_remaining: Option<i64>) -> Result<Option<CapacityChange>, AppError> {
    if new_total.is_none() && new_remaining.is_none() {
        return Ok(None);
    }

    let next = apply_update(current, new_total, new_remaining)?;
    Ok(Some(CapacityChange {
        total: new_total.map(|_| next.total),
        remaining: new_remaining.map(|_| next.remaining),
    }))
}

pub fn ensure_available(event: &Event) -> Result<(), AppError> {
    if event.remaining_capacity <= 0 {
        return Err(AppError::CapacityExhausted);
    }
    Ok(())
}
