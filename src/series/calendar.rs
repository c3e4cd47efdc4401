use chrono::{Datelike, Months, NaiveDate};

/// Last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let first = date.with_day(1)?;
    first.checked_add_months(Months::new(1))?.pred_opt()
}

/// End of the month after the one containing `date`.
pub fn next_month_end(date: NaiveDate) -> Option<NaiveDate> {
    let first = date.with_day(1)?.checked_add_months(Months::new(1))?;
    end_of_month(first)
}

pub fn is_month_end(date: NaiveDate) -> bool {
    end_of_month(date) == Some(date)
}

/// Month-end dates of every calendar month from `start`'s month through
/// `end`'s month, ascending. Empty when `end < start`.
pub fn monthly_axis(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut axis = Vec::new();
    if end < start {
        return axis;
    }
    let last = (end.year(), end.month());

    let mut cursor = end_of_month(start);
    while let Some(month_end) = cursor {
        axis.push(month_end);
        if (month_end.year(), month_end.month()) >= last {
            break;
        }
        cursor = next_month_end(month_end);
    }
    axis
}
