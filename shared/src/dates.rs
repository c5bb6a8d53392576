use chrono::NaiveDate;

pub fn format_deadline(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

/// Whole days from `today` to `deadline`; negative once the deadline passed.
pub fn days_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

pub fn deadline_label(deadline: NaiveDate, today: NaiveDate) -> String {
    match days_until(deadline, today) {
        0 => "Due today".to_string(),
        1 => "1 day left".to_string(),
        -1 => "Overdue by 1 day".to_string(),
        days if days > 0 => format!("{} days left", days),
        days => format!("Overdue by {} days", -days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_with_slashes_and_padding() {
        assert_eq!(format_deadline(date(2024, 3, 7)), "2024/03/07");
    }

    #[test]
    fn labels_cover_future_today_and_past() {
        let today = date(2024, 2, 27);
        assert_eq!(deadline_label(date(2024, 2, 27), today), "Due today");
        assert_eq!(deadline_label(date(2024, 2, 28), today), "1 day left");
        assert_eq!(deadline_label(date(2024, 3, 2), today), "4 days left");
        assert_eq!(deadline_label(date(2024, 2, 26), today), "Overdue by 1 day");
        assert_eq!(deadline_label(date(2024, 2, 17), today), "Overdue by 10 days");
    }
}
