use chrono::{Days, NaiveDate};

/// Inclusive span of calendar days. A range whose start lies after its end is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start).num_days() as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn days(&self) -> DayIter {
        DayIter {
            current: Some(self.start),
            end: self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = DayIter;

    fn into_iter(self) -> Self::IntoIter {
        self.days()
    }
}

/// Day-by-day walk over a [`DateRange`].
#[derive(Debug, Clone)]
pub struct DayIter {
    current: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DayIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let day = self.current.filter(|day| *day <= self.end)?;
        self.current = day.checked_add_days(Days::new(1));
        Some(day)
    }
}

/// `YYYYMMDD`, used in request URLs and artifact names.
pub fn compact_key(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// `YYYY-MM-DD`, used in logs and the `{iso_date}` URL placeholder.
pub fn human_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn games_window_has_nineteen_days() {
        let range = DateRange::new(date(2024, 7, 24), date(2024, 8, 11));
        let days: Vec<_> = range.days().collect();

        assert_eq!(days.len(), 19);
        assert_eq!(range.len(), 19);
        assert_eq!(days.first(), Some(&date(2024, 7, 24)));
        assert_eq!(days.last(), Some(&date(2024, 8, 11)));
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn crosses_month_boundary() {
        let days: Vec<_> = DateRange::new(date(2024, 7, 31), date(2024, 8, 1))
            .into_iter()
            .map(compact_key)
            .collect();
        assert_eq!(days, vec!["20240731", "20240801"]);
    }

    #[test]
    fn single_day_and_reversed_ranges() {
        assert_eq!(DateRange::new(date(2024, 8, 1), date(2024, 8, 1)).len(), 1);

        let reversed = DateRange::new(date(2024, 8, 2), date(2024, 8, 1));
        assert!(reversed.is_empty());
        assert_eq!(reversed.days().count(), 0);
    }

    #[test]
    fn formats_keys() {
        assert_eq!(compact_key(date(2024, 7, 24)), "20240724");
        assert_eq!(human_key(date(2024, 7, 24)), "2024-07-24");
    }
}
