use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of "today" for handlers. Business logic never reads the wall clock
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
