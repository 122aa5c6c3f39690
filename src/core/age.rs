use chrono::{Datelike, Local, NaiveDate};

/// Age in whole years on a given day
///
/// Accounts for whether the birthday has already occurred that year, so
/// it is not a naive year subtraction. A date of birth in the future
/// yields `None` (the "unknown age" sentinel), same as a missing one.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> Option<u8> {
    if dob > today {
        return None;
    }

    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }

    u8::try_from(years).ok()
}

/// Age in whole years as of today; `None` for a missing date of birth
pub fn age_now(dob: Option<NaiveDate>) -> Option<u8> {
    dob.and_then(|d| age_on(d, Local::now().date_naive()))
}
