//! Month-grid layout: a pure function of the parsed context.

/// One display week. None cells are the leading/trailing blanks of the
/// first and last rows.
pub type Week = [Option<u32>; 7];

/// Lay out the days `1..=month_days` into 7-wide display weeks.
///
/// `start_day` is the weekday of the 1st (0 = Sunday); `start_of_week`
/// is the weekday shown in the first column. The number of leading
/// blanks is the offset between them, wrapping across the week
/// boundary when the month starts before the configured week start.
pub fn layout(start_day: u32, start_of_week: u32, month_days: u32) -> Vec<Week> {
    let start_holds = if start_day >= start_of_week {
        start_day - start_of_week
    } else {
        7 - start_of_week + start_day
    } as usize;

    let mut weeks = Vec::new();
    let mut week: Week = [None; 7];
    let mut slot = start_holds;
    for day in 1..=month_days {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}
