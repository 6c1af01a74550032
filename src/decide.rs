use crate::models::Schedule;

/// A schedule that passed the filter, with its open slot count computed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSchedule<'a> {
    pub schedule: &'a Schedule,
    pub remaining: u32,
}

/// Keep schedules whose title contains `title_filter` (case-sensitive) and
/// that still have at least one open slot. Input order is preserved.
pub fn select<'a>(schedules: &'a [Schedule], title_filter: &str) -> Vec<OpenSchedule<'a>> {
    schedules
        .iter()
        .filter(|schedule| schedule.title.contains(title_filter))
        .filter_map(|schedule| {
            let remaining = u32::try_from(schedule.people.remaining()).ok()?;
            (remaining > 0).then_some(OpenSchedule { schedule, remaining })
        })
        .collect()
}
