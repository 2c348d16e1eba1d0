use crate::schedule::Fixture;
use crate::settings::CalendarSettings;
use chrono::{Days, NaiveDate};

/// Shared matchday counter across confederations. Matchday `k` is the same
/// simulation step everywhere, whatever the size of each group.
#[derive(Debug, Clone)]
pub struct MatchdayCalendar {
    start_date: NaiveDate,
    interval_days: u16,
}

impl MatchdayCalendar {
    pub fn new(settings: &CalendarSettings) -> Self {
        MatchdayCalendar {
            start_date: settings.start_date,
            interval_days: settings.matchday_interval_days.max(1),
        }
    }

    pub fn global_matchday(&self, offset: u16, local_matchday: u16) -> u16 {
        offset + local_matchday
    }

    pub fn date_of(&self, matchday: u16) -> NaiveDate {
        let elapsed = u64::from(matchday.saturating_sub(1)) * u64::from(self.interval_days);
        self.start_date
            .checked_add_days(Days::new(elapsed))
            .unwrap_or(self.start_date)
    }

    /// Rewrites local matchdays onto the global counter and stamps kickoff dates.
    pub fn assign(&self, fixtures: &mut [Fixture], offset: u16) {
        for fixture in fixtures {
            fixture.matchday = self.global_matchday(offset, fixture.matchday);
            fixture.date = Some(self.date_of(fixture.matchday));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::RoundRobinScheduler;

    fn calendar() -> MatchdayCalendar {
        MatchdayCalendar::new(&CalendarSettings {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            matchday_interval_days: 4,
        })
    }

    #[test]
    fn test_dates_follow_interval() {
        let calendar = calendar();
        assert_eq!(calendar.date_of(1), NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert_eq!(calendar.date_of(3), NaiveDate::from_ymd_opt(2025, 3, 28).unwrap());
    }

    #[test]
    fn test_assign_offsets_matchdays() {
        let calendar = calendar();
        let mut fixtures = RoundRobinScheduler::schedule("G", &[1, 2, 3, 4], false);

        calendar.assign(&mut fixtures, 2);

        assert_eq!(fixtures.iter().map(|f| f.matchday).min(), Some(3));
        assert_eq!(fixtures.iter().map(|f| f.matchday).max(), Some(5));
        for fixture in &fixtures {
            assert_eq!(fixture.date, Some(calendar.date_of(fixture.matchday)));
        }
    }
}
