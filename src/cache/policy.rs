//! Category Policy Module
//!
//! Per-category TTL table plus the two adaptive rules that retune it:
//! the transfer-window calendar for loan rosters and the match lifecycle
//! for match data.

use std::fmt;
use std::time::Duration;

use chrono::Datelike;
use serde::{Serialize, Serializer};

use crate::cache::Category;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

// == Default TTLs ==
pub const TEAM_LOGOS_TTL: Duration = Duration::from_secs(365 * DAY);
pub const PLAYER_PHOTOS_TTL: Duration = Duration::from_secs(365 * DAY);
pub const LEAGUE_DATA_TTL: Duration = Duration::from_secs(7 * DAY);
pub const LOAN_ROSTER_TTL: Duration = Duration::from_secs(DAY);
pub const MATCH_DATA_TTL: Duration = Duration::from_secs(HOUR);

// == Adaptive TTLs ==
pub const LOAN_ROSTER_WINDOW_TTL: Duration = Duration::from_secs(6 * HOUR);
pub const LOAN_ROSTER_OFF_WINDOW_TTL: Duration = Duration::from_secs(7 * DAY);
pub const MATCH_FINISHED_TTL: Duration = Duration::from_secs(DAY);
pub const MATCH_SCHEDULED_TTL: Duration = Duration::from_secs(12 * HOUR);
pub const MATCH_LIVE_TTL: Duration = Duration::from_secs(5 * MINUTE);

/// Returns true for transfer-window months: January and July through September.
pub fn is_transfer_window(month: u32) -> bool {
    month == 1 || (7..=9).contains(&month)
}

// == Match Status ==
/// Lifecycle state of a match. Parsing never fails; unknown names are kept
/// in `Other` and treated as in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStatus {
    Scheduled,
    Live,
    InPlay,
    Paused,
    Finished,
    Postponed,
    Suspended,
    Cancelled,
    Other(String),
}

impl MatchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Live => "LIVE",
            MatchStatus::InPlay => "IN_PLAY",
            MatchStatus::Paused => "PAUSED",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Postponed => "POSTPONED",
            MatchStatus::Suspended => "SUSPENDED",
            MatchStatus::Cancelled => "CANCELLED",
            MatchStatus::Other(name) => name,
        }
    }

    /// Maps an upstream SportMonks `state_id` to a status.
    pub fn from_state_id(state_id: i64) -> Self {
        match state_id {
            5 => MatchStatus::Finished,
            1 => MatchStatus::Scheduled,
            2 => MatchStatus::Live,
            _ => MatchStatus::Postponed,
        }
    }

    /// TTL the match-lifecycle rule assigns to this status.
    pub fn match_data_ttl(&self) -> Duration {
        match self {
            MatchStatus::Finished => MATCH_FINISHED_TTL,
            MatchStatus::Scheduled => MATCH_SCHEDULED_TTL,
            _ => MATCH_LIVE_TTL,
        }
    }
}

impl From<&str> for MatchStatus {
    fn from(s: &str) -> Self {
        match s {
            "SCHEDULED" => MatchStatus::Scheduled,
            "LIVE" => MatchStatus::Live,
            "IN_PLAY" => MatchStatus::InPlay,
            "PAUSED" => MatchStatus::Paused,
            "FINISHED" => MatchStatus::Finished,
            "POSTPONED" => MatchStatus::Postponed,
            "SUSPENDED" => MatchStatus::Suspended,
            "CANCELLED" => MatchStatus::Cancelled,
            other => MatchStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Policy Table ==
/// Current TTL for each category.
///
/// Entries copy their TTL out of this table when written, so changes only
/// affect later writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPolicyTable {
    ttls: [Duration; 5],
}

impl Default for CategoryPolicyTable {
    fn default() -> Self {
        let mut ttls = [Duration::ZERO; 5];
        ttls[Category::TeamLogos.index()] = TEAM_LOGOS_TTL;
        ttls[Category::PlayerPhotos.index()] = PLAYER_PHOTOS_TTL;
        ttls[Category::LeagueData.index()] = LEAGUE_DATA_TTL;
        ttls[Category::LoanRosterData.index()] = LOAN_ROSTER_TTL;
        ttls[Category::MatchData.index()] = MATCH_DATA_TTL;
        Self { ttls }
    }
}

impl CategoryPolicyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ttl(&self, category: Category) -> Duration {
        self.ttls[category.index()]
    }

    pub fn set_ttl(&mut self, category: Category, ttl: Duration) {
        self.ttls[category.index()] = ttl;
    }

    // == Transfer Window Rule ==
    /// Retunes the loan roster TTL for the given date and returns the new value.
    pub fn update_loan_data_ttl(&mut self, date: &impl Datelike) -> Duration {
        let ttl = if is_transfer_window(date.month()) {
            LOAN_ROSTER_WINDOW_TTL
        } else {
            LOAN_ROSTER_OFF_WINDOW_TTL
        };
        self.set_ttl(Category::LoanRosterData, ttl);
        ttl
    }

    // == Match Lifecycle Rule ==
    /// Retunes the shared match data TTL and returns the new value.
    ///
    /// Last write wins: one call affects the next write of every match.
    pub fn update_match_data_ttl(&mut self, status: &MatchStatus) -> Duration {
        let ttl = status.match_data_ttl();
        self.set_ttl(Category::MatchData, ttl);
        ttl
    }

    /// `(category, ttl)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Duration)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.ttl(c)))
    }
}

/// Serializes as `{ "<category>": <ttl seconds>, ... }`.
impl Serialize for CategoryPolicyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Category::ALL.len()))?;
        for (category, ttl) in self.iter() {
            map.serialize_entry(category.as_str(), &ttl.as_secs())?;
        }
        map.end()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, 15).unwrap()
    }

    #[test]
    fn test_defaults() {
        let table = CategoryPolicyTable::new();
        assert_eq!(table.ttl(Category::TeamLogos), Duration::from_secs(31_536_000));
        assert_eq!(table.ttl(Category::PlayerPhotos), Duration::from_secs(31_536_000));
        assert_eq!(table.ttl(Category::LeagueData), Duration::from_secs(604_800));
        assert_eq!(table.ttl(Category::LoanRosterData), Duration::from_secs(86_400));
        assert_eq!(table.ttl(Category::MatchData), Duration::from_secs(3_600));
    }

    #[test]
    fn test_transfer_window_all_months() {
        let mut table = CategoryPolicyTable::new();
        for month in 1..=12 {
            let ttl = table.update_loan_data_ttl(&date(month));
            let expected = match month {
                1 | 7 | 8 | 9 => Duration::from_secs(6 * 3_600),
                _ => Duration::from_secs(7 * 86_400),
            };
            assert_eq!(ttl, expected, "month {}", month);
            assert_eq!(table.ttl(Category::LoanRosterData), expected, "month {}", month);
        }
    }

    #[test]
    fn test_transfer_window_month_edges() {
        let mut table = CategoryPolicyTable::new();

        let last_of_june = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert_eq!(table.update_loan_data_ttl(&last_of_june), LOAN_ROSTER_OFF_WINDOW_TTL);

        let first_of_july = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert_eq!(table.update_loan_data_ttl(&first_of_july), LOAN_ROSTER_WINDOW_TTL);

        let first_of_october = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        assert_eq!(table.update_loan_data_ttl(&first_of_october), LOAN_ROSTER_OFF_WINDOW_TTL);
    }

    #[test]
    fn test_match_status_mapping() {
        let mut table = CategoryPolicyTable::new();

        let cases = [
            ("FINISHED", Duration::from_secs(86_400)),
            ("SCHEDULED", Duration::from_secs(43_200)),
            ("LIVE", Duration::from_secs(300)),
            ("IN_PLAY", Duration::from_secs(300)),
            ("PAUSED", Duration::from_secs(300)),
            ("POSTPONED", Duration::from_secs(300)),
            ("HALF_TIME_WHATEVER", Duration::from_secs(300)),
            ("finished", Duration::from_secs(300)),
        ];

        for (status, expected) in cases {
            let ttl = table.update_match_data_ttl(&MatchStatus::from(status));
            assert_eq!(ttl, expected, "status {}", status);
            assert_eq!(table.ttl(Category::MatchData), expected);
        }
    }

    #[test]
    fn test_rules_touch_only_their_category() {
        let mut table = CategoryPolicyTable::new();
        table.update_match_data_ttl(&MatchStatus::Live);
        table.update_loan_data_ttl(&date(8));

        assert_eq!(table.ttl(Category::TeamLogos), TEAM_LOGOS_TTL);
        assert_eq!(table.ttl(Category::PlayerPhotos), PLAYER_PHOTOS_TTL);
        assert_eq!(table.ttl(Category::LeagueData), LEAGUE_DATA_TTL);
    }

    #[test]
    fn test_state_id_mapping() {
        assert_eq!(MatchStatus::from_state_id(5), MatchStatus::Finished);
        assert_eq!(MatchStatus::from_state_id(1), MatchStatus::Scheduled);
        assert_eq!(MatchStatus::from_state_id(2), MatchStatus::Live);
        assert_eq!(MatchStatus::from_state_id(99), MatchStatus::Postponed);
    }

    #[test]
    fn test_unknown_status_keeps_name() {
        let status = MatchStatus::from("ABANDONED");
        assert_eq!(status, MatchStatus::Other("ABANDONED".to_string()));
        assert_eq!(status.to_string(), "ABANDONED");
    }

    #[test]
    fn test_policy_serializes_seconds() {
        let json = serde_json::to_value(CategoryPolicyTable::new()).unwrap();
        assert_eq!(json["matchData"], 3_600);
        assert_eq!(json["loanRosterData"], 86_400);
        assert_eq!(json.as_object().unwrap().len(), 5);
    }
}
