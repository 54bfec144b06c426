use super::error::AnalyticsError;
use super::filters::MetricFilters;
use super::query::{Predicate, SelectQuery, CONTEST_JOIN};
use super::reports::ContestMargin;
use crate::election_store::SqliteElectionStore;

pub const DEFAULT_MARGINS_LIMIT: usize = 10;
pub const CLOSEST_CONTESTS_LIMIT: usize = 10;

const CONTEST_COLUMNS: &str = "e.year, s.name, c.id, c.name, \
    ca.name, p.name, COALESCE(r.votes, 0), \
    ruca.name, rup.name, COALESCE(ru.votes, 0), \
    r.margin_percentage";

fn contest_margins(
    store: &SqliteElectionStore,
    filters: &MetricFilters,
    limit: usize,
    require_margin: bool,
) -> Result<Vec<ContestMargin>, AnalyticsError> {
    let min_results = store.settings().valid_year_min_results;
    store.read(|conn| {
        let predicates = filters.resolve(conn, min_results)?;
        let mut query = SelectQuery::new(CONTEST_COLUMNS, CONTEST_JOIN)
            .filters(predicates)
            .filter(Predicate::Position(1));
        if require_margin {
            query = query.filter(Predicate::NotNull("r.margin_percentage"));
        }
        query
            .order_by("r.margin_percentage ASC NULLS LAST, e.year ASC, c.id ASC")
            .limit(limit)
            .query_map(conn, |row| {
                let winner_votes: i64 = row.get(6)?;
                let runner_up_votes: i64 = row.get(9)?;
                Ok(ContestMargin {
                    year: row.get(0)?,
                    state: row.get(1)?,
                    constituency_id: row.get(2)?,
                    constituency: row.get(3)?,
                    winner: row.get(4)?,
                    winner_party: row.get(5)?,
                    winner_votes,
                    runner_up: row.get(7)?,
                    runner_up_party: row.get(8)?,
                    runner_up_votes,
                    margin: winner_votes - runner_up_votes,
                    margin_percentage: row.get(10)?,
                })
            })
    })
}

/// Winner and runner-up of each contest, narrowest margin first.
///
/// Contests without a runner-up never appear. `limit` defaults to 10 and is
/// capped by the configured maximum.
pub fn margins(
    store: &SqliteElectionStore,
    filters: &MetricFilters,
    limit: Option<usize>,
) -> Result<Vec<ContestMargin>, AnalyticsError> {
    let limit = limit.unwrap_or(DEFAULT_MARGINS_LIMIT);
    if limit == 0 {
        return Err(AnalyticsError::validation("limit must be at least 1"));
    }
    let limit = limit.min(store.settings().max_margins_limit);
    contest_margins(store, filters, limit, false)
}

/// The ten closest contests of a year with a recorded margin.
pub fn closest_contests(
    store: &SqliteElectionStore,
    filters: &MetricFilters,
) -> Result<Vec<ContestMargin>, AnalyticsError> {
    filters.require_year()?;
    contest_margins(store, filters, CLOSEST_CONTESTS_LIMIT, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{ResultFixture, Seeder};

    /// Seat `no` gets a winner and, when `runner_up_votes` is set, a runner-up.
    fn contest(seeder: &Seeder, no: i64, margin: Option<f64>, runner_up_votes: Option<i64>) {
        let seat = format!("Seat {}", no);
        let winner = format!("Winner {}", no);
        seeder.result(ResultFixture {
            constituency: &seat,
            constituency_no: no,
            candidate: &winner,
            party: "INC",
            position: 1,
            votes: 1000,
            margin,
            ..ResultFixture::default()
        });
        if let Some(votes) = runner_up_votes {
            let runner_up = format!("Runner {}", no);
            seeder.result(ResultFixture {
                constituency: &seat,
                constituency_no: no,
                candidate: &runner_up,
                party: "BJP",
                position: 2,
                votes,
                ..ResultFixture::default()
            });
        }
    }

    #[test]
    fn ordered_by_margin_and_missing_runner_up_excluded() {
        let seeder = Seeder::new();
        contest(&seeder, 1, Some(12.5), Some(750));
        contest(&seeder, 2, Some(0.4), Some(996));
        contest(&seeder, 3, Some(3.0), Some(970));
        contest(&seeder, 4, Some(0.1), None);
        let store = seeder.store(1);

        let rows = margins(&store, &MetricFilters::for_year(2019), None).unwrap();
        let seats: Vec<&str> = rows.iter().map(|r| r.constituency.as_str()).collect();
        assert_eq!(seats, vec!["Seat 2", "Seat 3", "Seat 1"]);
        assert_eq!(rows[0].margin, 4);
        assert_eq!(rows[0].runner_up, "Runner 2");
        assert_eq!(rows[0].runner_up_party, "BJP");
        for pair in rows.windows(2) {
            assert!(pair[0].margin_percentage <= pair[1].margin_percentage);
        }
    }

    #[test]
    fn limit_defaults_and_caps() {
        let seeder = Seeder::new();
        for no in 1..=15 {
            contest(&seeder, no, Some(no as f64), Some(900));
        }
        let store = seeder.store(1);
        let filters = MetricFilters::for_year(2019);

        assert_eq!(margins(&store, &filters, None).unwrap().len(), 10);
        assert_eq!(margins(&store, &filters, Some(3)).unwrap().len(), 3);
        assert_eq!(margins(&store, &filters, Some(500)).unwrap().len(), 15);
        assert!(matches!(
            margins(&store, &filters, Some(0)),
            Err(AnalyticsError::Validation(_))
        ));
    }

    #[test]
    fn null_margins_sort_last_and_closest_skips_them() {
        let seeder = Seeder::new();
        contest(&seeder, 1, None, Some(900));
        contest(&seeder, 2, Some(5.0), Some(950));
        let store = seeder.store(1);
        let filters = MetricFilters::for_year(2019);

        let all = margins(&store, &filters, None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].margin_percentage, None);

        let closest = closest_contests(&store, &filters).unwrap();
        assert_eq!(closest.len(), 1);
        assert_eq!(closest[0].constituency, "Seat 2");
    }

    #[test]
    fn closest_contests_fix_limit_and_require_year() {
        let seeder = Seeder::new();
        for no in 1..=12 {
            contest(&seeder, no, Some(no as f64 / 10.0), Some(990));
        }
        let store = seeder.store(1);

        let closest = closest_contests(&store, &MetricFilters::for_year(2019)).unwrap();
        assert_eq!(closest.len(), CLOSEST_CONTESTS_LIMIT);
        assert_eq!(closest[0].margin_percentage, Some(0.1));

        assert!(matches!(
            closest_contests(&store, &MetricFilters::default()),
            Err(AnalyticsError::Validation(_))
        ));
    }
}
