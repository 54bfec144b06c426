//! Typed predicates and a small SELECT builder over the results fact join.
//!
//! Every value reaches SQLite as a bound parameter; predicates only ever
//! contribute fixed SQL text with `?N` placeholders.

use super::error::AnalyticsError;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

/// The fact join every metric starts from. Aliases are fixed: `r` results,
/// `e` elections, `c` constituencies, `s` states, `ca` candidates, `p` parties.
pub const FACT_JOIN: &str = "results r \
    JOIN elections e ON e.id = r.election_id \
    JOIN constituencies c ON c.id = r.constituency_id \
    JOIN states s ON s.id = c.state_id \
    JOIN candidates ca ON ca.id = r.candidate_id \
    JOIN parties p ON p.id = r.party_id";

/// Pairs each winner row `r` with the runner-up of the same contest as `ru`,
/// its candidate as `ruca` and its party as `rup`.
pub const CONTEST_JOIN: &str = "results r \
    JOIN elections e ON e.id = r.election_id \
    JOIN constituencies c ON c.id = r.constituency_id \
    JOIN states s ON s.id = c.state_id \
    JOIN candidates ca ON ca.id = r.candidate_id \
    JOIN parties p ON p.id = r.party_id \
    JOIN results ru ON ru.election_id = r.election_id \
        AND ru.constituency_id = r.constituency_id AND ru.position = 2 \
    JOIN candidates ruca ON ruca.id = ru.candidate_id \
    JOIN parties rup ON rup.id = ru.party_id";

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Keeps years holding at least `min_results` result rows.
    ValidYear { min_results: i64 },
    Year(i32),
    State(i64),
    Party(i64),
    PartyName(String),
    Sex(String),
    /// Every constituency row carrying this name.
    DistrictName(String),
    Constituency(i64),
    Position(i64),
    /// `column IS NOT NULL` for one of the fixed aliased columns.
    NotNull(&'static str),
    PositiveVotes,
    /// Trimmed column value is not empty.
    NotBlank(&'static str),
}

impl Predicate {
    fn render(&self, params: &mut Vec<Value>) -> String {
        let mut bind = |value: Value| {
            params.push(value);
            format!("?{}", params.len())
        };
        match self {
            Predicate::ValidYear { min_results } => format!(
                "e.year IN (SELECT ve.year FROM results vr \
                 JOIN elections ve ON ve.id = vr.election_id \
                 GROUP BY ve.year HAVING COUNT(*) >= {})",
                bind(Value::Integer(*min_results))
            ),
            Predicate::Year(year) => format!("e.year = {}", bind(Value::Integer(*year as i64))),
            Predicate::State(id) => format!("c.state_id = {}", bind(Value::Integer(*id))),
            Predicate::Party(id) => format!("r.party_id = {}", bind(Value::Integer(*id))),
            Predicate::PartyName(name) => format!("p.name = {}", bind(Value::Text(name.clone()))),
            Predicate::Sex(sex) => format!("ca.sex = {}", bind(Value::Text(sex.clone()))),
            Predicate::DistrictName(name) => {
                format!("c.name = {}", bind(Value::Text(name.clone())))
            }
            Predicate::Constituency(id) => format!("c.id = {}", bind(Value::Integer(*id))),
            Predicate::Position(position) => {
                format!("r.position = {}", bind(Value::Integer(*position)))
            }
            Predicate::NotNull(column) => format!("{} IS NOT NULL", column),
            Predicate::PositiveVotes => "r.votes > 0".to_string(),
            Predicate::NotBlank(column) => format!("TRIM(COALESCE({}, '')) <> ''", column),
        }
    }
}

/// A single SELECT over a fixed FROM clause.
#[derive(Clone, Debug)]
pub struct SelectQuery {
    select: String,
    from: &'static str,
    predicates: Vec<Predicate>,
    group_by: Option<&'static str>,
    order_by: Option<&'static str>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl SelectQuery {
    pub fn new<S: Into<String>>(select: S, from: &'static str) -> Self {
        SelectQuery {
            select: select.into(),
            from,
            predicates: vec![],
            group_by: None,
            order_by: None,
            limit: None,
            offset: None,
        }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn filters<I: IntoIterator<Item = Predicate>>(mut self, predicates: I) -> Self {
        self.predicates.extend(predicates);
        self
    }

    pub fn group_by(mut self, columns: &'static str) -> Self {
        self.group_by = Some(columns);
        self
    }

    pub fn order_by(mut self, columns: &'static str) -> Self {
        self.order_by = Some(columns);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Renders SQL text and its positional parameters.
    pub fn build(&self) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let mut sql = format!("SELECT {} FROM {}", self.select, self.from);

        let conditions: Vec<String> = self
            .predicates
            .iter()
            .map(|p| p.render(&mut params))
            .collect();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        if let Some(group_by) = self.group_by {
            sql.push_str(" GROUP BY ");
            sql.push_str(group_by);
        }
        if let Some(order_by) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        if let Some(limit) = self.limit {
            params.push(Value::Integer(limit as i64));
            sql.push_str(&format!(" LIMIT ?{}", params.len()));
        }
        if let Some(offset) = self.offset {
            if self.limit.is_none() {
                sql.push_str(" LIMIT -1");
            }
            params.push(Value::Integer(offset as i64));
            sql.push_str(&format!(" OFFSET ?{}", params.len()));
        }
        (sql, params)
    }

    /// Runs the query and maps every row.
    pub fn query_map<T, F>(&self, conn: &Connection, mut map_row: F) -> Result<Vec<T>, AnalyticsError>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let (sql, params) = self.build();
        query_map_sql(conn, &sql, &params, |row| map_row(row))
    }

    /// Runs a query expected to return exactly one row (aggregates).
    pub fn query_one<T, F>(&self, conn: &Connection, map_row: F) -> Result<T, AnalyticsError>
    where
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let (sql, params) = self.build();
        let mut stmt = conn.prepare_cached(&sql)?;
        let value = stmt.query_row(params_from_iter(params.iter()), map_row)?;
        Ok(value)
    }
}

pub fn query_map_sql<T, F>(
    conn: &Connection,
    sql: &str,
    params: &[Value],
    mut map_row: F,
) -> Result<Vec<T>, AnalyticsError>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| map_row(row))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
