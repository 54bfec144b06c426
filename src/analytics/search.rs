use super::error::AnalyticsError;
use crate::election_store::{resolve_page, SearchHit, SearchKind, SearchScope, SqliteElectionStore};
use rusqlite::types::Value;

const CANDIDATE_SEARCH: &str =
    "SELECT 'candidate' AS kind, id, name, sex AS detail FROM candidates \
     WHERE name LIKE ?1 ESCAPE '\\'";
const CONSTITUENCY_SEARCH: &str =
    "SELECT 'constituency' AS kind, c.id AS id, c.name AS name, s.name AS detail \
     FROM constituencies c \
     JOIN states s ON s.id = c.state_id WHERE c.name LIKE ?1 ESCAPE '\\'";
const PARTY_SEARCH: &str =
    "SELECT 'party' AS kind, id, name, party_type_tcpd AS detail FROM parties \
     WHERE name LIKE ?1 ESCAPE '\\'";

impl SearchScope {
    /// `None` means every kind.
    pub fn parse(value: Option<&str>) -> Result<Self, AnalyticsError> {
        match value.map(str::trim) {
            None | Some("") | Some("all") => Ok(SearchScope::All),
            Some("candidate") => Ok(SearchScope::Candidate),
            Some("constituency") => Ok(SearchScope::Constituency),
            Some("party") => Ok(SearchScope::Party),
            Some(other) => Err(AnalyticsError::validation(format!(
                "type must be one of candidate, constituency, party, all; got '{}'",
                other
            ))),
        }
    }
}

/// `%` and `_` in user input match literally.
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Case-insensitive substring search over candidate, constituency and party
/// names, ordered by name.
pub fn search(
    store: &SqliteElectionStore,
    query: &str,
    scope: SearchScope,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<Vec<SearchHit>, AnalyticsError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AnalyticsError::validation("q must not be empty"));
    }
    let settings = store.settings();
    let page = resolve_page(
        limit,
        offset,
        settings.default_listing_limit,
        settings.max_listing_limit,
    )?;

    let parts: Vec<&str> = [
        (SearchKind::Candidate, CANDIDATE_SEARCH),
        (SearchKind::Constituency, CONSTITUENCY_SEARCH),
        (SearchKind::Party, PARTY_SEARCH),
    ]
    .into_iter()
    .filter(|(kind, _)| scope.includes(*kind))
    .map(|(_, sql)| sql)
    .collect();
    let sql = format!(
        "SELECT kind, id, name, detail FROM ({}) \
         ORDER BY name COLLATE NOCASE ASC, kind ASC, id ASC LIMIT ?2 OFFSET ?3",
        parts.join(" UNION ALL ")
    );
    let params = [
        Value::Text(like_pattern(query)),
        Value::Integer(page.limit as i64),
        Value::Integer(page.offset as i64),
    ];

    store.read(|conn| {
        super::query::query_map_sql(conn, &sql, &params, |row| {
            let kind: String = row.get(0)?;
            let kind = match kind.as_str() {
                "candidate" => SearchKind::Candidate,
                "constituency" => SearchKind::Constituency,
                _ => SearchKind::Party,
            };
            Ok(SearchHit {
                kind,
                id: row.get(1)?,
                name: row.get(2)?,
                detail: row.get(3)?,
            })
        })
    })
}
