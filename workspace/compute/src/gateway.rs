//! Seam between pages and the remote data service.
//!
//! Pages never talk HTTP directly. They hold a [`TablePage`] and hand it a
//! [`RowSource`], which the browser client implements per business area and tests
//! implement with canned rows.

use async_trait::async_trait;
use common::UserContext;
use tracing::{debug, info, instrument, warn};

use crate::error::{ConfigurationError, GatewayError};
use crate::filter::{FilterEngine, FilterSchema};
use crate::row::Row;
use crate::scope::{PageScope, Ticket};

/// Who is asking and for which reporting year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchContext {
    pub user: UserContext,
    pub year: i32,
}

impl FetchContext {
    pub fn new(user: UserContext, year: i32) -> Self {
        Self { user, year }
    }

    /// Query parameters every row and aggregate request carries.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.user.username.clone()),
            ("year", self.year.to_string()),
        ]
    }
}

/// Fetches the full row set for one business area.
#[async_trait(?Send)]
pub trait RowSource<R> {
    async fn fetch_rows(&self, ctx: &FetchContext) -> Result<Vec<R>, GatewayError>;
}

/// Outcome of a [`TablePage::refresh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// The snapshot was replaced with this many rows.
    Loaded(usize),
    /// The page scope moved on while the fetch was in flight; nothing was written.
    Discarded,
}

/// A filter engine bound to the lifetime of the page that shows it.
#[derive(Debug, Clone)]
pub struct TablePage<R> {
    engine: FilterEngine<R>,
    scope: PageScope,
}

impl<R: Row> TablePage<R> {
    /// Fails when the schema names a column `R` does not have.
    pub fn new(schema: FilterSchema, scope: PageScope) -> Result<Self, ConfigurationError> {
        schema.check_against::<R>()?;
        Ok(Self {
            engine: FilterEngine::new(schema),
            scope,
        })
    }

    pub fn engine(&self) -> &FilterEngine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut FilterEngine<R> {
        &mut self.engine
    }

    pub fn scope(&self) -> &PageScope {
        &self.scope
    }

    /// Fetches rows and loads them, unless the page scope moved on meanwhile.
    ///
    /// On failure the previous snapshot is left untouched and the error is returned
    /// for the page to surface.
    #[instrument(skip(self, source), fields(user = %ctx.user.username, year = ctx.year))]
    pub async fn refresh<S>(&mut self, source: &S, ctx: &FetchContext) -> Result<Refresh, GatewayError>
    where
        S: RowSource<R> + ?Sized,
    {
        let scope = self.scope.clone();
        match fetch_rows(&scope, source, ctx).await {
            Fetched::Rows { ticket, rows } => Ok(self.accept(&ticket, rows)),
            Fetched::Stale => Ok(Refresh::Discarded),
            Fetched::Failed(err) => Err(err),
        }
    }

    /// Loads rows fetched under `ticket` if it is still current.
    pub fn accept(&mut self, ticket: &Ticket, rows: Vec<R>) -> Refresh {
        if !ticket.is_current() {
            debug!(rows = rows.len(), "Dropping response for a stale page scope");
            return Refresh::Discarded;
        }
        let count = rows.len();
        self.engine.load(rows);
        info!(rows = count, "Table refreshed");
        Refresh::Loaded(count)
    }
}

/// What came back from one [`fetch_rows`] call.
#[derive(Debug)]
pub enum Fetched<R> {
    /// Rows to hand to [`TablePage::accept`] together with their ticket.
    Rows { ticket: Ticket, rows: Vec<R> },
    /// The fetch failed while its scope was still current.
    Failed(GatewayError),
    /// The scope moved on while the fetch was in flight; the outcome is irrelevant.
    Stale,
}

/// Fetches one row set under a fresh ticket from `scope`.
///
/// Split from [`TablePage::refresh`] so callers that cannot hold the page across the
/// await (a UI reducer) run the same steps and then `accept` the rows themselves.
pub async fn fetch_rows<R, S>(scope: &PageScope, source: &S, ctx: &FetchContext) -> Fetched<R>
where
    S: RowSource<R> + ?Sized,
{
    let ticket = scope.ticket();
    let result = source.fetch_rows(ctx).await;
    if !ticket.is_current() {
        debug!(ok = result.is_ok(), "Ignoring fetch outcome for a stale page scope");
        return Fetched::Stale;
    }
    match result {
        Ok(rows) => Fetched::Rows { ticket, rows },
        Err(err) => {
            log_failure("rows", &err);
            Fetched::Failed(err)
        }
    }
}

fn log_failure(what: &str, err: &GatewayError) {
    match err {
        GatewayError::Authentication(_) => warn!(what, error = %err, "Fetch rejected"),
        GatewayError::Network(_) => warn!(what, error = %err, "Fetch failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::DynamicRow;
    use std::cell::RefCell;

    struct CannedSource {
        responses: RefCell<Vec<Result<Vec<DynamicRow>, GatewayError>>>,
    }

    impl CannedSource {
        fn new(responses: Vec<Result<Vec<DynamicRow>, GatewayError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
            }
        }
    }

    #[async_trait(?Send)]
    impl RowSource<DynamicRow> for CannedSource {
        async fn fetch_rows(&self, _ctx: &FetchContext) -> Result<Vec<DynamicRow>, GatewayError> {
            self.responses.borrow_mut().remove(0)
        }
    }

    /// Cancels the scope while "in flight", like a page unmounting mid-request.
    struct UnmountingSource {
        scope: PageScope,
    }

    #[async_trait(?Send)]
    impl RowSource<DynamicRow> for UnmountingSource {
        async fn fetch_rows(&self, _ctx: &FetchContext) -> Result<Vec<DynamicRow>, GatewayError> {
            self.scope.cancel();
            Ok(vec![client("Late Corp")])
        }
    }

    fn client(name: &str) -> DynamicRow {
        DynamicRow::new().with("client_name", name).with("industry", "Retail")
    }

    fn page() -> TablePage<DynamicRow> {
        let schema = FilterSchema::new(["industry"], Some("client_name")).unwrap();
        TablePage::new(schema, PageScope::new()).unwrap()
    }

    fn ctx() -> FetchContext {
        FetchContext::new(UserContext::new("alice", "token-123"), 2024)
    }

    #[test]
    fn test_query_parameters() {
        assert_eq!(
            ctx().query(),
            vec![("username", "alice".to_string()), ("year", "2024".to_string())]
        );
    }

    #[tokio::test]
    async fn test_refresh_loads_rows() {
        let mut page = page();
        let source = CannedSource::new(vec![Ok(vec![client("Acme Corp"), client("Beta Inc")])]);

        let outcome = page.refresh(&source, &ctx()).await.unwrap();
        assert_eq!(outcome, Refresh::Loaded(2));
        assert_eq!(page.engine().filtered_len(), 2);
        assert_eq!(page.engine().distinct_values("industry").unwrap(), ["Retail".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let mut page = page();
        let source = CannedSource::new(vec![
            Ok(vec![client("Acme Corp")]),
            Err(GatewayError::Network("HTTP error: 500".to_string())),
            Err(GatewayError::Authentication("Unauthorized".to_string())),
        ]);

        page.refresh(&source, &ctx()).await.unwrap();

        let err = page.refresh(&source, &ctx()).await.unwrap_err();
        assert!(!err.is_authentication());
        assert_eq!(page.engine().rows(), [client("Acme Corp")]);

        let err = page.refresh(&source, &ctx()).await.unwrap_err();
        assert!(err.is_authentication());
        assert_eq!(page.engine().len(), 1);
    }

    #[tokio::test]
    async fn test_response_after_unmount_is_dropped() {
        let mut page = page();
        let source = UnmountingSource {
            scope: page.scope().clone(),
        };

        let outcome = page.refresh(&source, &ctx()).await.unwrap();
        assert_eq!(outcome, Refresh::Discarded);
        assert!(page.engine().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_rows_reports_stale_and_failed_outcomes() {
        let scope = PageScope::new();
        let unmounting = UnmountingSource { scope: scope.clone() };
        let fetched: Fetched<DynamicRow> = fetch_rows(&scope, &unmounting, &ctx()).await;
        assert!(matches!(fetched, Fetched::Stale));

        let scope = PageScope::new();
        let failing = CannedSource::new(vec![Err(GatewayError::Network("HTTP error: 502".to_string()))]);
        match fetch_rows::<DynamicRow, _>(&scope, &failing, &ctx()).await {
            Fetched::Failed(err) => assert_eq!(err, GatewayError::Network("HTTP error: 502".to_string())),
            other => panic!("expected a failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rows_fetched_before_a_renew_are_not_loaded() {
        let mut page = page();
        let source = CannedSource::new(vec![Ok(vec![client("Acme Corp")])]);

        let Fetched::Rows { ticket, rows } = fetch_rows::<DynamicRow, _>(page.scope(), &source, &ctx()).await else {
            panic!("expected rows");
        };
        // The user switched year before the rows reached the table.
        page.scope().renew();

        assert_eq!(page.accept(&ticket, rows), Refresh::Discarded);
        assert!(page.engine().is_empty());
    }

    #[test]
    fn test_new_rejects_columns_the_record_lacks() {
        let schema = FilterSchema::new(["industy"], Some("client_name")).unwrap();
        let err = TablePage::<common::Client>::new(schema, PageScope::new()).unwrap_err();
        assert_eq!(err, ConfigurationError::NoSuchColumn("industy".to_string()));
    }

    #[test]
    fn test_accept_with_renewed_scope() {
        let mut page = page();
        let stale = page.scope().ticket();
        page.scope().renew();

        assert_eq!(page.accept(&stale, vec![client("Old")]), Refresh::Discarded);
        let fresh = page.scope().ticket();
        assert_eq!(page.accept(&fresh, vec![client("New")]), Refresh::Loaded(1));
    }
}
