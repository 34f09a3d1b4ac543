//! Integration tests for the record store against a scripted source

use async_trait::async_trait;
use fairwatt::adapters::{MeterPage, MeterSource, PageRequest};
use fairwatt::core::filter::{SortKey, SortSpec};
use fairwatt::core::store::{Environment, FetchOutcome, LoadStatus, RecordStore};
use fairwatt::domain::{
    ApiError, ConsumptionPeriod, Employee, ExternalData, FairwattError, MeterId, MeterRecord,
    Result,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Source replaying queued responses and recording requested pages
#[derive(Default)]
struct ScriptedSource {
    responses: Mutex<VecDeque<Result<MeterPage>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl ScriptedSource {
    fn push(&self, response: Result<MeterPage>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MeterSource for ScriptedSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<MeterPage> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FairwattError::Other("no scripted response".to_string())))
    }

    async fn fetch_meter(&self, id: MeterId) -> Result<MeterRecord> {
        Err(FairwattError::NotFound(format!("Meter {id} not found")))
    }

    async fn save_note(&self, _id: MeterId, _note: &str) -> Result<()> {
        Ok(())
    }

    async fn questionable_clients(&self) -> Result<u64> {
        Ok(0)
    }

    async fn average_facility_consumption(&self, _period: ConsumptionPeriod) -> Result<f64> {
        Ok(0.0)
    }

    async fn average_flat_consumption(
        &self,
        _facility_id: i64,
        _period: ConsumptionPeriod,
    ) -> Result<f64> {
        Ok(0.0)
    }

    async fn monthly_consumption(&self) -> Result<Vec<f64>> {
        Ok(Vec::new())
    }

    async fn external_data(&self, _id: MeterId) -> Result<ExternalData> {
        Ok(ExternalData::default())
    }

    fn describe(&self) -> String {
        "scripted test source".to_string()
    }
}

fn page_of(ids: &[i64], total: usize) -> MeterPage {
    MeterPage {
        records: ids
            .iter()
            .map(|id| {
                MeterRecord::builder(*id)
                    .name(format!("Client {id}"))
                    .rating((*id * 7 % 100) as u8)
                    .build()
                    .unwrap()
            })
            .collect(),
        total: Some(total),
    }
}

fn store_over(source: Arc<ScriptedSource>) -> RecordStore {
    RecordStore::new(Environment::production(
        source,
        vec![Employee::new(1, "Ivanov Aleksey Petrovich")],
    ))
}

#[tokio::test]
async fn test_load_page_replaces_base_list() {
    let source = Arc::new(ScriptedSource::default());
    source.push(Ok(page_of(&[1, 2, 3], 30)));
    let mut store = store_over(source.clone());

    let outcome = store.load_page(PageRequest::new(1, 10)).await;

    assert_eq!(outcome, FetchOutcome::Applied { records: 3 });
    assert_eq!(store.status(), LoadStatus::Loaded);
    assert_eq!(store.total(), Some(30));
    assert_eq!(source.requests(), vec![PageRequest::new(1, 10)]);
}

#[tokio::test]
async fn test_failed_refresh_keeps_list_and_reports() {
    let source = Arc::new(ScriptedSource::default());
    source.push(Ok(page_of(&[1, 2], 2)));
    source.push(Err(ApiError::ConnectionFailed("connection refused".to_string()).into()));
    let mut store = store_over(source.clone());

    store.load_page(PageRequest::new(1, 25)).await;
    let outcome = store.refresh().await;

    assert!(matches!(outcome, FetchOutcome::Failed { .. }));
    assert_eq!(store.records().len(), 2);
    assert!(store.error().is_some());
    assert_eq!(
        source.requests(),
        vec![PageRequest::new(1, 25), PageRequest::new(1, 25)]
    );
}

#[tokio::test]
async fn test_failure_after_empty_page_keeps_loaded_status() {
    let source = Arc::new(ScriptedSource::default());
    source.push(Ok(MeterPage {
        records: Vec::new(),
        total: None,
    }));
    source.push(Err(ApiError::Timeout("30s".to_string()).into()));
    let mut store = store_over(source);

    store.load_page(PageRequest::new(4, 10)).await;
    assert_eq!(store.status(), LoadStatus::Loaded);

    let outcome = store.refresh().await;
    assert!(matches!(outcome, FetchOutcome::Failed { .. }));
    assert_eq!(store.status(), LoadStatus::Loaded);
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn test_failure_before_any_load_leaves_store_empty() {
    let source = Arc::new(ScriptedSource::default());
    source.push(Err(ApiError::Timeout("30s".to_string()).into()));
    let mut store = store_over(source);

    store.load_page(PageRequest::new(1, 10)).await;
    assert_eq!(store.status(), LoadStatus::Empty);
    assert!(store.error().is_some());
}

#[tokio::test]
async fn test_only_latest_issued_fetch_applies() {
    let source = Arc::new(ScriptedSource::default());
    let mut store = store_over(source.clone());

    // Page 1 is requested, then page 2 before page 1 answers
    let slow = store.begin_fetch(PageRequest::new(1, 10));
    let fast = store.begin_fetch(PageRequest::new(2, 10));

    assert_eq!(fast.request().page, 2);
    assert!(source.requests().is_empty());

    assert_eq!(
        store.complete_fetch(fast, Ok(page_of(&[11, 12], 20))),
        FetchOutcome::Applied { records: 2 }
    );
    assert_eq!(
        store.complete_fetch(slow, Ok(page_of(&[1, 2], 20))),
        FetchOutcome::Discarded
    );

    let ids: Vec<i64> = store.records().iter().map(|r| r.id.get()).collect();
    assert_eq!(ids, vec![11, 12]);
    assert_eq!(store.page(), PageRequest::new(2, 10));
}

#[tokio::test]
async fn test_stale_failure_does_not_raise_notice() {
    let source = Arc::new(ScriptedSource::default());
    let mut store = store_over(source);

    let stale = store.begin_fetch(PageRequest::new(1, 10));
    let latest = store.begin_fetch(PageRequest::new(1, 10));
    store.complete_fetch(latest, Ok(page_of(&[1], 1)));

    let outcome = store.complete_fetch(stale, Err(ApiError::Timeout("30s".to_string()).into()));
    assert_eq!(outcome, FetchOutcome::Discarded);
    assert!(store.error().is_none());
}

#[tokio::test]
async fn test_view_state_reset_after_page_change() {
    let source = Arc::new(ScriptedSource::default());
    source.push(Ok(page_of(&[1, 2, 3], 6)));
    source.push(Ok(page_of(&[4, 5, 6], 6)));
    let mut store = store_over(source);

    store.load_page(PageRequest::new(1, 10)).await;
    store.select(MeterId::new(1)).unwrap();
    store.set_sort(SortSpec::descending(SortKey::Rating));

    store.load_page(PageRequest::new(2, 10)).await;

    assert!(store.selection().is_empty());
    assert_eq!(store.sort(), SortSpec::default());
    assert_eq!(store.visible().len(), 3);
}

#[tokio::test]
async fn test_debug_environment_serves_fixture() {
    let mut store = RecordStore::new(Environment::debug());
    store.load_page(PageRequest::new(1, 10)).await;

    assert!(store.environment().is_debug());
    assert_eq!(store.records().len(), 8);
    assert!(!store.environment().staff.is_empty());
}
