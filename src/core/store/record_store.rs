//! Record store
//!
//! Owns the base list of the current page together with the UI state derived
//! from it: filter criteria, sort, selection, load status and the dismissible
//! error notice. Every other component reads the base list through here.
//!
//! Fetches are tagged with monotonically increasing tickets. A response is
//! applied only when it carries the latest ticket issued, so a slow answer to
//! an earlier request can never overwrite a newer page.

use super::environment::Environment;
use crate::adapters::{MeterPage, PageRequest};
use crate::core::export::{
    export_records, ExportArtifact, ExportFormat, ExportNaming, ExportProfile,
};
use crate::core::filter::{apply, FilterCriteria, RatingBounds, SortSpec};
use crate::core::selection::{SelectionSet, VisitPlan};
use crate::domain::{Employee, FairwattError, MeterId, MeterRecord, Result};
use chrono::{DateTime, Utc};

/// Lifecycle of the base list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing fetched yet
    Empty,
    /// A fetch is in flight
    Loading,
    /// A page is displayed
    Loaded,
}

/// Identifies one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    request: PageRequest,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> PageRequest {
        self.request
    }
}

/// What happened to a fetch response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The base list was replaced
    Applied { records: usize },
    /// A newer fetch was issued in the meantime; nothing changed
    Discarded,
    /// The fetch failed; the previous base list is kept
    Failed { message: String },
}

/// Current page of meters plus its view state
#[derive(Debug)]
pub struct RecordStore {
    env: Environment,
    records: Vec<MeterRecord>,
    total: Option<usize>,
    page: PageRequest,
    criteria: FilterCriteria,
    sort: SortSpec,
    selection: SelectionSet,
    status: LoadStatus,
    error: Option<String>,
    issued: u64,
    has_loaded: bool,
}

impl RecordStore {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            records: Vec::new(),
            total: None,
            page: PageRequest::default(),
            criteria: FilterCriteria::default(),
            sort: SortSpec::default(),
            selection: SelectionSet::new(),
            status: LoadStatus::Empty,
            error: None,
            issued: 0,
            has_loaded: false,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Issues a ticket for a new fetch of `request`
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self, request: PageRequest) -> FetchTicket {
        self.issued += 1;
        self.status = LoadStatus::Loading;
        tracing::debug!(
            ticket = self.issued,
            page = request.page,
            per_page = request.per_page,
            "Fetch issued"
        );
        FetchTicket {
            seq: self.issued,
            request,
        }
    }

    /// Applies the response of the fetch identified by `ticket`
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<MeterPage>,
    ) -> FetchOutcome {
        if ticket.seq != self.issued {
            tracing::warn!(
                ticket = ticket.seq,
                latest = self.issued,
                "Discarding response of a superseded fetch"
            );
            return FetchOutcome::Discarded;
        }

        match result {
            Ok(page) => {
                self.records = page.records;
                self.total = page.total;
                self.page = ticket.request;
                self.criteria.reset_for(&self.records);
                self.sort = SortSpec::default();
                self.selection.clear();
                self.status = LoadStatus::Loaded;
                self.error = None;
                self.has_loaded = true;

                tracing::info!(
                    ticket = ticket.seq,
                    page = self.page.page,
                    records = self.records.len(),
                    "Base list replaced"
                );
                FetchOutcome::Applied {
                    records: self.records.len(),
                }
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to fetch meter page");
                let message = e.user_message();
                self.status = if self.has_loaded {
                    LoadStatus::Loaded
                } else {
                    LoadStatus::Empty
                };
                self.error = Some(message.clone());
                FetchOutcome::Failed { message }
            }
        }
    }

    /// Fetches `request` from the environment's source and applies it
    pub async fn load_page(&mut self, request: PageRequest) -> FetchOutcome {
        let ticket = self.begin_fetch(request);
        let source = self.env.source.clone();
        let result = source.fetch_page(request).await;
        self.complete_fetch(ticket, result)
    }

    /// Fetches the current page again
    pub async fn refresh(&mut self) -> FetchOutcome {
        self.load_page(self.page).await
    }

    /// The unfiltered, unsorted base list
    pub fn records(&self) -> &[MeterRecord] {
        &self.records
    }

    pub fn find(&self, id: MeterId) -> Option<&MeterRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Total across all pages, when the source reported it
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Error notice of the last failed fetch
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Restores the full-range criteria of the current base list
    pub fn reset_filters(&mut self) {
        self.criteria.reset_for(&self.records);
    }

    /// Slider range for the rating filter
    pub fn rating_bounds(&self) -> RatingBounds {
        RatingBounds::of(&self.records)
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    /// Filtered and sorted view of the base list
    pub fn visible(&self) -> Vec<&MeterRecord> {
        apply(&self.records, &self.criteria, &self.sort)
    }

    fn visible_ids(&self) -> Vec<MeterId> {
        self.visible().iter().map(|r| r.id).collect()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Adds `id` to the selection
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `id` is not part of the base list.
    pub fn select(&mut self, id: MeterId) -> Result<bool> {
        if self.find(id).is_none() {
            return Err(FairwattError::NotFound(format!(
                "Meter {id} is not on the current page"
            )));
        }
        Ok(self.selection.add(id))
    }

    pub fn deselect(&mut self, id: MeterId) -> bool {
        self.selection.remove(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selects every visible record, or deselects them when all are selected
    pub fn toggle_all_visible(&mut self) {
        let visible = self.visible_ids();
        self.selection.toggle_all(&visible);
    }

    /// Flips the selection of every visible record
    pub fn invert_visible(&mut self) {
        let visible = self.visible_ids();
        self.selection.invert(&visible);
    }

    /// Builds a visit plan from the selection and clears it
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving the selection untouched, when
    /// nothing is selected or no staff member is given.
    pub fn build_visit_plan(&mut self, employee: Option<&Employee>) -> Result<VisitPlan> {
        let plan = VisitPlan::build(&self.records, &self.selection, employee)?;
        self.selection.clear();
        tracing::info!(
            employee = %plan.employee.id,
            stops = plan.stops.len(),
            "Visit plan built"
        );
        Ok(plan)
    }

    /// Serializes the visible records
    pub fn export(
        &self,
        format: ExportFormat,
        profile: ExportProfile,
        naming: &ExportNaming,
        now: DateTime<Utc>,
    ) -> Result<ExportArtifact> {
        export_records(&self.visible(), format, profile, naming, now)
    }
}
