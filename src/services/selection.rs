//! Cascading hierarchy selection

use std::sync::Arc;

use crate::{
    config::PagingConfig,
    error::{CoreError, CoreResult, Signal},
    models::{Entity, FetchContext, GroupCode, Hierarchy, SelectionPath, SelectionSnapshot},
    ports::{EntityFetchPort, NotificationPort},
    services::paging::PagedListCache,
};

/// Owns the hierarchy filter of one picker and keeps its dependent lists
/// consistent with it.
///
/// Region and subregion lists load in full per parent; division candidates
/// paginate through a [`PagedListCache`]. Every transition clears the lists
/// of the tiers it invalidates before any fetch starts, so a stale list is
/// never visible against a mismatched ancestor. A failed child fetch never
/// reverts the parent selection.
pub struct CascadingSelectionController {
    fetcher: Arc<dyn EntityFetchPort>,
    notifier: Arc<dyn NotificationPort>,
    hierarchy: Hierarchy,
    tier: GroupCode,
    path: SelectionPath,
    regions: Vec<Entity>,
    subregions: Vec<Entity>,
    partners: Vec<Entity>,
    candidates: PagedListCache,
    full_list_take: usize,
}

impl CascadingSelectionController {
    /// Create a controller in division-picking mode with nothing selected.
    /// No fetch happens until [`set_tier`](Self::set_tier) or a `set_*`
    /// transition runs.
    pub fn new(
        hierarchy: Hierarchy,
        fetcher: Arc<dyn EntityFetchPort>,
        notifier: Arc<dyn NotificationPort>,
        paging: &PagingConfig,
    ) -> Self {
        let candidates =
            PagedListCache::new(fetcher.clone(), notifier.clone(), paging.page_size);
        Self {
            fetcher,
            notifier,
            hierarchy,
            tier: GroupCode::Division,
            path: SelectionPath::default(),
            regions: Vec::new(),
            subregions: Vec::new(),
            partners: Vec::new(),
            candidates,
            full_list_take: paging.full_list_take,
        }
    }

    /// Switch picker mode (which tier the operator ultimately selects).
    ///
    /// Clears the whole path and every cached list, then runs the initial
    /// fetch for the mode: the partner list for partner mode, the region
    /// list otherwise.
    pub async fn set_tier(&mut self, tier: GroupCode) -> CoreResult<()> {
        if tier == GroupCode::Unknown {
            return Err(CoreError::InvalidAncestor("unknown tier".to_string()));
        }
        tracing::info!("Picker switched to {} mode", tier);

        self.tier = tier;
        self.path = SelectionPath::default();
        self.regions.clear();
        self.subregions.clear();
        self.partners.clear();
        self.candidates.clear();

        match tier {
            GroupCode::Partner => {
                self.partners = self.load_full(FetchContext::Partners).await;
            }
            _ => {
                self.regions = self.load_full(FetchContext::Regions).await;
            }
        }
        Ok(())
    }

    /// Select a region.
    ///
    /// Descendant selections and lists are cleared first; then the
    /// mode-appropriate child lists are fetched under the new scope.
    pub async fn set_region(&mut self, id: i64) -> CoreResult<()> {
        if self.tier == GroupCode::Partner {
            return Err(CoreError::InvalidAncestor(
                "partner mode has no region tier".to_string(),
            ));
        }
        tracing::info!("Region {} selected", id);

        self.path.region_id = Some(id);
        self.path.subregion_id = None;
        self.path.division_id = None;
        self.subregions.clear();
        self.candidates.clear();

        if self.tier == GroupCode::Region {
            // Terminal pick in region mode
            return Ok(());
        }

        if self.hierarchy == Hierarchy::FourTier {
            self.subregions = self
                .load_full(FetchContext::Subregions { region_id: id })
                .await;
        }

        if self.tier == GroupCode::Division {
            self.candidates.reset(FetchContext::Divisions {
                region_id: id,
                subregion_id: None,
            });
            self.candidates.load_page().await;
        }
        Ok(())
    }

    /// Select a subregion under the current region
    pub async fn set_subregion(&mut self, id: i64) -> CoreResult<()> {
        if self.hierarchy == Hierarchy::ThreeTier {
            return Err(CoreError::InvalidAncestor(
                "hierarchy has no subregion tier".to_string(),
            ));
        }
        let Some(region_id) = self.path.region_id else {
            return Err(CoreError::InvalidAncestor(
                "no region selected".to_string(),
            ));
        };
        tracing::info!("Subregion {} selected under region {}", id, region_id);

        self.path.subregion_id = Some(id);
        self.path.division_id = None;
        self.candidates.clear();

        if self.tier == GroupCode::Division {
            self.candidates.reset(FetchContext::Divisions {
                region_id,
                subregion_id: Some(id),
            });
            self.candidates.load_page().await;
        }
        Ok(())
    }

    /// Select a division; terminal for this controller
    pub fn set_division(&mut self, id: i64) -> CoreResult<()> {
        let ancestor_ok = match self.hierarchy {
            Hierarchy::FourTier => self.path.subregion_id.is_some(),
            Hierarchy::ThreeTier => self.path.region_id.is_some(),
        };
        if self.tier != GroupCode::Division || !ancestor_ok {
            return Err(CoreError::InvalidAncestor(
                "division requires its ancestor tiers".to_string(),
            ));
        }
        self.path.division_id = Some(id);
        Ok(())
    }

    /// Keyword search over the division candidates in the current scope
    pub async fn search_divisions(&mut self, keyword: &str) {
        self.candidates.search(keyword).await;
    }

    /// Load the next division candidate page (scroll-near-bottom)
    pub async fn load_more_divisions(&mut self) {
        self.candidates.load_page().await;
    }

    /// Keep externally preselected divisions visible in the candidate list
    pub fn reconcile_preselected(&mut self, preselected: &[Entity]) {
        self.candidates.reconcile_preselected(preselected);
    }

    /// Current picker state for persistence
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            tier: self.tier,
            path: self.path,
        }
    }

    /// Replay a persisted selection, refetching every dependent list.
    /// Stops at the first tier the stored path cannot reach anymore.
    pub async fn restore(&mut self, snapshot: &SelectionSnapshot) -> CoreResult<()> {
        self.set_tier(snapshot.tier).await?;
        if let Some(region_id) = snapshot.path.region_id {
            self.set_region(region_id).await?;
        }
        if let Some(subregion_id) = snapshot.path.subregion_id {
            self.set_subregion(subregion_id).await?;
        }
        if let Some(division_id) = snapshot.path.division_id {
            self.set_division(division_id)?;
        }
        Ok(())
    }

    pub fn tier(&self) -> GroupCode {
        self.tier
    }

    pub fn hierarchy(&self) -> Hierarchy {
        self.hierarchy
    }

    pub fn path(&self) -> &SelectionPath {
        &self.path
    }

    pub fn regions(&self) -> &[Entity] {
        &self.regions
    }

    pub fn subregions(&self) -> &[Entity] {
        &self.subregions
    }

    pub fn partners(&self) -> &[Entity] {
        &self.partners
    }

    pub fn candidates(&self) -> &PagedListCache {
        &self.candidates
    }

    /// Full, unpaginated load for the non-division tiers. Soft-fails to an
    /// empty list like the paged loads.
    async fn load_full(&self, context: FetchContext) -> Vec<Entity> {
        match self
            .fetcher
            .fetch_page(&context, 0, self.full_list_take)
            .await
        {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!("Fetch failed for {}: {}", context, err);
                self.notifier.notify(&Signal::FetchFailed {
                    context: context.to_string(),
                    message: err.to_string(),
                });
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::fetch::{FetchError, MockEntityFetchPort};
    use crate::services::testutil::{division, RecordingNotifier};
    use crate::SignalCode;

    const PAGING: PagingConfig = PagingConfig {
        page_size: 10,
        full_list_take: 500,
    };

    fn subregion(id: i64, name: &str) -> Entity {
        Entity::new(id, name, GroupCode::Subregion)
    }

    fn controller(
        hierarchy: Hierarchy,
        fetch: MockEntityFetchPort,
        notifier: Arc<RecordingNotifier>,
    ) -> CascadingSelectionController {
        CascadingSelectionController::new(hierarchy, Arc::new(fetch), notifier, &PAGING)
    }

    #[tokio::test]
    async fn set_region_clears_descendants_before_refetching() {
        let mut fetch = MockEntityFetchPort::new();
        fetch
            .expect_fetch_page()
            .withf(|ctx, _, _| matches!(ctx, FetchContext::Subregions { .. }))
            .returning(|ctx, _, _| {
                let FetchContext::Subregions { region_id } = ctx else {
                    unreachable!()
                };
                Ok(vec![subregion(region_id * 10, "Sub-office")])
            });
        fetch
            .expect_fetch_page()
            .withf(|ctx, _, _| matches!(ctx, FetchContext::Divisions { .. }))
            .returning(|ctx, _, _| {
                let FetchContext::Divisions { region_id, .. } = ctx else {
                    unreachable!()
                };
                Ok(vec![division(region_id * 100, "School")])
            });

        let notifier = Arc::new(RecordingNotifier::default());
        let mut ctrl = controller(Hierarchy::FourTier, fetch, notifier);

        ctrl.set_region(1).await.unwrap();
        ctrl.set_subregion(10).await.unwrap();
        ctrl.set_division(100).unwrap();

        ctrl.set_region(2).await.unwrap();

        assert_eq!(ctrl.path().region_id, Some(2));
        assert_eq!(ctrl.path().subregion_id, None);
        assert_eq!(ctrl.path().division_id, None);
        assert!(ctrl.path().is_consistent(Hierarchy::FourTier));

        let subs: Vec<i64> = ctrl.subregions().iter().map(|e| e.id).collect();
        assert_eq!(subs, vec![20], "subregion list rescoped to the new region");
        let candidates: Vec<i64> = ctrl.candidates().items().map(|e| e.id).collect();
        assert_eq!(candidates, vec![200], "no stale candidates survive");
    }

    #[tokio::test]
    async fn failed_child_fetch_keeps_the_parent_selection() {
        let mut fetch = MockEntityFetchPort::new();
        fetch
            .expect_fetch_page()
            .withf(|ctx, _, _| matches!(ctx, FetchContext::Subregions { .. }))
            .returning(|_, _, _| Ok(vec![subregion(11, "Sub-office")]));
        fetch
            .expect_fetch_page()
            .withf(|ctx, _, _| matches!(ctx, FetchContext::Divisions { .. }))
            .returning(|_, _, _| Err(FetchError::Transport("timeout".to_string())));

        let notifier = Arc::new(RecordingNotifier::default());
        let mut ctrl = controller(Hierarchy::FourTier, fetch, notifier.clone());

        ctrl.set_region(1).await.unwrap();

        assert_eq!(ctrl.path().region_id, Some(1), "parent selection survives");
        assert!(ctrl.candidates().is_empty());
        assert!(!ctrl.candidates().has_more());
        assert_eq!(notifier.codes(), vec![SignalCode::FetchFailure]);
    }

    #[tokio::test]
    async fn descendant_selection_requires_an_ancestor() {
        let fetch = MockEntityFetchPort::new();
        let notifier = Arc::new(RecordingNotifier::default());
        let mut ctrl = controller(Hierarchy::FourTier, fetch, notifier);

        let err = ctrl.set_subregion(10).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidAncestor(_)));
        let err = ctrl.set_division(100).unwrap_err();
        assert!(matches!(err, CoreError::InvalidAncestor(_)));
        assert!(ctrl.path().is_empty(), "rejected calls are no-ops");
    }

    #[tokio::test]
    async fn three_tier_goes_straight_from_region_to_division() {
        let mut fetch = MockEntityFetchPort::new();
        fetch
            .expect_fetch_page()
            .withf(|ctx, _, _| matches!(ctx, FetchContext::Divisions { .. }))
            .returning(|_, _, _| Ok(vec![division(100, "School")]));

        let notifier = Arc::new(RecordingNotifier::default());
        let mut ctrl = controller(Hierarchy::ThreeTier, fetch, notifier);

        ctrl.set_region(1).await.unwrap();
        ctrl.set_division(100).unwrap();
        assert_eq!(ctrl.path().division_id, Some(100));

        let err = ctrl.set_subregion(10).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidAncestor(_)));
    }

    #[tokio::test]
    async fn partner_mode_loads_the_partner_list_once_in_full() {
        let mut fetch = MockEntityFetchPort::new();
        fetch
            .expect_fetch_page()
            .withf(|ctx, skip, take| {
                matches!(ctx, FetchContext::Partners) && *skip == 0 && *take == 500
            })
            .times(1)
            .returning(|_, _, _| Ok(vec![Entity::new(5, "City Archive", GroupCode::Partner)]));

        let notifier = Arc::new(RecordingNotifier::default());
        let mut ctrl = controller(Hierarchy::FourTier, fetch, notifier);

        ctrl.set_tier(GroupCode::Partner).await.unwrap();

        assert!(ctrl.path().is_empty());
        assert_eq!(ctrl.partners().len(), 1);
        assert!(ctrl.candidates().is_empty());

        let err = ctrl.set_region(1).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidAncestor(_)));
    }

    #[tokio::test]
    async fn restore_replays_a_persisted_selection() {
        let mut fetch = MockEntityFetchPort::new();
        fetch
            .expect_fetch_page()
            .withf(|ctx, _, _| matches!(ctx, FetchContext::Regions))
            .returning(|_, _, _| Ok(vec![Entity::new(1, "North", GroupCode::Region)]));
        fetch
            .expect_fetch_page()
            .withf(|ctx, _, _| matches!(ctx, FetchContext::Subregions { .. }))
            .returning(|_, _, _| Ok(vec![subregion(11, "Sub-office")]));
        fetch
            .expect_fetch_page()
            .withf(|ctx, _, _| matches!(ctx, FetchContext::Divisions { .. }))
            .returning(|_, _, _| Ok(vec![division(21, "School")]));

        let notifier = Arc::new(RecordingNotifier::default());
        let mut ctrl = controller(Hierarchy::FourTier, fetch, notifier);

        let snapshot = SelectionSnapshot {
            tier: GroupCode::Division,
            path: SelectionPath {
                region_id: Some(1),
                subregion_id: Some(11),
                division_id: Some(21),
            },
        };
        ctrl.restore(&snapshot).await.unwrap();

        assert_eq!(ctrl.snapshot(), snapshot);
        assert!(ctrl.candidates().contains(21));
    }
}
