//! Observable journey results.
//!
//! Holds the journey list and the user's filter choices, recomputes the
//! visible list whenever any of them changes, and publishes each new list
//! on a watch channel.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::domain::{Journey, TrainClass};
use crate::form::SelectionEvent;

use super::filter::{FilterCriteria, SortKey, apply};

/// The journey list of one results view.
#[derive(Debug)]
pub struct JourneyResults {
    journeys: Vec<Journey>,
    criteria: FilterCriteria,
    sort: SortKey,
    visible: Arc<Vec<Journey>>,
    publisher: watch::Sender<Arc<Vec<Journey>>>,
    recomputations: u64,
}

impl JourneyResults {
    /// Create a view over `journeys` with no filters and no sorting.
    pub fn new(journeys: Vec<Journey>) -> Self {
        let visible = Arc::new(apply(&journeys, &FilterCriteria::default(), SortKey::None));
        let (publisher, _) = watch::channel(Arc::clone(&visible));
        Self {
            journeys,
            criteria: FilterCriteria::default(),
            sort: SortKey::None,
            visible,
            publisher,
            recomputations: 0,
        }
    }

    /// Receive every recomputed list.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Journey>>> {
        self.publisher.subscribe()
    }

    /// The filtered, sorted list.
    pub fn visible(&self) -> &[Journey] {
        &self.visible
    }

    /// Every journey, unfiltered.
    pub fn all(&self) -> &[Journey] {
        &self.journeys
    }

    /// Active filters.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Active sort key.
    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    /// How many times the visible list has been recomputed.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Replace the journey list.
    pub fn set_journeys(&mut self, journeys: Vec<Journey>) {
        self.journeys = journeys;
        self.recompute();
    }

    /// Replace all filters at once.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if self.criteria != criteria {
            self.criteria = criteria;
            self.recompute();
        }
    }

    /// Set or remove the transfer limit.
    pub fn set_max_transfers(&mut self, max_transfers: Option<u32>) {
        if self.criteria.max_transfers != max_transfers {
            self.criteria.max_transfers = max_transfers;
            self.recompute();
        }
    }

    /// Add the class to the filter, or remove it if already present.
    pub fn toggle_class(&mut self, class: TrainClass) {
        if !self.criteria.classes.remove(&class) {
            self.criteria.classes.insert(class);
        }
        self.recompute();
    }

    /// Change the sort order.
    pub fn set_sort(&mut self, sort: SortKey) {
        if self.sort != sort {
            self.sort = sort;
            self.recompute();
        }
    }

    /// Reset every filter and the sort key in a single update.
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.sort = SortKey::None;
        self.recompute();
    }

    /// Pick a visible journey by train number.
    pub fn select(&self, train_number: &str) -> Option<SelectionEvent> {
        self.visible
            .iter()
            .find(|j| j.train_number == train_number)
            .map(|j| SelectionEvent::Journey {
                train_number: j.train_number.clone(),
            })
    }

    fn recompute(&mut self) {
        self.visible = Arc::new(apply(&self.journeys, &self.criteria, self.sort));
        self.recomputations += 1;
        debug!(
            total = self.journeys.len(),
            visible = self.visible.len(),
            sort = %self.sort,
            "journey results recomputed"
        );
        self.publisher.send_replace(Arc::clone(&self.visible));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journeys::filter::fixtures::pair;

    fn fares(journeys: &[Journey]) -> Vec<f64> {
        journeys.iter().map(|j| j.fare).collect()
    }

    #[test]
    fn starts_unfiltered() {
        let results = JourneyResults::new(pair());
        assert_eq!(results.visible(), pair().as_slice());
        assert_eq!(results.sort_key(), SortKey::None);
        assert!(results.criteria().is_unrestricted());
    }

    #[test]
    fn sort_change_recomputes_and_publishes() {
        let mut results = JourneyResults::new(pair());
        let mut rx = results.subscribe();

        results.set_sort(SortKey::Cheapest);
        assert!(rx.has_changed().unwrap());
        assert_eq!(fares(&rx.borrow_and_update()), vec![620.0, 850.0]);
        assert_eq!(results.recomputations(), 1);

        // Setting the same key again is not a change
        results.set_sort(SortKey::Cheapest);
        assert!(!rx.has_changed().unwrap());
        assert_eq!(results.recomputations(), 1);
    }

    #[test]
    fn max_transfers_filters() {
        let mut results = JourneyResults::new(pair());
        results.set_max_transfers(Some(0));
        assert_eq!(results.visible().len(), 1);
        assert_eq!(results.visible()[0].transfers, 0);
    }

    #[test]
    fn toggle_class_adds_and_removes() {
        let mut results = JourneyResults::new(pair());
        results.toggle_class(TrainClass::Sleeper);
        assert_eq!(results.visible().len(), 1);
        results.toggle_class(TrainClass::Sleeper);
        assert_eq!(results.visible().len(), 2);
    }

    #[test]
    fn clear_filters_is_one_update() {
        let mut results = JourneyResults::new(pair());
        results.set_max_transfers(Some(0));
        results.toggle_class(TrainClass::Ac);
        results.set_sort(SortKey::Comfort);
        assert!(results.visible().is_empty());

        let mut rx = results.subscribe();
        let before = results.recomputations();
        results.clear_filters();

        assert_eq!(results.recomputations(), before + 1);
        assert!(rx.has_changed().unwrap());
        let published = rx.borrow_and_update().clone();
        assert_eq!(
            published.as_slice(),
            apply(&pair(), &FilterCriteria::default(), SortKey::None).as_slice()
        );
        assert!(results.criteria().is_unrestricted());
        assert_eq!(results.sort_key(), SortKey::None);
    }

    #[test]
    fn new_journeys_keep_criteria() {
        let mut results = JourneyResults::new(Vec::new());
        results.set_sort(SortKey::Cheapest);
        results.set_journeys(pair());
        assert_eq!(fares(results.visible()), vec![620.0, 850.0]);
        assert_eq!(results.all().len(), 2);
    }

    #[test]
    fn select_visible_journey() {
        let mut results = JourneyResults::new(pair());
        assert_eq!(
            results.select("12138"),
            Some(SelectionEvent::Journey {
                train_number: "12138".into()
            })
        );

        results.set_max_transfers(Some(0));
        assert_eq!(results.select("12952"), None);
    }
}
