//! Store operations applied to the screen model.
//!
//! `Session` is the single place where asynchronous store results meet the
//! [`MapModel`]. It owns the injected store rather than reaching for a global
//! client. Everything runs on one thread: the model lives in a `RefCell` and
//! no borrow is held across an `.await`, so overlapping operations interleave
//! freely and the last fetch to complete decides the station list.

use crate::location::{Geolocation, LocationOptions};
use crate::model::{MapModel, DEFAULT_AUTHOR, DEFAULT_CENTER};
use chrono::{Local, Utc};
use fp_core::station::STATIONS_TABLE;
use fp_core::{NewStation, StationPatch, StationStatus};
use fp_store::{ListQuery, StationChange, StationStore, SubscriptionHandle};
use fp_utils::dates::format_clock;
use fp_utils::geo::LatLon;
use futures::channel::mpsc::{unbounded, UnboundedReceiver};
use rand::Rng;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Notes attached to stations created from the app.
const GENERATED_NOTES: &str = "Criado pelo app MVP";

/// Maximum jitter, in degrees, around the default centre for generated stations.
const GENERATED_SPREAD: f64 = 0.02;

/// A station placed at a random spot near the default centre.
pub fn random_station<R: Rng>(rng: &mut R, clock: &str) -> NewStation {
    let mut offset = || (rng.gen::<f64>() - 0.5) * GENERATED_SPREAD;
    NewStation {
        title: format!("Comedouro {}", clock),
        status: StationStatus::Ok,
        latitude: DEFAULT_CENTER.latitude + offset(),
        longitude: DEFAULT_CENTER.longitude + offset(),
        notes: Some(GENERATED_NOTES.to_string()),
    }
}

pub struct Session<S: StationStore> {
    store: Rc<S>,
    model: RefCell<MapModel>,
    changes: RefCell<Option<UnboundedReceiver<StationChange>>>,
    subscription: SubscriptionHandle,
    author: String,
}

impl<S: StationStore> Session<S> {
    /// Start a session and subscribe to station changes.
    pub fn new(store: Rc<S>) -> Self {
        let (sender, receiver) = unbounded();
        let subscription = store.subscribe(STATIONS_TABLE, sender);
        Self {
            store,
            model: RefCell::new(MapModel::new()),
            changes: RefCell::new(Some(receiver)),
            subscription,
            author: DEFAULT_AUTHOR.to_string(),
        }
    }

    /// Name used on comments written in this session.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn model(&self) -> Ref<'_, MapModel> {
        self.model.borrow()
    }

    /// Apply a synchronous transition to the model.
    pub fn update<R>(&self, f: impl FnOnce(&mut MapModel) -> R) -> R {
        f(&mut self.model.borrow_mut())
    }

    /// Fetch the full station list. Failures land in the model's error.
    pub async fn refresh(&self) {
        self.update(MapModel::begin_refresh);
        let result = self.store.list(&ListQuery::default()).await;
        match &result {
            Ok(stations) => log::info!("loaded {} feeding points", stations.len()),
            Err(e) => log::error!("failed to load feeding points: {}", e),
        }
        self.update(|model| model.finish_refresh(result));
    }

    /// Insert a generated station, then refetch. Returns true on success.
    pub async fn add_random_station<R: Rng>(&self, rng: &mut R) -> bool {
        let station = random_station(rng, &format_clock(&Local::now().time()));
        self.update(MapModel::begin_insert);
        let result = self.store.insert(&station).await;
        if let Err(e) = &result {
            log::error!("failed to add feeding point: {}", e);
        }
        let inserted = self.update(|model| model.finish_insert(result));
        if inserted {
            self.refresh().await;
        }
        inserted
    }

    /// Mark a station as refilled. Returns true on success.
    pub async fn refill(&self, station_id: &str) -> bool {
        let result = self.store.update(station_id, &StationPatch::refilled()).await;
        if let Err(e) = &result {
            log::error!("failed to refill {}: {}", station_id, e);
        }
        self.update(|model| model.finish_refill(station_id, result))
    }

    /// Add a session-only comment. Blank text is ignored.
    pub fn add_comment(&self, station_id: &str, text: &str) -> bool {
        let now = Utc::now();
        let author = self.author.clone();
        self.update(|model| model.add_comment(station_id, text, &author, &now))
    }

    pub fn select(&self, station_id: &str) {
        self.update(|model| model.select(station_id));
    }

    /// The sheet closed itself.
    pub fn close_sheet(&self) {
        self.update(MapModel::deselect);
    }

    /// Ask the provider for the device position and store whatever comes back.
    pub async fn locate<G: Geolocation>(&self, provider: &G) -> Option<LatLon> {
        let location = provider.current_position(&LocationOptions::default()).await;
        if location.is_none() {
            log::info!("device location unavailable");
        }
        self.update(|model| model.set_location(location));
        location
    }

    /// Hand the change feed to an event loop. Only the first call gets it.
    pub fn take_change_feed(&self) -> Option<UnboundedReceiver<StationChange>> {
        self.changes.borrow_mut().take()
    }

    /// Consume queued change notifications without waiting.
    pub fn drain_changes(&self) -> usize {
        let mut changes = self.changes.borrow_mut();
        let Some(receiver) = changes.as_mut() else {
            return 0;
        };
        let mut count = 0;
        while let Ok(Some(_)) = receiver.try_next() {
            count += 1;
        }
        count
    }

    /// Refetch once if any change arrived since the last call.
    pub async fn sync_changes(&self) -> bool {
        if self.drain_changes() == 0 {
            return false;
        }
        self.refresh().await;
        true
    }
}

impl<S: StationStore> Drop for Session<S> {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{FixedLocation, NoLocation};
    use crate::view::format_distance;
    use chrono::TimeZone;
    use fp_core::Station;
    use fp_store::{LocalStore, StoreError};
    use futures::executor::block_on;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn station(id: &str, status: StationStatus) -> Station {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        Station {
            id: id.to_string(),
            title: format!("Comedouro {}", id),
            status,
            latitude: -23.55,
            longitude: -46.63,
            notes: Some("junto ao muro".to_string()),
            created_at: at,
            updated_at: at,
        }
    }

    fn session() -> Session<LocalStore> {
        let store = LocalStore::open_in_memory().unwrap();
        store
            .import(&[
                station("w", StationStatus::NeedsWater),
                station("f", StationStatus::NeedsFood),
            ])
            .unwrap();
        Session::new(Rc::new(store))
    }

    /// A store whose every call fails.
    struct Offline;

    impl StationStore for Offline {
        async fn list(&self, _query: &ListQuery) -> Result<Vec<Station>, StoreError> {
            Err(StoreError::Status {
                code: 503,
                message: "offline".to_string(),
            })
        }

        async fn insert(&self, _station: &NewStation) -> Result<Station, StoreError> {
            Err(StoreError::Decode("offline".to_string()))
        }

        async fn update(&self, id: &str, _patch: &StationPatch) -> Result<(), StoreError> {
            Err(StoreError::NotFound(id.to_string()))
        }

        fn subscribe(&self, _table: &str, _sender: fp_store::ChangeSender) -> SubscriptionHandle {
            SubscriptionHandle(0)
        }

        fn unsubscribe(&self, _handle: SubscriptionHandle) {}
    }

    #[test]
    fn refresh_loads_stations() {
        let session = session();
        assert!(session.model().is_loading());
        block_on(session.refresh());
        let model = session.model();
        assert!(!model.is_loading());
        assert_eq!(model.stations().len(), 2);
        assert_eq!(model.error(), None);
    }

    #[test]
    fn refresh_failure_is_displayed_not_retried() {
        let session = Session::new(Rc::new(Offline));
        block_on(session.refresh());
        let model = session.model();
        assert_eq!(model.error(), Some("backend returned 503: offline"));
        assert!(model.stations().is_empty());
    }

    #[test]
    fn refill_updates_local_and_backend() {
        let session = session();
        block_on(session.refresh());
        assert!(block_on(session.refill("w")));

        let local = session.model().station("w").unwrap().clone();
        let expected = station("w", StationStatus::Ok);
        assert_eq!(local, expected);

        let backend = block_on(session.store().list(&ListQuery::default())).unwrap();
        let stored = backend.iter().find(|s| s.id == "w").unwrap();
        assert_eq!(*stored, expected);
    }

    #[test]
    fn refill_failure_leaves_state_and_alerts() {
        let session = session();
        block_on(session.refresh());
        assert!(!block_on(session.refill("nope")));
        let model = session.model();
        assert!(model.alert().is_some());
        assert_eq!(model.station("w").unwrap().status, StationStatus::NeedsWater);
    }

    #[test]
    fn mutations_arrive_on_change_feed() {
        let session = session();
        block_on(session.refresh());
        assert!(!block_on(session.sync_changes()));

        block_on(session.refill("f"));
        assert!(block_on(session.sync_changes()));
        assert_eq!(session.drain_changes(), 0);
    }

    #[test]
    fn external_change_triggers_refetch() {
        let store = Rc::new(LocalStore::open_in_memory().unwrap());
        let session = Session::new(store.clone());
        block_on(session.refresh());
        assert!(session.model().stations().is_empty());

        // another client writes through the same backend
        let mut rng = StdRng::seed_from_u64(7);
        block_on(store.insert(&random_station(&mut rng, "10:00:00"))).unwrap();
        assert!(block_on(session.sync_changes()));
        assert_eq!(session.model().stations().len(), 1);
    }

    #[test]
    fn add_random_station_inserts_and_refreshes() {
        let session = session();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(block_on(session.add_random_station(&mut rng)));
        let model = session.model();
        assert!(!model.is_adding());
        assert_eq!(model.stations().len(), 3);
        let created = model
            .stations()
            .iter()
            .find(|s| s.notes.as_deref() == Some(GENERATED_NOTES))
            .unwrap();
        assert!(created.title.starts_with("Comedouro "));
        assert_eq!(created.status, StationStatus::Ok);
        assert!((created.latitude - DEFAULT_CENTER.latitude).abs() <= 0.01);
        assert!((created.longitude - DEFAULT_CENTER.longitude).abs() <= 0.01);
    }

    #[test]
    fn failed_insert_skips_refresh() {
        let session = Session::new(Rc::new(Offline));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!block_on(session.add_random_station(&mut rng)));
        let model = session.model();
        assert!(model.alert().is_some());
        // never refreshed, so still in the initial loading state
        assert!(model.is_loading());
    }

    #[test]
    fn denied_location_renders_unavailable() {
        let session = session();
        block_on(session.refresh());
        session.select("f");
        assert_eq!(block_on(session.locate(&NoLocation)), None);
        let details = session.model().details().unwrap();
        assert_eq!(format_distance(details.distance_km), "indisponivel");
    }

    #[test]
    fn known_location_gives_distance() {
        let session = session();
        block_on(session.refresh());
        session.select("f");
        let here = LatLon::new(-23.55, -46.63).unwrap();
        assert_eq!(block_on(session.locate(&FixedLocation(here))), Some(here));
        let details = session.model().details().unwrap();
        assert_eq!(format_distance(details.distance_km), "0.00 km");
    }

    #[test]
    fn comments_are_session_only() {
        let session = session().with_author("ana");
        block_on(session.refresh());
        assert!(session.add_comment("w", "tigela lavada"));
        assert!(!session.add_comment("w", "\t"));
        assert_eq!(session.model().comments_for("w")[0].author, "ana");
        // a refetch does not drop or persist them
        block_on(session.refresh());
        assert_eq!(session.model().comments_for("w").len(), 1);
    }

    #[test]
    fn change_feed_is_handed_out_once() {
        let session = session();
        assert!(session.take_change_feed().is_some());
        assert!(session.take_change_feed().is_none());
        assert_eq!(session.drain_changes(), 0);
    }

    #[test]
    fn drop_unsubscribes() {
        let store = Rc::new(LocalStore::open_in_memory().unwrap());
        let session = Session::new(store.clone());
        assert_eq!(store.subscriber_count(), 1);
        drop(session);
        assert_eq!(store.subscriber_count(), 0);
    }
}
