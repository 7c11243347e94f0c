//! End-to-end flows through `AppState` with in-process fakes for every
//! external capability.

use std::env::VarError;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mandi_app::{
    AppError, AppState, ManageError, MapEvent, MapOutcome, MarkerKind, NoGeolocation, PanelKind,
    RegistrationError, Selection, Services, SimulatedAuthService, ViewError,
};
use mandi_core::{
    build_app_config, default_categories, Coordinate, Credentials, Place, PlaceId, Role,
    StoredItem, DEFAULT_CENTER, DEMO_VENDOR_ID,
};
use mandi_search::PlaceSearch;
use mandi_store::{LocationStore, StoreError};

/// Answers every query with one place named after it.
struct EchoSearch;

#[async_trait]
impl PlaceSearch for EchoSearch {
    async fn search(&self, query: &str) -> Vec<Place> {
        vec![Place {
            place_id: 777,
            lat: "23.2".to_string(),
            lon: "77.08".to_string(),
            display_name: format!("{query}, Madhya Pradesh"),
            class: "place".to_string(),
            category: "town".to_string(),
            ..Place::default()
        }]
    }
}

fn place(place_id: PlaceId, category: &str, owner: Option<&str>, items: &[&str]) -> Place {
    Place {
        place_id,
        lat: "23.0775".to_string(),
        lon: "76.8514".to_string(),
        display_name: format!("Stall {place_id}, Sehore"),
        class: "shop".to_string(),
        category: category.to_string(),
        owner_id: owner.map(str::to_string),
        items: items
            .iter()
            .map(|name| StoredItem::Named((*name).to_string()))
            .collect(),
        ..Place::default()
    }
}

fn app_with(places: Vec<Place>) -> AppState {
    let config = build_app_config(|_| Err(VarError::NotPresent)).unwrap();
    let services = Services {
        auth: Arc::new(SimulatedAuthService::new(Duration::ZERO, Duration::ZERO)),
        search: Arc::new(EchoSearch),
        geolocator: Arc::new(NoGeolocation),
    };
    AppState::new(
        config,
        default_categories(),
        LocationStore::from_places(places).unwrap(),
        services,
    )
}

async fn as_buyer(places: Vec<Place>) -> AppState {
    let mut app = app_with(places);
    app.login(&Credentials::new("asha@mandi.in", "pw"))
        .await
        .unwrap();
    app
}

async fn as_demo_vendor(places: Vec<Place>) -> AppState {
    let mut app = app_with(places);
    app.demo_login(Role::Vendor).await.unwrap();
    app
}

fn ids(places: &[&Place]) -> Vec<PlaceId> {
    places.iter().map(|p| p.place_id).collect()
}

#[tokio::test]
async fn everything_requires_a_session() {
    let mut app = app_with(vec![place(1, "vegetables", None, &[])]);

    assert_eq!(app.visible_places().unwrap_err(), AppError::NotAuthenticated);
    assert_eq!(app.open_registration(), Err(AppError::NotAuthenticated));
    assert_eq!(app.publish(), Err(AppError::NotAuthenticated));
    assert_eq!(
        app.handle_map_event(MapEvent::MarkerTap(1)),
        Err(AppError::NotAuthenticated)
    );
    assert_eq!(app.toggle_delivery(), Err(AppError::NotAuthenticated));
    assert_eq!(app.logout(), Err(AppError::NotAuthenticated));
}

#[tokio::test]
async fn rejected_login_leaves_no_session() {
    let mut app = app_with(Vec::new());
    let err = app
        .login(&Credentials::new("not-an-email", "pw"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Auth(_)), "expected Auth, got: {err:?}");
    assert!(app.session().is_none());
}

#[tokio::test]
async fn category_filter_toggles_over_single_vendor_store() {
    let mut app = as_buyer(vec![place(1, "vegetables", None, &["Tomato"])]).await;

    app.toggle_category("vegetables").unwrap();
    assert_eq!(ids(&app.visible_places().unwrap()), vec![1]);

    app.toggle_category("fruits").unwrap();
    assert!(app.visible_places().unwrap().is_empty());

    assert_eq!(app.toggle_category("fruits").unwrap(), None);
    assert_eq!(ids(&app.visible_places().unwrap()), vec![1]);
}

#[tokio::test]
async fn buyer_tapping_vendor_outlet_sees_details() {
    let mut app = as_buyer(vec![
        place(1, "vegetables", None, &[]),
        place(2, "fruits", Some("v1"), &["Mango"]),
    ])
    .await;

    let outcome = app.handle_map_event(MapEvent::MarkerTap(2)).unwrap();
    assert_eq!(outcome, MapOutcome::Opened(PanelKind::Details));
    assert!(app.management().unwrap().is_none());

    let details = app.details().unwrap().expect("details panel open");
    assert_eq!(details.place_id, 2);
    assert_eq!(details.category_label, "Fruits");
    assert_eq!(details.locality, "Sehore");
}

#[tokio::test]
async fn tapping_unknown_marker_is_a_store_error() {
    let mut app = as_buyer(Vec::new()).await;
    assert_eq!(
        app.handle_map_event(MapEvent::MarkerTap(404)),
        Err(AppError::Store(StoreError::NotFound(404)))
    );
}

#[tokio::test]
async fn buyer_cannot_register() {
    let mut app = as_buyer(Vec::new()).await;
    assert!(matches!(
        app.open_registration(),
        Err(AppError::View(ViewError::VendorOnly(_)))
    ));
    assert!(app.enter_picking().is_err());
}

#[tokio::test]
async fn publish_needs_a_picked_location_and_appends_once() {
    let mut app = as_demo_vendor(vec![place(1, "vegetables", None, &[])]).await;

    app.open_registration().unwrap();
    app.registration_form().unwrap().name = "Ramu Mart".to_string();
    assert!(!app.is_publish_enabled().unwrap());
    assert_eq!(
        app.publish(),
        Err(AppError::Registration(RegistrationError::MissingLocation))
    );
    assert_eq!(app.store().unwrap().len(), 1);

    app.enter_picking().unwrap();
    let picked = Coordinate::new(12.0, 77.0);
    assert_eq!(
        app.handle_map_event(MapEvent::Click(picked)).unwrap(),
        MapOutcome::Picked(picked)
    );
    assert_eq!(app.registration_form().unwrap().name, "Ramu Mart");
    assert!(app.is_publish_enabled().unwrap());

    let new_id = app.publish().unwrap();
    let store = app.store().unwrap();
    assert_eq!(store.len(), 2);
    assert_ne!(new_id, 1);
    let published = store.get(new_id).unwrap();
    assert_eq!(published.owner_id.as_deref(), Some(DEMO_VENDOR_ID));
    assert_eq!(published.position(), Some(picked));
    assert_eq!(published.category, "greengrocer");

    let view = app.view().unwrap();
    assert_eq!(view.panel_kind(), PanelKind::Search);
    assert_eq!(view.pending(), None);
    assert!(matches!(view.selection(), Selection::Search(p) if p.place_id == new_id));

    // The camera follows the new outlet, clamped into the service area.
    assert_eq!(app.map().unwrap().center(), Coordinate::new(20.0, 77.0));
    assert_eq!(app.map().unwrap().zoom(), 16);
}

#[tokio::test]
async fn publish_outside_registration_is_rejected() {
    let mut app = as_demo_vendor(Vec::new()).await;
    assert!(matches!(
        app.publish(),
        Err(AppError::View(ViewError::InvalidTransition {
            from: PanelKind::Search,
            ..
        }))
    ));
}

#[tokio::test]
async fn tapping_own_outlet_twice_starts_a_new_session() {
    let mut app = as_demo_vendor(vec![place(
        1000,
        "vegetables",
        Some(DEMO_VENDOR_ID),
        &["Tomato"],
    )])
    .await;

    for expected_session in [1, 2] {
        let outcome = app.handle_map_event(MapEvent::MarkerTap(1000)).unwrap();
        assert_eq!(outcome, MapOutcome::Opened(PanelKind::Management));
        let session = app.management().unwrap().unwrap();
        assert_eq!(session.session_id(), expected_session);
    }
}

#[tokio::test]
async fn double_stock_toggle_leaves_stored_place_unchanged() {
    let mut app = as_demo_vendor(vec![place(
        1000,
        "vegetables",
        Some(DEMO_VENDOR_ID),
        &["Tomato", "Potato"],
    )])
    .await;
    let before = app.store().unwrap().get(1000).unwrap().clone();

    app.open_outlet(1000).unwrap();
    app.toggle_stock("legacy-0").unwrap();
    app.toggle_stock("legacy-0").unwrap();

    assert_eq!(app.store().unwrap().get(1000).unwrap(), &before);
}

#[tokio::test]
async fn add_then_edit_onion_via_dashboard() {
    let mut app = as_demo_vendor(vec![place(
        1000,
        "vegetables",
        Some(DEMO_VENDOR_ID),
        &["Tomato"],
    )])
    .await;

    let outcome = app.handle_map_event(MapEvent::MarkerTap(1000)).unwrap();
    assert_eq!(outcome, MapOutcome::Opened(PanelKind::Management));

    let id = app.add_item("Onion", Some("₹30/kg")).unwrap();
    app.edit_item(&id, "Onion", Some("₹25/kg")).unwrap();

    let stored = app.store().unwrap().get(1000).unwrap().inventory();
    let onions: Vec<_> = stored.iter().filter(|i| i.name == "Onion").collect();
    assert_eq!(onions.len(), 1, "expected one Onion, got: {stored:?}");
    assert_eq!(onions[0].id, id);
    assert!(onions[0].in_stock);
    assert_eq!(onions[0].price.as_deref(), Some("₹25/kg"));

    let managed = app.management().unwrap().unwrap().place();
    assert_eq!(managed, app.store().unwrap().get(1000).unwrap());
}

#[tokio::test]
async fn deleting_item_under_edit_resets_form() {
    let mut app = as_demo_vendor(vec![place(
        1000,
        "vegetables",
        Some(DEMO_VENDOR_ID),
        &["Tomato", "Onion"],
    )])
    .await;
    app.open_outlet(1000).unwrap();

    let draft = app.begin_edit("legacy-1").unwrap();
    assert_eq!(draft.name, "Onion");
    app.delete_item("legacy-1").unwrap();

    let session = app.management().unwrap().unwrap();
    assert!(session.editing().is_none());
    assert_eq!(session.items().len(), 1);
}

#[tokio::test]
async fn management_needs_open_panel() {
    let mut app = as_demo_vendor(Vec::new()).await;
    assert!(matches!(
        app.toggle_stock("legacy-0"),
        Err(AppError::View(ViewError::InvalidTransition { .. }))
    ));
}

#[tokio::test]
async fn opening_someone_elses_outlet_is_refused() {
    let mut app = as_demo_vendor(vec![place(5, "grains", Some("v9"), &[])]).await;
    assert_eq!(
        app.open_outlet(5),
        Err(AppError::View(ViewError::Manage(ManageError::NotOwner(5))))
    );
    assert_eq!(app.view().unwrap().panel_kind(), PanelKind::Search);
}

#[tokio::test]
async fn my_outlets_lists_owned_places() {
    let app = as_demo_vendor(vec![
        place(1, "vegetables", Some(DEMO_VENDOR_ID), &[]),
        place(2, "fruits", Some("v9"), &[]),
        place(3, "grains", Some(DEMO_VENDOR_ID), &[]),
    ])
    .await;
    assert_eq!(ids(&app.my_outlets().unwrap()), vec![1, 3]);
}

#[tokio::test]
async fn markers_follow_zoom_threshold() {
    let mut app = as_buyer(vec![
        place(1, "vegetables", None, &["Tomato"]),
        place(2, "fruits", None, &[]),
    ])
    .await;

    assert_eq!(app.markers().unwrap().len(), 2);

    app.handle_map_event(MapEvent::MarkerTap(2)).unwrap();
    assert_eq!(
        app.handle_map_event(MapEvent::ZoomEnd(10)).unwrap(),
        MapOutcome::Zoomed(10)
    );
    let markers = app.markers().unwrap();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].kind, MarkerKind::Selected);
    assert_eq!(markers[0].place_id, Some(2));
}

#[tokio::test]
async fn logout_tears_down_view_but_keeps_store() {
    let mut app = as_demo_vendor(Vec::new()).await;
    app.open_registration().unwrap();
    app.registration_form().unwrap().name = "Ramu Mart".to_string();
    app.enter_picking().unwrap();
    app.handle_map_event(MapEvent::Click(Coordinate::new(23.08, 76.86)))
        .unwrap();
    let new_id = app.publish().unwrap();
    app.toggle_category("fruits").unwrap();

    app.logout().unwrap();
    assert!(app.session().is_none());
    assert_eq!(app.view().unwrap_err(), AppError::NotAuthenticated);

    app.demo_login(Role::Vendor).await.unwrap();
    let view = app.view().unwrap();
    assert_eq!(view.panel_kind(), PanelKind::Search);
    assert_eq!(view.category(), None);
    assert_eq!(view.selection(), Selection::None);
    assert!(app.store().unwrap().contains(new_id));
    assert_eq!(app.map().unwrap().center(), DEFAULT_CENTER);
}

#[tokio::test]
async fn recenter_without_device_goes_home() {
    let mut app = as_buyer(Vec::new()).await;
    assert_eq!(app.recenter().await.unwrap(), DEFAULT_CENTER);
    assert_eq!(app.map().unwrap().zoom(), 13);
}

#[tokio::test(start_paused = true)]
async fn search_results_arrive_after_debounce_and_open_details() {
    let mut app = as_buyer(Vec::new()).await;
    let mut rx = app.subscribe_search().unwrap();

    app.search_input("Se").unwrap();
    app.search_input("Sehore").unwrap();
    tokio::time::sleep(Duration::from_millis(600)).await;
    rx.wait_for(|s| !s.results.is_empty()).await.unwrap();

    let snapshot = app.search_results().unwrap();
    assert_eq!(snapshot.query, "Sehore");
    let hit = snapshot.results[0].clone();

    app.select_search_result(hit).unwrap();
    assert_eq!(app.view().unwrap().panel_kind(), PanelKind::Details);
    assert_eq!(app.map().unwrap().center(), Coordinate::new(23.2, 77.08));
    assert_eq!(app.search_results().unwrap(), snapshot);

    // The search hit is not stored, but its marker can still be tapped.
    assert_eq!(
        app.handle_map_event(MapEvent::MarkerTap(777)).unwrap(),
        MapOutcome::Opened(PanelKind::Details)
    );

    app.back().unwrap();
    let after_back = app.search_results().unwrap();
    assert_eq!(after_back.query, "Sehore");
    assert_eq!(after_back.results, snapshot.results);
}
