//! The application-state object.
//!
//! [`AppState`] owns the store, the signed-in session, the view controller and
//! the map camera, and routes every user action through them. Everything
//! except signing in requires a session.

use std::sync::Arc;
use std::time::Duration;

use mandi_core::{
    AppConfig, CategoryCatalog, Coordinate, Credentials, InventoryItem, ItemId, Place, PlaceId,
    Role, SignUp, User,
};
use mandi_search::{PlaceSearch, SearchDebouncer, SearchSnapshot};
use mandi_store::{LocationStore, StoreError};
use tokio::sync::watch;

use crate::details::PlaceDetails;
use crate::error::AppError;
use crate::geolocation::Geolocator;
use crate::manage::{EditDraft, ManageError, ManagementSession};
use crate::map::{MapConfig, MapEvent, MapSurface, MarkerSpec};
use crate::registration::RegistrationForm;
use crate::session::{AuthService, Session};
use crate::view::{ClickOutcome, Panel, PanelKind, ViewController, ViewError};

/// External capabilities the application talks to.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub search: Arc<dyn PlaceSearch>,
    pub geolocator: Arc<dyn Geolocator>,
}

/// What a map event led to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapOutcome {
    Picked(Coordinate),
    Deselected,
    Opened(PanelKind),
    Zoomed(u8),
}

pub struct AppState {
    config: AppConfig,
    catalog: CategoryCatalog,
    store: LocationStore,
    services: Services,
    search: SearchDebouncer<dyn PlaceSearch>,
    session: Option<Session>,
    view: ViewController,
    map: MapSurface,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: AppConfig,
        catalog: CategoryCatalog,
        store: LocationStore,
        services: Services,
    ) -> Self {
        let search = SearchDebouncer::new(
            Arc::clone(&services.search),
            Duration::from_millis(config.search_debounce_ms),
        );
        Self {
            config,
            catalog,
            store,
            services,
            search,
            session: None,
            view: ViewController::new(),
            map: MapSurface::new(MapConfig::default()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    // ---------------------------------------------------------------------
    // Sign-in
    // ---------------------------------------------------------------------

    /// # Errors
    ///
    /// [`AppError::Auth`] when the auth service rejects the input.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<&User, AppError> {
        let user = self.services.auth.login(credentials).await?;
        Ok(self.start_session(user))
    }

    /// # Errors
    ///
    /// [`AppError::Auth`] when the auth service rejects the input.
    pub async fn sign_up(&mut self, form: &SignUp) -> Result<&User, AppError> {
        let user = self.services.auth.sign_up(form).await?;
        Ok(self.start_session(user))
    }

    /// # Errors
    ///
    /// [`AppError::Auth`] when the auth service fails.
    pub async fn demo_login(&mut self, role: Role) -> Result<&User, AppError> {
        let user = self.services.auth.demo_login(role).await?;
        Ok(self.start_session(user))
    }

    fn start_session(&mut self, user: User) -> &User {
        self.reset_view();
        tracing::info!(user_id = %user.id, role = %user.role, "session started");
        &self.session.insert(Session::new(user)).user
    }

    /// End the session and drop all view state. The store is kept.
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] when nobody is signed in.
    pub fn logout(&mut self) -> Result<(), AppError> {
        let session = self.session.take().ok_or(AppError::NotAuthenticated)?;
        tracing::info!(user_id = %session.user.id, "session ended");
        self.reset_view();
        Ok(())
    }

    fn reset_view(&mut self) {
        self.view.reset();
        self.search.clear();
        self.map.reset();
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn current_user(&self) -> Result<&User, AppError> {
        self.session
            .as_ref()
            .map(|s| &s.user)
            .ok_or(AppError::NotAuthenticated)
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn view(&self) -> Result<&ViewController, AppError> {
        self.current_user()?;
        Ok(&self.view)
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn map(&self) -> Result<&MapSurface, AppError> {
        self.current_user()?;
        Ok(&self.map)
    }

    // ---------------------------------------------------------------------
    // Browsing
    // ---------------------------------------------------------------------

    /// Store places matching the active category, in store order.
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn visible_places(&self) -> Result<Vec<&Place>, AppError> {
        self.current_user()?;
        Ok(self.store.filter_by_category(self.view.category()))
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn toggle_category(&mut self, category: &str) -> Result<Option<String>, AppError> {
        self.current_user()?;
        Ok(self.view.toggle_category(category).map(str::to_string))
    }

    /// Feed the search box. Must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn search_input(&self, query: &str) -> Result<u64, AppError> {
        self.current_user()?;
        Ok(self.search.submit(query))
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn search_results(&self) -> Result<SearchSnapshot, AppError> {
        self.current_user()?;
        Ok(self.search.snapshot())
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn subscribe_search(&self) -> Result<watch::Receiver<SearchSnapshot>, AppError> {
        self.current_user()?;
        Ok(self.search.subscribe())
    }

    /// Open details for a search hit. The query and its results stay put so
    /// going back shows the same list.
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] or a rejected transition.
    pub fn select_search_result(&mut self, place: Place) -> Result<(), AppError> {
        self.current_user()?;
        self.view.select_search_result(place)?;
        self.follow_selection();
        Ok(())
    }

    /// Route an event from the rendered map.
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`], [`AppError::Store`] for a tap on an
    /// unknown place, or a rejected transition.
    pub fn handle_map_event(&mut self, event: MapEvent) -> Result<MapOutcome, AppError> {
        let user = self.current_user()?.clone();
        match event {
            MapEvent::Click(at) => match self.view.map_click(at)? {
                ClickOutcome::Picked(at) => {
                    self.follow_selection();
                    Ok(MapOutcome::Picked(at))
                }
                ClickOutcome::Deselected => Ok(MapOutcome::Deselected),
            },
            MapEvent::MarkerTap(place_id) => {
                let place = self.find_place(place_id)?;
                let panel = self.view.tap_marker(&place, &user)?;
                self.follow_selection();
                Ok(MapOutcome::Opened(panel))
            }
            MapEvent::ZoomEnd(zoom) => Ok(MapOutcome::Zoomed(self.map.set_zoom(zoom))),
        }
    }

    /// Store record, or the selected search hit when it is not stored.
    fn find_place(&self, place_id: PlaceId) -> Result<Place, AppError> {
        self.store
            .get(place_id)
            .or_else(|| {
                self.view
                    .selection()
                    .place()
                    .filter(|p| p.place_id == place_id)
            })
            .cloned()
            .ok_or(AppError::Store(StoreError::NotFound(place_id)))
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] or a rejected transition.
    pub fn back(&mut self) -> Result<(), AppError> {
        self.current_user()?;
        self.view.back()?;
        Ok(())
    }

    /// Details for the place in the details panel, if open.
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn details(&self) -> Result<Option<PlaceDetails>, AppError> {
        self.current_user()?;
        Ok(match self.view.panel() {
            Panel::Details { place, .. } => Some(PlaceDetails::new(
                place,
                &self.catalog,
                &self.config.default_locality,
            )),
            _ => None,
        })
    }

    /// Markers for the current camera, filter and selection.
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn markers(&self) -> Result<Vec<MarkerSpec>, AppError> {
        let visible = self.visible_places()?;
        Ok(self.map.markers(
            &visible,
            self.view.selection().place(),
            self.view.pending(),
            &self.catalog,
        ))
    }

    /// Fly to the device position, or the default centre if it cannot be read.
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub async fn recenter(&mut self) -> Result<Coordinate, AppError> {
        self.current_user()?;
        let timeout = Duration::from_millis(self.config.geolocation_timeout_ms);
        Ok(self
            .map
            .recenter(self.services.geolocator.as_ref(), timeout)
            .await)
    }

    fn follow_selection(&mut self) {
        self.map
            .follow(self.view.selection().place(), self.view.pending());
    }

    // ---------------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------------

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] or a rejected transition.
    pub fn open_registration(&mut self) -> Result<(), AppError> {
        let user = self.current_user()?.clone();
        self.view.open_registration(&user)?;
        Ok(())
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] or [`ViewError::VendorOnly`].
    pub fn enter_picking(&mut self) -> Result<(), AppError> {
        let user = self.current_user()?.clone();
        self.view.enter_picking(&user)?;
        Ok(())
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn cancel_picking(&mut self) -> Result<(), AppError> {
        self.current_user()?;
        self.view.cancel_picking();
        Ok(())
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`], or a rejected transition when the
    /// registration panel is closed.
    pub fn registration_form(&mut self) -> Result<&mut RegistrationForm, AppError> {
        self.current_user()?;
        Ok(self.view.registration_mut()?)
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn is_publish_enabled(&self) -> Result<bool, AppError> {
        self.current_user()?;
        Ok(self.view.is_publish_enabled())
    }

    /// Append the registered outlet to the store and select it.
    ///
    /// Nothing is written unless the form has a name and a location.
    ///
    /// # Errors
    ///
    /// [`AppError::Registration`] while publishing is disabled, or a rejected
    /// transition when the registration panel is closed.
    pub fn publish(&mut self) -> Result<PlaceId, AppError> {
        let user = self.current_user()?.clone();
        let form = self
            .view
            .registration()
            .ok_or_else(|| ViewError::InvalidTransition {
                from: self.view.panel_kind(),
                action: "publish",
            })?;
        let position = form.check(self.view.pending())?;

        let place = form.build_place(self.store.next_place_id(), position, &user);
        let place_id = self.store.append(place.clone())?;
        self.view.finish_registration(place);
        self.follow_selection();

        tracing::info!(place_id, owner = %user.id, "outlet published");
        Ok(place_id)
    }

    // ---------------------------------------------------------------------
    // Outlet management
    // ---------------------------------------------------------------------

    /// Outlets the signed-in vendor owns, in store order.
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn my_outlets(&self) -> Result<Vec<&Place>, AppError> {
        let user = self.current_user()?;
        Ok(self.store.owned_by(user))
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`], [`AppError::Store`] for an unknown id,
    /// or a rejected transition.
    pub fn open_outlet(&mut self, place_id: PlaceId) -> Result<(), AppError> {
        let user = self.current_user()?.clone();
        let place = self
            .store
            .get(place_id)
            .cloned()
            .ok_or(StoreError::NotFound(place_id))?;
        self.view.open_outlet(&place, &user)?;
        self.follow_selection();
        Ok(())
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn management(&self) -> Result<Option<&ManagementSession>, AppError> {
        self.current_user()?;
        Ok(self.view.management())
    }

    /// # Errors
    ///
    /// See [`ManagementSession::toggle_stock`].
    pub fn toggle_stock(&mut self, item_id: &str) -> Result<bool, AppError> {
        self.manage(|session, store| session.toggle_stock(store, item_id))
    }

    /// # Errors
    ///
    /// See [`ManagementSession::add_item`].
    pub fn add_item(&mut self, name: &str, price: Option<&str>) -> Result<ItemId, AppError> {
        self.manage(|session, store| session.add_item(store, name, price))
    }

    /// # Errors
    ///
    /// See [`ManagementSession::begin_edit`].
    pub fn begin_edit(&mut self, item_id: &str) -> Result<EditDraft, AppError> {
        self.manage(|session, _| session.begin_edit(item_id).cloned())
    }

    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`] or no management panel.
    pub fn cancel_edit(&mut self) -> Result<(), AppError> {
        self.manage(|session, _| {
            session.cancel_edit();
            Ok(())
        })
    }

    /// # Errors
    ///
    /// See [`ManagementSession::edit_item`].
    pub fn edit_item(
        &mut self,
        item_id: &str,
        name: &str,
        price: Option<&str>,
    ) -> Result<(), AppError> {
        self.manage(|session, store| session.edit_item(store, item_id, name, price))
    }

    /// # Errors
    ///
    /// See [`ManagementSession::save_edit`].
    pub fn save_edit(&mut self) -> Result<(), AppError> {
        self.manage(ManagementSession::save_edit)
    }

    /// # Errors
    ///
    /// See [`ManagementSession::delete_item`].
    pub fn delete_item(&mut self, item_id: &str) -> Result<InventoryItem, AppError> {
        self.manage(|session, store| session.delete_item(store, item_id))
    }

    /// # Errors
    ///
    /// See [`ManagementSession::toggle_delivery`].
    pub fn toggle_delivery(&mut self) -> Result<bool, AppError> {
        self.manage(ManagementSession::toggle_delivery)
    }

    fn manage<T>(
        &mut self,
        op: impl FnOnce(&mut ManagementSession, &mut LocationStore) -> Result<T, ManageError>,
    ) -> Result<T, AppError> {
        self.current_user()?;
        let session = self.view.management_mut()?;
        let outcome = op(session, &mut self.store)?;
        let place = session.place().clone();
        self.view.refresh(&place);
        Ok(outcome)
    }

    /// Read-only view of the store.
    ///
    /// # Errors
    ///
    /// [`AppError::NotAuthenticated`].
    pub fn store(&self) -> Result<&LocationStore, AppError> {
        self.current_user()?;
        Ok(&self.store)
    }
}
