//! Which panel is open and what is selected.
//!
//! The panel is always exactly one of [`Panel`]'s variants. Map focus (a
//! search hit or a tapped marker) is tracked beside it so that a background
//! tap can drop the focused marker without closing the panel.

use mandi_core::{Coordinate, Place, User};
use thiserror::Error;

use crate::manage::{ManageError, ManagementSession};
use crate::registration::RegistrationForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Search,
    Details,
    Registration,
    Management,
}

impl std::fmt::Display for PanelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelKind::Search => write!(f, "search"),
            PanelKind::Details => write!(f, "details"),
            PanelKind::Registration => write!(f, "registration"),
            PanelKind::Management => write!(f, "management"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("cannot {action} from the {from} panel")]
    InvalidTransition { from: PanelKind, action: &'static str },

    #[error("only vendors can {0}")]
    VendorOnly(&'static str),

    #[error("finish or cancel picking a location first")]
    PickingActive,

    #[error("picked coordinate is not a valid position")]
    InvalidCoordinate,

    #[error(transparent)]
    Manage(#[from] ManageError),
}

/// How the details panel was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOrigin {
    Search,
    Marker,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Search,
    Details { place: Place, origin: DetailOrigin },
    Registration(RegistrationForm),
    Management(ManagementSession),
}

impl Panel {
    #[must_use]
    pub fn kind(&self) -> PanelKind {
        match self {
            Panel::Search => PanelKind::Search,
            Panel::Details { .. } => PanelKind::Details,
            Panel::Registration(_) => PanelKind::Registration,
            Panel::Management(_) => PanelKind::Management,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Focus {
    None,
    Search(Place),
    Marker(Place),
}

/// The place currently singled out, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    None,
    Search(&'a Place),
    Marker(&'a Place),
    Managed(&'a Place),
}

impl<'a> Selection<'a> {
    #[must_use]
    pub fn place(self) -> Option<&'a Place> {
        match self {
            Selection::None => None,
            Selection::Search(place) | Selection::Marker(place) | Selection::Managed(place) => {
                Some(place)
            }
        }
    }
}

/// What a map background tap did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// The coordinate became the pending outlet location.
    Picked(Coordinate),
    /// Marker focus (if any) was cleared.
    Deselected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewController {
    panel: Panel,
    focus: Focus,
    picking: bool,
    pending: Option<Coordinate>,
    category: Option<String>,
    sessions_opened: u64,
}

impl Default for ViewController {
    fn default() -> Self {
        Self {
            panel: Panel::Search,
            focus: Focus::None,
            picking: false,
            pending: None,
            category: None,
            sessions_opened: 0,
        }
    }
}

impl ViewController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    #[must_use]
    pub fn panel_kind(&self) -> PanelKind {
        self.panel.kind()
    }

    #[must_use]
    pub fn selection(&self) -> Selection<'_> {
        if let Panel::Management(session) = &self.panel {
            return Selection::Managed(session.place());
        }
        match &self.focus {
            Focus::None => Selection::None,
            Focus::Search(place) => Selection::Search(place),
            Focus::Marker(place) => Selection::Marker(place),
        }
    }

    #[must_use]
    pub fn is_picking(&self) -> bool {
        self.picking
    }

    #[must_use]
    pub fn pending(&self) -> Option<Coordinate> {
        self.pending
    }

    /// Search bar and category pills are hidden while picking.
    #[must_use]
    pub fn floating_ui_visible(&self) -> bool {
        !self.picking
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Number of management sessions opened so far.
    #[must_use]
    pub fn sessions_opened(&self) -> u64 {
        self.sessions_opened
    }

    #[must_use]
    pub fn registration(&self) -> Option<&RegistrationForm> {
        match &self.panel {
            Panel::Registration(form) => Some(form),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// [`ViewError::InvalidTransition`] unless the registration panel is open.
    pub fn registration_mut(&mut self) -> Result<&mut RegistrationForm, ViewError> {
        let from = self.panel.kind();
        match &mut self.panel {
            Panel::Registration(form) => Ok(form),
            _ => Err(ViewError::InvalidTransition {
                from,
                action: "edit the registration form",
            }),
        }
    }

    #[must_use]
    pub fn management(&self) -> Option<&ManagementSession> {
        match &self.panel {
            Panel::Management(session) => Some(session),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// [`ViewError::InvalidTransition`] unless the management panel is open.
    pub fn management_mut(&mut self) -> Result<&mut ManagementSession, ViewError> {
        let from = self.panel.kind();
        match &mut self.panel {
            Panel::Management(session) => Ok(session),
            _ => Err(ViewError::InvalidTransition {
                from,
                action: "manage inventory",
            }),
        }
    }

    /// Open details for a search hit.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidTransition`] from registration or management.
    pub fn select_search_result(&mut self, place: Place) -> Result<(), ViewError> {
        self.ensure_browsing("select a search result")?;
        self.focus = Focus::Search(place.clone());
        self.panel = Panel::Details {
            place,
            origin: DetailOrigin::Search,
        };
        Ok(())
    }

    /// React to a marker tap: management for the owning vendor, details for
    /// everyone else. Works from the management panel too; tapping the
    /// managed outlet again starts a fresh session on it.
    ///
    /// # Errors
    ///
    /// [`ViewError::PickingActive`] while picking, and
    /// [`ViewError::InvalidTransition`] from registration.
    pub fn tap_marker(&mut self, place: &Place, user: &User) -> Result<PanelKind, ViewError> {
        if self.picking {
            return Err(ViewError::PickingActive);
        }
        if self.panel.kind() == PanelKind::Registration {
            return Err(ViewError::InvalidTransition {
                from: PanelKind::Registration,
                action: "open a marker",
            });
        }

        if place.is_editable_by(user) {
            self.open_management(place, user)?;
        } else {
            self.focus = Focus::Marker(place.clone());
            self.panel = Panel::Details {
                place: place.clone(),
                origin: DetailOrigin::Marker,
            };
        }
        Ok(self.panel.kind())
    }

    /// Open management for an outlet chosen from the owner's outlet list.
    ///
    /// # Errors
    ///
    /// As [`ViewController::tap_marker`], plus [`ViewError::Manage`] when
    /// `user` does not own `place`.
    pub fn open_outlet(&mut self, place: &Place, user: &User) -> Result<(), ViewError> {
        if self.picking {
            return Err(ViewError::PickingActive);
        }
        self.ensure_browsing("open an outlet")?;
        self.open_management(place, user)
    }

    fn open_management(&mut self, place: &Place, user: &User) -> Result<(), ViewError> {
        let session = ManagementSession::open(self.sessions_opened + 1, place, user)?;
        self.sessions_opened += 1;
        self.focus = Focus::None;
        self.panel = Panel::Management(session);
        Ok(())
    }

    /// Open an empty registration form.
    ///
    /// # Errors
    ///
    /// [`ViewError::VendorOnly`] for buyers and [`ViewError::InvalidTransition`]
    /// from any panel other than search.
    pub fn open_registration(&mut self, user: &User) -> Result<(), ViewError> {
        if !user.is_vendor() {
            return Err(ViewError::VendorOnly("register outlets"));
        }
        if self.panel.kind() != PanelKind::Search {
            return Err(ViewError::InvalidTransition {
                from: self.panel.kind(),
                action: "open registration",
            });
        }
        self.panel = Panel::Registration(RegistrationForm::default());
        Ok(())
    }

    /// Close the current panel and return to search.
    ///
    /// Leaving registration also discards the form and the pending pick.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidTransition`] when already on search.
    pub fn back(&mut self) -> Result<(), ViewError> {
        match self.panel.kind() {
            PanelKind::Search => {
                return Err(ViewError::InvalidTransition {
                    from: PanelKind::Search,
                    action: "go back",
                })
            }
            PanelKind::Registration => {
                self.pending = None;
                self.picking = false;
            }
            PanelKind::Details | PanelKind::Management => {}
        }
        self.panel = Panel::Search;
        self.focus = Focus::None;
        Ok(())
    }

    /// Start waiting for a map tap to set the outlet location.
    ///
    /// # Errors
    ///
    /// [`ViewError::VendorOnly`] for buyers.
    pub fn enter_picking(&mut self, user: &User) -> Result<(), ViewError> {
        if !user.is_vendor() {
            return Err(ViewError::VendorOnly("pick an outlet location"));
        }
        self.picking = true;
        self.pending = None;
        if let Focus::Marker(_) = self.focus {
            self.focus = Focus::None;
        }
        if matches!(
            self.panel,
            Panel::Details {
                origin: DetailOrigin::Marker,
                ..
            }
        ) {
            self.panel = Panel::Search;
        }
        Ok(())
    }

    /// Stop picking. Any pending coordinate is kept.
    pub fn cancel_picking(&mut self) {
        self.picking = false;
    }

    /// Handle a tap on the map background.
    ///
    /// While picking, the coordinate becomes pending and registration is
    /// forced open (keeping an already-open form). Otherwise only the marker
    /// focus is cleared.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidCoordinate`] for a non-finite coordinate while picking.
    pub fn map_click(&mut self, at: Coordinate) -> Result<ClickOutcome, ViewError> {
        if !self.picking {
            if let Focus::Marker(_) = self.focus {
                self.focus = Focus::None;
            }
            return Ok(ClickOutcome::Deselected);
        }
        if !at.is_finite() {
            return Err(ViewError::InvalidCoordinate);
        }

        self.pending = Some(at);
        self.picking = false;
        if !matches!(self.panel, Panel::Registration(_)) {
            self.focus = Focus::None;
            self.panel = Panel::Registration(RegistrationForm::default());
        }
        tracing::debug!(lat = at.lat, lon = at.lon, "outlet location picked");
        Ok(ClickOutcome::Picked(at))
    }

    /// Toggle the category filter. Returns the filter now in effect.
    ///
    /// Any search or marker selection is dropped and a details panel closes.
    pub fn toggle_category(&mut self, category: &str) -> Option<&str> {
        if self.category.as_deref() == Some(category) {
            self.category = None;
        } else {
            self.category = Some(category.to_string());
        }
        self.focus = Focus::None;
        if matches!(self.panel, Panel::Details { .. }) {
            self.panel = Panel::Search;
        }
        self.category.as_deref()
    }

    /// Whether the registration form may be published.
    #[must_use]
    pub fn is_publish_enabled(&self) -> bool {
        self.registration()
            .is_some_and(|form| form.is_publish_enabled(self.pending))
    }

    /// After a successful publish: back to search with the new outlet selected.
    pub(crate) fn finish_registration(&mut self, published: Place) {
        self.pending = None;
        self.picking = false;
        self.panel = Panel::Search;
        self.focus = Focus::Search(published);
    }

    /// Replace stale copies of `place` held by the selection or details panel.
    pub fn refresh(&mut self, place: &Place) {
        match &mut self.focus {
            Focus::Search(held) | Focus::Marker(held) if held.place_id == place.place_id => {
                held.clone_from(place);
            }
            _ => {}
        }
        if let Panel::Details { place: held, .. } = &mut self.panel {
            if held.place_id == place.place_id {
                held.clone_from(place);
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn ensure_browsing(&self, action: &'static str) -> Result<(), ViewError> {
        match self.panel.kind() {
            PanelKind::Search | PanelKind::Details => Ok(()),
            from => Err(ViewError::InvalidTransition { from, action }),
        }
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
