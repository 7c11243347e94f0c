//! Headless client core for the vendor map.
//!
//! [`AppState`] is the single application-state object. A rendering layer
//! forwards user input to it and reads back panels, markers and search
//! snapshots.

pub mod app;
pub mod details;
pub mod error;
pub mod geolocation;
pub mod manage;
pub mod map;
pub mod registration;
pub mod session;
pub mod view;

pub use app::{AppState, MapOutcome, Services};
pub use details::PlaceDetails;
pub use error::AppError;
pub use geolocation::{
    locate_or_default, FixedPosition, GeolocationError, Geolocator, NoGeolocation,
};
pub use manage::{EditDraft, ManageError, ManagementSession};
pub use map::{MapConfig, MapEvent, MapSurface, MarkerKind, MarkerPopup, MarkerSpec};
pub use registration::{RegistrationError, RegistrationForm};
pub use session::{AuthError, AuthService, Session, SimulatedAuthService};
pub use view::{
    ClickOutcome, DetailOrigin, Panel, PanelKind, Selection, ViewController, ViewError,
};
