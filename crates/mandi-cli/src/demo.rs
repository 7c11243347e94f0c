//! Scripted vendor session: sign in, register an outlet, stock it.

use std::sync::Arc;

use anyhow::Context;
use mandi_app::{AppState, MapEvent, NoGeolocation, Services, SimulatedAuthService};
use mandi_core::{AppConfig, Coordinate, Role};
use mandi_search::NominatimClient;
use mandi_store::{seeded_store, SeedConfig};

use crate::browse::load_catalog;

/// A short hop north-east of the default centre.
const DEMO_OUTLET_POSITION: Coordinate = Coordinate::new(23.0791, 76.8532);

/// # Errors
///
/// Returns an error if setup fails or any step of the session is rejected.
pub(crate) async fn run_demo(config: &AppConfig) -> anyhow::Result<()> {
    let services = Services {
        auth: Arc::new(SimulatedAuthService::from_config(config)),
        search: Arc::new(NominatimClient::from_config(config)?),
        geolocator: Arc::new(NoGeolocation),
    };
    let mut app = AppState::new(
        config.clone(),
        load_catalog(config)?,
        seeded_store(&SeedConfig::from_config(config))?,
        services,
    );

    let user = app.demo_login(Role::Vendor).await?;
    println!("signed in as {} ({})", user.name, user.role);
    println!("already managing {} outlet(s)", app.my_outlets()?.len());

    app.open_registration()?;
    {
        let form = app.registration_form()?;
        form.name = "Ramu Mart".to_string();
        form.category = "vegetables".to_string();
        form.contact = "+91 90000 11111".to_string();
        form.add_draft_item("Tomato");
        form.add_draft_item("Potato");
    }
    app.enter_picking()?;
    app.handle_map_event(MapEvent::Click(DEMO_OUTLET_POSITION))?;
    let place_id = app.publish()?;
    println!("published outlet {place_id}");

    app.open_outlet(place_id)?;
    let onion = app.add_item("Onion", Some("₹30/kg"))?;
    app.edit_item(&onion, "Onion", Some("₹25/kg"))?;

    let tomato = app
        .management()?
        .and_then(|session| {
            session
                .items()
                .into_iter()
                .find(|item| item.name == "Tomato")
        })
        .context("published outlet lost its Tomato entry")?;
    app.toggle_stock(&tomato.id)?;
    app.toggle_delivery()?;
    app.back()?;

    let place = app
        .store()?
        .get(place_id)
        .context("published outlet missing from store")?;
    println!("{}", serde_json::to_string_pretty(place)?);
    Ok(())
}
