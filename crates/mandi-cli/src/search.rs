use mandi_core::AppConfig;
use mandi_search::{is_searchable, NominatimClient, MIN_QUERY_LEN};

/// Run a single lookup and print the candidates.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the lookup fails.
pub(crate) async fn run_search(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    if !is_searchable(query) {
        println!("query must be at least {MIN_QUERY_LEN} characters");
        return Ok(());
    }

    let client = NominatimClient::from_config(config)?;
    let places = client.try_lookup(query).await?;

    if places.is_empty() {
        println!("no results found for {query:?}");
        return Ok(());
    }

    for place in &places {
        let position = place
            .position()
            .map_or_else(|| "?".to_string(), |p| p.to_string());
        println!("{:<12}{:<24}{}", place.place_id, position, place.display_name);
    }
    Ok(())
}
