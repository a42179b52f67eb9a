use berth_core::Station;

/// Case-insensitive match on station name or code. Blank text matches all.
pub fn search_stations(stations: &[Station], text: &str) -> Vec<Station> {
    let needle = text.trim().to_lowercase();
    stations
        .iter()
        .filter(|s| {
            needle.is_empty()
                || s.name.to_lowercase().contains(&needle)
                || s.code.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
