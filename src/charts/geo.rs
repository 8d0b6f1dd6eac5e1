//! Approximate country centroids for placing map markers.

/// `(name, longitude, latitude)`; names are matched case-insensitively.
const CENTROIDS: &[(&str, f64, f64)] = &[
    ("Argentina", -63.6, -38.4),
    ("Australia", 133.8, -25.3),
    ("Austria", 14.6, 47.5),
    ("Bangladesh", 90.4, 23.7),
    ("Belgium", 4.5, 50.5),
    ("Brazil", -51.9, -14.2),
    ("Canada", -106.3, 56.1),
    ("Chile", -71.5, -35.7),
    ("China", 104.2, 35.9),
    ("Colombia", -74.3, 4.6),
    ("Czech Republic", 15.5, 49.8),
    ("Denmark", 9.5, 56.3),
    ("Egypt", 30.8, 26.8),
    ("Finland", 25.7, 61.9),
    ("France", 2.2, 46.2),
    ("Germany", 10.5, 51.2),
    ("Greece", 21.8, 39.1),
    ("India", 78.9, 20.6),
    ("Indonesia", 113.9, -0.8),
    ("Iran", 53.7, 32.4),
    ("Ireland", -8.2, 53.4),
    ("Israel", 34.9, 31.0),
    ("Italy", 12.6, 41.9),
    ("Japan", 138.3, 36.2),
    ("Kenya", 37.9, -0.0),
    ("Malaysia", 101.98, 4.2),
    ("Mexico", -102.6, 23.6),
    ("Netherlands", 5.3, 52.1),
    ("New Zealand", 174.9, -40.9),
    ("Nigeria", 8.7, 9.1),
    ("North Korea", 127.5, 40.3),
    ("Norway", 8.5, 60.5),
    ("Pakistan", 69.3, 30.4),
    ("Philippines", 121.8, 12.9),
    ("Poland", 19.1, 51.9),
    ("Portugal", -8.2, 39.4),
    ("Romania", 24.97, 45.9),
    ("Russia", 105.3, 61.5),
    ("Saudi Arabia", 45.1, 23.9),
    ("Singapore", 103.8, 1.35),
    ("South Africa", 22.9, -30.6),
    ("South Korea", 127.8, 35.9),
    ("Spain", -3.7, 40.5),
    ("Sweden", 18.6, 60.1),
    ("Switzerland", 8.2, 46.8),
    ("Taiwan", 121.0, 23.7),
    ("Thailand", 100.99, 15.9),
    ("Turkey", 35.2, 38.96),
    ("Ukraine", 31.2, 48.4),
    ("United Arab Emirates", 53.8, 23.4),
    ("United Kingdom", -3.4, 55.4),
    ("United States", -95.7, 37.1),
    ("Vietnam", 108.3, 14.1),
];

/// Alternative spellings found in incident feeds.
const ALIASES: &[(&str, &str)] = &[
    ("USA", "United States"),
    ("US", "United States"),
    ("United States of America", "United States"),
    ("UK", "United Kingdom"),
    ("Great Britain", "United Kingdom"),
    ("Russian Federation", "Russia"),
    ("Korea, Republic of", "South Korea"),
    ("UAE", "United Arab Emirates"),
    ("Czechia", "Czech Republic"),
    ("Türkiye", "Turkey"),
];

/// Resolve a country name (or a known alias) to `(longitude, latitude)`.
pub fn country_centroid(name: &str) -> Option<(f64, f64)> {
    let name = name.trim();
    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name);

    CENTROIDS
        .iter()
        .find(|(country, _, _)| country.eq_ignore_ascii_case(canonical))
        .map(|&(_, lon, lat)| (lon, lat))
}
