//! Country-center lookup for the `country` region mode.
//!
//! Centers are approximate geographic midpoints in (longitude, latitude)
//! degrees, matching the convention of the rest of the workspace.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// (country name, longitude, latitude) in degrees.
static COUNTRY_CENTERS: &[(&str, f64, f64)] = &[
    ("Argentina", -63.62, -38.42),
    ("Australia", 133.78, -25.27),
    ("Brazil", -51.93, -14.24),
    ("Canada", -106.35, 56.13),
    ("Chile", -71.54, -35.68),
    ("China", 104.20, 35.86),
    ("Egypt", 30.80, 26.82),
    ("France", 2.21, 46.23),
    ("Germany", 10.45, 51.17),
    ("Greece", 21.82, 39.07),
    ("India", 78.96, 20.59),
    ("Indonesia", 113.92, -0.79),
    ("Italy", 12.57, 41.87),
    ("Japan", 138.25, 36.20),
    ("Kenya", 37.91, -0.02),
    ("Mexico", -102.55, 23.63),
    ("Mongolia", 103.85, 46.86),
    ("Morocco", -7.09, 31.79),
    ("New Zealand", 174.89, -40.90),
    ("Nigeria", 8.68, 9.08),
    ("Norway", 8.47, 60.47),
    ("Portugal", -8.22, 39.40),
    ("Russia", 105.32, 61.52),
    ("Saudi Arabia", 45.08, 23.89),
    ("South Africa", 22.94, -30.56),
    ("South Korea", 127.77, 35.91),
    ("Spain", -3.75, 40.46),
    ("Sweden", 18.64, 60.13),
    ("Turkey", 35.24, 38.96),
    ("Ukraine", 31.17, 48.38),
    ("United Kingdom", -3.44, 55.38),
    ("United States", -95.71, 37.09),
];

static LOOKUP: Lazy<HashMap<String, (f64, f64)>> = Lazy::new(|| {
    COUNTRY_CENTERS
        .iter()
        .map(|&(name, lon, lat)| (name.to_lowercase(), (lon, lat)))
        .collect()
});

/// Look up a country's (longitude, latitude) center, case-insensitively.
pub fn center(name: &str) -> Option<(f64, f64)> {
    LOOKUP.get(&name.to_lowercase()).copied()
}

/// Names of all known countries, in table order.
pub fn known_countries() -> impl Iterator<Item = &'static str> {
    COUNTRY_CENTERS.iter().map(|&(name, _, _)| name)
}
