//! Markets offering country toplists, keyed by ISO 3166-1 alpha-2 code.

const COUNTRIES: &[(&str, &str)] = &[
    ("AD", "Andorra"),
    ("AR", "Argentina"),
    ("AT", "Austria"),
    ("AU", "Australia"),
    ("BE", "Belgium"),
    ("CH", "Switzerland"),
    ("CO", "Colombia"),
    ("CY", "Cyprus"),
    ("DE", "Germany"),
    ("DK", "Denmark"),
    ("EE", "Estonia"),
    ("ES", "Spain"),
    ("FI", "Finland"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("GR", "Greece"),
    ("HK", "Hong Kong"),
    ("IE", "Ireland"),
    ("IS", "Iceland"),
    ("IT", "Italy"),
    ("LI", "Liechtenstein"),
    ("LT", "Lithuania"),
    ("LU", "Luxembourg"),
    ("LV", "Latvia"),
    ("MC", "Monaco"),
    ("MX", "Mexico"),
    ("MY", "Malaysia"),
    ("NL", "Netherlands"),
    ("NO", "Norway"),
    ("NZ", "New Zealand"),
    ("PT", "Portugal"),
    ("SE", "Sweden"),
    ("SG", "Singapore"),
    ("TR", "Turkey"),
    ("TW", "Taiwan"),
    ("US", "United States"),
];

/// Display name for an uppercase country code.
pub fn country_name(code: &str) -> Option<&'static str> {
    COUNTRIES
        .binary_search_by(|(known, _)| (*known).cmp(code))
        .ok()
        .map(|idx| COUNTRIES[idx].1)
}

pub fn is_known(code: &str) -> bool {
    country_name(code).is_some()
}
