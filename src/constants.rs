use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

// ========== Source columns ==========
pub const NAME: &str = "NAME";
pub const STREET: &str = "STREET";
pub const CITY: &str = "CITY";
pub const STATE: &str = "STATE";
pub const ZIP: &str = "ZIP";
pub const ICO: &str = "ICO";
pub const ASSET_AMT: &str = "ASSET_AMT";
pub const INCOME_AMT: &str = "INCOME_AMT";
pub const REVENUE_AMT: &str = "REVENUE_AMT";
pub const NTEE_CD: &str = "NTEE_CD";

// ========== Derived columns ==========
pub const MISSION: &str = "Mission";
pub const MISSION_CODE: &str = "Mission_Code";
pub const NEEDS_MANUAL_REVIEW: &str = "needs_manual_review";
pub const CITY_CLEAN: &str = "CITY_CLEAN";

/// Columns that are always loaded as text, whatever their values look like.
/// ZIP in particular must keep its leading zeros.
pub const TEXT_COLUMNS: [&str; 7] = [NAME, STREET, CITY, STATE, ZIP, ICO, NTEE_CD];

/// A record missing any of these cannot be mailed without a manual lookup.
pub const REVIEW_COLUMNS: [&str; 4] = [NAME, STREET, CITY, ASSET_AMT];

/// Export projection, in output order.
pub const CONTACT_COLUMNS: [&str; 10] = [
    NAME,
    STREET,
    CITY,
    STATE,
    ZIP,
    ICO,
    MISSION,
    ASSET_AMT,
    INCOME_AMT,
    REVENUE_AMT,
];

pub const FINANCIAL_COLUMNS: [&str; 6] = [NAME, CITY, STATE, ASSET_AMT, INCOME_AMT, REVENUE_AMT];

pub const HEAD_ROWS: usize = 5;
pub const OVERVIEW_ROWS: usize = 10;

pub const DEFAULT_INPUT_PATH: &str = "eo_ma.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "pace_aligned_contacts.csv";

/// Spellings read as a missing cell, on top of the empty string.
pub const NULL_PATTERN: &str =
    r"^(|NA|N/A|n/a|NaN|nan|-NaN|-nan|NULL|null|None|<NA>|#N/A|#N/A N/A|#NA)$";

/// NTEE major group letter → mission label.
pub const MISSION_CODES: [(char, &str); 26] = [
    ('A', "Arts, Culture & Humanities"),
    ('B', "Education"),
    ('C', "Environmental Quality & Protection"),
    ('D', "Animal-Related"),
    ('E', "Health – General & Rehabilitative"),
    ('F', "Mental Health & Crisis Intervention"),
    ('G', "Diseases, Disorders & Medical Disciplines"),
    ('H', "Medical Research"),
    ('I', "Crime & Legal-Related"),
    ('J', "Employment & Job-Related"),
    ('K', "Food, Agriculture & Nutrition"),
    ('L', "Housing & Shelter"),
    ('M', "Public Safety, Disaster Preparedness & Relief"),
    ('N', "Recreation, Sports & Leisure"),
    ('O', "Youth Development"),
    ('P', "Human Services – Multipurpose & Other"),
    ('Q', "International, Foreign Affairs & National Security"),
    ('R', "Civil Rights, Social Action & Advocacy"),
    ('S', "Community Improvement & Capacity Building"),
    ('T', "Philanthropy, Voluntarism & Grantmaking Foundations"),
    ('U', "Science & Technology Research & Services"),
    ('V', "Social Science Research & Services"),
    ('W', "Public & Societal Benefit – Multipurpose"),
    ('X', "Religion-Related, Spiritual Development"),
    ('Y', "Mutual/Membership Benefit Organizations"),
    ('Z', "Unknown / Unclassified"),
];

/// Program focus areas: Human Services, Community Improvement, Housing,
/// Food & Nutrition, Education.
pub const FOCUS_CODES: [char; 5] = ['P', 'S', 'L', 'K', 'B'];

/// Greater New Bedford towns, already lowercased.
pub const GREATER_NEW_BEDFORD: [&str; 9] = [
    "new bedford",
    "dartmouth",
    "fairhaven",
    "acushnet",
    "mattapoisett",
    "marion",
    "rochester",
    "westport",
    "wareham",
];

pub static MISSION_MAP: Lazy<HashMap<char, &'static str>> =
    Lazy::new(|| MISSION_CODES.iter().copied().collect());

pub static FOCUS_MISSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    FOCUS_CODES
        .iter()
        .filter_map(|code| MISSION_MAP.get(code).copied())
        .collect()
});

pub static TOWNS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| GREATER_NEW_BEDFORD.iter().copied().collect());
