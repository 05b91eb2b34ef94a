//! Keyword classifier for receipt line items
//!
//! Maps a product name to one spending category by substring matching
//! against fixed keyword tables. Product names on OFD receipts come in
//! Uzbek-Latin, Russian transliteration, and occasionally English, so each
//! table carries the union of the spellings seen in the wild.
//!
//! Categories are tested in `Category` declaration order; the first table
//! with any matching keyword wins. Names that match nothing fall back to
//! `Category::Other`.

use crate::models::Category;

/// Result of classifying a product name
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub category: Category,
    /// True when no keyword matched and the fallback category was used
    pub fallback: bool,
}

const SWEETS: &[&str] = &[
    "shokolad",
    "chocolate",
    "konfet",
    "candy",
    "pechenye",
    "cookie",
    "tort",
    "cake",
    "vafli",
    "waffle",
    "marmelad",
    "halva",
    "holva",
    "zefir",
    "keks",
    "lukum",
    "shirinlik",
];

const BEVERAGES: &[&str] = &[
    "cola",
    "pepsi",
    "fanta",
    "sprite",
    "sok",
    "juice",
    "suv",
    "voda",
    "water",
    "chay",
    "choy",
    "chai",
    "kofe",
    "coffee",
    "qahva",
    "limonad",
    "kvas",
    "mineral",
    "aqua",
    "napitok",
    "ichimlik",
    "pivo",
];

const BREAD: &[&str] = &[
    "non",
    "bread",
    "loaf",
    "baton",
    "bulochka",
    "bulka",
    "lavash",
    "patir",
    "xleb",
    "hleb",
    "khleb",
];

// Snack products whose names often contain a bread keyword ("non chips",
// "xlebtsy kraker"). When any of these is present, the bread rule must not
// fire; the name falls through to the remaining categories.
const BREAD_EXCLUDE: &[&str] = &[
    "kraker",
    "cracker",
    "chips",
    "crisp",
    "sushka",
    "suhar",
    "suxar",
    "galet",
];

const DAIRY: &[&str] = &[
    "sut",
    "moloko",
    "milk",
    "kefir",
    "yogurt",
    "iogurt",
    "qatiq",
    "smetana",
    "tvorog",
    "syr",
    "cheese",
    "qaymoq",
    "ayran",
    "ryazhenka",
    "slivki",
];

const MEAT_FISH: &[&str] = &[
    "gosht",
    "go'sht",
    "myaso",
    "meat",
    "kolbasa",
    "sausage",
    "sosiska",
    "kuritsa",
    "chicken",
    "tovuq",
    "beef",
    "govyad",
    "baranina",
    "farsh",
    "baliq",
    "ryba",
    "seld",
    "losos",
    "tunets",
    "krevet",
];

const PRODUCE: &[&str] = &[
    "olma",
    "apple",
    "yabloko",
    "banan",
    "kartoshka",
    "kartofel",
    "potato",
    "pomidor",
    "tomat",
    "bodring",
    "ogurets",
    "piyoz",
    "luk",
    "limon",
    "lemon",
    "apelsin",
    "orange",
    "mandarin",
    "uzum",
    "vinograd",
    "sabzi",
    "morkov",
    "carrot",
    "kapusta",
    "olcha",
    "gilos",
    "qulupnay",
    "klubnika",
    "zelen",
    "salat",
];

const GRAINS: &[&str] = &[
    "guruch",
    "rice",
    "ris",
    "grechka",
    "grechnev",
    "makaron",
    "spagetti",
    "spaghetti",
    "lapsha",
    "vermishel",
    "muka",
    "yarma",
    "ovsyan",
    "bulgur",
    "perlov",
    "manka",
    "hlopya",
    "xlopya",
];

const HEALTH: &[&str] = &[
    "vitamin",
    "aspirin",
    "paratsetamol",
    "paracetamol",
    "analgin",
    "tabletka",
    "kapsula",
    "sirop",
    "bint",
    "plastyr",
    "dori",
    "lekarstv",
    "citramon",
    "sitramon",
];

const HYGIENE: &[&str] = &[
    "shampun",
    "shampoo",
    "sovun",
    "soap",
    "mylo",
    "zubnaya",
    "toothpaste",
    "salfetka",
    "gigien",
    "deodorant",
    "dezodorant",
    "prokladk",
    "pampers",
    "podguznik",
    "tualetnaya",
];

const HOUSEHOLD: &[&str] = &[
    "poroshok",
    "persil",
    "ariel",
    "fairy",
    "sredstvo",
    "chistyashch",
    "paket",
    "lampochka",
    "batareyka",
    "battery",
    "gubka",
    "sponge",
    "perchatk",
    "folga",
    "plyonka",
];

/// Keyword tables in `Category` declaration order. `Other` has no table; it
/// is the fallback when nothing here matches.
const RULES: &[(Category, &[&str])] = &[
    (Category::Sweets, SWEETS),
    (Category::Beverages, BEVERAGES),
    (Category::Bread, BREAD),
    (Category::Dairy, DAIRY),
    (Category::MeatFish, MEAT_FISH),
    (Category::Produce, PRODUCE),
    (Category::Grains, GRAINS),
    (Category::Health, HEALTH),
    (Category::Hygiene, HYGIENE),
    (Category::Household, HOUSEHOLD),
];

fn matches_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| name.contains(kw))
}

/// Classify a product name into exactly one category.
///
/// Total, deterministic, and pure: the same input always yields the same
/// category, with no network calls or shared state.
pub fn classify(name: &str) -> Classification {
    let name = name.to_lowercase();

    for (category, keywords) in RULES {
        if !matches_any(&name, keywords) {
            continue;
        }
        // Bread keywords appear inside snack names; skip the bread rule when
        // an exclusion term is present and keep testing later categories.
        if *category == Category::Bread && matches_any(&name, BREAD_EXCLUDE) {
            continue;
        }
        return Classification {
            category: *category,
            fallback: false,
        };
    }

    Classification {
        category: Category::Other,
        fallback: true,
    }
}
