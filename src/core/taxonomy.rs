//! Service category taxonomy: keyword profiles used by the detector and the
//! display groups served to clients.
//!
//! A [`Taxonomy`] is built once at startup, either from the built-in home
//! services tables or from a TOML file, and is shared read-only afterwards.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ServiceCategory;

/// Errors that can occur while loading a taxonomy or building a detector over it
#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Failed to read taxonomy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid taxonomy file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid keyword {keyword:?} for {category}: {reason}")]
    InvalidKeyword {
        category: ServiceCategory,
        keyword: String,
        reason: &'static str,
    },

    #[error("Category {0} has more than one keyword profile")]
    DuplicateProfile(ServiceCategory),

    #[error("The unknown category cannot carry keywords")]
    UnknownProfile,

    #[error("Invalid detector settings: {0}")]
    InvalidSettings(&'static str),
}

/// Keywords that point at one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryKeywordProfile {
    pub category: ServiceCategory,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub emergency_keywords: Vec<String>,
}

impl CategoryKeywordProfile {
    fn from_static(
        category: ServiceCategory,
        keywords: &[&str],
        emergency_keywords: &[&str],
    ) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            emergency_keywords: emergency_keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Display metadata for one category inside a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDisplay {
    pub category: ServiceCategory,
    pub name: String,
    pub icon: String,
    pub description: String,
}

/// A named group of categories for UI display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    pub icon: String,
    pub description: String,
    pub color: String,
    pub categories: Vec<CategoryDisplay>,
}

/// Immutable set of keyword profiles and display groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    profiles: Vec<CategoryKeywordProfile>,
    #[serde(default)]
    groups: Vec<CategoryGroup>,
}

impl Taxonomy {
    /// Build a taxonomy from explicit parts, validating every keyword
    pub fn new(
        profiles: Vec<CategoryKeywordProfile>,
        groups: Vec<CategoryGroup>,
    ) -> Result<Self, TaxonomyError> {
        let taxonomy = Self { profiles, groups };
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Parse a taxonomy from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self, TaxonomyError> {
        let taxonomy: Taxonomy = toml::from_str(source)?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Load a taxonomy from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TaxonomyError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Keyword profiles in declaration order. Detection ties resolve to the earliest entry.
    pub fn profiles(&self) -> &[CategoryKeywordProfile] {
        &self.profiles
    }

    pub fn profile(&self, category: ServiceCategory) -> Option<&CategoryKeywordProfile> {
        self.profiles.iter().find(|p| p.category == category)
    }

    /// Display groups in presentation order
    pub fn list_groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    fn validate(&self) -> Result<(), TaxonomyError> {
        let mut seen = HashSet::new();

        for profile in &self.profiles {
            if profile.category == ServiceCategory::Unknown {
                return Err(TaxonomyError::UnknownProfile);
            }
            if !seen.insert(profile.category) {
                return Err(TaxonomyError::DuplicateProfile(profile.category));
            }

            for keyword in profile.keywords.iter().chain(&profile.emergency_keywords) {
                let reason = if keyword.trim().is_empty() {
                    Some("keyword is empty")
                } else if keyword.to_lowercase() != *keyword {
                    Some("keyword must be lowercase")
                } else if keyword.trim() != keyword {
                    Some("keyword has surrounding whitespace")
                } else {
                    None
                };

                if let Some(reason) = reason {
                    return Err(TaxonomyError::InvalidKeyword {
                        category: profile.category,
                        keyword: keyword.clone(),
                        reason,
                    });
                }
            }
        }

        Ok(())
    }

    /// The built-in home services taxonomy
    pub fn home_services() -> Self {
        Self {
            profiles: home_services_profiles(),
            groups: home_services_groups(),
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::home_services()
    }
}

fn home_services_profiles() -> Vec<CategoryKeywordProfile> {
    use ServiceCategory::*;

    vec![
        CategoryKeywordProfile::from_static(
            Plumbing,
            &[
                "tap", "faucet", "sink", "toilet", "flush", "water", "leak", "pipe", "drain",
                "shower", "bath", "plumber", "valve", "pressure", "hot water", "cold water",
                "blockage", "clog", "overflow", "drip", "burst", "sewage", "bathroom",
                "kitchen sink",
            ],
            &["burst", "flooding", "overflow", "sewage backup", "no water"],
        ),
        CategoryKeywordProfile::from_static(
            Electrical,
            &[
                "electric", "electricity", "power", "outlet", "switch", "light", "lights",
                "bulb", "wire", "circuit", "breaker", "fuse", "electrician", "voltage", "shock",
                "spark", "sparks", "blackout", "surge", "installation", "repair electrical",
                "no power", "flickering",
            ],
            &["spark", "sparks", "shock", "burning smell", "no power", "electrical fire"],
        ),
        CategoryKeywordProfile::from_static(
            Hvac,
            &[
                "heating", "cooling", "air conditioning", "ac", "hvac", "furnace", "boiler",
                "thermostat", "vent", "duct", "filter", "temperature", "hot", "cold",
                "air conditioner", "heat pump", "ventilation",
            ],
            &["no heat", "no cooling", "carbon monoxide"],
        ),
        CategoryKeywordProfile::from_static(
            Cleaning,
            &[
                "clean", "cleaning", "house cleaning", "maid", "housekeeping", "vacuum", "mop",
                "dust", "sanitize", "deep clean", "spring cleaning", "maintenance clean",
            ],
            &[],
        ),
        CategoryKeywordProfile::from_static(
            PestControl,
            &[
                "pest", "bug", "insect", "rat", "mouse", "cockroach", "ant", "spider",
                "termite", "bee", "wasp", "exterminator", "infestation", "rodent",
            ],
            &["infestation", "bees", "wasps", "aggressive"],
        ),
        CategoryKeywordProfile::from_static(
            Carpentry,
            &[
                "wood", "carpenter", "door", "window", "cabinet", "shelf", "deck", "fence",
                "repair wood", "install", "frame", "trim", "molding", "woodwork",
            ],
            &["broken door", "security"],
        ),
        CategoryKeywordProfile::from_static(
            Construction,
            &[
                "build", "construction", "contractor", "renovation", "remodel", "addition",
                "foundation", "roof", "wall", "extension", "new house", "building", "deck",
                "patio", "garage", "shed", "fence", "driveway", "walkway", "concrete",
                "masonry", "framing", "siding", "basement", "attic",
            ],
            &[],
        ),
        CategoryKeywordProfile::from_static(
            Painting,
            &[
                "paint", "painting", "painter", "interior paint", "exterior paint",
                "wall paint", "ceiling paint", "primer", "brush", "roller", "spray paint",
                "touch up",
            ],
            &[],
        ),
        CategoryKeywordProfile::from_static(
            Flooring,
            &[
                "floor", "flooring", "carpet", "tile", "hardwood", "laminate", "vinyl", "rug",
                "installation", "refinish", "repair floor", "subfloor",
            ],
            &[],
        ),
        CategoryKeywordProfile::from_static(
            Roofing,
            &[
                "roof", "roofing", "shingle", "gutter", "downspout", "leak roof",
                "roof repair", "roof replacement", "chimney", "skylight", "flashing",
            ],
            &["roof leak", "missing shingles", "storm damage"],
        ),
        CategoryKeywordProfile::from_static(
            Landscaping,
            &[
                "yard", "garden", "lawn", "grass", "landscaping", "tree", "bush", "shrub",
                "mowing", "trimming", "planting", "mulch", "irrigation", "sprinkler",
            ],
            &["fallen tree", "storm damage"],
        ),
        CategoryKeywordProfile::from_static(
            ApplianceRepair,
            &[
                "appliance", "refrigerator", "washer", "dryer", "dishwasher", "oven", "stove",
                "microwave", "freezer", "repair appliance", "not working", "broken appliance",
            ],
            &["gas leak", "sparking appliance"],
        ),
        CategoryKeywordProfile::from_static(
            GeneralMaintenance,
            &[
                "handyman", "maintenance", "repair", "fix", "general repair", "odd jobs",
                "small repairs", "maintenance work", "home maintenance",
            ],
            &[],
        ),
    ]
}

fn display(category: ServiceCategory, name: &str, icon: &str, description: &str) -> CategoryDisplay {
    CategoryDisplay {
        category,
        name: name.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
    }
}

fn group(
    name: &str,
    icon: &str,
    description: &str,
    color: &str,
    categories: Vec<CategoryDisplay>,
) -> CategoryGroup {
    CategoryGroup {
        name: name.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
        color: color.to_string(),
        categories,
    }
}

fn home_services_groups() -> Vec<CategoryGroup> {
    use ServiceCategory::*;

    vec![
        group(
            "Home Systems",
            "fas fa-home",
            "Essential home infrastructure",
            "blue",
            vec![
                display(Plumbing, "Plumbing", "fas fa-wrench", "Pipes, fixtures, water issues"),
                display(Electrical, "Electrical", "fas fa-bolt", "Wiring, outlets, lighting"),
                display(Hvac, "Heating & Cooling", "fas fa-thermometer-half", "HVAC, ventilation, climate"),
            ],
        ),
        group(
            "Home Improvement",
            "fas fa-hammer",
            "Renovation and construction",
            "green",
            vec![
                display(Construction, "Construction", "fas fa-hard-hat", "Building, additions, major projects"),
                display(Carpentry, "Carpentry", "fas fa-hammer", "Woodwork, cabinets, furniture"),
                display(Painting, "Painting", "fas fa-paint-roller", "Interior/exterior painting"),
                display(Flooring, "Flooring", "fas fa-th-large", "Floors, tiles, carpeting"),
                display(Roofing, "Roofing", "fas fa-home", "Roof repairs, installation"),
            ],
        ),
        group(
            "Home Services",
            "fas fa-broom",
            "Regular maintenance and care",
            "purple",
            vec![
                display(Cleaning, "Cleaning", "fas fa-broom", "House cleaning, deep cleaning"),
                display(Landscaping, "Landscaping", "fas fa-leaf", "Yard work, gardening, lawn care"),
                display(PestControl, "Pest Control", "fas fa-bug", "Extermination, prevention"),
            ],
        ),
        group(
            "Repairs & Maintenance",
            "fas fa-tools",
            "Fix and maintain your home",
            "orange",
            vec![
                display(ApplianceRepair, "Appliance Repair", "fas fa-cog", "Fix appliances, equipment"),
                display(GeneralMaintenance, "General Maintenance", "fas fa-tools", "Handyman, general repairs"),
            ],
        ),
    ]
}
