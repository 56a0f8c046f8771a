use std::path::Path;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::ProviderRecord;

/// Errors that can occur when loading providers
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read provider file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid provider file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Provider data source for the matcher
///
/// Holds provider records in memory. Records can be loaded from a JSON file
/// at startup or seeded with a fixed sample set.
#[derive(Default)]
pub struct ProviderStore {
    providers: RwLock<Vec<ProviderRecord>>,
}

impl ProviderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_providers(providers: Vec<ProviderRecord>) -> Self {
        Self {
            providers: RwLock::new(providers),
        }
    }

    /// Read a JSON array of provider records
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<ProviderRecord>, StoreError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub async fn count(&self) -> usize {
        self.providers.read().await.len()
    }

    /// Snapshot of all providers for a matching call
    pub async fn all(&self) -> Vec<ProviderRecord> {
        self.providers.read().await.clone()
    }

    /// Add providers, skipping any whose email is already registered.
    ///
    /// Returns how many were added.
    pub async fn insert_many(&self, records: Vec<ProviderRecord>) -> usize {
        let mut providers = self.providers.write().await;
        let mut added = 0;

        for record in records {
            let exists = providers
                .iter()
                .any(|p| p.email.eq_ignore_ascii_case(&record.email));
            if !exists {
                providers.push(record);
                added += 1;
            }
        }

        added
    }

    /// Seed the sample providers
    pub async fn seed_sample_providers(&self) -> usize {
        let added = self.insert_many(sample_providers()).await;
        tracing::info!("Seeded {} sample providers", added);
        added
    }

    /// Seed the sample providers only if the store is empty
    pub async fn ensure_seeded(&self) -> usize {
        if self.count().await == 0 {
            self.seed_sample_providers().await
        } else {
            0
        }
    }
}

/// Fixed sample providers around Springfield, IL
pub fn sample_providers() -> Vec<ProviderRecord> {
    vec![
        sample(
            1,
            "Quick Fix Plumbing",
            "Quick Fix Plumbing LLC",
            "contact@quickfixplumbing.com",
            "(555) 123-4567",
            ("123 Main St", "62701"),
            (39.7817, -89.6501),
            "plumbing",
            &["Emergency Repairs", "Leak Detection", "Pipe Replacement"],
            "Professional plumbing services with 24/7 emergency support",
            (75.0, 150.0),
            "same_day",
            (4.8, 234),
        ),
        sample(
            2,
            "SafeWire Electrical",
            "SafeWire Electrical Services",
            "info@safewireelectric.com",
            "(555) 234-5678",
            ("456 Oak Ave", "62702"),
            (39.7901, -89.6440),
            "electrical",
            &["Emergency Electrical", "Panel Upgrades", "Wiring"],
            "Licensed electricians providing safe and reliable electrical work",
            (85.0, 180.0),
            "same_day",
            (4.9, 156),
        ),
        sample(
            3,
            "Sparkling Clean",
            "Sparkling Clean Services",
            "hello@sparklingclean.com",
            "(555) 345-6789",
            ("789 Pine St", "62703"),
            (39.7990, -89.6350),
            "cleaning",
            &["Deep Cleaning", "Regular Maintenance", "Move-in/out"],
            "Professional house cleaning with eco-friendly products",
            (25.0, 45.0),
            "within_week",
            (4.7, 312),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: i64,
    name: &str,
    business_name: &str,
    email: &str,
    phone: &str,
    (address, zip_code): (&str, &str),
    (latitude, longitude): (f64, f64),
    category: &str,
    specialties: &[&str],
    description: &str,
    (rate_min, rate_max): (f64, f64),
    availability: &str,
    (average_rating, total_reviews): (f64, u32),
) -> ProviderRecord {
    ProviderRecord {
        id,
        name: name.to_string(),
        business_name: Some(business_name.to_string()),
        email: email.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip_code: zip_code.to_string(),
        county: None,
        sub_county: None,
        ward: None,
        latitude: Some(latitude),
        longitude: Some(longitude),
        categories: vec![category.to_string()],
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        description: Some(description.to_string()),
        hourly_rate_min: Some(rate_min),
        hourly_rate_max: Some(rate_max),
        availability: availability.to_string(),
        average_rating,
        total_reviews,
        is_active: true,
        is_verified: true,
    }
}
