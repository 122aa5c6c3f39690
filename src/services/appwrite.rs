use crate::models::{Connection, MatchCriteria, UserProfile};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// All persistence lives in the Appwrite backend; this client only reads
/// what one matching pass needs:
/// - the viewer profile
/// - the candidate pool (bounding-box pre-filtered where possible)
/// - the viewer's connections
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub user_profiles: String,
    pub connections: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        }
    }

    fn documents_url(&self, collection: &str, queries: &[String]) -> String {
        let base = format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        );

        if queries.is_empty() {
            return base;
        }

        let queries_json = serde_json::to_string(queries).unwrap_or_default();
        format!("{}?query={}", base, urlencoding::encode(&queries_json))
    }

    async fn fetch_documents(&self, url: &str) -> Result<Vec<Value>, AppwriteError> {
        let response = self
            .client
            .get(url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Document query failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        json.get("documents")
            .and_then(|d| d.as_array())
            .cloned()
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))
    }

    /// Get a single profile by user ID
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, AppwriteError> {
        let queries = vec![format!("equal(\"userId\", \"{}\")", user_id)];
        let url = self.documents_url(&self.collections.user_profiles, &queries);

        tracing::debug!("Fetching profile for user: {}", user_id);

        let documents = self.fetch_documents(&url).await?;
        let doc = documents
            .first()
            .ok_or_else(|| AppwriteError::NotFound(format!("Profile not found for user {}", user_id)))?;

        let data = doc.get("data").unwrap_or(doc);

        serde_json::from_value(data.clone())
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Query the candidate pool for a viewer
    ///
    /// Pushes cheap exclusions into the document query (self, role,
    /// gender, bounding box around the viewer when both a location and a
    /// distance cap exist). The exact filtering happens in the matcher;
    /// profiles that fail to parse are skipped, never fatal.
    pub async fn query_candidates(
        &self,
        viewer: &UserProfile,
        criteria: &MatchCriteria,
        limit: usize,
    ) -> Result<Vec<UserProfile>, AppwriteError> {
        let mut queries = vec![
            format!("notEqual(\"userId\", \"{}\")", viewer.user_id),
            format!("limit({})", limit),
        ];

        if let Some(role) = criteria.role {
            let tag = serde_json::to_string(&role).unwrap_or_default();
            queries.push(format!("equal(\"role\", {})", tag));
        }

        if let Some(gender) = criteria.gender.as_deref().filter(|g| !g.is_empty()) {
            queries.push(format!("equal(\"gender\", \"{}\")", gender));
        }

        if let (Some((lat, lon)), Some(radius_km)) = (viewer.location(), criteria.max_distance_km) {
            let bbox = crate::core::distance::calculate_bounding_box(lat, lon, radius_km);
            queries.push(format!("greaterThan(\"latitude\", {})", bbox.min_lat));
            queries.push(format!("lessThan(\"latitude\", {})", bbox.max_lat));
            queries.push(format!("greaterThan(\"longitude\", {})", bbox.min_lon));
            queries.push(format!("lessThan(\"longitude\", {})", bbox.max_lon));
        }

        let url = self.documents_url(&self.collections.user_profiles, &queries);
        let documents = self.fetch_documents(&url).await?;

        let profiles: Vec<UserProfile> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .collect();

        tracing::debug!(
            "Queried {} candidates for {} ({} documents)",
            profiles.len(),
            viewer.user_id,
            documents.len()
        );

        Ok(profiles)
    }

    /// Fetch all connections touching a user, in either direction
    pub async fn get_connections(&self, user_id: &str) -> Result<Vec<Connection>, AppwriteError> {
        let mut connections = Vec::new();

        for field in ["senderId", "receiverId"] {
            let queries = vec![format!("equal(\"{}\", \"{}\")", field, user_id)];
            let url = self.documents_url(&self.collections.connections, &queries);
            let documents = self.fetch_documents(&url).await?;

            connections.extend(documents.iter().filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value::<Connection>(data.clone()).ok()
            }));
        }

        tracing::debug!("Fetched {} connections for {}", connections.len(), user_id);

        Ok(connections)
    }

    /// Ping the Appwrite health endpoint
    pub async fn health_check(&self) -> Result<bool, AppwriteError> {
        let url = format!("{}/health", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}
