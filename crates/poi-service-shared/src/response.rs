//! Response bodies for the POI endpoints.
//!
//! Queries answer with `{results: [...]}`. Mutations answer with a
//! `{success, message, ...}` envelope; "not found" is expressed in that
//! envelope with `success: false` rather than as a problem document.

use serde::{Deserialize, Serialize};

use poi_lib::{Poi, PoiId};

/// A point of interest as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiItem {
    pub id: PoiId,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl From<Poi> for PoiItem {
    fn from(poi: Poi) -> Self {
        Self {
            id: poi.id,
            name: poi.name,
            x: poi.x,
            y: poi.y,
        }
    }
}

/// Result list for listing, name search and proximity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<PoiItem>,
}

impl From<Vec<Poi>> for SearchResponse {
    fn from(pois: Vec<Poi>) -> Self {
        Self {
            results: pois.into_iter().map(PoiItem::from).collect(),
        }
    }
}

/// Envelope for create, read-one and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poi: Option<PoiItem>,
}

impl PoiResponse {
    pub fn created(poi: Poi) -> Self {
        Self {
            success: true,
            message: format!("POI '{}' created successfully", poi.name),
            poi: Some(poi.into()),
        }
    }

    pub fn found(poi: Poi) -> Self {
        Self {
            success: true,
            message: format!("POI {} found", poi.id),
            poi: Some(poi.into()),
        }
    }

    pub fn updated(poi: Poi) -> Self {
        Self {
            success: true,
            message: "POI updated successfully".to_string(),
            poi: Some(poi.into()),
        }
    }

    pub fn not_found(id: PoiId) -> Self {
        Self {
            success: false,
            message: format!("POI with ID {} not found", id),
            poi: None,
        }
    }

    /// Envelope for a mutation the store could not carry out.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            poi: None,
        }
    }
}

/// Envelope for delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_id: Option<PoiId>,
}

impl DeleteResponse {
    pub fn deleted(id: PoiId) -> Self {
        Self {
            success: true,
            message: format!("POI {} removed successfully", id),
            deleted_id: Some(id),
        }
    }

    pub fn not_found(id: PoiId) -> Self {
        Self {
            success: false,
            message: format!("POI {} not found", id),
            deleted_id: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            deleted_id: None,
        }
    }
}
