//! Venue dataset: halls, booth outlines and exhibitors
//!
//! Read-only input loaded once at startup. Missing arrays deserialize as
//! empty so a partial dataset still yields a usable (if empty) map.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::geometry::Point;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueData {
    #[serde(default)]
    pub maps: Vec<HallMap>,
    #[serde(default)]
    pub stands: Vec<Stand>,
    #[serde(default)]
    pub exhibitors: Vec<Exhibitor>,
}

/// One hall floor plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HallMap {
    pub title: String,
    /// "xMin yMin xMax yMax"
    #[serde(default)]
    pub bounds: String,
    #[serde(default)]
    pub flattened_image: String,
    /// Booth labels shown on this hall, in drawing order
    #[serde(default)]
    pub stands: Vec<String>,
}

/// Booth outline; points are `[y, x]` pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stand {
    pub label: String,
    #[serde(default)]
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Exhibitor {
    pub stand: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// All exhibitor records sharing one booth, merged for display
#[derive(Debug, Clone, PartialEq)]
pub struct MergedExhibitor {
    pub stand: String,
    pub title: String,
    pub description: String,
    pub logo: Option<String>,
    pub website: String,
    pub url: String,
    pub all: Vec<Exhibitor>,
}

/// A clickable booth on one hall
#[derive(Debug, Clone, PartialEq)]
pub struct MapStand {
    pub label: String,
    pub polygon: Vec<Point>,
    pub exhibitor: MergedExhibitor,
}

impl HallMap {
    /// Parse the space-separated bounds; `None` unless exactly four numbers
    pub fn bounds(&self) -> Option<Bounds> {
        let values = self
            .bounds
            .split_whitespace()
            .map(|v| v.parse::<f64>().ok())
            .collect::<Option<Vec<_>>>()?;
        match values.as_slice() {
            &[x_min, y_min, x_max, y_max] => Some(Bounds { x_min, y_min, x_max, y_max }),
            _ => None,
        }
    }
}

impl VenueData {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read venue dataset from {:?}", path))?;
        let data: VenueData = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse venue dataset from {:?}", path))?;
        info!(
            maps = data.maps.len(),
            stands = data.stands.len(),
            exhibitors = data.exhibitors.len(),
            "Loaded venue dataset"
        );
        Ok(data)
    }

    /// Hall by title; the first hall when `title` is `None`
    pub fn find_map(&self, title: Option<&str>) -> Option<&HallMap> {
        match title {
            Some(title) => self.maps.iter().find(|m| m.title == title),
            None => self.maps.first(),
        }
    }

    /// Merged exhibitor info for a booth, if any exhibitor is assigned
    pub fn merged_exhibitor(&self, label: &str) -> Option<MergedExhibitor> {
        let matching: Vec<Exhibitor> = self
            .exhibitors
            .iter()
            .filter(|e| e.stand == label)
            .cloned()
            .collect();
        let first = matching.first()?;

        let non_empty = |value: &Option<String>| value.as_ref().filter(|v| !v.is_empty()).cloned();

        Some(MergedExhibitor {
            stand: label.to_string(),
            title: matching.iter().map(|e| e.title.as_str()).collect::<Vec<_>>().join(" / "),
            description: matching
                .iter()
                .map(|e| format!("{}\n", e.description))
                .collect::<Vec<_>>()
                .join("\n\n"),
            logo: matching.iter().find_map(|e| non_empty(&e.logo)),
            website: matching.iter().find_map(|e| non_empty(&e.website)).unwrap_or_default(),
            url: first.url.clone().unwrap_or_default(),
            all: matching,
        })
    }

    /// Booth outline for `label`, concatenating every record with that label
    pub fn polygon(&self, label: &str) -> Vec<Point> {
        self.stands
            .iter()
            .filter(|s| s.label == label)
            .flat_map(|s| s.points.iter().map(|&[y, x]| Point::new(x, y)))
            .collect()
    }

    /// Clickable booths of one hall, in hall order
    /// Booths without an exhibitor or without an outline are skipped.
    pub fn map_stands(&self, map: &HallMap) -> Vec<MapStand> {
        let stands: Vec<MapStand> = map
            .stands
            .iter()
            .filter_map(|label| {
                let exhibitor = self.merged_exhibitor(label)?;
                let polygon = self.polygon(label);
                if polygon.is_empty() {
                    return None;
                }
                Some(MapStand {
                    label: label.clone(),
                    polygon,
                    exhibitor,
                })
            })
            .collect();
        debug!(hall = %map.title, count = stands.len(), "Built hall booths");
        stands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DATASET: &str = r#"{
        "maps": [
            {"title": "Hall 1", "bounds": "0 0 100 50", "flattened_image": "h1.png", "stands": ["A1", "A2", "A3"]},
            {"title": "Hall 2", "bounds": "bad", "flattened_image": "h2.png", "stands": ["B1"]}
        ],
        "stands": [
            {"label": "A1", "points": [[0, 0], [10, 0], [10, 10], [0, 10]]},
            {"label": "A2", "points": [[0, 20], [10, 20]]},
            {"label": "A2", "points": [[10, 30], [0, 30]]},
            {"label": "B1", "points": [[0, 0], [5, 0], [5, 5]]}
        ],
        "exhibitors": [
            {"stand": "A1", "title": "Meeple Co", "description": "Wooden bits", "website": ""},
            {"stand": "A1", "title": "Dice Ltd", "description": "Dice", "logo": "dice.png", "website": "https://dice.example", "url": "https://x/dice"},
            {"stand": "A2", "title": "Cards Inc", "description": "Cards", "url": "https://x/cards"},
            {"stand": "A3", "title": "No Outline", "description": ""}
        ]
    }"#;

    fn venue() -> VenueData {
        serde_json::from_str(DATASET).unwrap()
    }

    #[test]
    fn test_bounds_parse() {
        let data = venue();
        assert_eq!(
            data.maps[0].bounds(),
            Some(Bounds { x_min: 0.0, y_min: 0.0, x_max: 100.0, y_max: 50.0 })
        );
        assert_eq!(data.maps[1].bounds(), None);
    }

    #[test]
    fn test_find_map() {
        let data = venue();
        assert_eq!(data.find_map(None).map(|m| m.title.as_str()), Some("Hall 1"));
        assert_eq!(data.find_map(Some("Hall 2")).map(|m| m.title.as_str()), Some("Hall 2"));
        assert!(data.find_map(Some("Hall 9")).is_none());
    }

    #[test]
    fn test_merged_exhibitor() {
        let data = venue();
        let merged = data.merged_exhibitor("A1").unwrap();
        assert_eq!(merged.title, "Meeple Co / Dice Ltd");
        assert_eq!(merged.description, "Wooden bits\n\n\nDice\n");
        assert_eq!(merged.logo.as_deref(), Some("dice.png"));
        assert_eq!(merged.website, "https://dice.example");
        // First record's url, even when empty
        assert_eq!(merged.url, "");
        assert_eq!(merged.all.len(), 2);

        assert!(data.merged_exhibitor("ZZ").is_none());
    }

    #[test]
    fn test_polygon_converts_and_concatenates() {
        let data = venue();
        let a2 = data.polygon("A2");
        assert_eq!(
            a2,
            vec![
                Point::new(20.0, 0.0),
                Point::new(20.0, 10.0),
                Point::new(30.0, 10.0),
                Point::new(30.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_map_stands_skips_incomplete_booths() {
        let data = venue();
        let stands = data.map_stands(&data.maps[0]);
        let labels: Vec<&str> = stands.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["A1", "A2"]);

        // B1 has an outline but no exhibitor
        assert!(data.map_stands(&data.maps[1]).is_empty());
    }

    #[test]
    fn test_missing_arrays_default_empty() {
        let data: VenueData = serde_json::from_str("{}").unwrap();
        assert!(data.maps.is_empty());
        assert!(data.find_map(None).is_none());
        assert!(data.merged_exhibitor("A1").is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mapdata.json");
        fs::write(&path, DATASET).unwrap();
        let data = VenueData::load(&path).unwrap();
        assert_eq!(data.maps.len(), 2);

        fs::write(&path, "not json").unwrap();
        assert!(VenueData::load(&path).is_err());
        assert!(VenueData::load(&dir.path().join("absent.json")).is_err());
    }
}
