//! Stage catalog
//!
//! The ordered, read-only list of stages a run traverses. Each stage becomes
//! one landing surface with one hazard on it; the hazard's size comes from the
//! stage's [`HazardTier`], not from the surface.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{RunnerError, RunnerResult};

/// Hazard size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardTier {
    /// Low and narrow, cleared by any jump
    Trivial,
    #[default]
    Standard,
    /// Low but long
    Wide,
    /// Needs a well-timed jump
    Tall,
    /// Taller than the jump apex: an authored wall
    Impossible,
}

impl HazardTier {
    /// Hazard (height, width) in pixels
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            HazardTier::Trivial => (20.0, 20.0),
            HazardTier::Standard => (40.0, 30.0),
            HazardTier::Wide => (30.0, 50.0),
            HazardTier::Tall => (70.0, 30.0),
            HazardTier::Impossible => (280.0, 30.0),
        }
    }

    pub fn height(&self) -> f32 {
        self.dimensions().0
    }

    pub fn width(&self) -> f32 {
        self.dimensions().1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardTier::Trivial => "Trivial",
            HazardTier::Standard => "Standard",
            HazardTier::Wide => "Wide",
            HazardTier::Tall => "Tall",
            HazardTier::Impossible => "Impossible",
        }
    }
}

/// One authored stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDefinition {
    pub id: String,
    pub title: String,
    /// Who owns the stage (shown under the title)
    #[serde(default)]
    pub role: String,
    /// Presentation hint, opaque to the simulation
    #[serde(default)]
    pub visual_tag: String,
    /// Hazard labels; one is picked per spawn
    pub pains: Vec<String>,
    #[serde(default)]
    pub tier: HazardTier,
}

impl StageDefinition {
    pub fn new(
        id: &str,
        title: &str,
        role: &str,
        visual_tag: &str,
        pains: &[&str],
        tier: HazardTier,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            role: role.to_string(),
            visual_tag: visual_tag.to_string(),
            pains: pains.iter().map(|p| p.to_string()).collect(),
            tier,
        }
    }
}

/// Ordered stage table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageCatalog {
    stages: Vec<StageDefinition>,
}

impl StageCatalog {
    /// Build a catalog, rejecting stages without pain points or with repeated ids
    pub fn new(stages: Vec<StageDefinition>) -> RunnerResult<Self> {
        let mut seen = HashSet::new();
        for stage in &stages {
            if stage.pains.is_empty() {
                return Err(RunnerError::NoPainPoints {
                    id: stage.id.clone(),
                });
            }
            if !seen.insert(stage.id.as_str()) {
                return Err(RunnerError::DuplicateStage {
                    id: stage.id.clone(),
                });
            }
        }
        Ok(Self { stages })
    }

    /// Parse a JSON array of stages
    pub fn from_json(json: &str) -> RunnerResult<Self> {
        let stages: Vec<StageDefinition> = serde_json::from_str(json)?;
        let catalog = Self::new(stages)?;
        log::info!("Loaded catalog with {} stages", catalog.len());
        Ok(catalog)
    }

    /// The nine-stage sales pipeline: SDR, AE, then CS
    pub fn default_pipeline() -> Self {
        use HazardTier::*;
        let stages = vec![
            // SDR phase
            StageDefinition::new(
                "sdr-1",
                "Prospecting",
                "SDR",
                "bg-yellow-500",
                &["Bad Data", "Burnout", "Junk MQLs"],
                Trivial,
            ),
            StageDefinition::new(
                "sdr-2",
                "Qualification",
                "SDR",
                "bg-yellow-500",
                &["Ghosting", "No Budget", "Fatigue"],
                Standard,
            ),
            StageDefinition::new(
                "sdr-3",
                "SDR-to-AE Handoff",
                "SDR/AE",
                "bg-yellow-600",
                &["Dropped Baton", "Poor Context", "Re-qualifying"],
                Wide,
            ),
            // AE phase
            StageDefinition::new(
                "ae-1",
                "Discovery",
                "AE",
                "bg-orange-500",
                &["Happy Ears", "Interrogation", "Surface Level"],
                Standard,
            ),
            StageDefinition::new(
                "ae-2",
                "Solution/Demo",
                "AE",
                "bg-orange-500",
                &["Generic Demo", "Feature Dump", "No ROI"],
                Wide,
            ),
            StageDefinition::new(
                "ae-3",
                "Negotiation",
                "AE",
                "bg-orange-600",
                &["Procurement", "Legal Stalls", "Discounting"],
                Tall,
            ),
            // CS phase
            StageDefinition::new(
                "cs-1",
                "Closing",
                "AE/Finance",
                "bg-green-600",
                &["RFP"],
                Impossible,
            ),
            StageDefinition::new(
                "cs-2",
                "Onboarding",
                "CS",
                "bg-blue-500",
                &["Shelf-ware", "Slow Ramp", "Buyer Remorse"],
                Standard,
            ),
            StageDefinition::new(
                "cs-3",
                "Renewal",
                "CS",
                "bg-blue-600",
                &["Churn Risk", "No Upsell", "Competitor"],
                Tall,
            ),
        ];
        Self { stages }
    }

    pub fn get(&self, index: usize) -> Option<&StageDefinition> {
        self.stages.get(index)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageDefinition> {
        self.stages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_default_pipeline_shape() {
        let catalog = StageCatalog::default_pipeline();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.get(0).unwrap().title, "Prospecting");
        let closing = catalog.iter().find(|s| s.title == "Closing").unwrap();
        assert_eq!(closing.tier, HazardTier::Impossible);
        assert_eq!(closing.pains, vec!["RFP".to_string()]);
    }

    #[test]
    fn test_only_impossible_tier_exceeds_apex() {
        let apex = Tuning::default().max_jump_apex();
        for tier in [
            HazardTier::Trivial,
            HazardTier::Standard,
            HazardTier::Wide,
            HazardTier::Tall,
        ] {
            assert!(tier.height() < apex, "{} should be clearable", tier.as_str());
        }
        assert!(HazardTier::Impossible.height() > apex);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            { "id": "a", "title": "Alpha", "pains": ["One"], "tier": "trivial" },
            { "id": "b", "title": "Beta", "pains": ["Two", "Three"] }
        ]"#;
        let catalog = StageCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().tier, HazardTier::Trivial);
        assert_eq!(catalog.get(1).unwrap().tier, HazardTier::Standard);
    }

    #[test]
    fn test_rejects_stage_without_pains() {
        let json = r#"[{ "id": "a", "title": "Alpha", "pains": [] }]"#;
        assert!(matches!(
            StageCatalog::from_json(json),
            Err(RunnerError::NoPainPoints { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let stage = StageDefinition::new("a", "Alpha", "", "", &["x"], HazardTier::Trivial);
        assert!(matches!(
            StageCatalog::new(vec![stage.clone(), stage]),
            Err(RunnerError::DuplicateStage { .. })
        ));
    }

    #[test]
    fn test_empty_catalog_is_allowed() {
        let catalog = StageCatalog::from_json("[]").unwrap();
        assert!(catalog.is_empty());
    }
}
