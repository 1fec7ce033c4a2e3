use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    Construction,
    Humanitarian,
    Education,
    Health,
    Spiritual,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    Paused,
    #[serde(other)]
    Unknown,
}

/// One milestone of a project; `status` reuses the project vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStep {
    pub name: String,
    #[serde(default)]
    pub order: u32,
    pub status: ProjectStatus,
}

/// "What your gift buys" line on a project card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationExample {
    pub amount: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: Option<String>,
    pub category: ProjectCategory,
    pub status: ProjectStatus,
    #[serde(default)]
    pub goal_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    /// Server-computed percentage; authoritative when present.
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub steps: Vec<ProjectStep>,
    #[serde(default)]
    pub donation_examples: Vec<DonationExample>,
    #[serde(default)]
    pub impact_points: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Funding progress in percent, 0..=100.
    ///
    /// Uses the server's `progress` when it sent one and falls back to
    /// `current / goal` otherwise.
    pub fn progress_percent(&self) -> u8 {
        match self.progress {
            Some(progress) if progress.is_finite() => progress.round().clamp(0.0, 100.0) as u8,
            _ => compute_progress(self.current_amount, self.goal_amount),
        }
    }

    /// Amount still needed to reach the goal, never negative.
    pub fn remaining_amount(&self) -> f64 {
        (self.goal_amount - self.current_amount).max(0.0)
    }

    /// Steps sorted by their `order` field.
    pub fn ordered_steps(&self) -> Vec<&ProjectStep> {
        let mut steps: Vec<&ProjectStep> = self.steps.iter().collect();
        steps.sort_by_key(|step| step.order);
        steps
    }
}

/// `min(100, round(current / goal * 100))`, or 0 for a zero goal.
pub fn compute_progress(current: f64, goal: f64) -> u8 {
    if goal <= 0.0 || !goal.is_finite() || !current.is_finite() {
        return 0;
    }
    ((current / goal) * 100.0).round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    pub category: ProjectCategory,
    pub status: ProjectStatus,
    pub goal_amount: f64,
    #[serde(default)]
    pub steps: Vec<ProjectStep>,
    #[serde(default)]
    pub donation_examples: Vec<DonationExample>,
    #[serde(default)]
    pub impact_points: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub is_published: bool,
}

/// Partial update; omitted fields stay unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProjectCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(progress: Option<f64>, current: f64, goal: f64) -> Project {
        serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "title": "Nouvelle chapelle",
            "category": "construction",
            "status": "in_progress",
            "goal_amount": goal,
            "current_amount": current,
            "progress": progress,
        }))
        .unwrap()
    }

    #[test]
    fn server_progress_wins() {
        assert_eq!(project(Some(42.0), 10.0, 100.0).progress_percent(), 42);
    }

    #[test]
    fn progress_falls_back_to_amounts() {
        assert_eq!(project(None, 250.0, 1000.0).progress_percent(), 25);
        assert_eq!(project(None, 1.0, 3.0).progress_percent(), 33);
    }

    #[test]
    fn progress_is_capped_and_safe() {
        assert_eq!(project(None, 5000.0, 1000.0).progress_percent(), 100);
        assert_eq!(project(None, 10.0, 0.0).progress_percent(), 0);
        assert_eq!(project(Some(140.0), 0.0, 0.0).progress_percent(), 100);
    }

    #[test]
    fn remaining_never_negative() {
        assert_eq!(project(None, 400.0, 1000.0).remaining_amount(), 600.0);
        assert_eq!(project(None, 1400.0, 1000.0).remaining_amount(), 0.0);
    }

    #[test]
    fn full_shape_deserializes() {
        let p: Project = serde_json::from_value(serde_json::json!({
            "_id": "p2",
            "title": "Puits",
            "description": "Eau potable",
            "short_description": "Un puits",
            "category": "humanitarian",
            "status": "planning",
            "goal_amount": 5000,
            "current_amount": 1200,
            "steps": [
                {"name": "Forage", "order": 2, "status": "planning"},
                {"name": "Etude", "order": 1, "status": "completed"}
            ],
            "donation_examples": [{"amount": 10, "description": "Un seau"}],
            "impact_points": ["200 familles"],
            "tags": ["eau"],
            "is_featured": true,
            "is_published": true
        }))
        .unwrap();
        assert_eq!(p.category, ProjectCategory::Humanitarian);
        let names: Vec<&str> = p.ordered_steps().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Etude", "Forage"]);
        assert_eq!(p.donation_examples[0].amount, 10.0);
        assert!(p.is_featured);
    }

    #[test]
    fn unknown_category_maps_to_other() {
        let p: Project = serde_json::from_value(serde_json::json!({
            "_id": "p3", "title": "x", "category": "sports", "status": "archived"
        }))
        .unwrap();
        assert_eq!(p.category, ProjectCategory::Other);
        assert_eq!(p.status, ProjectStatus::Unknown);
    }

    #[test]
    fn query_serializes_snake_case() {
        let q = ProjectQuery {
            status: Some(ProjectStatus::InProgress),
            featured: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            serde_json::json!({"status": "in_progress", "featured": true})
        );
    }
}
