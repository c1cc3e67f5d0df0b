//! Toy model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Physical condition of a toy, ordered from worst to best
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ToyCondition {
    Average,
    Fair,
    Good,
    LikeNew,
}

impl ToyCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToyCondition::Average => "average",
            ToyCondition::Fair => "fair",
            ToyCondition::Good => "good",
            ToyCondition::LikeNew => "like-new",
        }
    }
}

impl Default for ToyCondition {
    fn default() -> Self {
        ToyCondition::Good
    }
}

impl std::fmt::Display for ToyCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Toy record as persisted in the `toys` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Toy {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Free-form category tag
    pub category: String,
    pub age_range: String,
    pub condition: ToyCondition,
    pub image_url: String,
    pub owner_id: Uuid,
    /// Owner display name captured when the toy was listed
    pub owner_name: String,
    /// False while a pending or active borrow references this toy
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when listing a new toy
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateToy {
    #[validate(custom(function = "crate::models::not_blank", message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = "crate::models::not_blank", message = "Description is required"))]
    pub description: String,
    #[validate(custom(function = "crate::models::not_blank", message = "Category is required"))]
    pub category: String,
    #[validate(custom(function = "crate::models::not_blank", message = "Age range is required"))]
    pub age_range: String,
    #[serde(default)]
    pub condition: ToyCondition,
    #[validate(url(message = "Image URL is invalid"))]
    pub image_url: String,
}

/// A validated toy ready for insertion, with its owner snapshot
#[derive(Debug, Clone)]
pub struct NewToy {
    pub fields: CreateToy,
    pub owner_id: Uuid,
    pub owner_name: String,
}

/// Partial toy update; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateToy {
    #[validate(custom(function = "crate::models::not_blank", message = "Name is required"))]
    pub name: Option<String>,
    #[validate(custom(function = "crate::models::not_blank", message = "Description is required"))]
    pub description: Option<String>,
    #[validate(custom(function = "crate::models::not_blank", message = "Category is required"))]
    pub category: Option<String>,
    #[validate(custom(function = "crate::models::not_blank", message = "Age range is required"))]
    pub age_range: Option<String>,
    pub condition: Option<ToyCondition>,
    #[validate(url(message = "Image URL is invalid"))]
    pub image_url: Option<String>,
}

impl UpdateToy {
    /// Merge the supplied fields over `toy`
    pub fn apply(&self, toy: &mut Toy) {
        if let Some(ref name) = self.name {
            toy.name = name.trim().to_string();
        }
        if let Some(ref description) = self.description {
            toy.description = description.clone();
        }
        if let Some(ref category) = self.category {
            toy.category = category.trim().to_string();
        }
        if let Some(ref age_range) = self.age_range {
            toy.age_range = age_range.trim().to_string();
        }
        if let Some(condition) = self.condition {
            toy.condition = condition;
        }
        if let Some(ref image_url) = self.image_url {
            toy.image_url = image_url.clone();
        }
    }
}

/// Browse query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ToyQuery {
    /// Case-insensitive substring matched against name and description
    pub q: Option<String>,
    /// Exact category; `all` or absent matches every category
    pub category: Option<String>,
}

impl ToyQuery {
    pub fn matches(&self, toy: &Toy) -> bool {
        let matches_search = match self.q.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                toy.name.to_lowercase().contains(&q) || toy.description.to_lowercase().contains(&q)
            }
        };
        let matches_category = match self.category.as_deref() {
            None | Some("") | Some("all") => true,
            Some(category) => toy.category == category,
        };
        matches_search && matches_category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Toy {
        Toy {
            id: Uuid::new_v4(),
            name: "Remote Control Car".to_string(),
            description: "Rechargeable, two speeds".to_string(),
            category: "Electronic".to_string(),
            age_range: "5-10".to_string(),
            condition: ToyCondition::Good,
            image_url: "https://example.com/car.png".to_string(),
            owner_id: Uuid::new_v4(),
            owner_name: "An".to_string(),
            available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_condition_ordering() {
        assert!(ToyCondition::LikeNew > ToyCondition::Good);
        assert!(ToyCondition::Good > ToyCondition::Fair);
        assert!(ToyCondition::Fair > ToyCondition::Average);
        assert_eq!(
            serde_json::to_string(&ToyCondition::LikeNew).unwrap(),
            "\"like-new\""
        );
    }

    #[test]
    fn test_query_matching() {
        let toy = sample();
        let query = |q: Option<&str>, category: Option<&str>| ToyQuery {
            q: q.map(String::from),
            category: category.map(String::from),
        };

        assert!(query(None, None).matches(&toy));
        assert!(query(Some("remote"), None).matches(&toy));
        assert!(query(Some("RECHARGEABLE"), Some("all")).matches(&toy));
        assert!(query(Some("car"), Some("Electronic")).matches(&toy));
        assert!(!query(Some("doll"), None).matches(&toy));
        assert!(!query(None, Some("Dolls")).matches(&toy));
    }

    #[test]
    fn test_create_validation() {
        let valid = CreateToy {
            name: "Lego City".to_string(),
            description: "500 pieces".to_string(),
            category: "Building".to_string(),
            age_range: "6-12".to_string(),
            condition: ToyCondition::LikeNew,
            image_url: "https://example.com/lego.png".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_url = CreateToy {
            image_url: "not a url".to_string(),
            ..valid.clone()
        };
        assert!(bad_url.validate().is_err());

        let blank_name = CreateToy {
            name: " ".to_string(),
            ..valid
        };
        assert!(blank_name.validate().is_err());
    }
}
