//! Exercise models

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use std::{fmt, str::FromStr};

use crate::validation::{Payload, ValidationErrors, validate_category, validate_name};

/// Kind of physical activity an exercise trains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Category {
    Strength,
    Cardio,
    Flexibility,
    Balance,
}

impl Category {
    /// Accepted spellings, in declaration order
    pub const NAMES: [&'static str; 4] = ["strength", "cardio", "flexibility", "balance"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Strength => "strength",
            Category::Cardio => "cardio",
            Category::Flexibility => "flexibility",
            Category::Balance => "balance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(Category::Strength),
            "cardio" => Ok(Category::Cardio),
            "flexibility" => Ok(Category::Flexibility),
            "balance" => Ok(Category::Balance),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

/// Exercise entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub equipment_needed: bool,
}

/// New exercise creation payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    pub name: String,
    pub category: Category,
    pub equipment_needed: bool,
}

impl NewExercise {
    pub const FIELDS: [&'static str; 3] = ["name", "category", "equipment_needed"];

    /// Read and validate a creation request body
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut payload = Payload::new(body)?;

        let name = payload.required_string("name");
        if let Some(name) = &name {
            payload.errors_mut().check("name", validate_name(name));
        }

        let category = payload.required_string("category");
        if let Some(category) = &category {
            payload.errors_mut().check("category", validate_category(category));
        }

        let equipment_needed = payload.required_bool("equipment_needed");

        let errors = payload.finish(&Self::FIELDS);
        match (name, category.and_then(|c| c.parse().ok()), equipment_needed) {
            (Some(name), Some(category), Some(equipment_needed)) if errors.is_empty() => {
                Ok(Self {
                    name,
                    category,
                    equipment_needed,
                })
            }
            _ => Err(errors),
        }
    }

    /// Field checks run right before the row is written
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("name", validate_name(&self.name));
        errors.check("category", validate_category(self.category.as_str()));
        errors.into_result(())
    }
}
