use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Raw field values as the user typed them. Nothing here is validated;
/// `max_following` stays text until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub niche: String,
    pub location: String,
    pub comments: String,
    pub dms: String,
    pub max_following: String,
    pub hashtags: String,
    pub account_targets: String,
}

/// One named input on the requirements form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Niche,
    Location,
    Comments,
    Dms,
    MaxFollowing,
    Hashtags,
    AccountTargets,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Niche,
        Field::Location,
        Field::Comments,
        Field::Dms,
        Field::MaxFollowing,
        Field::Hashtags,
        Field::AccountTargets,
    ];

    /// Form input name, matching the `user_requirements` column.
    pub fn name(self) -> &'static str {
        match self {
            Field::Niche => "niche",
            Field::Location => "location",
            Field::Comments => "comments",
            Field::Dms => "dms",
            Field::MaxFollowing => "max_following",
            Field::Hashtags => "hashtags",
            Field::AccountTargets => "account_targets",
        }
    }

    /// Human-readable name used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Field::Niche => "Niche",
            Field::Location => "Location",
            Field::Comments => "Comments",
            Field::Dms => "DMs",
            Field::MaxFollowing => "Max following",
            Field::Hashtags => "Hashtags",
            Field::AccountTargets => "Account targets",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Field::Niche | Field::Location)
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("Unknown field: {s}"))
    }
}

impl FormState {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Niche => &self.niche,
            Field::Location => &self.location,
            Field::Comments => &self.comments,
            Field::Dms => &self.dms,
            Field::MaxFollowing => &self.max_following,
            Field::Hashtags => &self.hashtags,
            Field::AccountTargets => &self.account_targets,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Niche => &mut self.niche,
            Field::Location => &mut self.location,
            Field::Comments => &mut self.comments,
            Field::Dms => &mut self.dms,
            Field::MaxFollowing => &mut self.max_following,
            Field::Hashtags => &mut self.hashtags,
            Field::AccountTargets => &mut self.account_targets,
        }
    }

    /// Replace one field, leaving the others untouched.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }
}

/// The row shape sent to `user_requirements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub user_id: String,
    pub niche: String,
    pub location: String,
    pub comments: String,
    pub dms: String,
    pub max_following: Option<i32>,
    pub hashtags: String,
    pub account_targets: String,
}

/// A persisted `user_requirements` row, as returned by the insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct SavedRequirements {
    pub id: i64,
    pub user_id: String,
    pub niche: String,
    pub location: String,
    pub comments: String,
    pub dms: String,
    pub max_following: Option<i32>,
    pub hashtags: String,
    pub account_targets: String,
    pub created_at: String,
}

impl SavedRequirements {
    /// Build the row a store hands back for `record`.
    pub fn from_record(id: i64, record: &SubmissionRecord, created_at: impl Into<String>) -> Self {
        Self {
            id,
            user_id: record.user_id.clone(),
            niche: record.niche.clone(),
            location: record.location.clone(),
            comments: record.comments.clone(),
            dms: record.dms.clone(),
            max_following: record.max_following,
            hashtags: record.hashtags.clone(),
            account_targets: record.account_targets.clone(),
            created_at: created_at.into(),
        }
    }
}

/// The authenticated user a submission is made on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
}
