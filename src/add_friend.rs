//! Add-Friend flow: transient form fields and their submission.

use crate::types::{FriendId, FriendRecord, SubmitRejected, AVATAR_BASE_URL};

/// Which Add-Friend input has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddField {
    #[default]
    Name,
    ImageUrl,
}

impl AddField {
    pub fn next(self) -> Self {
        match self {
            AddField::Name => AddField::ImageUrl,
            AddField::ImageUrl => AddField::Name,
        }
    }

    pub fn prev(self) -> Self {
        // Two fields: next and prev coincide.
        self.next()
    }
}

/// In-progress Add-Friend entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFriendForm {
    pub name: String,
    pub image_url: String,
}

impl Default for AddFriendForm {
    fn default() -> Self {
        AddFriendForm {
            name: String::new(),
            image_url: AVATAR_BASE_URL.to_string(),
        }
    }
}

/// A validated friend waiting for its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendDraft {
    pub name: String,
    pub image_base: String,
}

impl FriendDraft {
    /// Build the record. The id is appended to the avatar URL so every
    /// friend gets a distinct placeholder image.
    pub fn into_record(self, id: FriendId) -> FriendRecord {
        let image_url = format!("{}?={}", self.image_base, id);
        FriendRecord {
            id,
            name: self.name,
            image_url,
            balance: 0.0,
        }
    }
}

impl AddFriendForm {
    pub fn field_mut(&mut self, field: AddField) -> &mut String {
        match field {
            AddField::Name => &mut self.name,
            AddField::ImageUrl => &mut self.image_url,
        }
    }

    pub fn field(&self, field: AddField) -> &str {
        match field {
            AddField::Name => &self.name,
            AddField::ImageUrl => &self.image_url,
        }
    }

    /// Validate and take the entry, resetting the form on success.
    ///
    /// On rejection the fields are left as typed.
    pub fn submit(&mut self) -> Result<FriendDraft, SubmitRejected> {
        if self.name.is_empty() {
            return Err(SubmitRejected::EmptyName);
        }
        if self.image_url.is_empty() {
            return Err(SubmitRejected::EmptyImageUrl);
        }

        let taken = std::mem::take(self);
        Ok(FriendDraft {
            name: taken.name,
            image_base: taken.image_url,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
