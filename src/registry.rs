//! Friend registry: the roster, the selection and the Add-Friend toggle.
//!
//! Pure functions of `(RegistryState, RegistryEvent) -> RegistryState`.
//! Nothing here renders, reads input or mints ids.

use tracing::{debug, warn};

use crate::types::{seed_friends, FriendId, FriendRecord};

/// Everything the registry can be asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    /// Open or close the Add-Friend panel.
    ToggleAddFriend,
    /// Select a friend, or clear the selection if already selected.
    SelectFriend(FriendId),
    /// Append a new friend. The caller initializes the balance to 0.
    AddFriend(FriendRecord),
    /// Settle a split with the selected friend.
    ApplyBalanceDelta(f64),
}

/// The roster plus the two independent panel flags.
///
/// `selected` and `show_add_friend` are not mutually exclusive: both
/// panels may be open at once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegistryState {
    pub friends: Vec<FriendRecord>,
    pub selected: Option<FriendId>,
    pub show_add_friend: bool,
}

impl RegistryState {
    /// Registry holding the three seed friends, nothing selected.
    pub fn seeded() -> Self {
        Self::with_friends(seed_friends())
    }

    pub fn with_friends(friends: Vec<FriendRecord>) -> Self {
        RegistryState {
            friends,
            selected: None,
            show_add_friend: false,
        }
    }

    /// Dispatch a single event.
    pub fn apply(self, event: RegistryEvent) -> Self {
        match event {
            RegistryEvent::ToggleAddFriend => self.toggle_add_friend(),
            RegistryEvent::SelectFriend(id) => self.select_friend(id),
            RegistryEvent::AddFriend(record) => self.add_friend(record),
            RegistryEvent::ApplyBalanceDelta(delta) => self.apply_balance_delta(delta),
        }
    }

    pub fn toggle_add_friend(mut self) -> Self {
        self.show_add_friend = !self.show_add_friend;
        self
    }

    /// Toggle selection of `id` and close the Add-Friend panel.
    pub fn select_friend(mut self, id: FriendId) -> Self {
        self.selected = if self.selected.as_ref() == Some(&id) {
            None
        } else {
            Some(id)
        };
        self.show_add_friend = false;
        self
    }

    /// Append `record` and close the Add-Friend panel.
    pub fn add_friend(mut self, record: FriendRecord) -> Self {
        debug!(id = %record.id, name = %record.name, "adding friend");
        self.friends.push(record);
        self.show_add_friend = false;
        self
    }

    /// Add `delta` to the selected friend's balance, then clear the selection.
    ///
    /// Without a selection there is nobody to settle with; the state is
    /// returned unchanged.
    pub fn apply_balance_delta(mut self, delta: f64) -> Self {
        let Some(selected) = self.selected.take() else {
            warn!(delta, "balance delta with no friend selected, ignoring");
            return self;
        };

        self.friends = self
            .friends
            .iter()
            .map(|friend| {
                if friend.id == selected {
                    friend.with_delta(delta)
                } else {
                    friend.clone()
                }
            })
            .collect();
        debug!(id = %selected, delta, "balance updated");
        self
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn friend(&self, id: &FriendId) -> Option<&FriendRecord> {
        self.friends.iter().find(|f| &f.id == id)
    }

    pub fn position(&self, id: &FriendId) -> Option<usize> {
        self.friends.iter().position(|f| &f.id == id)
    }

    pub fn selected_friend(&self) -> Option<&FriendRecord> {
        self.selected.as_ref().and_then(|id| self.friend(id))
    }

    pub fn is_selected(&self, id: &FriendId) -> bool {
        self.selected.as_ref() == Some(id)
    }
}

// ============================================================================
// TESTS
// ============================================================================
