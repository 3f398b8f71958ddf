//! Domain types for eat-n-split.
//!
//! Friends, balances and the small vocabulary shared by the registry,
//! the two form flows and the rendering layers.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Opaque friend identifier.
///
/// Seeded friends carry short numeric ids, friends added at runtime
/// carry a v4 UUID. Callers only ever compare ids for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FriendId(pub String);

impl FriendId {
    /// Mint a fresh id. Collisions are treated as impossible.
    pub fn random() -> Self {
        FriendId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FriendId {
    fn from(s: &str) -> Self {
        FriendId(s.to_string())
    }
}

impl fmt::Display for FriendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// A friend and the running balance between them and the user.
///
/// Negative balance: the user owes the friend.
/// Positive balance: the friend owes the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendRecord {
    pub id: FriendId,
    pub name: String,
    pub image_url: String,
    pub balance: f64,
}

impl FriendRecord {
    /// Who owes whom, phrased from the user's side.
    pub fn standing(&self) -> Standing {
        Standing::of(self.balance)
    }

    /// Same record with `delta` added to the balance.
    pub fn with_delta(&self, delta: f64) -> Self {
        FriendRecord {
            balance: self.balance + delta,
            ..self.clone()
        }
    }
}

/// Human reading of a balance. Amounts are always non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Standing {
    /// The user owes the friend this much.
    YouOwe(f64),
    /// The friend owes the user this much.
    OwesYou(f64),
    /// Settled.
    Even,
}

impl Standing {
    pub fn of(balance: f64) -> Self {
        if balance < 0.0 {
            Standing::YouOwe(balance.abs())
        } else if balance > 0.0 {
            Standing::OwesYou(balance)
        } else {
            Standing::Even
        }
    }

    /// Sentence describing the standing with a named friend.
    pub fn describe(&self, name: &str) -> String {
        match self {
            Standing::YouOwe(amount) => format!("You owe {} ${}", name, format_amount(*amount)),
            Standing::OwesYou(amount) => format!("{} owes you ${}", name, format_amount(*amount)),
            Standing::Even => format!("You and {} are even", name),
        }
    }
}

/// Who fronted the money for a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Payer {
    #[default]
    User,
    Friend,
}

impl Payer {
    pub fn other(self) -> Self {
        match self {
            Payer::User => Payer::Friend,
            Payer::Friend => Payer::User,
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Why a form submission was discarded.
///
/// The UI drops these silently; they only surface in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    EmptyName,
    EmptyImageUrl,
    MissingBill,
    MissingPaidByUser,
}

impl fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRejected::EmptyName => write!(f, "friend name is empty"),
            SubmitRejected::EmptyImageUrl => write!(f, "image URL is empty"),
            SubmitRejected::MissingBill => write!(f, "bill value is missing"),
            SubmitRejected::MissingPaidByUser => write!(f, "your expense is missing"),
        }
    }
}

impl std::error::Error for SubmitRejected {}

// ============================================================================
// SEED DATA
// ============================================================================

/// Base URL of the placeholder avatar service.
pub const AVATAR_BASE_URL: &str = "https://i.pravatar.cc/48";

/// The three friends every session starts with.
pub fn seed_friends() -> Vec<FriendRecord> {
    [("118836", "Clark", -7.0), ("933372", "Sarah", 20.0), ("499476", "Anthony", 0.0)]
        .into_iter()
        .map(|(id, name, balance)| FriendRecord {
            id: FriendId::from(id),
            name: name.to_string(),
            image_url: format!("{}?u={}", AVATAR_BASE_URL, id),
            balance,
        })
        .collect()
}

// ============================================================================
// FORMATTING & CONFIGURATION
// ============================================================================

/// Print an amount without decimals when whole, with cents otherwise.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

/// Output format for roster reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================
