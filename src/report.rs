//! Roster formatting.
//!
//! Pure functions — (friends, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::types::{format_amount, FriendRecord, OutputFormat, Standing};

/// Format a roster for output.
pub fn format_roster(friends: &[FriendRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(friends),
        OutputFormat::Json => format_json(friends),
    }
}

/// Totals across the roster, both non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    /// Sum of what friends owe the user.
    pub owed_to_you: f64,
    /// Sum of what the user owes friends.
    pub you_owe: f64,
}

pub fn totals(friends: &[FriendRecord]) -> Totals {
    friends.iter().fold(
        Totals { owed_to_you: 0.0, you_owe: 0.0 },
        |acc, friend| match friend.standing() {
            Standing::OwesYou(amount) => Totals { owed_to_you: acc.owed_to_you + amount, ..acc },
            Standing::YouOwe(amount) => Totals { you_owe: acc.you_owe + amount, ..acc },
            Standing::Even => acc,
        },
    )
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(friends: &[FriendRecord]) -> String {
    let mut out = String::new();

    if !friends.is_empty() {
        out.push_str("=== Friends ===\n");
        let width = friends.iter().map(|f| f.name.chars().count()).max().unwrap_or(0);
        for friend in friends {
            out.push_str(&format!(
                "{:<width$}  {}\n",
                friend.name,
                friend.standing().describe(&friend.name),
                width = width
            ));
        }
        out.push('\n');
    }

    let totals = totals(friends);
    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Friends:      {}\n", friends.len()));
    out.push_str(&format!("Owed to you:  ${}\n", format_amount(totals.owed_to_you)));
    out.push_str(&format!("You owe:      ${}\n", format_amount(totals.you_owe)));

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Serialize)]
struct RosterJson<'a> {
    friends: &'a [FriendRecord],
    totals: Totals,
}

fn format_json(friends: &[FriendRecord]) -> String {
    let roster = RosterJson {
        friends,
        totals: totals(friends),
    };
    // Plain strings and finite numbers only; serialization cannot fail
    serde_json::to_string_pretty(&roster)
        .unwrap_or_else(|e| panic!("Failed to serialize roster to JSON: {}", e))
}

// ============================================================================
// TESTS
// ============================================================================
