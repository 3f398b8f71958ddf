//! Split-Bill flow: per-friend entry of a bill and who paid for it.
//!
//! The form is keyed to one friend id. The UI layer drops it and builds
//! a fresh one whenever the selection changes.

use crate::types::{FriendId, Payer, SubmitRejected};

/// Which Split-Bill input has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitField {
    #[default]
    Bill,
    PaidByUser,
    Payer,
}

impl SplitField {
    pub fn next(self) -> Self {
        match self {
            SplitField::Bill => SplitField::PaidByUser,
            SplitField::PaidByUser => SplitField::Payer,
            SplitField::Payer => SplitField::Bill,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SplitField::Bill => SplitField::Payer,
            SplitField::PaidByUser => SplitField::Bill,
            SplitField::Payer => SplitField::PaidByUser,
        }
    }
}

/// In-progress Split-Bill entry for one friend.
///
/// Amounts are held as typed text and parsed on demand, so partial
/// input like `"12."` survives between keystrokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitBillForm {
    friend_id: FriendId,
    bill: String,
    paid_by_user: String,
    payer: Payer,
}

impl SplitBillForm {
    pub fn new(friend_id: FriendId) -> Self {
        SplitBillForm {
            friend_id,
            bill: String::new(),
            paid_by_user: String::new(),
            payer: Payer::User,
        }
    }

    pub fn friend_id(&self) -> &FriendId {
        &self.friend_id
    }

    pub fn bill_text(&self) -> &str {
        &self.bill
    }

    pub fn paid_by_user_text(&self) -> &str {
        &self.paid_by_user
    }

    pub fn payer(&self) -> Payer {
        self.payer
    }

    pub fn bill(&self) -> Option<f64> {
        parse_amount(&self.bill)
    }

    pub fn paid_by_user(&self) -> Option<f64> {
        parse_amount(&self.paid_by_user)
    }

    /// The friend's share. Unset until a non-zero bill is entered.
    pub fn paid_by_friend(&self) -> Option<f64> {
        let bill = self.bill().filter(|b| *b != 0.0)?;
        Some(bill - self.paid_by_user().unwrap_or(0.0))
    }

    // ------------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------------

    /// Replace the bill text. Returns false (and keeps the old text) if
    /// `text` is not an unsigned decimal.
    pub fn set_bill(&mut self, text: &str) -> bool {
        if !is_amount_text(text) {
            return false;
        }
        self.bill = text.to_string();
        true
    }

    /// Replace the user's share. Rejected when malformed or when it
    /// exceeds the bill, which keeps the friend's share non-negative.
    pub fn set_paid_by_user(&mut self, text: &str) -> bool {
        if !is_amount_text(text) {
            return false;
        }
        let bill = self.bill().unwrap_or(0.0);
        if parse_amount(text).unwrap_or(0.0) > bill {
            return false;
        }
        self.paid_by_user = text.to_string();
        true
    }

    pub fn set_payer(&mut self, payer: Payer) {
        self.payer = payer;
    }

    pub fn toggle_payer(&mut self) {
        self.payer = self.payer.other();
    }

    /// Append a typed character to an amount field.
    pub fn push_char(&mut self, field: SplitField, c: char) -> bool {
        match field {
            SplitField::Bill => {
                let text = format!("{}{}", self.bill, c);
                self.set_bill(&text)
            }
            SplitField::PaidByUser => {
                let text = format!("{}{}", self.paid_by_user, c);
                self.set_paid_by_user(&text)
            }
            SplitField::Payer => false,
        }
    }

    /// Delete the last character of an amount field.
    ///
    /// Deleting never raises an amount, so it is not checked against the
    /// bill; a share left above a shrunken bill can always be cleared.
    pub fn pop_char(&mut self, field: SplitField) -> bool {
        match field {
            SplitField::Bill => self.bill.pop().is_some(),
            SplitField::PaidByUser => self.paid_by_user.pop().is_some(),
            SplitField::Payer => false,
        }
    }

    // ------------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------------

    /// Validate the entry and compute the settlement delta for the
    /// selected friend's balance.
    pub fn submit(&self) -> Result<f64, SubmitRejected> {
        let bill = self
            .bill()
            .filter(|b| *b != 0.0)
            .ok_or(SubmitRejected::MissingBill)?;
        let paid_by_user = self
            .paid_by_user()
            .filter(|p| *p != 0.0)
            .ok_or(SubmitRejected::MissingPaidByUser)?;

        Ok(settlement_delta(self.payer, bill, paid_by_user))
    }
}

/// Signed change to the friend's balance after a split.
///
/// If the user paid, the friend now owes their share. If the friend
/// paid, the user owes what they consumed.
pub fn settlement_delta(payer: Payer, bill: f64, paid_by_user: f64) -> f64 {
    match payer {
        Payer::User => bill - paid_by_user,
        Payer::Friend => -paid_by_user,
    }
}

/// Digits with at most one decimal point. Empty is allowed.
fn is_amount_text(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit() || c == '.')
        && text.chars().filter(|c| *c == '.').count() <= 1
}

/// Parse amount text. Empty or a lone `.` is unset.
pub fn parse_amount(text: &str) -> Option<f64> {
    if text.is_empty() || !is_amount_text(text) {
        return None;
    }
    text.parse().ok()
}

// ============================================================================
// TESTS
// ============================================================================
