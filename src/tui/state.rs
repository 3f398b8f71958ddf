//! TUI state algebra: pure types, zero effects.
//!
//! The registry is shared data owned by [`App`]. Per-session transient
//! state (focus, list cursor, the two forms) lives in [`Ui`]. The
//! transition function and the rendering layer both program against
//! these types.

use crossterm::event::KeyEvent;

use crate::add_friend::{AddField, AddFriendForm, FriendDraft};
use crate::registry::{RegistryEvent, RegistryState};
use crate::split_bill::{SplitBillForm, SplitField};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// Terminal was resized; just redraw.
    Resize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug, Clone, PartialEq)]
pub struct App {
    /// Friends, selection and the Add-Friend toggle.
    pub registry: RegistryState,

    /// Focus, cursor and in-progress form entry.
    pub ui: Ui,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

/// Transient UI state.
///
/// `split_form` is present exactly when the registry has a selection,
/// and is keyed to that friend. `add_form` is reset whenever the
/// Add-Friend panel is hidden.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ui {
    pub focus: Focus,
    /// Highlighted row in the friend list.
    pub cursor: usize,
    pub add_form: AddFriendForm,
    pub split_form: Option<SplitBillForm>,
}

/// Which panel receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    FriendList,
    AddFriend(AddField),
    SplitBill(SplitField),
}

/// How keys are interpreted under the current focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Letters are commands.
    Navigate,
    /// Letters are typed into a field.
    Editing,
}

impl Focus {
    pub fn input_mode(self) -> InputMode {
        match self {
            Focus::FriendList => InputMode::Navigate,
            Focus::AddFriend(_) | Focus::SplitBill(_) => InputMode::Editing,
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Cursor up in the list, previous field in a form.
    MoveUp,
    /// Cursor down in the list, next field in a form.
    MoveDown,
    /// Select or deselect the friend under the cursor.
    Select,
    /// Open or close the Add-Friend panel.
    ToggleAddFriend,
    /// Move focus to the next visible panel.
    CycleFocus,
    /// Type a character into the focused field.
    Input(char),
    /// Delete the last character of the focused field.
    Backspace,
    /// Switch who paid the bill.
    CyclePayer,
    /// Submit the focused form.
    Submit,
    /// Leave a form and return to the friend list.
    Back,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render with this UI state.
    Ui(Ui),
    /// Quit the application.
    Quit,
    /// Render with this UI state after the effect has been applied.
    Effect(Ui, Effect),
}

/// Registry change requested by a pure transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Apply a registry event as-is.
    Registry(RegistryEvent),
    /// Add a friend once an id has been minted for it.
    AddFriend(FriendDraft),
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// Start with the seed roster.
    pub fn seeded() -> Self {
        Self::with_registry(RegistryState::seeded())
    }

    pub fn with_registry(registry: RegistryState) -> Self {
        App {
            registry,
            ui: Ui::default(),
            should_quit: false,
        }
    }
}

impl Ui {
    /// Bring the UI back in line with the registry.
    ///
    /// The split form follows the selection, the add form resets when
    /// its panel is hidden, focus never points at a hidden panel and the
    /// cursor stays inside the list.
    pub fn reconcile(mut self, registry: &RegistryState) -> Ui {
        self.split_form = match (&registry.selected, self.split_form) {
            (Some(id), Some(form)) if form.friend_id() == id => Some(form),
            (Some(id), _) => Some(SplitBillForm::new(id.clone())),
            (None, _) => None,
        };

        if !registry.show_add_friend {
            self.add_form = AddFriendForm::default();
        }

        self.focus = match self.focus {
            Focus::AddFriend(_) if !registry.show_add_friend => Focus::FriendList,
            Focus::SplitBill(_) if self.split_form.is_none() => Focus::FriendList,
            focus => focus,
        };

        self.cursor = match registry.friends.len() {
            0 => 0,
            len => self.cursor.min(len - 1),
        };

        self
    }
}

// ============================================================================
// TESTS
// ============================================================================
