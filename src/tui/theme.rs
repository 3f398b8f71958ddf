//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Red: the user owes this friend
//! - Green: this friend owes the user
//! - Cyan: interactive elements (keybinding hints, focused inputs)
//! - Dim: de-emphasized (avatar URLs, disabled fields)
//! - Bold: important (names, totals)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Friend owes the user — green.
pub const STYLE_OWED: Style = Style::new().fg(Color::Green);

/// User owes the friend — red.
pub const STYLE_OWING: Style = Style::new().fg(Color::Red);

/// Interactive element / keybinding hint — cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata — dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text — bold.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Row of the selected friend.
pub const STYLE_SELECTED: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Cursor row in the friend list.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Border of the panel holding focus.
pub const STYLE_FOCUSED_BORDER: Style = Style::new().fg(Color::Cyan);

/// Border of other panels.
pub const STYLE_BORDER: Style = Style::new().fg(Color::DarkGray);

/// Input field under the cursor.
pub const STYLE_ACTIVE_INPUT: Style = Style::new()
    .fg(Color::Cyan)
    .add_modifier(Modifier::UNDERLINED);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
