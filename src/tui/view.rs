//! Pure rendering: map App state to ratatui widget trees.
//!
//! Widget-building functions are pure (state in, widgets out); the only
//! effect is Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::add_friend::{AddField, AddFriendForm};
use crate::registry::RegistryState;
use crate::report::totals;
use crate::split_bill::{SplitBillForm, SplitField};
use crate::types::{format_amount, FriendRecord, Payer, Standing};

use super::state::{App, Focus};
use super::theme;

/// Rows taken by the Add-Friend panel, borders included.
const ADD_PANEL_HEIGHT: u16 = 6;

/// Rows drawn per friend in the list.
const ROWS_PER_FRIEND: usize = 3;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole app to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(&app.registry), chunks[0]);
    frame.render_widget(render_help(app.ui.focus), chunks[2]);

    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let sidebar = if app.registry.show_add_friend {
        Layout::vertical([Constraint::Min(0), Constraint::Length(ADD_PANEL_HEIGHT)])
            .split(columns[0])
    } else {
        Layout::vertical([Constraint::Min(0)]).split(columns[0])
    };

    render_friend_list(app, frame, sidebar[0]);

    if app.registry.show_add_friend {
        let field = match app.ui.focus {
            Focus::AddFriend(field) => Some(field),
            _ => None,
        };
        render_add_friend(&app.ui.add_form, field, frame, sidebar[1]);
    }

    if let (Some(friend), Some(form)) = (app.registry.selected_friend(), &app.ui.split_form) {
        let field = match app.ui.focus {
            Focus::SplitBill(field) => Some(field),
            _ => None,
        };
        render_split_bill(friend, form, field, frame, columns[1]);
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar with the app name and the net position across all friends.
fn render_title(registry: &RegistryState) -> Paragraph<'static> {
    let totals = totals(&registry.friends);

    Paragraph::new(Line::from(vec![
        Span::styled("eat-n-split", theme::STYLE_TITLE),
        Span::styled(
            format!("   owed to you ${}", format_amount(totals.owed_to_you)),
            theme::STYLE_OWED,
        ),
        Span::styled(
            format!("   you owe ${}", format_amount(totals.you_owe)),
            theme::STYLE_OWING,
        ),
    ]))
}

/// Help line showing available keybindings for the current focus.
fn render_help(focus: Focus) -> Paragraph<'static> {
    let help_text = match focus {
        Focus::FriendList => {
            "[j/k] move  [Enter] select  [a] add friend  [Tab] switch panel  [q] quit"
        }
        Focus::AddFriend(_) => "[↑/↓] field  [Enter] add  [Tab] switch panel  [Esc] back",
        Focus::SplitBill(_) => {
            "[↑/↓] field  [←/→] payer  [Enter] split bill  [Tab] switch panel  [Esc] back"
        }
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

fn panel(title: String, focused: bool) -> Block<'static> {
    let border_style = if focused {
        theme::STYLE_FOCUSED_BORDER
    } else {
        theme::STYLE_BORDER
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, theme::STYLE_TITLE))
}

/// One `label: value` input row. The active row gets a cursor.
fn input_line(label: &str, value: &str, active: bool) -> Line<'static> {
    let value_style = if active {
        theme::STYLE_ACTIVE_INPUT
    } else {
        Style::default()
    };
    let mut spans = vec![
        Span::raw(format!(" {}: ", label)),
        Span::styled(value.to_string(), value_style),
    ];
    if active {
        spans.push(Span::styled("▏", theme::STYLE_INTERACTIVE));
    }
    Line::from(spans)
}

// ============================================================================
// FRIEND LIST
// ============================================================================

fn render_friend_list(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.ui.focus == Focus::FriendList;
    let block = panel(format!("Friends ({})", app.registry.friends.len()), focused);

    let mut lines: Vec<Line> = Vec::new();
    for (i, friend) in app.registry.friends.iter().enumerate() {
        let is_cursor = focused && i == app.ui.cursor;
        let is_selected = app.registry.is_selected(&friend.id);
        lines.extend(friend_lines(friend, is_cursor, is_selected));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(" No friends yet", theme::STYLE_DIM)));
    }

    // Scroll: keep every row of the cursor's friend inside the panel
    let visible_height = area.height.saturating_sub(2) as usize;
    let scroll_offset = list_scroll_offset(app.ui.cursor, visible_height);

    let list = Paragraph::new(lines)
        .block(block)
        .scroll((scroll_offset as u16, 0));
    frame.render_widget(list, area);
}

/// First list row to draw so that the friend at `cursor` is fully visible.
fn list_scroll_offset(cursor: usize, visible_height: usize) -> usize {
    let last_row = cursor * ROWS_PER_FRIEND + ROWS_PER_FRIEND;
    last_row.saturating_sub(visible_height)
}

/// Three rows per friend: name and button, standing, avatar URL.
fn friend_lines(friend: &FriendRecord, is_cursor: bool, is_selected: bool) -> Vec<Line<'static>> {
    let marker = if is_cursor { "▸ " } else { "  " };
    let name_style = if is_selected {
        theme::STYLE_SELECTED
    } else if is_cursor {
        theme::STYLE_CURSOR
    } else {
        theme::STYLE_IMPORTANT
    };
    let button = if is_selected { "[Close]" } else { "[Select]" };

    let standing = friend.standing();
    let standing_style = match standing {
        Standing::YouOwe(_) => theme::STYLE_OWING,
        Standing::OwesYou(_) => theme::STYLE_OWED,
        Standing::Even => Style::default(),
    };

    vec![
        Line::from(vec![
            Span::styled(marker, theme::STYLE_INTERACTIVE),
            Span::styled(friend.name.clone(), name_style),
            Span::raw(" "),
            Span::styled(button, theme::STYLE_INTERACTIVE),
        ]),
        Line::from(Span::styled(
            format!("    {}", standing.describe(&friend.name)),
            standing_style,
        )),
        Line::from(Span::styled(format!("    {}", friend.image_url), theme::STYLE_DIM)),
    ]
}

// ============================================================================
// ADD FRIEND
// ============================================================================

fn render_add_friend(
    form: &AddFriendForm,
    active: Option<AddField>,
    frame: &mut Frame,
    area: Rect,
) {
    let block = panel("Add friend".to_string(), active.is_some());

    let lines = vec![
        input_line("Friend name", &form.name, active == Some(AddField::Name)),
        input_line("Image URL", &form.image_url, active == Some(AddField::ImageUrl)),
        Line::from(""),
        Line::from(vec![
            Span::styled(" [Enter] ", theme::STYLE_INTERACTIVE),
            Span::raw("Add"),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// SPLIT BILL
// ============================================================================

fn render_split_bill(
    friend: &FriendRecord,
    form: &SplitBillForm,
    active: Option<SplitField>,
    frame: &mut Frame,
    area: Rect,
) {
    let block = panel(format!("Split a bill with {}", friend.name), active.is_some());

    let friend_share = form.paid_by_friend().map(format_amount).unwrap_or_default();
    let payer = match form.payer() {
        Payer::User => "You".to_string(),
        Payer::Friend => friend.name.clone(),
    };

    let lines = vec![
        Line::from(""),
        input_line("Bill value", form.bill_text(), active == Some(SplitField::Bill)),
        input_line(
            "Your expense",
            form.paid_by_user_text(),
            active == Some(SplitField::PaidByUser),
        ),
        Line::from(vec![
            Span::raw(format!(" {}'s expense: ", friend.name)),
            Span::styled(friend_share, theme::STYLE_DIM),
        ]),
        input_line(
            "Who is paying the bill",
            &format!("< {} >", payer),
            active == Some(SplitField::Payer),
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled(" [Enter] ", theme::STYLE_INTERACTIVE),
            Span::raw("Split bill"),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::Action;
    use crate::tui::update::dispatch;
    use crate::types::FriendId;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(100, 30);
        Terminal::new(backend).unwrap()
    }

    fn rendered(app: &App) -> String {
        let mut terminal = make_terminal();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn press(app: &mut App, actions: &[Action]) {
        for action in actions {
            dispatch(app, action, || FriendId::from("new"));
        }
    }

    #[test]
    fn friend_list_shows_standings() {
        let content = rendered(&App::seeded());
        assert!(content.contains("You owe Clark $7"));
        assert!(content.contains("Sarah owes you $20"));
        assert!(content.contains("You and Anthony are even"));
    }

    #[test]
    fn title_shows_totals() {
        let content = rendered(&App::seeded());
        assert!(content.contains("owed to you $20"));
        assert!(content.contains("you owe $7"));
    }

    #[test]
    fn idle_shows_no_forms() {
        let content = rendered(&App::seeded());
        assert!(!content.contains("Split a bill"));
        assert!(!content.contains("Add friend"));
        assert!(content.contains("[Select]"));
    }

    #[test]
    fn add_friend_panel_renders_default_url() {
        let mut app = App::seeded();
        press(&mut app, &[Action::ToggleAddFriend]);
        let content = rendered(&app);
        assert!(content.contains("Add friend"));
        assert!(content.contains("Image URL: https://i.pravatar.cc/48"));
    }

    #[test]
    fn split_panel_shows_derived_friend_share() {
        let mut app = App::seeded();
        press(&mut app, &[Action::Select]);
        for c in "100".chars() {
            press(&mut app, &[Action::Input(c)]);
        }
        press(&mut app, &[Action::MoveDown, Action::Input('4'), Action::Input('0')]);

        let content = rendered(&app);
        assert!(content.contains("Split a bill with Clark"));
        assert!(content.contains("Clark's expense: 60"));
        assert!(content.contains("< You >"));
        assert!(content.contains("[Close]"));
    }

    #[test]
    fn payer_choice_shows_friend_name() {
        let mut app = App::seeded();
        press(&mut app, &[Action::MoveDown, Action::Select, Action::MoveUp, Action::CyclePayer]);
        let content = rendered(&app);
        assert!(content.contains("< Sarah >"));
    }

    #[test]
    fn empty_roster_renders_placeholder() {
        let app = App::with_registry(RegistryState::default());
        let content = rendered(&app);
        assert!(content.contains("No friends yet"));
    }

    #[test]
    fn help_line_follows_focus() {
        let mut app = App::seeded();
        assert!(rendered(&app).contains("[a] add friend"));
        press(&mut app, &[Action::Select]);
        assert!(rendered(&app).contains("[Enter] split bill"));
    }

    fn rendered_at(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn add_friend(app: &mut App, name: &str) {
        press(app, &[Action::ToggleAddFriend]);
        for c in name.chars() {
            press(app, &[Action::Input(c)]);
        }
        press(app, &[Action::Submit]);
    }

    #[test]
    fn long_list_scrolls_to_newly_added_friend() {
        let mut app = App::seeded();
        for name in ["Dana", "Eve", "Finn", "Gus", "Hal", "Ivy", "Zed"] {
            add_friend(&mut app, name);
        }
        assert_eq!(app.registry.friends.len(), 10);
        assert_eq!(app.ui.cursor, 9);

        let content = rendered_at(&app, 80, 24);
        assert!(content.contains("▸ Zed"), "cursor row should be drawn");
        assert!(content.contains("You and Zed are even"));
        assert!(!content.contains("You owe Clark $7"), "top rows scroll away");
    }

    #[test]
    fn scrolling_back_up_shows_first_friend() {
        let mut app = App::seeded();
        for name in ["Dana", "Eve", "Finn", "Gus", "Hal", "Ivy", "Zed"] {
            add_friend(&mut app, name);
        }
        for _ in 0..9 {
            press(&mut app, &[Action::MoveUp]);
        }
        let content = rendered_at(&app, 80, 24);
        assert!(content.contains("▸ Clark"));
        assert!(content.contains("You owe Clark $7"));
    }

    #[test]
    fn scroll_offset_only_when_cursor_overflows() {
        assert_eq!(list_scroll_offset(0, 20), 0);
        assert_eq!(list_scroll_offset(5, 20), 0);
        // rows 18..21 for cursor 6 need one row of scroll in 20
        assert_eq!(list_scroll_offset(6, 20), 1);
        assert_eq!(list_scroll_offset(9, 20), 10);
        assert_eq!(list_scroll_offset(2, 0), 9);
    }

    #[test]
    fn title_matches_report_totals() {
        let mut app = App::seeded();
        press(&mut app, &[Action::MoveDown, Action::MoveDown, Action::Select]);
        for c in "30".chars() {
            press(&mut app, &[Action::Input(c)]);
        }
        press(&mut app, &[Action::MoveDown, Action::Input('1'), Action::Input('0')]);
        press(&mut app, &[Action::Submit]);

        let t = totals(&app.registry.friends);
        assert_eq!(t.owed_to_you, 40.0);
        let content = rendered(&app);
        assert!(content.contains("owed to you $40"));
        assert!(content.contains("you owe $7"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = App::seeded();
        press(&mut app, &[Action::Select, Action::Back, Action::ToggleAddFriend]);
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal
            .draw(|frame| render(&app, frame))
            .expect("render should not panic");
    }
}
