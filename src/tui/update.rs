//! Pure state transitions: (Ui, Action, &RegistryState) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//! Each focus defines which actions it accepts. Unhandled actions
//! return the current state unchanged (no-op).
//!
//! Registry changes are never made here directly: they come back as an
//! [`Effect`] which [`apply_effect`] folds into the registry.

use tracing::debug;

use crate::add_friend::AddField;
use crate::registry::{RegistryEvent, RegistryState};
use crate::split_bill::SplitField;
use crate::types::FriendId;

use super::state::{Action, App, Effect, Focus, Transition, Ui};

/// Pure state transition function.
pub fn update(ui: Ui, action: &Action, registry: &RegistryState) -> Transition {
    match action {
        Action::Quit => return Transition::Quit,
        Action::CycleFocus => {
            let focus = next_focus(ui.focus, &ui, registry);
            return Transition::Ui(Ui { focus, ..ui });
        }
        _ => {}
    }

    match ui.focus {
        Focus::FriendList => update_friend_list(ui, action, registry),
        Focus::AddFriend(field) => update_add_friend(ui, field, action),
        Focus::SplitBill(field) => update_split_bill(ui, field, action),
    }
}

/// Run one action to completion, including any registry effect.
///
/// `mint_id` is called only when a friend is actually added.
pub fn dispatch(app: &mut App, action: &Action, mint_id: impl FnOnce() -> FriendId) {
    let ui = std::mem::take(&mut app.ui);
    match update(ui, action, &app.registry) {
        Transition::Ui(ui) => app.ui = ui,
        Transition::Quit => app.should_quit = true,
        Transition::Effect(ui, effect) => apply_effect(app, ui, effect, mint_id),
    }
}

// ============================================================================
// PER-FOCUS HANDLERS
// ============================================================================

/// Friend list: cursor movement, selection, Add-Friend toggle.
fn update_friend_list(mut ui: Ui, action: &Action, registry: &RegistryState) -> Transition {
    let len = registry.friends.len();

    match action {
        Action::MoveUp => {
            ui.cursor = ui.cursor.saturating_sub(1);
            Transition::Ui(ui)
        }
        Action::MoveDown => {
            ui.cursor = if len == 0 { 0 } else { (ui.cursor + 1).min(len - 1) };
            Transition::Ui(ui)
        }
        Action::Select => match registry.friends.get(ui.cursor) {
            Some(friend) => {
                let event = RegistryEvent::SelectFriend(friend.id.clone());
                Transition::Effect(ui, Effect::Registry(event))
            }
            None => Transition::Ui(ui),
        },
        Action::ToggleAddFriend => {
            Transition::Effect(ui, Effect::Registry(RegistryEvent::ToggleAddFriend))
        }
        _ => Transition::Ui(ui),
    }
}

/// Add-Friend form: text entry and submission.
fn update_add_friend(mut ui: Ui, field: AddField, action: &Action) -> Transition {
    match action {
        Action::MoveUp => {
            ui.focus = Focus::AddFriend(field.prev());
            Transition::Ui(ui)
        }
        Action::MoveDown => {
            ui.focus = Focus::AddFriend(field.next());
            Transition::Ui(ui)
        }
        Action::Input(c) => {
            ui.add_form.field_mut(field).push(*c);
            Transition::Ui(ui)
        }
        Action::Backspace => {
            ui.add_form.field_mut(field).pop();
            Transition::Ui(ui)
        }
        Action::Submit => match ui.add_form.submit() {
            Ok(draft) => Transition::Effect(ui, Effect::AddFriend(draft)),
            Err(reason) => {
                debug!(%reason, "add friend discarded");
                Transition::Ui(ui)
            }
        },
        Action::Back => {
            ui.focus = Focus::FriendList;
            Transition::Ui(ui)
        }
        _ => Transition::Ui(ui),
    }
}

/// Split-Bill form: amount entry, payer choice, submission.
fn update_split_bill(mut ui: Ui, field: SplitField, action: &Action) -> Transition {
    let Some(form) = ui.split_form.as_mut() else {
        ui.focus = Focus::FriendList;
        return Transition::Ui(ui);
    };

    match action {
        Action::MoveUp => {
            ui.focus = Focus::SplitBill(field.prev());
            Transition::Ui(ui)
        }
        Action::MoveDown => {
            ui.focus = Focus::SplitBill(field.next());
            Transition::Ui(ui)
        }
        Action::Input(' ') | Action::CyclePayer if field == SplitField::Payer => {
            form.toggle_payer();
            Transition::Ui(ui)
        }
        Action::Input(c) => {
            if !form.push_char(field, *c) {
                debug!(?field, input = %c, "split bill keystroke rejected");
            }
            Transition::Ui(ui)
        }
        Action::Backspace => {
            form.pop_char(field);
            Transition::Ui(ui)
        }
        Action::Submit => match form.submit() {
            Ok(delta) => {
                let event = RegistryEvent::ApplyBalanceDelta(delta);
                Transition::Effect(ui, Effect::Registry(event))
            }
            Err(reason) => {
                debug!(%reason, "split bill discarded");
                Transition::Ui(ui)
            }
        },
        Action::Back => {
            ui.focus = Focus::FriendList;
            Transition::Ui(ui)
        }
        _ => Transition::Ui(ui),
    }
}

/// Next visible panel after the current one, wrapping to the list.
fn next_focus(current: Focus, ui: &Ui, registry: &RegistryState) -> Focus {
    let mut order = vec![Focus::FriendList];
    if registry.show_add_friend {
        order.push(Focus::AddFriend(AddField::Name));
    }
    if ui.split_form.is_some() {
        order.push(Focus::SplitBill(SplitField::Bill));
    }

    let index = order
        .iter()
        .position(|f| same_panel(*f, current))
        .unwrap_or(0);
    order[(index + 1) % order.len()]
}

fn same_panel(a: Focus, b: Focus) -> bool {
    std::mem::discriminant(&a) == std::mem::discriminant(&b)
}

// ============================================================================
// EFFECTS
// ============================================================================

/// Fold a requested registry change into the app, then realign the UI.
pub fn apply_effect(app: &mut App, mut ui: Ui, effect: Effect, mint_id: impl FnOnce() -> FriendId) {
    let registry = std::mem::take(&mut app.registry);

    let registry = match effect {
        Effect::Registry(RegistryEvent::SelectFriend(id)) => {
            let registry = registry.select_friend(id.clone());
            ui.focus = if registry.selected.is_some() {
                Focus::SplitBill(SplitField::Bill)
            } else {
                Focus::FriendList
            };
            if let Some(pos) = registry.position(&id) {
                ui.cursor = pos;
            }
            registry
        }
        Effect::Registry(RegistryEvent::ToggleAddFriend) => {
            let registry = registry.toggle_add_friend();
            ui.focus = if registry.show_add_friend {
                Focus::AddFriend(AddField::Name)
            } else {
                Focus::FriendList
            };
            registry
        }
        Effect::Registry(event) => {
            ui.focus = Focus::FriendList;
            registry.apply(event)
        }
        Effect::AddFriend(draft) => {
            let record = draft.into_record(mint_id());
            let registry = registry.add_friend(record);
            ui.focus = Focus::FriendList;
            ui.cursor = registry.friends.len().saturating_sub(1);
            registry
        }
    };

    app.ui = ui.reconcile(&registry);
    app.registry = registry;
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Payer;

    fn fixed_id() -> FriendId {
        FriendId::from("fixed")
    }

    fn run(app: &mut App, actions: &[Action]) {
        for action in actions {
            dispatch(app, action, fixed_id);
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            dispatch(app, &Action::Input(c), fixed_id);
        }
    }

    fn balance_of(app: &App, id: &str) -> f64 {
        app.registry.friend(&FriendId::from(id)).unwrap().balance
    }

    // -- Friend list --

    #[test]
    fn quit_from_any_focus() {
        let ui = Ui {
            focus: Focus::AddFriend(AddField::Name),
            ..Ui::default()
        };
        let registry = RegistryState::seeded();
        assert_eq!(update(ui, &Action::Quit, &registry), Transition::Quit);
    }

    #[test]
    fn cursor_moves_within_bounds() {
        let mut app = App::seeded();
        run(&mut app, &[Action::MoveUp]);
        assert_eq!(app.ui.cursor, 0);
        run(&mut app, &[Action::MoveDown, Action::MoveDown, Action::MoveDown]);
        assert_eq!(app.ui.cursor, 2);
    }

    #[test]
    fn select_requests_registry_effect() {
        let registry = RegistryState::seeded();
        let result = update(Ui::default(), &Action::Select, &registry);
        assert_eq!(
            result,
            Transition::Effect(
                Ui::default(),
                Effect::Registry(RegistryEvent::SelectFriend(FriendId::from("118836")))
            )
        );
    }

    #[test]
    fn select_on_empty_list_is_noop() {
        let registry = RegistryState::default();
        let result = update(Ui::default(), &Action::Select, &registry);
        assert_eq!(result, Transition::Ui(Ui::default()));
    }

    #[test]
    fn selecting_opens_split_form_with_focus() {
        let mut app = App::seeded();
        run(&mut app, &[Action::MoveDown, Action::Select]);
        assert_eq!(app.registry.selected, Some(FriendId::from("933372")));
        assert_eq!(app.ui.focus, Focus::SplitBill(SplitField::Bill));
        assert_eq!(
            app.ui.split_form.as_ref().map(|f| f.friend_id().clone()),
            Some(FriendId::from("933372"))
        );
    }

    #[test]
    fn reselecting_same_friend_returns_to_idle() {
        let mut app = App::seeded();
        run(&mut app, &[Action::Select, Action::Back, Action::Select]);
        assert!(app.registry.selected.is_none());
        assert!(app.ui.split_form.is_none());
        assert_eq!(app.ui.focus, Focus::FriendList);
    }

    #[test]
    fn switching_friend_discards_split_entry() {
        let mut app = App::seeded();
        run(&mut app, &[Action::Select]);
        type_text(&mut app, "50");
        run(&mut app, &[Action::Back, Action::MoveDown, Action::Select]);

        let form = app.ui.split_form.as_ref().unwrap();
        assert_eq!(form.friend_id(), &FriendId::from("933372"));
        assert_eq!(form.bill_text(), "");
    }

    // -- Add friend --

    #[test]
    fn toggle_add_friend_opens_and_focuses_form() {
        let mut app = App::seeded();
        run(&mut app, &[Action::ToggleAddFriend]);
        assert!(app.registry.show_add_friend);
        assert_eq!(app.ui.focus, Focus::AddFriend(AddField::Name));
    }

    #[test]
    fn add_friend_appends_with_minted_id() {
        let mut app = App::seeded();
        run(&mut app, &[Action::ToggleAddFriend]);
        type_text(&mut app, "Dana");
        run(&mut app, &[Action::Submit]);

        assert_eq!(app.registry.friends.len(), 4);
        let dana = &app.registry.friends[3];
        assert_eq!(dana.id, fixed_id());
        assert_eq!(dana.name, "Dana");
        assert_eq!(dana.image_url, "https://i.pravatar.cc/48?=fixed");
        assert_eq!(dana.balance, 0.0);
        assert!(!app.registry.show_add_friend);
        assert_eq!(app.ui.focus, Focus::FriendList);
        assert_eq!(app.ui.cursor, 3);
    }

    #[test]
    fn add_friend_with_empty_name_keeps_panel_open() {
        let mut app = App::seeded();
        run(&mut app, &[Action::ToggleAddFriend, Action::Submit]);
        assert_eq!(app.registry.friends.len(), 3);
        assert!(app.registry.show_add_friend);
        assert_eq!(app.ui.focus, Focus::AddFriend(AddField::Name));
    }

    #[test]
    fn add_friend_with_cleared_image_url_is_discarded() {
        let mut app = App::seeded();
        run(&mut app, &[Action::ToggleAddFriend]);
        type_text(&mut app, "Dana");
        run(&mut app, &[Action::MoveDown]);
        for _ in 0.."https://i.pravatar.cc/48".len() {
            run(&mut app, &[Action::Backspace]);
        }
        run(&mut app, &[Action::Submit]);
        assert_eq!(app.registry.friends.len(), 3);
        assert_eq!(app.ui.add_form.name, "Dana");
    }

    #[test]
    fn mint_id_not_called_unless_friend_added() {
        let mut app = App::seeded();
        dispatch(&mut app, &Action::Select, || panic!("no id needed"));
        dispatch(&mut app, &Action::Submit, || panic!("no id needed"));
    }

    #[test]
    fn letters_are_typed_not_commands_while_editing() {
        let mut app = App::seeded();
        run(&mut app, &[Action::ToggleAddFriend]);
        type_text(&mut app, "qa");
        assert_eq!(app.ui.add_form.name, "qa");
        assert!(!app.should_quit);
    }

    #[test]
    fn both_panels_can_be_open() {
        let mut app = App::seeded();
        run(&mut app, &[Action::Select, Action::Back, Action::ToggleAddFriend]);
        assert!(app.registry.show_add_friend);
        assert!(app.registry.selected.is_some());
        assert!(app.ui.split_form.is_some());
    }

    #[test]
    fn selecting_closes_add_panel_and_resets_its_form() {
        let mut app = App::seeded();
        run(&mut app, &[Action::ToggleAddFriend]);
        type_text(&mut app, "Half");
        run(&mut app, &[Action::Back, Action::Select]);
        assert!(!app.registry.show_add_friend);
        assert_eq!(app.ui.add_form.name, "");
    }

    // -- Split bill --

    #[test]
    fn user_pays_increases_friend_balance() {
        let mut app = App::seeded();
        run(&mut app, &[Action::MoveDown, Action::Select]);
        type_text(&mut app, "100");
        run(&mut app, &[Action::MoveDown]);
        type_text(&mut app, "40");
        assert_eq!(app.ui.split_form.as_ref().unwrap().paid_by_friend(), Some(60.0));
        run(&mut app, &[Action::Submit]);

        assert_eq!(balance_of(&app, "933372"), 80.0);
        assert!(app.registry.selected.is_none());
        assert!(app.ui.split_form.is_none());
        assert_eq!(app.ui.focus, Focus::FriendList);
    }

    #[test]
    fn friend_pays_decreases_friend_balance() {
        let mut app = App::seeded();
        run(&mut app, &[Action::MoveDown, Action::Select]);
        type_text(&mut app, "100");
        run(&mut app, &[Action::MoveDown]);
        type_text(&mut app, "40");
        run(&mut app, &[Action::MoveDown, Action::CyclePayer]);
        assert_eq!(app.ui.split_form.as_ref().unwrap().payer(), Payer::Friend);
        run(&mut app, &[Action::Submit]);

        assert_eq!(balance_of(&app, "933372"), -20.0);
    }

    #[test]
    fn user_share_above_bill_keeps_previous_value() {
        let mut app = App::seeded();
        run(&mut app, &[Action::Select]);
        type_text(&mut app, "100");
        run(&mut app, &[Action::MoveDown]);
        type_text(&mut app, "12");
        type_text(&mut app, "0");
        assert_eq!(app.ui.split_form.as_ref().unwrap().paid_by_user_text(), "12");
    }

    #[test]
    fn incomplete_split_is_discarded() {
        let mut app = App::seeded();
        run(&mut app, &[Action::Select]);
        type_text(&mut app, "100");
        run(&mut app, &[Action::Submit]);
        assert_eq!(balance_of(&app, "118836"), -7.0);
        assert!(app.registry.selected.is_some());
    }

    #[test]
    fn clark_even_split_leaves_balance_unchanged() {
        let mut app = App::seeded();
        run(&mut app, &[Action::Select]);
        type_text(&mut app, "20");
        run(&mut app, &[Action::MoveDown]);
        type_text(&mut app, "20");
        assert_eq!(app.ui.split_form.as_ref().unwrap().paid_by_friend(), Some(0.0));
        run(&mut app, &[Action::Submit]);

        assert_eq!(balance_of(&app, "118836"), -7.0);
        assert!(app.registry.selected.is_none());
    }

    #[test]
    fn space_on_payer_field_toggles_payer() {
        let mut app = App::seeded();
        run(&mut app, &[Action::Select, Action::MoveUp]);
        assert_eq!(app.ui.focus, Focus::SplitBill(SplitField::Payer));
        run(&mut app, &[Action::Input(' ')]);
        assert_eq!(app.ui.split_form.as_ref().unwrap().payer(), Payer::Friend);
    }

    // -- Focus cycling --

    #[test]
    fn cycle_focus_visits_visible_panels_only() {
        let mut app = App::seeded();
        run(&mut app, &[Action::CycleFocus]);
        assert_eq!(app.ui.focus, Focus::FriendList);

        run(&mut app, &[Action::Select, Action::Back, Action::ToggleAddFriend]);
        assert_eq!(app.ui.focus, Focus::AddFriend(AddField::Name));
        run(&mut app, &[Action::CycleFocus]);
        assert_eq!(app.ui.focus, Focus::SplitBill(SplitField::Bill));
        run(&mut app, &[Action::CycleFocus]);
        assert_eq!(app.ui.focus, Focus::FriendList);
    }

    #[test]
    fn back_returns_to_list_without_closing_panel() {
        let mut app = App::seeded();
        run(&mut app, &[Action::Select, Action::Back]);
        assert_eq!(app.ui.focus, Focus::FriendList);
        assert!(app.registry.selected.is_some());
    }
}
