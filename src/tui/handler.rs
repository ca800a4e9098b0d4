//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the current
//! application state. Ticks advance timed state.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App, ConfirmAction};
use super::dialogs;
use super::event::Event;
use crate::wizard::Flow;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            app.on_tick(Instant::now());
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    // A retry offer takes the r and Esc keys before anything else
    if app.pending_retry.is_some() {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                app.retry();
                return Ok(());
            }
            KeyCode::Esc => {
                app.dismiss_retry();
                return Ok(());
            }
            _ => {}
        }
    }

    if app.has_dialog() {
        return handle_dialog_key(app, key);
    }

    handle_normal_key(app, key)
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return Ok(());
        }
        KeyCode::Tab => {
            app.switch_view(app.active_view.next());
            return Ok(());
        }
        KeyCode::Char('1') => {
            app.switch_view(ActiveView::Home);
            return Ok(());
        }
        KeyCode::Char('2') => {
            app.switch_view(ActiveView::Card);
            return Ok(());
        }
        KeyCode::Char('3') => {
            app.switch_view(ActiveView::History);
            return Ok(());
        }
        KeyCode::Char('g') => {
            app.refresh();
            app.set_status("تم التحديث");
            return Ok(());
        }
        _ => {}
    }

    match app.active_view {
        ActiveView::Home => handle_home_key(app, key),
        ActiveView::Card => handle_card_key(app, key),
        ActiveView::History => handle_history_key(app, key),
    }
    Ok(())
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.open_wizard(Flow::Recharge),
        KeyCode::Char('w') => app.open_wizard(Flow::Withdraw),
        KeyCode::Char('t') => app.open_wizard(Flow::InstantTransfer),
        KeyCode::Char('b') => app.open_dialog(ActiveDialog::Confirm(ConfirmAction::ClaimBonus)),
        _ => {}
    }
}

fn handle_card_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') => app.open_wizard(Flow::CardRequest),
        KeyCode::Char('a') => app.open_activation(),
        KeyCode::Char('c') => {
            let currency = app.card_charge_currency();
            app.open_wizard(Flow::CardCharge(currency));
        }
        KeyCode::Char('f') => {
            let action = match app.card() {
                Some(card) if card.is_frozen => Some(ConfirmAction::UnfreezeCard),
                Some(_) => Some(ConfirmAction::FreezeCard),
                None => None,
            };
            if let Some(action) = action {
                app.open_dialog(ActiveDialog::Confirm(action));
            }
        }
        KeyCode::Char('v') => app.reveal_card = !app.reveal_card,
        _ => {}
    }
}

fn handle_history_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('G') | KeyCode::End => {
            app.selected_index = app.history.len().saturating_sub(1);
        }
        KeyCode::Home => app.selected_index = 0,
        _ => {}
    }
}

/// Handle keys when a dialog is active
fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.active_dialog.clone() {
        ActiveDialog::Help | ActiveDialog::Error(_) => app.close_dialog(),
        ActiveDialog::Confirm(action) => {
            dialogs::confirm::handle_key(app, action, key);
        }
        ActiveDialog::Wizard => {
            dialogs::wizard::handle_key(app, key);
        }
        ActiveDialog::ActivateCard => {
            dialogs::activate_card::handle_key(app, key);
        }
        ActiveDialog::None => {}
    }
    Ok(())
}
