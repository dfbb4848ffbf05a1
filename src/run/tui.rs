use anyhow::Result;
use chrono::Days;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::store::Store;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: &mut Store) -> Result<()> {
    let mut app = App::new();
    app.refresh_all(store)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("session ended with error: {e:?}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // 1 tab + 1 status + 1 cmd + 2 borders + 1 header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Confirm => handle_confirm_input(key, app, store)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as usize) - ('1' as usize);
            switch_screen(app, Screen::all()[idx]);
        }
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, screens[(idx + 1) % screens.len()]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, screens[prev]);
        }
        KeyCode::Esc => app.set_status(""),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('H') => handle_step(app, -1),
        KeyCode::Char('L') => handle_step(app, 1),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('D') => match app.screen {
            Screen::Expenses | Screen::Daily | Screen::Monthly => {
                commands::handle_command("delete-expense", app, store)?
            }
            Screen::Budgets => commands::handle_command("delete-budget", app, store)?,
            _ => {}
        },
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    let action = app.pending_action.take();
    match (key.code, action) {
        (KeyCode::Char('y') | KeyCode::Char('Y'), Some(action)) => {
            commands::run_pending(action, app, store)?;
        }
        _ => app.set_status("Cancelled"),
    }
    Ok(())
}

fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    app.set_status(format!("{screen}"));
}

/// H/L: step the day on Daily, the month on Monthly.
fn handle_step(app: &mut App, delta: i32) {
    match app.screen {
        Screen::Daily => {
            let days = Days::new(delta.unsigned_abs() as u64);
            let next = if delta < 0 {
                app.daily_date.checked_sub_days(days)
            } else {
                app.daily_date.checked_add_days(days)
            };
            if let Some(date) = next {
                app.set_daily_date(date);
            }
        }
        Screen::Monthly => app.step_period(delta as isize),
        _ => {}
    }
}

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Expenses => scroll_down(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.expenses.rows.len(),
            page,
        ),
        Screen::Daily => scroll_down(
            &mut app.daily_index,
            &mut app.daily_scroll,
            app.daily.rows.len(),
            page.saturating_sub(1).max(1),
        ),
        Screen::Monthly => scroll_down(
            &mut app.monthly_index,
            &mut app.monthly_scroll,
            app.overview.rows.len(),
            page,
        ),
        Screen::Budgets => scroll_down(
            &mut app.budget_index,
            &mut app.budget_scroll,
            app.budgets.len(),
            page,
        ),
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_up(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Daily => scroll_up(&mut app.daily_index, &mut app.daily_scroll),
        Screen::Monthly => scroll_up(&mut app.monthly_index, &mut app.monthly_scroll),
        Screen::Budgets => scroll_up(&mut app.budget_index, &mut app.budget_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_to_top(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Daily => scroll_to_top(&mut app.daily_index, &mut app.daily_scroll),
        Screen::Monthly => scroll_to_top(&mut app.monthly_index, &mut app.monthly_scroll),
        Screen::Budgets => scroll_to_top(&mut app.budget_index, &mut app.budget_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.visible_rows;
    match app.screen {
        Screen::Expenses => scroll_to_bottom(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.expenses.rows.len(),
            page,
        ),
        Screen::Daily => scroll_to_bottom(
            &mut app.daily_index,
            &mut app.daily_scroll,
            app.daily.rows.len(),
            page.saturating_sub(1).max(1),
        ),
        Screen::Monthly => scroll_to_bottom(
            &mut app.monthly_index,
            &mut app.monthly_scroll,
            app.overview.rows.len(),
            page,
        ),
        Screen::Budgets => scroll_to_bottom(
            &mut app.budget_index,
            &mut app.budget_scroll,
            app.budgets.len(),
            page,
        ),
        Screen::Dashboard => {}
    }
}
