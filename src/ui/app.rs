use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::models::*;
use crate::report::{self, DailyView, MonthlyOverview, PeriodSummary};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Daily,
    Monthly,
    Budgets,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Expenses,
            Self::Daily,
            Self::Monthly,
            Self::Budgets,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Daily => write!(f, "Daily"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Budgets => write!(f, "Budgets"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, label: String },
    DeleteBudget { id: i64, label: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) today: NaiveDate,

    // Loaded tables
    pub(crate) expenses: ExpenseTable,
    pub(crate) budgets: Vec<Budget>,

    // Dashboard
    pub(crate) summary: PeriodSummary,
    pub(crate) month_by_category: Vec<(Category, Decimal)>,

    // Expenses
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Daily
    pub(crate) daily_date: NaiveDate,
    pub(crate) daily: DailyView,
    pub(crate) daily_index: usize,
    pub(crate) daily_scroll: usize,

    // Monthly
    pub(crate) periods: Vec<YearMonth>,
    pub(crate) selected_periods: Vec<YearMonth>,
    pub(crate) overview: MonthlyOverview,
    pub(crate) monthly_index: usize,
    pub(crate) monthly_scroll: usize,

    // Budgets
    pub(crate) budget_spent: Vec<Decimal>,
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    pub(crate) fn with_today(today: NaiveDate) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            today,

            expenses: ExpenseTable::default(),
            budgets: Vec::new(),

            summary: PeriodSummary::default(),
            month_by_category: Vec::new(),

            expense_index: 0,
            expense_scroll: 0,

            daily_date: today,
            daily: DailyView::default(),
            daily_index: 0,
            daily_scroll: 0,

            periods: Vec::new(),
            selected_periods: Vec::new(),
            overview: MonthlyOverview::default(),
            monthly_index: 0,
            monthly_scroll: 0,

            budget_spent: Vec::new(),
            budget_index: 0,
            budget_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Reload both tables from the store and recompute every view.
    pub(crate) fn refresh_all(&mut self, store: &Store) -> Result<()> {
        let snapshot = store.load_all()?;
        self.expenses = snapshot.expenses;
        self.budgets = snapshot.budgets;
        self.recompute();
        Ok(())
    }

    pub(crate) fn recompute(&mut self) {
        let rows = &self.expenses.rows;
        let current = YearMonth::of(self.today);

        self.summary = report::current_period_summary(rows, &self.budgets, self.today);
        let this_month: Vec<Expense> = rows
            .iter()
            .filter(|e| current.contains(e.date))
            .cloned()
            .collect();
        self.month_by_category = report::category_totals(&this_month);
        self.periods = report::available_periods(rows);
        self.budget_spent = self
            .budgets
            .iter()
            .map(|b| {
                YearMonth::from_month_name(&b.month, b.year)
                    .map(|p| report::spent_in(rows, p))
                    .unwrap_or(Decimal::ZERO)
            })
            .collect();
        clamp_index(&mut self.expense_index, rows.len());
        clamp_index(&mut self.budget_index, self.budgets.len());

        self.selected_periods.retain(|p| self.periods.contains(p));
        if self.selected_periods.is_empty() {
            if let Some(latest) = self.periods.last() {
                self.selected_periods.push(*latest);
            }
        }

        self.refresh_daily();
        self.refresh_overview();
    }

    pub(crate) fn refresh_daily(&mut self) {
        self.daily = report::daily_view(&self.expenses.rows, self.daily_date);
        clamp_index(&mut self.daily_index, self.daily.rows.len());
    }

    pub(crate) fn refresh_overview(&mut self) {
        self.overview =
            report::monthly_overview(&self.expenses.rows, &self.budgets, &self.selected_periods);
        clamp_index(&mut self.monthly_index, self.overview.rows.len());
        self.monthly_scroll = self.monthly_scroll.min(self.monthly_index);
    }

    pub(crate) fn set_daily_date(&mut self, date: NaiveDate) {
        self.daily_date = date;
        self.daily_index = 0;
        self.daily_scroll = 0;
        self.refresh_daily();
    }

    /// Replace the monthly selection with one period, stepping through the
    /// periods that have expenses.
    pub(crate) fn step_period(&mut self, delta: isize) {
        if self.periods.is_empty() {
            return;
        }
        let anchor = self.selected_periods.last().copied();
        let idx = anchor
            .and_then(|a| self.periods.iter().position(|p| *p == a))
            .unwrap_or(self.periods.len() - 1);
        let next = idx
            .saturating_add_signed(delta)
            .min(self.periods.len() - 1);
        self.select_periods(vec![self.periods[next]]);
    }

    /// Replace the monthly selection and move the cursor back to the top.
    pub(crate) fn select_periods(&mut self, periods: Vec<YearMonth>) {
        self.selected_periods = periods;
        self.monthly_index = 0;
        self.monthly_scroll = 0;
        self.refresh_overview();
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        match self.screen {
            Screen::Expenses => self.expenses.rows.get(self.expense_index),
            Screen::Daily => self.daily.rows.get(self.daily_index),
            Screen::Monthly => self.overview.rows.get(self.monthly_index),
            _ => None,
        }
    }

    pub(crate) fn selected_budget(&self) -> Option<&Budget> {
        self.budgets.get(self.budget_index)
    }

    pub(crate) fn confirm(&mut self, action: PendingAction, message: String) {
        self.pending_action = Some(action);
        self.confirm_message = message;
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn clamp_index(index: &mut usize, len: usize) {
    if *index >= len {
        *index = len.saturating_sub(1);
    }
}
