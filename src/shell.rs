use log::{error, warn};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use crate::budget::{compare, total_of, BudgetStanding};
use crate::csv_handler::{self, LoadOutcome};
use crate::expense_store::{ExpenseRecord, ExpenseStore};
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddExpense,
    ViewExpenses,
    TrackBudget,
    SaveExpenses,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::AddExpense,
        MenuAction::ViewExpenses,
        MenuAction::TrackBudget,
        MenuAction::SaveExpenses,
        MenuAction::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::AddExpense => "Add expense",
            MenuAction::ViewExpenses => "View expenses",
            MenuAction::TrackBudget => "Track budget",
            MenuAction::SaveExpenses => "Save expenses",
            MenuAction::Exit => "Exit",
        }
    }

    /// Accepts the 1-based menu number or the action name in any case.
    pub fn parse(input: &str) -> Option<MenuAction> {
        let choice = input.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .enumerate()
            .find(|(i, action)| choice == (i + 1).to_string() || choice == action.label().to_lowercase())
            .map(|(_, action)| action)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Done,
    InputClosed,
}

/// Interactive session over any line-based input and text output. Owns the
/// expense store and the current monthly budget for the session's lifetime.
pub struct Shell<R, W> {
    input: R,
    output: W,
    path: PathBuf,
    store: ExpenseStore,
    budget: f64,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, path: impl Into<PathBuf>) -> Self {
        Shell {
            input,
            output,
            path: path.into(),
            store: ExpenseStore::default(),
            budget: 0.0,
        }
    }

    /// Replaces the session state with the contents of the expenses file.
    /// Load failures are reported and leave an empty store.
    pub fn load_expenses(&mut self) -> io::Result<()> {
        self.store.clear();
        self.budget = 0.0;

        match csv_handler::load_expenses(&self.path) {
            Ok(LoadOutcome::NotFound) => {
                writeln!(self.output, "'{}' not found. Starting with no previous expenses.", self.path.display())?;
            }
            Ok(LoadOutcome::Loaded(loaded)) => {
                for skipped in &loaded.skipped {
                    writeln!(self.output, "Warning: Skipping corrupted row {} in CSV: {}", skipped.row, skipped.reason)?;
                }
                self.store.replace(loaded.records);
                self.budget = loaded.budget;
                writeln!(
                    self.output,
                    "Loaded {} expenses and budget ${:.2} from '{}'.",
                    self.store.len(),
                    self.budget,
                    self.path.display()
                )?;
            }
            Err(e) => {
                error!("Failed to load expenses: {}", e);
                writeln!(self.output, "Error loading expenses from file: {}", e)?;
            }
        }
        Ok(())
    }

    /// Runs the menu loop until the user exits, declines to continue, or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let Some(choice) = self.read_line("Enter the action (number or name) you want to perform: ")? else {
                return Ok(());
            };
            let Some(action) = MenuAction::parse(&choice) else {
                writeln!(self.output, "Invalid input")?;
                continue;
            };

            let step = match action {
                MenuAction::AddExpense => self.add_expense()?,
                MenuAction::ViewExpenses => self.view_expenses()?,
                MenuAction::TrackBudget => self.track_budget()?,
                MenuAction::SaveExpenses => self.save_expenses()?,
                MenuAction::Exit => {
                    writeln!(self.output, "Exiting the program.")?;
                    return Ok(());
                }
            };
            if step == Step::InputClosed {
                return Ok(());
            }

            let answer = self.prompt_until("Do you want to continue? (Y/N): ", |text| {
                validation::parse_continuation(text).ok_or("Invalid input. Please enter 'Y' or 'N'.")
            })?;
            match answer {
                Some(true) => {}
                Some(false) => {
                    writeln!(self.output, "Completed budget tracking actions for now.")?;
                    return Ok(());
                }
                None => return Ok(()),
            }
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "** Personal Expense Tracker Options **")?;
        for (i, action) in MenuAction::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, action.label())?;
        }
        Ok(())
    }

    /// Returns `None` once the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Re-prompts until `parse` accepts the input, showing each rejection.
    fn prompt_until<T, E: Display>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> io::Result<Option<T>> {
        while let Some(line) = self.read_line(prompt)? {
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
        Ok(None)
    }

    fn add_expense(&mut self) -> io::Result<Step> {
        writeln!(self.output, "\n--- Enter Expense Details ---")?;
        let Some(date) = self.prompt_until("Enter date of expense (YYYY-MM-DD): ", validation::parse_date)? else {
            return Ok(Step::InputClosed);
        };
        let Some(category) =
            self.prompt_until("Enter category of expense (Food/Travel/Utilities): ", validation::normalize_category)?
        else {
            return Ok(Step::InputClosed);
        };
        let Some(amount) = self.prompt_until("Enter amount spent: ", validation::validate_amount)? else {
            return Ok(Step::InputClosed);
        };
        let Some(description) = self.read_line("Enter a brief description of the expense: ")? else {
            return Ok(Step::InputClosed);
        };

        let record = ExpenseRecord {
            date,
            category,
            amount,
            description: description.trim().to_string(),
        };
        writeln!(self.output, "\nExpense added successfully!")?;
        writeln!(self.output, "{}", record)?;
        self.store.append(record);
        Ok(Step::Done)
    }

    fn view_expenses(&mut self) -> io::Result<Step> {
        if self.store.is_empty() {
            writeln!(self.output, "No expenses recorded yet")?;
            return Ok(Step::Done);
        }

        writeln!(self.output, "*---- Your Recorded Expenses ----*")?;
        for (i, record) in self.store.all().iter().enumerate() {
            writeln!(self.output, "\n--- Expense {} ---", i + 1)?;
            writeln!(self.output, "Date: {}", record.date)?;
            writeln!(self.output, "Category: {}", record.category)?;
            writeln!(self.output, "Amount: {:.2}", record.amount)?;
            writeln!(self.output, "Description: {}", record.description)?;
            writeln!(self.output, "{}", "-".repeat(20))?;
        }
        Ok(Step::Done)
    }

    fn track_budget(&mut self) -> io::Result<Step> {
        writeln!(self.output, "\n*--- Tracking Budget ---*")?;
        let prompt = format!(
            "Enter the total amount you want to budget for the month (Current: ${:.2}): $",
            self.budget
        );
        let Some(new_budget) = self.prompt_until(&prompt, validation::validate_budget)? else {
            return Ok(Step::InputClosed);
        };
        self.budget = new_budget;
        writeln!(self.output, "Monthly budget set to: ${:.2}", self.budget)?;

        writeln!(self.output, "\n--- Calculating Total Expense ---")?;
        let total = total_of(self.store.all());
        if self.store.is_empty() {
            writeln!(self.output, "No expenses recorded yet to calculate total.")?;
        } else {
            writeln!(self.output, "Your Total Expense is: ${:.2}", total)?;
        }

        writeln!(self.output, "\n--- Budget Comparison ---")?;
        writeln!(self.output, "Your Monthly Budget: ${:.2}", self.budget)?;
        writeln!(self.output, "Total Expenses So Far: ${:.2}", total)?;
        match compare(total, self.budget) {
            BudgetStanding::Over { by } => {
                writeln!(self.output, "\n!!! WARNING: You have EXCEEDED your budget by ${:.2} !!!", by)?;
            }
            BudgetStanding::Remaining { left } => {
                writeln!(self.output, "\nYou have ${:.2} left for the month.", left)?;
            }
        }
        Ok(Step::Done)
    }

    fn save_expenses(&mut self) -> io::Result<Step> {
        match csv_handler::save_expenses(&self.path, &self.store, self.budget) {
            Ok(()) => writeln!(
                self.output,
                "\nExpenses and current budget saved to '{}' successfully!",
                self.path.display()
            )?,
            Err(e) => {
                warn!("Failed to save expenses: {}", e);
                writeln!(self.output, "\nError saving expenses to file: {}", e)?;
            }
        }
        Ok(Step::Done)
    }
}
