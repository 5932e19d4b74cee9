use std::fmt;
use std::str::FromStr;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    Travel,
    Utilities,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Food, Category::Travel, Category::Utilities];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Utilities => "Utilities",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownCategory;

/// Exact match against the title-cased names only.
impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(UnknownCategory)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: f64,
    pub description: String,
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {:.2} | {}", self.date, self.category, self.amount, self.description)
    }
}

/// In-memory expenses for the session, kept in insertion order.
/// Duplicates are allowed.
#[derive(Debug, Default)]
pub struct ExpenseStore {
    records: Vec<ExpenseRecord>,
}

impl ExpenseStore {
    pub fn append(&mut self, record: ExpenseRecord) {
        self.records.push(record);
    }

    pub fn all(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Replaces the current contents wholesale, keeping the given order.
    pub fn replace(&mut self, records: impl IntoIterator<Item = ExpenseRecord>) {
        self.clear();
        self.records.extend(records);
    }
}
