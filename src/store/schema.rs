pub(crate) const CREATE_EXPENSES: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    date        TEXT NOT NULL,
    amount      REAL NOT NULL,
    category    TEXT NOT NULL,
    subcategory TEXT DEFAULT '',
    note        TEXT DEFAULT ''
);
"#;

pub(crate) const INSERT_EXPENSE: &str = "INSERT INTO expenses (date, amount, category, subcategory, note)
     VALUES (?1, ?2, ?3, ?4, ?5)";

pub(crate) const SELECT_RANGE: &str = "SELECT id, date, amount, category, subcategory, note
     FROM expenses
     WHERE date BETWEEN ?1 AND ?2
     ORDER BY id ASC";

pub(crate) const SUMMARIZE_RANGE: &str = "SELECT category, SUM(amount) AS total_amount
     FROM expenses
     WHERE date BETWEEN ?1 AND ?2";

pub(crate) const SUMMARIZE_CATEGORY_CLAUSE: &str = " AND category = ?3";

pub(crate) const SUMMARIZE_TAIL: &str = " GROUP BY category ORDER BY category ASC";
