//! Table schemas for the entity store
//!
//! Every entity describes its table once as a [`TableSchema`]; the SQL issued
//! by the PostgreSQL backend and the checks performed by the memory backend
//! are both derived from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How foreign keys between entity tables are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferentialPolicy {
    /// References are not checked; deleting a parent leaves referencing rows in place
    #[default]
    Orphan,
    /// References must resolve; deleting a referenced parent is rejected
    Enforce,
}

impl FromStr for ReferentialPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orphan" => Ok(Self::Orphan),
            "enforce" | "restrict" => Ok(Self::Enforce),
            other => Err(format!(
                "unknown referential policy '{}', expected 'orphan' or 'enforce'",
                other
            )),
        }
    }
}

impl fmt::Display for ReferentialPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orphan => f.write_str("orphan"),
            Self::Enforce => f.write_str("enforce"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    /// VARCHAR with a maximum length in characters
    Text(usize),
    Date,
    /// NUMERIC(precision, scale)
    Decimal { precision: u32, scale: u32 },
}

impl ColumnType {
    pub fn sql(&self) -> String {
        match self {
            Self::Integer => "INTEGER".to_string(),
            Self::Text(len) => format!("VARCHAR({})", len),
            Self::Date => "DATE".to_string(),
            Self::Decimal { precision, scale } => format!("NUMERIC({}, {})", precision, scale),
        }
    }
}

/// Target of a foreign-key column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub references: Option<ForeignKey>,
}

impl Column {
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            references: None,
        }
    }

    pub const fn foreign_key(name: &'static str, table: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column_type: ColumnType::Integer,
            references: Some(ForeignKey { table, column }),
        }
    }

    fn definition(&self, policy: ReferentialPolicy) -> String {
        let mut sql = format!("{} {} NOT NULL", self.name, self.column_type.sql());
        if let (Some(fk), ReferentialPolicy::Enforce) = (self.references, policy) {
            sql.push_str(&format!(
                " REFERENCES {}({}) ON DELETE RESTRICT",
                fk.table, fk.column
            ));
        }
        sql
    }
}

/// Layout of one entity table: a serial id column followed by the mutable columns
#[derive(Debug)]
pub struct TableSchema {
    /// Singular entity name used in messages, e.g. "patient"
    pub entity: &'static str,
    pub table: &'static str,
    pub id_column: &'static str,
    /// Mutable columns, in the order entities bind them
    pub columns: &'static [Column],
}

impl TableSchema {
    pub fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn select_list(&self) -> String {
        format!("{}, {}", self.id_column, self.column_list())
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = (&'static str, ForeignKey)> + '_ {
        self.columns
            .iter()
            .filter_map(|c| c.references.map(|fk| (c.name, fk)))
    }

    pub fn create_table_sql(&self, policy: ReferentialPolicy) -> String {
        let mut definitions = vec![format!("{} SERIAL PRIMARY KEY", self.id_column)];
        definitions.extend(self.columns.iter().map(|c| c.definition(policy)));
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.table,
            definitions.join(", ")
        )
    }

    pub fn insert_sql(&self) -> String {
        let placeholders = (1..=self.columns.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            self.table,
            self.column_list(),
            placeholders,
            self.select_list()
        )
    }

    pub fn select_all_sql(&self) -> String {
        format!(
            "SELECT {} FROM {} ORDER BY {}",
            self.select_list(),
            self.table,
            self.id_column
        )
    }

    pub fn select_by_id_sql(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = $1",
            self.select_list(),
            self.table,
            self.id_column
        )
    }

    /// Assignments use `$1..$n` for the columns and `$n+1` for the id
    pub fn update_sql(&self) -> String {
        let assignments = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", c.name, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            self.table,
            assignments,
            self.id_column,
            self.columns.len() + 1,
            self.select_list()
        )
    }

    pub fn delete_sql(&self) -> String {
        format!("DELETE FROM {} WHERE {} = $1", self.table, self.id_column)
    }
}
