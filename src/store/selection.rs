//! Row selection
//!
//! A selection is a raw SQL `WHERE` fragment with anonymous `?` placeholders
//! and the values bound to them. The store passes it through as given;
//! validation only applies to writes, never to selections.

use rusqlite::types::Value as SqlValue;

use crate::schema::columns;

/// A `WHERE` fragment plus its bound arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    clause: String,
    args: Vec<SqlValue>,
}

impl Selection {
    pub fn new(clause: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self {
            clause: clause.into(),
            args,
        }
    }

    /// A selection without placeholders
    pub fn raw(clause: impl Into<String>) -> Self {
        Self::new(clause, Vec::new())
    }

    /// A selection whose arguments arrive as text, as they do from the CLI and
    /// query strings. SQLite applies column affinity when comparing, so
    /// `gender = ?` bound to `"1"` still matches the integer column.
    pub fn with_text_args<I, S>(clause: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(clause, args.into_iter().map(|a| SqlValue::Text(a.into())).collect())
    }

    /// Exactly the row with `id`
    pub fn by_id(id: i64) -> Self {
        Self::new(format!("{} = ?", columns::ID), vec![SqlValue::Integer(id)])
    }

    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn args(&self) -> &[SqlValue] {
        &self.args
    }

    /// True when the clause selects every row
    pub fn is_empty(&self) -> bool {
        self.clause.trim().is_empty()
    }
}

/// Append ` WHERE (<clause>)` and the selection's arguments, if any.
pub(crate) fn push_where(sql: &mut String, params: &mut Vec<SqlValue>, selection: Option<&Selection>) {
    if let Some(selection) = selection.filter(|s| !s.is_empty()) {
        sql.push_str(" WHERE (");
        sql.push_str(selection.clause());
        sql.push(')');
        params.extend(selection.args().iter().cloned());
    }
}
