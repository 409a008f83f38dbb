use std::collections::HashMap;

use chrono::Utc;

use super::{parse_datetime, valid_email, DataError, DataResult, Database};
use crate::models::{Manuscript, ManuscriptInput};

fn manuscript_from_row(row: &rusqlite::Row) -> rusqlite::Result<Manuscript> {
    Ok(Manuscript {
        title: row.get(0)?,
        author: row.get(1)?,
        author_email: row.get(2)?,
        text: row.get(3)?,
        abstract_text: row.get(4)?,
        editor_email: row.get(5)?,
        created_at: parse_datetime(row.get::<_, String>(6)?),
        updated_at: parse_datetime(row.get::<_, String>(7)?),
    })
}

fn validate(input: &ManuscriptInput) -> DataResult<()> {
    if input.title.is_empty() {
        return Err(DataError::Invalid("title must not be empty".into()));
    }
    if !valid_email(&input.author_email) {
        return Err(DataError::Invalid(format!(
            "invalid author email: {}",
            input.author_email
        )));
    }
    if !valid_email(&input.editor_email) {
        return Err(DataError::Invalid(format!(
            "invalid editor email: {}",
            input.editor_email
        )));
    }
    Ok(())
}

impl Database {
    /// Full mapping of title to manuscript record.
    pub fn read_manuscripts(&self) -> DataResult<HashMap<String, Manuscript>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT title, author, author_email, text, abstract, editor_email,
                    created_at, updated_at
             FROM manuscripts ORDER BY title",
        )?;

        let manuscripts = stmt
            .query_map([], manuscript_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(manuscripts
            .into_iter()
            .map(|m| (m.title.clone(), m))
            .collect())
    }

    pub fn read_one_manuscript(&self, title: &str) -> DataResult<Option<Manuscript>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT title, author, author_email, text, abstract, editor_email,
                    created_at, updated_at
             FROM manuscripts WHERE title = ?",
        )?;

        let mut rows = stmt.query([title])?;
        match rows.next()? {
            Some(row) => Ok(Some(manuscript_from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Add a manuscript. Returns the new key (title).
    pub fn create_manuscript(&self, input: &ManuscriptInput) -> DataResult<String> {
        validate(input)?;
        if self.read_one_manuscript(&input.title)?.is_some() {
            return Err(DataError::Invalid(format!(
                "duplicate title: {}",
                input.title
            )));
        }

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        conn.execute(
            "INSERT INTO manuscripts (title, author, author_email, text, abstract,
                                      editor_email, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            (
                &input.title,
                &input.author,
                &input.author_email,
                &input.text,
                &input.abstract_text,
                &input.editor_email,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(input.title.clone())
    }

    /// Replace every mutable field of a manuscript. `Ok(None)` if the title
    /// is unknown.
    pub fn update_manuscript(&self, input: &ManuscriptInput) -> DataResult<Option<String>> {
        validate(input)?;

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        let rows = conn.execute(
            "UPDATE manuscripts SET author = ?, author_email = ?, text = ?,
                                    abstract = ?, editor_email = ?, updated_at = ?
             WHERE title = ?",
            (
                &input.author,
                &input.author_email,
                &input.text,
                &input.abstract_text,
                &input.editor_email,
                now.to_rfc3339(),
                &input.title,
            ),
        )?;
        Ok((rows > 0).then(|| input.title.clone()))
    }

    pub fn delete_manuscript(&self, title: &str) -> DataResult<Option<String>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM manuscripts WHERE title = ?", [title])?;
        Ok((rows > 0).then(|| title.to_string()))
    }
}
