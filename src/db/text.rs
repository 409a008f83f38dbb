use std::collections::HashMap;

use chrono::Utc;

use super::{parse_datetime, DataError, DataResult, Database};
use crate::models::TextPage;

fn page_from_row(row: &rusqlite::Row) -> rusqlite::Result<TextPage> {
    Ok(TextPage {
        page_number: row.get(0)?,
        title: row.get(1)?,
        text: row.get(2)?,
        created_at: parse_datetime(row.get::<_, String>(3)?),
        updated_at: parse_datetime(row.get::<_, String>(4)?),
    })
}

impl Database {
    /// Full mapping of page number to text page.
    pub fn read_text_pages(&self) -> DataResult<HashMap<String, TextPage>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT page_number, title, text, created_at, updated_at
             FROM text_pages ORDER BY page_number",
        )?;

        let pages = stmt
            .query_map([], page_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pages
            .into_iter()
            .map(|p| (p.page_number.clone(), p))
            .collect())
    }

    pub fn read_one_text_page(&self, page_number: &str) -> DataResult<Option<TextPage>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT page_number, title, text, created_at, updated_at
             FROM text_pages WHERE page_number = ?",
        )?;

        let mut rows = stmt.query([page_number])?;
        match rows.next()? {
            Some(row) => Ok(Some(page_from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Add a text page. Returns the new key (page number).
    pub fn create_text_page(
        &self,
        page_number: &str,
        title: &str,
        text: &str,
    ) -> DataResult<String> {
        if page_number.is_empty() {
            return Err(DataError::Invalid("page number must not be empty".into()));
        }
        if self.read_one_text_page(page_number)?.is_some() {
            return Err(DataError::Invalid(format!(
                "duplicate page number: {page_number}"
            )));
        }

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        conn.execute(
            "INSERT INTO text_pages (page_number, title, text, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                page_number,
                title,
                text,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(page_number.to_string())
    }

    /// Replace a page's title and body. `Ok(None)` if the page is absent.
    pub fn update_text_page(
        &self,
        page_number: &str,
        title: &str,
        text: &str,
    ) -> DataResult<Option<String>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        let rows = conn.execute(
            "UPDATE text_pages SET title = ?, text = ?, updated_at = ? WHERE page_number = ?",
            (title, text, now.to_rfc3339(), page_number),
        )?;
        Ok((rows > 0).then(|| page_number.to_string()))
    }

    pub fn delete_text_page(&self, page_number: &str) -> DataResult<Option<String>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute(
            "DELETE FROM text_pages WHERE page_number = ?",
            [page_number],
        )?;
        Ok((rows > 0).then(|| page_number.to_string()))
    }
}
