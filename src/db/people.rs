use std::collections::HashMap;

use chrono::Utc;

use super::{parse_datetime, valid_email, DataError, DataResult, Database};
use crate::models::{Masthead, Person, Role, MASTHEAD_ROLES};

fn person_from_row(row: &rusqlite::Row) -> rusqlite::Result<Person> {
    let roles_json: String = row.get(3)?;
    Ok(Person {
        email: row.get(0)?,
        name: row.get(1)?,
        affiliation: row.get(2)?,
        roles: serde_json::from_str(&roles_json).unwrap_or_default(),
        created_at: parse_datetime(row.get::<_, String>(4)?),
        updated_at: parse_datetime(row.get::<_, String>(5)?),
    })
}

impl Database {
    /// Full mapping of email to person record.
    pub fn read_people(&self) -> DataResult<HashMap<String, Person>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT email, name, affiliation, roles, created_at, updated_at
             FROM people ORDER BY email",
        )?;

        let people = stmt
            .query_map([], person_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(people.into_iter().map(|p| (p.email.clone(), p)).collect())
    }

    pub fn read_one_person(&self, email: &str) -> DataResult<Option<Person>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT email, name, affiliation, roles, created_at, updated_at
             FROM people WHERE email = ?",
        )?;

        let mut rows = stmt.query([email])?;
        match rows.next()? {
            Some(row) => Ok(Some(person_from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Add a person with a single initial role. Returns the new key (email).
    pub fn create_person(
        &self,
        name: &str,
        affiliation: &str,
        email: &str,
        role_code: &str,
    ) -> DataResult<String> {
        let role = Role::from_code(role_code)
            .ok_or_else(|| DataError::Invalid(format!("invalid role code: {role_code}")))?;
        if !valid_email(email) {
            return Err(DataError::Invalid(format!("invalid email: {email}")));
        }
        if self.read_one_person(email)?.is_some() {
            return Err(DataError::Invalid(format!("duplicate email: {email}")));
        }

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        conn.execute(
            "INSERT INTO people (email, name, affiliation, roles, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                email,
                name,
                affiliation,
                serde_json::to_string(&[role])?,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(email.to_string())
    }

    pub fn update_person_name(&self, email: &str, value: &str) -> DataResult<Option<String>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        let rows = conn.execute(
            "UPDATE people SET name = ?, updated_at = ? WHERE email = ?",
            (value, now.to_rfc3339(), email),
        )?;
        Ok((rows > 0).then(|| email.to_string()))
    }

    pub fn update_person_affiliation(&self, email: &str, value: &str) -> DataResult<Option<String>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        let rows = conn.execute(
            "UPDATE people SET affiliation = ?, updated_at = ? WHERE email = ?",
            (value, now.to_rfc3339(), email),
        )?;
        Ok((rows > 0).then(|| email.to_string()))
    }

    pub fn delete_person(&self, email: &str) -> DataResult<Option<String>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM people WHERE email = ?", [email])?;
        Ok((rows > 0).then(|| email.to_string()))
    }

    /// Attach a role to an existing person. The person must exist and must
    /// not already hold the role.
    pub fn add_person_role(&self, email: &str, role_code: &str) -> DataResult<String> {
        let role = Role::from_code(role_code)
            .ok_or_else(|| DataError::Invalid(format!("invalid role code: {role_code}")))?;
        let mut person = self
            .read_one_person(email)?
            .ok_or_else(|| DataError::Invalid(format!("no such person: {email}")))?;

        if person.roles.contains(&role) {
            return Err(DataError::Invalid(format!(
                "{email} already holds role {role_code}"
            )));
        }
        person.roles.push(role);
        self.write_roles(email, &person.roles)?;

        Ok(email.to_string())
    }

    pub fn delete_person_role(&self, email: &str, role_code: &str) -> DataResult<String> {
        let role = Role::from_code(role_code)
            .ok_or_else(|| DataError::Invalid(format!("invalid role code: {role_code}")))?;
        let mut person = self
            .read_one_person(email)?
            .ok_or_else(|| DataError::Invalid(format!("no such person: {email}")))?;

        if !person.roles.contains(&role) {
            return Err(DataError::Invalid(format!(
                "{email} does not hold role {role_code}"
            )));
        }
        person.roles.retain(|r| *r != role);
        self.write_roles(email, &person.roles)?;

        Ok(email.to_string())
    }

    /// Masthead listing: every masthead role title mapped to the sorted
    /// names of its members. Roles with no members get an empty section.
    pub fn get_masthead(&self) -> DataResult<Masthead> {
        let people = self.read_people()?;

        let mut masthead = Masthead::new();
        for role in MASTHEAD_ROLES {
            let mut members: Vec<String> = people
                .values()
                .filter(|p| p.roles.contains(&role))
                .map(|p| p.name.clone())
                .collect();
            members.sort();
            masthead.insert(role.title().to_string(), members);
        }

        Ok(masthead)
    }

    fn write_roles(&self, email: &str, roles: &[Role]) -> DataResult<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        conn.execute(
            "UPDATE people SET roles = ?, updated_at = ? WHERE email = ?",
            (serde_json::to_string(roles)?, now.to_rfc3339(), email),
        )?;
        Ok(())
    }
}
