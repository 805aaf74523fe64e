//! Review grid for suggested object instances.

use log::{debug, info, warn};

use crate::error::{StageError, StageResult};
use crate::models::{ObjectInstance, ObjectOutput, ObjectSuggestion};

/// One editable row: a named object, its type, and whether to keep it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRow {
    pub object: String,
    /// `None` when the suggested type is not one of the confirmed types.
    pub object_type: Option<String>,
    pub confirmed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectCuration {
    suggestions: Vec<ObjectSuggestion>,
    rows: Vec<ObjectRow>,
    allowed_types: Vec<String>,
}

impl ObjectCuration {
    /// Start a review from raw suggestions. Every row starts checked.
    pub fn new(suggestions: Vec<ObjectSuggestion>, allowed_types: Vec<String>) -> Self {
        let mut untyped = 0usize;
        let rows = suggestions
            .iter()
            .map(|s| {
                let known = allowed_types.iter().any(|t| t == &s.object_type);
                if !known {
                    untyped += 1;
                }
                ObjectRow {
                    object: s.object.clone(),
                    object_type: known.then(|| s.object_type.clone()),
                    confirmed: true,
                }
            })
            .collect();

        if untyped > 0 {
            debug!(
                "{} suggested objects use a type outside the confirmed list",
                untyped
            );
        }

        Self {
            suggestions,
            rows,
            allowed_types,
        }
    }

    pub fn suggestions(&self) -> &[ObjectSuggestion] {
        &self.suggestions
    }

    pub fn rows(&self) -> &[ObjectRow] {
        &self.rows
    }

    pub fn allowed_types(&self) -> &[String] {
        &self.allowed_types
    }

    pub fn set_type(&mut self, index: usize, object_type: &str) -> StageResult<()> {
        self.ensure_allowed(object_type)?;
        self.row_mut(index)?.object_type = Some(object_type.to_string());
        Ok(())
    }

    pub fn rename(&mut self, index: usize, object: &str) -> StageResult<()> {
        let object = object.trim();
        if object.is_empty() {
            return Err(StageError::InvalidEdit("object name must not be empty".into()));
        }
        self.row_mut(index)?.object = object.to_string();
        Ok(())
    }

    pub fn set_confirmed(&mut self, index: usize, confirmed: bool) -> StageResult<()> {
        self.row_mut(index)?.confirmed = confirmed;
        Ok(())
    }

    /// Add a reviewer-supplied row; returns its index.
    pub fn add_row(&mut self, object: &str, object_type: &str) -> StageResult<usize> {
        let object = object.trim();
        if object.is_empty() {
            return Err(StageError::InvalidEdit("object name must not be empty".into()));
        }
        self.ensure_allowed(object_type)?;

        self.rows.push(ObjectRow {
            object: object.to_string(),
            object_type: Some(object_type.to_string()),
            confirmed: true,
        });
        Ok(self.rows.len() - 1)
    }

    pub fn remove_row(&mut self, index: usize) -> StageResult<ObjectRow> {
        if index >= self.rows.len() {
            return Err(out_of_range(index, self.rows.len()));
        }
        Ok(self.rows.remove(index))
    }

    /// Publish the checked rows. Checked rows still lacking a type are left out.
    pub fn confirm(&self, total_rows: usize) -> ObjectOutput {
        let mut confirmed = Vec::new();
        let mut untyped = 0usize;

        for row in self.rows.iter().filter(|r| r.confirmed) {
            match &row.object_type {
                Some(object_type) => confirmed.push(ObjectInstance {
                    object: row.object.clone(),
                    object_type: object_type.clone(),
                    confirmed: true,
                }),
                None => untyped += 1,
            }
        }

        if untyped > 0 {
            warn!("Left out {} checked objects without an object type", untyped);
        }
        info!(
            "Confirmed {} of {} suggested objects",
            confirmed.len(),
            self.suggestions.len()
        );

        ObjectOutput {
            total_rows,
            suggestions: self.suggestions.clone(),
            confirmed,
        }
    }

    fn ensure_allowed(&self, object_type: &str) -> StageResult<()> {
        if self.allowed_types.iter().any(|t| t == object_type) {
            Ok(())
        } else {
            Err(StageError::InvalidEdit(format!(
                "'{object_type}' is not a confirmed object type"
            )))
        }
    }

    fn row_mut(&mut self, index: usize) -> StageResult<&mut ObjectRow> {
        let len = self.rows.len();
        self.rows.get_mut(index).ok_or_else(|| out_of_range(index, len))
    }
}

fn out_of_range(index: usize, len: usize) -> StageError {
    StageError::InvalidEdit(format!("object row {index} does not exist ({len} rows)"))
}
