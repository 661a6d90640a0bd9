//! File-based Weights Repository Adapter
//!
//! Stores each computation record as a YAML file on disk, laid out as
//! `<base>/<project_id>/<evaluator_id>/<matrix_key>.yaml`.
//!
//! Writes go to a uniquely named `.tmp` sibling first and are renamed into
//! place, so a concurrent reader sees either the old record or the new one.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::domain::foundation::ProjectId;
use crate::ports::{
    ComputationKey, MatrixComputationRecord, WeightsRepository, WeightsRepositoryError,
};

/// File-based storage for computation records
#[derive(Debug, Clone)]
pub struct FileWeightsRepository {
    base_path: PathBuf,
}

impl FileWeightsRepository {
    /// Create a new file repository with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let repo = FileWeightsRepository::new("./data/weights");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn project_dir(&self, project_id: ProjectId) -> PathBuf {
        self.base_path.join(project_id.to_string())
    }

    fn record_path(&self, key: &ComputationKey) -> Result<PathBuf, WeightsRepositoryError> {
        let evaluator = safe_segment(key.evaluator_id.as_str())?;
        let matrix = safe_segment(key.matrix_key.as_str())?;
        Ok(self
            .project_dir(key.project_id)
            .join(evaluator)
            .join(format!("{}.yaml", matrix)))
    }

    async fn read_record(path: &Path) -> Result<MatrixComputationRecord, WeightsRepositoryError> {
        let yaml = fs::read_to_string(path)
            .await
            .map_err(|e| WeightsRepositoryError::IoError(e.to_string()))?;
        serde_yaml::from_str(&yaml)
            .map_err(|e| WeightsRepositoryError::DeserializationFailed(e.to_string()))
    }
}

/// Key segments become path components, so separators and dot-only names are refused.
fn safe_segment(segment: &str) -> Result<&str, WeightsRepositoryError> {
    let dots_only = segment.chars().all(|c| c == '.');
    if dots_only || segment.contains(|c: char| c == '/' || c == '\\') {
        return Err(WeightsRepositoryError::InvalidKey(segment.to_string()));
    }
    Ok(segment)
}

#[async_trait]
impl WeightsRepository for FileWeightsRepository {
    async fn upsert(&self, record: &MatrixComputationRecord) -> Result<(), WeightsRepositoryError> {
        let path = self.record_path(&record.key)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| WeightsRepositoryError::IoError(e.to_string()))?;
        }

        let yaml = serde_yaml::to_string(record)
            .map_err(|e| WeightsRepositoryError::SerializationFailed(e.to_string()))?;

        // Each writer gets its own temp file; the rename replaces the record whole.
        let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4()));
        fs::write(&temp_path, yaml).await.map_err(|e| {
            WeightsRepositoryError::IoError(format!("Failed to write temporary file: {}", e))
        })?;

        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(WeightsRepositoryError::IoError(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )));
        }

        Ok(())
    }

    async fn get(
        &self,
        key: &ComputationKey,
    ) -> Result<Option<MatrixComputationRecord>, WeightsRepositoryError> {
        let path = self.record_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Self::read_record(&path).await.map(Some)
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<MatrixComputationRecord>, WeightsRepositoryError> {
        let dir = self.project_dir(project_id);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        let mut evaluators = fs::read_dir(&dir)
            .await
            .map_err(|e| WeightsRepositoryError::IoError(e.to_string()))?;
        while let Some(evaluator_dir) = evaluators
            .next_entry()
            .await
            .map_err(|e| WeightsRepositoryError::IoError(e.to_string()))?
        {
            let mut files = fs::read_dir(evaluator_dir.path())
                .await
                .map_err(|e| WeightsRepositoryError::IoError(e.to_string()))?;
            while let Some(file) = files
                .next_entry()
                .await
                .map_err(|e| WeightsRepositoryError::IoError(e.to_string()))?
            {
                let path = file.path();
                if path.extension().is_some_and(|ext| ext == "yaml") {
                    records.push(Self::read_record(&path).await?);
                }
            }
        }

        records.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::{advise_inconsistency, compute_ahp, ComparisonMatrix};
    use crate::domain::foundation::{EvaluatorId, MatrixKey, Timestamp};
    use tempfile::TempDir;

    fn key(project_id: ProjectId, evaluator: &str, matrix_key: &str) -> ComputationKey {
        ComputationKey::new(
            project_id,
            EvaluatorId::new(evaluator).unwrap(),
            MatrixKey::new(matrix_key).unwrap(),
        )
    }

    fn record(key: ComputationKey) -> MatrixComputationRecord {
        let matrix = ComparisonMatrix::from_rows(vec![
            vec![1.0, 2.0, 0.5],
            vec![0.5, 1.0, 2.0],
            vec![2.0, 0.5, 1.0],
        ])
        .unwrap();
        let result = compute_ahp(&matrix).unwrap();
        let advice = advise_inconsistency(&matrix, &result.weights, 2).unwrap();
        MatrixComputationRecord {
            key,
            matrix,
            weights: result.weights,
            consistency: result.consistency,
            advice,
            computed_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn test_file_repository_upsert_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileWeightsRepository::new(temp_dir.path());
        let rec = record(key(ProjectId::new(), "alice", "criteria"));

        repo.upsert(&rec).await.unwrap();
        let loaded = repo.get(&rec.key).await.unwrap().unwrap();

        assert_eq!(loaded.key, rec.key);
        assert_eq!(loaded.matrix, rec.matrix);
        assert_eq!(loaded.advice.len(), 2);
        assert!(!loaded.consistency.is_consistent);
        assert!(repo.record_path(&rec.key).unwrap().exists());
    }

    #[tokio::test]
    async fn test_file_repository_get_missing() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileWeightsRepository::new(temp_dir.path());
        let result = repo.get(&key(ProjectId::new(), "alice", "criteria")).await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_file_repository_list_for_project() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileWeightsRepository::new(temp_dir.path());
        let project = ProjectId::new();

        repo.upsert(&record(key(project, "bob", "criteria"))).await.unwrap();
        repo.upsert(&record(key(project, "alice", "criteria"))).await.unwrap();
        repo.upsert(&record(key(ProjectId::new(), "carol", "criteria")))
            .await
            .unwrap();

        let listed = repo.list_for_project(project).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].key.evaluator_id.as_str(), "alice");
        assert_eq!(listed[1].key.evaluator_id.as_str(), "bob");
    }

    #[tokio::test]
    async fn test_file_repository_rejects_path_segments() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileWeightsRepository::new(temp_dir.path());
        let rec = record(key(ProjectId::new(), "../escape", "criteria"));

        let result = repo.upsert(&rec).await;
        assert!(matches!(result, Err(WeightsRepositoryError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_file_repository_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileWeightsRepository::new(temp_dir.path());
        let rec = record(key(ProjectId::new(), "alice", "criteria"));

        repo.upsert(&rec).await.unwrap();
        repo.upsert(&rec).await.unwrap();

        let dir = repo.record_path(&rec.key).unwrap();
        let names: Vec<String> = std::fs::read_dir(dir.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["criteria.yaml".to_string()]);
    }
}
