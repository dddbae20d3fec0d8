//! Document persistence contract and an in-memory backend
//!
//! [`DocumentStore`] is the boundary the editor talks to for loading and
//! saving documents. Deleting moves a document to the trash; it stays there
//! until it is restored or permanently deleted.
//!
//! [`InMemoryDocumentStore`] implements the contract for a single owner. It
//! backs tests and offline use, and documents the behavior a remote backend is
//! expected to match.

use chrono::Utc;
use quill_domain::{
    validate_create, validate_update, CreateDocumentInput, DocumentRecord, UpdateDocumentInput,
    ValidationError,
};
use std::sync::RwLock;
use uuid::Uuid;

/// Errors from the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Document is in the trash: {0}")]
    InTrash(String),

    #[error("Document is not in the trash: {0}")]
    NotInTrash(String),

    #[error("Invalid document: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// The trait that all document backends implement.
pub trait DocumentStore: Send + Sync {
    /// All documents outside the trash, most recently updated first.
    fn list(&self) -> Result<Vec<DocumentRecord>, StoreError>;

    /// Get a document by ID, whether or not it is in the trash.
    fn get(&self, id: &str) -> Result<DocumentRecord, StoreError>;

    /// Create a document.
    fn create(&self, input: CreateDocumentInput) -> Result<DocumentRecord, StoreError>;

    /// Apply a partial update to a document outside the trash.
    fn update(&self, id: &str, input: UpdateDocumentInput) -> Result<DocumentRecord, StoreError>;

    /// Move a document to the trash.
    fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Case-insensitive search over titles and content outside the trash.
    fn search(&self, query: &str) -> Result<Vec<DocumentRecord>, StoreError>;

    /// Documents in the trash, most recently deleted first.
    fn list_trash(&self) -> Result<Vec<DocumentRecord>, StoreError>;

    /// Take a document out of the trash.
    fn restore(&self, id: &str) -> Result<DocumentRecord, StoreError>;

    /// Remove a trashed document for good.
    fn permanent_delete(&self, id: &str) -> Result<(), StoreError>;

    /// Flip the favorite flag.
    fn toggle_favorite(&self, id: &str) -> Result<DocumentRecord, StoreError>;
}

/// A [`DocumentStore`] held in memory for one owner.
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    owner: String,
    /// Newest first
    documents: RwLock<Vec<DocumentRecord>>,
}

impl InMemoryDocumentStore {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            documents: RwLock::new(Vec::new()),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Vec<DocumentRecord>) -> T) -> Result<T, StoreError> {
        let guard = self
            .documents
            .read()
            .map_err(|_| StoreError::Storage("Lock poisoned".to_string()))?;
        Ok(f(&guard))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut Vec<DocumentRecord>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self
            .documents
            .write()
            .map_err(|_| StoreError::Storage("Lock poisoned".to_string()))?;
        f(&mut guard)
    }

    /// Run `f` on the document with `id`, returning a copy of the result.
    fn modify(
        &self,
        id: &str,
        f: impl FnOnce(&mut DocumentRecord) -> Result<(), StoreError>,
    ) -> Result<DocumentRecord, StoreError> {
        self.write(|docs| {
            let doc = docs
                .iter_mut()
                .find(|doc| doc.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            f(doc)?;
            Ok(doc.clone())
        })
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn list(&self) -> Result<Vec<DocumentRecord>, StoreError> {
        let mut docs = self.read(|docs| {
            docs.iter()
                .filter(|doc| !doc.in_trash())
                .cloned()
                .collect::<Vec<_>>()
        })?;
        docs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(docs)
    }

    fn get(&self, id: &str) -> Result<DocumentRecord, StoreError> {
        self.read(|docs| docs.iter().find(|doc| doc.id == id).cloned())?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn create(&self, input: CreateDocumentInput) -> Result<DocumentRecord, StoreError> {
        if let Err(e) = validate_create(&input) {
            tracing::warn!("Rejected new document: {}", e);
            return Err(e.into());
        }

        let doc = DocumentRecord::new(
            Uuid::new_v4().to_string(),
            self.owner.clone(),
            input.title,
            input.content.unwrap_or_default(),
            Utc::now(),
        );
        self.write(|docs| {
            docs.insert(0, doc.clone());
            Ok(())
        })?;
        tracing::debug!("Created document {}", doc.id);
        Ok(doc)
    }

    fn update(&self, id: &str, input: UpdateDocumentInput) -> Result<DocumentRecord, StoreError> {
        if let Err(e) = validate_update(&input) {
            tracing::warn!("Rejected update to document {}: {}", id, e);
            return Err(e.into());
        }

        self.modify(id, |doc| {
            if doc.in_trash() {
                return Err(StoreError::InTrash(doc.id.clone()));
            }
            doc.apply_update(&input, Utc::now());
            Ok(())
        })
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.modify(id, |doc| {
            if doc.in_trash() {
                return Err(StoreError::InTrash(doc.id.clone()));
            }
            doc.mark_deleted(Utc::now());
            Ok(())
        })?;
        tracing::debug!("Moved document {} to trash", id);
        Ok(())
    }

    fn search(&self, query: &str) -> Result<Vec<DocumentRecord>, StoreError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.list()?
            .into_iter()
            .filter(|doc| {
                doc.title.to_lowercase().contains(&needle)
                    || doc.content.to_lowercase().contains(&needle)
            })
            .collect())
    }

    fn list_trash(&self) -> Result<Vec<DocumentRecord>, StoreError> {
        let mut docs = self.read(|docs| {
            docs.iter()
                .filter(|doc| doc.in_trash())
                .cloned()
                .collect::<Vec<_>>()
        })?;
        docs.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        Ok(docs)
    }

    fn restore(&self, id: &str) -> Result<DocumentRecord, StoreError> {
        let doc = self.modify(id, |doc| {
            if !doc.in_trash() {
                return Err(StoreError::NotInTrash(doc.id.clone()));
            }
            doc.mark_restored(Utc::now());
            Ok(())
        })?;
        tracing::debug!("Restored document {}", id);
        Ok(doc)
    }

    fn permanent_delete(&self, id: &str) -> Result<(), StoreError> {
        self.write(|docs| {
            let index = docs
                .iter()
                .position(|doc| doc.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            if !docs[index].in_trash() {
                return Err(StoreError::NotInTrash(id.to_string()));
            }
            docs.remove(index);
            Ok(())
        })?;
        tracing::debug!("Permanently deleted document {}", id);
        Ok(())
    }

    fn toggle_favorite(&self, id: &str) -> Result<DocumentRecord, StoreError> {
        self.modify(id, |doc| {
            doc.is_favorite = !doc.is_favorite;
            Ok(())
        })
    }
}
