//! JSON-backed staff store
//!
//! Repository over the persisted staff document. The store owns the document
//! in memory and flushes the whole file on `save`; single-process, last write
//! wins. Callers address review subjects through [`TargetRef`] so staff
//! members and kitchen workshops share one mutation path.

pub mod models;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::category::Category;
use crate::error::{Error, Result};

pub use models::{mean_rating, Review, Reviewable, StaffDocument, StaffRecord, StaffTable, WorkshopRecord};

/// A review subject: an individual staff member, or a workshop aggregate
/// when `staff_id` is `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRef {
    pub category: Category,
    pub staff_id: Option<String>,
}

impl TargetRef {
    /// Target a kitchen workshop aggregate
    pub fn workshop(category: Category) -> Self {
        Self { category, staff_id: None }
    }

    /// Target an individual staff member
    pub fn staff(category: Category, staff_id: impl Into<String>) -> Self {
        Self {
            category,
            staff_id: Some(staff_id.into()),
        }
    }

    pub fn is_workshop(&self) -> bool {
        self.staff_id.is_none()
    }
}

/// In-memory staff document with whole-file JSON persistence
pub struct StaffStore {
    path: PathBuf,
    doc: StaffDocument,
}

impl StaffStore {
    /// Load the document from `path`, or synthesize a default document with
    /// every category present when the file does not exist yet.
    ///
    /// Missing categories and fields in an existing file are back-filled by
    /// the models' serde defaults, so older documents remain loadable.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let doc = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            let doc: StaffDocument = serde_json::from_str(&raw)?;
            debug!("Loaded staff document from {}", path.display());
            doc
        } else {
            info!(
                "No staff document at {}, starting with an empty one",
                path.display()
            );
            StaffDocument::default()
        };

        Ok(Self { path, doc })
    }

    /// Serialize the whole document and overwrite the file
    pub fn save(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.doc)?;
        std::fs::write(&self.path, raw)?;
        debug!("Saved staff document to {}", self.path.display());
        Ok(())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full in-memory document
    pub fn document(&self) -> &StaffDocument {
        &self.doc
    }

    /// Staff table of a non-workshop category
    pub fn staff_table(&self, category: Category) -> Result<&StaffTable> {
        self.doc
            .staff_table(category)
            .ok_or_else(|| Error::InvalidInput(format!("{} is a workshop category", category.key())))
    }

    /// One staff member by category and id
    pub fn staff(&self, category: Category, staff_id: &str) -> Result<&StaffRecord> {
        self.staff_table(category)?
            .get(staff_id)
            .ok_or_else(|| Error::NotFound(format!("staff {}/{}", category.key(), staff_id)))
    }

    /// Workshop aggregate of a kitchen category
    pub fn workshop(&self, category: Category) -> Result<&WorkshopRecord> {
        self.doc
            .workshop(category)
            .ok_or_else(|| Error::InvalidInput(format!("{} is not a workshop category", category.key())))
    }

    /// Reviews of the given target, in insertion order
    pub fn reviews(&self, target: &TargetRef) -> Result<&[Review]> {
        match &target.staff_id {
            None => Ok(&self.workshop(target.category)?.reviews),
            Some(id) => Ok(&self.staff(target.category, id)?.reviews),
        }
    }

    /// Aggregate rating of the given target
    pub fn rating(&self, target: &TargetRef) -> Result<f64> {
        match &target.staff_id {
            None => Ok(self.workshop(target.category)?.rating),
            Some(id) => Ok(self.staff(target.category, id)?.rating),
        }
    }

    /// Append a review to the target and recompute its aggregate rating.
    ///
    /// Returns the new rating. The document is not flushed; call `save`.
    pub fn append_review(&mut self, target: &TargetRef, review: Review) -> Result<f64> {
        match &target.staff_id {
            None => {
                let workshop = self
                    .doc
                    .workshop_mut(target.category)
                    .ok_or_else(|| {
                        Error::InvalidInput(format!("{} is not a workshop category", target.category.key()))
                    })?;
                workshop.apply_review(review);
                Ok(workshop.rating)
            }
            Some(id) => {
                let staff = self
                    .doc
                    .staff_table_mut(target.category)
                    .ok_or_else(|| {
                        Error::InvalidInput(format!("{} is a workshop category", target.category.key()))
                    })?
                    .get_mut(id)
                    .ok_or_else(|| Error::NotFound(format!("staff {}/{}", target.category.key(), id)))?;
                staff.apply_review(review);
                Ok(staff.rating)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn review(user_id: i64, rating: u8) -> Review {
        Review::new(user_id, "Guest", rating, "отлично", Utc::now())
    }

    fn seeded_store(dir: &TempDir) -> StaffStore {
        let mut store = StaffStore::load(dir.path().join("staff_data.json")).unwrap();
        store.doc.waiters.insert(
            "anna".to_string(),
            StaffRecord {
                name: "Анна".to_string(),
                phone: "+7 900 000-00-00".to_string(),
                rating: 0.0,
                reviews: Vec::new(),
                photo: None,
            },
        );
        store
    }

    #[test]
    fn missing_file_synthesizes_all_categories() {
        let dir = TempDir::new().unwrap();
        let store = StaffStore::load(dir.path().join("staff_data.json")).unwrap();

        for category in Category::KITCHEN {
            let workshop = store.workshop(category).unwrap();
            assert_eq!(workshop.rating, 0.0);
            assert!(workshop.reviews.is_empty());
        }
        assert!(store.staff_table(Category::Waiters).unwrap().is_empty());
        assert!(store.staff_table(Category::Bartenders).unwrap().is_empty());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded_store(&dir);
        store
            .append_review(&TargetRef::staff(Category::Waiters, "anna"), review(7, 5))
            .unwrap();
        store
            .append_review(&TargetRef::workshop(Category::HotKitchen), review(7, 4))
            .unwrap();
        store.save().unwrap();

        let reloaded = StaffStore::load(store.path().to_path_buf()).unwrap();
        let anna = reloaded.staff(Category::Waiters, "anna").unwrap();
        assert_eq!(anna.name, "Анна");
        assert_eq!(anna.rating, 5.0);
        assert_eq!(anna.reviews.len(), 1);
        assert_eq!(reloaded.workshop(Category::HotKitchen).unwrap().rating, 4.0);
    }

    #[test]
    fn load_backfills_missing_categories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("staff_data.json");
        // Document written before cold_kitchen and bartenders existed
        std::fs::write(
            &path,
            r#"{"waiters": {"anna": {"name": "Анна", "phone": "123", "rating": 0, "reviews": []}}}"#,
        )
        .unwrap();

        let store = StaffStore::load(path).unwrap();
        let cold = store.workshop(Category::ColdKitchen).unwrap();
        assert_eq!(cold.rating, 0.0);
        assert!(cold.reviews.is_empty());
        assert!(store.staff_table(Category::Bartenders).unwrap().is_empty());
        assert!(store.staff(Category::Waiters, "anna").is_ok());
    }

    #[test]
    fn append_review_scenario_matches_rounding() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded_store(&dir);
        let target = TargetRef::staff(Category::Waiters, "anna");

        for rating in [5, 4, 5] {
            store.append_review(&target, review(1, rating)).unwrap();
        }
        assert_eq!(store.rating(&target).unwrap(), 4.7);

        // 17/4 = 4.25, a half that rounds to even
        store.append_review(&target, review(2, 3)).unwrap();
        assert_eq!(store.rating(&target).unwrap(), 4.2);
    }

    #[test]
    fn unknown_staff_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded_store(&dir);

        assert!(matches!(
            store.staff(Category::Waiters, "boris"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            store.append_review(&TargetRef::staff(Category::Waiters, "boris"), review(1, 5)),
            Err(Error::NotFound(_))
        ));
    }
}
