//! Public "real wedding" form intake and the moderation list.

use std::sync::Arc;

use axum::body::Bytes;
use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::domain::{NewSubmission, Submission, SubmissionStatus};
use crate::error::AdminError;
use crate::persistence::SubmissionStore;
use crate::photos::{ObjectStore, photo_key};
use crate::report::SubmissionStats;

/// One uploaded file from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    /// Client-side file name.
    pub file_name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// File contents.
    pub bytes: Bytes,
}

impl PhotoUpload {
    fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Raw form fields as received. Blank strings count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    /// `coupleNames`.
    pub couple_names: Option<String>,
    /// `coupleInstagram`.
    pub couple_instagram: Option<String>,
    /// `weddingDate`, `YYYY-MM-DD`.
    pub wedding_date: Option<String>,
    /// `weddingLocation`.
    pub wedding_location: Option<String>,
    /// `vendorInstagrams`.
    pub vendor_instagrams: Option<String>,
    /// `favoriteDetail`.
    pub favorite_detail: Option<String>,
    /// `termsAccepted`.
    pub terms_accepted: bool,
    /// `photos`.
    pub photos: Vec<PhotoUpload>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, field: &str) -> Result<String, AdminError> {
    present(value).ok_or_else(|| AdminError::InvalidRequest(format!("{field} is required")))
}

/// A filtered moderation list with counts over every row.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionListing {
    /// Counts over all submissions, regardless of the filter.
    pub stats: SubmissionStats,
    /// Matching rows, newest first.
    pub rows: Vec<Submission>,
}

/// Validates form input, uploads photos, and stores submissions.
#[derive(Debug, Clone)]
pub struct SubmissionService {
    submissions: Arc<dyn SubmissionStore>,
    photos: Option<Arc<dyn ObjectStore>>,
}

impl SubmissionService {
    /// Creates a new `SubmissionService`. `photos` is `None` when object
    /// storage is not configured.
    #[must_use]
    pub fn new(
        submissions: Arc<dyn SubmissionStore>,
        photos: Option<Arc<dyn ObjectStore>>,
    ) -> Self {
        Self {
            submissions,
            photos,
        }
    }

    /// Validates the form, uploads its images, and inserts a pending
    /// submission. Non-image files are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] for missing fields, a bad
    /// date, or unaccepted terms; [`AdminError::NotConfigured`] when photos
    /// are attached but storage is not configured;
    /// [`AdminError::ObjectStorage`] when an upload fails (nothing is
    /// inserted); [`AdminError::Store`] when the insert fails.
    pub async fn submit(
        &self,
        form: SubmissionForm,
        now: DateTime<Utc>,
    ) -> Result<Submission, AdminError> {
        let couple_names = required(form.couple_names, "coupleNames")?;
        let wedding_date = required(form.wedding_date, "weddingDate")?;
        let wedding_date = NaiveDate::parse_from_str(&wedding_date, "%Y-%m-%d").map_err(|_| {
            AdminError::InvalidRequest("weddingDate must be formatted YYYY-MM-DD".to_string())
        })?;
        let wedding_location = required(form.wedding_location, "weddingLocation")?;
        if !form.terms_accepted {
            return Err(AdminError::InvalidRequest(
                "termsAccepted must be checked".to_string(),
            ));
        }

        let images: Vec<PhotoUpload> = form.photos.into_iter().filter(PhotoUpload::is_image).collect();
        let photo_urls = self.upload_photos(images, now).await?;

        let submission = self
            .submissions
            .insert_submission(NewSubmission {
                couple_names,
                couple_instagram: present(form.couple_instagram),
                wedding_date,
                wedding_location,
                vendor_instagrams: present(form.vendor_instagrams),
                favorite_detail: present(form.favorite_detail),
                photo_urls,
                terms_accepted: true,
            })
            .await?;

        tracing::info!(
            submission_id = %submission.id,
            photos = submission.photo_urls.len(),
            "submission received"
        );
        Ok(submission)
    }

    async fn upload_photos(
        &self,
        images: Vec<PhotoUpload>,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>, AdminError> {
        if images.is_empty() {
            return Ok(Vec::new());
        }
        let Some(store) = &self.photos else {
            return Err(AdminError::NotConfigured(
                "Photo uploads are not configured.".to_string(),
            ));
        };

        let mut urls = Vec::with_capacity(images.len());
        for (offset, photo) in (0_i64..).zip(images) {
            let key = photo_key(now + Duration::milliseconds(offset), &photo.file_name);
            store
                .upload(&key, &photo.content_type, photo.bytes)
                .await
                .inspect_err(|err| tracing::error!(key = %key, error = %err, "photo upload failed"))?;
            urls.push(store.public_url(&key));
        }
        Ok(urls)
    }

    /// All submissions counted by status, rows filtered to `status`.
    ///
    /// A store failure is logged and yields an empty listing.
    pub async fn list(&self, status: Option<SubmissionStatus>) -> SubmissionListing {
        let all = match self.submissions.list_submissions(None).await {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(error = %err, "submission fetch failed; using empty result");
                Vec::new()
            }
        };
        let stats = SubmissionStats::from_submissions(&all);
        let rows = all
            .into_iter()
            .filter(|s| status.is_none_or(|wanted| s.status == wanted))
            .collect();
        SubmissionListing { stats, rows }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::photos::MemoryObjectStore;
    use crate::test_support::{FailingStore, now};

    fn form() -> SubmissionForm {
        SubmissionForm {
            couple_names: Some(" Sarah & Michael ".into()),
            couple_instagram: Some("".into()),
            wedding_date: Some("2025-09-20".into()),
            wedding_location: Some("Napa Valley".into()),
            vendor_instagrams: None,
            favorite_detail: Some("The tent".into()),
            terms_accepted: true,
            photos: Vec::new(),
        }
    }

    fn photo(name: &str, content_type: &str) -> PhotoUpload {
        PhotoUpload {
            file_name: name.into(),
            content_type: content_type.into(),
            bytes: Bytes::from_static(b"\xff\xd8\xff"),
        }
    }

    fn service() -> (SubmissionService, Arc<MemoryStore>, Arc<MemoryObjectStore>) {
        let store = Arc::new(MemoryStore::new());
        let photos = Arc::new(MemoryObjectStore::new());
        let service = SubmissionService::new(
            Arc::<MemoryStore>::clone(&store),
            Some(Arc::<MemoryObjectStore>::clone(&photos)),
        );
        (service, store, photos)
    }

    #[tokio::test]
    async fn valid_form_is_stored_pending_with_image_urls() {
        let (service, _, photos) = service();
        let mut form = form();
        form.photos = vec![
            photo("first dance.jpg", "image/jpeg"),
            photo("first dance.jpg", "image/jpeg"),
            photo("notes.pdf", "application/pdf"),
        ];

        let Ok(submission) = service.submit(form, now()).await else {
            panic!("submission should be accepted");
        };
        assert_eq!(submission.couple_names, "Sarah & Michael");
        assert_eq!(submission.couple_instagram, None);
        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(submission.photo_urls.len(), 2);
        assert_eq!(photos.len().await, 2);

        let millis = now().timestamp_millis();
        assert_eq!(
            submission.photo_urls.first().map(String::as_str),
            Some(format!("memory://photos/{millis}-first-dance.jpg").as_str())
        );
    }

    #[tokio::test]
    async fn missing_fields_and_terms_are_rejected() {
        let (service, store, _) = service();

        let mut no_names = form();
        no_names.couple_names = Some("   ".into());
        assert!(matches!(
            service.submit(no_names, now()).await,
            Err(AdminError::InvalidRequest(_))
        ));

        let mut bad_date = form();
        bad_date.wedding_date = Some("20/09/2025".into());
        assert!(matches!(
            service.submit(bad_date, now()).await,
            Err(AdminError::InvalidRequest(_))
        ));

        let mut no_terms = form();
        no_terms.terms_accepted = false;
        assert!(matches!(
            service.submit(no_terms, now()).await,
            Err(AdminError::InvalidRequest(_))
        ));

        assert!(service.list(None).await.rows.is_empty());
        assert!(matches!(store.list_submissions(None).await, Ok(rows) if rows.is_empty()));
    }

    #[tokio::test]
    async fn failed_upload_stores_nothing() {
        let (service, store, photos) = service();
        let taken = photo_key(now() + Duration::milliseconds(1), "second.jpg");
        let Ok(()) = photos
            .upload(&taken, "image/jpeg", Bytes::from_static(b"old"))
            .await
        else {
            panic!("seed upload failed");
        };

        let mut form = form();
        form.photos = vec![
            photo("first.jpg", "image/jpeg"),
            photo("second.jpg", "image/jpeg"),
        ];
        let result = service.submit(form, now()).await;
        assert!(matches!(result, Err(AdminError::ObjectStorage(_))));
        assert!(matches!(store.list_submissions(None).await, Ok(rows) if rows.is_empty()));
    }

    #[tokio::test]
    async fn photos_without_storage_are_not_configured() {
        let service = SubmissionService::new(Arc::new(MemoryStore::new()), None);
        let mut form = form();
        form.photos = vec![photo("a.png", "image/png")];
        assert!(matches!(
            service.submit(form.clone(), now()).await,
            Err(AdminError::NotConfigured(_))
        ));

        form.photos = Vec::new();
        assert!(service.submit(form, now()).await.is_ok());
    }

    #[tokio::test]
    async fn listing_filters_rows_but_counts_everything() {
        let (service, store, _) = service();
        let mut approved = crate::test_support::new_submission("C & D").into_submission(now());
        approved.status = SubmissionStatus::Approved;
        store.push_submission(approved).await;
        let Ok(_) = service.submit(form(), now()).await else {
            panic!("submission should be accepted");
        };

        let listing = service.list(Some(SubmissionStatus::Approved)).await;
        assert_eq!(listing.stats.total, 2);
        assert_eq!(listing.stats.pending, 1);
        assert_eq!(listing.rows.len(), 1);
        assert!(listing.rows.iter().all(|s| s.status == SubmissionStatus::Approved));
    }

    #[tokio::test]
    async fn listing_degrades_on_store_failure() {
        let service = SubmissionService::new(Arc::new(FailingStore), None);
        let listing = service.list(None).await;
        assert_eq!(listing.stats, SubmissionStats::default());
        assert!(listing.rows.is_empty());
    }
}
