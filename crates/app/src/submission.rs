//! Two-stage pet submission: optimistic local commit, then remote echo.
//!
//! A submission fetches an image URL, commits the new pet to the store and
//! only then echoes it to the remote endpoint. The commit is never rolled
//! back: a failed echo leaves the pet in the store while the outcome still
//! reports failure.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use pawcart_core::{IdGenerator, Pet, PetForm, PetFormError};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::http::HttpError;
use crate::navigation::{Alert, AlertAction};
use crate::services::{ImageSource, PetEcho};
use crate::store::StoreHandle;

/// Message shown for every failed submission.
pub const FAILURE_MESSAGE: &str = "Failed to add pet. Please try again.";

/// Why a submission did not fully succeed.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Age or price could not be turned into a value; nothing was committed.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] PetFormError),

    /// The pet was committed but the remote echo failed.
    #[error("Remote echo failed: {0}")]
    Echo(#[from] HttpError),
}

/// Result of one call to [`PetSubmission::submit`].
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Committed and echoed.
    Added { pet: Pet, response: Value },

    /// Committed locally, echo failed. The pet stays in the store.
    EchoFailed { pet: Pet, error: SubmissionError },

    /// Stopped before commit; the store is untouched.
    Rejected { error: SubmissionError },

    /// Another submission on the same workflow was still running.
    Busy,
}

impl SubmissionOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Added { .. })
    }

    /// The pet written to the store, if the commit happened.
    #[must_use]
    pub const fn committed_pet(&self) -> Option<&Pet> {
        match self {
            Self::Added { pet, .. } | Self::EchoFailed { pet, .. } => Some(pet),
            Self::Rejected { .. } | Self::Busy => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&SubmissionError> {
        match self {
            Self::EchoFailed { error, .. } | Self::Rejected { error } => Some(error),
            Self::Added { .. } | Self::Busy => None,
        }
    }

    /// The acknowledgement to show. `Busy` shows nothing.
    #[must_use]
    pub fn alert(&self) -> Option<Alert> {
        match self {
            Self::Added { pet, .. } => Some(Alert::new(
                "Success!",
                format!("{} has been added successfully!", pet.pet_name),
                [AlertAction::AddAnother, AlertAction::ViewPets],
            )),
            Self::EchoFailed { .. } | Self::Rejected { .. } => {
                Some(Alert::new("Error", FAILURE_MESSAGE, [AlertAction::Ok]))
            }
            Self::Busy => None,
        }
    }
}

/// Clears the in-progress flag however the submission ends.
struct SubmittingGuard<'a>(&'a AtomicBool);

impl<'a> SubmittingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The add-pet workflow bound to one store.
pub struct PetSubmission<I, E> {
    store: StoreHandle,
    ids: Arc<IdGenerator>,
    images: I,
    echo: E,
    submitting: AtomicBool,
}

impl<I, E> PetSubmission<I, E>
where
    I: ImageSource,
    E: PetEcho,
{
    pub const fn new(store: StoreHandle, ids: Arc<IdGenerator>, images: I, echo: E) -> Self {
        Self {
            store,
            ids,
            images,
            echo,
            submitting: AtomicBool::new(false),
        }
    }

    /// Whether a submission is in progress. Front ends disable the submit
    /// control while this is true.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Submit an already validated form.
    ///
    /// Image failures are downgraded to an empty image URL. Age and price
    /// are parsed before the commit; if either fails nothing is stored.
    /// Dropping the returned future cancels in-flight requests and clears
    /// the in-progress flag.
    #[instrument(skip_all, fields(pet_name = %form.pet_name))]
    pub async fn submit(&self, form: &PetForm) -> SubmissionOutcome {
        let Some(_guard) = SubmittingGuard::acquire(&self.submitting) else {
            warn!("Submission already in progress");
            return SubmissionOutcome::Busy;
        };

        let image_url = match self.images.random_image_url().await {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, timed_out = e.is_timeout(), "Image fetch failed, continuing without image");
                String::new()
            }
        };

        let parsed = form
            .parse_age()
            .and_then(|age| form.parse_price().map(|price| (age, price)));
        let (age, price) = match parsed {
            Ok(values) => values,
            Err(e) => {
                warn!(error = %e, "Submission rejected before commit");
                return SubmissionOutcome::Rejected { error: e.into() };
            }
        };

        let pet = Pet {
            id: self.ids.pet_id(),
            pet_name: form.pet_name.trim().to_string(),
            breed: form.breed.trim().to_string(),
            age,
            price,
            image_url,
            created_at: Utc::now(),
        };

        self.store.add_pet(pet.clone());
        info!(pet_id = %pet.id, has_image = pet.has_image(), "Pet committed");

        match self.echo.echo(&pet).await {
            Ok(response) => {
                info!(pet_id = %pet.id, "Pet echoed");
                SubmissionOutcome::Added { pet, response }
            }
            Err(e) => {
                warn!(pet_id = %pet.id, error = %e, "Echo failed; pet stays committed");
                SubmissionOutcome::EchoFailed {
                    pet,
                    error: e.into(),
                }
            }
        }
    }
}
