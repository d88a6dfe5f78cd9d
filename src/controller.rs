//! Page state: both selection lists, the active mode, and the status of
//! the listing and submission requests.
//!
//! One controller is created per page load. Async work is split into a
//! `begin_*` call that hands out a generation number and a `finish_*` /
//! `commit_*` call that drops results belonging to an older generation.

use crate::config::Endpoints;
use crate::error::ClientError;
use crate::request::{ConcatOptions, Mode, Submission};
use crate::response::ConcatOutcome;
use crate::selection::{ItemId, OrderedList, ServerListing, ServerThumb, UploadItem};

/// A picked file whose preview finished decoding.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedFile<F> {
    pub name: String,
    pub preview: String,
    pub file: F,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ListingState {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Empty,
    Ready,
}

#[derive(Debug)]
pub struct SelectionController<F> {
    mode: Mode,

    uploads: OrderedList<UploadItem<F>>,
    upload_generation: u64,
    decoding: bool,

    listing: ServerListing,
    listing_state: ListingState,
    listing_generation: u64,

    in_flight: bool,
    notice: Option<Notice>,
    next_id: ItemId,
}

impl<F> Default for SelectionController<F> {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            uploads: OrderedList::default(),
            upload_generation: 0,
            decoding: false,
            listing: ServerListing::default(),
            listing_state: ListingState::default(),
            listing_generation: 0,
            in_flight: false,
            notice: None,
            next_id: 1,
        }
    }
}

impl<F> SelectionController<F> {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> ItemId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Only changes which list is used; neither list is touched.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    // uploads

    pub fn uploads(&self) -> &OrderedList<UploadItem<F>> {
        &self.uploads
    }

    pub fn is_decoding(&self) -> bool {
        self.decoding
    }

    /// Starts a new file pick. Any decode batch still running for an older
    /// pick is discarded when it arrives.
    pub fn begin_upload_pick(&mut self) -> u64 {
        self.upload_generation += 1;
        self.decoding = true;
        self.upload_generation
    }

    /// Replaces the upload list with a fully decoded batch, in batch order.
    /// Returns false if the batch is stale.
    pub fn commit_uploads(&mut self, generation: u64, batch: Vec<DecodedFile<F>>) -> bool {
        if generation != self.upload_generation {
            log::debug!(
                "dropping stale preview batch {generation} (current {})",
                self.upload_generation
            );
            return false;
        }
        let items = batch
            .into_iter()
            .map(|d| UploadItem {
                id: self.alloc_id(),
                name: d.name,
                preview: d.preview,
                file: d.file,
            })
            .collect();
        self.uploads.replace(items);
        self.decoding = false;
        true
    }

    pub fn move_upload_before(&mut self, dragged: ItemId, target: ItemId) -> bool {
        self.uploads.move_before(dragged, target)
    }

    pub fn clear_uploads(&mut self) {
        self.upload_generation += 1;
        self.decoding = false;
        self.uploads.clear();
    }

    // server listing

    pub fn listing(&self) -> &ServerListing {
        &self.listing
    }

    pub fn listing_state(&self) -> &ListingState {
        &self.listing_state
    }

    pub fn begin_listing(&mut self) -> u64 {
        self.listing_generation += 1;
        self.listing.clear();
        self.listing_state = ListingState::Loading;
        self.listing_generation
    }

    /// Applies a listing result. Errors and empty folders leave no thumbs.
    /// Returns false if a newer listing (or a clear) superseded this one.
    pub fn finish_listing(
        &mut self,
        generation: u64,
        folder: &str,
        result: Result<Vec<String>, ClientError>,
        endpoints: &Endpoints,
    ) -> bool {
        if generation != self.listing_generation {
            log::debug!("dropping stale listing of {folder:?}");
            return false;
        }
        self.listing.clear();
        match result {
            Err(err) => {
                if let ClientError::Network { detail } = &err {
                    log::warn!("listing {folder:?} failed: {detail}");
                }
                self.listing_state = ListingState::Failed(err.to_string());
            }
            Ok(names) if names.is_empty() => {
                self.listing_state = ListingState::Empty;
            }
            Ok(names) => {
                let thumbs = names
                    .into_iter()
                    .map(|name| ServerThumb {
                        id: self.alloc_id(),
                        thumb_url: endpoints.thumbnail(folder, &name),
                        name,
                        selected: false,
                    })
                    .collect();
                self.listing.folder = folder.to_string();
                self.listing.thumbs.replace(thumbs);
                self.listing_state = ListingState::Ready;
            }
        }
        true
    }

    pub fn toggle_server(&mut self, id: ItemId) -> Option<bool> {
        self.listing.toggle(id)
    }

    pub fn move_server_before(&mut self, dragged: ItemId, target: ItemId) -> bool {
        self.listing.thumbs.move_before(dragged, target)
    }

    pub fn clear_listing(&mut self) {
        self.listing_generation += 1;
        self.listing.clear();
        self.listing_state = ListingState::Idle;
    }

    // submission

    /// Validates the active list and builds the request. On success the
    /// controller is marked in flight until [`Self::finish_submission`].
    pub fn prepare_submission(
        &mut self,
        options: &ConcatOptions,
    ) -> Result<Submission<F>, ClientError>
    where
        F: Clone,
    {
        if self.in_flight {
            return Err(ClientError::Busy);
        }
        self.notice = None;

        let built = match self.mode {
            Mode::Upload if self.uploads.is_empty() => Err(ClientError::NoUploads),
            Mode::Upload => Ok(Submission::uploads(
                options,
                self.uploads
                    .iter()
                    .map(|u| (u.name.clone(), u.file.clone()))
                    .collect(),
            )),
            Mode::Server => {
                let names = self.listing.selected_names();
                if names.is_empty() {
                    Err(ClientError::NoSelection)
                } else {
                    Ok(Submission::server(options, &self.listing.folder, names))
                }
            }
        };

        match built {
            Ok(sub) => {
                self.in_flight = true;
                Ok(sub)
            }
            Err(err) => {
                self.notice = Some(Notice::Error(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn finish_submission(&mut self, result: Result<ConcatOutcome, ClientError>) {
        self.in_flight = false;
        self.notice = match result {
            Ok(outcome) => outcome.message().map(Notice::Success),
            Err(err) => {
                match &err {
                    ClientError::Network { detail } | ClientError::Download { detail } => {
                        log::warn!("submission failed: {detail}");
                    }
                    _ => {}
                }
                Some(Notice::Error(err.to_string()))
            }
        };
    }
}
