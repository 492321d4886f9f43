//! Bio pages under `/api/manager/profile/bio-pages`.

use crate::client::ShortlinkClient;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::http::Transport;
use crate::types::{BioPage, CreateBioPage, ListParams, Paginated, UpdateBioPage};

impl<T: Transport> ShortlinkClient<T> {
    pub fn list_bio_pages(&self, params: ListParams) -> Result<Paginated<BioPage>> {
        self.call(params.apply(Endpoint::get(&["api", "manager", "profile", "bio-pages"])))
    }

    pub fn get_bio_page(&self, id: &str) -> Result<BioPage> {
        self.call(Endpoint::get(&["api", "manager", "profile", "bio-pages", id]))
    }

    pub fn create_bio_page(&self, input: &CreateBioPage) -> Result<BioPage> {
        self.call(Endpoint::post(&["api", "manager", "profile", "bio-pages"]).json(input)?)
    }

    pub fn update_bio_page(&self, id: &str, input: &UpdateBioPage) -> Result<BioPage> {
        self.call(Endpoint::patch(&["api", "manager", "profile", "bio-pages", id]).json(input)?)
    }

    pub fn delete_bio_page(&self, id: &str) -> Result<()> {
        self.call_discarding(Endpoint::delete(&["api", "manager", "profile", "bio-pages", id]))
    }
}
