//! Pixel presets under `/api/manager/pixel-preset`.

use crate::client::ShortlinkClient;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::http::Transport;
use crate::types::{CreatePixelPreset, ListParams, Paginated, PixelPreset, UpdatePixelPreset};

impl<T: Transport> ShortlinkClient<T> {
    pub fn list_pixel_presets(&self, params: ListParams) -> Result<Paginated<PixelPreset>> {
        self.call(params.apply(Endpoint::get(&["api", "manager", "pixel-preset"])))
    }

    pub fn get_pixel_preset(&self, id: &str) -> Result<PixelPreset> {
        self.call(Endpoint::get(&["api", "manager", "pixel-preset", id]))
    }

    pub fn create_pixel_preset(&self, input: &CreatePixelPreset) -> Result<PixelPreset> {
        self.call(Endpoint::post(&["api", "manager", "pixel-preset"]).json(input)?)
    }

    pub fn update_pixel_preset(&self, id: &str, input: &UpdatePixelPreset) -> Result<PixelPreset> {
        self.call(Endpoint::patch(&["api", "manager", "pixel-preset", id]).json(input)?)
    }

    pub fn delete_pixel_preset(&self, id: &str) -> Result<()> {
        self.call_discarding(Endpoint::delete(&["api", "manager", "pixel-preset", id]))
    }
}
