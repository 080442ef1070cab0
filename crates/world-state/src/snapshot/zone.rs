/// Zone payload as authored and loaded into the state store.
///
/// Opaque to the renderer bridge apart from [`ZoneData::tiles`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoneData {
    pub id: String,
    pub name: Option<String>,
    /// Raw tile grid; absent for zones whose layout has not been streamed yet.
    pub tiles: Option<ZoneTiles>,
}

impl ZoneData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            tiles: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_tiles(mut self, tiles: ZoneTiles) -> Self {
        self.tiles = Some(tiles);
        self
    }
}

/// Authored tile grid: terrain names in row-major order.
///
/// Dimensions are optional in the raw shape because partially streamed zones
/// omit them; consumers must validate before use.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoneTiles {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub cells: Vec<String>,
}

impl ZoneTiles {
    pub fn new<I, S>(width: u32, height: u32, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            width: Some(width),
            height: Some(height),
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Grid filled with a single terrain name.
    pub fn filled(width: u32, height: u32, terrain: &str) -> Self {
        let count = (width as usize).saturating_mul(height as usize);
        Self::new(width, height, std::iter::repeat_n(terrain, count))
    }
}
