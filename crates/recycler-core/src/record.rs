use std::fmt;

/// Identity of a record. Records are ordered by id; negative ids are allowed
/// (items prepended above the first one usually count downward).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i64> for ItemId {
    fn from(v: i64) -> Self {
        ItemId(v)
    }
}

impl From<i32> for ItemId {
    fn from(v: i32) -> Self {
        ItemId(v as i64)
    }
}

impl From<&Record> for ItemId {
    fn from(r: &Record) -> Self {
        r.id
    }
}

/// One entry of the data source.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub id: ItemId,
    /// Invalid records stay in the source but are skipped by traversal.
    pub valid: bool,
    /// Size hint in px. `None` until the host has measured the item.
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: Option<f32>,
}

impl Record {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            valid: true,
            height: None,
        }
    }

    pub fn invalid(id: impl Into<ItemId>) -> Self {
        Self {
            valid: false,
            ..Self::new(id)
        }
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Partial update for [`crate::OrderedSource::modify`]. `None` fields are left alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordPatch {
    pub id: Option<ItemId>,
    pub valid: Option<bool>,
    pub height: Option<Option<f32>>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = Some(valid);
        self
    }

    pub fn height(mut self, height: Option<f32>) -> Self {
        self.height = Some(height);
        self
    }

    /// Applies the patch; returns true when the id changed.
    pub(crate) fn apply(&self, record: &mut Record) -> bool {
        if let Some(valid) = self.valid {
            record.valid = valid;
        }
        if let Some(height) = self.height {
            record.height = height;
        }
        match self.id {
            Some(id) if id != record.id => {
                record.id = id;
                true
            }
            _ => false,
        }
    }
}
