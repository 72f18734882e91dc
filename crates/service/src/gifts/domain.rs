use serde::{Deserialize, Serialize};

/// One recipient/gift pairing. `id` is chosen by the caller and never changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GiftItem {
    pub id: String,
    pub name: String,
    pub gift: String,
    #[serde(default)]
    pub purchased: bool,
}

/// Partial update. `None` leaves the stored field as it is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GiftPatch {
    pub name: Option<String>,
    pub gift: Option<String>,
    pub purchased: Option<bool>,
}

impl GiftPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.gift.is_none() && self.purchased.is_none()
    }

    /// Merge over an existing record; fields present in the patch win.
    pub fn apply(self, existing: GiftItem) -> GiftItem {
        GiftItem {
            id: existing.id,
            name: self.name.unwrap_or(existing.name),
            gift: self.gift.unwrap_or(existing.gift),
            purchased: self.purchased.unwrap_or(existing.purchased),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub message: &'static str,
}

impl Default for DeleteConfirmation {
    fn default() -> Self {
        Self { message: "Gift item deleted" }
    }
}
