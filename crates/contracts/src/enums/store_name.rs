use serde::{Deserialize, Serialize};

/// Stores that can raise an indent/issue request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreName {
    #[serde(rename = "Palm Walk")]
    PalmWalk,
    #[serde(rename = "Palm Marina")]
    PalmMarina,
    #[serde(rename = "Palm City")]
    PalmCity,
    #[serde(rename = "Garden")]
    Garden,
    #[serde(rename = "Maurya Green")]
    MauryaGreen,
    #[serde(rename = "ONE AMG")]
    OneAmg,
}

impl StoreName {
    /// Label shown in the selector and sent to the spreadsheet
    pub fn display_name(&self) -> &'static str {
        match self {
            StoreName::PalmWalk => "Palm Walk",
            StoreName::PalmMarina => "Palm Marina",
            StoreName::PalmCity => "Palm City",
            StoreName::Garden => "Garden",
            StoreName::MauryaGreen => "Maurya Green",
            StoreName::OneAmg => "ONE AMG",
        }
    }

    /// All stores in selector order
    pub fn all() -> Vec<StoreName> {
        vec![
            StoreName::PalmWalk,
            StoreName::PalmMarina,
            StoreName::PalmCity,
            StoreName::Garden,
            StoreName::MauryaGreen,
            StoreName::OneAmg,
        ]
    }
}

impl std::fmt::Display for StoreName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
